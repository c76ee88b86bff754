use anyhow::Result;
use univ3_exchange_quote::source::{
    format_quote, measure_end, measure_start, Config, DecimalAmount, QuoteOracle, QuoteReport,
    QuoteRequest, RevmQuoterOracle, TokenList, USDC_WETH_POOL_ADDR,
};

const CHAIN_ID: u64 = 1;
const FEE: u32 = 3000;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    let provider = config.provider();

    let tokens = TokenList::load(&config.token_list, CHAIN_ID)?;
    let weth = tokens.by_symbol("WETH")?;
    let usdc = tokens.by_symbol("USDC")?;

    let mut oracle =
        RevmQuoterOracle::new(provider, &[USDC_WETH_POOL_ADDR], &config.evm_cache_dir).await?;

    let amount_in: DecimalAmount = "10".parse()?;
    let request = QuoteRequest {
        token_in: weth.address,
        token_out: usdc.address,
        fee: FEE,
        amount_in: amount_in.to_raw(weth.decimals)?,
    };

    let start = measure_start("revm_quote_first");
    let amount_out = oracle.quote(&request).await?;
    measure_end(start);

    let start = measure_start("revm_quote_cached");
    let cached_out = oracle.quote(&request).await?;
    measure_end(start);
    if cached_out != amount_out {
        log::warn!("cached quote {cached_out} differs from first quote {amount_out}");
    }

    let quote = format_quote(weth, usdc, &amount_in, amount_out, config.display_precision)?;
    let report = QuoteReport::new("Uniswap V3 (revm quoter)", quote).with_fee(FEE);
    println!("{report}");

    Ok(())
}
