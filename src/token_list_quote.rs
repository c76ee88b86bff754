use anyhow::Result;
use univ3_exchange_quote::source::{
    format_quote, Config, DecimalAmount, QuoteOracle, QuoteReport, QuoteRequest, QuoterV2Oracle,
    TokenList,
};

const CHAIN_ID: u64 = 1;
const FEE: u32 = 3000;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    let provider = config.provider();

    let tokens = TokenList::load(&config.token_list, CHAIN_ID)?;
    let token_in = tokens.by_symbol("LINK")?;
    let token_out = tokens.by_symbol("USDC")?;

    let amount_in: DecimalAmount = "10000".parse()?;
    let request = QuoteRequest {
        token_in: token_in.address,
        token_out: token_out.address,
        fee: FEE,
        amount_in: amount_in.to_raw(token_in.decimals)?,
    };

    let mut oracle = QuoterV2Oracle::new(provider);
    let amount_out = oracle.quote(&request).await?;

    let quote = format_quote(
        token_in,
        token_out,
        &amount_in,
        amount_out,
        config.display_precision,
    )?;
    let report = QuoteReport::new("Uniswap V3 (token list)", quote).with_fee(FEE);
    println!("{report}");

    Ok(())
}
