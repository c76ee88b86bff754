use anyhow::Result;
use univ3_exchange_quote::source::{
    fetch_pool, format_quote, Config, DecimalAmount, QuoteOracle, QuoteReport, QuoteRequest,
    QuoterV1Oracle, TokenInfo, FRAX_USDC_POOL_ADDR,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    let provider = config.provider();

    let (immutables, state) = fetch_pool(&provider, FRAX_USDC_POOL_ADDR).await?;

    // token metadata is known up front, only the addresses come from the pool
    let token_in = TokenInfo::new("FRAX", 18, immutables.token0);
    let token_out = TokenInfo::new("USDC", 6, immutables.token1);

    let amount_in: DecimalAmount = "10".parse()?;
    let request = QuoteRequest {
        token_in: token_in.address,
        token_out: token_out.address,
        fee: immutables.fee,
        amount_in: amount_in.to_raw(token_in.decimals)?,
    };

    let mut oracle = QuoterV1Oracle::new(provider.clone());
    let amount_out = oracle.quote(&request).await?;

    let quote = format_quote(
        &token_in,
        &token_out,
        &amount_in,
        amount_out,
        config.display_precision,
    )?;
    let report = QuoteReport::new("Uniswap V3 exchange quote", quote)
        .with_fee(immutables.fee)
        .with_liquidity(state.liquidity);
    println!("{report}");

    Ok(())
}
