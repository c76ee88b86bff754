use alloy::primitives::U256;
use anyhow::Result;
use std::ops::Div;
use univ3_exchange_quote::source::{
    format_quote, measure_end, measure_start, to_decimal, volumes, Config, QuoteOracle,
    QuoteRequest, QuoterV2Oracle, TokenList, ONE_ETHER,
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

    let volumes = volumes(U256::ZERO, ONE_ETHER.div(U256::from(10)), 100);
    let mut oracle = QuoterV2Oracle::new(provider);

    let start = measure_start("quote_ladder");
    for (index, volume) in volumes.into_iter().enumerate() {
        let request = QuoteRequest {
            token_in: weth.address,
            token_out: usdc.address,
            fee: FEE,
            amount_in: volume,
        };
        let amount_out = oracle.quote(&request).await?;

        if index % 20 == 0 {
            let amount_in = to_decimal(volume, weth.decimals)?;
            let quote = format_quote(weth, usdc, &amount_in, amount_out, config.display_precision)?;
            println!(
                "{} {} -> {} {} (rate {})",
                quote.amount_in_display,
                weth.symbol,
                quote.amount_out_display,
                usdc.symbol,
                quote.exchange_rate_display
            );
        }
    }
    measure_end(start);

    Ok(())
}
