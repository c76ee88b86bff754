use std::fmt;

use crate::source::QuoteResult;

const RULE: &str = "---------------------------";

/// Pool fee as a percentage string, `3000` -> `"0.3"`.
///
/// Fees are in hundredths of a basis point, so the percentage is `fee / 10^4`.
pub fn fee_tier_percent(fee: u32) -> String {
    let whole = fee / 10_000;
    let fraction = format!("{:04}", fee % 10_000);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Console rendering of a [`QuoteResult`], optionally with pool details.
#[derive(Debug, Clone)]
pub struct QuoteReport {
    title: String,
    quote: QuoteResult,
    fee_tier: Option<String>,
    liquidity: Option<u128>,
}

impl QuoteReport {
    pub fn new(title: &str, quote: QuoteResult) -> Self {
        Self {
            title: title.to_string(),
            quote,
            fee_tier: None,
            liquidity: None,
        }
    }

    pub fn with_fee(mut self, fee: u32) -> Self {
        self.fee_tier = Some(fee_tier_percent(fee));
        self
    }

    pub fn with_liquidity(mut self, liquidity: u128) -> Self {
        self.liquidity = Some(liquidity);
        self
    }
}

impl fmt::Display for QuoteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = &self.quote;
        writeln!(f, "{RULE} {} {RULE}", self.title)?;
        for (label, token) in [("Token In", &q.token_in), ("Token Out", &q.token_out)] {
            writeln!(
                f,
                "{label}: {}, contract {}, decimal place {}",
                token.symbol, token.address, token.decimals
            )?;
        }
        writeln!(
            f,
            "{} : {} = {} : {}",
            q.token_in.symbol, q.token_out.symbol, q.amount_in_display, q.amount_out_display
        )?;
        write!(f, "Ex. rate (out amount/in amount) = {}", q.exchange_rate_display)?;
        if let Some(fee_tier) = &self.fee_tier {
            write!(f, "\nPool fee tier: {fee_tier}%")?;
        }
        if let Some(liquidity) = self.liquidity {
            write!(f, "\nPool liquidity: {liquidity}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{format_quote, TokenInfo, LINK_ADDR, USDC_ADDR};
    use alloy::primitives::U256;

    fn quote() -> QuoteResult {
        let link = TokenInfo::new("LINK", 18, LINK_ADDR);
        let usdc = TokenInfo::new("USDC", 6, USDC_ADDR);
        format_quote(
            &link,
            &usdc,
            &"10000".parse().unwrap(),
            U256::from(143_210_987_654u64),
            4,
        )
        .unwrap()
    }

    #[test]
    fn fee_tiers() {
        assert_eq!(fee_tier_percent(100), "0.01");
        assert_eq!(fee_tier_percent(500), "0.05");
        assert_eq!(fee_tier_percent(3000), "0.3");
        assert_eq!(fee_tier_percent(10000), "1");
        assert_eq!(fee_tier_percent(0), "0");
        assert_eq!(fee_tier_percent(12_345), "1.2345");
    }

    #[test]
    fn renders_quote_lines() {
        let report = QuoteReport::new("Uniswap V3 exchange quote", quote()).to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines[0],
            "--------------------------- Uniswap V3 exchange quote ---------------------------"
        );
        assert_eq!(
            lines[1],
            format!("Token In: LINK, contract {LINK_ADDR}, decimal place 18")
        );
        assert_eq!(
            lines[2],
            format!("Token Out: USDC, contract {USDC_ADDR}, decimal place 6")
        );
        assert_eq!(lines[3], "LINK : USDC = 10000.0000 : 143210.9877");
        assert_eq!(lines[4], "Ex. rate (out amount/in amount) = 14.3211");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn renders_pool_details() {
        let report = QuoteReport::new("Uniswap V3 exchange quote", quote())
            .with_fee(3000)
            .with_liquidity(12_345)
            .to_string();
        assert!(report.ends_with("Pool fee tier: 0.3%\nPool liquidity: 12345"));
    }
}
