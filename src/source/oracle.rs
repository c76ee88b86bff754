//! Sources of raw swap quotes.
//!
//! Every backend answers the same question: given a token pair, a fee tier
//! and a raw input amount, how many raw units of the output token come back.

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
};
use anyhow::Result;
use std::path::Path;

use crate::source::{
    build_tx, decode_quote_v1_response, decode_quote_v2_response, init_account, init_cache_db,
    quote_v1_calldata, quote_v2_calldata, revm_call, AlloyCacheDB, HttpProvider, ME,
    V3_QUOTER_V1_ADDR, V3_QUOTER_V2_ADDR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRequest {
    pub token_in: Address,
    pub token_out: Address,
    /// Pool fee in hundredths of a basis point, e.g. `3000` for 0.3%.
    pub fee: u32,
    pub amount_in: U256,
}

#[allow(async_fn_in_trait)]
pub trait QuoteOracle {
    /// Raw output amount for `request`.
    async fn quote(&mut self, request: &QuoteRequest) -> Result<U256>;
}

/// Quoter V1 queried with `eth_call`.
pub struct QuoterV1Oracle<P> {
    provider: P,
    quoter: Address,
}

impl<P: Provider> QuoterV1Oracle<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            quoter: V3_QUOTER_V1_ADDR,
        }
    }
}

impl<P: Provider> QuoteOracle for QuoterV1Oracle<P> {
    async fn quote(&mut self, request: &QuoteRequest) -> Result<U256> {
        let base_fee = self.provider.get_gas_price().await?;
        let calldata = quote_v1_calldata(
            request.token_in,
            request.token_out,
            request.fee,
            request.amount_in,
        );
        let tx = build_tx(self.quoter, ME, calldata, base_fee)?;
        let response = self.provider.call(tx).await?;
        let amount_out = decode_quote_v1_response(&response)?;
        log::debug!("quoter v1: {:?} -> {}", request, amount_out);
        Ok(amount_out)
    }
}

/// QuoterV2 queried with `eth_call`.
pub struct QuoterV2Oracle<P> {
    provider: P,
    quoter: Address,
    base_fee: Option<u128>,
}

impl<P: Provider> QuoterV2Oracle<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            quoter: V3_QUOTER_V2_ADDR,
            base_fee: None,
        }
    }
}

impl<P: Provider> QuoteOracle for QuoterV2Oracle<P> {
    async fn quote(&mut self, request: &QuoteRequest) -> Result<U256> {
        // one gas price lookup per oracle, ladders reuse it
        let base_fee = match self.base_fee {
            Some(base_fee) => base_fee,
            None => {
                let base_fee = self.provider.get_gas_price().await?;
                self.base_fee = Some(base_fee);
                base_fee
            }
        };
        let calldata = quote_v2_calldata(
            request.token_in,
            request.token_out,
            request.fee,
            request.amount_in,
        );
        let tx = build_tx(self.quoter, ME, calldata, base_fee)?;
        let response = self.provider.call(tx).await?;
        let amount_out = decode_quote_v2_response(&response)?;
        log::debug!("quoter v2: {:?} -> {}", request, amount_out);
        Ok(amount_out)
    }
}

/// QuoterV2 executed locally in revm over a lazily forked state.
pub struct RevmQuoterOracle {
    cache_db: AlloyCacheDB,
    quoter: Address,
}

impl RevmQuoterOracle {
    /// Preloads the quoter bytecode and the `pools` it will touch, using
    /// `cache_dir` as the on-disk bytecode cache.
    pub async fn new(provider: HttpProvider, pools: &[Address], cache_dir: &Path) -> Result<Self> {
        let mut cache_db = init_cache_db(provider.clone())?;
        init_account(V3_QUOTER_V2_ADDR, &mut cache_db, provider.clone(), cache_dir).await?;
        for pool in pools {
            init_account(*pool, &mut cache_db, provider.clone(), cache_dir).await?;
        }
        Ok(Self {
            cache_db,
            quoter: V3_QUOTER_V2_ADDR,
        })
    }
}

impl QuoteOracle for RevmQuoterOracle {
    async fn quote(&mut self, request: &QuoteRequest) -> Result<U256> {
        let calldata = quote_v2_calldata(
            request.token_in,
            request.token_out,
            request.fee,
            request.amount_in,
        );
        let response = revm_call(ME, self.quoter, calldata, &mut self.cache_db)?;
        let amount_out = decode_quote_v2_response(&response)?;
        log::debug!("revm quoter: {:?} -> {}", request, amount_out);
        Ok(amount_out)
    }
}
