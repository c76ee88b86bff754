use alloy::{
    primitives::{Address, Bytes, U160},
    providers::Provider,
    sol_types::SolCall,
};
use anyhow::{Context, Result};

use crate::source::{decode_return, encode_call, view_tx, IUniswapV3Pool, TokenInfo, IERC20};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolImmutables {
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    pub liquidity: u128,
    pub sqrt_price_x96: U160,
    pub tick: i32,
}

async fn read<P: Provider, C: SolCall>(provider: &P, to: Address, call: C) -> Result<C::Return> {
    let response: Bytes = provider
        .call(view_tx(to, encode_call(call)))
        .await
        .with_context(|| format!("eth_call {} on {to}", C::SIGNATURE))?;
    decode_return::<C>(&response)
}

/// ERC-20 metadata of `address`, read concurrently.
pub async fn fetch_token<P: Provider>(provider: &P, address: Address) -> Result<TokenInfo> {
    let (symbol, name, decimals, chain_id) = tokio::try_join!(
        read(provider, address, IERC20::symbolCall {}),
        read(provider, address, IERC20::nameCall {}),
        read(provider, address, IERC20::decimalsCall {}),
        async { provider.get_chain_id().await.context("eth_chainId") },
    )?;
    log::debug!("token {symbol} ({name}) at {address}: {decimals} decimals");

    Ok(TokenInfo {
        symbol,
        name,
        decimals,
        address,
        chain_id,
    })
}

pub async fn fetch_pool_immutables<P: Provider>(provider: &P, pool: Address) -> Result<PoolImmutables> {
    let (token0, token1, fee) = tokio::try_join!(
        read(provider, pool, IUniswapV3Pool::token0Call {}),
        read(provider, pool, IUniswapV3Pool::token1Call {}),
        read(provider, pool, IUniswapV3Pool::feeCall {}),
    )?;

    Ok(PoolImmutables {
        token0,
        token1,
        fee: fee.to::<u32>(),
    })
}

pub async fn fetch_pool_state<P: Provider>(provider: &P, pool: Address) -> Result<PoolState> {
    let (liquidity, slot0) = tokio::try_join!(
        read(provider, pool, IUniswapV3Pool::liquidityCall {}),
        read(provider, pool, IUniswapV3Pool::slot0Call {}),
    )?;

    Ok(PoolState {
        liquidity,
        sqrt_price_x96: slot0.sqrtPriceX96,
        tick: slot0.tick.as_i32(),
    })
}

/// Immutables and state of `pool`, fetched together.
pub async fn fetch_pool<P: Provider>(provider: &P, pool: Address) -> Result<(PoolImmutables, PoolState)> {
    tokio::try_join!(
        fetch_pool_immutables(provider, pool),
        fetch_pool_state(provider, pool)
    )
}
