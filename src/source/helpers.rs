use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::{Address, Bytes, U256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, RootProvider,
    },
    rpc::types::TransactionRequest,
    uint,
};

pub static ONE_ETHER: U256 = uint!(1_000_000_000_000_000_000_U256);

use anyhow::{anyhow, Result};
use revm::{
    context::result::{ExecutionResult, Output},
    database::{AlloyDB, CacheDB, WrapDatabaseAsync},
    primitives::TxKind,
    state::{AccountInfo, Bytecode},
    Context, ExecuteEvm, MainBuilder, MainContext,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub fn measure_start(label: &str) -> (String, Instant) {
    (label.to_string(), Instant::now())
}

pub fn measure_end(start: (String, Instant)) -> Duration {
    let elapsed = start.1.elapsed();
    println!("Elapsed: {:.2?} for '{}'", elapsed, start.0);
    elapsed
}

/// `count` evenly spaced volumes in `(from, to]`, largest first.
pub fn volumes(from: U256, to: U256, count: usize) -> Vec<U256> {
    if count == 0 || to <= from {
        return Vec::new();
    }
    let step = (to - from) / U256::from(count);

    let mut volumes: Vec<U256> = (1..=count)
        .map(|i| from + step * U256::from(i))
        .collect();

    volumes.reverse();
    volumes
}

pub fn build_tx(
    to: Address,
    from: Address,
    calldata: Bytes,
    base_fee: u128,
) -> Result<TransactionRequest> {
    Ok(TransactionRequest::default()
        .to(to)
        .from(from)
        .with_input(calldata)
        .nonce(0)
        .gas_limit(1000000)
        .max_fee_per_gas(base_fee)
        .max_priority_fee_per_gas(0)
        .build_unsigned()
        .map_err(|e| anyhow!("failed to build tx: {e:?}"))?
        .into())
}

/// Plain read-only call, no gas fields.
pub fn view_tx(to: Address, calldata: Bytes) -> TransactionRequest {
    TransactionRequest::default().to(to).with_input(calldata)
}

pub type HttpProvider = Arc<
    FillProvider<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        RootProvider,
    >,
>;

pub type AlloyCacheDB = CacheDB<WrapDatabaseAsync<AlloyDB<Ethereum, HttpProvider>>>;

pub fn revm_call(
    from: Address,
    to: Address,
    calldata: Bytes,
    cache_db: &mut AlloyCacheDB,
) -> Result<Bytes> {
    let mut evm = Context::mainnet()
        .with_db(cache_db)
        .modify_tx_chained(|tx| {
            tx.caller = from;
            tx.kind = TxKind::Call(to);
            tx.data = calldata;
            tx.value = U256::ZERO;
        })
        .build_mainnet();

    let ref_tx = evm
        .replay()
        .map_err(|e| anyhow!("revm replay failed: {e:?}"))?;

    match ref_tx.result {
        ExecutionResult::Success {
            output: Output::Call(value),
            ..
        } => Ok(value),
        result => Err(anyhow!("execution failed: {result:?}")),
    }
}

pub fn init_cache_db(provider: HttpProvider) -> Result<AlloyCacheDB> {
    let db = WrapDatabaseAsync::new(AlloyDB::new(provider, Default::default()))
        .ok_or_else(|| anyhow!("revm database needs a multi-threaded tokio runtime"))?;
    Ok(CacheDB::new(db))
}

/// Loads `address` bytecode into `cache_db`, reading it from the on-disk
/// cache in `cache_dir` when present and fetching it over RPC otherwise.
pub async fn init_account(
    address: Address,
    cache_db: &mut AlloyCacheDB,
    provider: HttpProvider,
    cache_dir: &Path,
) -> Result<()> {
    let cache_key = format!("bytecode-{:?}", address);
    let bytecode = match cacache::read(cache_dir, cache_key.clone()).await {
        Ok(bytecode) => {
            log::debug!("bytecode cache hit for {address}");
            Bytecode::new_raw(Bytes::from(bytecode))
        }
        Err(_e) => {
            log::debug!("bytecode cache miss for {address}, fetching");
            let bytecode = provider.get_code_at(address).await?;
            let bytecode_result = Bytecode::new_raw(bytecode.clone());
            cacache::write(cache_dir, cache_key, bytecode.to_vec()).await?;
            bytecode_result
        }
    };
    let code_hash = bytecode.hash_slow();
    let acc_info = AccountInfo {
        balance: U256::ZERO,
        nonce: 0_u64,
        code: Some(bytecode),
        code_hash,
    };
    cache_db.insert_account_info(address, acc_info);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volumes_are_evenly_spaced_descending() {
        let v = volumes(U256::ZERO, U256::from(100u64), 4);
        assert_eq!(
            v,
            vec![
                U256::from(100u64),
                U256::from(75u64),
                U256::from(50u64),
                U256::from(25u64)
            ]
        );
    }

    #[test]
    fn volumes_respect_lower_bound() {
        let v = volumes(U256::from(100u64), U256::from(200u64), 2);
        assert_eq!(v, vec![U256::from(200u64), U256::from(150u64)]);
    }

    #[test]
    fn volumes_empty_range() {
        assert!(volumes(U256::from(5u64), U256::from(5u64), 3).is_empty());
        assert!(volumes(U256::ZERO, ONE_ETHER, 0).is_empty());
    }

    #[test]
    fn build_tx_sets_call_fields() {
        let tx = build_tx(Address::ZERO, Address::ZERO, Bytes::from(vec![1, 2]), 7).unwrap();
        assert_eq!(tx.gas, Some(1000000));
        assert_eq!(tx.max_fee_per_gas, Some(7));
        assert_eq!(tx.input.input().cloned(), Some(Bytes::from(vec![1, 2])));
    }
}
