use alloy::{providers::ProviderBuilder, transports::http::reqwest::Url};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::source::HttpProvider;

pub const DEFAULT_TOKEN_LIST: &str = "tokens/mainnet.json";
pub const DEFAULT_DISPLAY_PRECISION: u8 = 4;
pub const DEFAULT_EVM_CACHE_DIR: &str = ".evm_cache";

/// Settings shared by the quote scripts, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: Url,
    pub token_list: PathBuf,
    pub display_precision: u8,
    pub evm_cache_dir: PathBuf,
}

impl Config {
    /// Reads `ETH_RPC_URL`, `TOKEN_LIST`, `QUOTE_DISPLAY_PRECISION` and
    /// `EVM_CACHE_DIR`, after loading `.env` when one exists.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            log::debug!("loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let rpc_url: Url = lookup("ETH_RPC_URL")
            .context("ETH_RPC_URL is not set")?
            .parse()
            .context("ETH_RPC_URL is not a valid URL")?;

        let display_precision: u8 = match lookup("QUOTE_DISPLAY_PRECISION") {
            Some(value) => value
                .parse()
                .with_context(|| format!("QUOTE_DISPLAY_PRECISION={value:?} is not a u8"))?,
            None => DEFAULT_DISPLAY_PRECISION,
        };

        let config = Self {
            rpc_url,
            token_list: lookup("TOKEN_LIST")
                .unwrap_or_else(|| DEFAULT_TOKEN_LIST.to_string())
                .into(),
            display_precision,
            evm_cache_dir: lookup("EVM_CACHE_DIR")
                .unwrap_or_else(|| DEFAULT_EVM_CACHE_DIR.to_string())
                .into(),
        };
        log::info!(
            "rpc {}, token list {}, display precision {}",
            config.rpc_url.host_str().unwrap_or("?"),
            config.token_list.display(),
            config.display_precision
        );
        Ok(config)
    }

    pub fn provider(&self) -> HttpProvider {
        Arc::new(ProviderBuilder::new().on_http(self.rpc_url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[("ETH_RPC_URL", "http://localhost:8545")]))
            .unwrap();
        assert_eq!(config.rpc_url.as_str(), "http://localhost:8545/");
        assert_eq!(config.token_list, PathBuf::from(DEFAULT_TOKEN_LIST));
        assert_eq!(config.display_precision, 4);
        assert_eq!(config.evm_cache_dir, PathBuf::from(".evm_cache"));
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ETH_RPC_URL", "https://rpc.flashbots.net"),
            ("TOKEN_LIST", "/tmp/list.json"),
            ("QUOTE_DISPLAY_PRECISION", "2"),
            ("EVM_CACHE_DIR", "/tmp/evm"),
        ]))
        .unwrap();
        assert_eq!(config.token_list, PathBuf::from("/tmp/list.json"));
        assert_eq!(config.display_precision, 2);
        assert_eq!(config.evm_cache_dir, PathBuf::from("/tmp/evm"));
    }

    #[test]
    fn missing_or_bad_values() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("ETH_RPC_URL"));

        assert!(Config::from_lookup(lookup(&[("ETH_RPC_URL", "not a url")])).is_err());
        assert!(Config::from_lookup(lookup(&[
            ("ETH_RPC_URL", "http://localhost:8545"),
            ("QUOTE_DISPLAY_PRECISION", "-1"),
        ]))
        .is_err());
    }
}
