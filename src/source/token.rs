use alloy::primitives::Address;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::source::{checked_decimals, QuoteError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub address: Address,
    pub chain_id: u64,
}

impl TokenInfo {
    pub fn new(symbol: &str, decimals: u8, address: Address) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: String::new(),
            decimals,
            address,
            chain_id: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenEntry {
    chain_id: u64,
    address: Address,
    #[serde(default)]
    name: String,
    symbol: String,
    decimals: i64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenListFile {
    Bare(Vec<TokenEntry>),
    Uniswap { tokens: Vec<TokenEntry> },
}

/// Tokens of one chain, indexed by symbol and by address.
///
/// When a symbol appears more than once the first entry wins.
#[derive(Debug, Clone, Default)]
pub struct TokenList {
    tokens: Vec<TokenInfo>,
    by_symbol: HashMap<String, usize>,
    by_address: HashMap<Address, usize>,
}

impl TokenList {
    pub fn new(tokens: impl IntoIterator<Item = TokenInfo>) -> Self {
        let mut list = Self::default();
        for token in tokens {
            let index = list.tokens.len();
            list.by_symbol.entry(token.symbol.clone()).or_insert(index);
            list.by_address.entry(token.address).or_insert(index);
            list.tokens.push(token);
        }
        list
    }

    /// Parses either a bare array of entries or a token list object with a
    /// `tokens` array, keeping only entries for `chain_id`.
    pub fn from_json(json: &str, chain_id: u64) -> Result<Self> {
        let entries = match serde_json::from_str(json).context("malformed token list")? {
            TokenListFile::Bare(entries) => entries,
            TokenListFile::Uniswap { tokens } => tokens,
        };

        let tokens = entries
            .into_iter()
            .filter(|entry| entry.chain_id == chain_id)
            .map(|entry| {
                let decimals = checked_decimals(entry.decimals)
                    .with_context(|| format!("token {}", entry.symbol))?;
                Ok(TokenInfo {
                    symbol: entry.symbol,
                    name: entry.name,
                    decimals,
                    address: entry.address,
                    chain_id: entry.chain_id,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(tokens))
    }

    pub fn load(path: impl AsRef<Path>, chain_id: u64) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read token list {}", path.display()))?;
        let list = Self::from_json(&json, chain_id)?;
        log::debug!("loaded {} tokens from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn by_symbol(&self, symbol: &str) -> Result<&TokenInfo, QuoteError> {
        self.by_symbol
            .get(symbol)
            .map(|&index| &self.tokens[index])
            .ok_or_else(|| QuoteError::TokenNotFound(symbol.to_string()))
    }

    pub fn by_address(&self, address: Address) -> Result<&TokenInfo, QuoteError> {
        self.by_address
            .get(&address)
            .map(|&index| &self.tokens[index])
            .ok_or_else(|| QuoteError::TokenNotFound(address.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
