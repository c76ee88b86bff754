pub mod abi;
pub mod actors;
pub mod amount;
pub mod chain;
pub mod config;
pub mod error;
pub mod helpers;
pub mod oracle;
pub mod quote;
pub mod report;
pub mod token;

pub use abi::*;
pub use actors::*;
pub use amount::*;
pub use chain::*;
pub use config::*;
pub use error::*;
pub use helpers::*;
pub use oracle::*;
pub use quote::*;
pub use report::*;
pub use token::*;
