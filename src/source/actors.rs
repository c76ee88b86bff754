use alloy::primitives::{address, Address};

pub const ME: Address = address!("0000000000000000000000000000000000000001");

pub const WETH_ADDR: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
pub const USDC_ADDR: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
pub const FRAX_ADDR: Address = address!("853d955acef822db058eb8505911ed77f175b99e");
pub const LINK_ADDR: Address = address!("514910771af9ca656af840dff83e8264ecf986ca");

pub const V3_QUOTER_V1_ADDR: Address = address!("b27308f9F90D607463bb33eA1BeBb41C27CE5AB6");
pub const V3_QUOTER_V2_ADDR: Address = address!("61fFE014bA17989E743c5F6cB21bF9697530B21e");

// FRAX/USDC
pub const FRAX_USDC_POOL_ADDR: Address = address!("c63b0708e2f7e69cb8a1df0e1389a98c35a76d52");
// USDC/WETH fee 3000
pub const USDC_WETH_POOL_ADDR: Address = address!("8ad599c3a0ff1de082011efddc58f1908eb6e6d8");
// LINK/USDC
pub const LINK_USDC_POOL_ADDR: Address = address!("fad57d2039c21811c8f2b5d5b65308aa99d31559");
