use alloy::{
    primitives::{aliases::U24, uint, Address, Bytes, U160, U256},
    sol,
    sol_types::SolCall,
};

use anyhow::{anyhow, Result};

sol! {
    interface IQuoter {
        function quoteExactInputSingle(
            address tokenIn,
            address tokenOut,
            uint24 fee,
            uint256 amountIn,
            uint160 sqrtPriceLimitX96
        ) external returns (uint256 amountOut);
    }

    interface IQuoterV2 {
        struct QuoteExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint256 amountIn;
            uint24 fee;
            uint160 sqrtPriceLimitX96;
        }

        function quoteExactInputSingle(QuoteExactInputSingleParams memory params)
        external
        returns (
            uint256 amountOut,
            uint160 sqrtPriceX96After,
            uint32 initializedTicksCrossed,
            uint256 gasEstimate
        );
    }

    interface IUniswapV3Pool {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function fee() external view returns (uint24);
        function liquidity() external view returns (uint128);
        function slot0() external view returns (
            uint160 sqrtPriceX96,
            int24 tick,
            uint16 observationIndex,
            uint16 observationCardinality,
            uint16 observationCardinalityNext,
            uint8 feeProtocol,
            bool unlocked
        );
    }

    interface IERC20 {
        function symbol() external view returns (string);
        function name() external view returns (string);
        function decimals() external view returns (uint8);
    }
}

pub const MIN_SQRT_PRICE_LIMIT: U160 = uint!(4295128749_U160);
pub const MAX_SQRT_PRICE_LIMIT: U160 =
    uint!(1461446703485210103287273052203988822378723970341_U160);

pub fn encode_call<C: SolCall>(call: C) -> Bytes {
    Bytes::from(call.abi_encode())
}

pub fn decode_return<C: SolCall>(response: &Bytes) -> Result<C::Return> {
    C::abi_decode_returns(response)
        .map_err(|e| anyhow!("'{}' decode failed: {:?}", C::SIGNATURE, e))
}

/// Quoter V1 `quoteExactInputSingle` with no price limit.
pub fn quote_v1_calldata(token_in: Address, token_out: Address, fee: u32, amount_in: U256) -> Bytes {
    encode_call(IQuoter::quoteExactInputSingleCall {
        tokenIn: token_in,
        tokenOut: token_out,
        fee: U24::from(fee),
        amountIn: amount_in,
        sqrtPriceLimitX96: U160::ZERO,
    })
}

pub fn decode_quote_v1_response(response: &Bytes) -> Result<U256> {
    decode_return::<IQuoter::quoteExactInputSingleCall>(response)
}

pub fn quote_v2_calldata(token_in: Address, token_out: Address, fee: u32, amount_in: U256) -> Bytes {
    let zero_for_one = token_in < token_out;

    let sqrt_price_limit_x96 = if zero_for_one {
        MIN_SQRT_PRICE_LIMIT
    } else {
        MAX_SQRT_PRICE_LIMIT
    };

    let params = IQuoterV2::QuoteExactInputSingleParams {
        tokenIn: token_in,
        tokenOut: token_out,
        amountIn: amount_in,
        fee: U24::from(fee),
        sqrtPriceLimitX96: sqrt_price_limit_x96,
    };

    encode_call(IQuoterV2::quoteExactInputSingleCall { params })
}

pub fn decode_quote_v2_response(response: &Bytes) -> Result<U256> {
    Ok(decode_return::<IQuoterV2::quoteExactInputSingleCall>(response)?.amountOut)
}
