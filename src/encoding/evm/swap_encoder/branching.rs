use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::encoding::{
    errors::EncodingError,
    evm::utils::{encode_packed, generate_amount_bitmap, sol_address, sol_bytes, sol_uint, uint128},
    models::ComposerCommand,
};

/// Opens a swap: `[SWAPS][amount:uint128][minOut:uint128][tokenIn]`.
pub fn swap_head(
    amount: U256,
    amount_out_min: U256,
    asset_in: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint128", "uint128", "address"],
        vec![
            sol_uint(ComposerCommand::Swaps as u8),
            sol_uint(generate_amount_bitmap(amount, false, false)),
            sol_uint(uint128(amount_out_min)),
            sol_address(asset_in),
        ],
    )
}

/// Appends the routing tree marker `[hops:uint8][splits:uint8][splitsData]` to `data`.
///
/// A node is either a multi-hop continuation or a split point, never both. Split data needs a
/// non-zero split count.
pub fn attach_branch(
    data: &[u8],
    hops: u8,
    splits: u8,
    splits_data: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    if hops != 0 && splits != 0 {
        debug!(hops, splits, "rejecting branch with hops and splits");
        return Err(EncodingError::InvalidInput(
            "Branch cannot have both hops and splits".to_string(),
        ));
    }
    if !splits_data.is_empty() && splits == 0 {
        debug!(length = splits_data.len(), "rejecting split data without splits");
        return Err(EncodingError::InvalidInput(
            "Split data given without any splits".to_string(),
        ));
    }
    encode_packed(
        &["bytes", "uint8", "uint8", "bytes"],
        vec![sol_bytes(data), sol_uint(hops), sol_uint(splits), sol_bytes(splits_data)],
    )
}
