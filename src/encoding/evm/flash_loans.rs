use alloy_primitives::{Address, U256};

use crate::encoding::{
    errors::EncodingError,
    evm::{
        transfers::encode_approve,
        utils::{encode_packed, sol_address, sol_bytes, sol_uint, uint128},
    },
    models::{ComposerCommand, FlashLoanId},
};

/// `[poolId:uint8][data]`.
pub fn encode_uint8_and_bytes(pool_id: u8, data: &[u8]) -> Result<Vec<u8>, EncodingError> {
    encode_packed(&["uint8", "bytes"], vec![sol_uint(pool_id), sol_bytes(data)])
}

/// Length written ahead of a pool id prefixed payload: the payload plus the pool id byte.
fn pool_data_length(data: &[u8]) -> u128 {
    data.len() as u128 + 1
}

/// Flash loan from a lender that pulls its repayment, so the pool is approved first.
///
/// Layout: `[FLASH_LOAN][poolType][asset][pool][amount:uint128][len:uint16][poolId][data]`
/// where `len` counts `data` plus the pool id byte.
pub fn encode_flash_loan(
    asset: Address,
    amount: U256,
    pool: Address,
    pool_type: u8,
    pool_id: u8,
    data: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    let mut encoded = encode_approve(asset, pool)?;
    encoded.extend(encode_packed(
        &["uint8", "uint8", "address", "address", "uint128", "uint16", "bytes"],
        vec![
            sol_uint(ComposerCommand::FlashLoan as u8),
            sol_uint(pool_type),
            sol_address(asset),
            sol_address(pool),
            sol_uint(uint128(amount)),
            sol_uint(pool_data_length(data)),
            sol_bytes(&encode_uint8_and_bytes(pool_id, data)?),
        ],
    )?);
    Ok(encoded)
}

/// Balancer V2 vault flash loan. The vault settles itself, so there is no approve frame and
/// no pool address.
pub fn encode_balancer_v2_flash_loan(
    asset: Address,
    amount: U256,
    pool_id: u8,
    data: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "address", "uint128", "uint16", "bytes"],
        vec![
            sol_uint(ComposerCommand::FlashLoan as u8),
            sol_uint(FlashLoanId::BalancerV2 as u8),
            sol_address(asset),
            sol_uint(uint128(amount)),
            sol_uint(pool_data_length(data)),
            sol_bytes(&encode_uint8_and_bytes(pool_id, data)?),
        ],
    )
}
