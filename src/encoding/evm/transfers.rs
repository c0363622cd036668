use alloy_primitives::{Address, U256};

use crate::encoding::{
    errors::EncodingError,
    evm::{
        constants::NATIVE_ADDRESS,
        utils::{encode_packed, sol_address, sol_uint, uint128},
    },
    models::{ComposerCommand, SweepType, TransferId},
};

/// Pulls `amount` of `asset` from the caller to `receiver`.
pub fn encode_transfer_in(
    asset: Address,
    receiver: Address,
    amount: U256,
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "address", "address", "uint128"],
        vec![
            sol_uint(ComposerCommand::Transfers as u8),
            sol_uint(TransferId::TransferFrom as u8),
            sol_address(asset),
            sol_address(receiver),
            sol_uint(uint128(amount)),
        ],
    )
}

pub fn encode_sweep(
    asset: Address,
    receiver: Address,
    amount: U256,
    sweep_type: SweepType,
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "address", "address", "uint8", "uint128"],
        vec![
            sol_uint(ComposerCommand::Transfers as u8),
            sol_uint(TransferId::Sweep as u8),
            sol_address(asset),
            sol_address(receiver),
            sol_uint(sweep_type as u8),
            sol_uint(uint128(amount)),
        ],
    )
}

/// Wraps native currency by sweeping exactly `amount` of the native asset into `wrap_target`.
pub fn encode_wrap(amount: U256, wrap_target: Address) -> Result<Vec<u8>, EncodingError> {
    encode_sweep(NATIVE_ADDRESS, wrap_target, amount, SweepType::Amount)
}

/// Compact wrap frame: `[TRANSFERS][WRAP_NATIVE][amount:uint128]`.
pub fn encode_wrap_native(amount: U256) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "uint128"],
        vec![
            sol_uint(ComposerCommand::Transfers as u8),
            sol_uint(TransferId::WrapNative as u8),
            sol_uint(uint128(amount)),
        ],
    )
}

pub fn encode_unwrap(
    target: Address,
    receiver: Address,
    amount: U256,
    sweep_type: SweepType,
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "address", "address", "uint8", "uint128"],
        vec![
            sol_uint(ComposerCommand::Transfers as u8),
            sol_uint(TransferId::UnwrapWnative as u8),
            sol_address(target),
            sol_address(receiver),
            sol_uint(sweep_type as u8),
            sol_uint(uint128(amount)),
        ],
    )
}

pub fn encode_permit2_transfer_from(
    token: Address,
    receiver: Address,
    amount: U256,
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "address", "address", "uint128"],
        vec![
            sol_uint(ComposerCommand::Transfers as u8),
            sol_uint(TransferId::Permit2TransferFrom as u8),
            sol_address(token),
            sol_address(receiver),
            sol_uint(uint128(amount)),
        ],
    )
}

/// Approves `target` to spend `asset` held by the composer.
///
/// This frame is also prepended by every deposit/repay style encoder whose protocol pulls
/// the tokens itself.
pub fn encode_approve(asset: Address, target: Address) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "address", "address"],
        vec![
            sol_uint(ComposerCommand::Transfers as u8),
            sol_uint(TransferId::Approve as u8),
            sol_address(asset),
            sol_address(target),
        ],
    )
}
