use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, B256, U256};
use tracing::debug;

use crate::encoding::{errors::EncodingError, models::AmountBitmap};

/// Masks `value` to its lowest `bits` bits.
///
/// Out-of-range inputs wrap silently, matching the `uintN(...)` casts of the target format.
pub fn uint_n(value: U256, bits: usize) -> U256 {
    if bits >= 256 {
        return value;
    }
    value & ((U256::from(1u8) << bits) - U256::from(1u8))
}

fn low_u128(value: U256) -> u128 {
    let limbs = value.as_limbs();
    ((limbs[1] as u128) << 64) | limbs[0] as u128
}

pub fn uint8(value: U256) -> u8 {
    low_u128(value) as u8
}

pub fn uint16(value: U256) -> u16 {
    low_u128(value) as u16
}

pub fn uint24(value: U256) -> u32 {
    low_u128(uint_n(value, 24)) as u32
}

pub fn uint32(value: U256) -> u32 {
    low_u128(value) as u32
}

pub fn uint64(value: U256) -> u64 {
    low_u128(value) as u64
}

pub fn uint112(value: U256) -> u128 {
    low_u128(uint_n(value, 112))
}

pub fn uint128(value: U256) -> u128 {
    low_u128(value)
}

pub fn uint256(value: U256) -> U256 {
    value
}

/// Packs `amount` with the shares and unsafe flags.
pub fn generate_amount_bitmap(amount: U256, use_shares: bool, is_unsafe: bool) -> u128 {
    AmountBitmap { magnitude: uint128(amount), pre_param: false, use_shares, is_unsafe }.pack()
}

/// Packs `amount` with the pre-param (override) flag.
pub fn set_override_amount(amount: U256, pre_param: bool) -> u128 {
    AmountBitmap { pre_param, ..AmountBitmap::new(uint128(amount)) }.pack()
}

/// All-zero placeholder of `length` bytes.
pub fn new_bytes(length: usize) -> Vec<u8> {
    vec![0u8; length]
}

/// Tightly packs `values` according to the solidity type names in `types`.
///
/// Every value is emitted at its natural width without 32-byte padding. Unsigned integers are
/// masked to the width of their declared type; `bytes` are emitted as is, without a length
/// prefix.
pub fn encode_packed(types: &[&str], values: Vec<DynSolValue>) -> Result<Vec<u8>, EncodingError> {
    if types.len() != values.len() {
        debug!(types = types.len(), values = values.len(), "packed length mismatch");
        return Err(EncodingError::InvalidInput(format!(
            "Types and values arrays must have the same length: {} != {}",
            types.len(),
            values.len()
        )));
    }
    let mut packed = Vec::new();
    for (ty, value) in types.iter().zip(values) {
        let sol_type = DynSolType::parse(ty).map_err(|e| {
            EncodingError::InvalidInput(format!("Invalid packed type {}: {}", ty, e))
        })?;
        let value = match (&sol_type, value) {
            (DynSolType::Uint(bits), DynSolValue::Uint(v, _)) => {
                DynSolValue::Uint(uint_n(v, *bits), *bits)
            }
            (_, value) => value,
        };
        if !sol_type.matches(&value) {
            return Err(EncodingError::InvalidInput(format!(
                "Value {:?} does not match packed type {}",
                value, ty
            )));
        }
        packed.extend(value.abi_encode_packed());
    }
    Ok(packed)
}

pub(crate) fn sol_uint(value: impl Into<u128>) -> DynSolValue {
    DynSolValue::Uint(U256::from(value.into()), 256)
}

pub(crate) fn sol_address(address: Address) -> DynSolValue {
    DynSolValue::Address(address)
}

pub(crate) fn sol_bytes(data: &[u8]) -> DynSolValue {
    DynSolValue::Bytes(data.to_vec())
}

pub(crate) fn sol_bytes32(word: B256) -> DynSolValue {
    DynSolValue::FixedBytes(word, 32)
}

/// Length of a variable segment as written into its `uint16` length field.
pub(crate) fn segment_length(data: &[u8]) -> u128 {
    data.len() as u128
}
