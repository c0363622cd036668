mod aave;
mod compound;
mod morpho;

pub use aave::*;
pub use compound::*;
pub use morpho::*;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::Address;

use crate::encoding::{
    errors::EncodingError,
    evm::{
        transfers::encode_approve,
        utils::{encode_packed, sol_uint},
    },
    models::{ComposerCommand, Lender, LenderOp},
};

/// Encodes `[LENDING][op][lender id:uint16]` followed by the lender specific fields.
fn encode_lending_frame(
    lender: Lender,
    op: LenderOp,
    types: &[&str],
    values: Vec<DynSolValue>,
) -> Result<Vec<u8>, EncodingError> {
    let mut frame_types = vec!["uint8", "uint8", "uint16"];
    frame_types.extend_from_slice(types);
    let mut frame_values = vec![
        sol_uint(ComposerCommand::Lending as u8),
        sol_uint(op as u8),
        sol_uint(lender.lender_id()),
    ];
    frame_values.extend(values);
    encode_packed(&frame_types, frame_values)
}

/// Prepends the approve frame the lending pool needs to pull `asset` from the composer.
fn with_approval(
    asset: Address,
    spender: Address,
    frame: Vec<u8>,
) -> Result<Vec<u8>, EncodingError> {
    let mut encoded = encode_approve(asset, spender)?;
    encoded.extend(frame);
    Ok(encoded)
}
