//! Swap segments: a `swap_head` opening frame followed by one pool style segment per hop.
//!
//! Most segment encoders take the bytes built so far and return them with the new segment
//! appended. Uniswap V2 and Curve style segments start from nothing.
mod branching;
mod swap_encoders;

pub use branching::*;
pub use swap_encoders::*;
use tracing::debug;

use crate::encoding::{
    errors::EncodingError, evm::constants::MAX_IGNORED_FLASH_CALLDATA_LENGTH,
    models::{DexPayConfig, Segment},
};

/// Resolves the pay config field and trailing flash segment of a flash capable style.
///
/// With `FLASH` the field carries the live length of `flash_calldata`, which is appended after
/// it. Any other config is written as is and nothing trails it. Caller and contract paid
/// swaps reject flash calldata they would otherwise drop.
fn resolve_flash_config<'a>(
    style: &str,
    cfg: u8,
    flash_calldata: &'a [u8],
) -> Result<(u128, Segment<'a>), EncodingError> {
    match DexPayConfig::try_from(cfg) {
        Ok(DexPayConfig::Flash) => {
            Ok((flash_calldata.len() as u128, Segment::from_slice(flash_calldata)))
        }
        Ok(DexPayConfig::CallerPays | DexPayConfig::ContractPays)
            if flash_calldata.len() > MAX_IGNORED_FLASH_CALLDATA_LENGTH =>
        {
            debug!(style, cfg, length = flash_calldata.len(), "rejecting dropped flash calldata");
            Err(EncodingError::InvalidInput(format!(
                "{} swap with pay config {} cannot carry {} bytes of flash calldata",
                style,
                cfg,
                flash_calldata.len()
            )))
        }
        _ => Ok((cfg as u128, Segment::Empty)),
    }
}

/// Like `resolve_flash_config` without rejecting calldata for non-flash configs.
fn resolve_flash_config_lenient(cfg: u8, flash_calldata: &[u8]) -> (u128, Segment<'_>) {
    if cfg == DexPayConfig::Flash as u8 {
        (flash_calldata.len() as u128, Segment::from_slice(flash_calldata))
    } else {
        (cfg as u128, Segment::Empty)
    }
}

/// Fails for styles that cannot be paid through a flash callback.
fn reject_flash(style: &str, cfg: u8) -> Result<(), EncodingError> {
    if cfg == DexPayConfig::Flash as u8 {
        debug!(style, cfg, "rejecting flash pay config");
        return Err(EncodingError::InvalidInput(format!(
            "{} swaps do not support the flash pay config",
            style
        )));
    }
    Ok(())
}
