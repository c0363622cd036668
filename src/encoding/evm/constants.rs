use alloy_primitives::Address;

/// Sentinel address standing for the chain's native currency.
pub const NATIVE_ADDRESS: Address = Address::ZERO;

/// Largest amount hint accepted by the Balancer V3 settle frame (2^120 - 1). Larger hints are
/// clamped to it.
pub const BALANCER_V3_MAX_SETTLE_HINT: u128 = (1 << 120) - 1;

/// Size of a packed Morpho market: loan token, collateral token, oracle, irm and `lltv:uint128`.
pub const MORPHO_MARKET_LENGTH: usize = 4 * 20 + 16;

/// Above this many bytes, flash calldata is rejected for pay configs that do not forward it.
pub const MAX_IGNORED_FLASH_CALLDATA_LENGTH: usize = 2;
