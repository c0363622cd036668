use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256};

use super::{reject_flash, resolve_flash_config, resolve_flash_config_lenient};
use crate::encoding::{
    errors::EncodingError,
    evm::utils::{
        encode_packed, segment_length, sol_address, sol_bytes, sol_bytes32, sol_uint,
    },
    models::{DexTypeId, DodoSelector, Segment},
};

/// Appends `[tokenOut][receiver][dexTypeId]` and the style specific fields to `current_data`.
fn append_segment(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    dex: DexTypeId,
    types: &[&str],
    values: Vec<DynSolValue>,
) -> Result<Vec<u8>, EncodingError> {
    let mut segment_types = vec!["bytes", "address", "address", "uint8"];
    segment_types.extend_from_slice(types);
    let mut segment_values = vec![
        sol_bytes(current_data),
        sol_address(token_out),
        sol_address(receiver),
        sol_uint(dex as u8),
    ];
    segment_values.extend(values);
    encode_packed(&segment_types, segment_values)
}

/// Uniswap V2 style pool. Starts a new segment list instead of extending one.
///
/// `fee_denom` is the fork's fee denominator (e.g. 9970 for 0.3%).
pub fn encode_uniswap_v2_style_swap(
    token_out: Address,
    receiver: Address,
    fork_id: u8,
    pool: Address,
    fee_denom: u16,
    cfg: u8,
    flash_calldata: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    let (cfg_field, flash) = resolve_flash_config("Uniswap V2", cfg, flash_calldata)?;
    append_segment(
        &[],
        token_out,
        receiver,
        DexTypeId::UniswapV2,
        &["address", "uint16", "uint8", "uint16", "bytes"],
        vec![
            sol_address(pool),
            sol_uint(fee_denom),
            sol_uint(fork_id),
            sol_uint(cfg_field),
            sol_bytes(flash.as_bytes()),
        ],
    )
}

/// `[pool][forkId][fee:uint16][cfg-or-len:uint16][flash]`, shared by Uniswap V3 and iZiSwap.
#[allow(clippy::too_many_arguments)]
fn encode_v3_like_swap(
    style: &str,
    dex: DexTypeId,
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    fork_id: u8,
    pool: Address,
    fee_tier: u16,
    cfg: u8,
    flash_calldata: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    let (cfg_field, flash) = resolve_flash_config(style, cfg, flash_calldata)?;
    append_segment(
        current_data,
        token_out,
        receiver,
        dex,
        &["address", "uint8", "uint16", "uint16", "bytes"],
        vec![
            sol_address(pool),
            sol_uint(fork_id),
            sol_uint(fee_tier),
            sol_uint(cfg_field),
            sol_bytes(flash.as_bytes()),
        ],
    )
}

#[allow(clippy::too_many_arguments)]
pub fn encode_uniswap_v3_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    fork_id: u8,
    pool: Address,
    fee_tier: u16,
    cfg: u8,
    flash_calldata: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    encode_v3_like_swap(
        "Uniswap V3",
        DexTypeId::UniswapV3,
        current_data,
        token_out,
        receiver,
        fork_id,
        pool,
        fee_tier,
        cfg,
        flash_calldata,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn encode_izumi_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    fork_id: u8,
    pool: Address,
    fee_tier: u16,
    cfg: u8,
    flash_calldata: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    encode_v3_like_swap(
        "iZiSwap",
        DexTypeId::Izi,
        current_data,
        token_out,
        receiver,
        fork_id,
        pool,
        fee_tier,
        cfg,
        flash_calldata,
    )
}

/// Uniswap V4 pool addressed by its pool key. `fee` and `tick_spacing` are `uint24`.
#[allow(clippy::too_many_arguments)]
pub fn encode_uniswap_v4_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    manager: Address,
    fee: u32,
    tick_spacing: u32,
    hooks: Address,
    hook_data: &[u8],
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    reject_flash("Uniswap V4", cfg)?;
    append_segment(
        current_data,
        token_out,
        receiver,
        DexTypeId::UniswapV4,
        &["address", "address", "uint24", "uint24", "uint8", "uint16", "bytes"],
        vec![
            sol_address(hooks),
            sol_address(manager),
            sol_uint(fee),
            sol_uint(tick_spacing),
            sol_uint(cfg),
            sol_uint(segment_length(hook_data)),
            sol_bytes(hook_data),
        ],
    )
}

pub fn encode_balancer_v2_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    pool_id: B256,
    balancer_vault: Address,
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    reject_flash("Balancer V2", cfg)?;
    append_segment(
        current_data,
        token_out,
        receiver,
        DexTypeId::BalancerV2,
        &["bytes32", "address", "uint16"],
        vec![sol_bytes32(pool_id), sol_address(balancer_vault), sol_uint(cfg)],
    )
}

/// Balancer V3 pool behind the V3 vault. `pool_user_data` is forwarded length prefixed.
pub fn encode_balancer_v3_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    balancer_v3_vault: Address,
    pool: Address,
    cfg: u8,
    pool_user_data: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    append_segment(
        current_data,
        token_out,
        receiver,
        DexTypeId::BalancerV3,
        &["address", "address", "uint8", "uint16", "bytes"],
        vec![
            sol_address(pool),
            sol_address(balancer_v3_vault),
            sol_uint(cfg),
            sol_uint(segment_length(pool_user_data)),
            sol_bytes(pool_user_data),
        ],
    )
}

/// Trader Joe liquidity book pair.
pub fn encode_lb_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    pool: Address,
    swap_for_y: bool,
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    reject_flash("LB", cfg)?;
    append_segment(
        current_data,
        token_out,
        receiver,
        DexTypeId::Lb,
        &["address", "uint8", "uint16"],
        vec![sol_address(pool), sol_uint(swap_for_y as u8), sol_uint(cfg)],
    )
}

pub fn encode_sync_swap_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    pool: Address,
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    reject_flash("SyncSwap", cfg)?;
    append_segment(
        current_data,
        token_out,
        receiver,
        DexTypeId::SyncSwap,
        &["address", "uint16"],
        vec![sol_address(pool), sol_uint(cfg)],
    )
}

/// DODO V2 pool. Non-flash configs never carry calldata, whatever is passed.
#[allow(clippy::too_many_arguments)]
pub fn encode_dodo_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    pool: Address,
    selector: DodoSelector,
    pool_id: u16,
    cfg: u8,
    flash_calldata: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    let (cfg_field, flash) = resolve_flash_config_lenient(cfg, flash_calldata);
    append_segment(
        current_data,
        token_out,
        receiver,
        DexTypeId::Dodo,
        &["address", "uint8", "uint16", "uint16", "bytes"],
        vec![
            sol_address(pool),
            sol_uint(selector as u8),
            sol_uint(pool_id),
            sol_uint(cfg_field),
            sol_bytes(flash.as_bytes()),
        ],
    )
}

/// WooFi pool. The config is a single byte here.
pub fn encode_woo_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    pool: Address,
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    reject_flash("Woo", cfg)?;
    append_segment(
        current_data,
        token_out,
        receiver,
        DexTypeId::WooFi,
        &["address", "uint8"],
        vec![sol_address(pool), sol_uint(cfg)],
    )
}

fn encode_gmx_like_swap(
    style: &str,
    dex: DexTypeId,
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    pool: Address,
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    reject_flash(style, cfg)?;
    append_segment(
        current_data,
        token_out,
        receiver,
        dex,
        &["address", "uint16"],
        vec![sol_address(pool), sol_uint(cfg)],
    )
}

pub fn encode_gmx_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    pool: Address,
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    encode_gmx_like_swap("GMX", DexTypeId::Gmx, current_data, token_out, receiver, pool, cfg)
}

pub fn encode_ktx_style_swap(
    current_data: &[u8],
    token_out: Address,
    receiver: Address,
    pool: Address,
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    encode_gmx_like_swap("KTX", DexTypeId::Ktx, current_data, token_out, receiver, pool, cfg)
}

#[allow(clippy::too_many_arguments)]
fn encode_curve_like_swap(
    style: &str,
    dex: DexTypeId,
    token_out: Address,
    receiver: Address,
    pool: Address,
    index_in: u8,
    index_out: u8,
    selector_id: u8,
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    reject_flash(style, cfg)?;
    append_segment(
        Segment::Empty.as_bytes(),
        token_out,
        receiver,
        dex,
        &["address", "uint8", "uint8", "uint8", "uint16"],
        vec![
            sol_address(pool),
            sol_uint(index_in),
            sol_uint(index_out),
            sol_uint(selector_id),
            sol_uint(cfg),
        ],
    )
}

/// Curve pool using the classic `exchange` interface. Starts a new segment list.
pub fn encode_curve_style_swap(
    token_out: Address,
    receiver: Address,
    pool: Address,
    index_in: u8,
    index_out: u8,
    selector_id: u8,
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    encode_curve_like_swap(
        "Curve",
        DexTypeId::CurveV1Standard,
        token_out,
        receiver,
        pool,
        index_in,
        index_out,
        selector_id,
        cfg,
    )
}

/// Curve NG pool, which swaps the amount already received by the pool.
pub fn encode_curve_ng_style_swap(
    token_out: Address,
    receiver: Address,
    pool: Address,
    index_in: u8,
    index_out: u8,
    selector_id: u8,
    cfg: u8,
) -> Result<Vec<u8>, EncodingError> {
    encode_curve_like_swap(
        "Curve NG",
        DexTypeId::CurveReceived,
        token_out,
        receiver,
        pool,
        index_in,
        index_out,
        selector_id,
        cfg,
    )
}
