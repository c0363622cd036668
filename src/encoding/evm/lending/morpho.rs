use alloy_primitives::{Address, U256};
use tracing::debug;

use super::{encode_lending_frame, with_approval};
use crate::encoding::{
    errors::EncodingError,
    evm::{
        constants::MORPHO_MARKET_LENGTH,
        flash_loans::encode_uint8_and_bytes,
        utils::{
            encode_packed, generate_amount_bitmap, sol_address, sol_bytes, sol_uint, uint128,
        },
    },
    models::{Lender, LenderOp, Segment},
};

/// Packs Morpho Blue market params as `[loanToken][collateralToken][oracle][irm][lltv:uint128]`.
///
/// `get_morpho_loan_asset` and `get_morpho_collateral` read the first two fields back by
/// offset, so they must follow any change of this order.
pub fn encode_morpho_market(
    loan_token: Address,
    collateral_token: Address,
    oracle: Address,
    irm: Address,
    lltv: U256,
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["address", "address", "address", "address", "uint128"],
        vec![
            sol_address(loan_token),
            sol_address(collateral_token),
            sol_address(oracle),
            sol_address(irm),
            sol_uint(uint128(lltv)),
        ],
    )
}

fn market_address(market: &[u8], offset: usize) -> Result<Address, EncodingError> {
    market
        .get(offset..offset + 20)
        .map(Address::from_slice)
        .ok_or_else(|| {
            EncodingError::InvalidInput(format!(
                "Morpho market too short to read address at offset {}: {} bytes",
                offset,
                market.len()
            ))
        })
}

/// Loan token of a packed market (bytes 0..20).
pub fn get_morpho_loan_asset(market: &[u8]) -> Result<Address, EncodingError> {
    market_address(market, 0)
}

/// Collateral token of a packed market (bytes 20..40).
pub fn get_morpho_collateral(market: &[u8]) -> Result<Address, EncodingError> {
    market_address(market, 20)
}

fn validate_market(market: &[u8]) -> Result<(), EncodingError> {
    if market.len() != MORPHO_MARKET_LENGTH {
        debug!(length = market.len(), "rejecting Morpho market");
        return Err(EncodingError::InvalidInput(format!(
            "Morpho market must be {} bytes, got {}",
            MORPHO_MARKET_LENGTH,
            market.len()
        )));
    }
    Ok(())
}

/// Encodes the optional callback data trailing deposits and repays.
///
/// Empty data is a bare `uint16(0)`. Otherwise the length counts the pool id byte that is
/// prepended to the data: `[len+1:uint16][poolId:uint8][data]`.
fn encode_callback_data(data: &[u8], pool_id: u8) -> Result<Vec<u8>, EncodingError> {
    match Segment::from_slice(data) {
        Segment::Empty => encode_packed(&["uint16"], vec![sol_uint(0u8)]),
        Segment::Payload(payload) => encode_packed(
            &["uint16", "bytes"],
            vec![
                sol_uint(payload.len() as u128 + 1),
                sol_bytes(&encode_uint8_and_bytes(pool_id, payload)?),
            ],
        ),
    }
}

/// `[market][amount:uint128][receiver][morpho]`, optionally followed by callback data.
fn encode_morpho_frame(
    op: LenderOp,
    market: &[u8],
    amount: u128,
    receiver: Address,
    morpho_b: Address,
) -> Result<Vec<u8>, EncodingError> {
    validate_market(market)?;
    encode_lending_frame(
        Lender::Morpho,
        op,
        &["bytes", "uint128", "address", "address"],
        vec![sol_bytes(market), sol_uint(amount), sol_address(receiver), sol_address(morpho_b)],
    )
}

pub fn encode_morpho_deposit_collateral(
    market: &[u8],
    assets: U256,
    receiver: Address,
    data: &[u8],
    morpho_b: Address,
    pool_id: u8,
) -> Result<Vec<u8>, EncodingError> {
    let mut frame =
        encode_morpho_frame(LenderOp::Deposit, market, uint128(assets), receiver, morpho_b)?;
    frame.extend(encode_callback_data(data, pool_id)?);
    with_approval(get_morpho_collateral(market)?, morpho_b, frame)
}

/// Supplies the loan asset. `is_shares` interprets `assets` as supply shares.
pub fn encode_morpho_deposit(
    market: &[u8],
    is_shares: bool,
    assets: U256,
    receiver: Address,
    data: &[u8],
    morpho_b: Address,
    pool_id: u8,
) -> Result<Vec<u8>, EncodingError> {
    let mut frame = encode_morpho_frame(
        LenderOp::DepositLendingToken,
        market,
        generate_amount_bitmap(assets, is_shares, false),
        receiver,
        morpho_b,
    )?;
    frame.extend(encode_callback_data(data, pool_id)?);
    with_approval(get_morpho_loan_asset(market)?, morpho_b, frame)
}

/// Withdraws supplied loan asset.
pub fn encode_morpho_withdraw(
    market: &[u8],
    is_shares: bool,
    assets: U256,
    receiver: Address,
    morpho_b: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_morpho_frame(
        LenderOp::WithdrawLendingToken,
        market,
        generate_amount_bitmap(assets, is_shares, false),
        receiver,
        morpho_b,
    )
}

pub fn encode_morpho_withdraw_collateral(
    market: &[u8],
    assets: U256,
    receiver: Address,
    morpho_b: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_morpho_frame(LenderOp::Withdraw, market, uint128(assets), receiver, morpho_b)
}

pub fn encode_morpho_borrow(
    market: &[u8],
    is_shares: bool,
    assets: U256,
    receiver: Address,
    morpho_b: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_morpho_frame(
        LenderOp::Borrow,
        market,
        generate_amount_bitmap(assets, is_shares, false),
        receiver,
        morpho_b,
    )
}

/// Repays the loan asset. `is_unsafe` skips the router's repay amount check.
#[allow(clippy::too_many_arguments)]
pub fn encode_morpho_repay(
    market: &[u8],
    is_shares: bool,
    is_unsafe: bool,
    assets: U256,
    receiver: Address,
    data: &[u8],
    morpho_b: Address,
    pool_id: u8,
) -> Result<Vec<u8>, EncodingError> {
    let mut frame = encode_morpho_frame(
        LenderOp::Repay,
        market,
        generate_amount_bitmap(assets, is_shares, is_unsafe),
        receiver,
        morpho_b,
    )?;
    frame.extend(encode_callback_data(data, pool_id)?);
    with_approval(get_morpho_loan_asset(market)?, morpho_b, frame)
}
