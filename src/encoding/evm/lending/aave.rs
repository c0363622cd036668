use alloy_primitives::{Address, U256};

use super::{encode_lending_frame, with_approval};
use crate::encoding::{
    errors::EncodingError,
    evm::utils::{sol_address, sol_uint, uint128},
    models::{Lender, LenderOp},
};

fn encode_deposit(
    lender: Lender,
    token: Address,
    amount: U256,
    receiver: Address,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    let frame = encode_lending_frame(
        lender,
        LenderOp::Deposit,
        &["address", "uint128", "address", "address"],
        vec![sol_address(token), sol_uint(uint128(amount)), sol_address(receiver), sol_address(pool)],
    )?;
    with_approval(token, pool, frame)
}

fn encode_borrow(
    lender: Lender,
    token: Address,
    amount: U256,
    receiver: Address,
    mode: u8,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_lending_frame(
        lender,
        LenderOp::Borrow,
        &["address", "uint128", "address", "uint8", "address"],
        vec![
            sol_address(token),
            sol_uint(uint128(amount)),
            sol_address(receiver),
            sol_uint(mode),
            sol_address(pool),
        ],
    )
}

fn encode_repay(
    lender: Lender,
    token: Address,
    amount: U256,
    receiver: Address,
    mode: u8,
    debt_token: Address,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    let frame = encode_lending_frame(
        lender,
        LenderOp::Repay,
        &["address", "uint128", "address", "uint8", "address", "address"],
        vec![
            sol_address(token),
            sol_uint(uint128(amount)),
            sol_address(receiver),
            sol_uint(mode),
            sol_address(debt_token),
            sol_address(pool),
        ],
    )?;
    with_approval(token, pool, frame)
}

fn encode_withdraw(
    lender: Lender,
    token: Address,
    amount: U256,
    receiver: Address,
    a_token: Address,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_lending_frame(
        lender,
        LenderOp::Withdraw,
        &["address", "uint128", "address", "address", "address"],
        vec![
            sol_address(token),
            sol_uint(uint128(amount)),
            sol_address(receiver),
            sol_address(a_token),
            sol_address(pool),
        ],
    )
}

pub fn encode_aave_deposit(
    token: Address,
    amount: U256,
    receiver: Address,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_deposit(Lender::AaveV3, token, amount, receiver, pool)
}

/// `mode` is the Aave interest rate mode (1 stable, 2 variable).
pub fn encode_aave_borrow(
    token: Address,
    amount: U256,
    receiver: Address,
    mode: u8,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_borrow(Lender::AaveV3, token, amount, receiver, mode, pool)
}

pub fn encode_aave_repay(
    token: Address,
    amount: U256,
    receiver: Address,
    mode: u8,
    debt_token: Address,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_repay(Lender::AaveV3, token, amount, receiver, mode, debt_token, pool)
}

pub fn encode_aave_withdraw(
    token: Address,
    amount: U256,
    receiver: Address,
    a_token: Address,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_withdraw(Lender::AaveV3, token, amount, receiver, a_token, pool)
}

pub fn encode_aave_v2_deposit(
    token: Address,
    amount: U256,
    receiver: Address,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_deposit(Lender::AaveV2, token, amount, receiver, pool)
}

pub fn encode_aave_v2_borrow(
    token: Address,
    amount: U256,
    receiver: Address,
    mode: u8,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_borrow(Lender::AaveV2, token, amount, receiver, mode, pool)
}

pub fn encode_aave_v2_repay(
    token: Address,
    amount: U256,
    receiver: Address,
    mode: u8,
    debt_token: Address,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_repay(Lender::AaveV2, token, amount, receiver, mode, debt_token, pool)
}

pub fn encode_aave_v2_withdraw(
    token: Address,
    amount: U256,
    receiver: Address,
    a_token: Address,
    pool: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_withdraw(Lender::AaveV2, token, amount, receiver, a_token, pool)
}
