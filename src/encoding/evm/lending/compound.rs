use alloy_primitives::{Address, U256};

use super::{encode_lending_frame, with_approval};
use crate::encoding::{
    errors::EncodingError,
    evm::{
        constants::NATIVE_ADDRESS,
        utils::{sol_address, sol_uint, uint128},
    },
    models::{Lender, LenderOp},
};

/// `[token][amount:uint128][receiver][market]` shared by every Compound frame but the V3
/// withdraw.
fn encode_compound_frame(
    lender: Lender,
    op: LenderOp,
    token: Address,
    amount: U256,
    receiver: Address,
    market: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_lending_frame(
        lender,
        op,
        &["address", "uint128", "address", "address"],
        vec![sol_address(token), sol_uint(uint128(amount)), sol_address(receiver), sol_address(market)],
    )
}

/// Compound V2 markets for the native asset take the value with the call, so no approve
/// frame is emitted for them.
fn with_compound_v2_approval(
    token: Address,
    c_token: Address,
    frame: Vec<u8>,
) -> Result<Vec<u8>, EncodingError> {
    if token == NATIVE_ADDRESS {
        return Ok(frame);
    }
    with_approval(token, c_token, frame)
}

pub fn encode_compound_v3_deposit(
    token: Address,
    amount: U256,
    receiver: Address,
    comet: Address,
) -> Result<Vec<u8>, EncodingError> {
    let frame =
        encode_compound_frame(Lender::CompoundV3, LenderOp::Deposit, token, amount, receiver, comet)?;
    with_approval(token, comet, frame)
}

pub fn encode_compound_v3_borrow(
    token: Address,
    amount: U256,
    receiver: Address,
    comet: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_compound_frame(Lender::CompoundV3, LenderOp::Borrow, token, amount, receiver, comet)
}

pub fn encode_compound_v3_repay(
    token: Address,
    amount: U256,
    receiver: Address,
    comet: Address,
) -> Result<Vec<u8>, EncodingError> {
    let frame =
        encode_compound_frame(Lender::CompoundV3, LenderOp::Repay, token, amount, receiver, comet)?;
    with_approval(token, comet, frame)
}

/// `is_base` selects withdrawing the comet's base asset instead of collateral.
pub fn encode_compound_v3_withdraw(
    token: Address,
    amount: U256,
    receiver: Address,
    comet: Address,
    is_base: bool,
) -> Result<Vec<u8>, EncodingError> {
    encode_lending_frame(
        Lender::CompoundV3,
        LenderOp::Withdraw,
        &["address", "uint128", "address", "uint8", "address"],
        vec![
            sol_address(token),
            sol_uint(uint128(amount)),
            sol_address(receiver),
            sol_uint(is_base as u8),
            sol_address(comet),
        ],
    )
}

pub fn encode_compound_v2_deposit(
    token: Address,
    amount: U256,
    receiver: Address,
    c_token: Address,
) -> Result<Vec<u8>, EncodingError> {
    let frame = encode_compound_frame(
        Lender::CompoundV2,
        LenderOp::Deposit,
        token,
        amount,
        receiver,
        c_token,
    )?;
    with_compound_v2_approval(token, c_token, frame)
}

pub fn encode_compound_v2_borrow(
    token: Address,
    amount: U256,
    receiver: Address,
    c_token: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_compound_frame(Lender::CompoundV2, LenderOp::Borrow, token, amount, receiver, c_token)
}

pub fn encode_compound_v2_repay(
    token: Address,
    amount: U256,
    receiver: Address,
    c_token: Address,
) -> Result<Vec<u8>, EncodingError> {
    let frame =
        encode_compound_frame(Lender::CompoundV2, LenderOp::Repay, token, amount, receiver, c_token)?;
    with_compound_v2_approval(token, c_token, frame)
}

pub fn encode_compound_v2_withdraw(
    token: Address,
    amount: U256,
    receiver: Address,
    c_token: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_compound_frame(
        Lender::CompoundV2,
        LenderOp::Withdraw,
        token,
        amount,
        receiver,
        c_token,
    )
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use hex::encode;
    use rstest::rstest;

    use super::*;
    use crate::encoding::evm::lending::test_utils::{
        lender_id_at, starts_with_approval, APPROVE_LENGTH,
    };

    fn usdc() -> Address {
        address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
    }

    fn comet() -> Address {
        address!("c3d688b66703497daa19211eedff47f25384cdc3")
    }

    fn receiver() -> Address {
        address!("1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e")
    }

    #[test]
    fn test_encode_compound_v3_withdraw() {
        let encoded =
            encode_compound_v3_withdraw(usdc(), U256::from(10u8), receiver(), comet(), true)
                .unwrap();
        assert_eq!(
            encode(encoded),
            String::from(concat!(
                // lending, withdraw
                "6003",
                // lender id 2999
                "0bb7",
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "0000000000000000000000000000000a",
                "1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e",
                // is base
                "01",
                "c3d688b66703497daa19211eedff47f25384cdc3",
            ))
        );
    }

    #[rstest]
    #[case::v3_deposit(encode_compound_v3_deposit, 2999, true)]
    #[case::v3_borrow(encode_compound_v3_borrow, 2999, false)]
    #[case::v3_repay(encode_compound_v3_repay, 2999, true)]
    #[case::v2_deposit(encode_compound_v2_deposit, 3999, true)]
    #[case::v2_borrow(encode_compound_v2_borrow, 3999, false)]
    #[case::v2_repay(encode_compound_v2_repay, 3999, true)]
    #[case::v2_withdraw(encode_compound_v2_withdraw, 3999, false)]
    fn test_compound_lender_ids(
        #[case] encoder: fn(Address, U256, Address, Address) -> Result<Vec<u8>, EncodingError>,
        #[case] lender_id: u16,
        #[case] approval: bool,
    ) {
        let encoded = encoder(usdc(), U256::from(10u8), receiver(), comet()).unwrap();
        assert_eq!(starts_with_approval(&encoded), approval);
        let offset = if approval { APPROVE_LENGTH } else { 0 };
        assert_eq!(lender_id_at(&encoded, offset), lender_id);
    }

    #[test]
    fn test_compound_v2_native_deposit_skips_approval() {
        let encoded =
            encode_compound_v2_deposit(NATIVE_ADDRESS, U256::from(10u8), receiver(), comet())
                .unwrap();
        assert!(!starts_with_approval(&encoded));
        assert_eq!(
            encode(encoded),
            String::from(concat!(
                "6000",
                // lender id 3999
                "0f9f",
                "0000000000000000000000000000000000000000",
                "0000000000000000000000000000000a",
                "1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e",
                "c3d688b66703497daa19211eedff47f25384cdc3",
            ))
        );
    }

    #[test]
    fn test_compound_v2_native_repay_skips_approval() {
        let encoded =
            encode_compound_v2_repay(NATIVE_ADDRESS, U256::from(10u8), receiver(), comet())
                .unwrap();
        assert!(!starts_with_approval(&encoded));
        assert_eq!(encoded[1], LenderOp::Repay as u8);
    }
}
