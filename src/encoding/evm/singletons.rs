//! Unlock/take/sync/settle choreography for singleton pool managers (Uniswap V4, Balancer V3).
//!
//! A flash loan against a singleton is the concatenation `take | sync | body | settle`
//! wrapped in an unlock frame. The composition helpers are kept separate from the unlock step
//! so each part can be produced and checked on its own.
use alloy_primitives::{Address, U256};

use crate::encoding::{
    errors::EncodingError,
    evm::{
        constants::{BALANCER_V3_MAX_SETTLE_HINT, NATIVE_ADDRESS},
        utils::{encode_packed, sol_address, sol_bytes, sol_uint, uint128},
    },
    models::{ComposerCommand, Gen2025ActionId},
};

/// `[SINGLETONS][UNLOCK][singleton][len:uint16][id:uint8][d]`, `len` counting `d` and the id.
pub fn encode_next_gen_dex_unlock(
    singleton: Address,
    id: u8,
    d: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "address", "uint16", "uint8", "bytes"],
        vec![
            sol_uint(ComposerCommand::Gen2025Singletons as u8),
            sol_uint(Gen2025ActionId::Unlock as u8),
            sol_address(singleton),
            sol_uint(d.len() as u128 + 1),
            sol_uint(id),
            sol_bytes(d),
        ],
    )
}

fn encode_take(
    action: Gen2025ActionId,
    singleton: Address,
    asset: Address,
    receiver: Address,
    amount: U256,
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "address", "address", "address", "uint128"],
        vec![
            sol_uint(ComposerCommand::Gen2025Singletons as u8),
            sol_uint(action as u8),
            sol_address(singleton),
            sol_address(asset),
            sol_address(receiver),
            sol_uint(uint128(amount)),
        ],
    )
}

pub fn encode_uniswap_v4_take(
    singleton: Address,
    asset: Address,
    receiver: Address,
    amount: U256,
) -> Result<Vec<u8>, EncodingError> {
    encode_take(Gen2025ActionId::UniV4Take, singleton, asset, receiver, amount)
}

pub fn encode_balancer_v3_take(
    singleton: Address,
    asset: Address,
    receiver: Address,
    amount: U256,
) -> Result<Vec<u8>, EncodingError> {
    encode_take(Gen2025ActionId::BalV3Take, singleton, asset, receiver, amount)
}

/// Checkpoints the manager balance of `asset` before repayment. The native asset needs no
/// sync, so it yields no bytes.
pub fn encode_uniswap_v4_sync(singleton: Address, asset: Address) -> Result<Vec<u8>, EncodingError> {
    if asset == NATIVE_ADDRESS {
        return Ok(Vec::new());
    }
    encode_packed(
        &["uint8", "uint8", "address", "address"],
        vec![
            sol_uint(ComposerCommand::Gen2025Singletons as u8),
            sol_uint(Gen2025ActionId::UniV4Sync as u8),
            sol_address(singleton),
            sol_address(asset),
        ],
    )
}

/// `native_amount` is the value forwarded with the settle call; zero for ERC-20 repayments.
pub fn encode_next_gen_dex_settle(
    singleton: Address,
    native_amount: U256,
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "address", "uint128"],
        vec![
            sol_uint(ComposerCommand::Gen2025Singletons as u8),
            sol_uint(Gen2025ActionId::UniV4Settle as u8),
            sol_address(singleton),
            sol_uint(uint128(native_amount)),
        ],
    )
}

/// Balancer V3 settle. Hints at or above 2^120 - 1 are clamped to it.
pub fn encode_next_gen_dex_settle_balancer(
    singleton: Address,
    asset: Address,
    amount_hint: U256,
) -> Result<Vec<u8>, EncodingError> {
    let max_hint = U256::from(BALANCER_V3_MAX_SETTLE_HINT);
    let hint = if amount_hint >= max_hint { BALANCER_V3_MAX_SETTLE_HINT } else { uint128(amount_hint) };
    encode_packed(
        &["uint8", "uint8", "address", "address", "uint128"],
        vec![
            sol_uint(ComposerCommand::Gen2025Singletons as u8),
            sol_uint(Gen2025ActionId::BalV3Settle as u8),
            sol_address(singleton),
            sol_address(asset),
            sol_uint(hint),
        ],
    )
}

/// `take | sync | flashData | settle`.
pub fn uniswap_v4_flash_loan_data(take: &[u8], sync: &[u8], flash_data: &[u8], settle: &[u8]) -> Vec<u8> {
    [take, sync, flash_data, settle].concat()
}

/// `take | flashData | settle`.
pub fn balancer_v3_flash_loan_data(take: &[u8], flash_data: &[u8], settle: &[u8]) -> Vec<u8> {
    [take, flash_data, settle].concat()
}

/// Flash loan against the Uniswap V4 pool manager.
///
/// The settle frame carries `amount` as value only for the native asset. ERC-20 repayments
/// are transferred by the body and settled with zero.
pub fn encode_uniswap_v4_flash_loan(
    singleton: Address,
    pool_id: u8,
    asset: Address,
    receiver: Address,
    amount: U256,
    flash_data: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    let take = encode_uniswap_v4_take(singleton, asset, receiver, amount)?;
    let sync = encode_uniswap_v4_sync(singleton, asset)?;
    let native_amount = if asset == NATIVE_ADDRESS { amount } else { U256::ZERO };
    let settle = encode_next_gen_dex_settle(singleton, native_amount)?;
    encode_next_gen_dex_unlock(
        singleton,
        pool_id,
        &uniswap_v4_flash_loan_data(&take, &sync, flash_data, &settle),
    )
}

/// Flash loan against the Balancer V3 vault, settled with `amount` as the hint.
pub fn encode_balancer_v3_flash_loan(
    singleton: Address,
    pool_id: u8,
    asset: Address,
    receiver: Address,
    amount: U256,
    flash_data: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    let take = encode_balancer_v3_take(singleton, asset, receiver, amount)?;
    let settle = encode_next_gen_dex_settle_balancer(singleton, asset, amount)?;
    encode_next_gen_dex_unlock(
        singleton,
        pool_id,
        &balancer_v3_flash_loan_data(&take, flash_data, &settle),
    )
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use hex::encode;

    use super::*;

    fn pool_manager() -> Address {
        address!("000000000004444c5dc75cb358380d2e3de08a90")
    }

    fn usdc() -> Address {
        address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
    }

    fn receiver() -> Address {
        address!("1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e")
    }

    #[test]
    fn test_encode_next_gen_dex_unlock() {
        let encoded = encode_next_gen_dex_unlock(pool_manager(), 1, &[0xaa, 0xbb]).unwrap();
        assert_eq!(
            encode(encoded),
            String::from(concat!(
                // singletons, unlock
                "e100",
                "000000000004444c5dc75cb358380d2e3de08a90",
                // length of id and data
                "0003",
                // id
                "01",
                "aabb",
            ))
        );
    }

    #[test]
    fn test_encode_uniswap_v4_sync_native_is_empty() {
        assert!(encode_uniswap_v4_sync(pool_manager(), NATIVE_ADDRESS).unwrap().is_empty());
        assert_eq!(
            encode(encode_uniswap_v4_sync(pool_manager(), usdc()).unwrap()),
            String::from(concat!(
                "e103",
                "000000000004444c5dc75cb358380d2e3de08a90",
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            ))
        );
    }

    #[test]
    fn test_encode_next_gen_dex_settle_balancer_clamps_hint() {
        let encoded =
            encode_next_gen_dex_settle_balancer(pool_manager(), usdc(), U256::MAX).unwrap();
        assert_eq!(encode(&encoded[42..]), "00ffffffffffffffffffffffffffffff");

        let encoded =
            encode_next_gen_dex_settle_balancer(pool_manager(), usdc(), U256::from(7u8)).unwrap();
        assert_eq!(encode(&encoded[42..]), "00000000000000000000000000000007");
    }

    #[test]
    fn test_flash_loan_data_concatenation() {
        assert_eq!(uniswap_v4_flash_loan_data(&[1], &[], &[2, 3], &[4]), vec![1, 2, 3, 4]);
        assert_eq!(balancer_v3_flash_loan_data(&[1], &[2], &[3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_encode_uniswap_v4_flash_loan_erc20_settles_zero() {
        let amount = U256::from(1_000_000u64);
        let encoded = encode_uniswap_v4_flash_loan(
            pool_manager(),
            0,
            usdc(),
            receiver(),
            amount,
            &[0xfe],
        )
        .unwrap();
        let take = encode_uniswap_v4_take(pool_manager(), usdc(), receiver(), amount).unwrap();
        let sync = encode_uniswap_v4_sync(pool_manager(), usdc()).unwrap();
        let settle = encode_next_gen_dex_settle(pool_manager(), U256::ZERO).unwrap();
        let body = uniswap_v4_flash_loan_data(&take, &sync, &[0xfe], &settle);
        assert_eq!(encoded, encode_next_gen_dex_unlock(pool_manager(), 0, &body).unwrap());
        assert_eq!(
            encode(&encoded[encoded.len() - 38..]),
            String::from(concat!(
                // singletons, settle
                "e102",
                "000000000004444c5dc75cb358380d2e3de08a90",
                // nothing forwarded for erc20
                "00000000000000000000000000000000",
            ))
        );
    }

    #[test]
    fn test_encode_uniswap_v4_flash_loan_native_settles_amount() {
        let amount = U256::from(1_000_000u64);
        let encoded = encode_uniswap_v4_flash_loan(
            pool_manager(),
            0,
            NATIVE_ADDRESS,
            receiver(),
            amount,
            &[],
        )
        .unwrap();
        // unlock header, take and settle without a sync frame in between
        assert_eq!(encoded.len(), 25 + 78 + 38);
        assert_eq!(
            encode(&encoded[25 + 78..]),
            String::from(concat!(
                "e102",
                "000000000004444c5dc75cb358380d2e3de08a90",
                // native amount forwarded
                "000000000000000000000000000f4240",
            ))
        );
    }

    #[test]
    fn test_encode_balancer_v3_flash_loan() {
        let vault = address!("ba1333333333a1ba1108e8412f11850a5c319ba9");
        let encoded =
            encode_balancer_v3_flash_loan(vault, 2, usdc(), receiver(), U256::from(9u8), &[0x01])
                .unwrap();
        assert_eq!(
            encode(encoded),
            String::from(concat!(
                // singletons, unlock
                "e100",
                "ba1333333333a1ba1108e8412f11850a5c319ba9",
                // 78 take + 1 body + 58 settle + 1 id
                "008a",
                "02",
                // balancer take
                "e104",
                "ba1333333333a1ba1108e8412f11850a5c319ba9",
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e",
                "00000000000000000000000000000009",
                // body
                "01",
                // balancer settle
                "e105",
                "ba1333333333a1ba1108e8412f11850a5c319ba9",
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "00000000000000000000000000000009",
            ))
        );
    }
}
