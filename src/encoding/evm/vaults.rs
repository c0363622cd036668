use alloy_primitives::{Address, U256};

use crate::encoding::{
    errors::EncodingError,
    evm::{
        transfers::encode_approve,
        utils::{encode_packed, generate_amount_bitmap, sol_address, sol_uint},
    },
    models::{ComposerCommand, Erc4626Id},
};

/// Deposits into an ERC-4626 vault, approving the vault to pull `asset` first.
///
/// With `is_shares` the amount is the number of vault shares to mint instead of assets.
pub fn encode_erc4646_deposit(
    asset: Address,
    vault: Address,
    is_shares: bool,
    assets: U256,
    receiver: Address,
) -> Result<Vec<u8>, EncodingError> {
    let mut encoded = encode_approve(asset, vault)?;
    encoded.extend(encode_packed(
        &["uint8", "uint8", "address", "address", "uint128", "address"],
        vec![
            sol_uint(ComposerCommand::Erc4626 as u8),
            sol_uint(Erc4626Id::Deposit as u8),
            sol_address(asset),
            sol_address(vault),
            sol_uint(generate_amount_bitmap(assets, is_shares, false)),
            sol_address(receiver),
        ],
    )?);
    Ok(encoded)
}

pub fn encode_erc4646_withdraw(
    vault: Address,
    is_shares: bool,
    assets: U256,
    receiver: Address,
) -> Result<Vec<u8>, EncodingError> {
    encode_packed(
        &["uint8", "uint8", "address", "uint128", "address"],
        vec![
            sol_uint(ComposerCommand::Erc4626 as u8),
            sol_uint(Erc4626Id::Withdraw as u8),
            sol_address(vault),
            sol_uint(generate_amount_bitmap(assets, is_shares, false)),
            sol_address(receiver),
        ],
    )
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use hex::encode;

    use super::*;

    #[test]
    fn test_encode_erc4646_deposit() {
        let encoded = encode_erc4646_deposit(
            address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
            address!("d63070114470f685b75b74d60eec7c1113d33a3d"),
            false,
            U256::from(1_000_000u64),
            address!("1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e"),
        )
        .unwrap();
        assert_eq!(
            encode(encoded),
            String::from(concat!(
                // approve
                "8005",
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "d63070114470f685b75b74d60eec7c1113d33a3d",
                // erc4626, deposit
                "e000",
                // asset
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                // vault
                "d63070114470f685b75b74d60eec7c1113d33a3d",
                // assets
                "000000000000000000000000000f4240",
                // receiver
                "1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e",
            ))
        );
    }

    #[test]
    fn test_encode_erc4646_withdraw_shares() {
        let encoded = encode_erc4646_withdraw(
            address!("d63070114470f685b75b74d60eec7c1113d33a3d"),
            true,
            U256::from(5u8),
            address!("1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e"),
        )
        .unwrap();
        assert_eq!(
            encode(encoded),
            String::from(concat!(
                // erc4626, withdraw
                "e001",
                // vault
                "d63070114470f685b75b74d60eec7c1113d33a3d",
                // shares flag set
                "40000000000000000000000000000005",
                // receiver
                "1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e",
            ))
        );
    }
}
