use std::{collections::HashMap, str::FromStr};

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, B256, U256};
use lazy_static::lazy_static;
use tracing::{debug, info, warn};

use crate::encoding::{
    catalog::{FunctionCatalog, FunctionEntry, GoldenFixture},
    errors::EncodingError,
    evm::{
        flash_loans::*,
        lending::*,
        singletons::*,
        swap_encoder::*,
        transfers::*,
        utils::{uint16, uint24, uint8},
        vaults::*,
    },
    models::{DodoSelector, SweepType},
};

type EncoderFn = fn(&mut Args) -> Result<Vec<u8>, EncodingError>;

/// Cursor over the typed arguments of one named encoder call.
pub struct Args<'a> {
    name: &'a str,
    values: &'a [DynSolValue],
    position: usize,
}

impl<'a> Args<'a> {
    pub fn new(name: &'a str, values: &'a [DynSolValue]) -> Self {
        Self { name, values, position: 0 }
    }

    fn next(&mut self, expected: &str) -> Result<&'a DynSolValue, EncodingError> {
        let value = self.values.get(self.position).ok_or_else(|| {
            EncodingError::InvalidInput(format!(
                "{}: missing {} argument at position {}",
                self.name, expected, self.position
            ))
        })?;
        self.position += 1;
        Ok(value)
    }

    fn mismatch(&self, expected: &str, value: &DynSolValue) -> EncodingError {
        EncodingError::InvalidInput(format!(
            "{}: expected {} at position {}, got {:?}",
            self.name,
            expected,
            self.position - 1,
            value
        ))
    }

    pub fn address(&mut self) -> Result<Address, EncodingError> {
        match self.next("address")? {
            DynSolValue::Address(address) => Ok(*address),
            other => Err(self.mismatch("address", other)),
        }
    }

    pub fn uint(&mut self) -> Result<U256, EncodingError> {
        match self.next("uint")? {
            DynSolValue::Uint(value, _) => Ok(*value),
            other => Err(self.mismatch("uint", other)),
        }
    }

    pub fn uint8(&mut self) -> Result<u8, EncodingError> {
        self.uint().map(uint8)
    }

    pub fn uint16(&mut self) -> Result<u16, EncodingError> {
        self.uint().map(uint16)
    }

    pub fn uint24(&mut self) -> Result<u32, EncodingError> {
        self.uint().map(uint24)
    }

    pub fn boolean(&mut self) -> Result<bool, EncodingError> {
        match self.next("bool")? {
            DynSolValue::Bool(value) => Ok(*value),
            other => Err(self.mismatch("bool", other)),
        }
    }

    pub fn bytes(&mut self) -> Result<Vec<u8>, EncodingError> {
        match self.next("bytes")? {
            DynSolValue::Bytes(data) => Ok(data.clone()),
            other => Err(self.mismatch("bytes", other)),
        }
    }

    pub fn bytes32(&mut self) -> Result<B256, EncodingError> {
        match self.next("bytes32")? {
            DynSolValue::FixedBytes(word, 32) => Ok(*word),
            other => Err(self.mismatch("bytes32", other)),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.position == self.values.len()
    }
}

/// Every named encoder, keyed by its catalog name.
const ENCODERS: &[(&str, EncoderFn)] = &[
    // transfers
    ("encodeTransferIn", |a| encode_transfer_in(a.address()?, a.address()?, a.uint()?)),
    ("encodeSweep", |a| {
        encode_sweep(a.address()?, a.address()?, a.uint()?, SweepType::try_from(a.uint8()?)?)
    }),
    ("encodeWrap", |a| encode_wrap(a.uint()?, a.address()?)),
    ("encodeWrapNative", |a| encode_wrap_native(a.uint()?)),
    ("encodeUnwrap", |a| {
        encode_unwrap(a.address()?, a.address()?, a.uint()?, SweepType::try_from(a.uint8()?)?)
    }),
    ("encodePermit2TransferFrom", |a| {
        encode_permit2_transfer_from(a.address()?, a.address()?, a.uint()?)
    }),
    ("encodeApprove", |a| encode_approve(a.address()?, a.address()?)),
    // flash loans
    ("encodeUint8AndBytes", |a| encode_uint8_and_bytes(a.uint8()?, &a.bytes()?)),
    ("encodeFlashLoan", |a| {
        encode_flash_loan(a.address()?, a.uint()?, a.address()?, a.uint8()?, a.uint8()?, &a.bytes()?)
    }),
    ("encodeBalancerV2FlashLoan", |a| {
        encode_balancer_v2_flash_loan(a.address()?, a.uint()?, a.uint8()?, &a.bytes()?)
    }),
    // singletons
    ("encodeNextGenDexUnlock", |a| {
        encode_next_gen_dex_unlock(a.address()?, a.uint8()?, &a.bytes()?)
    }),
    ("encodeUniswapV4Take", |a| {
        encode_uniswap_v4_take(a.address()?, a.address()?, a.address()?, a.uint()?)
    }),
    ("encodeBalancerV3Take", |a| {
        encode_balancer_v3_take(a.address()?, a.address()?, a.address()?, a.uint()?)
    }),
    ("encodeUniswapV4Sync", |a| encode_uniswap_v4_sync(a.address()?, a.address()?)),
    ("encodeNextGenDexSettle", |a| encode_next_gen_dex_settle(a.address()?, a.uint()?)),
    ("encodeNextGenDexSettleBalancer", |a| {
        encode_next_gen_dex_settle_balancer(a.address()?, a.address()?, a.uint()?)
    }),
    ("encodeUniswapV4FlashLoan", |a| {
        encode_uniswap_v4_flash_loan(
            a.address()?,
            a.uint8()?,
            a.address()?,
            a.address()?,
            a.uint()?,
            &a.bytes()?,
        )
    }),
    ("encodeBalancerV3FlashLoan", |a| {
        encode_balancer_v3_flash_loan(
            a.address()?,
            a.uint8()?,
            a.address()?,
            a.address()?,
            a.uint()?,
            &a.bytes()?,
        )
    }),
    ("encodeUniswapV4FlashLoanData", |a| {
        Ok(uniswap_v4_flash_loan_data(&a.bytes()?, &a.bytes()?, &a.bytes()?, &a.bytes()?))
    }),
    ("encodeBalancerV3FlashLoanData", |a| {
        Ok(balancer_v3_flash_loan_data(&a.bytes()?, &a.bytes()?, &a.bytes()?))
    }),
    // swaps
    ("swapHead", |a| swap_head(a.uint()?, a.uint()?, a.address()?)),
    ("attachBranch", |a| attach_branch(&a.bytes()?, a.uint8()?, a.uint8()?, &a.bytes()?)),
    ("encodeUniswapV2StyleSwap", |a| {
        encode_uniswap_v2_style_swap(
            a.address()?,
            a.address()?,
            a.uint8()?,
            a.address()?,
            a.uint16()?,
            a.uint8()?,
            &a.bytes()?,
        )
    }),
    ("encodeUniswapV3StyleSwap", |a| {
        encode_uniswap_v3_style_swap(
            &a.bytes()?,
            a.address()?,
            a.address()?,
            a.uint8()?,
            a.address()?,
            a.uint16()?,
            a.uint8()?,
            &a.bytes()?,
        )
    }),
    ("encodeIzumiStyleSwap", |a| {
        encode_izumi_style_swap(
            &a.bytes()?,
            a.address()?,
            a.address()?,
            a.uint8()?,
            a.address()?,
            a.uint16()?,
            a.uint8()?,
            &a.bytes()?,
        )
    }),
    ("encodeUniswapV4StyleSwap", |a| {
        encode_uniswap_v4_style_swap(
            &a.bytes()?,
            a.address()?,
            a.address()?,
            a.address()?,
            a.uint24()?,
            a.uint24()?,
            a.address()?,
            &a.bytes()?,
            a.uint8()?,
        )
    }),
    ("encodeBalancerV2StyleSwap", |a| {
        encode_balancer_v2_style_swap(
            &a.bytes()?,
            a.address()?,
            a.address()?,
            a.bytes32()?,
            a.address()?,
            a.uint8()?,
        )
    }),
    ("encodeBalancerV3StyleSwap", |a| {
        encode_balancer_v3_style_swap(
            &a.bytes()?,
            a.address()?,
            a.address()?,
            a.address()?,
            a.address()?,
            a.uint8()?,
            &a.bytes()?,
        )
    }),
    ("encodeLbStyleSwap", |a| {
        encode_lb_style_swap(
            &a.bytes()?,
            a.address()?,
            a.address()?,
            a.address()?,
            a.boolean()?,
            a.uint8()?,
        )
    }),
    ("encodeSyncSwapStyleSwap", |a| {
        encode_sync_swap_style_swap(&a.bytes()?, a.address()?, a.address()?, a.address()?, a.uint8()?)
    }),
    ("encodeDodoStyleSwap", |a| {
        encode_dodo_style_swap(
            &a.bytes()?,
            a.address()?,
            a.address()?,
            a.address()?,
            DodoSelector::try_from(a.uint8()?)?,
            a.uint16()?,
            a.uint8()?,
            &a.bytes()?,
        )
    }),
    ("encodeWooStyleSwap", |a| {
        encode_woo_style_swap(&a.bytes()?, a.address()?, a.address()?, a.address()?, a.uint8()?)
    }),
    ("encodeGmxStyleSwap", |a| {
        encode_gmx_style_swap(&a.bytes()?, a.address()?, a.address()?, a.address()?, a.uint8()?)
    }),
    ("encodeKtxStyleSwap", |a| {
        encode_ktx_style_swap(&a.bytes()?, a.address()?, a.address()?, a.address()?, a.uint8()?)
    }),
    ("encodeCurveStyleSwap", |a| {
        encode_curve_style_swap(
            a.address()?,
            a.address()?,
            a.address()?,
            a.uint8()?,
            a.uint8()?,
            a.uint8()?,
            a.uint8()?,
        )
    }),
    ("encodeCurveNGStyleSwap", |a| {
        encode_curve_ng_style_swap(
            a.address()?,
            a.address()?,
            a.address()?,
            a.uint8()?,
            a.uint8()?,
            a.uint8()?,
            a.uint8()?,
        )
    }),
    // morpho
    ("encodeMorphoMarket", |a| {
        encode_morpho_market(a.address()?, a.address()?, a.address()?, a.address()?, a.uint()?)
    }),
    ("encodeMorphoDepositCollateral", |a| {
        encode_morpho_deposit_collateral(
            &a.bytes()?,
            a.uint()?,
            a.address()?,
            &a.bytes()?,
            a.address()?,
            a.uint8()?,
        )
    }),
    ("encodeMorphoDeposit", |a| {
        encode_morpho_deposit(
            &a.bytes()?,
            a.boolean()?,
            a.uint()?,
            a.address()?,
            &a.bytes()?,
            a.address()?,
            a.uint8()?,
        )
    }),
    ("encodeMorphoWithdraw", |a| {
        encode_morpho_withdraw(&a.bytes()?, a.boolean()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeMorphoWithdrawCollateral", |a| {
        encode_morpho_withdraw_collateral(&a.bytes()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeMorphoBorrow", |a| {
        encode_morpho_borrow(&a.bytes()?, a.boolean()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeMorphoRepay", |a| {
        encode_morpho_repay(
            &a.bytes()?,
            a.boolean()?,
            a.boolean()?,
            a.uint()?,
            a.address()?,
            &a.bytes()?,
            a.address()?,
            a.uint8()?,
        )
    }),
    // erc4626
    ("encodeErc4646Deposit", |a| {
        encode_erc4646_deposit(a.address()?, a.address()?, a.boolean()?, a.uint()?, a.address()?)
    }),
    ("encodeErc4646Withdraw", |a| {
        encode_erc4646_withdraw(a.address()?, a.boolean()?, a.uint()?, a.address()?)
    }),
    // aave
    ("encodeAaveDeposit", |a| {
        encode_aave_deposit(a.address()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeAaveBorrow", |a| {
        encode_aave_borrow(a.address()?, a.uint()?, a.address()?, a.uint8()?, a.address()?)
    }),
    ("encodeAaveRepay", |a| {
        encode_aave_repay(
            a.address()?,
            a.uint()?,
            a.address()?,
            a.uint8()?,
            a.address()?,
            a.address()?,
        )
    }),
    ("encodeAaveWithdraw", |a| {
        encode_aave_withdraw(a.address()?, a.uint()?, a.address()?, a.address()?, a.address()?)
    }),
    ("encodeAaveV2Deposit", |a| {
        encode_aave_v2_deposit(a.address()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeAaveV2Borrow", |a| {
        encode_aave_v2_borrow(a.address()?, a.uint()?, a.address()?, a.uint8()?, a.address()?)
    }),
    ("encodeAaveV2Repay", |a| {
        encode_aave_v2_repay(
            a.address()?,
            a.uint()?,
            a.address()?,
            a.uint8()?,
            a.address()?,
            a.address()?,
        )
    }),
    ("encodeAaveV2Withdraw", |a| {
        encode_aave_v2_withdraw(a.address()?, a.uint()?, a.address()?, a.address()?, a.address()?)
    }),
    // compound
    ("encodeCompoundV3Deposit", |a| {
        encode_compound_v3_deposit(a.address()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeCompoundV3Borrow", |a| {
        encode_compound_v3_borrow(a.address()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeCompoundV3Repay", |a| {
        encode_compound_v3_repay(a.address()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeCompoundV3Withdraw", |a| {
        encode_compound_v3_withdraw(
            a.address()?,
            a.uint()?,
            a.address()?,
            a.address()?,
            a.boolean()?,
        )
    }),
    ("encodeCompoundV2Deposit", |a| {
        encode_compound_v2_deposit(a.address()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeCompoundV2Borrow", |a| {
        encode_compound_v2_borrow(a.address()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeCompoundV2Repay", |a| {
        encode_compound_v2_repay(a.address()?, a.uint()?, a.address()?, a.address()?)
    }),
    ("encodeCompoundV2Withdraw", |a| {
        encode_compound_v2_withdraw(a.address()?, a.uint()?, a.address()?, a.address()?)
    }),
];

lazy_static! {
    static ref ENCODER_TABLE: HashMap<&'static str, EncoderFn> =
        ENCODERS.iter().copied().collect();
}

/// Parses a string argument into a runtime ABI value of the solidity type `kind`.
///
/// Addresses, `bytes` and `bytes32` are hex with an optional `0x` prefix, integers are decimal
/// or `0x` hex and booleans are `true`/`false`.
pub fn parse_argument(kind: &str, raw: &str) -> Result<DynSolValue, EncodingError> {
    let invalid = |e: &dyn std::fmt::Display| {
        EncodingError::InvalidInput(format!("Invalid {} argument {:?}: {}", kind, raw, e))
    };
    let sol_type = DynSolType::parse(kind)
        .map_err(|e| EncodingError::FatalError(format!("Unknown parameter type {}: {}", kind, e)))?;
    match sol_type {
        DynSolType::Address => Address::from_str(raw)
            .map(DynSolValue::Address)
            .map_err(|e| invalid(&e)),
        DynSolType::Bool => match raw {
            "true" => Ok(DynSolValue::Bool(true)),
            "false" => Ok(DynSolValue::Bool(false)),
            _ => Err(invalid(&"expected true or false")),
        },
        DynSolType::Bytes => hex::decode(raw.strip_prefix("0x").unwrap_or(raw))
            .map(DynSolValue::Bytes)
            .map_err(|e| invalid(&e)),
        DynSolType::FixedBytes(32) => B256::from_str(raw)
            .map(|word| DynSolValue::FixedBytes(word, 32))
            .map_err(|e| invalid(&e)),
        DynSolType::Uint(bits) => U256::from_str(raw)
            .map(|value| DynSolValue::Uint(value, bits))
            .map_err(|e| invalid(&e)),
        other => Err(EncodingError::FatalError(format!(
            "Unsupported parameter type {}",
            other.sol_type_name()
        ))),
    }
}

/// A fixture whose encoded output did not match.
#[derive(Clone, Debug, PartialEq)]
pub struct FixtureMismatch {
    pub label: String,
    pub expected: String,
    pub actual: String,
}

/// Dispatches named encoder calls, typing string arguments by a function catalog.
pub struct EncoderRegistry {
    catalog: FunctionCatalog,
}

impl EncoderRegistry {
    /// Loads the catalog at `catalog_path`, or the embedded one, and checks that every entry
    /// has an encoder.
    pub fn new(catalog_path: Option<&str>) -> Result<Self, EncodingError> {
        let registry = Self { catalog: FunctionCatalog::load(catalog_path)? };
        registry.check_catalog()?;
        Ok(registry)
    }

    pub fn catalog(&self) -> &FunctionCatalog {
        &self.catalog
    }

    /// Fails if a catalog entry has no encoder registered under its name.
    pub fn check_catalog(&self) -> Result<(), EncodingError> {
        let missing: Vec<&str> = self
            .catalog
            .entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .filter(|name| !ENCODER_TABLE.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(EncodingError::FatalError(format!(
                "No encoder for catalog entries: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    fn entry(&self, name: &str) -> Result<&FunctionEntry, EncodingError> {
        self.catalog
            .get(name)
            .ok_or_else(|| EncodingError::FatalError(format!("Unknown function: {}", name)))
    }

    /// Encodes `name` with `args` typed by its catalog parameters.
    pub fn encode(&self, name: &str, args: &[String]) -> Result<Vec<u8>, EncodingError> {
        let entry = self.entry(name)?;
        if entry.params.len() != args.len() {
            return Err(EncodingError::InvalidInput(format!(
                "{} takes {} arguments, got {}",
                entry.signature(),
                entry.params.len(),
                args.len()
            )));
        }
        let values = entry
            .params
            .iter()
            .zip(args)
            .map(|(param, raw)| parse_argument(&param.kind, raw))
            .collect::<Result<Vec<_>, _>>()?;
        let encoder = ENCODER_TABLE
            .get(name)
            .ok_or_else(|| EncodingError::FatalError(format!("No encoder for {}", name)))?;
        let mut cursor = Args::new(name, &values);
        let encoded = encoder(&mut cursor)?;
        if !cursor.is_exhausted() {
            return Err(EncodingError::FatalError(format!(
                "Encoder {} does not match its catalog parameters",
                name
            )));
        }
        Ok(encoded)
    }

    /// Replays `fixtures` and returns those whose output differs from the expected bytes.
    ///
    /// An encoder error counts as a mismatch with the error message as actual output.
    pub fn verify_fixtures(&self, fixtures: &[GoldenFixture]) -> Vec<FixtureMismatch> {
        let mut mismatches = Vec::new();
        for fixture in fixtures {
            let label = fixture.label();
            let actual = match self.encode(&fixture.name, &fixture.args) {
                Ok(encoded) if encoded == fixture.expected => {
                    debug!(fixture = %label, "fixture matches");
                    continue;
                }
                Ok(encoded) => format!("0x{}", hex::encode(encoded)),
                Err(e) => e.to_string(),
            };
            let expected = format!("0x{}", hex::encode(&fixture.expected));
            warn!(fixture = %label, %expected, %actual, "fixture mismatch");
            mismatches.push(FixtureMismatch { label, expected, actual });
        }
        info!(
            total = fixtures.len(),
            failed = mismatches.len(),
            "verified golden fixtures"
        );
        mismatches
    }
}

#[cfg(test)]
mod tests {
    use hex::encode;

    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_every_encoder_is_in_the_default_catalog() {
        let registry = EncoderRegistry::new(None).unwrap();
        for (name, _) in ENCODERS {
            assert!(registry.catalog().get(name).is_some(), "{} missing from catalog", name);
        }
        assert_eq!(ENCODERS.len(), registry.catalog().entries().len());
    }

    #[test]
    fn test_encode_transfer_in_by_name() {
        let registry = EncoderRegistry::new(None).unwrap();
        let encoded = registry
            .encode(
                "encodeTransferIn",
                &args(&[
                    "0x1De17A0000000000000000000000000000000000",
                    "0x1de17a0000000000000000000000000000000000",
                    "9007199254740991",
                ]),
            )
            .unwrap();
        assert_eq!(
            encode(encoded),
            String::from(concat!(
                "8000",
                "1de17a0000000000000000000000000000000000",
                "1de17a0000000000000000000000000000000000",
                "0000000000000000001fffffffffffff",
            ))
        );
    }

    #[test]
    fn test_encode_wrong_argument_count() {
        let registry = EncoderRegistry::new(None).unwrap();
        let result = registry.encode("encodeWrapNative", &args(&["1", "2"]));
        assert_eq!(
            result,
            Err(EncodingError::InvalidInput(
                "encodeWrapNative(uint256 amount) takes 1 arguments, got 2".to_string()
            ))
        );
    }

    #[test]
    fn test_encode_unknown_function() {
        let registry = EncoderRegistry::new(None).unwrap();
        let result = registry.encode("encodeNothing", &[]);
        assert_eq!(result, Err(EncodingError::FatalError("Unknown function: encodeNothing".to_string())));
    }

    #[test]
    fn test_encode_rejects_unknown_sweep_type() {
        let registry = EncoderRegistry::new(None).unwrap();
        let result = registry.encode(
            "encodeSweep",
            &args(&[
                "0x1de17a0000000000000000000000000000000000",
                "0x1de17a0000000000000000000000000000000000",
                "1",
                "7",
            ]),
        );
        assert_eq!(
            result,
            Err(EncodingError::InvalidInput("Unknown sweep type: 7".to_string()))
        );
    }

    #[test]
    fn test_parse_argument() {
        assert_eq!(parse_argument("bytes", "0x").unwrap(), DynSolValue::Bytes(vec![]));
        assert_eq!(parse_argument("bool", "true").unwrap(), DynSolValue::Bool(true));
        assert_eq!(
            parse_argument("uint24", "3000").unwrap(),
            DynSolValue::Uint(U256::from(3000u32), 24)
        );
        assert!(matches!(parse_argument("bool", "yes"), Err(EncodingError::InvalidInput(_))));
        assert!(matches!(
            parse_argument("address", "0x1234"),
            Err(EncodingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_check_catalog_reports_missing_encoders() {
        let catalog = FunctionCatalog::from_json_str(
            r#"[{"name": "encodeTeleport", "params": [], "returnType": "bytes"}]"#,
        )
        .unwrap();
        let registry = EncoderRegistry { catalog };
        assert_eq!(
            registry.check_catalog(),
            Err(EncodingError::FatalError(
                "No encoder for catalog entries: encodeTeleport".to_string()
            ))
        );
    }

    #[test]
    fn test_verify_fixtures_reports_mismatch() {
        let registry = EncoderRegistry::new(None).unwrap();
        let fixtures = vec![
            GoldenFixture {
                name: "encodeWrapNative".to_string(),
                case: None,
                args: args(&["1"]),
                expected: hex::decode("800200000000000000000000000000000001").unwrap(),
            },
            GoldenFixture {
                name: "encodeWrapNative".to_string(),
                case: Some("wrong".to_string()),
                args: args(&["2"]),
                expected: hex::decode("800200000000000000000000000000000001").unwrap(),
            },
        ];
        let mismatches = registry.verify_fixtures(&fixtures);
        assert_eq!(
            mismatches,
            vec![FixtureMismatch {
                label: "encodeWrapNative[wrong]".to_string(),
                expected: "0x800200000000000000000000000000000001".to_string(),
                actual: "0x800200000000000000000000000000000002".to_string(),
            }]
        );
    }
}
