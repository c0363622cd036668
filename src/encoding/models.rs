use crate::encoding::errors::EncodingError;

/// Version of the numeric tag table below. The composer contract reads these values
/// positionally, so every table change must bump this string.
pub const COMMAND_TABLE_VERSION: &str = "2025-composer";

/// Flag bit signalling that the amount is a pre-parameter (override) rather than a literal.
pub const PRE_PARAM_FLAG: u128 = 1 << 127;
/// Flag bit signalling that the amount is denominated in shares instead of assets.
pub const SHARES_FLAG: u128 = 1 << 126;
/// Flag bit disabling the slippage/health check for the amount.
pub const UNSAFE_FLAG: u128 = 1 << 125;

/// Top-level command byte selecting an operation family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ComposerCommand {
    Swaps = 0x20,
    ExtCall = 0x40,
    Lending = 0x60,
    Transfers = 0x80,
    Permit = 0xa0,
    FlashLoan = 0xc0,
    Erc4626 = 0xe0,
    Gen2025Singletons = 0xe1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TransferId {
    TransferFrom = 0,
    Sweep = 1,
    WrapNative = 2,
    UnwrapWnative = 3,
    Permit2TransferFrom = 4,
    Approve = 5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PermitId {
    TokenPermit = 0,
    AaveV3CreditPermit = 1,
    AllowCreditPermit = 2,
}

/// Upper bound of each lender band. Lender ids inside a band are `< band`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum LenderId {
    UpToAaveV3 = 1000,
    UpToAaveV2 = 2000,
    UpToCompoundV3 = 3000,
    UpToCompoundV2 = 4000,
    UpToMorpho = 5000,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LenderOp {
    Deposit = 0,
    Borrow = 1,
    Repay = 2,
    Withdraw = 3,
    DepositLendingToken = 4,
    WithdrawLendingToken = 5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FlashLoanId {
    Morpho = 0,
    BalancerV2 = 1,
    AaveV3 = 2,
    AaveV2 = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Erc4626Id {
    Deposit = 0,
    Withdraw = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Gen2025ActionId {
    Unlock = 0,
    UniV4Take = 1,
    UniV4Settle = 2,
    UniV4Sync = 3,
    BalV3Take = 4,
    BalV3Settle = 5,
}

/// Identifier of a pool style inside a swap segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DexTypeId {
    UniswapV3 = 0,
    UniswapV2 = 1,
    UniswapV4 = 2,
    UniswapV2Fot = 3,
    Izi = 5,
    CurveV1Standard = 64,
    CurveReceived = 65,
    CurveFork = 66,
    WooFi = 80,
    Gmx = 90,
    Ktx = 91,
    BalancerV2 = 128,
    BalancerV3 = 129,
    Lb = 140,
    Dodo = 150,
    SyncSwap = 160,
    Erc4626 = 253,
    NativeWrap = 254,
}

/// Fork identifiers for pool styles that are deployed by several protocols.
pub mod dex_fork {
    pub const UNISWAP_V3: u8 = 0;
    pub const IZI: u8 = 0;
    pub const ANY_V3: u8 = 0xff;
    pub const ANY_IZI: u8 = 0xff;
    pub const UNISWAP_V4: u8 = 0;
    pub const BALANCER_V3: u8 = 0;
    pub const UNISWAP_V2: u8 = 0;
}

/// Sweep behaviour for sweeps and unwraps.
///
/// `Validate` only sweeps when the balance is non-zero, `Amount` sweeps exactly the given amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SweepType {
    Validate = 0,
    Amount = 1,
}

impl TryFrom<u8> for SweepType {
    type Error = EncodingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SweepType::Validate),
            1 => Ok(SweepType::Amount),
            _ => Err(EncodingError::InvalidInput(format!("Unknown sweep type: {}", value))),
        }
    }
}

/// Who pays the input of a swap segment.
///
/// `Flash` switches the trailing bytes of the segment from "reserved/empty" to the flash
/// callback payload, and the adjacent config field to the payload length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DexPayConfig {
    CallerPays = 0,
    ContractPays = 1,
    PreFund = 2,
    Flash = 3,
}

impl TryFrom<u8> for DexPayConfig {
    type Error = EncodingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DexPayConfig::CallerPays),
            1 => Ok(DexPayConfig::ContractPays),
            2 => Ok(DexPayConfig::PreFund),
            3 => Ok(DexPayConfig::Flash),
            _ => Err(EncodingError::InvalidInput(format!("Unknown pay config: {}", value))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DodoSelector {
    SellBase = 0,
    SellQuote = 1,
}

impl TryFrom<u8> for DodoSelector {
    type Error = EncodingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DodoSelector::SellBase),
            1 => Ok(DodoSelector::SellQuote),
            _ => Err(EncodingError::InvalidInput(format!("Unknown DODO selector: {}", value))),
        }
    }
}

/// A lending protocol family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lender {
    AaveV3,
    AaveV2,
    CompoundV3,
    CompoundV2,
    Morpho,
}

impl Lender {
    pub fn band(&self) -> LenderId {
        match self {
            Lender::AaveV3 => LenderId::UpToAaveV3,
            Lender::AaveV2 => LenderId::UpToAaveV2,
            Lender::CompoundV3 => LenderId::UpToCompoundV3,
            Lender::CompoundV2 => LenderId::UpToCompoundV2,
            Lender::Morpho => LenderId::UpToMorpho,
        }
    }

    /// The `uint16` lender id written after the op byte.
    ///
    /// Aave and Compound use the last id inside their band (`band - 1`), Morpho uses its band
    /// value as is. The router dispatches on these exact numbers.
    pub fn lender_id(&self) -> u16 {
        match self {
            Lender::Morpho => self.band() as u16,
            _ => self.band() as u16 - 1,
        }
    }
}

/// A 128-bit amount whose top bits carry flags.
///
/// The magnitude occupies the low bits; `pack` clears and then sets each flag bit so that a
/// flag never depends on whatever the magnitude had in that position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AmountBitmap {
    pub magnitude: u128,
    pub pre_param: bool,
    pub use_shares: bool,
    pub is_unsafe: bool,
}

impl AmountBitmap {
    pub fn new(magnitude: u128) -> Self {
        Self { magnitude, ..Default::default() }
    }

    pub fn pack(&self) -> u128 {
        let mut amount = self.magnitude;
        if self.pre_param {
            amount = (amount & !PRE_PARAM_FLAG) | PRE_PARAM_FLAG;
        }
        if self.use_shares {
            amount = (amount & !SHARES_FLAG) | SHARES_FLAG;
        }
        if self.is_unsafe {
            amount = (amount & !UNSAFE_FLAG) | UNSAFE_FLAG;
        }
        amount
    }
}

/// An optional trailing byte segment of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Empty,
    Payload(&'a [u8]),
}

impl<'a> Segment<'a> {
    pub fn from_slice(data: &'a [u8]) -> Self {
        if data.is_empty() {
            Segment::Empty
        } else {
            Segment::Payload(data)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Segment::Empty => 0,
            Segment::Payload(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        match self {
            Segment::Empty => &[],
            Segment::Payload(data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::aave_v3(Lender::AaveV3, 999)]
    #[case::aave_v2(Lender::AaveV2, 1999)]
    #[case::compound_v3(Lender::CompoundV3, 2999)]
    #[case::compound_v2(Lender::CompoundV2, 3999)]
    #[case::morpho(Lender::Morpho, 5000)]
    fn test_lender_id(#[case] lender: Lender, #[case] expected: u16) {
        assert_eq!(lender.lender_id(), expected);
    }

    #[test]
    fn test_amount_bitmap_flags() {
        let magnitude = 9007199254740991u128;
        let shares = AmountBitmap { magnitude, use_shares: true, ..Default::default() };
        assert_eq!(shares.pack(), magnitude | (1 << 126));

        let all = AmountBitmap { magnitude, pre_param: true, use_shares: true, is_unsafe: true };
        assert_eq!(all.pack() >> 125, 0b111);
        assert_eq!(all.pack() & ((1 << 125) - 1), magnitude);
    }

    #[test]
    fn test_amount_bitmap_unflagged_restores_magnitude() {
        let magnitude = 0x0123_4567_89ab_cdefu128;
        let flagged = AmountBitmap { magnitude, use_shares: true, ..Default::default() }.pack();
        let unflagged = AmountBitmap { magnitude, use_shares: false, ..Default::default() }.pack();
        assert_ne!(flagged, unflagged);
        assert_eq!(unflagged, magnitude);
    }

    #[test]
    fn test_amount_bitmap_flag_already_set_in_magnitude() {
        let magnitude = SHARES_FLAG | 5;
        let packed = AmountBitmap { magnitude, use_shares: true, ..Default::default() }.pack();
        assert_eq!(packed, magnitude);
    }

    #[test]
    fn test_segment_from_slice() {
        assert_eq!(Segment::from_slice(&[]), Segment::Empty);
        let payload = Segment::from_slice(&[1, 2, 3]);
        assert_eq!(payload.len(), 3);
        assert!(!payload.is_empty());
        assert_eq!(payload.as_bytes(), &[1, 2, 3]);
    }

    #[rstest]
    #[case::caller_pays(0, Ok(DexPayConfig::CallerPays))]
    #[case::flash(3, Ok(DexPayConfig::Flash))]
    #[case::unknown(4, Err(EncodingError::InvalidInput("Unknown pay config: 4".to_string())))]
    fn test_pay_config_from_u8(
        #[case] value: u8,
        #[case] expected: Result<DexPayConfig, EncodingError>,
    ) {
        assert_eq!(DexPayConfig::try_from(value), expected);
    }
}
