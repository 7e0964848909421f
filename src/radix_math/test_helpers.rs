//! Shorthands shared by the engine tests

use crate::{
    BinaryHelper, DecimalHelper, ExtendedDecimal, ExtendedFloat, Flags, FullRadixMath, PrecisionContext,
    RadixResult, Rounding,
};

pub(crate) fn decimal_math() -> FullRadixMath<DecimalHelper> {
    FullRadixMath::new(DecimalHelper::default())
}

pub(crate) fn binary_math() -> FullRadixMath<BinaryHelper> {
    FullRadixMath::new(BinaryHelper)
}

pub(crate) fn dec(s: &str) -> ExtendedDecimal {
    s.parse().unwrap()
}

pub(crate) fn float(f: f64) -> ExtendedFloat {
    ExtendedFloat::from_f64(f)
}

/// Nine digits and exponents in [-383, 384], as in the decimal test suite
pub(crate) fn basic(rounding: Rounding) -> PrecisionContext {
    digits(9, rounding)
}

pub(crate) fn digits(precision: u64, rounding: Rounding) -> PrecisionContext {
    PrecisionContext::for_precision_and_rounding(precision, rounding)
        .with_exponent_range(-383, 384)
        .unwrap()
}

/// Check a result's scientific string and status
#[track_caller]
pub(crate) fn assert_decimal(result: RadixResult<ExtendedDecimal>, expected: &str, status: Flags) {
    let result = result.unwrap();
    assert_eq!(result.value.to_string(), expected);
    assert_eq!(result.status, status, "status of {}", expected);
}
