//! Arbitrary-precision binary numbers with special values

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

use crate::helper::{BinaryHelper, NumberFlags};
use crate::powers::{bit_length, count_trailing_zero_bits};
use crate::radix_math::{sign_flag, FullRadixMath, RadixMath, RadixResult};
use crate::{ArithmeticError, ExtendedDecimal, MutableNumber, PrecisionContext, RadixError, RadixPowers};


/// Bits of an f64 mantissa, without the implicit leading one
const F64_FRACTION_BITS: u32 = 52;

/// Exponent of the lowest bit of an f64 subnormal
const F64_MIN_EXPONENT: i64 = -1074;

const F64_EXPONENT_MASK: u64 = 0x7ff;

const F64_QUIET_BIT: u64 = 1 << (F64_FRACTION_BITS - 1);


/// `(-1)^sign * mantissa * 2^exponent`, an infinity, or a NaN
///
/// As with [`ExtendedDecimal`], equality is equality of representation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedFloat {
    mantissa: BigUint,
    exponent: BigInt,
    flags: NumberFlags,
}

impl ExtendedFloat {
    /// Build from raw parts; the mantissa of an infinity is ignored
    pub fn from_parts(mantissa: BigUint, exponent: BigInt, flags: NumberFlags) -> Self {
        let mantissa = if flags.contains(NumberFlags::INFINITY) {
            BigUint::zero()
        } else {
            mantissa
        };
        ExtendedFloat {
            mantissa: mantissa,
            exponent: exponent,
            flags: flags,
        }
    }

    /// mantissa * 2^exponent
    pub fn new(mantissa: BigInt, exponent: i64) -> Self {
        let (sign, magnitude) = mantissa.into_parts();
        Self::from_parts(magnitude, BigInt::from(exponent), sign_flag(sign == Sign::Minus))
    }

    pub fn zero() -> Self {
        Self::from_parts(BigUint::zero(), BigInt::zero(), NumberFlags::empty())
    }

    pub fn infinity() -> Self {
        Self::from_parts(BigUint::zero(), BigInt::zero(), NumberFlags::INFINITY)
    }

    pub fn negative_infinity() -> Self {
        Self::from_parts(BigUint::zero(), BigInt::zero(), NumberFlags::INFINITY | NumberFlags::NEGATIVE)
    }

    pub fn nan() -> Self {
        Self::from_parts(BigUint::zero(), BigInt::zero(), NumberFlags::QUIET_NAN)
    }

    pub fn unsigned_mantissa(&self) -> &BigUint {
        &self.mantissa
    }

    /// Mantissa carrying the sign of the number
    pub fn mantissa(&self) -> BigInt {
        let sign = if self.is_negative() { Sign::Minus } else { Sign::Plus };
        BigInt::from_biguint(sign, self.mantissa.clone())
    }

    pub fn exponent(&self) -> &BigInt {
        &self.exponent
    }

    pub fn flags(&self) -> NumberFlags {
        self.flags
    }

    pub fn sign(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.is_negative() {
            -1
        } else {
            1
        }
    }

    pub fn is_negative(&self) -> bool {
        self.flags.contains(NumberFlags::NEGATIVE)
    }

    pub fn is_nan(&self) -> bool {
        self.flags.intersects(NumberFlags::NAN)
    }

    pub fn is_signaling_nan(&self) -> bool {
        self.flags.contains(NumberFlags::SIGNALING_NAN)
    }

    pub fn is_infinite(&self) -> bool {
        self.flags.contains(NumberFlags::INFINITY)
    }

    pub fn is_finite(&self) -> bool {
        !self.flags.intersects(NumberFlags::SPECIAL)
    }

    pub fn is_zero(&self) -> bool {
        self.is_finite() && self.mantissa.is_zero()
    }

    /// Exact value of an f64; NaN payloads and signaling bits are kept
    pub fn from_f64(f: f64) -> Self {
        let bits = f.to_bits();
        let sign = sign_flag(bits >> 63 == 1);
        let biased_exponent = (bits >> F64_FRACTION_BITS) & F64_EXPONENT_MASK;
        let fraction = bits & ((1 << F64_FRACTION_BITS) - 1);

        if biased_exponent == F64_EXPONENT_MASK {
            if fraction == 0 {
                return Self::from_parts(BigUint::zero(), BigInt::zero(), sign | NumberFlags::INFINITY);
            }
            let kind = if fraction & F64_QUIET_BIT != 0 {
                NumberFlags::QUIET_NAN
            } else {
                NumberFlags::SIGNALING_NAN
            };
            let payload = BigUint::from(fraction & !F64_QUIET_BIT);
            return Self::from_parts(payload, BigInt::zero(), sign | kind);
        }

        let (mantissa, exponent) = if biased_exponent == 0 {
            (fraction, F64_MIN_EXPONENT)
        } else {
            (fraction | (1 << F64_FRACTION_BITS), biased_exponent as i64 + F64_MIN_EXPONENT - 1)
        };
        if mantissa == 0 {
            return Self::from_parts(BigUint::zero(), BigInt::zero(), sign);
        }
        let mantissa = MutableNumber::words_to_biguint(&[mantissa as u32, (mantissa >> 32) as u32]);
        let trailing = count_trailing_zero_bits(&mantissa);
        Self::from_parts(mantissa >> trailing, BigInt::from(exponent) + trailing, sign)
    }

    /// Nearest f64, rounding half-even
    ///
    /// Values beyond the f64 range give [`ArithmeticError::Overflow`];
    /// values below it round to a subnormal or to zero.
    pub fn to_f64(&self) -> Result<f64, ArithmeticError> {
        let negative = self.is_negative();
        if self.is_nan() {
            let nan = if negative { -f64::NAN } else { f64::NAN };
            return Ok(nan);
        }
        if self.is_infinite() {
            return Ok(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
        }

        let math = FullRadixMath::new(BinaryHelper);
        let rounded = math
            .round_to_binary_precision(self, &PrecisionContext::binary64())
            .map_err(|err| match err {
                RadixError::Arithmetic(err) => err,
                RadixError::Trap(trap) => ArithmeticError::invalid_operation(trap.to_string()),
            })?
            .into_value();
        if rounded.is_infinite() {
            return Err(ArithmeticError::Overflow(format!("{} is beyond the range of f64", self)));
        }
        let sign_bit = if negative { 1u64 << 63 } else { 0 };
        if rounded.mantissa.is_zero() {
            return Ok(f64::from_bits(sign_bit));
        }

        // normalize to 53 significant bits
        let bits = bit_length(&rounded.mantissa);
        let pad = u64::from(F64_FRACTION_BITS + 1).saturating_sub(bits);
        let mantissa = &rounded.mantissa << pad;
        let exponent = &rounded.exponent - BigInt::from(pad);
        let exponent = exponent.to_i64().ok_or_else(|| {
            ArithmeticError::Overflow(format!("{} is beyond the range of f64", self))
        })?;

        let mantissa = mantissa.to_u64().unwrap_or(0);
        let biased_exponent = exponent - F64_MIN_EXPONENT + 1;
        let bits = if biased_exponent <= 0 {
            // subnormal: shift back down to the fixed lowest exponent
            mantissa >> (1 - biased_exponent)
        } else {
            ((biased_exponent as u64) << F64_FRACTION_BITS) | (mantissa & ((1 << F64_FRACTION_BITS) - 1))
        };
        Ok(f64::from_bits(sign_bit | bits))
    }

    /// Decimal value rounded to a binary context
    ///
    /// With unlimited precision, decimals without a terminating binary
    /// expansion (such as 0.1) give NaN and raise INVALID.
    pub fn from_extended_decimal(
        value: &ExtendedDecimal,
        powers: &RadixPowers,
        ctx: &PrecisionContext,
    ) -> RadixResult<ExtendedFloat> {
        let math = FullRadixMath::new(BinaryHelper);
        if !value.is_finite() {
            let special = Self::from_parts(value.unsigned_mantissa().clone(), BigInt::zero(), value.flags());
            return math.round_after_conversion(&special, ctx);
        }
        let flags = value.flags();
        let exponent = value.exponent();
        if !exponent.is_negative() {
            let scaled = value.unsigned_mantissa() * powers.find_power_of_ten_big(exponent)?;
            return math.round_after_conversion(&Self::from_parts(scaled, BigInt::zero(), flags), ctx);
        }
        // m * 10^-k == (m * 2^-k) / 5^k
        let k = -exponent;
        let numerator = Self::from_parts(value.unsigned_mantissa().clone(), exponent.clone(), flags);
        let denominator = Self::from_parts(powers.find_power_of_five_big(&k)?, BigInt::zero(), NumberFlags::empty());
        math.divide(&numerator, &denominator, ctx)
    }
}

impl Default for ExtendedFloat {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for ExtendedFloat {
    fn from(n: i64) -> Self {
        Self::new(BigInt::from(n), 0)
    }
}

impl fmt::Display for ExtendedFloat {
    /// `mantissa*2^exponent`, or the special value's name
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        if self.is_nan() {
            let name = if self.is_signaling_nan() { "sNaN" } else { "NaN" };
            if !self.mantissa.is_zero() {
                return write!(f, "{}{}{}", sign, name, self.mantissa);
            }
            return write!(f, "{}{}", sign, name);
        }
        if self.is_infinite() {
            return write!(f, "{}Infinity", sign);
        }
        write!(f, "{}{}*2^{}", sign, self.mantissa, self.exponent)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::{Flags, Rounding};
    use paste::paste;

    macro_rules! impl_case {
        ($name:ident: $f:literal => $m:literal * 2^ $e:literal) => {
            paste! {
                #[test]
                fn [< from_f64_ $name >]() {
                    let x = ExtendedFloat::from_f64($f);
                    assert_eq!(x.mantissa(), BigInt::from($m));
                    assert_eq!(x.exponent(), &BigInt::from($e));
                    assert_eq!(x.to_f64().unwrap(), $f);
                }
            }
        };
    }

    impl_case!(one: 1.0 => 1 * 2^0);
    impl_case!(half: 0.5 => 1 * 2^-1);
    impl_case!(three: 3.0 => 3 * 2^0);
    impl_case!(negative: -6.0 => -3 * 2^1);
    impl_case!(tenth: 0.1 => 3602879701896397i64 * 2^-55);
    impl_case!(max: 1.7976931348623157e308 => 9007199254740991i64 * 2^971);
    impl_case!(min_positive: 5e-324 => 1 * 2^-1074);
    impl_case!(subnormal: 2.2250738585072009e-308 => 4503599627370495i64 * 2^-1074);

    #[test]
    fn special_values() {
        assert!(ExtendedFloat::from_f64(f64::NAN).is_nan());
        assert_eq!(ExtendedFloat::from_f64(f64::INFINITY), ExtendedFloat::infinity());
        assert_eq!(ExtendedFloat::from_f64(f64::NEG_INFINITY), ExtendedFloat::negative_infinity());

        let negative_zero = ExtendedFloat::from_f64(-0.0);
        assert!(negative_zero.is_zero() && negative_zero.is_negative());
        let back = negative_zero.to_f64().unwrap();
        assert!(back == 0.0 && back.is_sign_negative());

        assert!(ExtendedFloat::nan().to_f64().unwrap().is_nan());
        assert_eq!(ExtendedFloat::negative_infinity().to_f64().unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn to_f64_rounds_half_even() {
        // 2^53 + 1 is a tie between 2^53 and 2^53 + 2
        let x = ExtendedFloat::new(BigInt::from(9007199254740993i64), 0);
        assert_eq!(x.to_f64().unwrap(), 9007199254740992.0);
        let x = ExtendedFloat::new(BigInt::from(9007199254740995i64), 0);
        assert_eq!(x.to_f64().unwrap(), 9007199254740996.0);
    }

    #[test]
    fn to_f64_out_of_range() {
        let huge = ExtendedFloat::new(BigInt::from(1), 1024);
        assert!(matches!(huge.to_f64(), Err(ArithmeticError::Overflow(_))));

        let tiny = ExtendedFloat::new(BigInt::from(1), -1076);
        assert_eq!(tiny.to_f64().unwrap(), 0.0);
        let almost_tiny = ExtendedFloat::new(BigInt::from(3), -1076);
        assert_eq!(almost_tiny.to_f64().unwrap(), 5e-324);
    }

    #[test]
    fn from_extended_decimal() {
        let powers = RadixPowers::new();
        let ctx = PrecisionContext::binary64();

        let tenth: ExtendedDecimal = "0.1".parse().unwrap();
        let result = ExtendedFloat::from_extended_decimal(&tenth, &powers, &ctx).unwrap();
        assert_eq!(result.value.to_f64().unwrap(), 0.1);
        assert!(result.status.contains(Flags::INEXACT));

        let exact: ExtendedDecimal = "-2.5E+2".parse().unwrap();
        let result = ExtendedFloat::from_extended_decimal(&exact, &powers, &ctx).unwrap();
        assert_eq!(result.value.to_f64().unwrap(), -250.0);
        assert!(result.status.is_empty());

        let unlimited = PrecisionContext::for_rounding(Rounding::HalfEven);
        let result = ExtendedFloat::from_extended_decimal(&tenth, &powers, &unlimited).unwrap();
        assert!(result.value.is_nan());
        assert!(result.status.contains(Flags::INVALID));
    }
}
