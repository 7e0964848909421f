//! Radix helpers
//!
//! The engine never touches a number type directly; a [`RadixHelper`]
//! takes numbers apart into (flags, mantissa, exponent) and builds new
//! ones, and supplies everything that depends on the radix: shift
//! accumulators, powers, digit counting.

use std::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::powers::{bit_length, count_trailing_zero_bits, two_to_the};
use crate::shift_accumulator::{BitShiftAccumulator, DigitShiftAccumulator, ShiftAccumulator};
use crate::{ArithmeticError, ExtendedDecimal, ExtendedFloat, FastInteger, RadixPowers};


bitflags::bitflags! {
    /// Sign and special-value flags of a number
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct NumberFlags: u32 {
        const NEGATIVE = 1;
        const INFINITY = 2;
        const QUIET_NAN = 4;
        const SIGNALING_NAN = 8;

        const NAN = Self::QUIET_NAN.bits() | Self::SIGNALING_NAN.bits();
        const SPECIAL = Self::INFINITY.bits() | Self::NAN.bits();
    }
}


/// Radix-specific operations over a number type
///
/// Numbers are `(flags, mantissa, exponent)` triples with value
/// `(-1)^negative * mantissa * radix^exponent`. For NaNs the mantissa
/// holds the diagnostic payload, and for infinities it is zero.
pub trait RadixHelper {
    type Number: Clone + fmt::Debug;
    type Accumulator: ShiftAccumulator + Clone;

    fn radix(&self) -> u32;

    fn flags(&self, value: &Self::Number) -> NumberFlags;

    fn mantissa<'a>(&self, value: &'a Self::Number) -> &'a BigUint;

    fn exponent<'a>(&self, value: &'a Self::Number) -> &'a BigInt;

    /// -1, 0 or 1; zero only for finite zeros
    fn sign(&self, value: &Self::Number) -> i32 {
        let flags = self.flags(value);
        if !flags.intersects(NumberFlags::SPECIAL) && self.mantissa(value).is_zero() {
            0
        } else if flags.contains(NumberFlags::NEGATIVE) {
            -1
        } else {
            1
        }
    }

    fn create_new_with_flags(
        &self,
        mantissa: BigUint,
        exponent: BigInt,
        flags: NumberFlags,
    ) -> Self::Number;

    fn create_shift_accumulator(&self, n: &BigUint) -> Self::Accumulator {
        self.create_shift_accumulator_with_digits(n, 0, false)
    }

    /// Accumulator over `n`, seeded with the digits discarded before `n`
    fn create_shift_accumulator_with_digits(
        &self,
        n: &BigUint,
        last_discarded: u32,
        older_discarded: bool,
    ) -> Self::Accumulator;

    /// True if num/den has a finite expansion in this radix
    fn has_terminating_radix_expansion(&self, num: &BigUint, den: &BigUint) -> bool;

    /// n * radix^power; non-positive powers return n unchanged
    fn multiply_by_radix_power(&self, n: &BigUint, power: &FastInteger) -> Result<BigUint, ArithmeticError>;

    fn radix_power(&self, n: u64) -> BigUint;

    /// Number of radix digits in n (1 for zero)
    fn digit_length(&self, n: &BigUint) -> u64;

    fn value_of(&self, n: i64) -> Self::Number {
        let flags = if n < 0 { NumberFlags::NEGATIVE } else { NumberFlags::empty() };
        self.create_new_with_flags(BigUint::from(n.unsigned_abs()), BigInt::zero(), flags)
    }
}

fn power_too_large(power: &FastInteger) -> ArithmeticError {
    ArithmeticError::invalid_argument(format!("radix power {} is too large", power))
}


/// Helper for [`ExtendedDecimal`]
#[derive(Clone, Debug)]
pub struct DecimalHelper {
    powers: Arc<RadixPowers>,
}

impl DecimalHelper {
    pub fn new(powers: Arc<RadixPowers>) -> Self {
        DecimalHelper { powers }
    }

    pub fn powers(&self) -> &Arc<RadixPowers> {
        &self.powers
    }
}

impl Default for DecimalHelper {
    fn default() -> Self {
        Self::new(Arc::new(RadixPowers::new()))
    }
}

impl RadixHelper for DecimalHelper {
    type Number = ExtendedDecimal;
    type Accumulator = DigitShiftAccumulator;

    fn radix(&self) -> u32 {
        10
    }

    fn flags(&self, value: &ExtendedDecimal) -> NumberFlags {
        value.flags()
    }

    fn mantissa<'a>(&self, value: &'a ExtendedDecimal) -> &'a BigUint {
        value.unsigned_mantissa()
    }

    fn exponent<'a>(&self, value: &'a ExtendedDecimal) -> &'a BigInt {
        value.exponent()
    }

    fn create_new_with_flags(&self, mantissa: BigUint, exponent: BigInt, flags: NumberFlags) -> ExtendedDecimal {
        ExtendedDecimal::from_parts(mantissa, exponent, flags)
    }

    fn create_shift_accumulator_with_digits(
        &self,
        n: &BigUint,
        last_discarded: u32,
        older_discarded: bool,
    ) -> DigitShiftAccumulator {
        DigitShiftAccumulator::with_discarded(n, last_discarded, older_discarded, self.powers.clone())
    }

    fn has_terminating_radix_expansion(&self, num: &BigUint, den: &BigUint) -> bool {
        if num.is_zero() {
            return true;
        }
        let g = num.gcd(den);
        let mut den = den / g;
        // strip factors of 2 then of 5; anything left does not divide 10^k
        let twos = count_trailing_zero_bits(&den);
        den >>= twos as usize;
        let five = BigUint::from(5u8);
        loop {
            let (q, r) = den.div_rem(&five);
            if !r.is_zero() {
                break;
            }
            den = q;
        }
        den.is_one()
    }

    fn multiply_by_radix_power(&self, n: &BigUint, power: &FastInteger) -> Result<BigUint, ArithmeticError> {
        if power.sign() <= 0 || n.is_zero() {
            return Ok(n.clone());
        }
        let exp = power.to_u64().ok_or_else(|| power_too_large(power))?;
        Ok(n * self.powers.ten_to_the(exp))
    }

    fn radix_power(&self, n: u64) -> BigUint {
        self.powers.ten_to_the(n)
    }

    fn digit_length(&self, n: &BigUint) -> u64 {
        self.powers.count_decimal_digits(n)
    }
}


/// Helper for [`ExtendedFloat`]
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryHelper;

impl RadixHelper for BinaryHelper {
    type Number = ExtendedFloat;
    type Accumulator = BitShiftAccumulator;

    fn radix(&self) -> u32 {
        2
    }

    fn flags(&self, value: &ExtendedFloat) -> NumberFlags {
        value.flags()
    }

    fn mantissa<'a>(&self, value: &'a ExtendedFloat) -> &'a BigUint {
        value.unsigned_mantissa()
    }

    fn exponent<'a>(&self, value: &'a ExtendedFloat) -> &'a BigInt {
        value.exponent()
    }

    fn create_new_with_flags(&self, mantissa: BigUint, exponent: BigInt, flags: NumberFlags) -> ExtendedFloat {
        ExtendedFloat::from_parts(mantissa, exponent, flags)
    }

    fn create_shift_accumulator_with_digits(
        &self,
        n: &BigUint,
        last_discarded: u32,
        older_discarded: bool,
    ) -> BitShiftAccumulator {
        BitShiftAccumulator::with_discarded(n, last_discarded, older_discarded)
    }

    fn has_terminating_radix_expansion(&self, num: &BigUint, den: &BigUint) -> bool {
        if num.is_zero() {
            return true;
        }
        let den = den / num.gcd(den);
        // a power of two has exactly one bit set
        den.count_ones() == 1
    }

    fn multiply_by_radix_power(&self, n: &BigUint, power: &FastInteger) -> Result<BigUint, ArithmeticError> {
        if power.sign() <= 0 || n.is_zero() {
            return Ok(n.clone());
        }
        let shift = power.to_u64()
                         .and_then(|p| usize::try_from(p).ok())
                         .ok_or_else(|| power_too_large(power))?;
        Ok(n << shift)
    }

    fn radix_power(&self, n: u64) -> BigUint {
        two_to_the(n)
    }

    fn digit_length(&self, n: &BigUint) -> u64 {
        bit_length(n)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_terminating_decimal_expansion() {
        let h = DecimalHelper::default();
        let t = |n: u32, d: u32| h.has_terminating_radix_expansion(&BigUint::from(n), &BigUint::from(d));
        assert!(t(1, 8));
        assert!(t(1, 80));
        assert!(t(3, 3));
        assert!(t(6, 12));
        assert!(!t(1, 3));
        assert!(!t(1, 14));
        assert!(t(7, 14));
        assert!(t(0, 7));
    }

    #[test]
    fn test_terminating_binary_expansion() {
        let h = BinaryHelper;
        let t = |n: u32, d: u32| h.has_terminating_radix_expansion(&BigUint::from(n), &BigUint::from(d));
        assert!(t(1, 8));
        assert!(t(5, 10));
        assert!(!t(1, 10));
        assert!(!t(1, 5));
    }

    #[test]
    fn test_multiply_by_radix_power() {
        let h = DecimalHelper::default();
        let n = BigUint::from(12u32);
        assert_eq!(h.multiply_by_radix_power(&n, &FastInteger::new(3)).unwrap(), BigUint::from(12000u32));
        assert_eq!(h.multiply_by_radix_power(&n, &FastInteger::new(-3)).unwrap(), n);

        let mut huge = FastInteger::new(i64::MAX);
        huge.multiply_int(3);
        assert!(h.multiply_by_radix_power(&n, &huge).is_err());

        assert_eq!(BinaryHelper.multiply_by_radix_power(&n, &FastInteger::new(4)).unwrap(), BigUint::from(192u32));
    }

    #[test]
    fn test_digit_length() {
        let h = DecimalHelper::default();
        assert_eq!(h.digit_length(&BigUint::zero()), 1);
        assert_eq!(h.digit_length(&BigUint::from(99999u32)), 5);
        assert_eq!(BinaryHelper.digit_length(&BigUint::from(8u32)), 4);
        assert_eq!(BinaryHelper.digit_length(&BigUint::zero()), 1);
    }

    #[test]
    fn test_value_of_and_sign() {
        let h = DecimalHelper::default();
        let n = h.value_of(-42);
        assert_eq!(h.sign(&n), -1);
        assert_eq!(h.mantissa(&n), &BigUint::from(42u32));
        assert_eq!(h.sign(&h.value_of(0)), 0);
        assert_eq!(BinaryHelper.sign(&BinaryHelper.value_of(7)), 1);
    }
}
