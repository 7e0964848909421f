//! Simplified engine and the dispatcher choosing between engines
//!
//! [`SimpleRadixMath`] answers exactly as [`FullRadixMath`] does, taking
//! a shorter route when both operands of an addition or multiplication
//! are finite with mantissas of at most 64 bits. Contexts with
//! [`PrecisionContext::is_simplified`] set are routed to it by
//! [`ExtendedOrSimpleRadixMath`].

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;

use crate::helper::RadixHelper;
use crate::radix_math::{FullRadixMath, RadixMath, RadixResult, Value};
use crate::{Flags, PrecisionContext};


/// Engine with shortcuts for operands with small mantissas
#[derive(Clone, Debug, Default)]
pub struct SimpleRadixMath<H> {
    full: FullRadixMath<H>,
}

impl<H: RadixHelper> SimpleRadixMath<H> {
    pub fn new(helper: H) -> Self {
        SimpleRadixMath {
            full: FullRadixMath::new(helper),
        }
    }

    /// The engine handling everything without a shortcut
    pub fn full(&self) -> &FullRadixMath<H> {
        &self.full
    }

    /// Signed mantissa of a finite nonzero value fitting 64 bits
    fn small_mantissa(v: &Value) -> Option<i128> {
        if !v.is_finite() || v.is_zero() {
            return None;
        }
        let m = i128::from(v.mantissa.to_u64()?);
        Some(if v.is_negative() { -m } else { m })
    }

    /// Exact a + b, for small operands with equal exponents
    ///
    /// A zero sum is left to the full engine, as its sign depends on
    /// the rounding mode.
    fn small_sum(a: &Value, b: &Value) -> Option<Value> {
        if a.exponent != b.exponent {
            return None;
        }
        let sum = Self::small_mantissa(a)? + Self::small_mantissa(b)?;
        if sum == 0 {
            return None;
        }
        Some(Value::finite(sum < 0, BigUint::from(sum.unsigned_abs()), a.exponent.clone()))
    }

    /// Exact a * b, for small operands
    fn small_product(a: &Value, b: &Value) -> Option<Value> {
        let product = Self::small_mantissa(a)?.checked_mul(Self::small_mantissa(b)?)?;
        Some(Value::finite(product < 0, BigUint::from(product.unsigned_abs()), &a.exponent + &b.exponent))
    }

    fn round_exact(&self, exact: Value, ctx: &PrecisionContext) -> RadixResult<H::Number> {
        let mut flags = Flags::empty();
        let value = self.full.round_value(&exact, ctx, &mut flags)?;
        self.full.finish(value, flags, ctx)
    }
}

impl<H: RadixHelper> RadixMath<H::Number> for SimpleRadixMath<H> {
    fn add(&self, a: &H::Number, b: &H::Number, ctx: &PrecisionContext) -> RadixResult<H::Number> {
        match Self::small_sum(&self.full.load(a), &self.full.load(b)) {
            Some(exact) => self.round_exact(exact, ctx),
            None => self.full.add(a, b, ctx),
        }
    }

    fn subtract(&self, a: &H::Number, b: &H::Number, ctx: &PrecisionContext) -> RadixResult<H::Number> {
        match Self::small_sum(&self.full.load(a), &self.full.load(b).negated()) {
            Some(exact) => self.round_exact(exact, ctx),
            None => self.full.subtract(a, b, ctx),
        }
    }

    fn multiply(&self, a: &H::Number, b: &H::Number, ctx: &PrecisionContext) -> RadixResult<H::Number> {
        match Self::small_product(&self.full.load(a), &self.full.load(b)) {
            Some(exact) => self.round_exact(exact, ctx),
            None => self.full.multiply(a, b, ctx),
        }
    }

    fn compare_to(&self, a: &H::Number, b: &H::Number) -> Ordering {
        self.full.compare_to(a, b)
    }

    forward_radix_math! { full;
        fn multiply_and_add(a: &H::Number, b: &H::Number, c: &H::Number);
        fn divide(a: &H::Number, b: &H::Number);
        fn divide_to_exponent(a: &H::Number, b: &H::Number, exponent: &BigInt);
        fn divide_to_integer_natural_scale(a: &H::Number, b: &H::Number);
        fn divide_to_integer_zero_scale(a: &H::Number, b: &H::Number);
        fn remainder(a: &H::Number, b: &H::Number);
        fn remainder_near(a: &H::Number, b: &H::Number);
        fn compare_to_with_context(a: &H::Number, b: &H::Number, treat_quiet_nan_as_signaling: bool);
        fn round_to_precision(a: &H::Number);
        fn round_to_binary_precision(a: &H::Number);
        fn round_after_conversion(a: &H::Number);
        fn quantize(a: &H::Number, b: &H::Number);
        fn round_to_exponent_exact(a: &H::Number, exponent: &BigInt);
        fn round_to_exponent_simple(a: &H::Number, exponent: &BigInt);
        fn round_to_exponent_no_rounded_flag(a: &H::Number, exponent: &BigInt);
        fn reduce(a: &H::Number);
        fn plus(a: &H::Number);
        fn min(a: &H::Number, b: &H::Number);
        fn max(a: &H::Number, b: &H::Number);
        fn min_magnitude(a: &H::Number, b: &H::Number);
        fn max_magnitude(a: &H::Number, b: &H::Number);
        fn abs(a: &H::Number);
        fn negate(a: &H::Number);
        fn power(a: &H::Number, b: &H::Number);
        fn log10(a: &H::Number);
        fn ln(a: &H::Number);
        fn exp(a: &H::Number);
        fn square_root(a: &H::Number);
        fn pi();
        fn next_plus(a: &H::Number);
        fn next_minus(a: &H::Number);
        fn next_toward(a: &H::Number, b: &H::Number);
    }
}


/// Engine routing each operation by [`PrecisionContext::is_simplified`]
#[derive(Clone, Debug, Default)]
pub struct ExtendedOrSimpleRadixMath<H> {
    simple: SimpleRadixMath<H>,
}

impl<H: RadixHelper> ExtendedOrSimpleRadixMath<H> {
    pub fn new(helper: H) -> Self {
        ExtendedOrSimpleRadixMath {
            simple: SimpleRadixMath::new(helper),
        }
    }

    pub fn simple(&self) -> &SimpleRadixMath<H> {
        &self.simple
    }

    pub fn full(&self) -> &FullRadixMath<H> {
        self.simple.full()
    }

    pub fn helper(&self) -> &H {
        self.simple.full().helper()
    }
}

impl<H: RadixHelper> RadixMath<H::Number> for ExtendedOrSimpleRadixMath<H> {
    fn compare_to(&self, a: &H::Number, b: &H::Number) -> Ordering {
        self.simple.full().compare_to(a, b)
    }

    dispatch_radix_math! {
        fn add(a: &H::Number, b: &H::Number);
        fn subtract(a: &H::Number, b: &H::Number);
        fn multiply(a: &H::Number, b: &H::Number);
        fn multiply_and_add(a: &H::Number, b: &H::Number, c: &H::Number);
        fn divide(a: &H::Number, b: &H::Number);
        fn divide_to_exponent(a: &H::Number, b: &H::Number, exponent: &BigInt);
        fn divide_to_integer_natural_scale(a: &H::Number, b: &H::Number);
        fn divide_to_integer_zero_scale(a: &H::Number, b: &H::Number);
        fn remainder(a: &H::Number, b: &H::Number);
        fn remainder_near(a: &H::Number, b: &H::Number);
        fn compare_to_with_context(a: &H::Number, b: &H::Number, treat_quiet_nan_as_signaling: bool);
        fn round_to_precision(a: &H::Number);
        fn round_to_binary_precision(a: &H::Number);
        fn round_after_conversion(a: &H::Number);
        fn quantize(a: &H::Number, b: &H::Number);
        fn round_to_exponent_exact(a: &H::Number, exponent: &BigInt);
        fn round_to_exponent_simple(a: &H::Number, exponent: &BigInt);
        fn round_to_exponent_no_rounded_flag(a: &H::Number, exponent: &BigInt);
        fn reduce(a: &H::Number);
        fn plus(a: &H::Number);
        fn min(a: &H::Number, b: &H::Number);
        fn max(a: &H::Number, b: &H::Number);
        fn min_magnitude(a: &H::Number, b: &H::Number);
        fn max_magnitude(a: &H::Number, b: &H::Number);
        fn abs(a: &H::Number);
        fn negate(a: &H::Number);
        fn power(a: &H::Number, b: &H::Number);
        fn log10(a: &H::Number);
        fn ln(a: &H::Number);
        fn exp(a: &H::Number);
        fn square_root(a: &H::Number);
        fn pi();
        fn next_plus(a: &H::Number);
        fn next_minus(a: &H::Number);
        fn next_toward(a: &H::Number, b: &H::Number);
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::{DecimalHelper, ExtendedDecimal, Rounding};
    use paste::paste;

    fn dec(s: &str) -> ExtendedDecimal {
        s.parse().unwrap()
    }

    /// Both routes agree on value and status
    fn assert_same_routes(op: fn(&dyn RadixMath<ExtendedDecimal>, &ExtendedDecimal, &ExtendedDecimal, &PrecisionContext) -> RadixResult<ExtendedDecimal>, a: &str, b: &str, ctx: &PrecisionContext) {
        let math = ExtendedOrSimpleRadixMath::new(DecimalHelper::default());
        let (a, b) = (dec(a), dec(b));
        let full = op(&math, &a, &b, ctx).unwrap();
        let simple = op(&math, &a, &b, &ctx.clone().with_simplified(true)).unwrap();
        assert_eq!(full.value.to_string(), simple.value.to_string());
        assert_eq!(full.status, simple.status);
    }

    macro_rules! impl_case {
        ($name:ident: $op:ident($a:literal, $b:literal) @ $precision:literal) => {
            paste! {
                #[test]
                fn [< case_ $name >]() {
                    let ctx = PrecisionContext::for_precision_and_rounding($precision, Rounding::HalfEven)
                        .with_exponent_range(-20, 20)
                        .unwrap();
                    assert_same_routes(|m, a, b, c| m.$op(a, b, c), $a, $b, &ctx);
                }
            }
        };
    }

    impl_case!(add_exact: add("1.25", "3.50") @ 9);
    impl_case!(add_rounded: add("99999", "1") @ 3);
    impl_case!(add_cancels: add("2.5", "-2.5") @ 9);
    impl_case!(add_unequal_exponents: add("1E+5", "7") @ 9);
    impl_case!(subtract_rounded: subtract("123456", "0.000001") @ 4);
    impl_case!(subtract_negative: subtract("-4", "3") @ 9);
    impl_case!(multiply_exact: multiply("1.5", "-1.5") @ 9);
    impl_case!(multiply_rounded: multiply("12345", "6789") @ 5);
    impl_case!(multiply_overflow: multiply("9E+15", "9E+15") @ 5);
    impl_case!(multiply_subnormal: multiply("1E-15", "3E-15") @ 5);
    impl_case!(multiply_large: multiply("98765432109876543210", "3") @ 30);
    impl_case!(divide_third: divide("1", "3") @ 7);

    #[test]
    fn dispatcher_uses_full_engine_without_simplified_flag() {
        let math = ExtendedOrSimpleRadixMath::new(DecimalHelper::default());
        let ctx = PrecisionContext::for_precision(3);
        let result = math.add(&dec("1.23"), &dec("4.56"), &ctx).unwrap();
        assert_eq!(result.value.to_string(), "5.79");
        assert!(result.status.is_empty());
        assert_eq!(math.compare_to(&dec("1.0"), &dec("1")), Ordering::Equal);
    }
}
