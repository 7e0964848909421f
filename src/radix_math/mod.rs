//! The radix arithmetic engine
//!
//! [`FullRadixMath`] implements every operation of [`RadixMath`] for any
//! number type that has a [`RadixHelper`], following the General Decimal
//! Arithmetic rules for special values, exponents and status flags.
//!
//! Internally, operands are taken apart into a [`Value`], and each
//! operation accumulates its status into a `&mut Flags`. The public
//! methods convert the final value back and check it against the
//! context's traps.

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::helper::{NumberFlags, RadixHelper};
use crate::{Flags, PrecisionContext, RadixError, StatusAnd, TrapError};

mod arith;
mod compare;
mod next;
mod power;
mod round;
mod transcendental;

pub(crate) use self::round::Limit;


/// Result of an engine operation
pub type RadixResult<T> = Result<StatusAnd<T>, RadixError<T>>;


/// Arithmetic over numbers of type `T`
///
/// Every operation is governed by a [`PrecisionContext`]. Results that
/// need rounding are rounded once, from the exact result, according to
/// the context's rounding mode. Conditions such as inexactness or
/// overflow are reported in the returned status; they are errors only
/// when the context traps them.
///
/// Operations that have no defined result (`0/0`, `Infinity - Infinity`,
/// an inexact result with unlimited precision, ...) return NaN and raise
/// [`Flags::INVALID`]. Signaling NaN operands always raise
/// [`Flags::INVALID`] and are returned quieted.
///
pub trait RadixMath<T> {
    fn add(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn subtract(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn multiply(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// a * b + c, rounded once
    fn multiply_and_add(&self, a: &T, b: &T, c: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// a / b
    ///
    /// With unlimited precision, the result must have a terminating
    /// expansion in the radix, otherwise the result is NaN.
    fn divide(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// a / b, rounded to a number with the given exponent
    fn divide_to_exponent(&self, a: &T, b: &T, exponent: &BigInt, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Integer part of a / b, with trailing zeros removed up to the
    /// ideal exponent (exponent of a minus exponent of b)
    fn divide_to_integer_natural_scale(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Integer part of a / b, with exponent zero
    fn divide_to_integer_zero_scale(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// a - b * trunc(a / b)
    fn remainder(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// a - b * n, where n is a / b rounded half-even
    fn remainder_near(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Numeric comparison; NaN compares greater than everything, and
    /// equal to other NaNs
    fn compare_to(&self, a: &T, b: &T) -> Ordering;

    /// Comparison returning -1, 0 or 1 as a number, or NaN if either
    /// operand is NaN
    fn compare_to_with_context(
        &self,
        a: &T,
        b: &T,
        treat_quiet_nan_as_signaling: bool,
        ctx: &PrecisionContext,
    ) -> RadixResult<T>;

    fn round_to_precision(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Round treating the context's precision as a count of bits
    fn round_to_binary_precision(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Round a freshly converted value
    fn round_after_conversion(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Round `a` to the exponent of `b`
    fn quantize(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Round to exactly the given exponent with the context's rounding
    ///
    /// Raises INEXACT and ROUNDED when nonzero digits are lost. The result
    /// is NaN with INVALID only if it needs more digits than the precision.
    fn round_to_exponent_exact(&self, a: &T, exponent: &BigInt, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Round to at least the given exponent, and to the context's precision
    fn round_to_exponent_simple(&self, a: &T, exponent: &BigInt, ctx: &PrecisionContext) -> RadixResult<T>;

    /// As [`round_to_exponent_simple`](Self::round_to_exponent_simple),
    /// never raising INEXACT or ROUNDED
    fn round_to_exponent_no_rounded_flag(&self, a: &T, exponent: &BigInt, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Round, then remove trailing zeros
    fn reduce(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// 0 + a
    fn plus(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn min(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn max(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn min_magnitude(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn max_magnitude(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn abs(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn negate(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// a raised to the power b
    fn power(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn log10(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Natural logarithm
    fn ln(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn exp(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    fn square_root(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// π to the context's precision
    fn pi(&self, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Smallest representable number greater than a
    fn next_plus(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Largest representable number less than a
    fn next_minus(&self, a: &T, ctx: &PrecisionContext) -> RadixResult<T>;

    /// Representable number closest to a in the direction of b
    fn next_toward(&self, a: &T, b: &T, ctx: &PrecisionContext) -> RadixResult<T>;
}


/// A number taken apart
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Value {
    pub(crate) flags: NumberFlags,
    pub(crate) mantissa: BigUint,
    pub(crate) exponent: BigInt,
}

impl Value {
    pub(crate) fn finite(negative: bool, mantissa: BigUint, exponent: BigInt) -> Self {
        Value {
            flags: sign_flag(negative),
            mantissa: mantissa,
            exponent: exponent,
        }
    }

    pub(crate) fn zero(negative: bool, exponent: BigInt) -> Self {
        Self::finite(negative, BigUint::zero(), exponent)
    }

    pub(crate) fn one() -> Self {
        Self::finite(false, BigUint::from(1u8), BigInt::zero())
    }

    pub(crate) fn infinity(negative: bool) -> Self {
        Value {
            flags: sign_flag(negative) | NumberFlags::INFINITY,
            mantissa: BigUint::zero(),
            exponent: BigInt::zero(),
        }
    }

    pub(crate) fn nan() -> Self {
        Value {
            flags: NumberFlags::QUIET_NAN,
            mantissa: BigUint::zero(),
            exponent: BigInt::zero(),
        }
    }

    pub(crate) fn is_negative(&self) -> bool {
        self.flags.contains(NumberFlags::NEGATIVE)
    }

    pub(crate) fn is_nan(&self) -> bool {
        self.flags.intersects(NumberFlags::NAN)
    }

    pub(crate) fn is_signaling_nan(&self) -> bool {
        self.flags.contains(NumberFlags::SIGNALING_NAN)
    }

    pub(crate) fn is_quiet_nan(&self) -> bool {
        self.flags.contains(NumberFlags::QUIET_NAN)
    }

    pub(crate) fn is_infinite(&self) -> bool {
        self.flags.contains(NumberFlags::INFINITY)
    }

    pub(crate) fn is_finite(&self) -> bool {
        !self.flags.intersects(NumberFlags::SPECIAL)
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.is_finite() && self.mantissa.is_zero()
    }

    /// Quiet NaN keeping this NaN's sign and payload
    pub(crate) fn quieted(&self) -> Self {
        Value {
            flags: (self.flags & NumberFlags::NEGATIVE) | NumberFlags::QUIET_NAN,
            mantissa: self.mantissa.clone(),
            exponent: BigInt::zero(),
        }
    }

    pub(crate) fn negated(&self) -> Self {
        let mut result = self.clone();
        result.flags.toggle(NumberFlags::NEGATIVE);
        result
    }

    pub(crate) fn with_sign(mut self, negative: bool) -> Self {
        self.flags.set(NumberFlags::NEGATIVE, negative);
        self
    }
}

pub(crate) fn sign_flag(negative: bool) -> NumberFlags {
    if negative {
        NumberFlags::NEGATIVE
    } else {
        NumberFlags::empty()
    }
}


/// Engine implementing every operation in full generality
#[derive(Clone, Debug, Default)]
pub struct FullRadixMath<H> {
    helper: H,
}

impl<H: RadixHelper> FullRadixMath<H> {
    pub fn new(helper: H) -> Self {
        FullRadixMath { helper }
    }

    pub fn helper(&self) -> &H {
        &self.helper
    }

    pub(crate) fn radix(&self) -> u32 {
        self.helper.radix()
    }

    /// Number of radix digits of n (1 for zero)
    pub(crate) fn digits(&self, n: &BigUint) -> u64 {
        self.helper.digit_length(n)
    }

    pub(crate) fn load(&self, x: &H::Number) -> Value {
        Value {
            flags: self.helper.flags(x),
            mantissa: self.helper.mantissa(x).clone(),
            exponent: self.helper.exponent(x).clone(),
        }
    }

    pub(crate) fn store(&self, v: Value) -> H::Number {
        self.helper.create_new_with_flags(v.mantissa, v.exponent, v.flags)
    }

    /// Build the result, raising a trap if any of `flags` is trapped
    pub(crate) fn finish(&self, v: Value, flags: Flags, ctx: &PrecisionContext) -> RadixResult<H::Number> {
        let value = self.store(v);
        let trapped = flags & ctx.traps();
        if !trapped.is_empty() {
            tracing::debug!(?trapped, "operation raised trapped condition");
            return Err(RadixError::Trap(TrapError::new(trapped, ctx.clone(), value)));
        }
        Ok(StatusAnd::new(flags, value))
    }

    /// Quiet NaN result of an invalid operation
    pub(crate) fn invalid(&self, flags: &mut Flags) -> Value {
        *flags |= Flags::INVALID;
        Value::nan()
    }

    /// Propagate NaN operands: signaling NaNs first, then quiet NaNs,
    /// each in operand order
    pub(crate) fn handle_nans(&self, operands: &[&Value], flags: &mut Flags) -> Option<Value> {
        if let Some(snan) = operands.iter().find(|v| v.is_signaling_nan()) {
            *flags |= Flags::INVALID;
            return Some(snan.quieted());
        }
        operands.iter().find(|v| v.is_quiet_nan()).map(|v| (*v).clone())
    }
}


impl<H: RadixHelper> RadixMath<H::Number> for FullRadixMath<H> {
    impl_full_op!(add => add_internal(a, b));
    impl_full_op!(subtract => subtract_internal(a, b));
    impl_full_op!(multiply => multiply_internal(a, b));
    impl_full_op!(multiply_and_add => multiply_and_add_internal(a, b, c));
    impl_full_op!(divide => divide_internal(a, b));
    impl_full_op!(divide_to_exponent => divide_to_exponent_internal(a, b; exponent));
    impl_full_op!(divide_to_integer_natural_scale => divide_to_integer_natural_scale_internal(a, b));
    impl_full_op!(divide_to_integer_zero_scale => divide_to_integer_zero_scale_internal(a, b));
    impl_full_op!(remainder => remainder_internal(a, b));
    impl_full_op!(remainder_near => remainder_near_internal(a, b));

    fn compare_to(&self, a: &H::Number, b: &H::Number) -> Ordering {
        self.compare_values(&self.load(a), &self.load(b))
    }

    fn compare_to_with_context(
        &self,
        a: &H::Number,
        b: &H::Number,
        treat_quiet_nan_as_signaling: bool,
        ctx: &PrecisionContext,
    ) -> RadixResult<H::Number> {
        let mut flags = Flags::empty();
        let value = self.compare_with_context_internal(
            &self.load(a), &self.load(b), treat_quiet_nan_as_signaling, &mut flags
        );
        self.finish(value, flags, ctx)
    }

    impl_full_op!(round_to_precision => round_to_precision_internal(a));
    impl_full_op!(round_to_binary_precision => round_to_binary_precision_internal(a));
    impl_full_op!(round_after_conversion => round_to_precision_internal(a));
    impl_full_op!(quantize => quantize_internal(a, b));
    impl_full_op!(round_to_exponent_exact => round_to_exponent_exact_internal(a; exponent));
    impl_full_op!(round_to_exponent_simple => round_to_exponent_simple_internal(a; exponent));
    impl_full_op!(round_to_exponent_no_rounded_flag => round_to_exponent_no_rounded_flag_internal(a; exponent));
    impl_full_op!(reduce => reduce_internal(a));
    impl_full_op!(plus => plus_internal(a));
    impl_full_op!(min => min_internal(a, b));
    impl_full_op!(max => max_internal(a, b));
    impl_full_op!(min_magnitude => min_magnitude_internal(a, b));
    impl_full_op!(max_magnitude => max_magnitude_internal(a, b));
    impl_full_op!(abs => abs_internal(a));
    impl_full_op!(negate => negate_internal(a));
    impl_full_op!(power => power_internal(a, b));
    impl_full_op!(log10 => log10_internal(a));
    impl_full_op!(ln => ln_internal(a));
    impl_full_op!(exp => exp_internal(a));
    impl_full_op!(square_root => square_root_internal(a));
    impl_full_op!(pi => pi_internal());
    impl_full_op!(next_plus => next_plus_internal(a));
    impl_full_op!(next_minus => next_minus_internal(a));
    impl_full_op!(next_toward => next_toward_internal(a, b));
}


#[cfg(test)]
mod test_helpers;

#[cfg(test)]
mod test {
    use super::*;
    use super::test_helpers::*;
    include!("radix_math.tests.rs");
}
