//! Rounding to a context, and to fixed exponents

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use super::{FullRadixMath, Value};
use crate::fast_integer::max_fast;
use crate::helper::RadixHelper;
use crate::powers::two_to_the;
use crate::shift_accumulator::ShiftAccumulator;
use crate::{ArithmeticError, FastInteger, Flags, PrecisionContext, Rounding};


/// Bound on the size of a rounded mantissa
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Limit {
    /// At most this many radix digits; zero is unlimited
    Digits(u64),
    /// Mantissa at most this value (a binary precision applied to a
    /// non-binary radix)
    Mantissa(BigUint),
}

/// Lowest radix digit of n
fn low_digit(n: &BigUint, radix: u32) -> u32 {
    (n % radix).to_u32().unwrap_or(0)
}

/// Largest exponent a full-precision number may have with clamping on
fn clamp_limit(ctx: &PrecisionContext, precision: u64) -> BigInt {
    if ctx.adjust_exponent() {
        ctx.e_max() - BigInt::from(precision) + 1
    } else {
        ctx.e_max().clone()
    }
}

impl<H: RadixHelper> FullRadixMath<H> {
    pub(crate) fn limit(&self, ctx: &PrecisionContext) -> Limit {
        let precision = ctx.precision();
        if precision > 0 && ctx.is_precision_in_bits() && self.radix() != 2 {
            Limit::Mantissa(two_to_the(precision) - 1u32)
        } else {
            Limit::Digits(precision)
        }
    }

    /// Maximum number of radix digits of a result (0 for unlimited)
    pub(crate) fn digit_precision(&self, ctx: &PrecisionContext) -> u64 {
        match self.limit(ctx) {
            Limit::Digits(precision) => precision,
            Limit::Mantissa(max) => self.digits(&max),
        }
    }

    /// Exponent as bounded by EMin and EMax
    fn adjusted_exponent(&self, exponent: &FastInteger, digits: &FastInteger, ctx: &PrecisionContext) -> FastInteger {
        if ctx.adjust_exponent() {
            exponent.plus(digits).plus_int(-1)
        } else {
            exponent.clone()
        }
    }

    /// Round a finite value with all context rules
    pub(crate) fn round_value(&self, v: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        debug_assert!(v.is_finite());
        self.round_parts(v.is_negative(), &v.mantissa, &v.exponent, 0, false, None, ctx, flags)
    }

    /// Round `(-1)^negative * mantissa.[last][older] * radix^exponent`
    ///
    /// `last` and `older` describe digits already discarded below the
    /// mantissa. If `min_exponent` is given, the result exponent is no
    /// smaller than it.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn round_parts(
        &self,
        negative: bool,
        mantissa: &BigUint,
        exponent: &BigInt,
        last: u32,
        older: bool,
        min_exponent: Option<&BigInt>,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if mantissa.is_zero() && last == 0 && !older {
            return Ok(self.round_zero(negative, exponent, min_exponent, ctx, flags));
        }
        match self.limit(ctx) {
            Limit::Digits(precision) => {
                self.round_to_digits(negative, mantissa, exponent, last, older, precision, min_exponent, ctx, flags)
            }
            Limit::Mantissa(max) => {
                self.round_to_mantissa(negative, mantissa, exponent, last, older, &max, min_exponent, ctx.rounding(), flags)
            }
        }
    }

    /// Zero keeps its exponent, unless outside the exponent range
    pub(crate) fn round_zero(
        &self,
        negative: bool,
        exponent: &BigInt,
        min_exponent: Option<&BigInt>,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Value {
        let mut exponent = match min_exponent {
            Some(min) if min > exponent => min.clone(),
            _ => exponent.clone(),
        };
        if ctx.has_exponent_range() {
            let tiny = ctx.e_tiny();
            let precision = self.digit_precision(ctx);
            let limit = if ctx.clamp_normal_exponents() && precision > 0 {
                clamp_limit(ctx, precision)
            } else {
                ctx.e_max().clone()
            };
            if exponent < tiny {
                exponent = tiny;
                *flags |= Flags::CLAMPED;
            } else if exponent > limit {
                exponent = limit;
                *flags |= Flags::CLAMPED;
            }
        }
        Value::zero(negative, exponent)
    }

    #[allow(clippy::too_many_arguments)]
    fn round_to_digits(
        &self,
        negative: bool,
        mantissa: &BigUint,
        exponent: &BigInt,
        last: u32,
        older: bool,
        precision: u64,
        min_exponent: Option<&BigInt>,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let radix = self.radix();
        let rounding = ctx.rounding();
        let mut acc = self.helper.create_shift_accumulator_with_digits(mantissa, last, older);
        let digits = acc.digit_length();
        let exponent = FastInteger::from_bigint(exponent);

        let mut shift = FastInteger::zero();
        if precision > 0 {
            shift = max_fast(&shift, &digits.minus(&FastInteger::from(precision)));
        }

        // subnormal check happens on the unrounded value
        let mut subnormal = false;
        if ctx.has_exponent_range() {
            let adjusted = self.adjusted_exponent(&exponent, &digits, ctx);
            if adjusted < FastInteger::from_bigint(ctx.e_min()) {
                subnormal = true;
                let needed = FastInteger::from_bigint(&ctx.e_tiny()).minus(&exponent);
                shift = max_fast(&shift, &needed);
            }
        }
        if let Some(min_exponent) = min_exponent {
            let needed = FastInteger::from_bigint(min_exponent).minus(&exponent);
            shift = max_fast(&shift, &needed);
        }
        acc.shift_right(&shift);

        let inexact = acc.is_inexact();
        if inexact && rounding == Rounding::Unnecessary {
            return Err(ArithmeticError::RoundingRequired);
        }
        let mut new_exponent = exponent.plus(acc.discarded_digit_count());
        let last_discarded = acc.last_discarded_digit();
        let older_discarded = acc.older_discarded_digits();
        let mut m = acc.into_shifted_int();

        let last_kept = low_digit(&m, radix);
        if rounding.should_increment(negative, last_kept, last_discarded, older_discarded, radix) {
            m += 1u32;
            if precision > 0 && self.digits(&m) > precision {
                // carried into a new digit: m is radix^precision
                m /= radix;
                new_exponent.increment();
            }
        }

        if shift.sign() > 0 || last != 0 || older {
            *flags |= Flags::ROUNDED;
        }
        if inexact {
            *flags |= Flags::INEXACT;
        }
        if subnormal {
            *flags |= Flags::SUBNORMAL;
            if inexact {
                *flags |= Flags::UNDERFLOW;
                if m.is_zero() {
                    *flags |= Flags::CLAMPED;
                }
            }
        }

        if ctx.has_exponent_range() && !m.is_zero() {
            let digits = FastInteger::from(self.digits(&m));
            let adjusted = self.adjusted_exponent(&new_exponent, &digits, ctx);
            if adjusted > FastInteger::from_bigint(ctx.e_max()) {
                return self.overflow(negative, precision, ctx, flags);
            }
            if ctx.clamp_normal_exponents() && precision > 0 {
                let limit = FastInteger::from(clamp_limit(ctx, precision));
                if new_exponent > limit {
                    let pad = new_exponent.minus(&limit);
                    m = self.helper.multiply_by_radix_power(&m, &pad)?;
                    new_exponent = limit;
                    *flags |= Flags::CLAMPED;
                }
            }
        }
        Ok(Value::finite(negative, m, new_exponent.into_bigint()))
    }

    /// Result of a finite value too large for the exponent range
    fn overflow(
        &self,
        negative: bool,
        precision: u64,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let rounding = ctx.rounding();
        if rounding == Rounding::Unnecessary {
            return Err(ArithmeticError::RoundingRequired);
        }
        *flags |= Flags::OVERFLOW | Flags::INEXACT | Flags::ROUNDED;
        if precision == 0 || rounding.overflows_to_infinity(negative) {
            return Ok(Value::infinity(negative));
        }
        Ok(self.largest_finite(negative, precision, ctx))
    }

    /// Number of largest magnitude within the context's exponent range
    pub(crate) fn largest_finite(&self, negative: bool, precision: u64, ctx: &PrecisionContext) -> Value {
        let mantissa = self.helper.radix_power(precision) - 1u32;
        Value::finite(negative, mantissa, clamp_limit(ctx, precision))
    }

    /// Round until the mantissa is no greater than `max`
    ///
    /// The exponent range does not apply.
    #[allow(clippy::too_many_arguments)]
    fn round_to_mantissa(
        &self,
        negative: bool,
        mantissa: &BigUint,
        exponent: &BigInt,
        last: u32,
        older: bool,
        max: &BigUint,
        min_exponent: Option<&BigInt>,
        rounding: Rounding,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let radix = self.radix();
        let exponent = FastInteger::from_bigint(exponent);
        let base = self.helper.create_shift_accumulator_with_digits(mantissa, last, older);

        let mut shift = base.digit_length().minus(&FastInteger::from(self.digits(max)));
        if let Some(min_exponent) = min_exponent {
            let needed = FastInteger::from_bigint(min_exponent).minus(&exponent);
            shift = max_fast(&shift, &needed);
        }
        let mut shift = max_fast(&shift, &FastInteger::zero());

        // each attempt starts from the unrounded value, so one extra digit
        // of shift never rounds twice
        loop {
            let mut acc = base.clone();
            acc.shift_right(&shift);
            if acc.shifted_int() > *max {
                shift.increment();
                continue;
            }
            let inexact = acc.is_inexact();
            if inexact && rounding == Rounding::Unnecessary {
                return Err(ArithmeticError::RoundingRequired);
            }
            let new_exponent = exponent.plus(acc.discarded_digit_count());
            let last_discarded = acc.last_discarded_digit();
            let older_discarded = acc.older_discarded_digits();
            let mut m = acc.into_shifted_int();
            if rounding.should_increment(negative, low_digit(&m, radix), last_discarded, older_discarded, radix) {
                m += 1u32;
                if m > *max {
                    shift.increment();
                    continue;
                }
            }
            if shift.sign() > 0 || last != 0 || older {
                *flags |= Flags::ROUNDED;
            }
            if inexact {
                *flags |= Flags::INEXACT;
            }
            return Ok(Value::finite(negative, m, new_exponent.into_bigint()));
        }
    }

    /// Round `(-1)^negative * mantissa.[last][older]` at the exponent it
    /// already has; the exponent is not allowed to change
    ///
    /// Returns NaN (INVALID) if the rounded mantissa needs more digits
    /// than the precision allows, or if the exponent is out of range.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn round_fixed(
        &self,
        negative: bool,
        mantissa: BigUint,
        exponent: &BigInt,
        last: u32,
        older: bool,
        discarded_any: bool,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let radix = self.radix();
        let rounding = ctx.rounding();
        let inexact = last != 0 || older;
        if inexact && rounding == Rounding::Unnecessary {
            return Err(ArithmeticError::RoundingRequired);
        }
        let mut m = mantissa;
        if rounding.should_increment(negative, low_digit(&m, radix), last, older, radix) {
            m += 1u32;
        }

        let precision = self.digit_precision(ctx);
        let too_long = match self.limit(ctx) {
            Limit::Digits(0) => false,
            Limit::Digits(precision) => self.digits(&m) > precision,
            Limit::Mantissa(max) => m > max,
        };
        if too_long {
            return Ok(self.invalid(flags));
        }

        let mut result_flags = Flags::empty();
        if discarded_any {
            result_flags |= Flags::ROUNDED;
        }
        if inexact {
            result_flags |= Flags::INEXACT;
        }
        if ctx.has_exponent_range() {
            if *exponent < ctx.e_tiny() || exponent > ctx.e_max() {
                return Ok(self.invalid(flags));
            }
            let digits = FastInteger::from(self.digits(&m));
            let adjusted = self.adjusted_exponent(&FastInteger::from_bigint(exponent), &digits, ctx);
            if adjusted > FastInteger::from_bigint(ctx.e_max()) {
                return Ok(self.invalid(flags));
            }
            if !m.is_zero() && adjusted < FastInteger::from_bigint(ctx.e_min()) {
                result_flags |= Flags::SUBNORMAL;
                if inexact {
                    result_flags |= Flags::UNDERFLOW;
                }
            }
            if ctx.clamp_normal_exponents() && precision > 0 && *exponent > clamp_limit(ctx, precision) {
                return Ok(self.invalid(flags));
            }
        }
        *flags |= result_flags;
        Ok(Value::finite(negative, m, exponent.clone()))
    }

    /// Rescale a finite value to exactly `target`, rounding if digits
    /// are discarded
    pub(crate) fn rescale(
        &self,
        v: &Value,
        target: &BigInt,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let negative = v.is_negative();
        let diff = FastInteger::from(&v.exponent - target);
        if diff.sign() >= 0 {
            // padding with zeros is exact; refuse to build a mantissa
            // longer than the precision
            let precision = self.digit_precision(ctx);
            if precision > 0 && !v.mantissa.is_zero() {
                let digits = FastInteger::from(self.digits(&v.mantissa)).plus(&diff);
                if digits > FastInteger::from(precision) {
                    return Ok(self.invalid(flags));
                }
            }
            let m = self.helper.multiply_by_radix_power(&v.mantissa, &diff)?;
            return self.round_fixed(negative, m, target, 0, false, false, ctx, flags);
        }
        let mut acc = self.helper.create_shift_accumulator(&v.mantissa);
        let mut shift = diff;
        shift.negate();
        acc.shift_right(&shift);
        let last = acc.last_discarded_digit();
        let older = acc.older_discarded_digits();
        self.round_fixed(negative, acc.into_shifted_int(), target, last, older, true, ctx, flags)
    }

    pub(crate) fn round_to_precision_internal(
        &self,
        a: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a], flags) {
            return Ok(nan);
        }
        if a.is_infinite() {
            return Ok(a.clone());
        }
        self.round_value(a, ctx, flags)
    }

    pub(crate) fn round_to_binary_precision_internal(
        &self,
        a: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let ctx = ctx.clone().with_precision_in_bits(true);
        self.round_to_precision_internal(a, &ctx, flags)
    }

    pub(crate) fn quantize_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a, b], flags) {
            return Ok(nan);
        }
        if a.is_infinite() || b.is_infinite() {
            if a.is_infinite() && b.is_infinite() {
                return Ok(a.clone());
            }
            return Ok(self.invalid(flags));
        }
        self.rescale(a, &b.exponent, ctx, flags)
    }

    pub(crate) fn round_to_exponent_exact_internal(
        &self,
        a: &Value,
        exponent: &BigInt,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a], flags) {
            return Ok(nan);
        }
        if a.is_infinite() {
            return Ok(a.clone());
        }
        self.rescale(a, exponent, ctx, flags)
    }

    pub(crate) fn round_to_exponent_simple_internal(
        &self,
        a: &Value,
        exponent: &BigInt,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a], flags) {
            return Ok(nan);
        }
        if a.is_infinite() {
            return Ok(a.clone());
        }
        if a.exponent >= *exponent {
            return self.round_value(a, ctx, flags);
        }
        self.round_parts(a.is_negative(), &a.mantissa, &a.exponent, 0, false, Some(exponent), ctx, flags)
    }

    pub(crate) fn round_to_exponent_no_rounded_flag_internal(
        &self,
        a: &Value,
        exponent: &BigInt,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let mut local = Flags::empty();
        let result = self.round_to_exponent_simple_internal(a, exponent, ctx, &mut local)?;
        local.remove(Flags::INEXACT | Flags::ROUNDED);
        *flags |= local;
        Ok(result)
    }

    /// Remove trailing zeros from a finite mantissa, not raising the
    /// exponent past `max_exponent`
    pub(crate) fn strip_trailing_zeros(
        &self,
        mantissa: BigUint,
        exponent: BigInt,
        max_exponent: Option<&BigInt>,
    ) -> (BigUint, BigInt) {
        if mantissa.is_zero() {
            return (mantissa, exponent);
        }
        let radix = BigUint::from(self.radix());
        let mut m = mantissa;
        let mut e = exponent;
        loop {
            if let Some(max) = max_exponent {
                if e >= *max {
                    break;
                }
            }
            let (q, r) = m.div_rem(&radix);
            if !r.is_zero() {
                break;
            }
            m = q;
            e += 1;
        }
        (m, e)
    }

    pub(crate) fn reduce_internal(
        &self,
        a: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let rounded = self.round_to_precision_internal(a, ctx, flags)?;
        if !rounded.is_finite() {
            return Ok(rounded);
        }
        let negative = rounded.is_negative();
        if rounded.mantissa.is_zero() {
            return Ok(Value::zero(negative, BigInt::zero()));
        }
        let (m, e) = self.strip_trailing_zeros(rounded.mantissa, rounded.exponent, None);
        // may need clamping again; rounding an exact value adds no flags
        // besides CLAMPED
        self.round_parts(negative, &m, &e, 0, false, None, ctx, flags)
    }
}
