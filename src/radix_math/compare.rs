//! Comparison, min/max, and sign operations

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use super::{FullRadixMath, Value};
use crate::helper::RadixHelper;
use crate::{ArithmeticError, Flags, PrecisionContext, Rounding};


impl<H: RadixHelper> FullRadixMath<H> {
    /// -1, 0 or 1 for non-NaN values; zeros of either sign are 0
    fn signum(&self, v: &Value) -> i32 {
        if v.is_zero() {
            0
        } else if v.is_negative() {
            -1
        } else {
            1
        }
    }

    /// Numeric order with NaN above everything
    pub(crate) fn compare_values(&self, a: &Value, b: &Value) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        let (sa, sb) = (self.signum(a), self.signum(b));
        if sa != sb {
            return sa.cmp(&sb);
        }
        if sa == 0 {
            return Ordering::Equal;
        }
        let magnitude = self.compare_magnitude(a, b);
        if sa < 0 {
            magnitude.reverse()
        } else {
            magnitude
        }
    }

    /// Compare absolute values of non-NaN values
    pub(crate) fn compare_magnitude(&self, a: &Value, b: &Value) -> Ordering {
        match (a.is_infinite(), b.is_infinite()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        match (a.mantissa.is_zero(), b.mantissa.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        let da = self.digits(&a.mantissa);
        let db = self.digits(&b.mantissa);
        let adjusted_a = &a.exponent + BigInt::from(da);
        let adjusted_b = &b.exponent + BigInt::from(db);
        match adjusted_a.cmp(&adjusted_b) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
        // same adjusted exponent: the exponents differ by exactly the
        // difference in digit counts
        if da >= db {
            a.mantissa.cmp(&(&b.mantissa * self.helper.radix_power(da - db)))
        } else {
            (&a.mantissa * self.helper.radix_power(db - da)).cmp(&b.mantissa)
        }
    }

    pub(crate) fn compare_with_context_internal(
        &self,
        a: &Value,
        b: &Value,
        treat_quiet_nan_as_signaling: bool,
        flags: &mut Flags,
    ) -> Value {
        if let Some(nan) = self.handle_nans(&[a, b], flags) {
            if treat_quiet_nan_as_signaling {
                *flags |= Flags::INVALID;
            }
            return nan;
        }
        match self.compare_values(a, b) {
            Ordering::Less => Value::finite(true, BigUint::one(), BigInt::zero()),
            Ordering::Equal => Value::zero(false, BigInt::zero()),
            Ordering::Greater => Value::one(),
        }
    }

    /// Order among numerically equal values: positive above negative,
    /// and for positive values a larger exponent above a smaller
    fn tie_break(&self, a: &Value, b: &Value) -> Ordering {
        if a.is_negative() != b.is_negative() {
            return if a.is_negative() { Ordering::Less } else { Ordering::Greater };
        }
        let ordering = a.exponent.cmp(&b.exponent);
        if a.is_negative() {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// NaN handling of min and max: a quiet NaN loses to a number
    fn min_max_nans(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Option<Result<Value, ArithmeticError>> {
        if a.is_signaling_nan() || b.is_signaling_nan() || (a.is_nan() && b.is_nan()) {
            return self.handle_nans(&[a, b], flags).map(Ok);
        }
        if a.is_quiet_nan() {
            return Some(self.round_to_precision_internal(b, ctx, flags));
        }
        if b.is_quiet_nan() {
            return Some(self.round_to_precision_internal(a, ctx, flags));
        }
        None
    }

    fn min_max(
        &self,
        a: &Value,
        b: &Value,
        want_max: bool,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(result) = self.min_max_nans(a, b, ctx, flags) {
            return result;
        }
        let ordering = match self.compare_values(a, b) {
            Ordering::Equal => self.tie_break(a, b),
            ordering => ordering,
        };
        let pick = if (ordering == Ordering::Greater) == want_max { a } else { b };
        self.round_to_precision_internal(pick, ctx, flags)
    }

    fn min_max_magnitude(
        &self,
        a: &Value,
        b: &Value,
        want_max: bool,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(result) = self.min_max_nans(a, b, ctx, flags) {
            return result;
        }
        let pick = match self.compare_magnitude(a, b) {
            Ordering::Equal => return self.min_max(a, b, want_max, ctx, flags),
            Ordering::Greater => if want_max { a } else { b },
            Ordering::Less => if want_max { b } else { a },
        };
        self.round_to_precision_internal(pick, ctx, flags)
    }

    pub(crate) fn min_internal(&self, a: &Value, b: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        self.min_max(a, b, false, ctx, flags)
    }

    pub(crate) fn max_internal(&self, a: &Value, b: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        self.min_max(a, b, true, ctx, flags)
    }

    pub(crate) fn min_magnitude_internal(&self, a: &Value, b: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        self.min_max_magnitude(a, b, false, ctx, flags)
    }

    pub(crate) fn max_magnitude_internal(&self, a: &Value, b: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        self.min_max_magnitude(a, b, true, ctx, flags)
    }

    pub(crate) fn abs_internal(&self, a: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a], flags) {
            return Ok(nan);
        }
        self.round_to_precision_internal(&a.clone().with_sign(false), ctx, flags)
    }

    /// Flip the sign; zero becomes negative zero
    pub(crate) fn negate_internal(&self, a: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a], flags) {
            return Ok(nan);
        }
        self.round_to_precision_internal(&a.negated(), ctx, flags)
    }

    /// 0 + a: as rounding, except that a negative zero becomes positive
    /// (unless rounding toward negative infinity)
    pub(crate) fn plus_internal(&self, a: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        let result = self.round_to_precision_internal(a, ctx, flags)?;
        if result.is_zero() && result.is_negative() && ctx.rounding() != Rounding::Floor {
            return Ok(result.with_sign(false));
        }
        Ok(result)
    }
}
