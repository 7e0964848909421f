//! Stepping to adjacent representable numbers

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint};
use num_traits::One;

use super::{FullRadixMath, Limit, Value};
use crate::helper::RadixHelper;
use crate::{ArithmeticError, Flags, PrecisionContext, Rounding};


impl<H: RadixHelper> FullRadixMath<H> {
    pub(crate) fn next_plus_internal(&self, a: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        self.next_in_direction(a, true, ctx, flags)
    }

    pub(crate) fn next_minus_internal(&self, a: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        self.next_in_direction(a, false, ctx, flags)
    }

    /// Adjacent representable number above (`up`) or below a
    ///
    /// Raises no flags besides INVALID: stepping is exact by definition.
    fn next_in_direction(
        &self,
        a: &Value,
        up: bool,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a], flags) {
            return Ok(nan);
        }
        let precision = self.digit_precision(ctx);
        if precision == 0 {
            return Ok(self.invalid(flags));
        }
        let bounded = ctx.has_exponent_range() && matches!(self.limit(ctx), Limit::Digits(_));
        if a.is_infinite() {
            if a.is_negative() != up {
                return Ok(a.clone());
            }
            // from infinity toward zero: the largest finite number
            if !bounded {
                return Ok(self.invalid(flags));
            }
            return Ok(self.largest_finite(a.is_negative(), precision, ctx));
        }
        if a.is_zero() && !bounded {
            return Ok(self.invalid(flags));
        }

        // add a step smaller than any unit the result can keep, rounding
        // in the requested direction
        let mut step_exponent: Option<BigInt> = None;
        if bounded {
            step_exponent = Some(ctx.e_tiny());
        }
        if !a.is_zero() {
            let lowest_kept = &a.exponent + BigInt::from(self.digits(&a.mantissa)) - 1 - BigInt::from(precision);
            step_exponent = Some(match step_exponent {
                Some(tiny) => tiny.min(lowest_kept),
                None => lowest_kept,
            });
        }
        let step_exponent = step_exponent.unwrap_or_default() - 2;
        let step = Value::finite(!up, BigUint::one(), step_exponent);

        let rounding = if up { Rounding::Ceiling } else { Rounding::Floor };
        let ctx = ctx.clone().with_rounding(rounding);
        let mut ignored = Flags::empty();
        self.add_internal(a, &step, &ctx, &mut ignored)
    }

    pub(crate) fn next_toward_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a, b], flags) {
            return Ok(nan);
        }
        let up = match self.compare_values(a, b) {
            Ordering::Equal => return Ok(a.clone().with_sign(b.is_negative())),
            Ordering::Less => true,
            Ordering::Greater => false,
        };
        let result = self.next_in_direction(a, up, ctx, flags)?;
        if result.is_nan() {
            return Ok(result);
        }
        if result.is_infinite() {
            if a.is_finite() {
                *flags |= Flags::OVERFLOW | Flags::INEXACT | Flags::ROUNDED;
            }
        } else if ctx.has_exponent_range() {
            let adjusted = &result.exponent + BigInt::from(self.digits(&result.mantissa)) - 1;
            if result.is_zero() || adjusted < *ctx.e_min() {
                *flags |= Flags::SUBNORMAL | Flags::UNDERFLOW | Flags::INEXACT | Flags::ROUNDED;
                if result.is_zero() {
                    *flags |= Flags::CLAMPED;
                }
            }
        }
        Ok(result)
    }
}
