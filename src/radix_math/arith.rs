//! Addition, multiplication and division

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::{FullRadixMath, Value};
use crate::fast_integer::{max_fast, min_fast};
use crate::helper::RadixHelper;
use crate::{ArithmeticError, FastInteger, Flags, PrecisionContext, Rounding};


impl<H: RadixHelper> FullRadixMath<H> {
    pub(crate) fn add_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a, b], flags) {
            return Ok(nan);
        }
        if a.is_infinite() {
            if b.is_infinite() && a.is_negative() != b.is_negative() {
                return Ok(self.invalid(flags));
            }
            return Ok(a.clone());
        }
        if b.is_infinite() {
            return Ok(b.clone());
        }

        let rounding = ctx.rounding();
        if a.is_zero() && b.is_zero() {
            let negative = if a.is_negative() == b.is_negative() {
                a.is_negative()
            } else {
                rounding == Rounding::Floor
            };
            let exponent = (&a.exponent).min(&b.exponent);
            return Ok(self.round_zero(negative, exponent, None, ctx, flags));
        }
        if b.is_zero() {
            return self.add_zero(a, &b.exponent, ctx, flags);
        }
        if a.is_zero() {
            return self.add_zero(b, &a.exponent, ctx, flags);
        }

        let (hi, lo) = if a.exponent >= b.exponent { (a, b) } else { (b, a) };
        let precision = self.digit_precision(ctx);

        // an addend entirely below the rounding position of the result
        // only contributes a sticky digit; replace it with one that is
        // cheap to align
        let sticky;
        let mut lo = lo;
        if precision > 0 {
            let hi_top = &hi.exponent + BigInt::from(self.digits(&hi.mantissa)) - BigInt::from(precision);
            let limit = (&hi.exponent).min(&hi_top) - 3;
            let lo_adjusted = &lo.exponent + BigInt::from(self.digits(&lo.mantissa)) - 1;
            if lo_adjusted < limit {
                sticky = Value::finite(lo.is_negative(), BigUint::one(), limit);
                lo = &sticky;
            }
        }

        let diff = FastInteger::from(&hi.exponent - &lo.exponent);
        let hi_mantissa = self.helper.multiply_by_radix_power(&hi.mantissa, &diff)?;
        let (negative, mantissa) = if hi.is_negative() == lo.is_negative() {
            (hi.is_negative(), hi_mantissa + &lo.mantissa)
        } else {
            match hi_mantissa.cmp(&lo.mantissa) {
                Ordering::Greater => (hi.is_negative(), hi_mantissa - &lo.mantissa),
                Ordering::Less => (lo.is_negative(), &lo.mantissa - hi_mantissa),
                Ordering::Equal => {
                    let negative = rounding == Rounding::Floor;
                    return Ok(self.round_zero(negative, &lo.exponent, None, ctx, flags));
                }
            }
        };
        self.round_parts(negative, &mantissa, &lo.exponent, 0, false, None, ctx, flags)
    }

    /// x + 0, where the zero's exponent may extend x with trailing zeros
    fn add_zero(
        &self,
        x: &Value,
        zero_exponent: &BigInt,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if *zero_exponent >= x.exponent {
            return self.round_value(x, ctx, flags);
        }
        let mut pad = FastInteger::from(&x.exponent - zero_exponent);
        let precision = self.digit_precision(ctx);
        if precision > 0 {
            let room = FastInteger::from(precision.saturating_sub(self.digits(&x.mantissa)));
            if room < pad {
                pad = room;
                *flags |= Flags::ROUNDED;
            }
        }
        let mantissa = self.helper.multiply_by_radix_power(&x.mantissa, &pad)?;
        let exponent = &x.exponent - pad.into_bigint();
        self.round_parts(x.is_negative(), &mantissa, &exponent, 0, false, None, ctx, flags)
    }

    pub(crate) fn subtract_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if b.is_nan() {
            return self.add_internal(a, b, ctx, flags);
        }
        self.add_internal(a, &b.negated(), ctx, flags)
    }

    pub(crate) fn multiply_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a, b], flags) {
            return Ok(nan);
        }
        let negative = a.is_negative() != b.is_negative();
        if a.is_infinite() || b.is_infinite() {
            if a.is_zero() || b.is_zero() {
                return Ok(self.invalid(flags));
            }
            return Ok(Value::infinity(negative));
        }
        let mantissa = &a.mantissa * &b.mantissa;
        let exponent = &a.exponent + &b.exponent;
        self.round_parts(negative, &mantissa, &exponent, 0, false, None, ctx, flags)
    }

    pub(crate) fn multiply_and_add_internal(
        &self,
        a: &Value,
        b: &Value,
        c: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a, b, c], flags) {
            return Ok(nan);
        }
        let product = self.multiply_internal(a, b, &PrecisionContext::unlimited(), flags)?;
        if product.is_nan() {
            return Ok(product);
        }
        self.add_internal(&product, c, ctx, flags)
    }

    pub(crate) fn divide_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a, b], flags) {
            return Ok(nan);
        }
        let negative = a.is_negative() != b.is_negative();
        if a.is_infinite() {
            if b.is_infinite() {
                return Ok(self.invalid(flags));
            }
            return Ok(Value::infinity(negative));
        }
        if b.is_infinite() {
            if ctx.has_exponent_range() {
                *flags |= Flags::CLAMPED;
                return Ok(Value::zero(negative, ctx.e_tiny()));
            }
            return Ok(Value::zero(negative, BigInt::zero()));
        }
        if b.is_zero() {
            if a.is_zero() {
                return Ok(self.invalid(flags));
            }
            *flags |= Flags::DIVIDE_BY_ZERO;
            return Ok(Value::infinity(negative));
        }

        let ideal = &a.exponent - &b.exponent;
        if a.is_zero() {
            return Ok(self.round_zero(negative, &ideal, None, ctx, flags));
        }
        let precision = self.digit_precision(ctx);
        if precision == 0 {
            return self.divide_exact(negative, a, b, &ideal, ctx, flags);
        }

        // scale the dividend so the quotient has at least one digit more
        // than the precision; the remainder then only matters as a
        // sticky digit
        let shift = FastInteger::from(precision)
            .plus_int(1)
            .plus(&FastInteger::from(self.digits(&b.mantissa)))
            .minus(&FastInteger::from(self.digits(&a.mantissa)));
        let shift = max_fast(&shift, &FastInteger::zero());
        let dividend = self.helper.multiply_by_radix_power(&a.mantissa, &shift)?;
        let (mut quotient, rem) = dividend.div_rem(&b.mantissa);
        let mut exponent = &ideal - shift.into_bigint();
        if rem.is_zero() {
            let (q, e) = self.strip_trailing_zeros(quotient, exponent, Some(&ideal));
            quotient = q;
            exponent = e;
        }
        self.round_parts(negative, &quotient, &exponent, 0, !rem.is_zero(), None, ctx, flags)
    }

    /// Division with unlimited precision: exact, or NaN
    fn divide_exact(
        &self,
        negative: bool,
        a: &Value,
        b: &Value,
        ideal: &BigInt,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if !self.helper.has_terminating_radix_expansion(&a.mantissa, &b.mantissa) {
            return Ok(self.invalid(flags));
        }
        // smallest k such that b divides a * radix^k
        let radix = BigUint::from(self.radix());
        let mut den = &b.mantissa / a.mantissa.gcd(&b.mantissa);
        let mut k = 0u64;
        while !den.is_one() {
            let g = den.gcd(&radix);
            den /= g;
            k += 1;
        }
        let k = FastInteger::from(k);
        let dividend = self.helper.multiply_by_radix_power(&a.mantissa, &k)?;
        let quotient = dividend / &b.mantissa;
        let exponent = ideal - k.into_bigint();
        self.round_parts(negative, &quotient, &exponent, 0, false, None, ctx, flags)
    }

    /// True if trunc(|a / b| / radix^target) certainly has more than
    /// `precision` digits
    fn quotient_too_long(&self, a: &Value, b: &Value, target: &BigInt, precision: u64) -> bool {
        let scale = FastInteger::from(&a.exponent - &b.exponent - target);
        let lower_bound = FastInteger::from(self.digits(&a.mantissa))
            .minus(&FastInteger::from(self.digits(&b.mantissa)))
            .plus(&scale);
        lower_bound > FastInteger::from(precision)
    }

    /// trunc(|a / b| / radix^target), with the next digit of the quotient
    /// and whether anything after it is nonzero
    fn divide_scaled(
        &self,
        a: &Value,
        b: &Value,
        target: &BigInt,
    ) -> Result<(BigUint, u32, bool), ArithmeticError> {
        let mut scale = FastInteger::from(&a.exponent - &b.exponent - target);
        let (num, den) = if scale.sign() >= 0 {
            (self.helper.multiply_by_radix_power(&a.mantissa, &scale)?, b.mantissa.clone())
        } else {
            scale.negate();
            (a.mantissa.clone(), self.helper.multiply_by_radix_power(&b.mantissa, &scale)?)
        };
        let (quotient, rem) = num.div_rem(&den);
        if rem.is_zero() {
            return Ok((quotient, 0, false));
        }
        let (digit, rest) = (rem * self.radix()).div_rem(&den);
        Ok((quotient, digit.to_u32().unwrap_or(0), !rest.is_zero()))
    }

    /// Checks shared by the divide-to-exponent and integer divisions;
    /// returns the result if it is special
    fn divide_specials(
        &self,
        a: &Value,
        b: &Value,
        zero_exponent: &BigInt,
        flags: &mut Flags,
    ) -> Option<Value> {
        if let Some(nan) = self.handle_nans(&[a, b], flags) {
            return Some(nan);
        }
        let negative = a.is_negative() != b.is_negative();
        if a.is_infinite() {
            if b.is_infinite() {
                return Some(self.invalid(flags));
            }
            return Some(Value::infinity(negative));
        }
        if b.is_infinite() {
            return Some(Value::zero(negative, zero_exponent.clone()));
        }
        if b.is_zero() {
            if a.is_zero() {
                return Some(self.invalid(flags));
            }
            *flags |= Flags::DIVIDE_BY_ZERO;
            return Some(Value::infinity(negative));
        }
        None
    }

    pub(crate) fn divide_to_exponent_internal(
        &self,
        a: &Value,
        b: &Value,
        exponent: &BigInt,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(special) = self.divide_specials(a, b, exponent, flags) {
            return Ok(special);
        }
        let negative = a.is_negative() != b.is_negative();
        let precision = self.digit_precision(ctx);
        if precision > 0 && self.quotient_too_long(a, b, exponent, precision) {
            return Ok(self.invalid(flags));
        }
        let (quotient, last, older) = self.divide_scaled(a, b, exponent)?;
        let inexact = last != 0 || older;
        self.round_fixed(negative, quotient, exponent, last, older, inexact, ctx, flags)
    }

    pub(crate) fn divide_to_integer_zero_scale_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let zero = BigInt::zero();
        if let Some(special) = self.divide_specials(a, b, &zero, flags) {
            return Ok(special);
        }
        let negative = a.is_negative() != b.is_negative();
        let precision = self.digit_precision(ctx);
        if precision > 0 && self.quotient_too_long(a, b, &zero, precision) {
            return Ok(self.invalid(flags));
        }
        let (quotient, _, _) = self.divide_scaled(a, b, &zero)?;
        // truncation is not rounding: no flags for the discarded fraction
        let exact_ctx = ctx.clone().with_rounding(Rounding::Down);
        self.round_fixed(negative, quotient, &zero, 0, false, false, &exact_ctx, flags)
    }

    pub(crate) fn divide_to_integer_natural_scale_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let integer = self.divide_to_integer_zero_scale_internal(a, b, ctx, flags)?;
        if !integer.is_finite() {
            return Ok(integer);
        }
        let negative = integer.is_negative();
        let ideal = &a.exponent - &b.exponent;
        if integer.mantissa.is_zero() {
            return Ok(self.round_zero(negative, &ideal, None, ctx, flags));
        }
        let (mantissa, exponent) = if ideal.is_positive() {
            self.strip_trailing_zeros(integer.mantissa, integer.exponent, Some(&ideal))
        } else {
            let mut pad = FastInteger::from(-&ideal);
            let precision = self.digit_precision(ctx);
            if precision > 0 {
                let room = FastInteger::from(precision.saturating_sub(self.digits(&integer.mantissa)));
                pad = min_fast(&pad, &room);
            }
            let mantissa = self.helper.multiply_by_radix_power(&integer.mantissa, &pad)?;
            (mantissa, -pad.into_bigint())
        };
        self.round_parts(negative, &mantissa, &exponent, 0, false, None, ctx, flags)
    }

    pub(crate) fn remainder_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        self.remainder_common(a, b, false, ctx, flags)
    }

    pub(crate) fn remainder_near_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        self.remainder_common(a, b, true, ctx, flags)
    }

    /// a - b * n, where n is the truncated quotient, or the quotient
    /// rounded half-even if `nearest`
    fn remainder_common(
        &self,
        a: &Value,
        b: &Value,
        nearest: bool,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a, b], flags) {
            return Ok(nan);
        }
        if a.is_infinite() || b.is_zero() {
            return Ok(self.invalid(flags));
        }
        if b.is_infinite() {
            return self.round_value(a, ctx, flags);
        }
        let exponent = (&a.exponent).min(&b.exponent).clone();
        if a.is_zero() {
            return Ok(self.round_zero(a.is_negative(), &exponent, None, ctx, flags));
        }
        let precision = self.digit_precision(ctx);
        if precision > 0 && self.quotient_too_long(a, b, &BigInt::zero(), precision) {
            return Ok(self.invalid(flags));
        }

        let a_mantissa = self.helper.multiply_by_radix_power(&a.mantissa, &FastInteger::from(&a.exponent - &exponent))?;
        let b_mantissa = self.helper.multiply_by_radix_power(&b.mantissa, &FastInteger::from(&b.exponent - &exponent))?;
        let (mut quotient, mut rem) = a_mantissa.div_rem(&b_mantissa);
        let mut negative = a.is_negative();
        if nearest {
            let twice: BigUint = &rem << 1usize;
            if twice > b_mantissa || (twice == b_mantissa && quotient.is_odd()) {
                quotient += 1u32;
                rem = &b_mantissa - rem;
                negative = !negative;
            }
        }
        if precision > 0 && self.digits(&quotient) > precision {
            return Ok(self.invalid(flags));
        }
        if rem.is_zero() {
            return Ok(self.round_zero(a.is_negative(), &exponent, None, ctx, flags));
        }
        self.round_parts(negative, &rem, &exponent, 0, false, None, ctx, flags)
    }
}

