//! Raising to a power

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use super::{FullRadixMath, Value};
use crate::helper::RadixHelper;
use crate::shift_accumulator::ShiftAccumulator;
use crate::{ArithmeticError, FastInteger, Flags, PrecisionContext, Rounding};


impl<H: RadixHelper> FullRadixMath<H> {
    pub(crate) fn power_internal(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a, b], flags) {
            return Ok(nan);
        }
        match self.integer_value(b)? {
            Some(n) => self.integer_power(a, &n, ctx, flags),
            None => self.real_power(a, b, ctx, flags),
        }
    }

    /// The value of b, if it is a finite integer
    fn integer_value(&self, b: &Value) -> Result<Option<BigInt>, ArithmeticError> {
        if !b.is_finite() {
            return Ok(None);
        }
        let sign = if b.is_negative() { Sign::Minus } else { Sign::Plus };
        if b.exponent >= BigInt::zero() {
            let magnitude = self.helper.multiply_by_radix_power(&b.mantissa, &FastInteger::from(&b.exponent))?;
            return Ok(Some(BigInt::from_biguint(sign, magnitude)));
        }
        let zero = BigInt::zero();
        let (mantissa, exponent) = self.strip_trailing_zeros(b.mantissa.clone(), b.exponent.clone(), Some(&zero));
        if mantissa.is_zero() || exponent == zero {
            return Ok(Some(BigInt::from_biguint(sign, mantissa)));
        }
        Ok(None)
    }

    pub(crate) fn integer_power(
        &self,
        a: &Value,
        n: &BigInt,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        let reciprocal = n.sign() == Sign::Minus;
        let count = n.magnitude();
        let negative = a.is_negative() && count.is_odd();

        if count.is_zero() {
            if a.is_zero() {
                return Ok(self.invalid(flags));
            }
            return self.round_value(&Value::one(), ctx, flags);
        }
        if a.is_infinite() {
            return Ok(if reciprocal { Value::zero(negative, BigInt::zero()) } else { Value::infinity(negative) });
        }
        if a.is_zero() {
            if reciprocal {
                return Ok(Value::infinity(negative));
            }
            return Ok(self.round_zero(negative, &BigInt::zero(), None, ctx, flags));
        }

        let (mantissa, exponent) = self.strip_trailing_zeros(a.mantissa.clone(), a.exponent.clone(), None);
        if mantissa.is_one() {
            // a power of the radix is exact
            let exponent = exponent * n;
            return self.round_parts(negative, &mantissa, &exponent, 0, false, None, ctx, flags);
        }

        let precision = self.digit_precision(ctx);
        let small_count = count.to_u32();
        let short_result = small_count.map_or(false, |k| {
            (k as u64).saturating_mul(self.digits(&mantissa)) <= precision.saturating_mul(2) + 10
        });
        let terminating = reciprocal && self.helper.has_terminating_radix_expansion(&BigUint::one(), &mantissa);
        if precision == 0 || ((short_result || terminating) && small_count.is_some()) {
            let k = small_count.ok_or_else(|| {
                ArithmeticError::invalid_argument(format!("power {} is too large for an exact result", n))
            })?;
            let exact = Value::finite(negative, mantissa.pow(k), exponent * k);
            if reciprocal {
                return self.divide_internal(&Value::one(), &exact, ctx, flags);
            }
            return self.round_value(&exact, ctx, flags);
        }
        self.power_by_bounds(negative, &mantissa, &exponent, count, reciprocal, precision, ctx, flags)
    }

    /// Correctly rounded power from successively tighter lower and upper
    /// bounds on the exact result
    #[allow(clippy::too_many_arguments)]
    fn power_by_bounds(
        &self,
        negative: bool,
        mantissa: &BigUint,
        exponent: &BigInt,
        count: &BigUint,
        reciprocal: bool,
        precision: u64,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        // the exact result has more digits than the precision
        if ctx.rounding() == Rounding::Unnecessary {
            return Err(ArithmeticError::RoundingRequired);
        }
        let mut working = precision + 8;
        loop {
            let low = self.bounded_power(mantissa, exponent, count, working, false);
            let high = self.bounded_power(mantissa, exponent, count, working, true);
            let (low, high) = if reciprocal {
                (self.bounded_reciprocal(&high, working, false), self.bounded_reciprocal(&low, working, true))
            } else {
                (low, high)
            };

            let exact = low == high;
            let mut low_flags = Flags::empty();
            let low = self.round_parts(negative, &low.0, &low.1, 0, false, None, ctx, &mut low_flags)?;
            let high = self.round_parts(negative, &high.0, &high.1, 0, false, None, ctx, &mut Flags::empty())?;
            if exact {
                *flags |= low_flags;
                return Ok(low);
            }
            if low == high {
                *flags |= low_flags | Flags::INEXACT | Flags::ROUNDED;
                if low_flags.contains(Flags::SUBNORMAL) {
                    *flags |= Flags::UNDERFLOW;
                }
                return Ok(low);
            }
            working *= 2;
            tracing::debug!(working, "power bounds round differently, widening");
        }
    }

    /// Cut n to at most `working` digits, rounding toward zero or away
    fn truncate_bound(&self, n: BigUint, exponent: BigInt, working: u64, up: bool) -> (BigUint, BigInt) {
        if self.digits(&n) <= working {
            return (n, exponent);
        }
        let mut acc = self.helper.create_shift_accumulator(&n);
        acc.shift_to_digits(&FastInteger::from(working));
        let exponent = exponent + acc.discarded_digit_count().to_bigint();
        let inexact = acc.is_inexact();
        let mut n = acc.into_shifted_int();
        if up && inexact {
            n += 1u32;
        }
        (n, exponent)
    }

    /// Lower (or upper) bound on (mantissa * radix^exponent)^count, by
    /// square-and-multiply with every intermediate cut to `working` digits
    fn bounded_power(
        &self,
        mantissa: &BigUint,
        exponent: &BigInt,
        count: &BigUint,
        working: u64,
        up: bool,
    ) -> (BigUint, BigInt) {
        let mut m = BigUint::one();
        let mut e = BigInt::zero();
        for bit in (0..count.bits()).rev() {
            let (sm, se) = self.truncate_bound(&m * &m, &e * 2, working, up);
            m = sm;
            e = se;
            if count.bit(bit) {
                let (pm, pe) = self.truncate_bound(&m * mantissa, &e + exponent, working, up);
                m = pm;
                e = pe;
            }
        }
        (m, e)
    }

    /// Lower (or upper) bound on 1 / (m * radix^e)
    fn bounded_reciprocal(&self, bound: &(BigUint, BigInt), working: u64, up: bool) -> (BigUint, BigInt) {
        let (m, e) = bound;
        let scale = working + self.digits(m);
        let (mut q, rem) = self.helper.radix_power(scale).div_rem(m);
        if up && !rem.is_zero() {
            q += 1u32;
        }
        (q, -e - BigInt::from(scale))
    }

    /// a^b for non-integer (or infinite) b
    fn real_power(
        &self,
        a: &Value,
        b: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if a.is_negative() && !a.is_zero() {
            return Ok(self.invalid(flags));
        }
        if b.is_infinite() {
            return match (self.compare_magnitude(a, &Value::one()), b.is_negative()) {
                (Ordering::Equal, _) => {
                    *flags |= Flags::INEXACT | Flags::ROUNDED;
                    self.round_value(&Value::one(), ctx, flags)
                }
                (Ordering::Less, false) | (Ordering::Greater, true) => Ok(Value::zero(false, BigInt::zero())),
                _ => Ok(Value::infinity(false)),
            };
        }
        if a.is_infinite() {
            return Ok(if b.is_negative() { Value::zero(false, BigInt::zero()) } else { Value::infinity(false) });
        }
        if a.is_zero() {
            return Ok(if b.is_negative() { Value::infinity(false) } else { Value::zero(false, BigInt::zero()) });
        }
        let (mantissa, exponent) = self.strip_trailing_zeros(a.mantissa.clone(), a.exponent.clone(), None);
        if mantissa.is_one() && exponent.is_zero() {
            return self.round_value(&Value::one(), ctx, flags);
        }
        if self.digit_precision(ctx) == 0 {
            return Ok(self.invalid(flags));
        }
        self.power_by_logarithm(a, b, ctx, flags)
    }
}
