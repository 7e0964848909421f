//! Square roots, logarithms, exponentials and π
//!
//! Except for square roots, these results are computed in fixed point: an
//! integer `X` standing for `X / radix^scale`. Each approximation carries
//! guard digits covering its accumulated truncation error, so once the
//! guard digits are dropped the approximation `N` is within two units of
//! the exact result. If `N - 2` and `N + 2` round to the same number,
//! that number is the correctly rounded result; otherwise the working
//! precision is doubled and the approximation recomputed.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::{FullRadixMath, Limit, Value};
use crate::helper::RadixHelper;
use crate::{ArithmeticError, Flags, PrecisionContext, Rounding};


/// Square roots taken of the argument of the logarithm series
const LN_REDUCTIONS: u32 = 8;

/// Halvings of the argument of the exponential series
const EXP_REDUCTIONS: u32 = 8;

/// Bits of truncation error tolerated in a fixed-point approximation
const GUARD_BITS: u64 = 40;


/// atanh(t) for fixed-point |t| well below one
fn atanh_fixed(t: &BigInt, one: &BigInt) -> BigInt {
    let t2 = t * t / one;
    let mut power = t.clone();
    let mut sum = t.clone();
    let mut k = 1u64;
    loop {
        power = &power * &t2 / one;
        let term = &power / (2 * k + 1);
        if term.is_zero() {
            return sum;
        }
        sum += term;
        k += 1;
    }
}

/// atan(1/n)
fn atan_recip(n: u32, one: &BigInt) -> BigInt {
    let n2 = BigInt::from(n) * n;
    let mut power = one / n;
    let mut sum = power.clone();
    let mut k = 1u64;
    loop {
        power = power / &n2;
        let term = &power / (2 * k + 1);
        if term.is_zero() {
            return sum;
        }
        if k % 2 == 1 {
            sum -= term;
        } else {
            sum += term;
        }
        k += 1;
    }
}

/// π by Machin's formula
fn pi_fixed(one: &BigInt) -> BigInt {
    atan_recip(5, one) * 16 - atan_recip(239, one) * 4
}

/// ln(radix), as k ln 2 + ln(radix / 2^k) with 2^k the largest power of
/// two not above the radix
fn ln_radix_fixed(radix: u32, one: &BigInt) -> BigInt {
    let k = 31 - radix.leading_zeros();
    let two_k = 1u32 << k;
    let ln2 = atanh_fixed(&(one / 3u32), one) * 2;
    let mut ln = ln2 * k;
    if radix != two_k {
        let t = one * (radix - two_k) / (radix + two_k);
        ln += atanh_fixed(&t, one) * 2;
    }
    ln
}


impl<H: RadixHelper> FullRadixMath<H> {
    /// Digits making up [`GUARD_BITS`]
    fn guard_digits(&self) -> u64 {
        let radix = u64::from(self.radix());
        let mut digits = 0;
        let mut reach = 1u64;
        while reach < (1 << GUARD_BITS) {
            reach *= radix;
            digits += 1;
        }
        digits
    }

    fn fixed_one(&self, scale: u64) -> BigInt {
        BigInt::from(self.helper.radix_power(scale))
    }

    /// Exponent of the leading digit of a nonzero finite number
    fn leading_exponent(&self, mantissa: &BigUint, exponent: &BigInt) -> BigInt {
        exponent + BigInt::from(self.digits(mantissa)) - 1
    }

    /// Digits in the integer part of |mantissa * radix^exponent|
    fn integer_digits(&self, mantissa: &BigUint, exponent: &BigInt) -> Result<u64, ArithmeticError> {
        let leading = self.leading_exponent(mantissa, exponent);
        if leading.is_negative() {
            return Ok(0);
        }
        (leading + 1u32).to_u64().ok_or_else(|| {
            ArithmeticError::invalid_argument("operand too large for a transcendental function")
        })
    }

    /// Digits needed for the magnitude of the leading exponent, plus one
    fn exponent_digits(&self, mantissa: &BigUint, exponent: &BigInt) -> u64 {
        let leading = self.leading_exponent(mantissa, exponent);
        self.digits(&(leading.magnitude() + 1u32))
    }

    /// mantissa * radix^exponent in fixed point, truncated
    fn to_fixed(
        &self,
        negative: bool,
        mantissa: &BigUint,
        exponent: &BigInt,
        scale: u64,
    ) -> Result<BigInt, ArithmeticError> {
        let shift = exponent + BigInt::from(scale);
        let magnitude = if shift.is_negative() {
            let drop = shift.magnitude().to_u64().unwrap_or(u64::MAX);
            if drop > self.digits(mantissa) {
                BigUint::zero()
            } else {
                mantissa / self.helper.radix_power(drop)
            }
        } else {
            let pad = shift.to_u64().ok_or_else(|| {
                ArithmeticError::invalid_argument("operand too large for a transcendental function")
            })?;
            mantissa * self.helper.radix_power(pad)
        };
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Ok(BigInt::from_biguint(sign, magnitude))
    }

    /// ln(mantissa * radix^exponent) for a positive number
    fn ln_fixed(&self, mantissa: &BigUint, exponent: &BigInt, scale: u64, one: &BigInt, ln_radix: &BigInt) -> BigInt {
        let digits = self.digits(mantissa);
        let k = self.leading_exponent(mantissa, exponent);

        // mantissa scaled into [1, radix)
        let f = if scale + 1 >= digits {
            mantissa * self.helper.radix_power(scale + 1 - digits)
        } else {
            mantissa / self.helper.radix_power(digits - 1 - scale)
        };
        let mut z = BigInt::from(f);
        for _ in 0..LN_REDUCTIONS {
            z = (&z * one).sqrt();
        }
        let t = (&z - one) * one / (&z + one);
        (atanh_fixed(&t, one) << (LN_REDUCTIONS + 1)) + k * ln_radix
    }

    /// e^(x / one) as an approximation and exponent, with the guard
    /// digits dropped
    fn exp_from_fixed(&self, x: &BigInt, scale: u64, guard: u64, one: &BigInt, ln_radix: &BigInt) -> (BigInt, BigInt) {
        // e^x = e^f * radix^k with f in [0, ln radix)
        let k = x.div_floor(ln_radix);
        let f = x - &k * ln_radix;
        let y = f >> EXP_REDUCTIONS;

        let mut sum = one.clone();
        let mut term = one.clone();
        let mut i = 1u64;
        loop {
            term = &term * &y / one / i;
            if term.is_zero() {
                break;
            }
            sum += &term;
            i += 1;
        }
        for _ in 0..EXP_REDUCTIONS {
            sum = &sum * &sum / one;
        }
        let approximation = sum / self.fixed_one(guard);
        (approximation, k - BigInt::from(scale - guard))
    }

    /// Round an approximation that is refined on demand
    ///
    /// `approximate(working)` returns `(n, exponent)` such that the exact
    /// result lies strictly between `(n - 2) * radix^exponent` and
    /// `(n + 2) * radix^exponent`, with `n` carrying about `working`
    /// significant digits.
    fn round_approximation<F>(
        &self,
        ctx: &PrecisionContext,
        flags: &mut Flags,
        mut approximate: F,
    ) -> Result<Value, ArithmeticError>
    where
        F: FnMut(u64) -> Result<(BigInt, BigInt), ArithmeticError>,
    {
        // never exact
        if ctx.rounding() == Rounding::Unnecessary {
            return Err(ArithmeticError::RoundingRequired);
        }
        let mut working = self.digit_precision(ctx) + 6;
        loop {
            let (n, exponent) = approximate(working)?;
            let low: BigInt = &n - 2;
            let high: BigInt = &n + 2;
            if low.sign() == high.sign() && low.sign() != Sign::NoSign {
                let negative = low.is_negative();
                let mut low_flags = Flags::empty();
                let low = self.round_parts(negative, low.magnitude(), &exponent, 0, false, None, ctx, &mut low_flags)?;
                let high = self.round_parts(negative, high.magnitude(), &exponent, 0, false, None, ctx, &mut Flags::empty())?;
                if low == high {
                    *flags |= low_flags | Flags::INEXACT | Flags::ROUNDED;
                    if low_flags.contains(Flags::SUBNORMAL) {
                        *flags |= Flags::UNDERFLOW;
                    }
                    return Ok(low);
                }
            }
            working *= 2;
            tracing::debug!(working, "approximation straddles a rounding boundary, widening");
        }
    }

    pub(crate) fn square_root_internal(
        &self,
        a: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a], flags) {
            return Ok(nan);
        }
        let ideal = a.exponent.div_floor(&BigInt::from(2));
        if a.is_zero() {
            return Ok(self.round_zero(a.is_negative(), &ideal, None, ctx, flags));
        }
        if a.is_negative() {
            return Ok(self.invalid(flags));
        }
        if a.is_infinite() {
            return Ok(a.clone());
        }

        let precision = self.digit_precision(ctx);
        // digits to append so the root has more digits than the precision
        // and the exponent is even
        let mut pad = if precision == 0 {
            0
        } else {
            (2 * precision + 2).saturating_sub(self.digits(&a.mantissa))
        };
        if (&a.exponent - BigInt::from(pad)).is_odd() {
            pad += 1;
        }
        let mantissa = &a.mantissa * self.helper.radix_power(pad);
        let exponent = (&a.exponent - BigInt::from(pad)) / 2;

        let root = mantissa.sqrt();
        let exact = &root * &root == mantissa;
        if exact {
            let (root, exponent) = self.strip_trailing_zeros(root, exponent, Some(&ideal));
            return self.round_parts(false, &root, &exponent, 0, false, None, ctx, flags);
        }
        if precision == 0 {
            return Ok(self.invalid(flags));
        }
        // the root has a digit beyond the precision, so a sticky digit
        // stands in for the whole nonzero remainder
        self.round_parts(false, &root, &exponent, 0, true, None, ctx, flags)
    }

    pub(crate) fn ln_internal(&self, a: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a], flags) {
            return Ok(nan);
        }
        if a.is_zero() {
            return Ok(Value::infinity(true));
        }
        if a.is_negative() {
            return Ok(self.invalid(flags));
        }
        if a.is_infinite() {
            return Ok(a.clone());
        }
        let (mantissa, exponent) = self.strip_trailing_zeros(a.mantissa.clone(), a.exponent.clone(), None);
        if mantissa.is_one() && exponent.is_zero() {
            return self.round_value(&Value::zero(false, BigInt::zero()), ctx, flags);
        }
        if self.digit_precision(ctx) == 0 {
            return Ok(self.invalid(flags));
        }

        let guard = self.guard_digits();
        let extra = self.exponent_digits(&mantissa, &exponent);
        self.round_approximation(ctx, flags, |working| {
            let scale = working + guard + extra;
            let one = self.fixed_one(scale);
            let ln_radix = ln_radix_fixed(self.radix(), &one);
            let ln = self.ln_fixed(&mantissa, &exponent, scale, &one, &ln_radix);
            Ok((ln.div_floor(&self.fixed_one(guard)), -BigInt::from(scale - guard)))
        })
    }

    /// k if the number is exactly 10^k
    fn exact_log10(&self, mantissa: &BigUint, exponent: &BigInt) -> Option<BigInt> {
        match self.radix() {
            10 if mantissa.is_one() => Some(exponent.clone()),
            // m * 2^e is 10^k only as 5^k * 2^k
            2 => {
                let k = exponent.to_u32()?;
                if *mantissa == BigUint::from(5u32).pow(k) {
                    Some(BigInt::from(k))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub(crate) fn log10_internal(&self, a: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a], flags) {
            return Ok(nan);
        }
        if a.is_zero() {
            return Ok(Value::infinity(true));
        }
        if a.is_negative() {
            return Ok(self.invalid(flags));
        }
        if a.is_infinite() {
            return Ok(a.clone());
        }
        let (mantissa, exponent) = self.strip_trailing_zeros(a.mantissa.clone(), a.exponent.clone(), None);
        if let Some(k) = self.exact_log10(&mantissa, &exponent) {
            let exact = Value::finite(k.is_negative(), k.magnitude().clone(), BigInt::zero());
            return self.round_value(&exact, ctx, flags);
        }
        if self.digit_precision(ctx) == 0 {
            return Ok(self.invalid(flags));
        }

        let guard = self.guard_digits();
        let extra = self.exponent_digits(&mantissa, &exponent) + 2;
        let ten = BigUint::from(10u32);
        self.round_approximation(ctx, flags, |working| {
            let scale = working + guard + extra;
            let one = self.fixed_one(scale);
            let ln_radix = ln_radix_fixed(self.radix(), &one);
            let ln = self.ln_fixed(&mantissa, &exponent, scale, &one, &ln_radix);
            let ln10 = self.ln_fixed(&ten, &BigInt::zero(), scale, &one, &ln_radix);
            let quotient = ln * &one / ln10;
            Ok((quotient.div_floor(&self.fixed_one(guard)), -BigInt::from(scale - guard)))
        })
    }

    pub(crate) fn exp_internal(&self, a: &Value, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        if let Some(nan) = self.handle_nans(&[a], flags) {
            return Ok(nan);
        }
        if a.is_infinite() {
            if a.is_negative() {
                return Ok(Value::zero(false, BigInt::zero()));
            }
            return Ok(a.clone());
        }
        if a.is_zero() {
            return self.round_value(&Value::one(), ctx, flags);
        }
        let precision = self.digit_precision(ctx);
        if precision == 0 {
            return Ok(self.invalid(flags));
        }
        let negative = a.is_negative();

        // far outside the exponent range: overflow or underflow outright
        if ctx.has_exponent_range() && matches!(self.limit(ctx), Limit::Digits(_)) {
            let reach = (ctx.e_max().abs() + ctx.e_min().abs() + BigInt::from(precision) + 10u32) * 3u32;
            let threshold = Value::finite(false, reach.magnitude().clone(), BigInt::zero());
            if self.compare_magnitude(a, &threshold) != std::cmp::Ordering::Less {
                let (mantissa, exponent) = if negative {
                    (BigUint::one(), ctx.e_tiny() - 2)
                } else {
                    (BigUint::one(), ctx.e_max() + 1u32)
                };
                return self.round_parts(false, &mantissa, &exponent, 0, true, None, ctx, flags);
            }
        }

        // so close to zero that e^a rounds as 1 + a would
        let precision_digits = BigInt::from(precision);
        if self.leading_exponent(&a.mantissa, &a.exponent) < -(&precision_digits + 3u32) {
            let (mantissa, exponent) = if negative {
                (self.helper.radix_power(precision + 2) - 1u32, -(&precision_digits + 2u32))
            } else {
                (self.helper.radix_power(precision + 1), -(&precision_digits + 1u32))
            };
            return self.round_parts(false, &mantissa, &exponent, 0, true, None, ctx, flags);
        }

        let guard = self.guard_digits();
        let integer_digits = self.integer_digits(&a.mantissa, &a.exponent)?;
        self.round_approximation(ctx, flags, |working| {
            let scale = working + guard + integer_digits + 1;
            let one = self.fixed_one(scale);
            let ln_radix = ln_radix_fixed(self.radix(), &one);
            let x = self.to_fixed(negative, &a.mantissa, &a.exponent, scale)?;
            Ok(self.exp_from_fixed(&x, scale, guard, &one, &ln_radix))
        })
    }

    pub(crate) fn pi_internal(&self, ctx: &PrecisionContext, flags: &mut Flags) -> Result<Value, ArithmeticError> {
        if self.digit_precision(ctx) == 0 {
            return Ok(self.invalid(flags));
        }
        let guard = self.guard_digits();
        self.round_approximation(ctx, flags, |working| {
            let scale = working + guard + 1;
            let pi = pi_fixed(&self.fixed_one(scale));
            Ok((pi / self.fixed_one(guard), -BigInt::from(scale - guard)))
        })
    }

    /// x^y for positive finite x and non-integer finite y
    pub(crate) fn power_by_logarithm(
        &self,
        x: &Value,
        y: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Value, ArithmeticError> {
        if let Some(result) = self.exact_real_power(x, y, ctx, flags)? {
            return Ok(result);
        }

        let guard = self.guard_digits();
        let y_digits = self.integer_digits(&y.mantissa, &y.exponent)?;
        let ln_digits = self.exponent_digits(&x.mantissa, &x.exponent) + 1;
        let y_mantissa = BigInt::from_biguint(if y.is_negative() { Sign::Minus } else { Sign::Plus }, y.mantissa.clone());
        self.round_approximation(ctx, flags, |working| {
            let scale = working + guard + 2 * y_digits + ln_digits + 3;
            let one = self.fixed_one(scale);
            let ln_radix = ln_radix_fixed(self.radix(), &one);
            let ln = self.ln_fixed(&x.mantissa, &x.exponent, scale, &one, &ln_radix);

            // y * ln(x), from the exact digits of y
            let product = ln * &y_mantissa;
            let z = if y.exponent.is_negative() {
                let drop = y.exponent.magnitude().to_u64().unwrap_or(u64::MAX);
                if drop > 2 * scale + self.digits(&y.mantissa) + ln_digits {
                    BigInt::zero()
                } else {
                    product / self.fixed_one(drop)
                }
            } else {
                let pad = y.exponent.to_u64().ok_or_else(|| {
                    ArithmeticError::invalid_argument("exponent too large for a power")
                })?;
                product * self.fixed_one(pad)
            };
            Ok(self.exp_from_fixed(&z, scale, guard, &one, &ln_radix))
        })
    }

    /// x^y when the result is exactly representable
    ///
    /// With y = n/d in lowest terms, x^y is a number of this radix only
    /// if x has an exact d-th root of this radix.
    fn exact_real_power(
        &self,
        x: &Value,
        y: &Value,
        ctx: &PrecisionContext,
        flags: &mut Flags,
    ) -> Result<Option<Value>, ArithmeticError> {
        let (y_mantissa, y_exponent) = self.strip_trailing_zeros(y.mantissa.clone(), y.exponent.clone(), None);
        let scale = match y_exponent.magnitude().to_u64() {
            // past this the denominator cannot fit a u32
            Some(scale) if scale <= self.digits(&y_mantissa) + 64 => scale,
            _ => return Ok(None),
        };
        let full_denominator = self.helper.radix_power(scale);
        let common = y_mantissa.gcd(&full_denominator);
        let numerator = y_mantissa / &common;
        let denominator = match (full_denominator / &common).to_u32() {
            Some(d) => d,
            None => return Ok(None),
        };

        let (x_mantissa, x_exponent) = self.strip_trailing_zeros(x.mantissa.clone(), x.exponent.clone(), None);
        let (root_exponent, rem) = x_exponent.div_rem(&BigInt::from(denominator));
        if !rem.is_zero() {
            return Ok(None);
        }
        let root = if x_mantissa.is_one() {
            x_mantissa
        } else {
            if u64::from(denominator) > x_mantissa.bits() {
                return Ok(None);
            }
            let root = x_mantissa.nth_root(denominator);
            if root.pow(denominator) != x_mantissa {
                return Ok(None);
            }
            root
        };

        let sign = if y.is_negative() { Sign::Minus } else { Sign::Plus };
        let n = BigInt::from_biguint(sign, numerator);
        self.integer_power(&Value::finite(false, root, root_exponent), &n, ctx, flags).map(Some)
    }
}
