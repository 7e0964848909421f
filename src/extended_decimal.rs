//! Arbitrary-precision decimal numbers with special values
//!
//! An [`ExtendedDecimal`] is `(-1)^sign * mantissa * 10^exponent`, or an
//! infinity, or a quiet or signaling NaN (with an optional diagnostic
//! payload). Equality is equality of representation: `1.0` and `1.00`
//! are different values with the same numeric value, as compared by
//! [`RadixMath::compare_to`](crate::RadixMath::compare_to).

use std::fmt::{self, Write};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

use crate::helper::NumberFlags;
use crate::radix_math::sign_flag;
use crate::{ArithmeticError, ExtendedFloat, ParseNumberError, RadixPowers};


#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedDecimal {
    mantissa: BigUint,
    exponent: BigInt,
    flags: NumberFlags,
}

impl ExtendedDecimal {
    /// Build from raw parts; the mantissa of an infinity is ignored
    pub fn from_parts(mantissa: BigUint, exponent: BigInt, flags: NumberFlags) -> Self {
        let mantissa = if flags.contains(NumberFlags::INFINITY) {
            BigUint::zero()
        } else {
            mantissa
        };
        ExtendedDecimal {
            mantissa: mantissa,
            exponent: exponent,
            flags: flags,
        }
    }

    /// mantissa * 10^exponent
    pub fn new(mantissa: BigInt, exponent: i64) -> Self {
        let (sign, magnitude) = mantissa.into_parts();
        Self::from_parts(magnitude, BigInt::from(exponent), sign_flag(sign == Sign::Minus))
    }

    pub fn zero() -> Self {
        Self::from_parts(BigUint::zero(), BigInt::zero(), NumberFlags::empty())
    }

    pub fn negative_zero() -> Self {
        Self::from_parts(BigUint::zero(), BigInt::zero(), NumberFlags::NEGATIVE)
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

    pub fn signaling_nan() -> Self {
        Self::from_parts(BigUint::zero(), BigInt::zero(), NumberFlags::SIGNALING_NAN)
    }

    /// Magnitude of the mantissa (NaN payload for NaNs)
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

    /// -1, 0 or 1; zero only for finite zeros
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

    pub fn is_quiet_nan(&self) -> bool {
        self.flags.contains(NumberFlags::QUIET_NAN)
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

    /// Integer part as an i64
    ///
    /// The fractional part is discarded. Infinities, NaNs and numbers
    /// out of range give [`ArithmeticError::Overflow`].
    pub fn to_i64_checked(&self) -> Result<i64, ArithmeticError> {
        if !self.is_finite() {
            return Err(ArithmeticError::Overflow(format!("{} has no integer value", self)));
        }
        if self.mantissa.is_zero() {
            return Ok(0);
        }
        let out_of_range = || ArithmeticError::Overflow(format!("{} does not fit in i64", self));
        let ten = BigUint::from(10u32);
        let integer = if self.exponent.is_negative() {
            // mantissa < 2^bits <= 10^bits
            match self.exponent.magnitude().to_u32() {
                Some(drop) if u64::from(drop) < self.mantissa.bits() => &self.mantissa / ten.pow(drop),
                _ => BigUint::zero(),
            }
        } else {
            // 10^19 already overflows
            let pad = self.exponent.to_u32().filter(|&e| e < 20).ok_or_else(out_of_range)?;
            &self.mantissa * ten.pow(pad)
        };
        let sign = if self.is_negative() { Sign::Minus } else { Sign::Plus };
        BigInt::from_biguint(sign, integer).to_i64().ok_or_else(out_of_range)
    }

    /// Exact decimal value of a binary number
    pub fn from_extended_float(value: &ExtendedFloat, powers: &RadixPowers) -> Result<Self, ArithmeticError> {
        if !value.is_finite() {
            return Ok(Self::from_parts(value.unsigned_mantissa().clone(), BigInt::zero(), value.flags()));
        }
        let exponent = value.exponent();
        if !exponent.is_negative() {
            let shift = exponent.to_usize().ok_or_else(|| {
                ArithmeticError::invalid_argument(format!("binary exponent {} is too large", exponent))
            })?;
            let mantissa = if value.unsigned_mantissa().is_zero() {
                BigUint::zero()
            } else {
                value.unsigned_mantissa() << shift
            };
            return Ok(Self::from_parts(mantissa, BigInt::zero(), value.flags()));
        }
        // m * 2^-k == m * 5^k * 10^-k
        let five_k = powers.find_power_of_five_big(&-exponent)?;
        Ok(Self::from_parts(value.unsigned_mantissa() * five_k, exponent.clone(), value.flags()))
    }
}

impl Default for ExtendedDecimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for ExtendedDecimal {
    fn from(n: i64) -> Self {
        Self::new(BigInt::from(n), 0)
    }
}

impl From<BigInt> for ExtendedDecimal {
    fn from(n: BigInt) -> Self {
        Self::new(n, 0)
    }
}


impl fmt::Display for ExtendedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = String::new();
        write_scientific_string(self, &mut buf)?;
        f.pad(&buf)
    }
}

/// Scientific string of the General Decimal Arithmetic specification:
/// plain notation for exponents in [-6 - (digits - 1), 0], otherwise
/// one leading digit and an explicit exponent
fn write_scientific_string<W: Write>(n: &ExtendedDecimal, w: &mut W) -> fmt::Result {
    if n.is_negative() {
        w.write_str("-")?;
    }
    if n.is_nan() {
        w.write_str(if n.is_signaling_nan() { "sNaN" } else { "NaN" })?;
        if !n.mantissa.is_zero() {
            write!(w, "{}", n.mantissa)?;
        }
        return Ok(());
    }
    if n.is_infinite() {
        return w.write_str("Infinity");
    }

    let digits = n.mantissa.to_str_radix(10);
    let adjusted = &n.exponent + BigInt::from(digits.len() - 1);
    if !n.exponent.is_positive() && adjusted >= BigInt::from(-6) {
        let point = n.exponent.magnitude().to_usize().unwrap_or(0);
        if point == 0 {
            return w.write_str(&digits);
        }
        if digits.len() > point {
            let (int, frac) = digits.split_at(digits.len() - point);
            return write!(w, "{}.{}", int, frac);
        }
        w.write_str("0.")?;
        for _ in digits.len()..point {
            w.write_char('0')?;
        }
        return w.write_str(&digits);
    }

    let (first_digit, remaining_digits) = digits.split_at(1);
    w.write_str(first_digit)?;
    if !remaining_digits.is_empty() {
        w.write_str(".")?;
        w.write_str(remaining_digits)?;
    }
    let sign = if adjusted.is_negative() { '-' } else { '+' };
    write!(w, "E{}{}", sign, adjusted.magnitude())
}


/// Digit string to integer
fn parse_digits(s: &str) -> Result<BigUint, ParseNumberError> {
    if let Some(c) = s.chars().find(|c| !c.is_ascii_digit()) {
        return Err(ParseNumberError::InvalidDigit(c));
    }
    s.parse::<BigUint>().map_err(|_| ParseNumberError::NoDigits)
}

impl FromStr for ExtendedDecimal {
    type Err = ParseNumberError;

    /// Parse `[sign] digits [. digits] [E [sign] digits]`, `Infinity`,
    /// `Inf`, `NaN[payload]` or `sNaN[payload]` (case insensitive)
    fn from_str(s: &str) -> Result<ExtendedDecimal, ParseNumberError> {
        if s.is_empty() {
            return Err(ParseNumberError::Empty);
        }
        let (negative, body) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };
        let sign = sign_flag(negative);

        let lower = body.to_ascii_lowercase();
        if lower == "infinity" || lower == "inf" {
            return Ok(Self::from_parts(BigUint::zero(), BigInt::zero(), sign | NumberFlags::INFINITY));
        }
        for &(prefix, kind) in &[("snan", NumberFlags::SIGNALING_NAN), ("nan", NumberFlags::QUIET_NAN)] {
            if let Some(payload) = lower.strip_prefix(prefix) {
                let payload = if payload.is_empty() { BigUint::zero() } else { parse_digits(payload)? };
                return Ok(Self::from_parts(payload, BigInt::zero(), sign | kind));
            }
        }

        let exp_separator: &[_] = &['e', 'E'];
        let (base_part, mut exponent) = match body.find(exp_separator) {
            None => (body, BigInt::zero()),
            Some(loc) => {
                let exp = &body[loc + 1..];
                let (exp_sign, exp_digits) = match exp.as_bytes().first() {
                    Some(b'-') => (Sign::Minus, &exp[1..]),
                    Some(b'+') => (Sign::Plus, &exp[1..]),
                    _ => (Sign::Plus, exp),
                };
                if exp_digits.is_empty() {
                    return Err(ParseNumberError::NoDigits);
                }
                (&body[..loc], BigInt::from_biguint(exp_sign, parse_digits(exp_digits)?))
            }
        };

        let (int_part, frac_part) = match base_part.find('.') {
            None => (base_part, ""),
            Some(loc) => (&base_part[..loc], &base_part[loc + 1..]),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseNumberError::NoDigits);
        }
        let mut digits = String::with_capacity(int_part.len() + frac_part.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);
        let mantissa = parse_digits(&digits)?;
        exponent -= BigInt::from(frac_part.len());

        Ok(Self::from_parts(mantissa, exponent, sign))
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use paste::paste;

    macro_rules! impl_case {
        ($name:ident: $input:literal => $int:literal E $exp:literal) => {
            paste! {
                #[test]
                fn [< parse_ $name >]() {
                    let dec = ExtendedDecimal::from_str($input).unwrap();
                    assert_eq!(dec.mantissa(), BigInt::from($int));
                    assert_eq!(dec.exponent(), &BigInt::from($exp));
                }
            }
        };
        ($name:ident: $input:literal => display $expected:literal) => {
            paste! {
                #[test]
                fn [< display_ $name >]() {
                    let dec = ExtendedDecimal::from_str($input).unwrap();
                    assert_eq!(dec.to_string(), $expected);
                }
            }
        };
    }

    impl_case!(case_1331d107: "1331.107" => 1331107 E -3);
    impl_case!(case_1d0: "1.0" => 10 E -1);
    impl_case!(case_2e1: "2e1" => 2 E 1);
    impl_case!(case_0d00123: "0.00123" => 123 E -5);
    impl_case!(case_n123: "-123" => -123 E 0);
    impl_case!(case_p7: "+7" => 7 E 0);
    impl_case!(case_1d23ep3: "1.23E+3" => 123 E 1);
    impl_case!(case_n1d23en10: "-1.23E-10" => -123 E -12);
    impl_case!(case_d5: ".5" => 5 E -1);
    impl_case!(case_5d: "5." => 5 E 0);

    impl_case!(plain: "123" => display "123");
    impl_case!(negative: "-123" => display "-123");
    impl_case!(positive_exponent: "1.23E+3" => display "1.23E+3");
    impl_case!(integer_positive_exponent: "123E+3" => display "1.23E+5");
    impl_case!(fraction: "12.3" => display "12.3");
    impl_case!(small: "0.00123" => display "0.00123");
    impl_case!(smallest_plain: "123E-10" => display "1.23E-8");
    impl_case!(leading_zeros: "0.000001" => display "0.000001");
    impl_case!(below_plain: "0.0000001" => display "1E-7");
    impl_case!(zero: "0" => display "0");
    impl_case!(zero_scaled: "0.00" => display "0.00");
    impl_case!(zero_exponent: "0E+2" => display "0E+2");
    impl_case!(negative_zero: "-0" => display "-0");
    impl_case!(infinity: "inf" => display "Infinity");
    impl_case!(negative_infinity: "-Infinity" => display "-Infinity");
    impl_case!(nan: "NaN" => display "NaN");
    impl_case!(nan_payload: "nan42" => display "NaN42");
    impl_case!(snan: "-sNaN" => display "-sNaN");

    #[test]
    fn parse_errors() {
        assert_eq!(ExtendedDecimal::from_str(""), Err(ParseNumberError::Empty));
        assert_eq!(ExtendedDecimal::from_str("."), Err(ParseNumberError::NoDigits));
        assert_eq!(ExtendedDecimal::from_str("-"), Err(ParseNumberError::NoDigits));
        assert_eq!(ExtendedDecimal::from_str("1e"), Err(ParseNumberError::NoDigits));
        assert_eq!(ExtendedDecimal::from_str("12z3"), Err(ParseNumberError::InvalidDigit('z')));
        assert_eq!(ExtendedDecimal::from_str("1.2.3"), Err(ParseNumberError::InvalidDigit('.')));
        assert_eq!(ExtendedDecimal::from_str("1e4x"), Err(ParseNumberError::InvalidDigit('x')));
        assert_eq!(ExtendedDecimal::from_str("nanx"), Err(ParseNumberError::InvalidDigit('x')));
    }

    #[test]
    fn special_values() {
        let nan = ExtendedDecimal::nan();
        assert!(nan.is_nan() && nan.is_quiet_nan() && !nan.is_finite());
        assert!(ExtendedDecimal::signaling_nan().is_signaling_nan());
        assert!(ExtendedDecimal::negative_infinity().is_negative());
        assert_eq!(ExtendedDecimal::negative_zero().sign(), 0);
        assert!(ExtendedDecimal::negative_zero().is_negative());
        assert_eq!(ExtendedDecimal::from(-5).sign(), -1);
    }

    #[test]
    fn to_i64_checked() {
        assert_eq!(ExtendedDecimal::from_str("123.99").unwrap().to_i64_checked(), Ok(123));
        assert_eq!(ExtendedDecimal::from_str("-123.99").unwrap().to_i64_checked(), Ok(-123));
        assert_eq!(ExtendedDecimal::from_str("12E+3").unwrap().to_i64_checked(), Ok(12000));
        assert_eq!(ExtendedDecimal::from_str("1E-400").unwrap().to_i64_checked(), Ok(0));
        assert_eq!(ExtendedDecimal::from_str("-987654321E-5").unwrap().to_i64_checked(), Ok(-9876));
        assert_eq!(ExtendedDecimal::from_str("99999E-5").unwrap().to_i64_checked(), Ok(0));
        assert_eq!(ExtendedDecimal::from_str("5E-999999999999").unwrap().to_i64_checked(), Ok(0));
        assert_eq!(ExtendedDecimal::from_str("0E+400").unwrap().to_i64_checked(), Ok(0));
        assert_eq!(ExtendedDecimal::from(i64::MIN).to_i64_checked(), Ok(i64::MIN));

        for overflows in ["9223372036854775808", "1E+19", "Infinity", "NaN"] {
            let err = ExtendedDecimal::from_str(overflows).unwrap().to_i64_checked();
            assert!(matches!(err, Err(ArithmeticError::Overflow(_))), "{}", overflows);
        }
    }

    #[test]
    fn from_extended_float() {
        let powers = RadixPowers::new();
        let cases = [(0.5, "0.5"), (3.0, "3"), (-0.375, "-0.375"), (1024.0, "1024")];
        for (f, expected) in cases {
            let float = ExtendedFloat::from_f64(f);
            let dec = ExtendedDecimal::from_extended_float(&float, &powers).unwrap();
            assert_eq!(dec.to_string(), expected);
        }
        let inf = ExtendedDecimal::from_extended_float(&ExtendedFloat::from_f64(f64::NEG_INFINITY), &powers).unwrap();
        assert_eq!(inf, ExtendedDecimal::negative_infinity());
    }
}
