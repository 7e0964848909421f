//! Hybrid small/big signed integer
//!
//! [`FastInteger`] is used for exponents, digit counts and shift amounts.
//! It stores a plain `i64` until an operation would overflow, at which point
//! it promotes itself (in place) to a [`BigInt`]. Promotion is one-way.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::ArithmeticError;


/// Mutable arbitrary-precision integer, optimized for values fitting in 64 bits
///
/// Mutators return `&mut Self`, so operations may be chained:
///
/// ```
/// use bigradix::FastInteger;
///
/// let mut n = FastInteger::new(i64::MAX);
/// n.add_int(10).multiply_int(2).negate();
/// assert_eq!(n.to_string(), "-18446744073709551634");
/// ```
#[derive(Clone)]
pub struct FastInteger(Repr);

#[derive(Clone, Debug)]
enum Repr {
    Small(i64),
    Large(BigInt),
}

impl FastInteger {
    /// Create from 64-bit integer
    #[inline]
    pub fn new(value: i64) -> Self {
        FastInteger(Repr::Small(value))
    }

    /// Create from arbitrary-precision integer
    pub fn from_bigint(value: &BigInt) -> Self {
        match value.to_i64() {
            Some(n) => FastInteger::new(n),
            None => FastInteger(Repr::Large(value.clone())),
        }
    }

    /// Zero
    #[inline]
    pub fn zero() -> Self {
        FastInteger::new(0)
    }

    /// Convert to arbitrary-precision integer
    pub fn to_bigint(&self) -> BigInt {
        match &self.0 {
            Repr::Small(n) => BigInt::from(*n),
            Repr::Large(n) => n.clone(),
        }
    }

    /// Consume and convert to arbitrary-precision integer
    pub fn into_bigint(self) -> BigInt {
        match self.0 {
            Repr::Small(n) => BigInt::from(n),
            Repr::Large(n) => n,
        }
    }

    /// Switch to bignum representation
    fn promote(&mut self) -> &mut BigInt {
        if let Repr::Small(n) = self.0 {
            self.0 = Repr::Large(BigInt::from(n));
        }
        match &mut self.0 {
            Repr::Large(n) => n,
            Repr::Small(_) => unreachable!(),
        }
    }

    /// self += other
    pub fn add(&mut self, other: &FastInteger) -> &mut Self {
        if let (Repr::Small(a), Repr::Small(b)) = (&self.0, &other.0) {
            if let Some(sum) = a.checked_add(*b) {
                self.0 = Repr::Small(sum);
                return self;
            }
        }
        match &other.0 {
            Repr::Small(b) => *self.promote() += *b,
            Repr::Large(b) => *self.promote() += b,
        }
        self
    }

    /// self += value
    pub fn add_int(&mut self, value: i64) -> &mut Self {
        if let Repr::Small(a) = self.0 {
            if let Some(sum) = a.checked_add(value) {
                self.0 = Repr::Small(sum);
                return self;
            }
        }
        *self.promote() += value;
        self
    }

    /// self += value
    pub fn add_big(&mut self, value: &BigInt) -> &mut Self {
        match value.to_i64() {
            Some(n) => self.add_int(n),
            None => {
                *self.promote() += value;
                self
            }
        }
    }

    /// self -= other
    pub fn subtract(&mut self, other: &FastInteger) -> &mut Self {
        if let (Repr::Small(a), Repr::Small(b)) = (&self.0, &other.0) {
            if let Some(diff) = a.checked_sub(*b) {
                self.0 = Repr::Small(diff);
                return self;
            }
        }
        match &other.0 {
            Repr::Small(b) => *self.promote() -= *b,
            Repr::Large(b) => *self.promote() -= b,
        }
        self
    }

    /// self -= value
    pub fn subtract_int(&mut self, value: i64) -> &mut Self {
        if let Repr::Small(a) = self.0 {
            if let Some(diff) = a.checked_sub(value) {
                self.0 = Repr::Small(diff);
                return self;
            }
        }
        *self.promote() -= value;
        self
    }

    /// self -= value
    pub fn subtract_big(&mut self, value: &BigInt) -> &mut Self {
        match value.to_i64() {
            Some(n) => self.subtract_int(n),
            None => {
                *self.promote() -= value;
                self
            }
        }
    }

    /// self += 1
    #[inline]
    pub fn increment(&mut self) -> &mut Self {
        self.add_int(1)
    }

    /// self -= 1
    #[inline]
    pub fn decrement(&mut self) -> &mut Self {
        self.subtract_int(1)
    }

    /// self *= value
    pub fn multiply_int(&mut self, value: i64) -> &mut Self {
        if let Repr::Small(a) = self.0 {
            if let Some(product) = a.checked_mul(value) {
                self.0 = Repr::Small(product);
                return self;
            }
        }
        *self.promote() *= value;
        self
    }

    /// self *= other
    pub fn multiply(&mut self, other: &FastInteger) -> &mut Self {
        match &other.0 {
            Repr::Small(b) => self.multiply_int(*b),
            Repr::Large(b) => {
                *self.promote() *= b;
                self
            }
        }
    }

    /// self = -self
    pub fn negate(&mut self) -> &mut Self {
        if let Repr::Small(a) = self.0 {
            if let Some(neg) = a.checked_neg() {
                self.0 = Repr::Small(neg);
                return self;
            }
        }
        let n = self.promote();
        *n = -&*n;
        self
    }

    /// self = |self|
    pub fn abs(&mut self) -> &mut Self {
        if self.sign() < 0 {
            self.negate();
        }
        self
    }

    /// self = self / divisor, truncating toward zero
    pub fn divide(&mut self, divisor: i32) -> Result<&mut Self, ArithmeticError> {
        if divisor == 0 {
            return Err(ArithmeticError::invalid_argument("division by zero"));
        }
        if let Repr::Small(a) = self.0 {
            // None only for i64::MIN / -1
            if let Some(q) = a.checked_div(divisor as i64) {
                self.0 = Repr::Small(q);
                return Ok(self);
            }
        }
        *self.promote() /= divisor;
        Ok(self)
    }

    /// self = self % divisor, with the sign of the dividend
    pub fn modulo(&mut self, divisor: i32) -> Result<&mut Self, ArithmeticError> {
        if divisor == 0 {
            return Err(ArithmeticError::invalid_argument("division by zero"));
        }
        match &mut self.0 {
            // wrapping_rem: i64::MIN % -1 == 0
            Repr::Small(a) => *a = a.wrapping_rem(divisor as i64),
            Repr::Large(a) => *a %= divisor,
        }
        Ok(self)
    }

    /// Return -1, 0, or 1 depending on sign of value
    pub fn sign(&self) -> i32 {
        match &self.0 {
            Repr::Small(n) => n.signum() as i32,
            Repr::Large(n) => match n.sign() {
                Sign::Minus => -1,
                Sign::NoSign => 0,
                Sign::Plus => 1,
            },
        }
    }

    /// True if value is zero
    pub fn is_zero(&self) -> bool {
        self.sign() == 0
    }

    /// True if value is even
    pub fn is_even(&self) -> bool {
        match &self.0 {
            Repr::Small(n) => n % 2 == 0,
            Repr::Large(n) => n.is_even(),
        }
    }

    /// Compare with another FastInteger
    pub fn compare_to(&self, other: &FastInteger) -> Ordering {
        match (&self.0, &other.0) {
            (Repr::Small(a), Repr::Small(b)) => a.cmp(b),
            (Repr::Small(a), Repr::Large(b)) => BigInt::from(*a).cmp(b),
            (Repr::Large(a), Repr::Small(b)) => a.cmp(&BigInt::from(*b)),
            (Repr::Large(a), Repr::Large(b)) => a.cmp(b),
        }
    }

    /// Compare with 64-bit integer
    pub fn compare_to_int(&self, other: i64) -> Ordering {
        match &self.0 {
            Repr::Small(a) => a.cmp(&other),
            Repr::Large(a) => {
                // a promoted value may have shrunk back into i64 range
                match a.to_i64() {
                    Some(a) => a.cmp(&other),
                    None if a.is_negative() => Ordering::Less,
                    None => Ordering::Greater,
                }
            }
        }
    }

    /// True if value is in range of i32
    pub fn can_fit_in_i32(&self) -> bool {
        self.to_i32().is_some()
    }

    /// True if value is in range of i64
    pub fn can_fit_in_i64(&self) -> bool {
        self.to_i64().is_some()
    }

    /// Return value as i32, if in range
    pub fn to_i32(&self) -> Option<i32> {
        match &self.0 {
            Repr::Small(n) => i32::try_from(*n).ok(),
            Repr::Large(n) => n.to_i32(),
        }
    }

    /// Return value as i64, if in range
    pub fn to_i64(&self) -> Option<i64> {
        match &self.0 {
            Repr::Small(n) => Some(*n),
            Repr::Large(n) => n.to_i64(),
        }
    }

    /// Return value as u64, if in range
    pub fn to_u64(&self) -> Option<u64> {
        match &self.0 {
            Repr::Small(n) => u64::try_from(*n).ok(),
            Repr::Large(n) => n.to_u64(),
        }
    }

    /// True if the bignum representation is in use
    #[cfg(test)]
    pub(crate) fn is_promoted(&self) -> bool {
        matches!(self.0, Repr::Large(_))
    }
}

impl Default for FastInteger {
    fn default() -> Self {
        FastInteger::zero()
    }
}

impl From<i64> for FastInteger {
    fn from(n: i64) -> Self {
        FastInteger::new(n)
    }
}

impl From<i32> for FastInteger {
    fn from(n: i32) -> Self {
        FastInteger::new(n as i64)
    }
}

impl From<u64> for FastInteger {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => FastInteger::new(n),
            Err(_) => FastInteger(Repr::Large(BigInt::from(n))),
        }
    }
}

impl From<&BigInt> for FastInteger {
    fn from(n: &BigInt) -> Self {
        FastInteger::from_bigint(n)
    }
}

impl From<BigInt> for FastInteger {
    fn from(n: BigInt) -> Self {
        match n.to_i64() {
            Some(small) => FastInteger::new(small),
            None => FastInteger(Repr::Large(n)),
        }
    }
}

impl From<FastInteger> for BigInt {
    fn from(n: FastInteger) -> Self {
        n.into_bigint()
    }
}

impl PartialEq for FastInteger {
    fn eq(&self, other: &FastInteger) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl Eq for FastInteger {}

impl PartialOrd for FastInteger {
    fn partial_cmp(&self, other: &FastInteger) -> Option<Ordering> {
        Some(self.compare_to(other))
    }
}

impl Ord for FastInteger {
    fn cmp(&self, other: &FastInteger) -> Ordering {
        self.compare_to(other)
    }
}

impl fmt::Display for FastInteger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.0 {
            Repr::Small(n) => fmt::Display::fmt(n, f),
            Repr::Large(n) => fmt::Display::fmt(n, f),
        }
    }
}

impl fmt::Debug for FastInteger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FastInteger({})", self)
    }
}

/// Return a.max(b) without consuming
pub(crate) fn max_fast(a: &FastInteger, b: &FastInteger) -> FastInteger {
    if a >= b { a.clone() } else { b.clone() }
}

/// Return a.min(b) without consuming
pub(crate) fn min_fast(a: &FastInteger, b: &FastInteger) -> FastInteger {
    if a <= b { a.clone() } else { b.clone() }
}

impl FastInteger {
    /// Return copy of self plus value
    pub(crate) fn plus(&self, value: &FastInteger) -> FastInteger {
        let mut res = self.clone();
        res.add(value);
        res
    }

    /// Return copy of self minus value
    pub(crate) fn minus(&self, value: &FastInteger) -> FastInteger {
        let mut res = self.clone();
        res.subtract(value);
        res
    }

    /// Return copy of self plus integer value
    pub(crate) fn plus_int(&self, value: i64) -> FastInteger {
        let mut res = self.clone();
        res.add_int(value);
        res
    }
}

impl Zero for FastInteger {
    fn zero() -> Self {
        FastInteger::new(0)
    }

    fn is_zero(&self) -> bool {
        self.sign() == 0
    }
}

impl std::ops::Add for FastInteger {
    type Output = FastInteger;

    fn add(mut self, rhs: FastInteger) -> FastInteger {
        FastInteger::add(&mut self, &rhs);
        self
    }
}


#[cfg(test)]
#[allow(non_snake_case)]
mod test {
    use super::*;
    include!("fast_integer.tests.rs");
}
