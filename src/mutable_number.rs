//! Growable unsigned integer supporting in-place small-integer operations

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint};

use crate::ArithmeticError;

/// Extra words allocated whenever a carry spills past the capacity
const GROWTH_SLACK: usize = 20;


/// Non-negative integer stored as little-endian 32-bit words
///
/// Meant to be created per computation, mutated through a chain of
/// calls, then converted to an immutable [`BigUint`].
///
/// ```
/// use bigradix::MutableNumber;
/// use bigradix::num_bigint::BigUint;
///
/// let mut n = MutableNumber::new(0).unwrap();
/// for digit in [1, 2, 3, 4] {
///     n.multiply(10).unwrap().add(digit).unwrap();
/// }
/// assert_eq!(n.to_biguint(), BigUint::from(1234u32));
/// ```
#[derive(Clone, Debug)]
pub struct MutableNumber {
    data: Vec<u32>,
    /// number of significant words; never counts leading zero words
    word_count: usize,
}

impl MutableNumber {
    /// Create from non-negative integer
    pub fn new(value: i32) -> Result<Self, ArithmeticError> {
        if value < 0 {
            return Err(ArithmeticError::invalid_argument("MutableNumber value must not be negative"));
        }
        let mut data = vec![0u32; 4];
        data[0] = value as u32;
        Ok(MutableNumber {
            data: data,
            word_count: if value == 0 { 0 } else { 1 },
        })
    }

    /// Create from arbitrary-precision integer
    pub fn from_biguint(value: &BigUint) -> Self {
        let data = value.to_u32_digits();
        let word_count = data.len();
        MutableNumber { data, word_count }
    }

    /// Build an arbitrary-precision integer directly from little-endian words
    pub fn words_to_biguint(words: &[u32]) -> BigUint {
        BigUint::from_slice(words)
    }

    /// Convert to arbitrary-precision integer
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_slice(&self.data[..self.word_count])
    }

    /// Convert to (non-negative) signed arbitrary-precision integer
    pub fn to_bigint(&self) -> BigInt {
        BigInt::from(self.to_biguint())
    }

    /// True if value is zero
    pub fn is_zero(&self) -> bool {
        self.word_count == 0
    }

    /// Number of significant 32-bit words
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Least significant word
    pub fn low_word(&self) -> u32 {
        if self.word_count == 0 { 0 } else { self.data[0] }
    }

    /// Least significant 64 bits
    pub fn low_u64(&self) -> u64 {
        let hi = if self.word_count > 1 { self.data[1] as u64 } else { 0 };
        (hi << 32) | self.low_word() as u64
    }

    /// Value as i32, if in range
    pub fn to_i32(&self) -> Option<i32> {
        match self.word_count {
            0 => Some(0),
            1 => i32::try_from(self.data[0]).ok(),
            _ => None,
        }
    }

    /// self *= multiplicand
    pub fn multiply(&mut self, multiplicand: i32) -> Result<&mut Self, ArithmeticError> {
        if multiplicand < 0 {
            return Err(ArithmeticError::invalid_argument("multiplicand must not be negative"));
        }
        if multiplicand == 0 {
            self.word_count = 0;
            self.data.iter_mut().for_each(|w| *w = 0);
            return Ok(self);
        }
        let m = multiplicand as u64;
        let mut carry = 0u64;
        for word in self.data[..self.word_count].iter_mut() {
            let product = *word as u64 * m + carry;
            *word = product as u32;
            carry = product >> 32;
        }
        if carry != 0 {
            self.push_word(carry as u32);
        }
        Ok(self)
    }

    /// self += augend
    pub fn add(&mut self, augend: i32) -> Result<&mut Self, ArithmeticError> {
        if augend < 0 {
            return Err(ArithmeticError::invalid_argument("augend must not be negative"));
        }
        let mut carry = augend as u64;
        let mut idx = 0;
        while carry != 0 && idx < self.word_count {
            let sum = self.data[idx] as u64 + carry;
            self.data[idx] = sum as u32;
            carry = sum >> 32;
            idx += 1;
        }
        if carry != 0 {
            self.push_word(carry as u32);
        }
        Ok(self)
    }

    /// self -= other
    ///
    /// Caller guarantees `self >= other`.
    ///
    pub fn subtract(&mut self, other: &MutableNumber) -> &mut Self {
        debug_assert!(*self >= *other);
        let mut borrow = 0i64;
        for idx in 0..self.word_count {
            let rhs = if idx < other.word_count { other.data[idx] as i64 } else { 0 };
            let mut diff = self.data[idx] as i64 - rhs - borrow;
            if diff < 0 {
                diff += 1 << 32;
                borrow = 1;
            } else {
                borrow = 0;
            }
            self.data[idx] = diff as u32;
            if borrow == 0 && idx >= other.word_count {
                break;
            }
        }
        self.trim();
        self
    }

    fn push_word(&mut self, word: u32) {
        if self.word_count == self.data.len() {
            self.data.resize(self.data.len() + GROWTH_SLACK, 0);
        }
        self.data[self.word_count] = word;
        self.word_count += 1;
    }

    fn trim(&mut self) {
        while self.word_count > 0 && self.data[self.word_count - 1] == 0 {
            self.word_count -= 1;
        }
    }
}

impl Default for MutableNumber {
    fn default() -> Self {
        MutableNumber {
            data: vec![0u32; 4],
            word_count: 0,
        }
    }
}

impl PartialEq for MutableNumber {
    fn eq(&self, other: &MutableNumber) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MutableNumber {}

impl PartialOrd for MutableNumber {
    fn partial_cmp(&self, other: &MutableNumber) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MutableNumber {
    fn cmp(&self, other: &MutableNumber) -> Ordering {
        let lhs = &self.data[..self.word_count];
        let rhs = &other.data[..other.word_count];
        lhs.len()
           .cmp(&rhs.len())
           .then_with(|| lhs.iter().rev().cmp(rhs.iter().rev()))
    }
}

impl From<&MutableNumber> for BigUint {
    fn from(n: &MutableNumber) -> Self {
        n.to_biguint()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use num_traits::{Num, One};

    #[test]
    fn negative_input_is_invalid() {
        assert!(matches!(MutableNumber::new(-1), Err(ArithmeticError::InvalidArgument(_))));

        let mut n = MutableNumber::new(5).unwrap();
        assert!(n.multiply(-2).is_err());
        assert!(n.add(-2).is_err());
        assert_eq!(n.to_i32(), Some(5));
    }

    #[test]
    fn multiply_grows_past_capacity() {
        let mut n = MutableNumber::new(1).unwrap();
        let mut expected = BigUint::one();
        for _ in 0..200 {
            n.multiply(1_000_000_007).unwrap();
            expected *= 1_000_000_007u32;
        }
        assert_eq!(n.to_biguint(), expected);
        assert!(n.word_count() > 24);
    }

    #[test]
    fn add_carries_through_words() {
        let mut n = MutableNumber::from_biguint(&BigUint::from(u64::MAX));
        n.add(1).unwrap();
        assert_eq!(n.to_biguint(), BigUint::from(u64::MAX) + 1u32);
        assert_eq!(n.word_count(), 3);
        assert_eq!(n.low_u64(), 0);
    }

    #[test]
    fn multiply_by_zero() {
        let mut n = MutableNumber::from_biguint(&BigUint::from(u64::MAX));
        n.multiply(0).unwrap();
        assert!(n.is_zero());
        n.add(7).unwrap();
        assert_eq!(n.low_word(), 7);
    }

    #[test]
    fn subtract_borrows() {
        let mut a = MutableNumber::from_biguint(&BigUint::from(1u128 << 64));
        let b = MutableNumber::new(1).unwrap();
        a.subtract(&b);
        assert_eq!(a.to_biguint(), BigUint::from(u64::MAX));
        assert_eq!(a.word_count(), 2);

        let c = a.clone();
        a.subtract(&c);
        assert!(a.is_zero());
    }

    #[test]
    fn compare_most_significant_first() {
        let a = MutableNumber::from_biguint(&BigUint::from(0x1_0000_0000u64));
        let b = MutableNumber::new(i32::MAX).unwrap();
        assert!(a > b);

        let c = MutableNumber::from_biguint(&BigUint::from(0x1_0000_0001u64));
        assert!(c > a);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn words_to_biguint_is_little_endian() {
        let n = MutableNumber::words_to_biguint(&[0x89abcdef, 0x01234567]);
        assert_eq!(n, BigUint::from_str_radix("0123456789abcdef", 16).unwrap());
    }
}
