//! Shift accumulators
//!
//! A shift accumulator right-shifts a non-negative magnitude by some
//! number of bits (or decimal digits), remembering just enough about the
//! discarded part to round correctly afterwards:
//!
//!  * the *last* discarded unit (the one immediately below the new
//!    least-significant unit), and
//!  * whether any *older* discarded unit was nonzero (the sticky bit).
//!

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::FastInteger;

mod bits;
mod digits;

pub use self::bits::BitShiftAccumulator;
pub use self::digits::DigitShiftAccumulator;


/// Interface of the bit- and digit-based accumulators
pub trait ShiftAccumulator {
    /// Current (shifted) magnitude
    fn shifted_int(&self) -> BigUint;

    /// Consume the accumulator, returning the shifted magnitude
    fn into_shifted_int(self) -> BigUint;

    /// Current magnitude as a [`FastInteger`]
    fn shifted_int_fast(&self) -> FastInteger {
        FastInteger::from(num_bigint::BigInt::from(self.shifted_int()))
    }

    /// Number of bits (or digits) in the current magnitude; 1 for zero
    fn digit_length(&self) -> FastInteger;

    /// Total count of bits (or digits) discarded so far
    fn discarded_digit_count(&self) -> &FastInteger;

    /// The most recently discarded bit (or digit)
    fn last_discarded_digit(&self) -> u32;

    /// True if any bit (or digit) discarded before the last was nonzero
    fn older_discarded_digits(&self) -> bool;

    /// Discard the `count` least significant bits (or digits)
    fn shift_right_int(&mut self, count: u64);

    /// Discard the `count` least significant bits (or digits)
    ///
    /// Non-positive counts do nothing.
    fn shift_right(&mut self, count: &FastInteger);

    /// Shift right until the magnitude has at most `digits` bits (or digits)
    fn shift_to_digits(&mut self, digits: &FastInteger) {
        let length = self.digit_length();
        if length <= *digits {
            return;
        }
        let excess = length.minus(digits);
        self.shift_right(&excess);
    }

    /// True if anything nonzero was discarded
    fn is_inexact(&self) -> bool {
        self.last_discarded_digit() != 0 || self.older_discarded_digits()
    }
}


/// Magnitude backing an accumulator: a `u64` while it fits
#[derive(Clone, Debug, PartialEq, Eq)]
enum Magnitude {
    Small(u64),
    Large(BigUint),
}

impl Magnitude {
    fn from_biguint(n: &BigUint) -> Self {
        match n.to_u64() {
            Some(small) => Magnitude::Small(small),
            None => Magnitude::Large(n.clone()),
        }
    }

    fn from_biguint_owned(n: BigUint) -> Self {
        match n.to_u64() {
            Some(small) => Magnitude::Small(small),
            None => Magnitude::Large(n),
        }
    }

    fn to_biguint(&self) -> BigUint {
        match self {
            Magnitude::Small(n) => BigUint::from(*n),
            Magnitude::Large(n) => n.clone(),
        }
    }

    fn into_biguint(self) -> BigUint {
        match self {
            Magnitude::Small(n) => BigUint::from(n),
            Magnitude::Large(n) => n,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Magnitude::Small(n) => *n == 0,
            Magnitude::Large(n) => n.bits() == 0,
        }
    }
}

/// Shift count too large for a single step: everything is discarded
fn huge_count(count: &FastInteger) -> bool {
    count.to_u64().is_none() && count.sign() > 0
}


#[cfg(test)]
mod test {
    use super::*;
    include!("shift_accumulator.tests.rs");
}
