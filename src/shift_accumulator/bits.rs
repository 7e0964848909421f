//! Accumulator discarding binary digits

use num_bigint::BigUint;

use super::{huge_count, Magnitude, ShiftAccumulator};
use crate::FastInteger;


/// Shift accumulator for radix 2
#[derive(Clone, Debug)]
pub struct BitShiftAccumulator {
    magnitude: Magnitude,
    discarded: FastInteger,
    last_discarded: u32,
    older_discarded: bool,
}

impl BitShiftAccumulator {
    /// Accumulator over `n` with nothing discarded yet
    pub fn new(n: &BigUint) -> Self {
        Self::with_discarded(n, 0, false)
    }

    /// Accumulator over `n`, seeded with sticky information from a
    /// previous computation (for example, a nonzero division remainder)
    pub fn with_discarded(n: &BigUint, last_discarded: u32, older_discarded: bool) -> Self {
        debug_assert!(last_discarded <= 1);
        BitShiftAccumulator {
            magnitude: Magnitude::from_biguint(n),
            discarded: FastInteger::zero(),
            last_discarded: last_discarded,
            older_discarded: older_discarded,
        }
    }

    /// Accumulator over a 64-bit magnitude
    pub fn from_u64(n: u64) -> Self {
        BitShiftAccumulator {
            magnitude: Magnitude::Small(n),
            discarded: FastInteger::zero(),
            last_discarded: 0,
            older_discarded: false,
        }
    }

    /// Number of significant bits, 0 for zero
    fn bit_count(&self) -> u64 {
        match &self.magnitude {
            Magnitude::Small(n) => (u64::BITS - n.leading_zeros()) as u64,
            Magnitude::Large(n) => n.bits(),
        }
    }

    fn discard_everything(&mut self) {
        // the bit just below the new least significant bit is beyond the
        // most significant bit, so it is zero
        self.older_discarded |= self.last_discarded != 0 || !self.magnitude.is_zero();
        self.last_discarded = 0;
        self.magnitude = Magnitude::Small(0);
    }
}

impl ShiftAccumulator for BitShiftAccumulator {
    fn shifted_int(&self) -> BigUint {
        self.magnitude.to_biguint()
    }

    fn into_shifted_int(self) -> BigUint {
        self.magnitude.into_biguint()
    }

    fn shifted_int_fast(&self) -> FastInteger {
        match &self.magnitude {
            Magnitude::Small(n) => FastInteger::from(*n),
            Magnitude::Large(n) => FastInteger::from(num_bigint::BigInt::from(n.clone())),
        }
    }

    fn digit_length(&self) -> FastInteger {
        FastInteger::from(self.bit_count().max(1))
    }

    fn discarded_digit_count(&self) -> &FastInteger {
        &self.discarded
    }

    fn last_discarded_digit(&self) -> u32 {
        self.last_discarded
    }

    fn older_discarded_digits(&self) -> bool {
        self.older_discarded
    }

    fn shift_right_int(&mut self, count: u64) {
        if count == 0 {
            return;
        }
        self.discarded.add(&FastInteger::from(count));

        if count > self.bit_count() {
            self.discard_everything();
            return;
        }

        // 1 <= count <= bit_count
        let last_idx = count - 1;
        match &mut self.magnitude {
            Magnitude::Small(n) => {
                let last = (*n >> last_idx) & 1;
                let lower_mask = (1u64 << last_idx) - 1;
                self.older_discarded |= self.last_discarded != 0 || (*n & lower_mask) != 0;
                self.last_discarded = last as u32;
                // count <= 64; shifting all 64 bits out leaves zero
                *n = n.checked_shr(count as u32).unwrap_or(0);
            }
            Magnitude::Large(n) => {
                let last = n.bit(last_idx);
                // trailing_zeros is Some, magnitude is nonzero here
                let lower_nonzero = n.trailing_zeros().map_or(false, |tz| tz < last_idx);
                self.older_discarded |= self.last_discarded != 0 || lower_nonzero;
                self.last_discarded = last as u32;
                let shifted = &*n >> count as usize;
                self.magnitude = Magnitude::from_biguint_owned(shifted);
            }
        }
    }

    fn shift_right(&mut self, count: &FastInteger) {
        if count.sign() <= 0 {
            return;
        }
        match count.to_u64() {
            Some(count) => self.shift_right_int(count),
            None => {
                debug_assert!(huge_count(count));
                self.discarded.add(count);
                self.discard_everything();
            }
        }
    }
}
