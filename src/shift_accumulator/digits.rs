//! Accumulator discarding decimal digits

use std::sync::Arc;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use super::{huge_count, Magnitude, ShiftAccumulator};
use crate::powers::{count_decimal_digits_u64, RadixPowers};
use crate::FastInteger;


/// Powers of ten fitting in u64: 10^0 ..= 10^19
const TEN_POWERS_U64: [u64; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];


/// Shift accumulator for radix 10
#[derive(Clone, Debug)]
pub struct DigitShiftAccumulator {
    magnitude: Magnitude,
    discarded: FastInteger,
    last_discarded: u32,
    older_discarded: bool,
    powers: Arc<RadixPowers>,
}

impl DigitShiftAccumulator {
    /// Accumulator over `n` with nothing discarded yet
    pub fn new(n: &BigUint, powers: Arc<RadixPowers>) -> Self {
        Self::with_discarded(n, 0, false, powers)
    }

    /// Accumulator over `n`, seeded with sticky information from a
    /// previous computation
    pub fn with_discarded(
        n: &BigUint,
        last_discarded: u32,
        older_discarded: bool,
        powers: Arc<RadixPowers>,
    ) -> Self {
        debug_assert!(last_discarded <= 9);
        DigitShiftAccumulator {
            magnitude: Magnitude::from_biguint(n),
            discarded: FastInteger::zero(),
            last_discarded: last_discarded,
            older_discarded: older_discarded,
            powers: powers,
        }
    }

    /// Number of significant digits, 0 for zero
    fn digit_count(&self) -> u64 {
        match &self.magnitude {
            Magnitude::Small(0) => 0,
            Magnitude::Small(n) => count_decimal_digits_u64(*n),
            Magnitude::Large(n) => self.powers.count_decimal_digits(n),
        }
    }

    fn discard_everything(&mut self) {
        self.older_discarded |= self.last_discarded != 0 || !self.magnitude.is_zero();
        self.last_discarded = 0;
        self.magnitude = Magnitude::Small(0);
    }
}

impl ShiftAccumulator for DigitShiftAccumulator {
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
        FastInteger::from(self.digit_count().max(1))
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

        if count > self.digit_count() {
            self.discard_everything();
            return;
        }

        // 1 <= count <= digit_count
        let last_idx = count - 1;
        match &self.magnitude {
            Magnitude::Small(n) => {
                // at most 20 digits in u64, so last_idx <= 19
                let (q, lower) = n.div_rem(&TEN_POWERS_U64[last_idx as usize]);
                let (q, last) = q.div_rem(&10);
                self.older_discarded |= self.last_discarded != 0 || lower != 0;
                self.last_discarded = last as u32;
                self.magnitude = Magnitude::Small(q);
            }
            Magnitude::Large(n) => {
                let (q, lower) = if last_idx == 0 {
                    (n.clone(), BigUint::zero())
                } else {
                    n.div_rem(&self.powers.ten_to_the(last_idx))
                };
                let (q, last) = q.div_rem(&BigUint::from(10u8));
                self.older_discarded |= self.last_discarded != 0 || !lower.is_zero();
                self.last_discarded = last.to_u32().unwrap_or(0);
                self.magnitude = Magnitude::from_biguint_owned(q);
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
