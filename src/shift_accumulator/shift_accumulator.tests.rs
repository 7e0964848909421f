// Shift accumulator tests, included by shift_accumulator/mod.rs

use std::str::FromStr;
use std::sync::Arc;
use paste::paste;
use num_traits::Zero;

use crate::RadixPowers;

fn digits(n: &str) -> DigitShiftAccumulator {
    DigitShiftAccumulator::new(&BigUint::from_str(n).unwrap(), Arc::new(RadixPowers::new()))
}

fn bits(n: u128) -> BitShiftAccumulator {
    BitShiftAccumulator::new(&BigUint::from(n))
}

macro_rules! impl_case {
    ($name:ident: $n:literal >> $count:literal => $shifted:literal, $last:literal, $older:literal) => {
        paste! {
            #[test]
            fn [< case_digits_ $name >]() {
                let mut acc = digits($n);
                acc.shift_right_int($count);
                assert_eq!(acc.shifted_int().to_string(), $shifted);
                assert_eq!(acc.last_discarded_digit(), $last);
                assert_eq!(acc.older_discarded_digits(), $older);
                assert_eq!(acc.discarded_digit_count().to_u64(), Some($count));
            }
        }
    };
}

impl_case!(one_digit: "1234" >> 1 => "123", 4, false);
impl_case!(two_digits: "1234" >> 2 => "12", 3, true);
impl_case!(trailing_zero: "1250" >> 2 => "12", 5, false);
impl_case!(all_digits: "1234" >> 4 => "0", 1, true);
impl_case!(past_length: "1234" >> 5 => "0", 0, true);
impl_case!(zero: "0" >> 3 => "0", 0, false);
impl_case!(u64_max: "18446744073709551615" >> 19 => "1", 8, true);
impl_case!(u64_max_all: "18446744073709551615" >> 20 => "0", 1, true);
impl_case!(large: "123456789012345678901234567890" >> 10 => "12345678901234567890", 1, true);
impl_case!(large_exact: "500000000000000000000000000000" >> 30 => "0", 5, false);
impl_case!(large_keep_one: "500000000000000000000000000000" >> 29 => "5", 0, false);

#[test]
fn test_zero_has_length_one() {
    assert_eq!(digits("0").digit_length(), FastInteger::new(1));
    assert_eq!(bits(0).digit_length(), FastInteger::new(1));

    let mut acc = digits("987");
    acc.shift_right_int(3);
    assert_eq!(acc.digit_length(), FastInteger::new(1));
}

#[test]
fn test_digit_length() {
    assert_eq!(digits("999").digit_length(), FastInteger::new(3));
    assert_eq!(digits("1000").digit_length(), FastInteger::new(4));
    assert_eq!(digits("100000000000000000000000").digit_length(), FastInteger::new(24));
    assert_eq!(bits(255).digit_length(), FastInteger::new(8));
    assert_eq!(bits(1 << 100).digit_length(), FastInteger::new(101));
}

#[test]
fn test_shift_to_digits() {
    let mut acc = digits("123456");
    acc.shift_to_digits(&FastInteger::new(3));
    assert_eq!(acc.shifted_int(), BigUint::from(123u32));
    assert_eq!(acc.last_discarded_digit(), 4);
    assert!(acc.older_discarded_digits());

    let mut acc = bits(0b1011_0000);
    acc.shift_to_digits(&FastInteger::new(3));
    assert_eq!(acc.shifted_int(), BigUint::from(0b101u32));
    assert_eq!(acc.last_discarded_digit(), 1);
    assert!(!acc.older_discarded_digits());
}

#[test]
fn test_shift_to_digits_is_noop_when_short_enough() {
    let mut acc = DigitShiftAccumulator::with_discarded(
        &BigUint::from(42u32), 7, true, Arc::new(RadixPowers::new()));
    acc.shift_to_digits(&FastInteger::new(2));
    acc.shift_to_digits(&FastInteger::new(10));
    assert_eq!(acc.shifted_int(), BigUint::from(42u32));
    assert_eq!(acc.last_discarded_digit(), 7);
    assert!(acc.older_discarded_digits());
    assert!(acc.discarded_digit_count().is_zero());
}

#[test]
fn test_seeded_digits_fold_into_older() {
    let mut acc = BitShiftAccumulator::with_discarded(&BigUint::from(0b100u32), 1, false);
    acc.shift_right_int(1);
    assert_eq!(acc.last_discarded_digit(), 0);
    assert!(acc.older_discarded_digits());
}

#[test]
fn test_bits_small_full_width() {
    let mut acc = BitShiftAccumulator::from_u64(u64::MAX);
    acc.shift_right_int(64);
    assert!(acc.shifted_int().is_zero());
    assert_eq!(acc.last_discarded_digit(), 1);
    assert!(acc.older_discarded_digits());
}

#[test]
fn test_bits_large() {
    let mut acc = bits((1 << 100) | (1 << 9));
    acc.shift_right_int(10);
    assert_eq!(acc.shifted_int(), BigUint::from(1u128 << 90));
    assert_eq!(acc.last_discarded_digit(), 1);
    assert!(!acc.older_discarded_digits());

    let mut acc = bits((1 << 100) | 1);
    acc.shift_right_int(10);
    assert_eq!(acc.last_discarded_digit(), 0);
    assert!(acc.older_discarded_digits());
}

#[test]
fn test_huge_count_discards_everything() {
    let mut count = FastInteger::new(i64::MAX);
    count.multiply_int(4);

    let mut acc = digits("5");
    acc.shift_right(&count);
    assert!(acc.shifted_int().is_zero());
    assert_eq!(acc.last_discarded_digit(), 0);
    assert!(acc.older_discarded_digits());
    assert_eq!(acc.discarded_digit_count(), &count);
}

#[test]
fn test_negative_count_is_noop() {
    let mut acc = bits(12345);
    acc.shift_right(&FastInteger::new(-3));
    assert_eq!(acc.shifted_int(), BigUint::from(12345u32));
    assert!(!acc.is_inexact());
}


mod prop {
    use super::*;
    use proptest::prelude::*;

    fn state<A: ShiftAccumulator>(acc: &A) -> (BigUint, u32, bool) {
        (acc.shifted_int(), acc.last_discarded_digit(), acc.older_discarded_digits())
    }

    proptest! {
        #[test]
        fn digit_shift_is_associative(hi: u64, lo: u64, k in 0u64..45, j in 0u64..45) {
            let n = (BigUint::from(hi) << 64usize) | BigUint::from(lo);
            let powers = Arc::new(RadixPowers::new());

            let mut twice = DigitShiftAccumulator::new(&n, powers.clone());
            twice.shift_right_int(k);
            twice.shift_right_int(j);

            let mut once = DigitShiftAccumulator::new(&n, powers);
            once.shift_right_int(k + j);

            prop_assert_eq!(state(&twice), state(&once));
            prop_assert_eq!(twice.discarded_digit_count(), once.discarded_digit_count());
        }

        #[test]
        fn bit_shift_is_associative(hi: u64, lo: u64, k in 0u64..140, j in 0u64..140) {
            let n = (BigUint::from(hi) << 64usize) | BigUint::from(lo);

            let mut twice = BitShiftAccumulator::new(&n);
            twice.shift_right_int(k);
            twice.shift_right_int(j);

            let mut once = BitShiftAccumulator::new(&n);
            once.shift_right_int(k + j);

            prop_assert_eq!(state(&twice), state(&once));
        }

        #[test]
        fn bit_shift_matches_definition(n: u64, k in 1u64..70) {
            let mut acc = BitShiftAccumulator::from_u64(n);
            acc.shift_right_int(k);

            let wide = n as u128;
            let expected_last = ((wide >> (k - 1)) & 1) as u32;
            let expected_older = wide & ((1u128 << (k - 1)) - 1) != 0;
            prop_assert_eq!(acc.shifted_int(), BigUint::from(wide >> k));
            prop_assert_eq!(acc.last_discarded_digit(), expected_last);
            prop_assert_eq!(acc.older_discarded_digits(), expected_older);
        }
    }
}
