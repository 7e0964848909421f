// FastInteger tests, included by fast_integer.rs

use std::str::FromStr;
use paste::paste;


fn big(s: &str) -> BigInt {
    BigInt::from_str(s).unwrap()
}

#[test]
fn test_new_is_small() {
    let n = FastInteger::new(42);
    assert!(!n.is_promoted());
    assert_eq!(n.to_i64(), Some(42));
    assert_eq!(n.sign(), 1);
}

#[test]
fn test_from_bigint_stays_small_when_in_range() {
    let n = FastInteger::from_bigint(&BigInt::from(-77));
    assert!(!n.is_promoted());
    assert_eq!(n.to_i32(), Some(-77));

    let n = FastInteger::from_bigint(&big("9223372036854775808"));
    assert!(n.is_promoted());
    assert_eq!(n.to_i64(), None);
    assert_eq!(n.to_u64(), Some(9223372036854775808));
}

#[test]
fn test_add_crossing_i64_max() {
    let mut n = FastInteger::new(i64::MAX);
    n.add_int(1);
    assert!(n.is_promoted());
    assert_eq!(n.to_bigint(), BigInt::from(i64::MAX) + 1);
    assert_eq!(n.to_string(), "9223372036854775808");
}

#[test]
fn test_subtract_crossing_i64_min() {
    let mut n = FastInteger::new(i64::MIN);
    n.subtract(&FastInteger::new(1));
    assert!(n.is_promoted());
    assert_eq!(n.to_bigint(), BigInt::from(i64::MIN) - 1);
}

#[test]
fn test_promotion_is_one_way() {
    let mut n = FastInteger::new(i64::MAX);
    n.increment();
    n.decrement();
    assert!(n.is_promoted());
    assert_eq!(n.to_i64(), Some(i64::MAX));
    assert!(n.can_fit_in_i64());
    assert!(!n.can_fit_in_i32());
    assert_eq!(n.compare_to_int(i64::MAX), Ordering::Equal);
}

#[test]
fn test_negate_min() {
    let mut n = FastInteger::new(i64::MIN);
    n.negate();
    assert!(n.is_promoted());
    assert_eq!(n.to_bigint(), -BigInt::from(i64::MIN));
    assert_eq!(n.sign(), 1);

    n.negate();
    assert_eq!(n.to_i64(), Some(i64::MIN));
}

#[test]
fn test_abs() {
    let mut n = FastInteger::new(-5);
    n.abs();
    assert_eq!(n, FastInteger::new(5));

    let mut n = FastInteger::new(i64::MIN);
    n.abs();
    assert_eq!(n.to_bigint(), big("9223372036854775808"));
}

#[test]
fn test_multiply_overflow() {
    let mut n = FastInteger::new(1 << 40);
    n.multiply_int(1 << 40);
    assert!(n.is_promoted());
    assert_eq!(n.to_bigint(), BigInt::from(1u128 << 80));

    n.multiply(&FastInteger::new(-1));
    assert_eq!(n.sign(), -1);
}

#[test]
fn test_chaining() {
    let mut n = FastInteger::new(10);
    n.add_int(5).multiply_int(3).subtract_int(45).increment();
    assert_eq!(n.to_i64(), Some(1));
}

#[test]
fn test_divide_by_zero_is_error() {
    let mut n = FastInteger::new(10);
    assert!(matches!(n.divide(0), Err(ArithmeticError::InvalidArgument(_))));
    assert!(matches!(n.modulo(0), Err(ArithmeticError::InvalidArgument(_))));
    // value unchanged
    assert_eq!(n.to_i64(), Some(10));
}

#[test]
fn test_divide_min_by_negative_one() {
    let mut n = FastInteger::new(i64::MIN);
    n.divide(-1).unwrap();
    assert!(n.is_promoted());
    assert_eq!(n.to_bigint(), big("9223372036854775808"));
}

#[test]
fn test_modulo_min_by_negative_one() {
    let mut n = FastInteger::new(i64::MIN);
    n.modulo(-1).unwrap();
    assert!(n.is_zero());
}

#[test]
fn test_compare_mixed_representations() {
    let mut large = FastInteger::new(i64::MAX);
    large.add_int(100);
    let small = FastInteger::new(i64::MAX);

    assert!(large > small);
    assert!(small < large);
    assert_eq!(large.compare_to_int(i64::MAX), Ordering::Greater);

    let mut neg_large = FastInteger::new(i64::MIN);
    neg_large.subtract_int(1);
    assert_eq!(neg_large.compare_to_int(i64::MIN), Ordering::Less);
    assert_eq!(neg_large.compare_to_int(0), Ordering::Less);
}

#[test]
fn test_is_even() {
    assert!(FastInteger::new(0).is_even());
    assert!(!FastInteger::new(-3).is_even());
    let mut n = FastInteger::new(i64::MAX);
    n.add_int(1);
    assert!(n.is_even());
}

#[test]
fn test_debug() {
    assert_eq!(format!("{:?}", FastInteger::new(-12)), "FastInteger(-12)");
}

macro_rules! impl_case {
    ($name:ident: $a:literal / $d:literal => $q:literal, $r:literal) => {
        paste! {
            #[test]
            fn [< case_divmod_ $name >]() {
                let mut q = FastInteger::from_bigint(&big($a));
                q.divide($d).unwrap();
                assert_eq!(q.to_bigint(), big($q));

                let mut r = FastInteger::from_bigint(&big($a));
                r.modulo($d).unwrap();
                assert_eq!(r.to_bigint(), big($r));
            }
        }
    };
}

impl_case!(pos_pos: "17" / 5 => "3", "2");
impl_case!(neg_pos: "-17" / 5 => "-3", "-2");
impl_case!(pos_neg: "17" / -5 => "-3", "2");
impl_case!(neg_neg: "-17" / -5 => "3", "-2");
impl_case!(large: "100000000000000000000007" / 10 => "10000000000000000000000", "7");
impl_case!(neg_large: "-100000000000000000000007" / 10 => "-10000000000000000000000", "-7");


mod prop {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn add_matches_bigint(a: i64, b: i64) {
            let mut n = FastInteger::new(a);
            n.add(&FastInteger::new(b));
            prop_assert_eq!(n.to_bigint(), BigInt::from(a) + BigInt::from(b));
        }

        #[test]
        fn subtract_matches_bigint(a: i64, b: i64) {
            let mut n = FastInteger::new(a);
            n.subtract_int(b);
            prop_assert_eq!(n.to_bigint(), BigInt::from(a) - BigInt::from(b));
        }

        #[test]
        fn multiply_matches_bigint(a: i64, b: i64) {
            let mut n = FastInteger::new(a);
            n.multiply_int(b);
            prop_assert_eq!(n.to_bigint(), BigInt::from(a) * BigInt::from(b));
        }

        #[test]
        fn promoted_path_matches_small_path(a: i64, b: i32, c: i64) {
            // force promotion, then bring value back into range
            let mut promoted = FastInteger::new(a);
            promoted.add_big(&big("100000000000000000000000"));
            promoted.subtract_big(&big("100000000000000000000000"));

            let mut small = FastInteger::new(a);

            promoted.add_int(c);
            small.add_int(c);
            prop_assert_eq!(&promoted, &small);

            if b != 0 {
                promoted.divide(b).unwrap();
                small.divide(b).unwrap();
                prop_assert_eq!(&promoted, &small);
            }

            promoted.negate();
            small.negate();
            prop_assert_eq!(promoted.to_bigint(), small.to_bigint());
            prop_assert_eq!(promoted.sign(), small.sign());
        }
    }
}
