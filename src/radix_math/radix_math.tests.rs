// Test the radix arithmetic engine

use crate::{ArithmeticError, ExtendedFloat, Rounding};
use num_bigint::BigInt;
use paste::paste;

const INEXACT: Flags = Flags::INEXACT.union(Flags::ROUNDED);

macro_rules! impl_case {
    ($name:ident: $op:ident($($arg:literal),*) @ $ctx:expr => $expected:literal $(, $status:expr)?) => {
        paste! {
            #[test]
            fn [< case_ $name >]() {
                let math = decimal_math();
                let result = math.$op($(&dec($arg),)* &$ctx);
                assert_decimal(result, $expected, Flags::empty() $(| $status)?);
            }
        }
    };
}

mod add {
    use super::*;

    impl_case!(integers: add("1", "1") @ basic(Rounding::HalfUp) => "2");
    impl_case!(fractions: add("1.23456789", "1.00000000") @ basic(Rounding::HalfUp) => "2.23456789");
    impl_case!(rounded: add("12345678", "0.123") @ basic(Rounding::HalfUp) => "12345678.1", INEXACT);
    impl_case!(carry: add("0.4444444444", "0.5555555555") @ basic(Rounding::HalfUp) => "1.00000000", INEXACT);
    impl_case!(aligns_exponents: add("1E+2", "1E+4") @ basic(Rounding::HalfUp) => "1.01E+4");
    impl_case!(far_below_precision: add("1", "1E-100") @ basic(Rounding::HalfUp) => "1.00000000", INEXACT);
    impl_case!(far_below_ceiling: add("1", "1E-100") @ basic(Rounding::Ceiling) => "1.00000001", INEXACT);
    impl_case!(zero_keeps_exponent: add("1.5", "0.000") @ basic(Rounding::HalfUp) => "1.500");
    impl_case!(signed_zeros: add("0", "-0") @ basic(Rounding::HalfUp) => "0");
    impl_case!(signed_zeros_floor: add("0", "-0") @ basic(Rounding::Floor) => "-0");
    impl_case!(cancel_floor: add("2.5", "-2.5") @ basic(Rounding::Floor) => "-0.0");
    impl_case!(infinities: add("Infinity", "-Infinity") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
    impl_case!(infinity_wins: add("-Infinity", "1E+300") @ basic(Rounding::HalfUp) => "-Infinity");
    impl_case!(signaling_nan: add("1", "sNaN7") @ basic(Rounding::HalfUp) => "NaN7", Flags::INVALID);
    impl_case!(signaling_before_quiet: add("NaN5", "sNaN7") @ basic(Rounding::HalfUp) => "NaN7", Flags::INVALID);
    impl_case!(quiet_nan: add("-NaN3", "1") @ basic(Rounding::HalfUp) => "-NaN3");
}

mod subtract {
    use super::*;

    impl_case!(simple: subtract("1.3", "1.07") @ basic(Rounding::HalfUp) => "0.23");
    impl_case!(to_zero: subtract("1.3", "1.30") @ basic(Rounding::HalfUp) => "0.00");
    impl_case!(negative: subtract("1.3", "2.07") @ basic(Rounding::HalfUp) => "-0.77");
    impl_case!(infinities: subtract("Infinity", "Infinity") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
}

mod multiply {
    use super::*;

    impl_case!(keeps_trailing_zeros: multiply("1.20", "3") @ basic(Rounding::HalfUp) => "3.60");
    impl_case!(integers: multiply("7", "3") @ basic(Rounding::HalfUp) => "21");
    impl_case!(fractions: multiply("0.9", "0.8") @ basic(Rounding::HalfUp) => "0.72");
    impl_case!(negative_zero: multiply("0.9", "-0") @ basic(Rounding::HalfUp) => "-0.0");
    impl_case!(rounded: multiply("654321", "654321") @ basic(Rounding::HalfUp) => "4.28135971E+11", INEXACT);
    impl_case!(zero_times_infinity: multiply("0", "-Infinity") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
    impl_case!(infinity: multiply("-2", "Infinity") @ basic(Rounding::HalfUp) => "-Infinity");
}

mod multiply_and_add {
    use super::*;

    impl_case!(simple: multiply_and_add("3", "5", "7") @ basic(Rounding::HalfUp) => "22");
    impl_case!(single_rounding: multiply_and_add("0.9", "0.9", "-0.81") @ basic(Rounding::HalfUp) => "0.00");
    impl_case!(long_product: multiply_and_add("654321", "654321", "-428135971041") @ basic(Rounding::HalfUp) => "0");
    impl_case!(infinity_times_zero: multiply_and_add("Infinity", "0", "1") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
}

mod divide {
    use super::*;

    impl_case!(third: divide("1", "3") @ basic(Rounding::HalfUp) => "0.333333333", INEXACT);
    impl_case!(two_thirds: divide("2", "3") @ basic(Rounding::HalfUp) => "0.666666667", INEXACT);
    impl_case!(two_thirds_down: divide("2", "3") @ basic(Rounding::Down) => "0.666666666", INEXACT);
    impl_case!(half: divide("5", "2") @ basic(Rounding::HalfUp) => "2.5");
    impl_case!(tenth: divide("1", "10") @ basic(Rounding::HalfUp) => "0.1");
    impl_case!(one: divide("12", "12") @ basic(Rounding::HalfUp) => "1");
    impl_case!(ideal_exponent: divide("8.00", "2") @ basic(Rounding::HalfUp) => "4.00");
    impl_case!(ideal_exponent_mixed: divide("2.400", "2.0") @ basic(Rounding::HalfUp) => "1.20");
    impl_case!(integer_quotient: divide("1000", "100") @ basic(Rounding::HalfUp) => "10");
    impl_case!(scientific: divide("2.40E+6", "2") @ basic(Rounding::HalfUp) => "1.20E+6");
    impl_case!(by_zero: divide("1", "0") @ basic(Rounding::HalfUp) => "Infinity", Flags::DIVIDE_BY_ZERO);
    impl_case!(negative_by_zero: divide("-1", "0") @ basic(Rounding::HalfUp) => "-Infinity", Flags::DIVIDE_BY_ZERO);
    impl_case!(zero_by_zero: divide("0", "0") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
    impl_case!(infinities: divide("Infinity", "-Infinity") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
    impl_case!(unlimited_terminating: divide("1", "8") @ PrecisionContext::unlimited() => "0.125");
    impl_case!(unlimited_repeating: divide("1", "3") @ PrecisionContext::unlimited() => "NaN", Flags::INVALID);

    #[test]
    fn rounding_unnecessary() {
        let math = decimal_math();
        let ctx = basic(Rounding::Unnecessary);
        let result = math.divide(&dec("1"), &dec("3"), &ctx);
        assert_eq!(result, Err(RadixError::Arithmetic(ArithmeticError::RoundingRequired)));

        let exact = math.divide(&dec("1"), &dec("4"), &ctx).unwrap();
        assert_eq!(exact.value.to_string(), "0.25");
    }

    #[test]
    fn to_exponent() {
        let math = decimal_math();
        let ctx = basic(Rounding::HalfUp);
        let result = math.divide_to_exponent(&dec("10"), &dec("3"), &BigInt::from(-2), &ctx);
        assert_decimal(result, "3.33", INEXACT);

        let result = math.divide_to_exponent(&dec("2"), &dec("3"), &BigInt::from(-2), &ctx);
        assert_decimal(result, "0.67", INEXACT);

        let result = math.divide_to_exponent(&dec("1"), &dec("8"), &BigInt::from(-4), &ctx);
        assert_decimal(result, "0.1250", Flags::empty());

        // quotient with more digits than the precision
        let result = math.divide_to_exponent(&dec("1E+20"), &dec("3"), &BigInt::from(0), &ctx);
        assert_decimal(result, "NaN", Flags::INVALID);
    }
}

mod divide_to_integer {
    use super::*;

    impl_case!(zero_scale: divide_to_integer_zero_scale("10", "3") @ basic(Rounding::HalfUp) => "3");
    impl_case!(zero_scale_fraction: divide_to_integer_zero_scale("1", "0.3") @ basic(Rounding::HalfUp) => "3");
    impl_case!(zero_scale_negative: divide_to_integer_zero_scale("-7", "2") @ basic(Rounding::HalfUp) => "-3");
    impl_case!(zero_scale_small: divide_to_integer_zero_scale("2", "3") @ basic(Rounding::HalfUp) => "0");
    impl_case!(natural_scale: divide_to_integer_natural_scale("1E+3", "1E+1") @ basic(Rounding::HalfUp) => "1E+2");
    impl_case!(natural_scale_integer: divide_to_integer_natural_scale("10", "3") @ basic(Rounding::HalfUp) => "3");
    impl_case!(by_zero: divide_to_integer_zero_scale("10", "0") @ basic(Rounding::HalfUp) => "Infinity", Flags::DIVIDE_BY_ZERO);
    impl_case!(too_long: divide_to_integer_zero_scale("1E+10", "1") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
}

mod remainder {
    use super::*;

    impl_case!(smaller: remainder("2.1", "3") @ basic(Rounding::HalfUp) => "2.1");
    impl_case!(integers: remainder("10", "3") @ basic(Rounding::HalfUp) => "1");
    impl_case!(negative: remainder("-10", "3") @ basic(Rounding::HalfUp) => "-1");
    impl_case!(fraction: remainder("10.2", "1") @ basic(Rounding::HalfUp) => "0.2");
    impl_case!(fractional_divisor: remainder("10", "0.3") @ basic(Rounding::HalfUp) => "0.1");
    impl_case!(keeps_exponent: remainder("3.6", "1.3") @ basic(Rounding::HalfUp) => "1.0");
    impl_case!(exact: remainder("6", "3") @ basic(Rounding::HalfUp) => "0");
    impl_case!(by_zero: remainder("1", "0") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
    impl_case!(by_infinity: remainder("1.5", "Infinity") @ basic(Rounding::HalfUp) => "1.5");
    impl_case!(near_rounds_up: remainder_near("10", "6") @ basic(Rounding::HalfUp) => "-2");
    impl_case!(near_rounds_down: remainder_near("10", "3") @ basic(Rounding::HalfUp) => "1");
    impl_case!(near_fraction: remainder_near("3.6", "1.3") @ basic(Rounding::HalfUp) => "-0.3");
    impl_case!(near_tie_to_even: remainder_near("10", "4") @ basic(Rounding::HalfUp) => "2");
    impl_case!(near_tie_to_even_up: remainder_near("6", "4") @ basic(Rounding::HalfUp) => "-2");
}

mod compare {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn with_context() {
        let math = decimal_math();
        let ctx = basic(Rounding::HalfUp);
        let compare = |a: &str, b: &str, signaling: bool| math.compare_to_with_context(&dec(a), &dec(b), signaling, &ctx);
        assert_decimal(compare("2.1", "3", false), "-1", Flags::empty());
        assert_decimal(compare("2.1", "2.10", false), "0", Flags::empty());
        assert_decimal(compare("Infinity", "1E+384", false), "1", Flags::empty());
        assert_decimal(compare("NaN", "1", false), "NaN", Flags::empty());
        assert_decimal(compare("NaN", "1", true), "NaN", Flags::INVALID);
        assert_decimal(compare("sNaN", "1", false), "NaN", Flags::INVALID);
    }

    #[test]
    fn total_numeric_order() {
        let math = decimal_math();
        assert_eq!(math.compare_to(&dec("1.0"), &dec("1")), Ordering::Equal);
        assert_eq!(math.compare_to(&dec("-0"), &dec("0")), Ordering::Equal);
        assert_eq!(math.compare_to(&dec("-1E+3"), &dec("-999")), Ordering::Less);
        assert_eq!(math.compare_to(&dec("0.0001"), &dec("1E-5")), Ordering::Greater);
        assert_eq!(math.compare_to(&dec("NaN"), &dec("Infinity")), Ordering::Greater);
        assert_eq!(math.compare_to(&dec("NaN"), &dec("sNaN")), Ordering::Equal);
        assert_eq!(math.compare_to(&dec("-Infinity"), &dec("-1E+400")), Ordering::Less);
    }

    impl_case!(max: max("3", "2") @ basic(Rounding::HalfUp) => "3");
    impl_case!(max_signs: max("-10", "3") @ basic(Rounding::HalfUp) => "3");
    impl_case!(max_prefers_larger_exponent: max("1.0", "1") @ basic(Rounding::HalfUp) => "1");
    impl_case!(min_prefers_smaller_exponent: min("1.0", "1") @ basic(Rounding::HalfUp) => "1.0");
    impl_case!(min_signed_zeros: min("0", "-0") @ basic(Rounding::HalfUp) => "-0");
    impl_case!(max_quiet_nan: max("NaN", "1") @ basic(Rounding::HalfUp) => "1");
    impl_case!(min_quiet_nan: min("2", "NaN") @ basic(Rounding::HalfUp) => "2");
    impl_case!(max_signaling_nan: max("sNaN", "1") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
    impl_case!(max_rounds: max("1.23456789012", "1") @ basic(Rounding::HalfUp) => "1.23456789", INEXACT);
    impl_case!(max_magnitude: max_magnitude("-10", "3") @ basic(Rounding::HalfUp) => "-10");
    impl_case!(min_magnitude: min_magnitude("-10", "3") @ basic(Rounding::HalfUp) => "3");
    impl_case!(max_magnitude_tie: max_magnitude("-3", "3") @ basic(Rounding::HalfUp) => "3");
}

mod sign {
    use super::*;

    impl_case!(abs: abs("-2.00") @ basic(Rounding::HalfUp) => "2.00");
    impl_case!(abs_infinity: abs("-Infinity") @ basic(Rounding::HalfUp) => "Infinity");
    impl_case!(negate: negate("2") @ basic(Rounding::HalfUp) => "-2");
    impl_case!(negate_zero: negate("0") @ basic(Rounding::HalfUp) => "-0");
    impl_case!(negate_rounds: negate("1234567891") @ basic(Rounding::HalfUp) => "-1.23456789E+9", INEXACT);
    impl_case!(plus_negative_zero: plus("-0") @ basic(Rounding::HalfUp) => "0");
    impl_case!(plus_negative_zero_floor: plus("-0") @ basic(Rounding::Floor) => "-0");
    impl_case!(plus_signaling_nan: plus("sNaN") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
}

mod rounding {
    use super::*;

    impl_case!(half_even_to_precision: round_to_precision("1234") @ digits(3, Rounding::HalfEven) => "1.23E+3", INEXACT);
    impl_case!(half_up: round_to_precision("2.5") @ digits(1, Rounding::HalfUp) => "3", INEXACT);
    impl_case!(half_even: round_to_precision("2.5") @ digits(1, Rounding::HalfEven) => "2", INEXACT);
    impl_case!(half_down: round_to_precision("2.5") @ digits(1, Rounding::HalfDown) => "2", INEXACT);
    impl_case!(ceiling_negative: round_to_precision("-2.5") @ digits(1, Rounding::Ceiling) => "-2", INEXACT);
    impl_case!(floor_negative: round_to_precision("-2.5") @ digits(1, Rounding::Floor) => "-3", INEXACT);
    impl_case!(up: round_to_precision("2.1") @ digits(1, Rounding::Up) => "3", INEXACT);
    impl_case!(down: round_to_precision("2.9") @ digits(1, Rounding::Down) => "2", INEXACT);
    impl_case!(zero_five_up: round_to_precision("2.1") @ digits(1, Rounding::ZeroFiveUp) => "2", INEXACT);
    impl_case!(zero_five_up_bumps: round_to_precision("5.1") @ digits(1, Rounding::ZeroFiveUp) => "6", INEXACT);
    impl_case!(discarded_zeros: round_to_precision("1200") @ digits(2, Rounding::HalfUp) => "1.2E+3", Flags::ROUNDED);
    impl_case!(exact: round_to_precision("12") @ digits(2, Rounding::HalfUp) => "12");
    impl_case!(carry_into_new_digit: round_to_precision("9.99") @ digits(2, Rounding::HalfUp) => "10", INEXACT);
    impl_case!(unlimited: round_to_precision("123456789012345678901234567890") @ PrecisionContext::unlimited() => "123456789012345678901234567890");

    #[test]
    fn unnecessary_fails_when_inexact() {
        let math = decimal_math();
        let result = math.round_to_precision(&dec("1234"), &digits(3, Rounding::Unnecessary));
        assert_eq!(result, Err(RadixError::Arithmetic(ArithmeticError::RoundingRequired)));

        let result = math.round_to_precision(&dec("1230"), &digits(3, Rounding::Unnecessary));
        assert_decimal(result, "1.23E+3", Flags::ROUNDED);
    }

    impl_case!(binary_precision: round_to_binary_precision("1000") @ digits(4, Rounding::HalfUp) => "1.0E+3", Flags::ROUNDED);
    impl_case!(binary_precision_rerounds: round_to_binary_precision("999") @ digits(4, Rounding::HalfUp) => "1.0E+3", INEXACT);
    impl_case!(binary_precision_fits: round_to_binary_precision("15") @ digits(4, Rounding::HalfUp) => "15");
    impl_case!(after_conversion: round_after_conversion("0.1000000000000000055511151231257827") @ digits(17, Rounding::HalfEven) => "0.10000000000000001", INEXACT);
}

mod exponent_range {
    use super::*;

    fn small() -> PrecisionContext {
        digits(3, Rounding::HalfUp).with_exponent_range(-10, 10).unwrap()
    }

    impl_case!(overflow: multiply("9E+10", "10") @ small() => "Infinity", Flags::OVERFLOW | INEXACT);
    impl_case!(overflow_negative: multiply("-9E+10", "10") @ small() => "-Infinity", Flags::OVERFLOW | INEXACT);
    impl_case!(overflow_down: multiply("9E+10", "10") @ small().with_rounding(Rounding::Down) => "9.99E+10", Flags::OVERFLOW | INEXACT);
    impl_case!(overflow_floor: multiply("9E+10", "10") @ small().with_rounding(Rounding::Floor) => "9.99E+10", Flags::OVERFLOW | INEXACT);
    impl_case!(overflow_floor_negative: multiply("-9E+10", "10") @ small().with_rounding(Rounding::Floor) => "-Infinity", Flags::OVERFLOW | INEXACT);
    impl_case!(rounds_into_overflow: round_to_precision("9.999E+10") @ small() => "Infinity", Flags::OVERFLOW | INEXACT);
    impl_case!(subnormal: round_to_precision("1E-11") @ small() => "1E-11", Flags::SUBNORMAL);
    impl_case!(subnormal_rounded: round_to_precision("1.25E-11") @ small() => "1.3E-11", Flags::SUBNORMAL | Flags::UNDERFLOW | INEXACT);
    impl_case!(underflow_to_zero: multiply("1E-10", "1E-3") @ small()
        => "0E-12", Flags::SUBNORMAL | Flags::UNDERFLOW | Flags::CLAMPED | INEXACT);
    impl_case!(zero_clamped: round_to_precision("0E-20") @ small() => "0E-12", Flags::CLAMPED);
    impl_case!(clamp_pads: round_to_precision("1E+96") @ PrecisionContext::decimal32() => "1.000000E+96", Flags::CLAMPED);
    impl_case!(no_clamp: round_to_precision("1E+96") @ PrecisionContext::decimal32().with_exponent_clamp(false) => "1E+96");
    impl_case!(divide_by_infinity: divide("1", "Infinity") @ small() => "0E-12", Flags::CLAMPED);

    #[test]
    fn traps() {
        let math = decimal_math();
        let ctx = basic(Rounding::HalfUp).with_traps(Flags::INEXACT);
        let err = math.divide(&dec("1"), &dec("3"), &ctx).unwrap_err();
        let trap = err.as_trap().unwrap();
        assert_eq!(trap.flag(), Flags::INEXACT);
        assert_eq!(trap.errors(), Flags::INEXACT);
        assert_eq!(trap.result().to_string(), "0.333333333");
        assert_eq!(trap.context(), &ctx);

        // an exact result raises nothing to trap
        let ok = math.divide(&dec("1"), &dec("4"), &ctx).unwrap();
        assert_eq!(ok.value.to_string(), "0.25");
    }

    #[test]
    fn trap_reports_lowest_flag() {
        let math = decimal_math();
        let ctx = small().with_traps(Flags::all());
        let err = math.multiply(&dec("9E+10"), &dec("10"), &ctx).unwrap_err();
        let trap = err.as_trap().unwrap();
        assert_eq!(trap.flag(), Flags::INEXACT);
        assert_eq!(trap.errors(), Flags::OVERFLOW | INEXACT);
        assert_eq!(trap.result().to_string(), "Infinity");
    }

    #[test]
    fn record_into_context() {
        let math = decimal_math();
        let mut ctx = basic(Rounding::HalfUp).with_blank_flags();
        let first = math.divide(&dec("1"), &dec("0"), &ctx).unwrap().record_into(&mut ctx);
        let second = math.add(&dec("1"), &dec("1E-20"), &ctx).unwrap().record_into(&mut ctx);
        assert_eq!(first.to_string(), "Infinity");
        assert_eq!(second.to_string(), "1.00000000");
        assert_eq!(ctx.flags(), Flags::DIVIDE_BY_ZERO | INEXACT);
    }
}

mod quantize {
    use super::*;

    impl_case!(pads: quantize("2.17", "0.001") @ basic(Rounding::HalfUp) => "2.170");
    impl_case!(same: quantize("2.17", "0.01") @ basic(Rounding::HalfUp) => "2.17");
    impl_case!(rounds: quantize("2.17", "0.1") @ basic(Rounding::HalfUp) => "2.2", INEXACT);
    impl_case!(to_integer: quantize("2.17", "1E+0") @ basic(Rounding::HalfUp) => "2", INEXACT);
    impl_case!(negative_to_zero: quantize("-0.1", "1") @ basic(Rounding::HalfUp) => "-0", INEXACT);
    impl_case!(large_exponent: quantize("217", "1E+1") @ basic(Rounding::HalfUp) => "2.2E+2", INEXACT);
    impl_case!(too_many_digits: quantize("1234567", "1E-3") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);
    impl_case!(infinities: quantize("-Infinity", "Infinity") @ basic(Rounding::HalfUp) => "-Infinity");
    impl_case!(infinity_and_finite: quantize("Infinity", "1") @ basic(Rounding::HalfUp) => "NaN", Flags::INVALID);

    #[test]
    fn round_to_exponent() {
        let math = decimal_math();
        let ctx = basic(Rounding::HalfEven);
        let zero = BigInt::from(0);

        assert_decimal(math.round_to_exponent_exact(&dec("2.0"), &zero, &ctx), "2", Flags::ROUNDED);
        assert_decimal(math.round_to_exponent_exact(&dec("2.5"), &zero, &ctx), "2", INEXACT);
        assert_decimal(math.round_to_exponent_exact(&dec("2.5"), &zero, &basic(Rounding::HalfUp)), "3", INEXACT);
        assert_decimal(math.round_to_exponent_exact(&dec("-7.89"), &BigInt::from(-1), &basic(Rounding::Floor)), "-7.9", INEXACT);
        assert_decimal(math.round_to_exponent_exact(&dec("123456789"), &BigInt::from(-1), &ctx), "NaN", Flags::INVALID);
        assert_decimal(math.round_to_exponent_simple(&dec("2.5"), &zero, &ctx), "2", INEXACT);
        assert_decimal(math.round_to_exponent_simple(&dec("1E+3"), &zero, &ctx), "1E+3", Flags::empty());
        assert_decimal(math.round_to_exponent_no_rounded_flag(&dec("2.0"), &zero, &ctx), "2", Flags::empty());
        assert_decimal(math.round_to_exponent_no_rounded_flag(&dec("3.5"), &zero, &ctx), "4", Flags::empty());
        assert_decimal(math.round_to_exponent_no_rounded_flag(&dec("-0.7"), &zero, &ctx), "-1", Flags::empty());
    }
}

mod reduce {
    use super::*;

    impl_case!(nothing_to_strip: reduce("2.1") @ basic(Rounding::HalfUp) => "2.1");
    impl_case!(strips: reduce("-2.0") @ basic(Rounding::HalfUp) => "-2");
    impl_case!(strips_fraction: reduce("1.200") @ basic(Rounding::HalfUp) => "1.2");
    impl_case!(raises_exponent: reduce("120") @ basic(Rounding::HalfUp) => "1.2E+2");
    impl_case!(zero: reduce("0.00") @ basic(Rounding::HalfUp) => "0");
    impl_case!(rounds_first: reduce("1.0000000001") @ basic(Rounding::HalfUp) => "1", INEXACT);
}

mod square_root {
    use super::*;

    impl_case!(zero: square_root("0") @ basic(Rounding::HalfEven) => "0");
    impl_case!(zero_halves_exponent: square_root("0.00") @ basic(Rounding::HalfEven) => "0.0");
    impl_case!(negative_zero: square_root("-0") @ basic(Rounding::HalfEven) => "-0");
    impl_case!(one: square_root("1") @ basic(Rounding::HalfEven) => "1");
    impl_case!(one_with_zeros: square_root("1.00") @ basic(Rounding::HalfEven) => "1.0");
    impl_case!(four: square_root("4") @ basic(Rounding::HalfEven) => "2");
    impl_case!(hundred: square_root("100") @ basic(Rounding::HalfEven) => "10");
    impl_case!(hundredth: square_root("0.01") @ basic(Rounding::HalfEven) => "0.1");
    impl_case!(inexact: square_root("0.39") @ basic(Rounding::HalfEven) => "0.624499800", INEXACT);
    impl_case!(two: square_root("2") @ basic(Rounding::HalfEven) => "1.41421356", INEXACT);
    impl_case!(negative: square_root("-1") @ basic(Rounding::HalfEven) => "NaN", Flags::INVALID);
    impl_case!(infinity: square_root("Infinity") @ basic(Rounding::HalfEven) => "Infinity");
    impl_case!(unlimited_exact: square_root("6.25") @ PrecisionContext::unlimited() => "2.5");
    impl_case!(unlimited_inexact: square_root("2") @ PrecisionContext::unlimited() => "NaN", Flags::INVALID);
}

mod logarithm {
    use super::*;

    impl_case!(ln_one: ln("1") @ basic(Rounding::HalfEven) => "0");
    impl_case!(ln_ten: ln("10") @ basic(Rounding::HalfEven) => "2.30258509", INEXACT);
    impl_case!(ln_half: ln("0.5") @ basic(Rounding::HalfEven) => "-0.693147181", INEXACT);
    impl_case!(ln_large: ln("1E+100") @ basic(Rounding::HalfEven) => "230.258509", INEXACT);
    impl_case!(ln_zero: ln("0") @ basic(Rounding::HalfEven) => "-Infinity");
    impl_case!(ln_negative: ln("-1") @ basic(Rounding::HalfEven) => "NaN", Flags::INVALID);
    impl_case!(ln_infinity: ln("Infinity") @ basic(Rounding::HalfEven) => "Infinity");
    impl_case!(ln_unlimited: ln("2") @ PrecisionContext::unlimited() => "NaN", Flags::INVALID);
    impl_case!(log10_exact: log10("100") @ basic(Rounding::HalfEven) => "2");
    impl_case!(log10_exact_negative: log10("0.001") @ basic(Rounding::HalfEven) => "-3");
    impl_case!(log10_two: log10("2") @ basic(Rounding::HalfEven) => "0.301029996", INEXACT);
    impl_case!(log10_zero: log10("0") @ basic(Rounding::HalfEven) => "-Infinity");

    #[test]
    fn ln_unnecessary() {
        let math = decimal_math();
        let result = math.ln(&dec("2"), &basic(Rounding::Unnecessary));
        assert_eq!(result, Err(RadixError::Arithmetic(ArithmeticError::RoundingRequired)));
    }
}

mod exponential {
    use super::*;

    impl_case!(zero: exp("0") @ basic(Rounding::HalfEven) => "1");
    impl_case!(one: exp("1") @ basic(Rounding::HalfEven) => "2.71828183", INEXACT);
    impl_case!(minus_one: exp("-1") @ basic(Rounding::HalfEven) => "0.367879441", INEXACT);
    impl_case!(ten: exp("10") @ basic(Rounding::HalfEven) => "22026.4658", INEXACT);
    impl_case!(tiny: exp("1E-20") @ basic(Rounding::HalfEven) => "1.00000000", INEXACT);
    impl_case!(tiny_ceiling: exp("1E-20") @ basic(Rounding::Ceiling) => "1.00000001", INEXACT);
    impl_case!(tiny_negative_floor: exp("-1E-20") @ basic(Rounding::Floor) => "0.999999999", INEXACT);
    impl_case!(huge: exp("1E+10") @ basic(Rounding::HalfEven) => "Infinity", Flags::OVERFLOW | INEXACT);
    impl_case!(huge_negative: exp("-1E+10") @ basic(Rounding::HalfEven)
        => "0E-391", Flags::SUBNORMAL | Flags::UNDERFLOW | Flags::CLAMPED | INEXACT);
    impl_case!(infinity: exp("Infinity") @ basic(Rounding::HalfEven) => "Infinity");
    impl_case!(negative_infinity: exp("-Infinity") @ basic(Rounding::HalfEven) => "0");
    impl_case!(unlimited: exp("1") @ PrecisionContext::unlimited() => "NaN", Flags::INVALID);

    impl_case!(pi: pi() @ basic(Rounding::HalfEven) => "3.14159265", INEXACT);
}

mod power {
    use super::*;

    impl_case!(integer: power("2", "10") @ basic(Rounding::HalfEven) => "1024");
    impl_case!(reciprocal: power("2", "-1") @ basic(Rounding::HalfEven) => "0.5");
    impl_case!(radix_power: power("10", "-2") @ basic(Rounding::HalfEven) => "0.01");
    impl_case!(negative_odd: power("-2", "3") @ basic(Rounding::HalfEven) => "-8");
    impl_case!(negative_even: power("-2", "4") @ basic(Rounding::HalfEven) => "16");
    impl_case!(zero_to_zero: power("0", "0") @ basic(Rounding::HalfEven) => "NaN", Flags::INVALID);
    impl_case!(anything_to_zero: power("-7.5", "0") @ basic(Rounding::HalfEven) => "1");
    impl_case!(zero_to_negative: power("0", "-1") @ basic(Rounding::HalfEven) => "Infinity");
    impl_case!(negative_zero_to_odd: power("-0", "3") @ basic(Rounding::HalfEven) => "-0");
    impl_case!(infinity_to_negative: power("Infinity", "-2") @ basic(Rounding::HalfEven) => "0");
    impl_case!(large_integer: power("2", "1000") @ basic(Rounding::HalfEven) => "1.07150861E+301", INEXACT);
    impl_case!(large_reciprocal: power("3", "-5") @ basic(Rounding::HalfEven) => "0.00411522634", INEXACT);
    impl_case!(overflow: power("10", "400") @ basic(Rounding::HalfEven) => "Infinity", Flags::OVERFLOW | INEXACT);
    impl_case!(exact_root: power("4", "0.5") @ basic(Rounding::HalfEven) => "2");
    impl_case!(exact_square_root: power("0.25", "1.5") @ basic(Rounding::HalfEven) => "0.125");
    impl_case!(nearly_cube_root: power("8", "-0.333333333333333333333333333333") @ basic(Rounding::HalfEven) => "0.500000000", INEXACT);
    impl_case!(irrational: power("2", "0.5") @ basic(Rounding::HalfEven) => "1.41421356", INEXACT);
    impl_case!(negative_base_fraction: power("-4", "0.5") @ basic(Rounding::HalfEven) => "NaN", Flags::INVALID);
    impl_case!(below_one_to_infinity: power("0.5", "Infinity") @ basic(Rounding::HalfEven) => "0");
    impl_case!(above_one_to_infinity: power("2", "Infinity") @ basic(Rounding::HalfEven) => "Infinity");
    impl_case!(one_to_infinity: power("1", "Infinity") @ basic(Rounding::HalfEven) => "1", INEXACT);
    impl_case!(unlimited_integer: power("1.5", "3") @ PrecisionContext::unlimited() => "3.375");
}

mod next {
    use super::*;

    impl_case!(plus: next_plus("1") @ basic(Rounding::HalfUp) => "1.00000001");
    impl_case!(minus: next_minus("1") @ basic(Rounding::HalfUp) => "0.999999999");
    impl_case!(plus_zero: next_plus("0") @ basic(Rounding::HalfUp) => "1E-391");
    impl_case!(minus_zero: next_minus("0") @ basic(Rounding::HalfUp) => "-1E-391");
    impl_case!(plus_negative: next_plus("-1") @ basic(Rounding::HalfUp) => "-0.999999999");
    impl_case!(plus_largest: next_plus("9.99999999E+384") @ basic(Rounding::HalfUp) => "Infinity");
    impl_case!(plus_infinity: next_plus("Infinity") @ basic(Rounding::HalfUp) => "Infinity");
    impl_case!(minus_infinity: next_minus("Infinity") @ basic(Rounding::HalfUp) => "9.99999999E+384");
    impl_case!(unlimited: next_plus("1") @ PrecisionContext::unlimited() => "NaN", Flags::INVALID);
    impl_case!(toward_larger: next_toward("1", "2") @ basic(Rounding::HalfUp) => "1.00000001");
    impl_case!(toward_smaller: next_toward("1", "0") @ basic(Rounding::HalfUp) => "0.999999999");
    impl_case!(toward_equal: next_toward("0", "-0") @ basic(Rounding::HalfUp) => "-0");
    impl_case!(toward_overflow: next_toward("9.99999999E+384", "Infinity") @ basic(Rounding::HalfUp)
        => "Infinity", Flags::OVERFLOW | INEXACT);
    impl_case!(toward_subnormal: next_toward("0", "1") @ basic(Rounding::HalfUp)
        => "1E-391", Flags::SUBNORMAL | Flags::UNDERFLOW | INEXACT);
    impl_case!(toward_nan: next_toward("1", "NaN") @ basic(Rounding::HalfUp) => "NaN");
}

mod binary {
    use super::*;

    fn to_f64(result: RadixResult<ExtendedFloat>) -> f64 {
        result.unwrap().value.to_f64().unwrap()
    }

    #[test]
    fn arithmetic_matches_ieee_double() {
        let math = binary_math();
        let ctx = PrecisionContext::binary64();
        assert_eq!(to_f64(math.add(&float(0.1), &float(0.2), &ctx)), 0.1 + 0.2);
        assert_eq!(to_f64(math.subtract(&float(1.0), &float(1e-17), &ctx)), 1.0 - 1e-17);
        assert_eq!(to_f64(math.multiply(&float(0.1), &float(3.0), &ctx)), 0.1 * 3.0);
        assert_eq!(to_f64(math.divide(&float(1.0), &float(3.0), &ctx)), 1.0 / 3.0);
        assert_eq!(to_f64(math.divide(&float(2.0), &float(7.0), &ctx)), 2.0 / 7.0);
        assert_eq!(to_f64(math.square_root(&float(2.0), &ctx)), 2f64.sqrt());
        assert_eq!(to_f64(math.remainder(&float(10.5), &float(3.0), &ctx)), 10.5 % 3.0);
    }

    #[test]
    fn status_of_double_sum() {
        let math = binary_math();
        let sum = math.add(&float(0.1), &float(0.2), &PrecisionContext::binary64()).unwrap();
        assert_eq!(sum.status, INEXACT);
        let exact = math.add(&float(0.5), &float(0.25), &PrecisionContext::binary64()).unwrap();
        assert_eq!(exact.status, Flags::empty());
    }

    #[test]
    fn transcendentals_round_correctly() {
        let math = binary_math();
        let ctx = PrecisionContext::binary64();
        assert_eq!(to_f64(math.pi(&ctx)), std::f64::consts::PI);
        assert_eq!(to_f64(math.exp(&float(1.0), &ctx)), std::f64::consts::E);
        assert_eq!(to_f64(math.ln(&float(2.0), &ctx)), std::f64::consts::LN_2);
        assert_eq!(to_f64(math.ln(&float(10.0), &ctx)), std::f64::consts::LN_10);
        assert_eq!(to_f64(math.log10(&float(1000.0), &ctx)), 3.0);
        assert_eq!(to_f64(math.power(&float(2.0), &float(0.5), &ctx)), std::f64::consts::SQRT_2);
    }

    #[test]
    fn next_after_one() {
        let math = binary_math();
        let ctx = PrecisionContext::binary64();
        assert_eq!(to_f64(math.next_plus(&float(1.0), &ctx)), 1.0 + f64::EPSILON);
        assert_eq!(to_f64(math.next_minus(&float(1.0), &ctx)), 1.0 - f64::EPSILON / 2.0);
        assert_eq!(to_f64(math.next_plus(&float(0.0), &ctx)), 5e-324);
    }

    #[test]
    fn binary32_rounding() {
        let math = binary_math();
        let ctx = PrecisionContext::binary32();
        let third = math.divide(&float(1.0), &float(3.0), &ctx).unwrap().value;
        assert_eq!(third.to_f64().unwrap(), f64::from(1.0f32 / 3.0f32));
    }
}
