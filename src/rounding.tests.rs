mod test_round_pair_decimal {
    use paste::paste;
    use super::*;

    /// `name: [-]lhs . rhs [sticky] => Mode, Mode: result; ...`
    ///
    /// `sticky` marks a nonzero digit somewhere after `rhs`
    macro_rules! impl_case {
        (@input $name:ident, $neg:expr, $lhs:literal, $rhs:literal, $sticky:expr => $( $($mode:ident),+ : $expected:literal );+ ) => {
            paste! {
                #[test]
                fn [< case_ $name >]() {
                    $($(
                        let result = Rounding::$mode.round_pair($neg, ($lhs, $rhs), !$sticky, 10);
                        assert_eq!(result, $expected, "{:?}", Rounding::$mode);
                    )+)+
                }
            }
        };
        ($name:ident: - $lhs:literal . $rhs:literal sticky => $($t:tt)*) => {
            impl_case!(@input $name, true, $lhs, $rhs, true => $($t)*);
        };
        ($name:ident: - $lhs:literal . $rhs:literal => $($t:tt)*) => {
            impl_case!(@input $name, true, $lhs, $rhs, false => $($t)*);
        };
        ($name:ident: $lhs:literal . $rhs:literal sticky => $($t:tt)*) => {
            impl_case!(@input $name, false, $lhs, $rhs, true => $($t)*);
        };
        ($name:ident: $lhs:literal . $rhs:literal => $($t:tt)*) => {
            impl_case!(@input $name, false, $lhs, $rhs, false => $($t)*);
        };
    }

    impl_case!(pos_0_1: 0 . 1 => Up, Ceiling, ZeroFiveUp: 1; Down, Floor, HalfUp, HalfDown, HalfEven, Unnecessary: 0);
    impl_case!(neg_0_1: - 0 . 1 => Up, Floor, ZeroFiveUp: 1; Down, Ceiling, HalfUp, HalfDown, HalfEven, Unnecessary: 0);
    impl_case!(pos_0_5: 0 . 5 => Up, Ceiling, HalfUp, ZeroFiveUp: 1; Down, Floor, HalfDown, HalfEven, Unnecessary: 0);
    impl_case!(neg_0_5: - 0 . 5 => Up, Floor, HalfUp, ZeroFiveUp: 1; Down, Ceiling, HalfDown, HalfEven, Unnecessary: 0);
    impl_case!(pos_0_5_sticky: 0 . 5 sticky => Up, Ceiling, HalfUp, HalfDown, HalfEven, ZeroFiveUp: 1; Down, Floor, Unnecessary: 0);
    impl_case!(neg_0_5_sticky: - 0 . 5 sticky => Up, Floor, HalfUp, HalfDown, HalfEven, ZeroFiveUp: 1; Down, Ceiling, Unnecessary: 0);
    impl_case!(pos_0_7: 0 . 7 => Up, Ceiling, HalfUp, HalfDown, HalfEven, ZeroFiveUp: 1; Down, Floor, Unnecessary: 0);
    impl_case!(neg_0_7: - 0 . 7 => Up, Floor, HalfUp, HalfDown, HalfEven, ZeroFiveUp: 1; Down, Ceiling, Unnecessary: 0);
    impl_case!(neg_4_3_sticky: - 4 . 3 sticky => Up, Floor: 5; Down, Ceiling, HalfUp, HalfDown, HalfEven, ZeroFiveUp, Unnecessary: 4);
    impl_case!(pos_9_5_sticky: 9 . 5 sticky => Up, Ceiling, HalfDown, HalfUp, HalfEven: 10; Down, Floor, ZeroFiveUp, Unnecessary: 9);
    impl_case!(pos_9_5: 9 . 5 => Up, Ceiling, HalfUp, HalfEven: 10; Down, Floor, HalfDown, ZeroFiveUp, Unnecessary: 9);
    impl_case!(pos_8_5: 8 . 5 => Up, Ceiling, HalfUp: 9; Down, Floor, HalfDown, HalfEven, ZeroFiveUp, Unnecessary: 8);
    impl_case!(neg_6_5: - 6 . 5 => Up, Floor, HalfUp: 7; Down, Ceiling, HalfDown, HalfEven, ZeroFiveUp, Unnecessary: 6);
    impl_case!(neg_6_5_sticky: - 6 . 5 sticky => Up, Floor, HalfUp, HalfDown, HalfEven: 7; Down, Ceiling, ZeroFiveUp, Unnecessary: 6);
    impl_case!(pos_3_0: 3 . 0 => Up, Down, Ceiling, Floor, HalfUp, HalfDown, HalfEven, ZeroFiveUp, Unnecessary: 3);
    impl_case!(pos_3_0_sticky: 3 . 0 sticky => Up, Ceiling: 4; Down, Floor, HalfUp, HalfDown, HalfEven, ZeroFiveUp, Unnecessary: 3);
    impl_case!(neg_2_0: - 2 . 0 => Up, Down, Ceiling, Floor, HalfUp, HalfDown, HalfEven, ZeroFiveUp, Unnecessary: 2);
    impl_case!(neg_2_0_sticky: - 2 . 0 sticky => Up, Floor: 3; Down, Ceiling, HalfUp, HalfDown, HalfEven, ZeroFiveUp, Unnecessary: 2);
}


mod test_round_pair_binary {
    use super::*;

    #[test]
    fn half_even_ties() {
        // 0.1b rounds to 0, 1.1b rounds to 2
        assert_eq!(Rounding::HalfEven.round_pair(false, (0, 1), true, 2), 0);
        assert_eq!(Rounding::HalfEven.round_pair(false, (1, 1), true, 2), 2);
        assert_eq!(Rounding::HalfDown.round_pair(false, (1, 1), true, 2), 1);
        assert_eq!(Rounding::HalfUp.round_pair(false, (0, 1), true, 2), 1);
    }

    #[test]
    fn zero_five_up() {
        assert_eq!(Rounding::ZeroFiveUp.round_pair(false, (0, 1), true, 2), 1);
        assert_eq!(Rounding::ZeroFiveUp.round_pair(false, (1, 1), true, 2), 1);
        assert_eq!(Rounding::ZeroFiveUp.round_pair(true, (0, 0), false, 2), 1);
    }
}

mod test_should_increment {
    use super::*;

    #[test]
    fn digit_is_reduced_modulo_radix() {
        // kept magnitude 124, discarded 5 exactly
        assert!(!Rounding::HalfEven.should_increment(false, 124, 5, false, 10));
        assert!(Rounding::HalfEven.should_increment(false, 124, 5, true, 10));
        assert!(Rounding::HalfEven.should_increment(false, 125, 5, false, 10));
        assert!(Rounding::ZeroFiveUp.should_increment(false, 125, 1, false, 10));
        assert!(!Rounding::ZeroFiveUp.should_increment(false, 124, 9, true, 10));
    }

    #[test]
    fn exact_never_increments() {
        for mode in [Rounding::Up, Rounding::Ceiling, Rounding::ZeroFiveUp, Rounding::Floor] {
            assert!(!mode.should_increment(true, 7, 0, false, 10));
        }
    }

    #[test]
    fn overflow_direction() {
        assert!(Rounding::HalfEven.overflows_to_infinity(true));
        assert!(Rounding::Ceiling.overflows_to_infinity(false));
        assert!(!Rounding::Ceiling.overflows_to_infinity(true));
        assert!(Rounding::Floor.overflows_to_infinity(true));
        assert!(!Rounding::Down.overflows_to_infinity(false));
        assert!(!Rounding::ZeroFiveUp.overflows_to_infinity(false));
    }

    #[test]
    fn default_is_half_even() {
        assert_eq!(Rounding::default(), Rounding::HalfEven);
    }
}
