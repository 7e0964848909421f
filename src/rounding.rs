//! Rounding modes

/// Determines how to calculate the last digit of the number
///
/// Default rounding mode is HalfEven
///
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Always round away from zero
    ///
    ///
    /// * 5.5 → 6.0
    /// * 2.5 → 3.0
    /// * 1.6 → 2.0
    /// * 1.1 → 2.0
    /// * -1.1 → -2.0
    /// * -1.6 → -2.0
    /// * -2.5 → -3.0
    /// * -5.5 → -6.0
    Up,

    /// Always round towards zero
    ///
    /// * 5.5  →  5.0
    /// * 2.5  →  2.0
    /// * 1.6  →  1.0
    /// * 1.1  →  1.0
    /// * -1.1 → -1.0
    /// * -1.6 → -1.0
    /// * -2.5 → -2.0
    /// * -5.5 → -5.0
    Down,

    /// Towards +∞
    ///
    /// * 5.5 → 6.0
    /// * 2.5 → 3.0
    /// * 1.6 → 2.0
    /// * 1.1 → 2.0
    /// * -1.1 → -1.0
    /// * -1.6 → -1.0
    /// * -2.5 → -2.0
    /// * -5.5 → -5.0
    Ceiling,

    /// Towards -∞
    ///
    /// * 5.5 → 5.0
    /// * 2.5 → 2.0
    /// * 1.6 → 1.0
    /// * 1.1 → 1.0
    /// * -1.1 → -2.0
    /// * -1.6 → -2.0
    /// * -2.5 → -3.0
    /// * -5.5 → -6.0
    Floor,

    /// Round to 'nearest neighbor', or up if ending decimal is 5
    ///
    /// * 5.5 → 6.0
    /// * 2.5 → 3.0
    /// * 1.6 → 2.0
    /// * 1.1 → 1.0
    /// * -1.1 → -1.0
    /// * -1.6 → -2.0
    /// * -2.5 → -3.0
    /// * -5.5 → -6.0
    HalfUp,

    /// Round to 'nearest neighbor', or down if ending decimal is 5
    ///
    /// * 5.5 → 5.0
    /// * 2.5 → 2.0
    /// * 1.6 → 2.0
    /// * 1.1 → 1.0
    /// * -1.1 → -1.0
    /// * -1.6 → -2.0
    /// * -2.5 → -2.0
    /// * -5.5 → -5.0
    HalfDown,

    /// Round to 'nearest neighbor', if equidistant, round towards
    /// nearest even digit
    ///
    /// * 5.5 → 6.0
    /// * 2.5 → 2.0
    /// * 1.6 → 2.0
    /// * 1.1 → 1.0
    /// * -1.1 → -1.0
    /// * -1.6 → -2.0
    /// * -2.5 → -2.0
    /// * -5.5 → -6.0
    ///
    #[default]
    HalfEven,

    /// Require an exact result
    ///
    /// Any operation which would discard a nonzero digit fails with
    /// [`ArithmeticError::RoundingRequired`](crate::ArithmeticError::RoundingRequired)
    ///
    /// * 5.0 → 5.0
    /// * 5.5 → error
    Unnecessary,

    /// Round away from zero if the last kept digit is 0 or 5
    /// (0 only, in radix 2), otherwise towards zero
    ///
    /// Results are never rounded up to overflow.
    ///
    /// * 5.5 → 6.0
    /// * 0.5 → 1.0
    /// * 1.6 → 1.0
    /// * 5.1 → 6.0
    /// * -0.1 → -1.0
    /// * -2.5 → -2.0
    /// * -5.5 → -6.0
    ZeroFiveUp,
}


impl Rounding {
    /// Perform the rounding operation
    ///
    /// Parameters
    /// ----------
    /// * negative (bool) - True if the number to be rounded is negative
    /// * pair (u32, u32) - The last kept digit, and the first discarded digit.
    ///     i.e. to round 0.345 to two places, you would pass (4, 5).
    ///     Both must be less than the radix.
    /// * trailing_zeros (bool) - True if all digits after the pair are zero.
    ///       This has an effect if the right hand digit is 0 or radix/2.
    /// * radix (u32) - 2 or 10
    ///
    /// Returns
    /// -------
    /// Returns the first number of the pair, rounded. The sign is not preserved.
    /// [`Rounding::Unnecessary`] never rounds; callers check exactness themselves.
    ///
    /// Examples
    /// --------
    /// - To round 2341, pass in `false, (4, 1), true, 10` → get 4 or 5 depending on scheme
    /// - To round -0.1051, to two places: `true, (0, 5), false, 10` → returns either 0 or 1
    /// - To round binary 0.11, to one place: `false, (1, 1), true, 2` → returns either 1 or 2
    ///
    pub fn round_pair(&self, negative: bool, pair: (u32, u32), trailing_zeros: bool, radix: u32) -> u32 {
        use self::Rounding::*;
        use std::cmp::Ordering::*;

        let (lhs, rhs) = pair;
        // if all zero after digit, never round
        if rhs == 0 && trailing_zeros {
            return lhs;
        }
        let half = radix / 2;
        let up = lhs + 1;
        let down = lhs;
        match (*self, rhs.cmp(&half)) {
            (Up,          _) => up,
            (Down,        _) => down,
            (Unnecessary, _) => down,
            (Floor,       _) => if negative { up } else { down },
            (Ceiling,     _) => if negative { down } else { up },
            (ZeroFiveUp,  _) => if lhs == 0 || (radix != 2 && lhs == half) { up } else { down },
            (_,        Less) => down,
            (_,     Greater) => up,
            (_,       Equal) if !trailing_zeros => up,
            (HalfUp,   Equal) => up,
            (HalfDown, Equal) => down,
            (HalfEven, Equal) => if lhs % 2 == 0 { down } else { up },
        }
    }

    /// True if a magnitude whose last kept digit is `last_kept` should be
    /// incremented, given what was discarded
    pub fn should_increment(
        &self,
        negative: bool,
        last_kept: u32,
        last_discarded: u32,
        older_discarded: bool,
        radix: u32,
    ) -> bool {
        let pair = (last_kept % radix, last_discarded);
        self.round_pair(negative, pair, !older_discarded, radix) != pair.0
    }

    /// True if rounding a value of the given sign away from zero may
    /// produce an infinity when it overflows
    pub(crate) fn overflows_to_infinity(&self, negative: bool) -> bool {
        use self::Rounding::*;
        match *self {
            Up | HalfUp | HalfDown | HalfEven | Unnecessary => true,
            Ceiling => !negative,
            Floor => negative,
            Down | ZeroFiveUp => false,
        }
    }
}


#[cfg(test)]
#[allow(non_snake_case)]
mod test {
    use super::*;
    include!("rounding.tests.rs");
}
