// \file src/context.rs

//! A `PrecisionContext` is the set of parameters that define otherwise
//! ambiguous arithmetical operations: how many digits to keep, how to
//! round the digits which are not kept, and which exponents are allowed.
//!
//! Contexts are plain values. The only mutable part is the optional set
//! of sticky [`Flags`], which engine operations never touch themselves;
//! callers fold each operation's status into a context with
//! [`StatusAnd::record_into`] when they want IEEE-style accumulation.

use std::fmt;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::{ArithmeticError, Rounding, DEFAULT_PRECISION};


bitflags::bitflags! {
    /// Status conditions raised by an operation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Flags: u32 {
        /// Result was rounded and nonzero digits were discarded
        const INEXACT = 1;
        /// Result was rounded, or digits were discarded (even zeros)
        const ROUNDED = 2;
        /// Result's adjusted exponent is below EMin
        const SUBNORMAL = 4;
        /// Result is subnormal and inexact
        const UNDERFLOW = 8;
        /// Result's adjusted exponent exceeds EMax after rounding
        const OVERFLOW = 16;
        /// Exponent was altered to fit the exponent range
        const CLAMPED = 32;
        /// Operation has no defined result (result is NaN)
        const INVALID = 64;
        /// Finite nonzero number was divided by zero
        const DIVIDE_BY_ZERO = 128;
    }
}


/// Result of an operation, paired with the status it raised
///
/// Matches the `value`/`status` shape of IEEE soft-float libraries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct StatusAnd<T> {
    pub status: Flags,
    pub value: T,
}

impl<T> StatusAnd<T> {
    /// Value with no status raised
    pub fn ok(value: T) -> Self {
        StatusAnd { status: Flags::empty(), value }
    }

    pub fn new(status: Flags, value: T) -> Self {
        StatusAnd { status, value }
    }

    /// Transform the value, keeping the status
    pub fn map<F: FnOnce(T) -> U, U>(self, f: F) -> StatusAnd<U> {
        StatusAnd {
            status: self.status,
            value: f(self.value),
        }
    }

    /// Fold status into the context's sticky flags, returning the value
    pub fn record_into(self, ctx: &mut PrecisionContext) -> T {
        ctx.record(self.status);
        self.value
    }

    /// Discard status
    pub fn into_value(self) -> T {
        self.value
    }
}


/// Maximum precision, exponent range and rounding policy of an operation
///
/// Precision is counted in digits of the radix of the number being
/// rounded (bits, for binary numbers); a precision of zero means
/// "unlimited", for which operations that cannot give an exact result
/// report [`Flags::INVALID`].
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrecisionContext {
    precision: u64,
    rounding: Rounding,
    e_min: BigInt,
    e_max: BigInt,
    has_exponent_range: bool,
    clamp_normal_exponents: bool,
    adjust_exponent: bool,
    precision_in_bits: bool,
    simplified: bool,
    traps: Flags,
    has_flags: bool,
    flags: Flags,
}

impl PrecisionContext {
    /// Context with the given precision and exponent range
    ///
    /// Fails if precision is negative, or if e_min > e_max.
    ///
    pub fn new(
        precision: i64,
        rounding: Rounding,
        e_min: i64,
        e_max: i64,
        clamp_normal_exponents: bool,
    ) -> Result<Self, ArithmeticError> {
        let precision = u64::try_from(precision).map_err(|_| {
            ArithmeticError::invalid_argument(format!("precision ({}) is less than 0", precision))
        })?;
        Self::unlimited()
            .with_precision(precision)
            .with_rounding(rounding)
            .with_exponent_clamp(clamp_normal_exponents)
            .with_exponent_range(e_min, e_max)
    }

    /// Context which never rounds, and has no exponent range
    pub fn unlimited() -> Self {
        PrecisionContext {
            precision: 0,
            rounding: Rounding::HalfUp,
            e_min: BigInt::zero(),
            e_max: BigInt::zero(),
            has_exponent_range: false,
            clamp_normal_exponents: false,
            adjust_exponent: true,
            precision_in_bits: false,
            simplified: false,
            traps: Flags::empty(),
            has_flags: false,
            flags: Flags::empty(),
        }
    }

    /// Unlimited precision with the given rounding mode
    pub fn for_rounding(rounding: Rounding) -> Self {
        Self::unlimited().with_rounding(rounding)
    }

    /// HalfUp rounding to the given precision, no exponent range
    pub fn for_precision(precision: u64) -> Self {
        Self::unlimited().with_precision(precision)
    }

    /// Given rounding to the given precision, no exponent range
    pub fn for_precision_and_rounding(precision: u64, rounding: Rounding) -> Self {
        Self::unlimited().with_precision(precision).with_rounding(rounding)
    }

    /// IEEE 754-2008 decimal32 format
    pub fn decimal32() -> Self {
        Self::ieee(7, -95, 96, true)
    }

    /// IEEE 754-2008 decimal64 format
    pub fn decimal64() -> Self {
        Self::ieee(16, -383, 384, true)
    }

    /// IEEE 754-2008 decimal128 format
    pub fn decimal128() -> Self {
        Self::ieee(34, -6143, 6144, true)
    }

    /// IEEE 754 binary32 (single precision) format
    pub fn binary32() -> Self {
        Self::ieee(24, -126, 127, false)
    }

    /// IEEE 754 binary64 (double precision) format
    pub fn binary64() -> Self {
        Self::ieee(53, -1022, 1023, false)
    }

    fn ieee(precision: u64, e_min: i64, e_max: i64, clamp: bool) -> Self {
        let mut ctx = Self::unlimited()
            .with_precision(precision)
            .with_rounding(Rounding::HalfEven)
            .with_exponent_clamp(clamp);
        ctx.e_min = BigInt::from(e_min);
        ctx.e_max = BigInt::from(e_max);
        ctx.has_exponent_range = true;
        ctx
    }

    /// Copy with different precision
    pub fn with_precision(mut self, precision: u64) -> Self {
        self.precision = precision;
        self
    }

    /// Copy with different rounding mode
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Copy with the given exponent range
    pub fn with_exponent_range(self, e_min: i64, e_max: i64) -> Result<Self, ArithmeticError> {
        self.with_big_exponent_range(BigInt::from(e_min), BigInt::from(e_max))
    }

    /// Copy with the given (arbitrary-precision) exponent range
    pub fn with_big_exponent_range(mut self, e_min: BigInt, e_max: BigInt) -> Result<Self, ArithmeticError> {
        if e_min > e_max {
            return Err(ArithmeticError::invalid_argument(
                format!("EMin ({}) is greater than EMax ({})", e_min, e_max)
            ));
        }
        self.e_min = e_min;
        self.e_max = e_max;
        self.has_exponent_range = true;
        Ok(self)
    }

    /// Copy without exponent range
    pub fn with_unlimited_exponents(mut self) -> Self {
        self.e_min = BigInt::zero();
        self.e_max = BigInt::zero();
        self.has_exponent_range = false;
        self
    }

    /// Copy with the clamp-normal-exponents policy set
    pub fn with_exponent_clamp(mut self, clamp: bool) -> Self {
        self.clamp_normal_exponents = clamp;
        self
    }

    /// Copy where EMin/EMax bound the adjusted exponent (true), or the
    /// exponent of the lowest digit (false)
    pub fn with_adjust_exponent(mut self, adjust: bool) -> Self {
        self.adjust_exponent = adjust;
        self
    }

    /// Copy where precision of decimal rounding-to-binary is in bits
    pub fn with_precision_in_bits(mut self, bits: bool) -> Self {
        self.precision_in_bits = bits;
        self
    }

    /// Copy selecting simplified arithmetic
    pub fn with_simplified(mut self, simplified: bool) -> Self {
        self.simplified = simplified;
        self
    }

    /// Copy with the given conditions raising traps
    pub fn with_traps(mut self, traps: Flags) -> Self {
        self.traps = traps;
        self
    }

    /// Copy tracking flags, with all flags cleared
    pub fn with_blank_flags(&self) -> Self {
        let mut ctx = self.clone();
        ctx.has_flags = true;
        ctx.flags = Flags::empty();
        ctx
    }

    /// Copy which does not track flags
    pub fn with_no_flags(&self) -> Self {
        let mut ctx = self.clone();
        ctx.has_flags = false;
        ctx.flags = Flags::empty();
        ctx
    }

    /// Maximum number of digits (or bits); 0 for unlimited
    #[inline]
    pub fn precision(&self) -> u64 {
        self.precision
    }

    /// True if precision is limited
    #[inline]
    pub fn has_max_precision(&self) -> bool {
        self.precision != 0
    }

    #[inline]
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Smallest allowed (adjusted) exponent
    pub fn e_min(&self) -> &BigInt {
        &self.e_min
    }

    /// Largest allowed (adjusted) exponent
    pub fn e_max(&self) -> &BigInt {
        &self.e_max
    }

    #[inline]
    pub fn has_exponent_range(&self) -> bool {
        self.has_exponent_range
    }

    #[inline]
    pub fn clamp_normal_exponents(&self) -> bool {
        self.clamp_normal_exponents
    }

    #[inline]
    pub fn adjust_exponent(&self) -> bool {
        self.adjust_exponent
    }

    #[inline]
    pub fn is_precision_in_bits(&self) -> bool {
        self.precision_in_bits
    }

    #[inline]
    pub fn is_simplified(&self) -> bool {
        self.simplified
    }

    /// Conditions which raise traps
    #[inline]
    pub fn traps(&self) -> Flags {
        self.traps
    }

    #[inline]
    pub fn has_flags(&self) -> bool {
        self.has_flags
    }

    /// Sticky flags raised since flags were last cleared
    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Overwrite sticky flags
    ///
    /// Fails if this context does not track flags.
    pub fn set_flags(&mut self, flags: Flags) -> Result<(), ArithmeticError> {
        if !self.has_flags {
            return Err(ArithmeticError::invalid_operation("can't set flags on a context without flags"));
        }
        self.flags = flags;
        Ok(())
    }

    /// Add to sticky flags (no-op when flags are not tracked)
    pub fn record(&mut self, flags: Flags) {
        if self.has_flags {
            self.flags |= flags;
        }
    }

    /// Lowest exponent of a subnormal number: EMin - (precision - 1)
    pub fn e_tiny(&self) -> BigInt {
        if self.precision == 0 || !self.adjust_exponent {
            return self.e_min.clone();
        }
        &self.e_min - BigInt::from(self.precision - 1)
    }

}

impl Default for PrecisionContext {
    fn default() -> Self {
        Self::for_precision_and_rounding(DEFAULT_PRECISION, Rounding::HalfEven)
    }
}

impl fmt::Display for PrecisionContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[PrecisionContext precision={}, rounding={:?}", self.precision, self.rounding)?;
        if self.has_exponent_range {
            write!(f, ", exponent=[{}, {}]", self.e_min, self.e_max)?;
        }
        if self.clamp_normal_exponents {
            write!(f, ", clamp")?;
        }
        if self.simplified {
            write!(f, ", simplified")?;
        }
        if !self.traps.is_empty() {
            write!(f, ", traps={:?}", self.traps)?;
        }
        write!(f, "]")
    }
}


#[cfg(test)]
mod test_context {
    use super::*;

    #[test]
    fn constructor_rejects_negative_precision() {
        let err = PrecisionContext::new(-1, Rounding::HalfEven, -10, 10, false).unwrap_err();
        assert!(matches!(err, ArithmeticError::InvalidArgument(_)));
    }

    #[test]
    fn constructor_rejects_inverted_range() {
        let err = PrecisionContext::new(5, Rounding::HalfEven, 10, -10, false).unwrap_err();
        assert!(matches!(err, ArithmeticError::InvalidArgument(_)));

        let err = PrecisionContext::unlimited()
            .with_big_exponent_range(BigInt::from(1), BigInt::from(0))
            .unwrap_err();
        assert!(matches!(err, ArithmeticError::InvalidArgument(_)));
    }

    #[test]
    fn constructor_accepts_equal_range() {
        let ctx = PrecisionContext::new(0, Rounding::Down, 3, 3, false).unwrap();
        assert_eq!(ctx.e_min(), ctx.e_max());
        assert!(ctx.has_exponent_range());
        assert!(!ctx.has_max_precision());
    }

    #[test]
    fn set_flags_without_flags_is_invalid_operation() {
        let mut ctx = PrecisionContext::decimal64();
        let err = ctx.set_flags(Flags::INEXACT).unwrap_err();
        assert!(matches!(err, ArithmeticError::InvalidOperation(_)));

        let mut ctx = ctx.with_blank_flags();
        ctx.set_flags(Flags::INEXACT).unwrap();
        assert_eq!(ctx.flags(), Flags::INEXACT);
    }

    #[test]
    fn with_blank_flags_returns_copy() {
        let mut ctx = PrecisionContext::decimal32().with_blank_flags();
        ctx.record(Flags::ROUNDED);

        let fresh = ctx.with_blank_flags();
        assert!(fresh.flags().is_empty());
        assert_eq!(ctx.flags(), Flags::ROUNDED);

        let none = ctx.with_no_flags();
        assert!(!none.has_flags());
    }

    #[test]
    fn record_is_sticky() {
        let mut ctx = PrecisionContext::default().with_blank_flags();
        StatusAnd::new(Flags::INEXACT | Flags::ROUNDED, ()).record_into(&mut ctx);
        StatusAnd::new(Flags::CLAMPED, ()).record_into(&mut ctx);
        assert_eq!(ctx.flags(), Flags::INEXACT | Flags::ROUNDED | Flags::CLAMPED);
    }

    #[test]
    fn record_without_flags_is_ignored() {
        let mut ctx = PrecisionContext::default();
        ctx.record(Flags::OVERFLOW);
        assert!(ctx.flags().is_empty());
    }

    #[test]
    fn predefined_decimal_contexts() {
        let ctx = PrecisionContext::decimal128();
        assert_eq!(ctx.precision(), 34);
        assert_eq!(ctx.e_min(), &BigInt::from(-6143));
        assert_eq!(ctx.e_max(), &BigInt::from(6144));
        assert_eq!(ctx.e_tiny(), BigInt::from(-6176));
        assert!(ctx.clamp_normal_exponents());
        assert_eq!(ctx.rounding(), Rounding::HalfEven);
    }

    #[test]
    fn default_precision() {
        let ctx = PrecisionContext::default();
        assert_eq!(ctx.precision(), DEFAULT_PRECISION);
        assert!(!ctx.has_exponent_range());
    }

    #[test]
    fn display() {
        let ctx = PrecisionContext::new(3, Rounding::HalfEven, -10, 10, false).unwrap();
        assert_eq!(ctx.to_string(), "[PrecisionContext precision=3, rounding=HalfEven, exponent=[-10, 10]]");
    }

    #[test]
    fn status_and_map() {
        let s = StatusAnd::new(Flags::INEXACT, 2).map(|v| v * 10);
        assert_eq!(s.value, 20);
        assert_eq!(s.status, Flags::INEXACT);
    }
}


#[cfg(all(test, feature = "serde"))]
mod test_serde {
    use super::*;

    #[test]
    fn context_roundtrip() {
        let ctx = PrecisionContext::decimal64()
            .with_rounding(Rounding::Floor)
            .with_traps(Flags::OVERFLOW | Flags::INVALID);
        let json = serde_json::to_string(&ctx).unwrap();
        let back: PrecisionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }

    #[test]
    fn rounding_by_name() {
        assert_eq!(serde_json::to_string(&Rounding::HalfEven).unwrap(), "\"HalfEven\"");
        let r: Rounding = serde_json::from_str("\"ZeroFiveUp\"").unwrap();
        assert_eq!(r, Rounding::ZeroFiveUp);
    }
}
