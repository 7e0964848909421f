//! Error types
//!
//! Arithmetic status conditions (inexact, overflow, ...) are *not* errors;
//! they are reported through [`Flags`]. The types here cover contract
//! violations, host-type conversion failures, and conditions the caller
//! asked to trap.

use std::fmt;

use crate::context::{Flags, PrecisionContext};


/// Failure of an operation which cannot produce a meaningful result
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    /// Malformed input: negative magnitude for an unsigned structure,
    /// negative precision, EMin > EMax, ...
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Misuse of an API contract (writing flags to a context without flags)
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Value does not fit in the requested host type
    #[error("value out of range: {0}")]
    Overflow(String),

    /// Rounding mode is [`Rounding::Unnecessary`](crate::Rounding::Unnecessary)
    /// but the result could not be represented exactly
    #[error("rounding was required, but rounding mode is Unnecessary")]
    RoundingRequired,
}

impl ArithmeticError {
    pub(crate) fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ArithmeticError::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        ArithmeticError::InvalidOperation(msg.into())
    }
}


/// A status condition configured as a trap was raised
///
/// Carries the trapped condition, a copy of the context the
/// operation ran under, and the result the operation would have
/// returned had the condition not trapped.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrapError<T> {
    flag: Flags,
    errors: Flags,
    context: PrecisionContext,
    result: T,
}

impl<T> TrapError<T> {
    pub(crate) fn new(trapped: Flags, context: PrecisionContext, result: T) -> Self {
        debug_assert!(!trapped.is_empty());
        // lowest set bit is reported as "the" error
        let lowest = trapped.bits() & trapped.bits().wrapping_neg();
        TrapError {
            flag: Flags::from_bits_truncate(lowest),
            errors: trapped,
            context: context,
            result: result,
        }
    }

    /// The trapped condition (if several trapped, the lowest-valued one)
    pub fn flag(&self) -> Flags {
        self.flag
    }

    /// Every condition which trapped during the operation
    pub fn errors(&self) -> Flags {
        self.errors
    }

    /// Copy of the context the operation ran under
    pub fn context(&self) -> &PrecisionContext {
        &self.context
    }

    /// The result the operation would have produced
    pub fn result(&self) -> &T {
        &self.result
    }

    /// Consume error, returning the un-trapped result
    pub fn into_result(self) -> T {
        self.result
    }
}

impl<T> fmt::Display for TrapError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "trapped condition: {:?}", self.flag)
    }
}

impl<T: fmt::Debug> std::error::Error for TrapError<T> {}


/// Error returned by operations of the radix arithmetic engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadixError<T> {
    Arithmetic(ArithmeticError),
    Trap(TrapError<T>),
}

impl<T> RadixError<T> {
    /// Return the trap, if this error is one
    pub fn as_trap(&self) -> Option<&TrapError<T>> {
        match self {
            RadixError::Trap(trap) => Some(trap),
            RadixError::Arithmetic(_) => None,
        }
    }
}

impl<T> From<ArithmeticError> for RadixError<T> {
    fn from(err: ArithmeticError) -> Self {
        RadixError::Arithmetic(err)
    }
}

impl<T> From<TrapError<T>> for RadixError<T> {
    fn from(err: TrapError<T>) -> Self {
        RadixError::Trap(err)
    }
}

impl<T> fmt::Display for RadixError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RadixError::Arithmetic(err) => err.fmt(f),
            RadixError::Trap(err) => err.fmt(f),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for RadixError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RadixError::Arithmetic(err) => Some(err),
            RadixError::Trap(_) => None,
        }
    }
}


/// Failure to parse a number from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNumberError {
    #[error("cannot parse number from empty string")]
    Empty,

    #[error("number has no digits")]
    NoDigits,

    #[error("invalid character {0:?} in number")]
    InvalidDigit(char),
}
