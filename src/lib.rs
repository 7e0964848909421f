// Copyright 2016 Adam Sunderland
//           2016-2023 Andrew Kubera
//           2017 Ruben De Smet
// See the COPYRIGHT file at the top-level directory of this
// distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Arbitrary-precision radix arithmetic
//!
//! `bigradix` is the numeric engine behind "extended" decimal and binary
//! floating point numbers: values stored as a sign, an arbitrary-precision
//! mantissa and an arbitrary-precision exponent, in radix 10 or radix 2.
//!
//! All arithmetic is performed by a generic engine ([`FullRadixMath`]),
//! parameterized by a [`RadixHelper`] which knows how to take apart and
//! rebuild a particular number type. Every operation is governed by a
//! [`PrecisionContext`], which sets the maximum precision, the exponent
//! range, the [`Rounding`] mode, and which conditions should trap.
//!
//! Operations never mutate their inputs. They return the result paired
//! with the status [`Flags`] raised while computing it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use bigradix::{DecimalMath, DecimalHelper, ExtendedDecimal, PrecisionContext, RadixMath, Rounding, RadixPowers, Flags};
//!
//! let math = DecimalMath::new(DecimalHelper::new(Arc::new(RadixPowers::new())));
//! let ctx = PrecisionContext::for_precision_and_rounding(5, Rounding::HalfUp);
//!
//! let one: ExtendedDecimal = "1".parse().unwrap();
//! let three: ExtendedDecimal = "3".parse().unwrap();
//!
//! let q = math.divide(&one, &three, &ctx).unwrap();
//! assert_eq!(q.value.to_string(), "0.33333");
//! assert!(q.status.contains(Flags::INEXACT | Flags::ROUNDED));
//! ```
#![allow(clippy::style)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::needless_return)]
#![allow(clippy::redundant_field_names)]


pub extern crate num_bigint;
pub extern crate num_traits;
extern crate num_integer;

#[cfg(feature = "serde")]
extern crate serde;

pub use num_traits::{One, Signed, ToPrimitive, Zero};


// const DEFAULT_PRECISION: u64 = ${RUST_BIGRADIX_DEFAULT_PRECISION} or 34;
include!(concat!(env!("OUT_DIR"), "/default_precision.rs"));

// const POWER_CACHE_SIZE: usize = ${RUST_BIGRADIX_POWER_CACHE_SIZE} or 64;
include!(concat!(env!("OUT_DIR"), "/power_cache_size.rs"));

#[macro_use]
mod macros;

#[cfg(test)]
extern crate paste;

mod error;
pub use error::{ArithmeticError, ParseNumberError, RadixError, TrapError};

pub mod fast_integer;
pub use fast_integer::FastInteger;

pub mod mutable_number;
pub use mutable_number::MutableNumber;

pub mod powers;
pub use powers::{PowerCache, RadixPowers};

pub mod shift_accumulator;
pub use shift_accumulator::{BitShiftAccumulator, DigitShiftAccumulator, ShiftAccumulator};

pub mod rounding;
pub use rounding::Rounding;

// Mathematical context
pub mod context;
pub use context::{Flags, PrecisionContext, StatusAnd};

pub mod helper;
pub use helper::{BinaryHelper, DecimalHelper, NumberFlags, RadixHelper};

mod extended_decimal;
pub use extended_decimal::ExtendedDecimal;

mod extended_float;
pub use extended_float::ExtendedFloat;

pub mod radix_math;
pub use radix_math::{FullRadixMath, RadixMath, RadixResult};

pub mod simple;
pub use simple::{ExtendedOrSimpleRadixMath, SimpleRadixMath};

/// Engine over [`ExtendedDecimal`] values, dispatching on [`PrecisionContext::is_simplified`]
pub type DecimalMath = ExtendedOrSimpleRadixMath<DecimalHelper>;

/// Engine over [`ExtendedFloat`] values, dispatching on [`PrecisionContext::is_simplified`]
pub type BinaryMath = ExtendedOrSimpleRadixMath<BinaryHelper>;
