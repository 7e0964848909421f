//! Powers of the radix, and bit/digit counting utilities
//!
//! Powers of five and ten are needed whenever a decimal exponent meets a
//! binary one. Small powers fit in a `u64` and are served from a table;
//! larger ones are computed by repeated squaring and memoized in a small
//! most-recently-used list.

use std::collections::VecDeque;
use std::f64::consts::LOG2_10;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use parking_lot::Mutex;

use crate::{ArithmeticError, POWER_CACHE_SIZE};


/// Memoized powers of a single base
///
/// The cache is shared between threads by reference; the lock is held
/// only while scanning or reordering the (bounded) entry list, never
/// while multiplying.
///
pub struct PowerCache {
    base: u32,
    /// base^0, base^1, ... while the value fits in u64
    small: Vec<u64>,
    /// (exponent, power) pairs, most recently used first
    entries: Mutex<VecDeque<(u64, BigUint)>>,
    capacity: usize,
}

impl PowerCache {
    /// Cache of powers of `base` holding at most `POWER_CACHE_SIZE` large entries
    pub fn new(base: u32) -> Self {
        Self::with_capacity(base, POWER_CACHE_SIZE)
    }

    /// Cache of powers of `base` holding at most `capacity` large entries
    pub fn with_capacity(base: u32, capacity: usize) -> Self {
        debug_assert!(base >= 2);
        let mut small = vec![1u64];
        let mut value = 1u64;
        while let Some(next) = value.checked_mul(base as u64) {
            small.push(next);
            value = next;
        }
        PowerCache {
            base: base,
            small: small,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// The base of this cache
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Largest exponent served from the u64 table
    pub fn max_small_exponent(&self) -> u64 {
        (self.small.len() - 1) as u64
    }

    /// Number of large powers currently memoized
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True if no large power is memoized
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Return base^pow
    pub fn power(&self, pow: u64) -> BigUint {
        if let Some(&n) = self.small.get(pow as usize) {
            return BigUint::from(n);
        }

        let (start_pow, start) = match self.lookup(pow) {
            Ok(exact) => return exact,
            Err(nearest) => nearest,
        };

        tracing::trace!(base = self.base, pow, start_pow, "power cache miss");
        let result = match start {
            Some(start) => start * self.compute(pow - start_pow),
            None => self.compute(pow),
        };
        self.insert(pow, &result);
        result
    }

    /// Find pow in the cache, moving it to the front.
    ///
    /// On a miss, return the largest cached power below it (if any)
    fn lookup(&self, pow: u64) -> Result<BigUint, (u64, Option<BigUint>)> {
        let mut entries = self.entries.lock();

        if let Some(idx) = entries.iter().position(|(exp, _)| *exp == pow) {
            if let Some(entry) = entries.remove(idx) {
                let value = entry.1.clone();
                entries.push_front(entry);
                return Ok(value);
            }
        }

        let nearest = entries.iter()
                             .filter(|(exp, _)| *exp < pow)
                             .max_by_key(|(exp, _)| *exp);
        match nearest {
            Some((exp, value)) => Err((*exp, Some(value.clone()))),
            None => Err((0, None)),
        }
    }

    fn insert(&self, pow: u64, value: &BigUint) {
        let mut entries = self.entries.lock();
        // another thread may have computed the same power meanwhile
        if entries.iter().any(|(exp, _)| *exp == pow) {
            return;
        }
        entries.push_front((pow, value.clone()));
        while entries.len() > self.capacity {
            if let Some((evicted, _)) = entries.pop_back() {
                tracing::trace!(base = self.base, evicted, "power cache eviction");
            }
        }
    }

    /// Compute base^pow without consulting the list of cached entries
    fn compute(&self, pow: u64) -> BigUint {
        let chunk = self.max_small_exponent();
        if pow <= chunk {
            return BigUint::from(self.small[pow as usize]);
        }

        // linear case of base^pow = base^(chunk * count + rem)
        if pow < 30 * chunk {
            let (count, rem) = pow.div_rem(&chunk);
            let big_chunk = self.small[chunk as usize];

            let mut res = BigUint::from(big_chunk);
            for _ in 1..count {
                res *= big_chunk;
            }
            if rem != 0 {
                res *= self.small[rem as usize];
            }
            return res;
        }

        // recursive: base^pow = (base^(pow / 16))^16 * base^(pow % 16)
        let (quotient, rem) = pow.div_rem(&16);
        let x = self.power(quotient);

        let x2 = &x * &x;
        let x4 = &x2 * &x2;
        let x8 = &x4 * &x4;
        let res = &x8 * &x8;

        if rem == 0 {
            res
        } else {
            res * self.small[rem as usize]
        }
    }
}

impl std::fmt::Debug for PowerCache {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("PowerCache")
         .field("base", &self.base)
         .field("capacity", &self.capacity)
         .field("len", &self.len())
         .finish()
    }
}


/// Caches of powers of five and ten
///
/// Intended to be created once and shared (in an [`Arc`](std::sync::Arc))
/// by every engine and helper that needs decimal powers.
///
#[derive(Debug)]
pub struct RadixPowers {
    fives: PowerCache,
    tens: PowerCache,
}

impl RadixPowers {
    pub fn new() -> Self {
        RadixPowers {
            fives: PowerCache::new(5),
            tens: PowerCache::new(10),
        }
    }

    /// Return 5^n, or zero if n is negative
    pub fn find_power_of_five(&self, n: i64) -> BigUint {
        match u64::try_from(n) {
            Ok(n) => self.fives.power(n),
            Err(_) => BigUint::zero(),
        }
    }

    /// Return 10^n, or zero if n is negative
    pub fn find_power_of_ten(&self, n: i64) -> BigUint {
        match u64::try_from(n) {
            Ok(n) => self.tens.power(n),
            Err(_) => BigUint::zero(),
        }
    }

    /// Return 5^n, or zero if n is negative
    pub fn find_power_of_five_big(&self, n: &BigInt) -> Result<BigUint, ArithmeticError> {
        if n.is_negative() {
            return Ok(BigUint::zero());
        }
        n.to_u64()
         .map(|n| self.fives.power(n))
         .ok_or_else(|| ArithmeticError::invalid_argument(format!("power exponent {} is too large", n)))
    }

    /// Return 10^n, or zero if n is negative
    pub fn find_power_of_ten_big(&self, n: &BigInt) -> Result<BigUint, ArithmeticError> {
        if n.is_negative() {
            return Ok(BigUint::zero());
        }
        n.to_u64()
         .map(|n| self.tens.power(n))
         .ok_or_else(|| ArithmeticError::invalid_argument(format!("power exponent {} is too large", n)))
    }

    /// Return 10^n
    pub(crate) fn ten_to_the(&self, n: u64) -> BigUint {
        self.tens.power(n)
    }

    /// Number of decimal digits in n (1 for zero)
    pub fn count_decimal_digits(&self, n: &BigUint) -> u64 {
        if let Some(small) = n.to_u64() {
            return count_decimal_digits_u64(small);
        }
        // guess number of digits based on number of bits, then correct
        let mut digits = (n.bits() as f64 / LOG2_10) as u64;
        let mut num = self.ten_to_the(digits);
        while *n >= num {
            num *= 10u8;
            digits += 1;
        }
        digits
    }
}

impl Default for RadixPowers {
    fn default() -> Self {
        Self::new()
    }
}


/// Number of decimal digits in n (1 for zero)
pub fn count_decimal_digits_u64(n: u64) -> u64 {
    if n == 0 {
        return 1;
    }
    n.ilog10() as u64 + 1
}

/// Number of bits needed to represent n (1 for zero)
pub fn bit_length(n: &BigUint) -> u64 {
    n.bits().max(1)
}

/// Position of the highest set bit, plus one (0 for zero)
pub fn bit_precision(n: u64) -> u64 {
    (u64::BITS - n.leading_zeros()) as u64
}

/// Number of trailing zero bits (0 for zero)
pub fn count_trailing_zero_bits(n: &BigUint) -> u64 {
    n.trailing_zeros().unwrap_or(0)
}

/// Return 2^n
pub(crate) fn two_to_the(n: u64) -> BigUint {
    BigUint::one() << n
}


#[cfg(test)]
mod test {
    use super::*;
    use paste::paste;
    use std::sync::Arc;

    macro_rules! impl_case {
        ($name:ident: $n:literal => $digits:literal) => {
            paste! {
                #[test]
                fn [< case_count_decimal_digits_ $name >]() {
                    let powers = RadixPowers::new();
                    let n: BigUint = $n.parse().unwrap();
                    assert_eq!(powers.count_decimal_digits(&n), $digits);
                }
            }
        };
    }

    impl_case!(zero: "0" => 1);
    impl_case!(nine: "9" => 1);
    impl_case!(ten: "10" => 2);
    impl_case!(u64_max: "18446744073709551615" => 20);
    impl_case!(twenty_digits: "99999999999999999999" => 20);
    impl_case!(twenty_one_digits: "100000000000000000000" => 21);
    impl_case!(large: "123456789012345678901234567890123456789012345678901234567890" => 60);

    #[test]
    fn test_negative_exponent_is_zero() {
        let powers = RadixPowers::new();
        assert!(powers.find_power_of_five(-1).is_zero());
        assert!(powers.find_power_of_ten(-100).is_zero());
        assert!(powers.find_power_of_ten_big(&BigInt::from(-3)).unwrap().is_zero());
    }

    #[test]
    fn test_too_large_exponent() {
        let powers = RadixPowers::new();
        let n = BigInt::from(u64::MAX) * 4;
        assert!(matches!(powers.find_power_of_five_big(&n), Err(ArithmeticError::InvalidArgument(_))));
    }

    #[test]
    fn test_small_table() {
        let fives = PowerCache::new(5);
        assert_eq!(fives.max_small_exponent(), 27);
        assert_eq!(fives.power(27), BigUint::from(5u64.pow(27)));
        assert!(fives.is_empty());

        let tens = PowerCache::new(10);
        assert_eq!(tens.max_small_exponent(), 19);
    }

    #[test]
    fn test_power_of_ten_is_shifted_power_of_five() {
        let powers = RadixPowers::new();
        for n in [0, 1, 5, 19, 20, 27, 28, 64, 100, 333, 590, 1000, 1234, 4097] {
            let ten = powers.find_power_of_ten(n);
            let five = powers.find_power_of_five(n);
            assert_eq!(ten, five << n as usize, "n = {}", n);
        }
    }

    #[test]
    fn test_cache_reuse_and_eviction() {
        let cache = PowerCache::with_capacity(10, 4);
        let a = cache.power(50);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.power(50), a);
        assert_eq!(cache.len(), 1);

        for n in 60..70 {
            cache.power(n);
        }
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.power(50), a);
        assert_eq!(a.to_string(), format!("1{}", "0".repeat(50)));
    }

    #[test]
    fn test_concurrent_access_gives_identical_results() {
        let powers = Arc::new(RadixPowers::new());
        let exponents: Vec<i64> = (0..40).map(|i| 25 + i * 97).collect();
        let expected: Vec<BigUint> = exponents.iter()
                                              .map(|&n| PowerCache::with_capacity(5, 1).power(n as u64))
                                              .collect();

        std::thread::scope(|s| {
            for t in 0..8 {
                let powers = Arc::clone(&powers);
                let exponents = &exponents;
                let expected = &expected;
                s.spawn(move || {
                    for i in 0..exponents.len() {
                        // visit exponents in a different order per thread
                        let idx = (i * (t + 1) * 7) % exponents.len();
                        let got = powers.find_power_of_five(exponents[idx]);
                        assert_eq!(got, expected[idx]);
                    }
                });
            }
        });
    }

    #[test]
    fn test_bit_utilities() {
        assert_eq!(bit_length(&BigUint::zero()), 1);
        assert_eq!(bit_length(&BigUint::from(255u32)), 8);
        assert_eq!(bit_precision(0), 0);
        assert_eq!(bit_precision(1), 1);
        assert_eq!(bit_precision(u64::MAX), 64);
        assert_eq!(count_trailing_zero_bits(&BigUint::zero()), 0);
        assert_eq!(count_trailing_zero_bits(&(BigUint::from(3u32) << 100usize)), 100);
        assert_eq!(two_to_the(70), BigUint::from(1u128 << 70));
    }
}
