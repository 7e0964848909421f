//! common routines to be included by benches

use bigradix::num_bigint::BigInt;
use bigradix::ExtendedDecimal;


/// Random decimals with up to `max_digits` digits and exponents in
/// [-exponent_range, exponent_range]
pub fn random_decimals(count: usize, max_digits: u32, exponent_range: i32, seed: u64) -> Vec<ExtendedDecimal> {
    let mut rng = oorandom::Rand32::new(seed);
    (0..count)
        .map(|_| {
            let digits = 1 + rng.rand_range(0..max_digits);
            let mut mantissa = BigInt::from(0);
            for _ in 0..digits {
                mantissa = mantissa * 10u32 + rng.rand_range(0..10);
            }
            if rng.rand_u32() % 2 == 1 {
                mantissa = -mantissa;
            }
            let span = (2 * exponent_range + 1) as u32;
            let exponent = rng.rand_range(0..span) as i64 - exponent_range as i64;
            ExtendedDecimal::new(mantissa, exponent)
        })
        .collect()
}

/// Random pairs drawn from the cartesian product of `decs`
pub fn make_random_pairs(decs: &[ExtendedDecimal], seed: u64) -> Vec<(&ExtendedDecimal, &ExtendedDecimal)> {
    let mut cartesian_pairs = decs
                            .iter()
                            .enumerate()
                            .flat_map(|(i, x)| {
                                decs.iter().skip(i+1).map(move |y| (x, y))
                            }).collect::<Vec<(&ExtendedDecimal, &ExtendedDecimal)>>();

    // random number generator from random seed
    let mut rng = oorandom::Rand32::new(seed);

    for i in (1..cartesian_pairs.len()).rev() {
        let j = rng.rand_u32() as usize % i;
        cartesian_pairs.swap(i, j);
    }

    cartesian_pairs
}


/// Randomly iterates through items in vector
pub struct RandomIterator<'a, T> {
    v: &'a Vec<T>,
    rng: oorandom::Rand32,
}

impl<'a, T: Copy> RandomIterator<'a, T> {
    pub fn new(v: &'a Vec<T>) -> Self {
        let seed = v.as_ptr() as u64;
        Self::new_with_seed(v, seed)
    }

    pub fn new_with_seed(v: &'a Vec<T>, seed: u64) -> Self {
        Self {
            v: v,
            rng: oorandom::Rand32::new(seed),
        }
    }

    pub fn next(&mut self) -> T {
        let idx = self.rng.rand_u32() as usize % self.v.len();
        self.v[idx]
    }
}
