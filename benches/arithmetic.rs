//! Benchmarks for engine operations

extern crate criterion;
extern crate bigradix;
extern crate oorandom;

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bigradix::{DecimalHelper, DecimalMath, ExtendedDecimal, PrecisionContext, RadixMath, Rounding};

mod common;
use common::*;

criterion_main!(
    arithmetic,
    transcendental,
);

criterion_group!(
    name = arithmetic;
    config = Criterion::default()
                       .sample_size(300);
    targets =
        bench_small_operands,
        bench_large_operands,
);

criterion_group!(
    name = transcendental;
    config = Criterion::default()
                       .measurement_time(Duration::from_secs(7))
                       .sample_size(100);
    targets =
        bench_transcendental,
);


fn bench_binary_op<F>(
    name: &str,
    c: &mut Criterion,
    pairs: &Vec<(&ExtendedDecimal, &ExtendedDecimal)>,
    op: F,
) where
    F: Fn(&ExtendedDecimal, &ExtendedDecimal) -> ExtendedDecimal,
{
    let mut random_pairs = RandomIterator::new(pairs);
    c.bench_function(
        name,
        |b| b.iter_batched(
            || {
                random_pairs.next()
            },
            |(x, y)| {
                black_box(op(x, y));
            },
            criterion::BatchSize::SmallInput));
}

fn bench_unary_op<F>(
    name: &str,
    c: &mut Criterion,
    decs: &[ExtendedDecimal],
    op: F,
) where
    F: Fn(&ExtendedDecimal) -> ExtendedDecimal,
{
    let mut idx = 0;
    c.bench_function(
        name,
        |b| b.iter_batched(
            || {
                idx += 1;
                if idx == decs.len() {
                    idx = 0;
                }
                &decs[idx]
            },
            |x| {
                black_box(op(x));
            },
            criterion::BatchSize::SmallInput));
}


/// Operands with short mantissas, through both engine routes
pub fn bench_small_operands(c: &mut Criterion) {
    let math = DecimalMath::new(DecimalHelper::default());
    let full = PrecisionContext::decimal64();
    let simple = PrecisionContext::decimal64().with_simplified(true);

    let decs = random_decimals(200, 12, 20, 7238269155957952517_u64);
    let pairs = make_random_pairs(&decs, 7238269155957952517_u64);

    bench_binary_op("addition-small-full", c, &pairs, |x, y| math.add(x, y, &full).unwrap().value);
    bench_binary_op("addition-small-simple", c, &pairs, |x, y| math.add(x, y, &simple).unwrap().value);
    bench_binary_op("multiplication-small-full", c, &pairs, |x, y| math.multiply(x, y, &full).unwrap().value);
    bench_binary_op("multiplication-small-simple", c, &pairs, |x, y| math.multiply(x, y, &simple).unwrap().value);
    bench_binary_op("division-small", c, &pairs, |x, y| math.divide(x, y, &full).unwrap().value);
}

/// Operands with hundreds of digits, rounded to 100 digits
pub fn bench_large_operands(c: &mut Criterion) {
    let math = DecimalMath::new(DecimalHelper::default());
    let ctx = PrecisionContext::for_precision_and_rounding(100, Rounding::HalfEven);

    let decs = random_decimals(100, 400, 500, 9223372036854775783_u64);
    let pairs = make_random_pairs(&decs, 9223372036854775783_u64);

    bench_binary_op("addition-large", c, &pairs, |x, y| math.add(x, y, &ctx).unwrap().value);
    bench_binary_op("subtraction-large", c, &pairs, |x, y| math.subtract(x, y, &ctx).unwrap().value);
    bench_binary_op("multiplication-large", c, &pairs, |x, y| math.multiply(x, y, &ctx).unwrap().value);
    bench_binary_op("division-large", c, &pairs, |x, y| math.divide(x, y, &ctx).unwrap().value);
    bench_unary_op("sqrt-large", c, &decs, |x| math.square_root(x, &ctx).unwrap().value);
}

pub fn bench_transcendental(c: &mut Criterion) {
    let math = DecimalMath::new(DecimalHelper::default());
    let ctx = PrecisionContext::decimal128();

    let decs: Vec<ExtendedDecimal> = random_decimals(100, 20, 5, 1234567891011_u64)
        .into_iter()
        .filter(|d| d.sign() > 0)
        .collect();

    bench_unary_op("ln-decimal128", c, &decs, |x| math.ln(x, &ctx).unwrap().value);
    bench_unary_op("exp-decimal128", c, &decs, |x| math.exp(x, &ctx).unwrap().value);
    bench_unary_op("log10-decimal128", c, &decs, |x| math.log10(x, &ctx).unwrap().value);
    c.bench_function("pi-decimal128", |b| b.iter(|| black_box(math.pi(&ctx).unwrap().value)));
}
