//! Benchmarks for constraint construction and parsing.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polycons::prelude::*;

/// Benchmark parsing speed.
fn bench_parsing(c: &mut Criterion) {
    let source: String = (0..50)
        .map(|i| format!("{}*x{} - 3*x{} + x{} <= {}\n", i + 1, i, i + 1, i + 2, i * 7))
        .collect();

    c.bench_function("parse_50_statements", |b| {
        b.iter(|| {
            let lexer = polycons::frontend::Lexer::new(black_box(&source));
            let mut parser = polycons::frontend::Parser::new(lexer).unwrap();
            parser.parse_program().unwrap()
        })
    });

    c.bench_function("process_50_statements", |b| {
        b.iter(|| process(black_box(&source), &SessionConfig::default()).unwrap())
    });
}

/// Benchmark expression arithmetic.
fn bench_expressions(c: &mut Criterion) {
    c.bench_function("sum_100_terms", |b| {
        b.iter(|| {
            let mut e = LinearExpression::zero();
            for i in 0..100usize {
                e = e + Scalar::from(i + 1) * Variable::new(black_box(i));
            }
            e
        })
    });

    let big = LinearExpression::from_coefficients(
        (0..64).map(|i| Scalar::from(i) * Scalar::from(u64::MAX)),
        Scalar::from(u128::MAX),
    );
    c.bench_function("normalize_big_coefficients", |b| b.iter(|| black_box(&big).normalized()));
}

/// Benchmark constraint system operations.
fn bench_system(c: &mut Criterion) {
    let constraints: Vec<Constraint> = (0..200usize)
        .map(|i| Variable::new(i % 16).greater_or_equal(i))
        .collect();

    c.bench_function("insert_200_constraints", |b| {
        b.iter(|| {
            let system: ConstraintSystem = black_box(&constraints).iter().cloned().collect();
            system
        })
    });

    let system: ConstraintSystem = constraints.iter().cloned().collect();
    let a = Variable::new(3).greater_or_equal(5);
    let b2 = (2 * Variable::new(3)).greater_or_equal(10);
    c.bench_function("equivalence_check", |b| b.iter(|| black_box(&a).is_equivalent_to(&b2)));
    c.bench_function("iterate_system", |b| b.iter(|| black_box(&system).iter().count()));
}

criterion_group!(benches, bench_parsing, bench_expressions, bench_system);
criterion_main!(benches);
