use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fermi_core::evaluator::{evaluate, parse_answer, to_order_of_magnitude};
use fermi_core::model::Question;
use fermi_core::session::SessionStats;

fn bench_parse_answer(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_answer");

    group.bench_function("plain", |b| b.iter(|| parse_answer(black_box("4500"))));
    group.bench_function("scientific", |b| {
        b.iter(|| parse_answer(black_box("3.2e9")))
    });
    group.bench_function("separators", |b| {
        b.iter(|| parse_answer(black_box("1,250,000")))
    });
    group.bench_function("power", |b| b.iter(|| parse_answer(black_box("3x10^9"))));
    group.bench_function("rejected", |b| {
        b.iter(|| parse_answer(black_box("a few thousand")))
    });

    group.finish();
}

fn bench_order_of_magnitude(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_order_of_magnitude");

    group.bench_function("boundary", |b| {
        b.iter(|| to_order_of_magnitude(black_box(3160.0)))
    });
    group.bench_function("tiny", |b| {
        b.iter(|| to_order_of_magnitude(black_box(2.5e-12)))
    });

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let question = Question::new("Seconds in a year", 7);
    let inputs = ["3e7", "1000", "10^9", "50,000,000", "8e6"];

    c.bench_function("evaluate_and_record", |b| {
        b.iter(|| {
            let mut stats = SessionStats::new();
            for input in inputs {
                if let Ok(eval) = evaluate(black_box(input), &question) {
                    stats.record(eval.error);
                }
            }
            stats.summary()
        })
    });
}

criterion_group!(
    benches,
    bench_parse_answer,
    bench_order_of_magnitude,
    bench_session
);
criterion_main!(benches);
