use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fermi_core::model::BankFormat;
use fermi_core::parser::parse_bank_str;

fn bench_bank_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bank_parsing");

    for n in [10, 100, 1000] {
        let json = generate_grouped_json(n);
        group.bench_function(format!("grouped_json_{n}"), |b| {
            b.iter(|| parse_bank_str(black_box(&json), BankFormat::Json, "bench.json"))
        });

        let script = generate_script(n);
        group.bench_function(format!("script_{n}"), |b| {
            b.iter(|| parse_bank_str(black_box(&script), BankFormat::Script, "bench.js"))
        });
    }

    group.finish();
}

fn generate_grouped_json(n: usize) -> String {
    let entries: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"question": "Question {i}", "answer": {}}}"#, i % 20))
        .collect();
    format!(r#"{{"Bench": [{}]}}"#, entries.join(","))
}

fn generate_script(n: usize) -> String {
    let mut s = String::from("window.QUESTIONS = [\n");
    for i in 0..n {
        s.push_str(&format!(
            "  {{ text: 'Question {i}', correctOrder: {} }}, // #{i}\n",
            i % 20
        ));
    }
    s.push_str("];\n");
    s
}

criterion_group!(benches, bench_bank_parsing);
criterion_main!(benches);
