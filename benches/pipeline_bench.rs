use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tinyes::{interpret, parse_str, tokenize};

// A script touching every argument form, repeated to give the lexer some work
const STATEMENTS: &str = r#"
console.log("Hello", "world");
console.log("sum:", 2 + 3, "diff:", 10 - 4);
console.log(6 * 7, 100 / 7, 100 % 7, 2 ^ 10);
console.log(x + 2, 1+2*3, "(parens)", 42);
"#;

fn bench_pipeline(c: &mut Criterion) {
    let input = STATEMENTS.repeat(50);
    let mut group = c.benchmark_group("Pipeline");

    group.bench_with_input(BenchmarkId::new("tokenize", "mixed_script"), &input, |b, input| {
        b.iter(|| tokenize(black_box(input)))
    });
    group.bench_with_input(BenchmarkId::new("parse_str", "mixed_script"), &input, |b, input| {
        b.iter(|| parse_str(black_box(input)))
    });
    group.bench_with_input(BenchmarkId::new("interpret", "mixed_script"), &input, |b, input| {
        b.iter(|| interpret(black_box(input)))
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
