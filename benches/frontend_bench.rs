use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stackc::{Compiler, Scanner};

const MACROS: &str = r#"
macro even? 2 divmod swap drop 0 = end
macro inc 1 + end
"#;

const LOOP: &str = r#"
0 while dup 100 < do
    dup 2 divmod swap drop 0 = if
        dup .
    else
        "odd" drop
    end
    1 +
end
drop
"#;

fn scanner_benchmark(c: &mut Criterion) {
    c.bench_function("scan loop", |b| {
        b.iter(|| Scanner::new("bench.forth").scan_tokens(black_box(LOOP)))
    });
}

fn compile_benchmark(c: &mut Criterion) {
    let compiler = Compiler::default();
    let large = LOOP.repeat(200);
    let with_macros = format!("{}{}", MACROS, "5 inc even? . ".repeat(500));

    c.bench_function("compile loop", |b| {
        b.iter(|| compiler.compile_source("bench.forth", black_box(LOOP)).unwrap())
    });

    c.bench_function("compile large program", |b| {
        b.iter(|| compiler.compile_source("bench.forth", black_box(&large)).unwrap())
    });

    c.bench_function("compile macro expansions", |b| {
        b.iter(|| {
            compiler
                .compile_source("bench.forth", black_box(&with_macros))
                .unwrap()
        })
    });
}

criterion_group!(benches, scanner_benchmark, compile_benchmark);
criterion_main!(benches);
