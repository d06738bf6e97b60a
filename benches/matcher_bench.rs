/// Benchmarks for the per-call source lookup.
///
/// Run with: `cargo bench`
///
/// Every `qq!` call re-reads and re-parses its file, so the cost grows with the
/// size of the calling file. These measure parse + match at a few file sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qq::domain::matcher::{Anchor, CallMatcher};
use qq::infrastructure::parse_source_file;
use tempfile::tempdir;

/// Source with `functions` functions, each holding one `qq!` call on its third line.
fn synthetic_source(functions: usize) -> String {
    let mut src = String::new();
    for i in 0..functions {
        src.push_str(&format!("fn handler_{}(a: u32, b: u32) {{\n", i));
        src.push_str("    let total = a + b;\n");
        src.push_str("    qq!(a, b + 1, total as u64, 5432);\n");
        src.push_str("}\n\n");
    }
    src
}

fn bench_parse_and_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("qq/parse_and_match");
    let matcher = CallMatcher::default();

    for functions in [10usize, 100, 1000].iter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.rs");
        std::fs::write(&path, synthetic_source(*functions)).unwrap();
        // last call in the file
        let line = (*functions as u32 - 1) * 5 + 3;

        group.bench_with_input(BenchmarkId::new("functions", functions), &path, |b, path| {
            b.iter(|| {
                let tree = parse_source_file(black_box(path)).unwrap();
                let args = matcher.find(&tree, Anchor::EndLine(line)).unwrap();
                drop(tree);
                qq::infrastructure::release_spans();
                args
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_and_match);
criterion_main!(benches);
