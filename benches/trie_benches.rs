use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wordtrie::{Predictor, SpellCorrector, Trie};

/// Deterministic pseudo-words over a 6-letter alphabet
fn corpus(size: usize) -> Vec<(String, u64)> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..size)
        .map(|i| {
            let mut word = String::new();
            let len = 3 + (i % 6);
            for _ in 0..len {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                word.push((b'a' + (state % 6) as u8) as char);
            }
            (word, state % 10_000)
        })
        .collect()
}

fn build_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [100, 1_000, 10_000].iter() {
        let pairs = corpus(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &pairs, |b, pairs| {
            b.iter(|| black_box(Trie::build(pairs.iter().map(|(w, f)| (w.as_str(), *f)))));
        });
    }

    group.finish();
}

fn query_benchmark(c: &mut Criterion) {
    let trie = Trie::build(corpus(10_000));
    let predictor = Predictor::new(&trie);
    let corrector = SpellCorrector::new(&trie);

    c.bench_function("search", |b| b.iter(|| trie.search(black_box("abcab"))));
    c.bench_function("predict", |b| {
        b.iter(|| predictor.predict_completions(black_box("ab"), 3))
    });
    c.bench_function("correct", |b| {
        b.iter(|| corrector.correct_word(black_box("abcfz")))
    });
}

criterion_group!(benches, build_benchmark, query_benchmark);
criterion_main!(benches);
