use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use regular_automata::{
    prelude::*,
    random::{generate_random_dfa, generate_random_word},
};

fn minimization(c: &mut Criterion) {
    fastrand::seed(42);
    let mut group = c.benchmark_group("minimization");
    for size in [16, 64, 256] {
        let dfa = generate_random_dfa(3, size);
        for algorithm in [
            MinimizationAlgorithm::TableFilling,
            MinimizationAlgorithm::Hopcroft,
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("{algorithm:?}"), size),
                &dfa,
                |b, dfa| b.iter(|| black_box(dfa.minimize_with(algorithm))),
            );
        }
    }
    group.finish();
}

fn pipeline(c: &mut Criterion) {
    fastrand::seed(7);
    let expression = "(a|b)*a(a|b)(a|b)(a|b)";
    let nfa = NFA::from_regex(expression).unwrap();
    let words: Vec<String> = (0..100)
        .map(|_| generate_random_word(&nfa.alphabet(), 0, 40))
        .collect();

    c.bench_function("determinize", |b| b.iter(|| black_box(nfa.determinize())));

    let dfa = nfa.determinize().minimize();
    c.bench_function("run", |b| {
        b.iter(|| {
            words
                .iter()
                .filter(|word| dfa.run(black_box(word)).accepted)
                .count()
        })
    });
    c.bench_function("equivalence", |b| {
        b.iter(|| black_box(dfa.equivalent(&nfa.determinize())))
    });
}

criterion_group!(benches, minimization, pipeline);
criterion_main!(benches);
