use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dnascope::analysis;
use dnascope::index::{lcp, sa, SuffixTree};
use dnascope::Sequence;

fn make_sequence(len: usize, seed: u32) -> Sequence {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = seed;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    Sequence::new(seq).expect("generated sequence is valid")
}

fn bench_build_sa(c: &mut Criterion) {
    let text = make_sequence(10_000, 42).terminated();
    c.bench_function("build_sa_10k", |b| {
        b.iter(|| {
            black_box(sa::build_sa(black_box(&text)));
        })
    });
}

fn bench_build_lcp(c: &mut Criterion) {
    let text = make_sequence(10_000, 42).terminated();
    let sa_arr = sa::build_sa(&text);
    c.bench_function("build_lcp_10k", |b| {
        b.iter(|| {
            black_box(lcp::build_lcp(black_box(&text), black_box(&sa_arr)));
        })
    });
}

fn bench_suffix_tree(c: &mut Criterion) {
    let text = make_sequence(10_000, 42).terminated();
    c.bench_function("suffix_tree_10k", |b| {
        b.iter(|| {
            black_box(SuffixTree::build(black_box(&text)).expect("terminated text"));
        })
    });
}

fn bench_lrs(c: &mut Criterion) {
    let seq = make_sequence(5_000, 7);
    c.bench_function("longest_repeated_5k", |b| {
        b.iter(|| {
            black_box(analysis::longest_repeated_substring(black_box(&seq)).expect("valid sequence"));
        })
    });
}

fn bench_lcs(c: &mut Criterion) {
    let s1 = make_sequence(5_000, 7);
    let s2 = make_sequence(5_000, 99);
    c.bench_function("longest_common_5k_5k", |b| {
        b.iter(|| {
            black_box(analysis::longest_common_substring(black_box(&s1), black_box(&s2)));
        })
    });
}

criterion_group!(benches, bench_build_sa, bench_build_lcp, bench_suffix_tree, bench_lrs, bench_lcs);
criterion_main!(benches);
