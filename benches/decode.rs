//! Decode throughput on the bundled sample and on generated tables.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ruletab::grammar::{Alt, GrammarBuilder};
use ruletab::report::TraceWriter;
use ruletab::{decode, decode_traced, encode, load, InputFormat, Token};

const SAMPLE: &str = include_str!("../tests/fixtures/sample.grammar");

/// Generate an encoded table with `num_rules` rules referencing each other.
fn generate_table(num_rules: u32, seed: u64) -> Vec<Token> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = GrammarBuilder::new();

    for id in 0..num_rules {
        let alternates: Vec<Alt> = (0..rng.gen_range(1..5))
            .map(|_| {
                let mut alt = Alt::new();
                for _ in 0..rng.gen_range(0..6) {
                    if rng.gen_bool(0.5) {
                        alt = alt.reference(rng.gen_range(0..num_rules));
                    } else {
                        let from = rng.gen_range(0x20..0x7f);
                        alt = alt.set([(from, from + rng.gen_range(0..16))]);
                    }
                }
                alt
            })
            .collect();
        builder = builder.rule(id, alternates);
    }

    encode(&builder.build())
}

fn bench_sample(c: &mut Criterion) {
    let tokens = load(SAMPLE, InputFormat::Integers).unwrap();
    let mut group = c.benchmark_group("sample");
    group.throughput(Throughput::Elements(tokens.len() as u64));

    group.bench_function("load", |b| {
        b.iter(|| load(black_box(SAMPLE), InputFormat::Integers).unwrap())
    });
    group.bench_function("decode", |b| b.iter(|| decode(black_box(&tokens)).unwrap()));
    group.bench_function("decode_traced", |b| {
        b.iter(|| {
            let mut writer = TraceWriter::new(String::new());
            decode_traced(black_box(&tokens), &mut writer).unwrap();
            writer.finish().unwrap()
        })
    });

    group.finish();
}

fn bench_generated(c: &mut Criterion) {
    let mut group = c.benchmark_group("generated");

    for num_rules in [100, 1_000, 10_000] {
        let tokens = generate_table(num_rules, 42);
        group.throughput(Throughput::Elements(tokens.len() as u64));

        group.bench_with_input(BenchmarkId::new("decode", num_rules), &tokens, |b, tokens| {
            b.iter(|| decode(black_box(tokens)).unwrap())
        });

        let grammar = decode(&tokens).unwrap();
        group.bench_with_input(BenchmarkId::new("encode", num_rules), &grammar, |b, grammar| {
            b.iter(|| encode(black_box(grammar)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sample, bench_generated);
criterion_main!(benches);
