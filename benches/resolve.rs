use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use seqblocks::convert::{convert_record, ConvertConfig};
use seqblocks::data_structs::Strand;
use seqblocks::record::{FeatureRecord, SequenceRecord};

const SEQUENCE_LENGTH: usize = 50_000;

fn random_record(n_features: usize) -> SequenceRecord {
    let mut rng = ChaCha8Rng::seed_from_u64(n_features as u64);
    let features = (0..n_features)
        .map(|_| {
            let start = rng.gen_range(0..SEQUENCE_LENGTH - 1);
            let end = rng.gen_range(start + 1..SEQUENCE_LENGTH.min(start + 5_000));
            FeatureRecord::new(start, end, Strand::Forward, "misc_feature")
        })
        .collect();
    SequenceRecord::new("ACGT".repeat(SEQUENCE_LENGTH / 4))
        .with_name(Some(format!("random_{}", n_features)))
        .with_features(features)
}

fn bench_convert_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_record");
    let config = ConvertConfig::default();
    for n_features in [100, 500, 2_000] {
        let record = random_record(n_features);
        group.bench_with_input(
            BenchmarkId::from_parameter(n_features),
            &record,
            |b, record| b.iter(|| convert_record(black_box(record), &config).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_convert_record);
criterion_main!(benches);
