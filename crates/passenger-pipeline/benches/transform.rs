use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use passenger_pipeline::{Pipeline, PipelineConfig, TrainingSet};

const TRAIN_CSV: &str = include_str!("../tests/data/train_sample.csv");

fn bench_transform(c: &mut Criterion) {
    let rows = TrainingSet::from_csv_reader(TRAIN_CSV.as_bytes())
        .expect("fixture parses")
        .into_records();
    let pipeline = Pipeline::new(PipelineConfig::default())
        .fit(&rows)
        .expect("fixture fits");

    let mut group = c.benchmark_group("transform");
    for size in [1usize, 64, 1024] {
        let batch: Vec<_> = rows.iter().cycle().take(size).cloned().collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch", size), &batch, |b, batch| {
            b.iter(|| pipeline.transform(black_box(batch)).unwrap());
        });
    }
    group.finish();

    c.bench_function("fit", |b| {
        b.iter(|| Pipeline::default().fit(black_box(&rows)).unwrap());
    });
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
