use cpakit::cpa::{recover_byte, score_hypothesis};
use cpakit::dataset::{TraceDataset, BLOCK_SIZE};
use cpakit::leakage_model::{aes, Sbox};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use ndarray_rand::rand::{rngs::StdRng, SeedableRng};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn bench_cpa(c: &mut Criterion) {
    // Seed rng to get the same output each run
    let mut rng = StdRng::seed_from_u64(0);

    let mut group = c.benchmark_group("cpa");

    for num_traces in [1000, 5000].into_iter() {
        let traces = Array2::random_using((num_traces, 1000), Uniform::new(-2., 2.), &mut rng);
        let plaintexts = Array2::random_using(
            (num_traces, BLOCK_SIZE),
            Uniform::new_inclusive(0u8, 255u8),
            &mut rng,
        );
        let dataset = TraceDataset::new(plaintexts, traces).unwrap();
        let sbox = Sbox::from(aes::SBOX);

        group.bench_with_input(
            BenchmarkId::new("score_hypothesis", num_traces),
            &dataset,
            |b, dataset| b.iter(|| score_hypothesis(0, 0x2b, dataset, &sbox)),
        );
        group.bench_with_input(
            BenchmarkId::new("recover_byte", num_traces),
            &dataset,
            |b, dataset| b.iter(|| recover_byte(0, dataset, &sbox)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_cpa);
criterion_main!(benches);
