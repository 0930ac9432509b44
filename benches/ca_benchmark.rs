use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::distr::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};
use single_ca::{ContingencyTable, CorrespondenceAnalysisBuilder, SvdMethod};
use std::time::Duration;

#[derive(Clone)]
pub struct TableConfig {
    seed: u64,
    table_sizes: Vec<(usize, usize)>,
    n_components: usize,
    measurement_time: u64,
    sample_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            table_sizes: vec![(20, 10), (200, 50), (1000, 200), (5000, 500)],
            n_components: 5,
            measurement_time: 10,
            sample_size: 10,
        }
    }
}

// strictly positive counts, so no row or column has a zero margin
fn create_test_table(rows: usize, cols: usize, seed: u64) -> ContingencyTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let count_dist = Uniform::try_from(1u32..50).unwrap();
    let data = Array2::from_shape_fn((rows, cols), |_| count_dist.sample(&mut rng) as f64);
    ContingencyTable::from_array(data).unwrap()
}

fn configure_group<'a, M: Measurement>(
    c: &'a mut Criterion<M>,
    name: &str,
    config: &TableConfig,
) -> BenchmarkGroup<'a, M> {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(config.measurement_time));
    group.sample_size(config.sample_size);
    group
}

pub fn bench_fit(c: &mut Criterion) {
    let config = TableConfig::default();
    let mut group = configure_group(c, "CA_Fit", &config);

    for &(rows, cols) in config.table_sizes.iter() {
        let seed = config.seed + (rows * cols) as u64;
        let table = create_test_table(rows, cols, seed);

        for (label, method) in [("exact", SvdMethod::Exact), ("randomized", SvdMethod::randomized())] {
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}x{}", rows, cols)),
                &(rows, cols),
                |b, _| {
                    b.iter(|| {
                        let mut ca = CorrespondenceAnalysisBuilder::new()
                            .n_components(config.n_components)
                            .random_state(config.seed)
                            .svd_method(method)
                            .build();
                        ca.fit(&table).unwrap();
                    });
                },
            );
        }
    }
    group.finish();
}

pub fn bench_projection(c: &mut Criterion) {
    let config = TableConfig::default();
    let mut group = configure_group(c, "CA_Projection", &config);

    for &(rows, cols) in config.table_sizes.iter() {
        let seed = config.seed + (rows * cols) as u64;
        let table = create_test_table(rows, cols, seed);
        let mut ca = CorrespondenceAnalysisBuilder::new()
            .n_components(config.n_components)
            .build();
        ca.fit(&table).unwrap();

        group.bench_with_input(
            BenchmarkId::new("row_coordinates", format!("{}x{}", rows, cols)),
            &(rows, cols),
            |b, _| {
                b.iter(|| ca.row_coordinates(&table).unwrap());
            },
        );

        group.bench_with_input(
            BenchmarkId::new("column_cosine_similarities", format!("{}x{}", rows, cols)),
            &(rows, cols),
            |b, _| {
                b.iter(|| ca.column_cosine_similarities(&table).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(ca_benches, bench_fit, bench_projection);
criterion_main!(ca_benches);
