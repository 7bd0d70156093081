use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gridkernel_wfc::wfc_solve;

/// A propagation table with no adjacency constraints, so the benchmark
/// exercises entropy selection and propagation bookkeeping without ever
/// hitting a contradiction.
fn unconstrained_table(num_patterns: u8) -> Vec<u8> {
    let all = ((1u16 << num_patterns) - 1) as u8;
    let mut table = vec![0u8; 4 * 256];
    for dir in 0..4 {
        for mask in 1..=255usize {
            table[dir * 256 + mask] = all;
        }
    }
    table
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("wfc");
    group.sample_size(30);

    let (w, h) = (32, 32);
    let num_patterns = 5;
    let table = unconstrained_table(num_patterns);
    let weights = vec![1.0, 2.0, 1.0, 3.0, 1.0];
    let all = (1u8 << num_patterns) - 1;
    let wave = vec![all; (w * h) as usize];

    group.bench_function("open_32x32_five_patterns", |b| {
        b.iter(|| {
            let result = wfc_solve(
                black_box(w),
                black_box(h),
                black_box(num_patterns),
                black_box(&table),
                black_box(&weights),
                black_box(&wave),
                black_box(1234),
            )
            .unwrap();
            black_box(result);
        });
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
