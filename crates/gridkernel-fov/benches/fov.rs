use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gridkernel_fov::fov;

fn open_field(width: i32, height: i32) -> Vec<u8> {
    vec![1u8; (width * height) as usize]
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fov");
    group.sample_size(50);

    let (w, h) = (128, 128);
    let transparent = open_field(w, h);
    let mut visible = vec![0u8; (w * h) as usize];

    group.bench_function("open_field_radius_40", |b| {
        b.iter(|| {
            fov(
                black_box(&transparent),
                black_box(&mut visible),
                black_box(w),
                black_box(h),
                black_box(w / 2),
                black_box(h / 2),
                black_box(40),
            )
            .unwrap();
            black_box(&visible);
        });
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
