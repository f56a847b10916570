use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tickchart::api::{BatchEntry, ChartEngine};
use tickchart::core::{LinearScale, Observation, TimeSeriesStore};

fn generated_entries(count: i64) -> Vec<BatchEntry> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            BatchEntry::new(
                i * 1_000,
                100.0 + (t * 0.01).sin() * 5.0 + t * 0.001,
                1_000.0 + (i % 13) as f64 * 25.0,
            )
        })
        .collect()
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new(0.0, 10_000.0, 1_920.0)
        .expect("valid scale")
        .inverted();

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.domain_to_pixel(black_box(4_321.123));
            let _ = scale.pixel_to_domain(px);
        })
    });
}

fn bench_store_out_of_order_merge_10k(c: &mut Criterion) {
    let even: Vec<Observation> = (0..10_000)
        .map(|i| Observation::new(i * 2, 100.0, 1.0).expect("valid observation"))
        .collect();
    let odd: Vec<Observation> = (0..10_000)
        .map(|i| Observation::new(i * 2 + 1, 101.0, 1.0).expect("valid observation"))
        .collect();

    c.bench_function("store_out_of_order_merge_10k", |b| {
        b.iter(|| {
            let mut store = TimeSeriesStore::new();
            store.append_batch(even.clone()).expect("first batch");
            store
                .append_batch(black_box(odd.clone()))
                .expect("merge batch");
        })
    });
}

fn bench_engine_frame_10k(c: &mut Criterion) {
    let mut engine = ChartEngine::new(1_920.0, 1_080.0).expect("engine init");
    engine
        .add_data_batch(generated_entries(10_000))
        .expect("batch ingestion");

    c.bench_function("engine_frame_10k", |b| {
        b.iter(|| {
            let _ = black_box(engine.frame());
        })
    });
}

fn bench_engine_pan_zoom_2k(c: &mut Criterion) {
    let mut engine = ChartEngine::new(1_600.0, 900.0).expect("engine init");
    engine
        .add_data_batch(generated_entries(2_000))
        .expect("batch ingestion");

    c.bench_function("engine_pan_zoom_2k", |b| {
        b.iter(|| {
            engine.pan(black_box(3.0), black_box(-2.0)).expect("pan");
            engine.zoom(black_box(-1.0), black_box(450.0)).expect("zoom");
            let _ = engine.line_points();
            engine.reset_view();
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_store_out_of_order_merge_10k,
    bench_engine_frame_10k,
    bench_engine_pan_zoom_2k
);
criterion_main!(benches);
