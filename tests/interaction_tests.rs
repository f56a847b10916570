use approx::assert_relative_eq;
use tickchart::api::{BatchEntry, ChartEngine};
use tickchart::core::{MAX_ABS_TIMESTAMP_MS, ViewportTuning};
use tickchart::ChartError;

fn scenario_engine() -> ChartEngine {
    let mut engine = ChartEngine::new(800.0, 600.0).expect("engine init");
    engine
        .add_data_batch(vec![
            BatchEntry::new(0, 100.0, 1_000.0),
            BatchEntry::new(1_000, 105.0, 1_500.0),
            BatchEntry::new(2_000, 98.0, 1_200.0),
        ])
        .expect("batch ingestion");
    engine
}

#[test]
fn pan_moves_content_with_pointer() {
    let mut engine = scenario_engine();
    let before = engine.viewport().expect("ready");

    engine.pan(100.0, 60.0).expect("pan");
    let after = engine.viewport().expect("ready");

    // 2000 ms over 800 px is 2.5 ms/px; dragging right reveals earlier time.
    assert_eq!(after.time_range(), (-250, 1_750));
    let price_shift = before.price_span() / 600.0 * 60.0;
    assert_relative_eq!(after.price_range().0, before.price_range().0 + price_shift, epsilon = 1e-9);
    assert_eq!(after.time_span(), before.time_span());
    assert_relative_eq!(after.price_span(), before.price_span(), epsilon = 1e-9);
}

#[test]
fn pan_past_data_leaves_no_visible_points() {
    let mut engine = scenario_engine();
    engine.pan(-10_000.0, 0.0).expect("pan");

    assert!(engine.line_points().is_empty());
    assert!(engine.volume_bars().is_empty());
    assert!(!engine.time_grid().is_empty());
}

#[test]
fn negative_wheel_delta_zooms_in_and_positive_zooms_out() {
    let mut engine = scenario_engine();
    let initial = engine.viewport().expect("ready");

    engine.zoom(-120.0, 300.0).expect("zoom in");
    let zoomed_in = engine.viewport().expect("ready");
    assert!(zoomed_in.price_span() < initial.price_span());
    assert!(zoomed_in.time_span() < initial.time_span());

    engine.zoom(240.0, 300.0).expect("zoom out");
    let zoomed_out = engine.viewport().expect("ready");
    assert!(zoomed_out.price_span() > initial.price_span());
}

#[test]
fn zero_wheel_delta_is_noop() {
    let mut engine = scenario_engine();
    let before = engine.viewport();
    engine.zoom(0.0, 123.0).expect("zoom");
    assert_eq!(engine.viewport(), before);
}

#[test]
fn zoom_is_clamped_to_minimum_spans() {
    let mut engine = scenario_engine();
    let tuning = ViewportTuning::default();

    for _ in 0..200 {
        engine.zoom(-5_000.0, 300.0).expect("zoom in");
    }
    let viewport = engine.viewport().expect("ready");
    assert!(viewport.time_span() >= tuning.min_time_span_ms);
    assert!(viewport.price_span() >= tuning.min_price_span * 0.99);
    assert!(!engine.price_grid().is_empty());
}

#[test]
fn interactions_reject_non_finite_input() {
    let mut engine = scenario_engine();
    let before = engine.viewport();

    assert!(matches!(
        engine.pan(f64::NAN, 0.0),
        Err(ChartError::InvalidInput(_))
    ));
    assert!(matches!(
        engine.zoom(f64::INFINITY, 10.0),
        Err(ChartError::InvalidInput(_))
    ));
    assert!(matches!(
        engine.zoom(-10.0, f64::NAN),
        Err(ChartError::InvalidInput(_))
    ));
    assert_eq!(engine.viewport(), before);
}

#[test]
fn reset_view_restores_fit_after_pan_and_zoom() {
    let mut engine = scenario_engine();
    let fitted = engine.viewport();

    engine.pan(250.0, -40.0).expect("pan");
    engine.zoom(-300.0, 100.0).expect("zoom");
    assert_ne!(engine.viewport(), fitted);

    engine.reset_view();
    assert_eq!(engine.viewport(), fitted);
}

#[test]
fn resize_keeps_visible_ranges() {
    let mut engine = scenario_engine();
    let before = engine.viewport().expect("ready");

    engine.resize(400.0, 300.0).expect("resize");
    let after = engine.viewport().expect("ready");
    assert_eq!(after.time_range(), before.time_range());
    assert_eq!(after.price_range(), before.price_range());

    let points = engine.line_points();
    assert_relative_eq!(points[2].x, 400.0);
    assert!(engine.resize(0.0, 300.0).is_err());
}

#[test]
fn extreme_i64_timestamps_are_rejected_before_panning() {
    let mut engine = ChartEngine::new(800.0, 600.0).expect("engine init");
    let result = engine.add_data_batch(vec![
        BatchEntry::new(i64::MIN + 10, 100.0, 1.0),
        BatchEntry::new(i64::MAX - 10, 101.0, 1.0),
    ]);

    assert!(matches!(
        result,
        Err(ChartError::MalformedBatchEntry { index: 0, .. })
    ));
    assert!(engine.is_empty());
    engine.pan(1e12, 0.0).expect("pan on empty engine is a no-op");
    assert!(engine.viewport().is_none());
    assert!(engine.add_data(i64::MAX, 1.0, 1.0).is_err());
}

#[test]
fn pan_and_zoom_near_timestamp_limit_stay_in_range() {
    let mut engine = ChartEngine::new(800.0, 600.0).expect("engine init");
    engine
        .add_data_batch(vec![
            BatchEntry::new(MAX_ABS_TIMESTAMP_MS - 5_000, 100.0, 1.0),
            BatchEntry::new(MAX_ABS_TIMESTAMP_MS - 1_000, 101.0, 1.0),
        ])
        .expect("batch at the limit");

    engine.zoom(500.0, 300.0).expect("zoom out");
    let (start, end) = engine.viewport().expect("ready").time_range();
    assert!(end > start);
    assert!(end <= MAX_ABS_TIMESTAMP_MS);

    let span = end - start;
    engine.pan(-1e12, 0.0).expect("pan towards the limit");
    let (start, end) = engine.viewport().expect("ready").time_range();
    assert_eq!(end, MAX_ABS_TIMESTAMP_MS);
    assert_eq!(end - start, span);

    engine.pan(1e12, 0.0).expect("pan away from the limit");
    let (start, end) = engine.viewport().expect("ready").time_range();
    assert!(start >= -MAX_ABS_TIMESTAMP_MS);
    assert_eq!(end - start, span);

    for _ in 0..50 {
        engine.zoom(10_000.0, 300.0).expect("zoom out");
    }
    let (start, end) = engine.viewport().expect("ready").time_range();
    assert!(start >= -MAX_ABS_TIMESTAMP_MS && end <= MAX_ABS_TIMESTAMP_MS);
    assert!(end > start);
}
