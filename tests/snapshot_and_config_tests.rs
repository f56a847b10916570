use approx::assert_relative_eq;
use tickchart::api::{
    BatchEntry, ChartEngine, ChartEngineConfig, ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot,
    EngineState,
};
use tickchart::core::{GridConfig, ViewportTuning, VolumeBarStyle};
use tickchart::ChartError;

#[test]
fn snapshot_json_contract_round_trips() {
    let mut engine = ChartEngine::new(800.0, 600.0).expect("engine init");
    engine
        .add_data_batch_json(
            r#"[
                {"timestamp": 0, "price": 100.0, "volume": 1000.0},
                {"timestamp": 1000, "price": 105.0, "volume": 1500.0},
                {"timestamp": 2000, "price": 98.0, "volume": 1200.0}
            ]"#,
        )
        .expect("json batch");

    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot json");
    assert!(json.contains(&format!("\"schema_version\": {ENGINE_SNAPSHOT_JSON_SCHEMA_V1}")));

    let snapshot = EngineSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(snapshot, engine.snapshot());
    assert_eq!(snapshot.state, EngineState::Ready);
    assert_eq!(snapshot.observation_count, 3);
    assert_eq!(snapshot.visible_observation_count, 3);
    assert_eq!(
        snapshot.data_bounds.expect("bounds").max_price,
        105.0
    );
}

#[test]
fn snapshot_accepts_bare_payload_and_rejects_unknown_version() {
    let engine = ChartEngine::new(800.0, 600.0).expect("engine init");
    let bare = serde_json::to_string(&engine.snapshot()).expect("serialize");
    let snapshot = EngineSnapshot::from_json_compat_str(&bare).expect("bare snapshot");
    assert_eq!(snapshot.state, EngineState::Uninitialized);
    assert!(snapshot.viewport.is_none());

    let future = engine
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot json")
        .replace("\"schema_version\": 1", "\"schema_version\": 2");
    assert!(matches!(
        EngineSnapshot::from_json_compat_str(&future),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn json_batch_with_missing_field_is_rejected_atomically() {
    let mut engine = ChartEngine::new(800.0, 600.0).expect("engine init");
    let err = engine
        .add_data_batch_json(
            r#"[{"timestamp": 0, "price": 1.0, "volume": 1.0}, {"timestamp": 5, "volume": 1.0}]"#,
        )
        .expect_err("missing price must fail");

    assert!(matches!(err, ChartError::MalformedBatchEntry { index: 1, .. }));
    assert!(engine.is_empty());
    assert_eq!(engine.state(), EngineState::Uninitialized);
}

#[test]
fn negative_volume_is_rejected() {
    let mut engine = ChartEngine::new(800.0, 600.0).expect("engine init");
    assert!(engine.add_data(0, 1.0, -1.0).is_err());
    assert!(
        engine
            .add_data_batch(vec![BatchEntry::new(0, 1.0, -5.0)])
            .is_err()
    );
    assert!(engine.is_empty());
}

#[test]
fn empty_batch_leaves_engine_uninitialized() {
    let mut engine = ChartEngine::new(800.0, 600.0).expect("engine init");
    engine.add_data_batch(Vec::new()).expect("empty batch");
    assert_eq!(engine.state(), EngineState::Uninitialized);
}

#[test]
fn custom_config_drives_engine_behaviour() {
    let config = ChartEngineConfig::new(800.0, 600.0)
        .with_viewport_tuning(ViewportTuning {
            price_padding_ratio: 0.0,
            ..ViewportTuning::default()
        })
        .with_volume_bars(VolumeBarStyle {
            band_ratio: 0.5,
            ..VolumeBarStyle::default()
        })
        .with_grid(GridConfig {
            price_major_every: 2,
            ..GridConfig::default()
        });
    let mut engine = ChartEngine::with_config(config).expect("engine init");
    engine
        .add_data_batch(vec![
            BatchEntry::new(0, 10.0, 10.0),
            BatchEntry::new(1_000, 20.0, 5.0),
        ])
        .expect("batch");

    let (price_min, price_max) = engine.viewport().expect("ready").price_range();
    assert_relative_eq!(price_min, 10.0, epsilon = 1e-6);
    assert_relative_eq!(price_max, 20.0, epsilon = 1e-6);
    let tallest = engine
        .volume_bars()
        .into_iter()
        .map(|bar| bar.height)
        .fold(0.0, f64::max);
    assert_eq!(tallest, 300.0);
    assert_eq!(engine.config(), config);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let bad_tuning = ChartEngineConfig::new(800.0, 600.0).with_viewport_tuning(ViewportTuning {
        wheel_zoom_base: 1.0,
        ..ViewportTuning::default()
    });
    assert!(ChartEngine::with_config(bad_tuning).is_err());

    let bad_grid = ChartEngineConfig::new(800.0, 600.0).with_grid(GridConfig {
        min_ticks: 9,
        max_ticks: 3,
        ..GridConfig::default()
    });
    assert!(ChartEngine::with_config(bad_grid).is_err());

    assert!(ChartEngineConfig::from_json_str(r#"{"plot":{"width":-1.0,"height":1.0}}"#).is_err());
}
