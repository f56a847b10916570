mod batch;
mod data_controller;
mod engine;
mod engine_config;
mod interaction_controller;
mod primitive_controller;
mod shared;
mod snapshot;

pub use batch::{BatchEntry, parse_batch_json, validate_batch};
pub use engine::{ChartEngine, EngineState};
pub use engine_config::ChartEngineConfig;
pub use shared::SharedChartEngine;
pub use snapshot::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1};
