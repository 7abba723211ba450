mod data_sync;
mod engine;
mod engine_config;
mod engine_lifecycle;
mod engine_snapshot;
mod json_contract;
mod viewport_session;

pub use engine::VisualizationEngine;
pub use engine_config::{CameraConfig, VisualizationConfig};
pub use engine_snapshot::{BarSnapshot, TooltipSnapshot, ViewportSnapshot};
pub use json_contract::{VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1, ViewportSnapshotJsonContractV1};
pub use viewport_session::{FrameStats, ViewportSession};
