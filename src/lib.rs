//! sales-viz3d: headless 3D bar-chart engine for a sales-records dashboard.
//!
//! Records from the sales-data service are turned into a scene of
//! proportional bars, projected through an orbiting perspective camera into
//! backend-agnostic frames, and hit-tested against the pointer once per frame
//! to drive a single hovered bar and its tooltip.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{VisualizationConfig, VisualizationEngine};
pub use core::{ChartMode, SalesRecord, Surface};
pub use error::{VizError, VizResult};
