pub mod camera;
pub mod chart_mode;
pub mod ray;
pub mod scale;
pub mod types;

pub use camera::{OrbitControls, PerspectiveCamera};
pub use chart_mode::ChartMode;
pub use ray::{Aabb, Ray};
pub use scale::{AxisTick, BarScale};
pub use types::{RecordId, SalesRecord, Surface};
