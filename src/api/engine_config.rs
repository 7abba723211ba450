use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::{OrbitControls, PerspectiveCamera};
use crate::error::{VizError, VizResult};
use crate::render::{Color, FrameStyle};
use crate::scene::{SceneFixtures, SceneLayout};

/// Camera placement and orbit rig tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub fov_y_degrees: f64,
    pub near: f64,
    pub far: f64,
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub damping_factor: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [5.0, 10.0, 15.0],
            target: [0.0, 0.0, 0.0],
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: 500.0,
        }
    }
}

impl CameraConfig {
    pub(crate) fn build(&self, aspect: f64) -> VizResult<(PerspectiveCamera, OrbitControls)> {
        let position = DVec3::from_array(self.position);
        let target = DVec3::from_array(self.target);
        if !position.is_finite() || !target.is_finite() {
            return Err(VizError::InvalidData(
                "camera position and target must be finite".to_owned(),
            ));
        }
        if position == target {
            return Err(VizError::InvalidData(
                "camera position must differ from its target".to_owned(),
            ));
        }
        let camera = PerspectiveCamera::new(self.fov_y_degrees, aspect, self.near, self.far)?
            .looking_at(position, target);
        let controls = OrbitControls::new(self.damping_factor, self.min_distance, self.max_distance)?;
        Ok((camera, controls))
    }
}

/// Public visualization bootstrap configuration.
///
/// Serializable so dashboards can persist or ship chart setup as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualizationConfig {
    #[serde(default)]
    pub layout: SceneLayout,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub style: FrameStyle,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_highlight_emissive")]
    pub highlight_emissive: Color,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            layout: SceneLayout::default(),
            camera: CameraConfig::default(),
            style: FrameStyle::default(),
            background: default_background(),
            highlight_emissive: default_highlight_emissive(),
        }
    }
}

impl VisualizationConfig {
    #[must_use]
    pub fn with_layout(mut self, layout: SceneLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        self.layout.validate()?;
        self.style.validate()?;
        self.camera.build(1.0)?;
        self.background.validate()?;
        self.highlight_emissive.validate()?;
        if self.highlight_emissive == Color::BLACK {
            return Err(VizError::InvalidData(
                "highlight emissive must not be black".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn fixtures(&self) -> SceneFixtures {
        SceneFixtures {
            background: self.background,
            ..SceneFixtures::default()
        }
    }

    pub fn from_json_str(input: &str) -> VizResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            VizError::InvalidData(format!("failed to parse visualization config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> VizResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            VizError::InvalidData(format!("failed to serialize visualization config: {e}"))
        })
    }
}

fn default_background() -> Color {
    Color::from_hex(0xf0f0f0)
}

fn default_highlight_emissive() -> Color {
    Color::from_hex(0x333333)
}
