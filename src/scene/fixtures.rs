use glam::DVec3;

use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f64,
    /// Light shines from this position towards the origin.
    pub position: DVec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the scene towards the light.
    #[must_use]
    pub fn direction_to_light(&self) -> DVec3 {
        self.position.try_normalize().unwrap_or(DVec3::Y)
    }
}

/// Square ground grid on the `y = 0` plane, centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridHelper {
    pub size: f64,
    pub divisions: u32,
    pub color: Color,
}

impl GridHelper {
    /// Line segments along both axes, `divisions + 1` per axis.
    #[must_use]
    pub fn segments(&self) -> Vec<(DVec3, DVec3)> {
        let half = self.size / 2.0;
        let divisions = self.divisions.max(1);
        let step = self.size / f64::from(divisions);
        let mut segments = Vec::with_capacity(2 * (divisions as usize + 1));
        for index in 0..=divisions {
            let offset = -half + f64::from(index) * step;
            segments.push((DVec3::new(-half, 0.0, offset), DVec3::new(half, 0.0, offset)));
            segments.push((DVec3::new(offset, 0.0, -half), DVec3::new(offset, 0.0, half)));
        }
        segments
    }
}

/// Colored X/Y/Z axis lines from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesHelper {
    pub length: f64,
}

impl AxesHelper {
    #[must_use]
    pub fn segments(&self) -> [(DVec3, DVec3, Color); 3] {
        [
            (DVec3::ZERO, DVec3::X * self.length, Color::rgb(1.0, 0.0, 0.0)),
            (DVec3::ZERO, DVec3::Y * self.length, Color::rgb(0.0, 1.0, 0.0)),
            (DVec3::ZERO, DVec3::Z * self.length, Color::rgb(0.0, 0.0, 1.0)),
        ]
    }
}

/// Session-lifetime scene content that survives rebuilds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneFixtures {
    pub background: Color,
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub grid: GridHelper,
    pub axes: AxesHelper,
}

impl Default for SceneFixtures {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0xf0f0f0),
            ambient: AmbientLight {
                color: Color::WHITE,
                intensity: 0.6,
            },
            directional: DirectionalLight {
                color: Color::WHITE,
                intensity: 0.8,
                position: DVec3::new(20.0, 20.0, 20.0),
            },
            grid: GridHelper {
                size: 20.0,
                divisions: 20,
                color: Color::BLACK.with_alpha(0.2),
            },
            axes: AxesHelper { length: 10.0 },
        }
    }
}
