use std::f64::consts::PI;

use glam::{DMat4, DVec2, DVec3, DVec4};

use crate::core::ray::Ray;
use crate::core::types::Surface;
use crate::error::{VizError, VizResult};

const PHI_EPSILON: f64 = 1e-6;
const SETTLE_EPSILON: f64 = 1e-9;

/// Right-handed, Y-up perspective camera looking at `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: DVec3,
    pub target: DVec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f64, aspect: f64, near: f64, far: f64) -> VizResult<Self> {
        if !fov_y_degrees.is_finite() || fov_y_degrees <= 0.0 || fov_y_degrees >= 180.0 {
            return Err(VizError::InvalidData(
                "camera fov must be finite and in (0, 180)".to_owned(),
            ));
        }
        if !near.is_finite() || !far.is_finite() || near <= 0.0 || far <= near {
            return Err(VizError::InvalidData(
                "camera clip planes must satisfy 0 < near < far".to_owned(),
            ));
        }
        let camera = Self {
            fov_y_degrees,
            aspect: 1.0,
            near,
            far,
            position: DVec3::new(0.0, 0.0, 1.0),
            target: DVec3::ZERO,
        };
        camera.with_aspect(aspect)
    }

    #[must_use]
    pub fn looking_at(mut self, position: DVec3, target: DVec3) -> Self {
        self.position = position;
        self.target = target;
        self
    }

    pub fn with_aspect(mut self, aspect: f64) -> VizResult<Self> {
        self.set_aspect(aspect)?;
        Ok(self)
    }

    pub fn set_aspect(&mut self, aspect: f64) -> VizResult<()> {
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(VizError::InvalidData(
                "camera aspect must be finite and > 0".to_owned(),
            ));
        }
        self.aspect = aspect;
        Ok(())
    }

    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, DVec3::Y)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    #[must_use]
    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Projects a world point to normalized device coordinates.
    ///
    /// Points at or behind the camera plane yield `None`.
    #[must_use]
    pub fn project(&self, world: DVec3) -> Option<DVec3> {
        let clip: DVec4 = self.view_projection() * world.extend(1.0);
        if clip.w <= SETTLE_EPSILON {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// Maps NDC to surface pixels, y growing downwards.
    #[must_use]
    pub fn ndc_to_screen(ndc: DVec3, surface: Surface) -> DVec2 {
        DVec2::new(
            (ndc.x * 0.5 + 0.5) * f64::from(surface.width),
            (-ndc.y * 0.5 + 0.5) * f64::from(surface.height),
        )
    }

    #[must_use]
    pub fn world_to_screen(&self, world: DVec3, surface: Surface) -> Option<DVec2> {
        self.project(world)
            .map(|ndc| Self::ndc_to_screen(ndc, surface))
    }

    /// Ray from the eye through a point given in normalized device coordinates.
    #[must_use]
    pub fn ray_through_ndc(&self, ndc: DVec2) -> Option<Ray> {
        let inverse = self.view_projection().inverse();
        let through = inverse.project_point3(DVec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }

    /// Distance from the eye to `world` along the viewing direction.
    #[must_use]
    pub fn view_depth(&self, world: DVec3) -> f64 {
        -self.view_matrix().transform_point3(world).z
    }
}

/// Orbit/dolly/pan camera rig with damped inertia.
///
/// Input calls only accumulate deltas. `update` applies a `damping_factor`
/// share of the pending rotation and pan each frame and decays the remainder,
/// so motion eases out over following frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    damping_factor: f64,
    min_distance: f64,
    max_distance: f64,
    pending_theta: f64,
    pending_phi: f64,
    pending_scale: f64,
    pending_pan: DVec2,
}

impl OrbitControls {
    pub fn new(damping_factor: f64, min_distance: f64, max_distance: f64) -> VizResult<Self> {
        if !damping_factor.is_finite() || damping_factor <= 0.0 || damping_factor > 1.0 {
            return Err(VizError::InvalidData(
                "orbit damping factor must be in (0, 1]".to_owned(),
            ));
        }
        if !min_distance.is_finite() || min_distance < 0.0 || max_distance < min_distance {
            return Err(VizError::InvalidData(
                "orbit distance limits must satisfy 0 <= min <= max".to_owned(),
            ));
        }
        Ok(Self {
            damping_factor,
            min_distance,
            max_distance,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            pending_pan: DVec2::ZERO,
        })
    }

    #[must_use]
    pub fn damping_factor(&self) -> f64 {
        self.damping_factor
    }

    /// Queues a rotation in radians around the target (azimuth, polar).
    pub fn rotate(&mut self, delta_theta: f64, delta_phi: f64) {
        if delta_theta.is_finite() && delta_phi.is_finite() {
            self.pending_theta += delta_theta;
            self.pending_phi += delta_phi;
        }
    }

    /// Queues a distance multiplier; `> 1` moves away from the target.
    pub fn dolly(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.pending_scale *= factor;
        }
    }

    /// Queues a target shift in camera-plane units, scaled by orbit distance.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        if delta_x.is_finite() && delta_y.is_finite() {
            self.pending_pan += DVec2::new(delta_x, delta_y);
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pending_theta.abs() < SETTLE_EPSILON
            && self.pending_phi.abs() < SETTLE_EPSILON
            && self.pending_pan.length_squared() < SETTLE_EPSILON
            && (self.pending_scale - 1.0).abs() < SETTLE_EPSILON
    }

    /// Advances the rig by one frame. Returns `true` when the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = (camera.position, camera.target);

        let offset = camera.position - camera.target;
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        theta += self.pending_theta * self.damping_factor;
        phi += self.pending_phi * self.damping_factor;
        phi = phi.clamp(PHI_EPSILON, PI - PHI_EPSILON);
        radius = (radius * self.pending_scale).clamp(self.min_distance, self.max_distance);
        self.pending_scale = 1.0;

        if self.pending_pan != DVec2::ZERO {
            let forward = (camera.target - camera.position).normalize_or_zero();
            let right = forward.cross(DVec3::Y).normalize_or_zero();
            let up = right.cross(forward);
            let step = self.pending_pan * self.damping_factor * radius;
            camera.target += right * step.x + up * step.y;
        }

        let sin_phi = phi.sin();
        let offset = DVec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = camera.target + offset;

        let decay = 1.0 - self.damping_factor;
        self.pending_theta *= decay;
        self.pending_phi *= decay;
        self.pending_pan *= decay;
        if self.pending_theta.abs() < SETTLE_EPSILON {
            self.pending_theta = 0.0;
        }
        if self.pending_phi.abs() < SETTLE_EPSILON {
            self.pending_phi = 0.0;
        }
        if self.pending_pan.length_squared() < SETTLE_EPSILON {
            self.pending_pan = DVec2::ZERO;
        }

        (camera.position - before.0).length_squared() > SETTLE_EPSILON
            || (camera.target - before.1).length_squared() > SETTLE_EPSILON
    }
}
