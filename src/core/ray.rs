use glam::DVec3;

/// Half-line `origin + t * direction`, `t >= 0`, with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Returns `None` when `direction` cannot be normalized.
    #[must_use]
    pub fn new(origin: DVec3, direction: DVec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    #[must_use]
    pub fn at(self, distance: f64) -> DVec3 {
        self.origin + self.direction * distance
    }

    /// Slab test against an axis-aligned box.
    ///
    /// Returns the distance to the entry point, or to the exit point when the
    /// origin is inside the box. Boxes entirely behind the origin miss.
    #[must_use]
    pub fn intersect_aabb(self, aabb: Aabb) -> Option<f64> {
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];
            let (low, high) = (aabb.min[axis], aabb.max[axis]);

            if direction == 0.0 {
                if origin < low || origin > high {
                    return None;
                }
                continue;
            }

            let inverse = 1.0 / direction;
            let mut near = (low - origin) * inverse;
            let mut far = (high - origin) * inverse;
            if near > far {
                std::mem::swap(&mut near, &mut far);
            }
            t_min = t_min.max(near);
            t_max = t_max.min(far);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }
        Some(if t_min >= 0.0 { t_min } else { t_max })
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    #[must_use]
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[must_use]
    pub fn size(self) -> DVec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn center(self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Corner `index` in `0..8`; bit 0 selects x, bit 1 y, bit 2 z.
    #[must_use]
    pub fn corner(self, index: usize) -> DVec3 {
        DVec3::new(
            if index & 1 == 0 { self.min.x } else { self.max.x },
            if index & 2 == 0 { self.min.y } else { self.max.y },
            if index & 4 == 0 { self.min.z } else { self.max.z },
        )
    }
}
