use ordered_float::OrderedFloat;

use crate::core::Ray;
use crate::scene::{BarId, Scene};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarHit {
    pub id: BarId,
    pub distance: f64,
}

/// Nearest bar intersected by `ray`.
///
/// Zero-height bars keep their footprint and stay pickable from above. On
/// equal distances the bar built first wins.
#[must_use]
pub fn pick_bar(scene: &Scene, ray: Ray) -> Option<BarHit> {
    scene
        .bars()
        .iter()
        .filter_map(|bar| {
            ray.intersect_aabb(bar.bounds())
                .map(|distance| BarHit {
                    id: bar.id,
                    distance,
                })
        })
        .min_by_key(|hit| OrderedFloat(hit.distance))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::DVec3;

    use super::pick_bar;
    use crate::core::{ChartMode, Ray, SalesRecord};
    use crate::scene::{BarId, Scene, SceneBuilder, SceneFixtures, SceneLayout};

    fn quarterly_scene(records: &[SalesRecord]) -> Scene {
        let mut scene = Scene::new(SceneFixtures::default());
        SceneBuilder::new(SceneLayout::default())
            .expect("builder")
            .build(&mut scene, records, ChartMode::QuarterlyComparison)
            .expect("build");
        scene
    }

    #[test]
    fn nearest_bar_along_depth_wins() {
        let scene = quarterly_scene(&[SalesRecord::new(1, "Widget", [40.0; 4], 0.0)]);
        // Looking down -z through every quarter bar of record 0.
        let ray = Ray::new(DVec3::new(0.0, 1.0, 50.0), DVec3::NEG_Z).expect("ray");
        let hit = pick_bar(&scene, ray).expect("hit");
        assert_eq!(hit.id, BarId(3));
    }

    #[test]
    fn empty_space_is_a_miss() {
        let scene = quarterly_scene(&[SalesRecord::new(1, "Widget", [40.0; 4], 0.0)]);
        let ray = Ray::new(DVec3::new(30.0, 1.0, 50.0), DVec3::NEG_Z).expect("ray");
        assert!(pick_bar(&scene, ray).is_none());
    }

    #[test]
    fn flat_bar_is_hit_from_above_its_footprint() {
        let scene = quarterly_scene(&[SalesRecord::new(1, "Flat", [0.0, 0.0, 0.0, 8.0], 0.0)]);
        let q1 = scene.bar(BarId(0)).expect("q1");
        assert_eq!(q1.height, 0.0);

        let ray = Ray::new(q1.position + DVec3::new(0.1, 5.0, 0.1), DVec3::NEG_Y).expect("ray");
        let hit = pick_bar(&scene, ray).expect("hit");
        assert_eq!(hit.id, BarId(0));
        assert_relative_eq!(hit.distance, 5.0);
    }

    #[test]
    fn all_zero_scene_is_still_pickable() {
        let scene = quarterly_scene(&[SalesRecord::new(1, "Idle", [0.0; 4], 0.0)]);
        let q3 = scene.bar(BarId(2)).expect("q3");
        let ray = Ray::new(q3.position + DVec3::Y, DVec3::NEG_Y).expect("ray");
        assert_eq!(pick_bar(&scene, ray).map(|hit| hit.id), Some(BarId(2)));
    }
}
