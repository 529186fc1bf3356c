use super::panel_registry::{PanelId, PanelRegistry};
use bevy::prelude::*;

/// What a click ray landed on, after applying pick priority.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickTarget {
    Panel(PanelId),
    Floor(Vec3),
    Nothing,
}

/// Nearest panel hit along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelHit {
    pub panel: PanelId,
    pub distance: f32,
}

/// Scene queries a click needs. Implemented over the live registry and by test fakes.
pub trait HitTest {
    fn hit_panel(&self, ray: Ray3d) -> Option<PanelHit>;

    fn hit_floor(&self, ray: Ray3d) -> Option<Vec3>;
}

/// Panels win over the floor; the floor is only tested when no panel was hit.
pub fn pick_target(scene: &impl HitTest, ray: Ray3d) -> ClickTarget {
    if let Some(hit) = scene.hit_panel(ray) {
        return ClickTarget::Panel(hit.panel);
    }

    match scene.hit_floor(ray) {
        Some(point) => ClickTarget::Floor(point),
        None => ClickTarget::Nothing,
    }
}

/// Hit-testing against the registered panels and the flat gallery floor.
pub struct GalleryHitTest<'a> {
    pub panels: &'a PanelRegistry,
    pub floor_height: f32,
}

impl<'a> GalleryHitTest<'a> {
    pub fn new(panels: &'a PanelRegistry) -> Self {
        Self {
            panels,
            floor_height: 0.0,
        }
    }
}

impl HitTest for GalleryHitTest<'_> {
    fn hit_panel(&self, ray: Ray3d) -> Option<PanelHit> {
        self.panels.nearest_hit(ray)
    }

    fn hit_floor(&self, ray: Ray3d) -> Option<Vec3> {
        floor_intersection(ray, self.floor_height)
    }
}

/// Distance along `ray` to a box of `size` centred on `transform`, if it is hit.
///
/// The ray is taken into the box's local frame and slab-tested there. A ray
/// starting inside the box reports the exit distance.
pub fn ray_box_distance(ray: Ray3d, transform: &GlobalTransform, size: Vec3) -> Option<f32> {
    let to_local = transform.compute_matrix().inverse();
    let origin = to_local.transform_point3(ray.origin);
    let direction = to_local.transform_vector3(*ray.direction);
    let half = size * 0.5;
    slab_distance(origin, direction, -half, half)
}

fn slab_distance(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut near = f32::NEG_INFINITY;
    let mut far = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d == 0.0 {
            // Parallel to this slab: either always inside it or never.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let (mut t0, mut t1) = ((min[axis] - o) / d, (max[axis] - o) / d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        near = near.max(t0);
        far = far.min(t1);
        if near > far {
            return None;
        }
    }

    if far < 0.0 {
        return None;
    }
    Some(if near >= 0.0 { near } else { far })
}

/// Point where `ray` meets the horizontal plane at `height`, in front of the ray origin.
pub fn floor_intersection(ray: Ray3d, height: f32) -> Option<Vec3> {
    if ray.direction.y.abs() < 0.001 {
        return None;
    }

    let t = (height - ray.origin.y) / ray.direction.y;
    (t > 0.0).then(|| ray.origin + *ray.direction * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, towards: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(towards - origin).unwrap())
    }

    struct FakeScene {
        panel: Option<PanelHit>,
        floor: Option<Vec3>,
    }

    impl HitTest for FakeScene {
        fn hit_panel(&self, _ray: Ray3d) -> Option<PanelHit> {
            self.panel
        }
        fn hit_floor(&self, _ray: Ray3d) -> Option<Vec3> {
            self.floor
        }
    }

    #[test]
    fn panel_takes_priority_over_floor() {
        let scene = FakeScene {
            panel: Some(PanelHit {
                panel: PanelId(3),
                distance: 4.0,
            }),
            floor: Some(Vec3::new(1.0, 0.0, 1.0)),
        };
        let r = ray(Vec3::ZERO, Vec3::Z);
        assert_eq!(pick_target(&scene, r), ClickTarget::Panel(PanelId(3)));
    }

    #[test]
    fn floor_only_when_no_panel() {
        let point = Vec3::new(1.0, 0.0, 1.0);
        let scene = FakeScene {
            panel: None,
            floor: Some(point),
        };
        let r = ray(Vec3::ZERO, Vec3::Z);
        assert_eq!(pick_target(&scene, r), ClickTarget::Floor(point));

        let empty = FakeScene {
            panel: None,
            floor: None,
        };
        assert_eq!(pick_target(&empty, r), ClickTarget::Nothing);
    }

    #[test]
    fn box_hit_reports_entry_distance() {
        let transform = GlobalTransform::from(Transform::from_xyz(0.0, 2.0, 5.0));
        let size = Vec3::new(2.0, 2.0, 0.02);
        let r = ray(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 2.0, 5.0));

        let t = ray_box_distance(r, &transform, size).unwrap();
        assert!((t - 4.99).abs() < 1e-4);
    }

    #[test]
    fn rotated_box_is_tested_in_its_own_frame() {
        // A wide, thin panel turned to face +X: hit along X, missed off to the side in Z.
        let transform = GlobalTransform::from(
            Transform::from_xyz(-5.0, 2.0, 0.0)
                .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
        );
        let size = Vec3::new(3.0, 2.0, 0.02);

        let hit = ray(Vec3::new(0.0, 2.0, 1.0), Vec3::new(-5.0, 2.0, 1.0));
        assert!(ray_box_distance(hit, &transform, size).is_some());

        let miss = ray(Vec3::new(0.0, 2.0, 2.0), Vec3::new(-5.0, 2.0, 2.0));
        assert!(ray_box_distance(miss, &transform, size).is_none());
    }

    #[test]
    fn box_behind_ray_is_missed() {
        let transform = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -5.0));
        let r = ray(Vec3::ZERO, Vec3::Z);
        assert!(ray_box_distance(r, &transform, Vec3::ONE).is_none());
    }

    #[test]
    fn floor_hit_in_front_only() {
        let down = ray(Vec3::new(0.0, 1.8, 0.0), Vec3::new(2.0, 0.0, 2.0));
        let point = floor_intersection(down, 0.0).unwrap();
        assert!((point - Vec3::new(2.0, 0.0, 2.0)).length() < 1e-4);

        let up = ray(Vec3::new(0.0, 1.8, 0.0), Vec3::new(0.0, 3.0, 1.0));
        assert!(floor_intersection(up, 0.0).is_none());

        let level = ray(Vec3::new(0.0, 1.8, 0.0), Vec3::new(0.0, 1.8, 1.0));
        assert!(floor_intersection(level, 0.0).is_none());
    }
}
