use super::navigation::{NavigationController, OrbitRig};
use bevy::input::mouse::MouseMotion;
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::gallery::DEFAULT_WALL_WIDTH;
use constants::navigation::{
    EYE_HEIGHT, FLOOR_SAFETY_MARGIN, INITIAL_ORBIT_DISTANCE, ORBIT_DAMPING, ORBIT_ROTATE_SPEED,
    PIVOT_EPSILON,
};
use std::f32::consts::TAU;

/// Camera held level at a fixed height, turning around an orbit pivot.
///
/// Orientation is kept as heading and pitch so a pivot directly above or
/// below the camera (or on top of it) keeps the last usable heading.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub position: Vec3,
    pub orbit_target: Vec3,
    heading: f32,
    pitch: f32,
}

impl CameraRig {
    pub fn new(position: Vec3, orbit_target: Vec3) -> Self {
        let mut rig = Self {
            position,
            orbit_target,
            heading: 0.0,
            pitch: 0.0,
        };
        rig.look_at(orbit_target);
        rig
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.heading, self.pitch, 0.0)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation())
    }

    /// Swing the camera around the pivot by `angle` radians, keeping its height.
    /// A camera standing on its own pivot turns in place instead.
    pub fn orbit(&mut self, angle: f32) {
        let offset = self.position - self.orbit_target;
        if Vec2::new(offset.x, offset.z).length() < PIVOT_EPSILON {
            self.heading += angle;
            return;
        }

        self.position = self.orbit_target + Quat::from_rotation_y(angle) * offset;
        self.look_at(self.orbit_target);
    }
}

impl OrbitRig for CameraRig {
    fn camera_position(&self) -> Vec3 {
        self.position
    }

    fn set_camera_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        let horizontal = Vec2::new(direction.x, direction.z).length();
        if horizontal < PIVOT_EPSILON {
            self.pitch = 0.0;
            return;
        }

        // Bevy cameras look down -Z.
        self.heading = (-direction.x).atan2(-direction.z);
        self.pitch = direction.y.atan2(horizontal);
    }

    fn orbit_target(&self) -> Vec3 {
        self.orbit_target
    }

    fn set_orbit_target(&mut self, target: Vec3) {
        self.orbit_target = target;
    }
}

/// The gallery camera: orbit rig, active flight and queued orbit drag.
#[derive(Resource)]
pub struct GalleryCamera {
    pub rig: CameraRig,
    pub navigation: NavigationController,
    pending_orbit: f32,
}

impl Default for GalleryCamera {
    fn default() -> Self {
        Self::for_room(DEFAULT_WALL_WIDTH)
    }
}

impl GalleryCamera {
    pub fn new(rig: CameraRig) -> Self {
        Self {
            rig,
            navigation: NavigationController::default(),
            pending_orbit: 0.0,
        }
    }

    /// Start behind the room centre facing the front wall, pulled in for small rooms.
    pub fn for_room(wall_width: f32) -> Self {
        let distance = INITIAL_ORBIT_DISTANCE
            .min(wall_width * 0.5 - FLOOR_SAFETY_MARGIN)
            .max(0.0);
        let pivot = Vec3::new(0.0, EYE_HEIGHT, 0.0);
        Self::new(CameraRig::new(pivot - Vec3::Z * distance, pivot))
    }

    /// Rig and flight controller, borrowed together.
    pub fn split_mut(&mut self) -> (&mut CameraRig, &mut NavigationController) {
        (&mut self.rig, &mut self.navigation)
    }

    /// Advance the active flight to `now`.
    pub fn tick(&mut self, now: f64) {
        let (rig, navigation) = self.split_mut();
        navigation.tick(rig, now);
    }

    /// Add a horizontal drag of `pixels` on a window `window_height` pixels tall.
    pub fn queue_orbit(&mut self, pixels: f32, window_height: f32) {
        if window_height <= 0.0 {
            return;
        }
        self.pending_orbit += TAU * pixels / window_height * ORBIT_ROTATE_SPEED;
    }

    /// Apply one damped step of the queued orbit and return the angle turned.
    pub fn step_orbit(&mut self) -> f32 {
        let step = self.pending_orbit * ORBIT_DAMPING;
        if step.abs() < 1e-6 {
            self.pending_orbit = 0.0;
            return 0.0;
        }

        self.pending_orbit -= step;
        self.rig.orbit(step);
        step
    }

    pub fn cancel_orbit(&mut self) {
        self.pending_orbit = 0.0;
    }
}

/// Advance camera flights. Runs every frame regardless of input.
pub fn camera_navigation_system(time: Res<Time>, mut camera: ResMut<GalleryCamera>) {
    camera.tick(time.elapsed_secs_f64());
}

/// Left-drag orbits horizontally around the pivot, with damping.
/// Suspended while a flight is in progress.
pub fn orbit_drag_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera: ResMut<GalleryCamera>,
) {
    let drag: f32 = mouse_motion.read().map(|motion| motion.delta.x).sum();

    if !camera.navigation.is_idle() {
        camera.cancel_orbit();
        return;
    }

    if mouse_button.pressed(MouseButton::Left) && drag != 0.0 {
        if let Ok(window) = windows.single() {
            camera.queue_orbit(drag, window.height());
        }
    }

    camera.step_orbit();
}

/// Copy the rig pose onto the scene camera.
pub fn sync_camera_transform(
    camera: Res<GalleryCamera>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    if let Ok(mut transform) = camera_query.single_mut() {
        *transform = camera.rig.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn rig_faces_its_look_at_point() {
        let targets = [
            Vec3::new(0.0, 1.8, 10.0),
            Vec3::new(-4.0, 1.8, 0.0),
            Vec3::new(3.0, 3.0, -2.0),
        ];
        for target in targets {
            let mut rig = CameraRig::new(Vec3::new(0.0, 1.8, 0.0), Vec3::ZERO);
            rig.look_at(target);
            let forward = rig.rotation() * Vec3::NEG_Z;
            assert!(approx_vec(forward, (target - rig.position).normalize()));
        }
    }

    #[test]
    fn pivot_overhead_keeps_heading_and_levels_view() {
        let mut rig = CameraRig::new(Vec3::new(0.0, 1.8, -5.0), Vec3::new(0.0, 1.8, 0.0));
        let heading = rig.rotation() * Vec3::NEG_Z;

        rig.look_at(Vec3::new(0.0, 4.0, -5.0));
        assert!(approx_vec(rig.rotation() * Vec3::NEG_Z, heading));
    }

    #[test]
    fn orbit_keeps_distance_and_height() {
        let pivot = Vec3::new(0.0, 1.8, 0.0);
        let mut rig = CameraRig::new(Vec3::new(0.0, 1.8, -5.0), pivot);
        rig.orbit(std::f32::consts::FRAC_PI_2);

        assert!((rig.position.distance(pivot) - 5.0).abs() < 1e-4);
        assert!((rig.position.y - 1.8).abs() < 1e-6);
        let forward = rig.rotation() * Vec3::NEG_Z;
        assert!(approx_vec(forward, (pivot - rig.position).normalize()));
    }

    #[test]
    fn orbit_on_own_pivot_turns_in_place() {
        let spot = Vec3::new(2.0, 1.8, 2.0);
        let mut rig = CameraRig::new(Vec3::new(2.0, 1.8, -3.0), spot);
        rig.position = spot;
        rig.orbit(0.5);

        assert_eq!(rig.position, spot);
        let forward = rig.rotation() * Vec3::NEG_Z;
        let expected = Quat::from_rotation_y(0.5) * Vec3::Z;
        assert!(approx_vec(forward, expected));
    }

    #[test]
    fn queued_orbit_decays() {
        let mut camera = GalleryCamera::default();
        camera.queue_orbit(-100.0, 1000.0);

        let first = camera.step_orbit();
        let second = camera.step_orbit();
        assert!(first > 0.0);
        assert!(second > 0.0 && second < first);

        camera.cancel_orbit();
        assert_eq!(camera.step_orbit(), 0.0);
    }

    #[test]
    fn small_rooms_pull_the_camera_in() {
        let camera = GalleryCamera::for_room(6.0);
        assert!((camera.rig.position - Vec3::new(0.0, EYE_HEIGHT, -2.5)).length() < 1e-5);
    }

    #[test]
    fn default_camera_faces_front_wall() {
        let camera = GalleryCamera::default();
        let forward = camera.rig.rotation() * Vec3::NEG_Z;
        assert!(approx_vec(forward, Vec3::Z));
        assert!(camera.navigation.is_idle());
    }
}
