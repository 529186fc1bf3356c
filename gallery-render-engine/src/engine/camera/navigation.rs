use bevy::prelude::*;
use constants::navigation::MOVE_DURATION_SECS;

/// Camera position plus the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Camera with an orbit pivot, as driven by [`NavigationController`].
pub trait OrbitRig {
    fn camera_position(&self) -> Vec3;

    fn set_camera_position(&mut self, position: Vec3);

    /// Turn the camera towards `target` without moving it.
    fn look_at(&mut self, target: Vec3);

    fn orbit_target(&self) -> Vec3;

    fn set_orbit_target(&mut self, target: Vec3);

    /// Current camera position paired with the orbit pivot.
    fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.camera_position(),
            look_at: self.orbit_target(),
        }
    }
}

/// How the look-at target of a flight is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trip {
    /// Pivot moves to the new target at once; the camera looks at it while flying.
    Forward,
    /// Camera keeps looking at the old pivot while flying; the new target is
    /// applied on arrival.
    Return,
}

/// One linear camera flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    pub from: Vec3,
    pub to: Vec3,
    pub started_at: f64,
    /// Point the camera faces for the whole flight.
    pub look_at: Vec3,
}

impl Flight {
    fn progress(&self, now: f64, duration: f64) -> f32 {
        if duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / duration).clamp(0.0, 1.0) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transition {
    #[default]
    Idle,
    Forward(Flight),
    Return {
        flight: Flight,
        pending_look_at: Vec3,
    },
}

impl Transition {
    pub fn flight(&self) -> Option<&Flight> {
        match self {
            Self::Idle => None,
            Self::Forward(flight) => Some(flight),
            Self::Return { flight, .. } => Some(flight),
        }
    }
}

/// Flies the camera between poses, one flight at a time.
///
/// A new `move_to` replaces whatever flight is in progress, starting from
/// wherever the camera currently is. `tick` must be called once per frame.
#[derive(Debug, Clone)]
pub struct NavigationController {
    transition: Transition,
    duration: f64,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(MOVE_DURATION_SECS)
    }
}

impl NavigationController {
    pub fn new(duration: f64) -> Self {
        Self {
            transition: Transition::Idle,
            duration,
        }
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.transition, Transition::Idle)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Start a flight from the camera's current position to `position`.
    pub fn move_to(
        &mut self,
        rig: &mut impl OrbitRig,
        look_at: Vec3,
        position: Vec3,
        trip: Trip,
        now: f64,
    ) {
        let from = rig.camera_position();

        self.transition = match trip {
            Trip::Forward => {
                rig.set_orbit_target(look_at);
                Transition::Forward(Flight {
                    from,
                    to: position,
                    started_at: now,
                    look_at,
                })
            }
            Trip::Return => Transition::Return {
                flight: Flight {
                    from,
                    to: position,
                    started_at: now,
                    look_at: rig.orbit_target(),
                },
                pending_look_at: look_at,
            },
        };
    }

    /// Advance the active flight to `now`. Does nothing while idle.
    pub fn tick(&mut self, rig: &mut impl OrbitRig, now: f64) {
        let Some(flight) = self.transition.flight().copied() else {
            return;
        };

        let t = flight.progress(now, self.duration);
        let position = if t >= 1.0 {
            flight.to
        } else {
            flight.from.lerp(flight.to, t)
        };
        rig.set_camera_position(position);
        rig.look_at(flight.look_at);

        if t < 1.0 {
            return;
        }

        if let Transition::Return {
            pending_look_at, ..
        } = self.transition
        {
            rig.set_orbit_target(pending_look_at);
            rig.look_at(pending_look_at);
        }
        self.transition = Transition::Idle;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Rig that records where the camera was last told to look.
    #[derive(Debug, Clone)]
    pub(crate) struct MockRig {
        pub position: Vec3,
        pub target: Vec3,
        pub facing: Vec3,
    }

    impl MockRig {
        pub(crate) fn new(position: Vec3, target: Vec3) -> Self {
            Self {
                position,
                target,
                facing: target,
            }
        }
    }

    impl OrbitRig for MockRig {
        fn camera_position(&self) -> Vec3 {
            self.position
        }
        fn set_camera_position(&mut self, position: Vec3) {
            self.position = position;
        }
        fn look_at(&mut self, target: Vec3) {
            self.facing = target;
        }
        fn orbit_target(&self) -> Vec3 {
            self.target
        }
        fn set_orbit_target(&mut self, target: Vec3) {
            self.target = target;
        }
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn idle_tick_leaves_rig_alone() {
        let mut rig = MockRig::new(Vec3::ONE, Vec3::ZERO);
        let mut nav = NavigationController::default();
        nav.tick(&mut rig, 5.0);

        assert!(nav.is_idle());
        assert_eq!(rig.position, Vec3::ONE);
        assert_eq!(rig.facing, Vec3::ZERO);
    }

    #[test]
    fn forward_trip_retargets_pivot_immediately() {
        let mut rig = MockRig::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        let mut nav = NavigationController::new(1.0);
        let look = Vec3::new(4.0, 1.0, 0.0);
        let dest = Vec3::new(2.0, 0.0, 0.0);

        nav.move_to(&mut rig, look, dest, Trip::Forward, 10.0);
        assert_eq!(rig.target, look);
        assert!(matches!(nav.transition(), Transition::Forward(_)));

        nav.tick(&mut rig, 10.5);
        assert!(approx_vec(rig.position, Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(rig.facing, look);
        assert!(!nav.is_idle());

        nav.tick(&mut rig, 11.0);
        assert_eq!(rig.position, dest);
        assert!(nav.is_idle());
    }

    #[test]
    fn return_trip_defers_look_at_until_arrival() {
        let panel = Vec3::new(0.0, 2.0, 5.0);
        let overview = CameraPose {
            position: Vec3::new(0.0, 1.8, -5.0),
            look_at: Vec3::new(0.0, 1.8, 0.0),
        };
        let mut rig = MockRig::new(Vec3::new(0.0, 1.8, 1.5), panel);
        let mut nav = NavigationController::new(0.6);

        nav.move_to(&mut rig, overview.look_at, overview.position, Trip::Return, 0.0);
        assert_eq!(rig.target, panel);

        nav.tick(&mut rig, 0.3);
        assert_eq!(rig.target, panel);
        assert_eq!(rig.facing, panel);

        nav.tick(&mut rig, 0.9);
        assert!(nav.is_idle());
        assert_eq!(rig.pose(), overview);
        assert_eq!(rig.facing, overview.look_at);
    }

    #[test]
    fn second_request_replaces_the_first() {
        let mut rig = MockRig::new(Vec3::ZERO, Vec3::Z);
        let mut nav = NavigationController::new(1.0);
        let first = (Vec3::new(10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 1.0));
        let second = (Vec3::new(0.0, 0.0, -3.0), Vec3::new(1.0, 0.0, -3.0));

        nav.move_to(&mut rig, first.1, first.0, Trip::Forward, 0.0);
        nav.tick(&mut rig, 0.5);
        let midway = rig.position;

        nav.move_to(&mut rig, second.1, second.0, Trip::Forward, 0.5);
        match nav.transition() {
            Transition::Forward(flight) => assert_eq!(flight.from, midway),
            other => panic!("expected a forward flight, got {other:?}"),
        }

        nav.tick(&mut rig, 2.0);
        assert!(nav.is_idle());
        assert_eq!(rig.position, second.0);
        assert_eq!(rig.target, second.1);
        assert_eq!(rig.facing, second.1);
    }

    #[test]
    fn forward_request_discards_pending_return_target() {
        let mut rig = MockRig::new(Vec3::ZERO, Vec3::Z);
        let mut nav = NavigationController::new(1.0);

        nav.move_to(&mut rig, Vec3::X, Vec3::NEG_Z, Trip::Return, 0.0);
        nav.move_to(&mut rig, Vec3::Y, Vec3::ONE, Trip::Forward, 0.2);
        nav.tick(&mut rig, 5.0);

        assert_eq!(rig.target, Vec3::Y);
        assert_eq!(rig.facing, Vec3::Y);
        assert_eq!(rig.position, Vec3::ONE);
    }

    #[test]
    fn zero_duration_arrives_on_first_tick() {
        let mut rig = MockRig::new(Vec3::ZERO, Vec3::Z);
        let mut nav = NavigationController::new(0.0);

        nav.move_to(&mut rig, Vec3::X, Vec3::ONE, Trip::Forward, 3.0);
        nav.tick(&mut rig, 3.0);

        assert!(nav.is_idle());
        assert_eq!(rig.position, Vec3::ONE);
    }

    #[test]
    fn clock_before_start_holds_at_origin() {
        let mut rig = MockRig::new(Vec3::ZERO, Vec3::Z);
        let mut nav = NavigationController::new(1.0);

        nav.move_to(&mut rig, Vec3::X, Vec3::ONE, Trip::Forward, 3.0);
        nav.tick(&mut rig, 2.0);

        assert_eq!(rig.position, Vec3::ZERO);
        assert!(!nav.is_idle());
    }
}
