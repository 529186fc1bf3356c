/// Duration of every camera flight, in seconds.
pub const MOVE_DURATION_SECS: f64 = 0.6;

/// A press held longer than this (in seconds) before moving or releasing is a drag.
pub const CLICK_DRAG_TIMEOUT_SECS: f64 = 0.2;

/// Distance from a picture at which the camera parks when focusing on it.
pub const FOCUS_STANDOFF: f32 = 3.5;

/// Floor clicks closer than this to any wall are ignored.
pub const FLOOR_SAFETY_MARGIN: f32 = 0.5;

/// Camera and orbit pivot height at startup.
pub const EYE_HEIGHT: f32 = 1.8;

/// Horizontal distance between the startup camera and the room centre.
pub const INITIAL_ORBIT_DISTANCE: f32 = 5.0;

/// Orbit speed; a drag across the full window height turns by
/// `2π * ORBIT_ROTATE_SPEED`. Negative drags the room rather than the camera.
pub const ORBIT_ROTATE_SPEED: f32 = -0.1;

/// Fraction of the remaining orbit delta applied per frame.
pub const ORBIT_DAMPING: f32 = 0.1;

/// Below this horizontal distance the camera counts as standing on its pivot.
pub const PIVOT_EPSILON: f32 = 1.0e-3;
