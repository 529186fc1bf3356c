//! Camera navigation for the gallery room.
//!
//! `navigation` holds the frame-driven flight state machine, independent of
//! Bevy's ECS. `gallery_camera` adapts it to the scene camera and adds the
//! orbit drag controls.

/// Timed camera flights with immediate or deferred look-at retargeting.
pub mod navigation;

/// Orbit rig resource, orbit drag input and camera transform syncing.
pub mod gallery_camera;
