//! Pointer interaction with the gallery.
//!
//! Separates quick clicks from orbit drags, picks what a click landed on and
//! routes the result to the camera. Left-drags are left to the orbit controls;
//! only a press released within the drag timeout counts as a click.
//!
//! ## Click Flow
//!
//! ```text
//! Mouse press/move/release
//!   └─> ClickDetector (click or drag?)
//!       └─> viewport ray from the scene camera
//!           └─> pick_target(): panels first, floor second
//!               └─> ClickRouter::route()
//!                   ├─> focus panel      (forward flight, pose recorded)
//!                   ├─> release panel    (return flight to recorded pose)
//!                   └─> walk to floor    (forward flight, focus cleared)
//! ```
//!
//! The web host can drive the same routing with the `focus_panel` RPC method,
//! which arrives as a `PanelFocusRequest` event.

/// Native caption overlay for the focused panel.
pub mod caption;

/// Click versus drag detection.
pub mod click;

/// Every clickable panel and its pick box.
pub mod panel_registry;

/// Ray tests against panels and the floor, with pick priority.
pub mod picking;

/// Panel focus toggling and floor walking.
pub mod router;

pub mod systems;
