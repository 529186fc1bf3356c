//! Shared tunables for the gallery engine.
//!
//! Values here are compile-time defaults; the gallery manifest can override
//! the room and layout ones at runtime.

/// Room dimensions and wall packing parameters.
pub mod gallery;

/// Camera flight, click detection and orbit control parameters.
pub mod navigation;

/// Asset locations, relative to the asset root.
pub mod path;

/// Colours, lighting and mesh sizing used when building the scene.
pub mod render_settings;
