//! Loading pipeline from manifest to hung gallery.
//!
//! The manifest is loaded and validated first, then every image is requested
//! in manifest order. Loads finish in any order and are collected back into
//! manifest order before the walls are planned and the pictures spawned.

/// Picture spawning and panel registration once all images have settled.
pub mod gallery_creator;

/// Image load state polling and display sizing.
pub mod image_loader;

/// Manifest-order slots for images that load out of order.
pub mod image_resolution;

/// Manifest loading and validation.
pub mod manifest_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
