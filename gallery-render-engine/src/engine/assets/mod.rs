//! Gallery configuration and loaded picture data.
//!
//! Handles the gallery manifest, per-image display sizing and the asset
//! handles tracked while pictures load.

/// Manifest and image handles requested by the loader.
pub mod gallery_assets;

/// Gallery manifest loaded from JSON, with validation.
pub mod gallery_manifest;

/// A loaded picture scaled to its display size on the wall.
pub mod image_asset;
