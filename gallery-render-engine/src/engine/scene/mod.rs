//! Static gallery scene: the room shell and its lighting.

/// Floor, walls and lights sized from the manifest.
pub mod room;
