//! Wall layout planning for the gallery room.
//!
//! Packs display-sized images onto the room's walls in a fixed priority order
//! and computes the world-space pose of every picture.

/// Greedy wall packing and per-picture placement records.
pub mod planner;

/// Room wall identifiers and their fixed geometry.
pub mod wall;
