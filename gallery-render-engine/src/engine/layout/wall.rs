use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// Mounting surfaces of the square gallery room, centred on the origin.
///
/// Seen from the room centre looking towards +Z, the front wall is ahead,
/// the right wall sits at -X and the left wall at +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    Front,
    Right,
    Left,
    Back,
}

impl Wall {
    /// Walls that receive pictures, in packing priority order.
    pub const PACKING_ORDER: [Wall; 3] = [Wall::Front, Wall::Right, Wall::Left];

    /// Every wall of the room, used when building the room geometry.
    pub const ALL: [Wall; 4] = [Wall::Front, Wall::Right, Wall::Left, Wall::Back];

    pub fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Right => "right",
            Self::Left => "left",
            Self::Back => "back",
        }
    }

    /// Yaw applied to anything hung on this wall so its +Z face looks into the room.
    pub fn yaw(self) -> f32 {
        match self {
            Self::Front => PI,
            Self::Right => FRAC_PI_2,
            Self::Left => -FRAC_PI_2,
            Self::Back => 0.0,
        }
    }

    pub fn rotation(self) -> Quat {
        Quat::from_rotation_y(self.yaw())
    }

    /// Unit normal of the wall surface, pointing into the room.
    pub fn normal(self) -> Vec3 {
        match self {
            Self::Front => Vec3::NEG_Z,
            Self::Right => Vec3::X,
            Self::Left => Vec3::NEG_X,
            Self::Back => Vec3::Z,
        }
    }

    /// Direction in which lateral offsets grow: left to right for a viewer
    /// facing the wall. X for the front and back walls, Z for the side walls.
    pub fn lateral(self) -> Vec3 {
        match self {
            Self::Front => Vec3::NEG_X,
            Self::Right => Vec3::NEG_Z,
            Self::Left => Vec3::Z,
            Self::Back => Vec3::X,
        }
    }

    /// Point where the wall surface meets the floor, midway along the wall.
    pub fn surface_origin(self, wall_width: f32) -> Vec3 {
        -self.normal() * (wall_width * 0.5)
    }
}
