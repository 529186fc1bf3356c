/// Side length of the square room, which is also the width of every wall.
pub const DEFAULT_WALL_WIDTH: f32 = 20.0;

/// Height of every wall. Images hang centred at half this height.
pub const DEFAULT_WALL_HEIGHT: f32 = 4.0;

/// Longer side of every image in world units after display scaling.
pub const DEFAULT_FIXED_LONG_SIDE: f32 = 3.0;

/// Minimum clearance between the outermost image and the wall edge.
pub const MIN_MARGIN: f32 = 1.0;

/// Minimum gap between neighbouring images on the same wall.
pub const MIN_SPACING: f32 = 0.5;

/// Distance between the picture plane and the wall surface (avoids z-fighting).
pub const PANEL_STANDOFF: f32 = 0.03;

/// Depth of the frame box mounted behind each picture.
pub const FRAME_DEPTH: f32 = 0.05;

/// Fraction of the frame covered by the picture itself.
pub const PANEL_INSET: f32 = 0.95;

/// Thickness of the room's wall slabs.
pub const WALL_THICKNESS: f32 = 0.2;
