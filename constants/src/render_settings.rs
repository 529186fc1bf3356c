use bevy::color::Color;

pub const WALL_COLOUR: Color = Color::srgb(0.92, 0.91, 0.88);
pub const FLOOR_COLOUR: Color = Color::srgb(0.35, 0.30, 0.26);
pub const FRAME_COLOUR: Color = Color::srgb(0.2, 0.2, 0.2);
pub const CLEAR_COLOUR: Color = Color::srgb(0.05, 0.05, 0.06);

pub const AMBIENT_BRIGHTNESS: f32 = 600.0;
pub const CEILING_LIGHT_INTENSITY: f32 = 2_000_000.0;

/// Thickness of the invisible pick box around each picture.
pub const PANEL_PICK_DEPTH: f32 = 0.02;
