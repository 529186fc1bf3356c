use super::wall::Wall;
use bevy::prelude::*;
use constants::gallery::{DEFAULT_WALL_HEIGHT, PANEL_STANDOFF};

/// World-space footprint of one image after display scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}

impl DisplaySize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Room geometry and spacing rules the planner packs against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub wall_width: f32,
    pub margin: f32,
    pub spacing: f32,
    /// Height of every picture centre above the floor.
    pub gallery_height: f32,
    /// Offset of the picture plane from the wall surface along its normal.
    pub standoff: f32,
}

impl LayoutParams {
    pub fn new(wall_width: f32, margin: f32, spacing: f32) -> Self {
        Self {
            wall_width,
            margin,
            spacing,
            gallery_height: DEFAULT_WALL_HEIGHT * 0.5,
            standoff: PANEL_STANDOFF,
        }
    }

    pub fn with_gallery_height(mut self, gallery_height: f32) -> Self {
        self.gallery_height = gallery_height;
        self
    }

    /// Usable width of a wall once both margins are taken off.
    pub fn available_width(&self) -> f32 {
        self.wall_width - 2.0 * self.margin
    }
}

/// Final pose of one picture. Computed once by the planner, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    /// Position of the image in the planner's input sequence.
    pub image_index: usize,
    pub wall: Wall,
    pub position: Vec3,
    pub yaw: f32,
    pub width: f32,
    pub height: f32,
}

impl PlacementRecord {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Facing direction of the picture, pointing into the room.
    pub fn normal(&self) -> Vec3 {
        self.wall.normal()
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation())
    }
}

/// Pictures assigned to one wall, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct WallSlot {
    pub wall: Wall,
    pub placements: Vec<PlacementRecord>,
    /// Sum of picture widths plus the gaps between them.
    pub occupied_width: f32,
}

impl WallSlot {
    pub fn image_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.placements.iter().map(|p| p.image_index)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Pack `images` onto the walls in `Wall::PACKING_ORDER`.
///
/// Each wall takes images from the input sequence for as long as the next one
/// still fits inside the margins, then packing continues on the next wall from
/// the same image. Images are never reconsidered for an earlier wall.
///
/// A single image wider than a whole wall hangs alone on the next wall and
/// overflows its margins. Images left over once every wall is closed are not
/// placed; see [`unplaced_images`].
///
/// Returns no slots when the margins leave no usable width.
pub fn plan_layout(images: &[DisplaySize], params: &LayoutParams) -> Vec<WallSlot> {
    let available = params.available_width();
    if available <= 0.0 {
        debug!(
            "Wall width {} leaves no room inside margins of {}, gallery stays empty",
            params.wall_width, params.margin
        );
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut next = 0;

    for wall in Wall::PACKING_ORDER {
        if next >= images.len() {
            break;
        }

        let mut count = count_fitting(&images[next..], available, params.spacing);
        if count == 0 {
            warn!(
                "Image {} is {:.2} wide but a wall only offers {:.2}, hanging it alone on the {} wall",
                next,
                images[next].width,
                available,
                wall.name()
            );
            count = 1;
        }

        slots.push(place_on_wall(wall, next, &images[next..next + count], params));
        next += count;
    }

    slots
}

/// Indices of the images `plan_layout` could not fit on any wall.
pub fn unplaced_images(slots: &[WallSlot], image_count: usize) -> Vec<usize> {
    let placed = slots
        .iter()
        .flat_map(|slot| slot.image_indices())
        .max()
        .map_or(0, |last| last + 1);
    (placed..image_count).collect()
}

fn count_fitting(images: &[DisplaySize], available: f32, spacing: f32) -> usize {
    let mut running = 0.0;
    let mut count = 0;

    for image in images {
        let gap = if count > 0 { spacing } else { 0.0 };
        if running + gap + image.width > available {
            break;
        }
        running += gap + image.width;
        count += 1;
    }

    count
}

// Lays the images out as one block centred on the wall.
fn place_on_wall(
    wall: Wall,
    first_index: usize,
    images: &[DisplaySize],
    params: &LayoutParams,
) -> WallSlot {
    let widths: f32 = images.iter().map(|image| image.width).sum();
    let gaps = images.len().saturating_sub(1) as f32;
    let block_width = widths + params.spacing * gaps;

    let base = wall.surface_origin(params.wall_width)
        + wall.normal() * params.standoff
        + Vec3::Y * params.gallery_height;

    let mut cursor = -block_width * 0.5;
    let placements = images
        .iter()
        .enumerate()
        .map(|(i, image)| {
            let centre = cursor + image.width * 0.5;
            cursor += image.width + params.spacing;

            PlacementRecord {
                image_index: first_index + i,
                wall,
                position: base + wall.lateral() * centre,
                yaw: wall.yaw(),
                width: image.width,
                height: image.height,
            }
        })
        .collect();

    WallSlot {
        wall,
        placements,
        occupied_width: block_width,
    }
}
