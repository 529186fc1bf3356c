use super::picking::{PanelHit, ray_box_distance};
use crate::engine::layout::planner::PlacementRecord;
use crate::engine::layout::wall::Wall;
use bevy::prelude::*;
use constants::render_settings::PANEL_PICK_DEPTH;
use serde::{Deserialize, Serialize};

/// Stable panel identity: the image's position in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PanelId(pub usize);

/// Optional title and caption shown for a focused panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelLabel {
    pub title: Option<String>,
    pub caption: Option<String>,
}

impl PanelLabel {
    /// Title and caption together, or nothing if either is missing.
    pub fn caption_pair(&self) -> Option<(&str, &str)> {
        Some((self.title.as_deref()?, self.caption.as_deref()?))
    }
}

/// A clickable picture hanging in the gallery.
#[derive(Debug, Clone)]
pub struct Panel {
    pub id: PanelId,
    pub entity: Entity,
    pub wall: Wall,
    pub center: Vec3,
    /// Facing direction, into the room.
    pub normal: Vec3,
    pub yaw: f32,
    pub width: f32,
    pub height: f32,
    pub label: PanelLabel,
}

impl Panel {
    pub fn from_placement(
        id: PanelId,
        entity: Entity,
        placement: &PlacementRecord,
        label: PanelLabel,
    ) -> Self {
        Self {
            id,
            entity,
            wall: placement.wall,
            center: placement.position,
            normal: placement.normal(),
            yaw: placement.yaw,
            width: placement.width,
            height: placement.height,
            label,
        }
    }

    /// Distance along `ray` to this panel's pick box.
    pub fn ray_distance(&self, ray: Ray3d) -> Option<f32> {
        let transform = GlobalTransform::from(
            Transform::from_translation(self.center).with_rotation(Quat::from_rotation_y(self.yaw)),
        );
        let size = Vec3::new(self.width, self.height, PANEL_PICK_DEPTH);
        ray_box_distance(ray, &transform, size)
    }
}

/// Every panel the click router may pick, filled once the gallery is built.
#[derive(Resource, Debug, Default, Clone)]
pub struct PanelRegistry {
    panels: Vec<Panel>,
}

impl PanelRegistry {
    pub fn register(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    pub fn clear(&mut self) {
        self.panels.clear();
    }

    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|panel| panel.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Closest panel in front of the ray origin.
    pub fn nearest_hit(&self, ray: Ray3d) -> Option<PanelHit> {
        self.panels
            .iter()
            .filter_map(|panel| {
                panel.ray_distance(ray).map(|distance| PanelHit {
                    panel: panel.id,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
