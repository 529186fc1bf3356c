use super::image_resolution::ImageResolution;
use super::progress::LoadingProgress;
use crate::engine::assets::gallery_manifest::GalleryManifest;
use crate::engine::assets::image_asset::ImageAsset;
use crate::engine::layout::planner::{
    DisplaySize, PlacementRecord, WallSlot, plan_layout, unplaced_images,
};
use crate::engine::scene::room::spawn_room;
use crate::interaction::panel_registry::{Panel, PanelId, PanelRegistry};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use constants::gallery::{FRAME_DEPTH, PANEL_INSET};
use constants::render_settings::FRAME_COLOUR;

#[derive(Component)]
pub struct PictureFrame;

/// Marks the textured picture inside a frame.
#[derive(Component)]
pub struct PicturePanel(pub PanelId);

/// A planned placement paired with the manifest entry it shows.
pub struct HangingPicture<'a> {
    pub id: PanelId,
    pub placement: &'a PlacementRecord,
    pub asset: &'a ImageAsset,
}

/// Placements in hanging order, keyed by manifest index.
///
/// The planner numbers images by position among the resolved ones, so failed
/// loads shift its indices; panel ids must not shift with them.
pub fn hang_order<'a>(
    resolution: &'a ImageResolution,
    slots: &'a [WallSlot],
) -> Vec<HangingPicture<'a>> {
    let ordered: Vec<(usize, &ImageAsset)> = resolution.ordered().collect();
    slots
        .iter()
        .flat_map(|slot| &slot.placements)
        .filter_map(|placement| {
            let &(manifest_index, asset) = ordered.get(placement.image_index)?;
            Some(HangingPicture {
                id: PanelId(manifest_index),
                placement,
                asset,
            })
        })
        .collect()
}

/// Manifest indices of resolved images that found no wall.
pub fn unplaced_manifest_indices(resolution: &ImageResolution, slots: &[WallSlot]) -> Vec<usize> {
    let ordered: Vec<usize> = resolution.ordered().map(|(index, _)| index).collect();
    unplaced_images(slots, ordered.len())
        .into_iter()
        .filter_map(|i| ordered.get(i).copied())
        .collect()
}

/// Manifest indices of the pictures on one wall.
pub fn slot_manifest_indices(resolution: &ImageResolution, slot: &WallSlot) -> Vec<usize> {
    let ordered: Vec<usize> = resolution.ordered().map(|(index, _)| index).collect();
    slot.image_indices()
        .filter_map(|i| ordered.get(i).copied())
        .collect()
}

/// Build the room, plan the walls and hang every placed picture once all images have settled.
pub fn create_gallery_when_ready(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    manifest: Option<Res<GalleryManifest>>,
    resolution: Res<ImageResolution>,
    mut registry: ResMut<PanelRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if loading_progress.gallery_created || !loading_progress.images_resolved {
        return;
    }
    let Some(manifest) = manifest else {
        return;
    };

    spawn_room(&mut commands, &mut meshes, &mut materials, &manifest);

    let sizes: Vec<DisplaySize> = resolution.ordered().map(|(_, asset)| asset.display).collect();
    let params = manifest.layout_params();
    let slots = plan_layout(&sizes, &params);

    let unplaced = unplaced_manifest_indices(&resolution, &slots);
    if !unplaced.is_empty() {
        warn!(
            "{} images did not fit on the walls and were left out: {:?}",
            unplaced.len(),
            unplaced
        );
    }

    let frame_material = materials.add(StandardMaterial {
        base_color: FRAME_COLOUR,
        perceptual_roughness: 0.6,
        ..default()
    });

    registry.clear();
    for picture in hang_order(&resolution, &slots) {
        spawn_frame(&mut commands, &mut meshes, &frame_material, picture.placement, params.standoff);
        let entity = spawn_picture(&mut commands, &mut meshes, &mut materials, &picture);
        registry.register(Panel::from_placement(
            picture.id,
            entity,
            picture.placement,
            picture.asset.label(),
        ));
    }

    info!(
        "✓ Gallery created: {} pictures on {} walls",
        registry.len(),
        slots.len()
    );

    let walls: Vec<serde_json::Value> = slots
        .iter()
        .map(|slot| {
            let images = slot_manifest_indices(&resolution, slot);
            serde_json::json!({ "wall": slot.wall, "images": images })
        })
        .collect();
    rpc_interface.send_notification(
        "gallery_ready",
        serde_json::json!({
            "panels": registry.len(),
            "walls": walls,
            "unplaced": unplaced,
            "skipped": resolution.failed_count(),
        }),
    );

    loading_progress.gallery_created = true;
}

// Frame box is centred on the wall surface; the picture plane floats `standoff` in front of it.
fn spawn_frame(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: &Handle<StandardMaterial>,
    placement: &PlacementRecord,
    standoff: f32,
) {
    let surface = placement.position - placement.normal() * standoff;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(placement.width, placement.height, FRAME_DEPTH))),
        MeshMaterial3d(material.clone()),
        Transform::from_translation(surface).with_rotation(placement.rotation()),
        PictureFrame,
    ));
}

fn spawn_picture(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    picture: &HangingPicture,
) -> Entity {
    let placement = picture.placement;
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(picture.asset.texture.clone()),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    let mesh = meshes.add(Rectangle::new(
        placement.width * PANEL_INSET,
        placement.height * PANEL_INSET,
    ));

    commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            placement.transform(),
            PicturePanel(picture.id),
            Name::new(format!("picture {}", picture.asset.source)),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::gallery_manifest::ImageEntry;
    use crate::engine::layout::planner::LayoutParams;

    // 200x100 pixels hang 3.0 wide at the default long side.
    fn resolution_with(loads: &[bool]) -> ImageResolution {
        let mut resolution = ImageResolution::new(loads.len());
        for (index, &ok) in loads.iter().enumerate() {
            if !ok {
                resolution.fail(index);
                continue;
            }
            let name = format!("{index}.png");
            let entry = ImageEntry::Path(name.clone());
            let asset =
                ImageAsset::resolve(&entry, name, UVec2::new(200, 100), 3.0, Handle::default())
                    .unwrap();
            resolution.resolve(index, asset);
        }
        resolution
    }

    fn plan(resolution: &ImageResolution, wall_width: f32) -> Vec<WallSlot> {
        let sizes: Vec<DisplaySize> = resolution.ordered().map(|(_, a)| a.display).collect();
        plan_layout(&sizes, &LayoutParams::new(wall_width, 1.0, 0.5))
    }

    #[test]
    fn failed_load_does_not_shift_panel_ids() {
        let resolution = resolution_with(&[true, false, true, true]);
        let slots = plan(&resolution, 10.0);

        let hung = hang_order(&resolution, &slots);
        let ids: Vec<PanelId> = hung.iter().map(|picture| picture.id).collect();
        assert_eq!(ids, vec![PanelId(0), PanelId(2), PanelId(3)]);

        let sources: Vec<&str> = hung.iter().map(|picture| picture.asset.source.as_str()).collect();
        assert_eq!(sources, vec!["0.png", "2.png", "3.png"]);

        // Front takes two 3.0-wide pictures, the third moves to the right wall.
        assert_eq!(slot_manifest_indices(&resolution, &slots[0]), vec![0, 2]);
        assert_eq!(slot_manifest_indices(&resolution, &slots[1]), vec![3]);
        assert!(unplaced_manifest_indices(&resolution, &slots).is_empty());
    }

    #[test]
    fn unplaced_pictures_are_reported_by_manifest_index() {
        // One picture per wall: three walls for four resolved images.
        let resolution = resolution_with(&[true, false, true, true, true]);
        let slots = plan(&resolution, 5.0);

        let ids: Vec<PanelId> = hang_order(&resolution, &slots)
            .iter()
            .map(|picture| picture.id)
            .collect();
        assert_eq!(ids, vec![PanelId(0), PanelId(2), PanelId(3)]);
        assert_eq!(unplaced_manifest_indices(&resolution, &slots), vec![4]);
    }
}
