use crate::engine::assets::gallery_manifest::GalleryManifest;
use crate::engine::layout::wall::Wall;
use bevy::prelude::*;
use constants::gallery::WALL_THICKNESS;
use constants::render_settings::{CEILING_LIGHT_INTENSITY, FLOOR_COLOUR, WALL_COLOUR};

#[derive(Component)]
pub struct RoomShell;

/// Spawn the floor, four walls and a ceiling light for a square room centred on the origin.
pub fn spawn_room(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    manifest: &GalleryManifest,
) {
    let width = manifest.wall_width;
    let height = manifest.wall_height;
    if width <= 0.0 {
        warn!("Wall width {} is not positive, skipping room geometry", width);
        return;
    }

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(width, width))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: FLOOR_COLOUR,
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
        RoomShell,
    ));

    let wall_material = materials.add(StandardMaterial {
        base_color: WALL_COLOUR,
        perceptual_roughness: 1.0,
        ..default()
    });
    // Walls run past the corners so the slabs overlap instead of leaving gaps.
    let wall_mesh = meshes.add(Cuboid::new(
        width + 2.0 * WALL_THICKNESS,
        height,
        WALL_THICKNESS,
    ));

    for wall in Wall::ALL {
        let centre = wall.surface_origin(width) - wall.normal() * (WALL_THICKNESS * 0.5)
            + Vec3::Y * (height * 0.5);
        commands.spawn((
            Mesh3d(wall_mesh.clone()),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(centre).with_rotation(wall.rotation()),
            RoomShell,
            Name::new(format!("{} wall", wall.name())),
        ));
    }

    commands.spawn((
        PointLight {
            intensity: CEILING_LIGHT_INTENSITY,
            range: width * 2.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, height - 0.2, 0.0),
        RoomShell,
    ));
}
