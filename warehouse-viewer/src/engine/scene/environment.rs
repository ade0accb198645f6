use crate::engine::scene::primitives::parse_hex_color;
use bevy::prelude::*;
use constants::palette;
use constants::render_settings::{AMBIENT_BRIGHTNESS, FLOOR_SIZE};

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub fn spawn_floor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: parse_hex_color(palette::FLOOR),
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
    ));
}
