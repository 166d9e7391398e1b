//! Scene lights and the sun

use bevy::light::GlobalAmbientLight;
use bevy::picking::Pickable;
use bevy::prelude::*;

use crate::ui::routes::JourneyScoped;

pub const SUN_RADIUS: f32 = 8.0;
pub const SUN_POSITION: Vec3 = Vec3::new(0.0, 0.0, -50.0);
pub const SUN_COLOR: Color = Color::srgb(0.992, 0.722, 0.075);
const LIGHT_RANGE: f32 = 100.0;

#[derive(Component)]
pub struct Sun;

pub fn spawn_lighting(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    // Keeps the night side of the planet readable.
    commands.insert_resource(GlobalAmbientLight {
        brightness: 150.0,
        ..default()
    });

    commands.spawn((
        PointLight {
            intensity: 4_000_000.0,
            range: LIGHT_RANGE,
            ..default()
        },
        Transform::default(),
        JourneyScoped,
        Name::new("Key Light"),
    ));

    let sun_material = materials.add(StandardMaterial {
        base_color: SUN_COLOR,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(32, 16))),
        MeshMaterial3d(sun_material),
        Transform::from_translation(SUN_POSITION),
        Pickable::IGNORE,
        Sun,
        JourneyScoped,
        Name::new("Sun"),
        children![PointLight {
            color: SUN_COLOR,
            intensity: 2_400_000.0,
            range: LIGHT_RANGE,
            ..default()
        }],
    ));
}
