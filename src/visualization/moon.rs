//! Earth's moon, on a circular orbit around its planet root.

use bevy::picking::Pickable;
use bevy::prelude::*;

use crate::core::orbit::CircularOrbit;

pub const MOON_RADIUS: f32 = 1.0;
pub const MOON_ORBIT: CircularOrbit = CircularOrbit::new(8.0, 0.5);
const MOON_TEXTURE: &str = "textures/moon.jpg";

#[derive(Component)]
pub struct OrbitingMoon(pub CircularOrbit);

pub fn spawn_moon(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
    parent: Entity,
) -> Entity {
    let mesh = meshes.add(Sphere::new(MOON_RADIUS).mesh().uv(32, 16));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(asset_server.load(MOON_TEXTURE)),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });

    commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(MOON_ORBIT.position(0.0)),
            OrbitingMoon(MOON_ORBIT),
            // Clicks on the moon must not count as clicks on Earth.
            Pickable::IGNORE,
            ChildOf(parent),
            Name::new("Moon"),
        ))
        .id()
}

pub fn orbit_moon(time: Res<Time>, mut moons: Query<(&OrbitingMoon, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (OrbitingMoon(orbit), mut transform) in &mut moons {
        transform.translation = orbit.position(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_moon_follows_elapsed_time() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_systems(Update, orbit_moon);
        let moon = app
            .world_mut()
            .spawn((Transform::default(), OrbitingMoon(MOON_ORBIT)))
            .id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(2));
        app.update();

        let translation = app.world().get::<Transform>(moon).unwrap().translation;
        let expected = MOON_ORBIT.position(2.0);
        assert!((translation - expected).length() < 1e-4);
        assert!((translation.length() - 8.0).abs() < 1e-4);
    }
}
