//! Distant star shell around the journey scene.

use std::f32::consts::TAU;

use bevy::picking::Pickable;
use bevy::prelude::*;
use rand::Rng;

use crate::config::VoyagerSettings;
use crate::core::VisualRng;
use crate::navigation::TransitionController;
use crate::ui::routes::JourneyScoped;

pub const BACKDROP_RADIUS: f32 = 100.0;
pub const BACKDROP_DEPTH: f32 = 50.0;
/// Idle rotation of the shell about Y (rad/s).
const BASE_ROTATION: f32 = 0.005;
const TRANSITION_SPEEDUP: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropStar {
    pub position: Vec3,
    pub size: f32,
}

/// Uniform directions, distance uniform in `[radius, radius + depth]`.
pub fn generate_backdrop_stars<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    radius: f32,
    depth: f32,
) -> Vec<BackdropStar> {
    (0..count)
        .map(|_| {
            let z = rng.random::<f32>() * 2.0 - 1.0;
            let theta = rng.random::<f32>() * TAU;
            let ring = (1.0 - z * z).max(0.0).sqrt();
            let direction = Vec3::new(ring * theta.cos(), ring * theta.sin(), z);
            let distance = radius + rng.random::<f32>() * depth;
            BackdropStar {
                position: direction * distance,
                size: 0.1 + rng.random::<f32>() * 0.15,
            }
        })
        .collect()
}

pub fn rotation_rate(transitioning: bool) -> f32 {
    if transitioning {
        BASE_ROTATION * TRANSITION_SPEEDUP
    } else {
        BASE_ROTATION
    }
}

#[derive(Component)]
pub struct Backdrop;

pub fn spawn_backdrop(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut VisualRng,
    settings: &VoyagerSettings,
) {
    let stars = generate_backdrop_stars(
        &mut **rng,
        settings.backdrop_stars,
        BACKDROP_RADIUS,
        BACKDROP_DEPTH,
    );
    let mesh = meshes.add(Sphere::new(1.0).mesh().uv(8, 4));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            Backdrop,
            JourneyScoped,
            Name::new("Backdrop"),
        ))
        .with_children(|parent| {
            for star in stars {
                parent.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_translation(star.position).with_scale(Vec3::splat(star.size)),
                    Pickable::IGNORE,
                ));
            }
        });
    debug!("Backdrop spawned with {} stars", settings.backdrop_stars);
}

pub fn rotate_backdrop(
    time: Res<Time>,
    controller: Option<Res<TransitionController>>,
    mut backdrops: Query<&mut Transform, With<Backdrop>>,
) {
    let transitioning = controller.is_some_and(|c| c.is_transitioning());
    let angle = rotation_rate(transitioning) * time.delta_secs();
    for mut transform in &mut backdrops {
        transform.rotate_y(angle);
    }
}
