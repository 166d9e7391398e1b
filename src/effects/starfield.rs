//! Decorative 2D star field
//!
//! Stars are described in viewport pixels (origin top-left, y down) and mapped
//! to the 2D camera's world space when spawned or moved.

use bevy::picking::Pickable;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use rand::Rng;

const MAX_STAR_SIZE_PX: f32 = 3.0;
const GLOW_THRESHOLD_PX: f32 = 2.0;
const TWINKLE_PERIOD_SECS: f32 = 3.0;
const MAX_TWINKLE_DELAY_SECS: f32 = 5.0;
/// Alpha steps per unit; materials are only rewritten when the step changes.
const ALPHA_STEPS: f32 = 64.0;

/// Viewport assumed when no primary window exists (headless runs).
pub const FALLBACK_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

pub fn primary_viewport(windows: &Query<&Window, With<PrimaryWindow>>) -> Vec2 {
    windows.single().map(|w| w.size()).unwrap_or(FALLBACK_VIEWPORT)
}

/// Visual attributes of one star, regenerated on every mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarDescriptor {
    /// Position in viewport pixels.
    pub position: Vec2,
    /// Diameter in pixels.
    pub size: f32,
    pub opacity: f32,
    pub twinkle_delay: f32,
    pub glow: bool,
}

/// Generate `count` stars uniformly distributed over `viewport`.
pub fn generate_stars<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    viewport: Vec2,
) -> Vec<StarDescriptor> {
    (0..count)
        .map(|_| {
            let position = Vec2::new(
                rng.random::<f32>() * viewport.x,
                rng.random::<f32>() * viewport.y,
            );
            // Smaller stars are more common.
            let size = rng.random::<f32>() * MAX_STAR_SIZE_PX;
            StarDescriptor {
                position,
                size,
                opacity: 0.5 + rng.random::<f32>() * 0.5,
                twinkle_delay: rng.random::<f32>() * MAX_TWINKLE_DELAY_SECS,
                glow: size > GLOW_THRESHOLD_PX,
            }
        })
        .collect()
}

/// Move a star away from the pointer's offset to the viewport centre.
pub fn parallax_position(star: &StarDescriptor, pointer: Vec2, viewport: Vec2) -> Vec2 {
    let speed = star.size * 0.05;
    let offset = pointer - viewport / 2.0;
    let moved = star.position - offset * speed * 0.01;
    moved.clamp(Vec2::ZERO, viewport)
}

/// Star opacity at `elapsed` seconds: dims and recovers once per period after its delay.
pub fn twinkle_alpha(star: &StarDescriptor, elapsed: f32) -> f32 {
    if elapsed < star.twinkle_delay {
        return star.opacity;
    }
    let phase = ((elapsed - star.twinkle_delay) % TWINKLE_PERIOD_SECS) / TWINKLE_PERIOD_SECS;
    let dip = 0.5 - 0.5 * (phase * std::f32::consts::TAU).cos();
    star.opacity * (1.0 - 0.7 * dip)
}

pub fn quantize_alpha(alpha: f32) -> f32 {
    (alpha * ALPHA_STEPS).round() / ALPHA_STEPS
}

/// Viewport pixels to 2D camera world coordinates.
pub fn viewport_to_world(position: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(position.x - viewport.x / 2.0, viewport.y / 2.0 - position.y)
}

#[derive(Component)]
pub struct StarFieldRoot;

#[derive(Component)]
pub struct Star {
    pub descriptor: StarDescriptor,
    pub material: Handle<ColorMaterial>,
    /// Alpha last written to `material`.
    pub alpha: f32,
}

/// Whether the mounted star field follows the pointer.
#[derive(Resource, Debug, Default)]
pub struct StarFieldMode {
    pub interactive: bool,
}

/// Spawn a star field root with one child per descriptor; `scope` tags the root
/// so the owning view can despawn it.
pub fn spawn_star_field(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    stars: Vec<StarDescriptor>,
    viewport: Vec2,
    scope: impl Bundle,
) -> Entity {
    let unit_circle = meshes.add(Circle::new(0.5));
    let glow_material = materials.add(Color::srgba(1.0, 1.0, 1.0, 0.2));

    commands
        .spawn((
            Transform::from_xyz(0.0, 0.0, -10.0),
            Visibility::default(),
            StarFieldRoot,
            Name::new("Star Field"),
            scope,
        ))
        .with_children(|parent| {
            for descriptor in stars {
                let alpha = quantize_alpha(descriptor.opacity);
                let material = materials.add(Color::srgba(1.0, 1.0, 1.0, alpha));
                let world = viewport_to_world(descriptor.position, viewport);
                let mut star = parent.spawn((
                    Mesh2d(unit_circle.clone()),
                    Pickable::IGNORE,
                    MeshMaterial2d(material.clone()),
                    Transform::from_xyz(world.x, world.y, 0.0)
                        .with_scale(Vec3::splat(descriptor.size.max(0.5))),
                    Star {
                        descriptor,
                        material,
                        alpha,
                    },
                ));
                if descriptor.glow {
                    // Soft halo, in the star's local (scaled) space.
                    star.with_child((
                        Mesh2d(unit_circle.clone()),
                        Pickable::IGNORE,
                        MeshMaterial2d(glow_material.clone()),
                        Transform::from_xyz(0.0, 0.0, -0.1).with_scale(Vec3::splat(3.5)),
                    ));
                }
            }
        })
        .id()
}

pub fn twinkle_stars(
    time: Res<Time>,
    mut stars: Query<&mut Star>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let elapsed = time.elapsed_secs();
    for mut star in &mut stars {
        let alpha = quantize_alpha(twinkle_alpha(&star.descriptor, elapsed));
        if alpha == star.alpha {
            continue;
        }
        star.alpha = alpha;
        if let Some(material) = materials.get_mut(&star.material) {
            material.color = Color::srgba(1.0, 1.0, 1.0, alpha);
        }
    }
}

pub fn parallax_stars(
    mut cursor: MessageReader<CursorMoved>,
    mode: Option<Res<StarFieldMode>>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut stars: Query<(&mut Star, &mut Transform)>,
) {
    let interactive = mode.is_some_and(|m| m.interactive);
    if !interactive {
        cursor.clear();
        return;
    }
    let viewport = window.size();
    for moved in cursor.read() {
        for (mut star, mut transform) in &mut stars {
            let position = parallax_position(&star.descriptor, moved.position, viewport);
            star.descriptor.position = position;
            let world = viewport_to_world(position, viewport);
            transform.translation.x = world.x;
            transform.translation.y = world.y;
        }
    }
}
