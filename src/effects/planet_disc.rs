//! Flat planet renderer for the page shells
//!
//! A disc per planet type: base color, a gradient tint, eight randomized
//! surface details that spin with the planet, a static shadow on the left
//! hemisphere, and a flattened ring for ring-bearing planets.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::prelude::*;
use rand::Rng;

use crate::core::PlanetId;

pub const SURFACE_DETAIL_COUNT: usize = 8;

/// Color set of one planet type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscProfile {
    pub main: Color,
    pub gradient: Color,
    pub highlight: Color,
    pub shadow: Color,
}

pub fn disc_profile(planet: PlanetId) -> DiscProfile {
    match planet {
        PlanetId::Earth => DiscProfile {
            main: Color::srgb_u8(0x3b, 0x82, 0xf6),
            gradient: Color::srgba_u8(0x22, 0xc5, 0x5e, 180),
            highlight: Color::srgba_u8(0x4a, 0xde, 0x80, 77),
            shadow: Color::srgba_u8(0x1e, 0x3a, 0x8a, 128),
        },
        PlanetId::Mars => DiscProfile {
            main: Color::srgb_u8(0xef, 0x44, 0x44),
            gradient: Color::srgba_u8(0xc2, 0x41, 0x0c, 180),
            highlight: Color::srgba_u8(0xf9, 0x73, 0x16, 51),
            shadow: Color::srgba_u8(0x7f, 0x1d, 0x1d, 128),
        },
        PlanetId::Jupiter => DiscProfile {
            main: Color::srgb_u8(0xfd, 0xba, 0x74),
            gradient: Color::srgba_u8(0xb4, 0x53, 0x09, 180),
            highlight: Color::srgba_u8(0xfb, 0xbf, 0x24, 77),
            shadow: Color::srgba_u8(0x78, 0x35, 0x0f, 128),
        },
        PlanetId::Saturn => DiscProfile {
            main: Color::srgb_u8(0xfe, 0xf0, 0x8a),
            gradient: Color::srgba_u8(0xd9, 0x77, 0x06, 180),
            highlight: Color::srgba_u8(0xfa, 0xcc, 0x15, 51),
            shadow: Color::srgba_u8(0x92, 0x40, 0x0e, 128),
        },
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinSpeed {
    #[default]
    Slow,
    Medium,
    Fast,
}

impl SpinSpeed {
    /// Radians per second.
    pub fn angular_velocity(self) -> f32 {
        match self {
            SpinSpeed::Slow => TAU / 60.0,
            SpinSpeed::Medium => TAU / 30.0,
            SpinSpeed::Fast => TAU / 15.0,
        }
    }
}

/// One surface blotch, relative to a disc of diameter `size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceDetail {
    /// Full width and height in pixels.
    pub extent: Vec2,
    /// Centre relative to the disc centre, y up.
    pub center: Vec2,
    pub opacity: f32,
    /// Radians.
    pub rotation: f32,
}

pub fn generate_surface_details<R: Rng + ?Sized>(rng: &mut R, size: f32) -> Vec<SurfaceDetail> {
    let radius = size / 2.0;
    (0..SURFACE_DETAIL_COUNT)
        .map(|_| {
            let extent = Vec2::new(
                rng.random::<f32>() * size * 0.5 + 20.0,
                rng.random::<f32>() * size * 0.3 + 20.0,
            );
            // Top-left corner anywhere in the first 80% of the disc box.
            let left = rng.random::<f32>() * 0.8 * size;
            let top = rng.random::<f32>() * 0.8 * size;
            let mut center = Vec2::new(
                left + extent.x / 2.0 - radius,
                radius - top - extent.y / 2.0,
            );
            let limit = radius * 0.8;
            if center.length() > limit {
                center = center.normalize_or_zero() * limit;
            }
            SurfaceDetail {
                extent,
                center,
                opacity: rng.random::<f32>() * 0.8 + 0.2,
                rotation: rng.random::<f32>() * TAU,
            }
        })
        .collect()
}

/// Rotating layer of a disc.
#[derive(Component)]
pub struct DiscSpin(pub f32);

#[derive(Component)]
pub struct PlanetDisc(pub PlanetId);

/// Spawn a planet disc of diameter `size` at `position` (2D world space).
#[allow(clippy::too_many_arguments)]
pub fn spawn_planet_disc<R: Rng + ?Sized>(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    rng: &mut R,
    planet: PlanetId,
    size: f32,
    position: Vec2,
    spin: SpinSpeed,
    scope: impl Bundle,
) -> Entity {
    let profile = disc_profile(planet);
    let radius = size / 2.0;
    let details = generate_surface_details(rng, size);

    let glow = meshes.add(Circle::new(radius + 25.0));
    let base = meshes.add(Circle::new(radius));
    let tint = meshes.add(Circle::new(radius * 0.85));
    let shadow = meshes.add(CircularSector::new(radius, FRAC_PI_2));

    commands
        .spawn((
            Transform::from_xyz(position.x, position.y, 0.0),
            Visibility::default(),
            PlanetDisc(planet),
            Name::new(format!("{} Disc", planet)),
            scope,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh2d(glow),
                MeshMaterial2d(materials.add(Color::srgba(1.0, 1.0, 1.0, 0.06))),
                Transform::from_xyz(0.0, 0.0, -0.1),
            ));
            parent
                .spawn((
                    Mesh2d(base),
                    MeshMaterial2d(materials.add(profile.main)),
                    Transform::default(),
                    DiscSpin(spin.angular_velocity()),
                ))
                .with_children(|surface| {
                    surface.spawn((
                        Mesh2d(tint),
                        MeshMaterial2d(materials.add(profile.gradient)),
                        Transform::from_xyz(radius * 0.15, -radius * 0.15, 0.1),
                    ));
                    for detail in details {
                        let color = profile
                            .highlight
                            .with_alpha(profile.highlight.alpha() * detail.opacity);
                        let half = detail.extent / 2.0;
                        surface.spawn((
                            Mesh2d(meshes.add(Ellipse::new(half.x, half.y))),
                            MeshMaterial2d(materials.add(color)),
                            Transform::from_xyz(detail.center.x, detail.center.y, 0.2)
                                .with_rotation(Quat::from_rotation_z(detail.rotation)),
                        ));
                    }
                });
            // The sector opens toward +Y; a quarter turn puts it on the left.
            parent.spawn((
                Mesh2d(shadow),
                MeshMaterial2d(materials.add(profile.shadow)),
                Transform::from_xyz(0.0, 0.0, 0.3).with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
            ));
            if planet.has_rings() {
                parent.spawn((
                    Mesh2d(meshes.add(Annulus::new(size * 0.62, size * 0.9))),
                    MeshMaterial2d(materials.add(Color::srgba_u8(200, 180, 120, 178))),
                    Transform::from_xyz(0.0, 0.0, 0.4).with_scale(Vec3::new(1.0, 0.12, 1.0)),
                ));
            }
        })
        .id()
}

pub fn spin_planet_discs(time: Res<Time>, mut discs: Query<(&DiscSpin, &mut Transform)>) {
    let dt = time.delta_secs();
    for (spin, mut transform) in &mut discs {
        transform.rotate_z(spin.0 * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PLANET_ORDER;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_surface_detail_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let size = 320.0;
        let details = generate_surface_details(&mut rng, size);
        assert_eq!(details.len(), SURFACE_DETAIL_COUNT);
        for d in &details {
            assert!(d.extent.x >= 20.0 && d.extent.x < size * 0.5 + 20.0);
            assert!(d.extent.y >= 20.0 && d.extent.y < size * 0.3 + 20.0);
            assert!(d.center.length() <= size / 2.0 * 0.8 + 1e-3);
            assert!(d.opacity >= 0.2 && d.opacity <= 1.0);
            assert!(d.rotation >= 0.0 && d.rotation < TAU);
        }
    }

    #[test]
    fn test_profiles_are_deterministic_and_distinct() {
        for a in PLANET_ORDER {
            assert_eq!(disc_profile(a), disc_profile(a));
            for b in PLANET_ORDER {
                if a != b {
                    assert_ne!(disc_profile(a).main, disc_profile(b).main);
                }
            }
        }
    }

    #[test]
    fn test_spin_speeds_are_ordered() {
        assert!(SpinSpeed::Slow.angular_velocity() < SpinSpeed::Medium.angular_velocity());
        assert!(SpinSpeed::Medium.angular_velocity() < SpinSpeed::Fast.angular_velocity());
    }
}
