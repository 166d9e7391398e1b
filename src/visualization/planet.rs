//! The one textured planet the journey scene shows at a time.

use std::f32::consts::FRAC_PI_4;

use bevy::prelude::*;

use crate::core::PlanetId;
use crate::navigation::TransitionController;
use crate::ui::routes::JourneyScoped;
use crate::visualization::PlanetClicked;
use crate::visualization::moon::spawn_moon;

/// Frame rate the per-frame spin table was tuned at.
const REFERENCE_FPS: f32 = 60.0;
const HOVER_SCALE: f32 = 1.1;
/// Exponential approach rate of the hover scale (1/s).
const HOVER_EASE_RATE: f32 = 10.0;

const RING_INNER_FACTOR: f32 = 1.4;
const RING_OUTER_FACTOR: f32 = 2.2;
const RING_TILT: f32 = FRAC_PI_4;

/// Placement and look of a planet in the journey scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetSpec {
    pub position: Vec3,
    pub radius: f32,
    /// Spin in rad/frame at 60 fps.
    pub spin_per_frame: f32,
    pub ring: Option<RingSpec>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: Color,
    pub tilt: f32,
}

impl PlanetSpec {
    /// Spin rate in rad/s.
    pub fn spin_rate(&self) -> f32 {
        self.spin_per_frame * REFERENCE_FPS
    }
}

pub fn planet_spec(planet: PlanetId) -> PlanetSpec {
    let (z, radius, spin_per_frame) = match planet {
        PlanetId::Earth => (-15.0, 4.0, 0.002),
        PlanetId::Mars => (-15.0, 3.0, 0.003),
        PlanetId::Jupiter => (-20.0, 6.0, 0.004),
        PlanetId::Saturn => (-20.0, 5.0, 0.003),
    };
    let ring = planet.has_rings().then(|| RingSpec {
        inner_radius: radius * RING_INNER_FACTOR,
        outer_radius: radius * RING_OUTER_FACTOR,
        color: Color::srgba_u8(0xc7, 0xa9, 0x6f, 178),
        tilt: RING_TILT,
    });
    PlanetSpec {
        position: Vec3::new(0.0, 0.0, z),
        radius,
        spin_per_frame,
        ring,
    }
}

/// Root of the planet subtree; its children are the body, ring and moon.
#[derive(Component)]
pub struct ScenePlanet(pub PlanetId);

#[derive(Component, Default)]
pub struct PlanetHover {
    pub hovered: bool,
}

/// Constant rotation about a local axis.
#[derive(Component)]
pub struct Spin {
    pub axis: Dir3,
    pub rate: f32,
}

/// Move `current` toward `target` without overshooting.
pub fn ease_toward(current: f32, target: f32, dt: f32) -> f32 {
    let t = 1.0 - (-HOVER_EASE_RATE * dt).exp();
    current + (target - current) * t.clamp(0.0, 1.0)
}

pub fn spawn_scene_planet(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
    planet: PlanetId,
) -> Entity {
    let spec = planet_spec(planet);
    let body_mesh = meshes.add(Sphere::new(spec.radius).mesh().uv(64, 32));
    let body_material = materials.add(StandardMaterial {
        base_color_texture: Some(asset_server.load(planet.texture_path())),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });

    let root = commands
        .spawn((
            Transform::from_translation(spec.position),
            Visibility::default(),
            ScenePlanet(planet),
            PlanetHover::default(),
            JourneyScoped,
            Name::new(planet.name()),
        ))
        .with_child((
            Mesh3d(body_mesh),
            MeshMaterial3d(body_material),
            Transform::default(),
            Spin {
                axis: Dir3::Y,
                rate: spec.spin_rate(),
            },
        ))
        .id();

    if let Some(ring) = spec.ring {
        let ring_material = materials.add(StandardMaterial {
            base_color: ring.color,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            perceptual_roughness: 1.0,
            ..default()
        });
        commands.spawn((
            Mesh3d(meshes.add(Annulus::new(ring.inner_radius, ring.outer_radius))),
            MeshMaterial3d(ring_material),
            Transform::from_rotation(Quat::from_rotation_x(ring.tilt)),
            Spin {
                axis: Dir3::Z,
                rate: spec.spin_rate() * 0.5,
            },
            ChildOf(root),
        ));
    }

    if planet == PlanetId::Earth {
        spawn_moon(commands, meshes, materials, asset_server, root);
    }

    root
}

/// Keep exactly one planet subtree matching the controller's active planet.
pub fn sync_scene_planet(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    controller: Res<TransitionController>,
    planets: Query<(Entity, &ScenePlanet)>,
) {
    let active = controller.active_planet();
    let mut present = false;
    for (entity, ScenePlanet(planet)) in &planets {
        if *planet == active && !present {
            present = true;
        } else {
            commands.entity(entity).despawn();
        }
    }
    if !present {
        spawn_scene_planet(
            &mut commands,
            &mut meshes,
            &mut materials,
            &asset_server,
            active,
        );
        debug!("Scene now showing {}", active);
    }
}

pub fn spin_bodies(time: Res<Time>, mut bodies: Query<(&Spin, &mut Transform)>) {
    let dt = time.delta_secs();
    for (spin, mut transform) in &mut bodies {
        transform.rotate_local_axis(spin.axis, spin.rate * dt);
    }
}

/// Walk up `ChildOf` links from a picked mesh to its planet root.
pub fn planet_root(
    mut entity: Entity,
    planets: &Query<&ScenePlanet>,
    parents: &Query<&ChildOf>,
) -> Option<(Entity, PlanetId)> {
    loop {
        if let Ok(ScenePlanet(planet)) = planets.get(entity) {
            return Some((entity, *planet));
        }
        entity = parents.get(entity).ok()?.parent();
    }
}

pub fn track_planet_hover(
    mut over: MessageReader<Pointer<Over>>,
    mut out: MessageReader<Pointer<Out>>,
    planets: Query<&ScenePlanet>,
    parents: Query<&ChildOf>,
    mut hovers: Query<&mut PlanetHover>,
) {
    // Out before Over so moving between body and ring stays hovered.
    let left = out.read().map(|ev| (ev.entity, false));
    let entered = over.read().map(|ev| (ev.entity, true));
    for (target, hovered) in left.chain(entered) {
        if let Some((root, _)) = planet_root(target, &planets, &parents)
            && let Ok(mut hover) = hovers.get_mut(root)
        {
            hover.hovered = hovered;
        }
    }
}

pub fn ease_planet_hover(time: Res<Time>, mut planets: Query<(&PlanetHover, &mut Transform)>) {
    let dt = time.delta_secs();
    for (hover, mut transform) in &mut planets {
        let target = if hover.hovered { HOVER_SCALE } else { 1.0 };
        let scale = ease_toward(transform.scale.x, target, dt);
        transform.scale = Vec3::splat(scale);
    }
}

/// Clicks on the planet emit `PlanetClicked` unless a transition is in flight.
pub fn click_planets(
    mut clicks: MessageReader<Pointer<Click>>,
    controller: Res<TransitionController>,
    planets: Query<&ScenePlanet>,
    parents: Query<&ChildOf>,
    mut clicked: MessageWriter<PlanetClicked>,
) {
    if controller.is_transitioning() {
        clicks.clear();
        return;
    }
    for ev in clicks.read() {
        if let Some((_, planet)) = planet_root(ev.entity, &planets, &parents) {
            clicked.write(PlanetClicked(planet));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PLANET_ORDER;
    use crate::visualization::moon::OrbitingMoon;
    use bevy::asset::AssetPlugin;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    #[test]
    fn test_spec_table() {
        let earth = planet_spec(PlanetId::Earth);
        assert_eq!(earth.position, Vec3::new(0.0, 0.0, -15.0));
        assert_eq!(earth.radius, 4.0);
        assert_eq!(planet_spec(PlanetId::Mars).radius, 3.0);
        assert_eq!(planet_spec(PlanetId::Jupiter).position.z, -20.0);

        let saturn = planet_spec(PlanetId::Saturn);
        let ring = saturn.ring.unwrap();
        assert!((ring.inner_radius - 7.0).abs() < 1e-5);
        assert!((ring.outer_radius - 11.0).abs() < 1e-5);
        assert!((ring.tilt - FRAC_PI_4).abs() < 1e-6);

        for planet in PLANET_ORDER {
            assert_eq!(planet_spec(planet).ring.is_some(), planet == PlanetId::Saturn);
        }
    }

    #[test]
    fn test_spin_rate_is_per_second() {
        let jupiter = planet_spec(PlanetId::Jupiter);
        assert!((jupiter.spin_rate() - 0.24).abs() < 1e-6);
    }

    #[test]
    fn test_ease_never_overshoots() {
        let mut scale = 1.0;
        for _ in 0..200 {
            scale = ease_toward(scale, HOVER_SCALE, 0.1);
            assert!(scale <= HOVER_SCALE);
        }
        assert!((scale - HOVER_SCALE).abs() < 1e-4);
        assert_eq!(ease_toward(1.05, 1.0, 0.0), 1.05);
    }

    #[test]
    fn test_planet_root_walks_up_from_child() {
        let mut world = World::new();
        let root = world.spawn(ScenePlanet(PlanetId::Mars)).id();
        let body = world.spawn(ChildOf(root)).id();
        let stray = world.spawn_empty().id();

        let found = world
            .run_system_once(
                move |planets: Query<&ScenePlanet>, parents: Query<&ChildOf>| {
                    (
                        planet_root(body, &planets, &parents),
                        planet_root(stray, &planets, &parents),
                    )
                },
            )
            .unwrap();
        assert_eq!(found.0, Some((root, PlanetId::Mars)));
        assert_eq!(found.1, None);
    }

    fn scene_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_asset::<Image>()
            .insert_resource(TransitionController::new(Duration::from_millis(1500)))
            .add_systems(Update, sync_scene_planet);
        app
    }

    fn shown(app: &mut App) -> Vec<PlanetId> {
        app.world_mut()
            .query::<&ScenePlanet>()
            .iter(app.world())
            .map(|p| p.0)
            .collect()
    }

    #[test]
    fn test_scene_follows_active_planet() {
        let mut app = scene_app();
        app.update();
        assert_eq!(shown(&mut app), vec![PlanetId::Earth]);
        let moons = app
            .world_mut()
            .query::<&OrbitingMoon>()
            .iter(app.world())
            .count();
        assert_eq!(moons, 1);

        app.world_mut()
            .resource_mut::<TransitionController>()
            .request(PlanetId::Saturn, Duration::ZERO)
            .unwrap();
        app.update();
        assert_eq!(shown(&mut app), vec![PlanetId::Earth]);

        app.world_mut()
            .resource_mut::<TransitionController>()
            .update(Duration::from_millis(1500));
        app.update();
        assert_eq!(shown(&mut app), vec![PlanetId::Saturn]);
        let moons = app
            .world_mut()
            .query::<&OrbitingMoon>()
            .iter(app.world())
            .count();
        assert_eq!(moons, 0);
    }
}
