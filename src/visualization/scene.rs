//! Journey scene setup and the pan-orbit camera.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::config::VoyagerSettings;
use crate::core::{PlanetId, VisualRng};
use crate::navigation::TransitionController;
use crate::ui::routes::JourneyScoped;
use crate::visualization::backdrop::spawn_backdrop;
use crate::visualization::lighting::spawn_lighting;
use crate::visualization::planet::planet_spec;

pub const CAMERA_DISTANCE: f32 = 20.0;
pub const MIN_DISTANCE: f32 = 10.0;
pub const MAX_DISTANCE: f32 = 50.0;

/// Marker for the journey's 3D camera.
#[derive(Component)]
pub struct MainCamera;

pub fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<VisualRng>,
    settings: Res<VoyagerSettings>,
) {
    let focus = planet_spec(PlanetId::Earth).position;
    let pan_orbit = PanOrbitCamera {
        focus,
        target_focus: focus,
        radius: Some(CAMERA_DISTANCE),
        yaw: Some(0.0),
        pitch: Some(0.0),
        zoom_lower_limit: MIN_DISTANCE,
        zoom_upper_limit: Some(MAX_DISTANCE),
        // The wheel is reserved for planet traversal.
        zoom_sensitivity: 0.0,
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Camera {
            // Drawn over the flat star field, under nothing.
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(focus + Vec3::Z * CAMERA_DISTANCE)
            .looking_at(focus, Vec3::Y),
        JourneyScoped,
        Name::new("Journey Camera"),
    ));

    spawn_lighting(&mut commands, &mut meshes, &mut materials);
    spawn_backdrop(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut rng,
        &settings,
    );
    info!("Journey scene ready");
}

/// Orbit/pan are locked while travelling; the focus follows the planet shown.
pub fn update_camera_controls(
    controller: Res<TransitionController>,
    mut cameras: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    let transitioning = controller.is_transitioning();
    let focus = planet_spec(controller.active_planet()).position;
    for mut camera in &mut cameras {
        if camera.enabled == transitioning {
            camera.enabled = !transitioning;
        }
        if camera.target_focus != focus {
            camera.target_focus = focus;
        }
    }
}
