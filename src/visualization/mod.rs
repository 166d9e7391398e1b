//! Visualization module
//!
//! The journey's 3D scene: camera, lights, sun, star backdrop and the single
//! planet matching the controller's active planet.

use bevy::prelude::*;

pub mod backdrop;
pub mod lighting;
pub mod moon;
pub mod planet;
pub mod scene;

use crate::core::PlanetId;
use crate::navigation::{NavigationSystems, TransitionController};
use crate::ui::routes::AppView;
use backdrop::rotate_backdrop;
use moon::orbit_moon;
use planet::{click_planets, ease_planet_hover, spin_bodies, sync_scene_planet, track_planet_hover};
use scene::{spawn_scene, update_camera_controls};

/// A planet in the journey scene was clicked while idle.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanetClicked(pub PlanetId);

/// Plugin for the 3D journey scene
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlanetClicked>()
            .add_systems(OnEnter(AppView::Journey), spawn_scene)
            .add_systems(
                Update,
                (
                    (sync_scene_planet, update_camera_controls, click_planets)
                        .after(NavigationSystems)
                        .run_if(resource_exists::<TransitionController>),
                    (
                        spin_bodies,
                        orbit_moon,
                        rotate_backdrop,
                        (track_planet_hover, ease_planet_hover).chain(),
                    ),
                )
                    .run_if(in_state(AppView::Journey)),
            );
    }
}
