//! User interface module
//!
//! Views, the control panel, toasts, and the 2D camera everything flat is
//! drawn with. Each view spawns its entities on enter and tags them with a
//! scope marker that is despawned on exit.

use bevy::prelude::*;

pub mod control_panel;
pub mod earth_detail;
pub mod journey;
pub mod landing;
pub mod routes;
pub mod state;
pub mod theme;
pub mod toast;

pub use routes::AppView;
pub use toast::Toast;

use crate::navigation::{NavigationSystems, TransitionController};
use control_panel::{
    PanelNavigation, highlight_buttons, press_nav_buttons, press_panel_commands, pulse_text,
    tick_mission_clock,
};
use earth_detail::{press_continue, spawn_earth_detail, travel_from_detail};
use journey::{
    forward_panel_navigation, leave_journey, open_planet_detail, refresh_info_card,
    spawn_journey, toggle_star_field,
};
use landing::{advance_launch_sequence, drop_launch_sequence, press_start, spawn_landing};
use routes::{
    EarthDetailScoped, JourneyScoped, LandingScoped, despawn_scoped, escape_to_landing,
    log_view_change,
};
use state::LaunchSequence;
use toast::{expire_toasts, setup_toast_stack, show_toasts};

/// Marker for the 2D camera drawing star fields and planet discs.
#[derive(Component)]
pub struct FlatCamera;

fn setup_flat_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(theme::SPACE_DARKER),
            ..default()
        },
        FlatCamera,
        Name::new("Flat Camera"),
    ));
}

/// Plugin for views and HUD
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<Toast>()
            .add_message::<PanelNavigation>()
            .add_systems(Startup, (setup_flat_camera, setup_toast_stack))
            .add_systems(
                Update,
                (
                    log_view_change.run_if(state_changed::<AppView>),
                    escape_to_landing,
                    (press_nav_buttons, press_panel_commands, highlight_buttons),
                    (tick_mission_clock, pulse_text),
                    (show_toasts, expire_toasts).chain().after(NavigationSystems),
                ),
            );

        app.add_systems(OnEnter(AppView::Landing), spawn_landing)
            .add_systems(
                OnExit(AppView::Landing),
                (despawn_scoped::<LandingScoped>, drop_launch_sequence),
            )
            .add_systems(
                Update,
                (
                    advance_launch_sequence.run_if(resource_exists::<LaunchSequence>),
                    press_start,
                )
                    .run_if(in_state(AppView::Landing)),
            );

        app.add_systems(OnEnter(AppView::Journey), spawn_journey)
            .add_systems(
                OnExit(AppView::Journey),
                (despawn_scoped::<JourneyScoped>, leave_journey),
            )
            .add_systems(
                Update,
                (
                    toggle_star_field,
                    forward_panel_navigation
                        .after(press_nav_buttons)
                        .before(NavigationSystems),
                    open_planet_detail,
                    refresh_info_card
                        .after(NavigationSystems)
                        .run_if(resource_exists::<TransitionController>),
                )
                    .run_if(in_state(AppView::Journey)),
            );

        app.add_systems(OnEnter(AppView::EarthDetail), spawn_earth_detail)
            .add_systems(
                OnExit(AppView::EarthDetail),
                despawn_scoped::<EarthDetailScoped>,
            )
            .add_systems(
                Update,
                (press_continue, travel_from_detail.after(press_nav_buttons))
                    .run_if(in_state(AppView::EarthDetail)),
            );
    }
}
