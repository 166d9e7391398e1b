//! Navigation module
//!
//! Owns the journey's planet transition state machine and the systems that
//! feed wheel and button input into it.

use bevy::prelude::*;

pub mod controller;
pub mod systems;

pub use controller::TransitionController;
pub use systems::{JourneyEvent, NavigationRequest, PendingDestination};

use crate::ui::routes::AppView;
use systems::{
    advance_transition, announce_journey_events, drop_controller, handle_navigation_requests,
    read_scroll_wheel, reset_controller,
};

/// Ordering label for everything that reads or mutates the controller.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct NavigationSystems;

/// Plugin for planet navigation
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<NavigationRequest>()
            .add_message::<JourneyEvent>()
            .add_systems(OnEnter(AppView::Journey), reset_controller)
            .add_systems(OnExit(AppView::Journey), drop_controller)
            .add_systems(
                Update,
                (
                    read_scroll_wheel,
                    handle_navigation_requests,
                    advance_transition,
                    announce_journey_events,
                )
                    .chain()
                    .in_set(NavigationSystems)
                    .run_if(resource_exists::<TransitionController>),
            );
    }
}
