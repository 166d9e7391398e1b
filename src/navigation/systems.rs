//! Systems feeding input into the transition controller

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

use crate::config::VoyagerSettings;
use crate::core::PlanetId;
use crate::navigation::controller::{RequestRejected, TransitionController};
use crate::ui::Toast;

/// Explicit request to travel to a planet (control panel, planet click).
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationRequest(pub PlanetId);

/// Controller state changes, in the order they happened.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum JourneyEvent {
    Departed { from: PlanetId, to: PlanetId },
    Arrived(PlanetId),
}

/// Destination picked outside the journey view, travelled to right after mount.
#[derive(Resource, Clone, Copy, Debug)]
pub struct PendingDestination(pub PlanetId);

/// Mount: every journey view starts from a fresh `Idle(earth)` controller.
pub fn reset_controller(
    mut commands: Commands,
    settings: Res<VoyagerSettings>,
    time: Res<Time>,
    pending: Option<Res<PendingDestination>>,
    mut events: MessageWriter<JourneyEvent>,
) {
    let mut controller = TransitionController::new(settings.transition_duration());
    if let Some(pending) = pending {
        commands.remove_resource::<PendingDestination>();
        match controller.request(pending.0, time.elapsed()) {
            Ok(started) => {
                events.write(JourneyEvent::Departed {
                    from: started.from,
                    to: started.to,
                });
            }
            Err(rejection) => log_rejection("Pending", rejection),
        }
    }
    commands.insert_resource(controller);
}

/// Unmount: the controller and its pending deadline go away with the view.
pub fn drop_controller(mut commands: Commands) {
    commands.remove_resource::<TransitionController>();
}

fn log_rejection(source: &str, rejection: RequestRejected) {
    debug!("{} request ignored: {:?}", source, rejection);
}

/// Wheel input drives traversal along the planet order.
pub fn read_scroll_wheel(
    mut wheel: MessageReader<MouseWheel>,
    time: Res<Time>,
    mut controller: ResMut<TransitionController>,
    mut events: MessageWriter<JourneyEvent>,
) {
    let delta: f32 = wheel.read().map(|w| w.y).sum();
    if delta == 0.0 {
        return;
    }
    // Bevy reports scrolling up as positive y; the controller wants deltaY.
    match controller.scroll(-delta, time.elapsed()) {
        Ok(started) => {
            events.write(JourneyEvent::Departed {
                from: started.from,
                to: started.to,
            });
        }
        Err(rejection) => log_rejection("Scroll", rejection),
    }
}

pub fn handle_navigation_requests(
    mut requests: MessageReader<NavigationRequest>,
    time: Res<Time>,
    mut controller: ResMut<TransitionController>,
    mut events: MessageWriter<JourneyEvent>,
) {
    for NavigationRequest(target) in requests.read() {
        match controller.request(*target, time.elapsed()) {
            Ok(started) => {
                events.write(JourneyEvent::Departed {
                    from: started.from,
                    to: started.to,
                });
            }
            Err(rejection) => log_rejection("Navigation", rejection),
        }
    }
}

pub fn advance_transition(
    time: Res<Time>,
    mut controller: ResMut<TransitionController>,
    mut events: MessageWriter<JourneyEvent>,
) {
    if let Some(planet) = controller.update(time.elapsed()) {
        events.write(JourneyEvent::Arrived(planet));
    }
}

pub fn announce_journey_events(
    mut events: MessageReader<JourneyEvent>,
    mut toasts: MessageWriter<Toast>,
) {
    for event in events.read() {
        match *event {
            JourneyEvent::Departed { from, to } => {
                info!("Leaving {} for {}", from, to);
                toasts.write(Toast::new(format!("Engaging lightspeed: {} to {}", from, to)));
            }
            JourneyEvent::Arrived(planet) => {
                info!("Arrived at {}", planet);
                toasts.write(Toast::new(format!("Arrived at {}", planet)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::controller::JourneyPhase;
    use bevy::input::mouse::MouseScrollUnit;
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(VoyagerSettings::default())
            .add_message::<MouseWheel>()
            .add_message::<NavigationRequest>()
            .add_message::<JourneyEvent>()
            .add_message::<Toast>()
            .add_systems(Startup, reset_controller)
            .add_systems(
                Update,
                (
                    read_scroll_wheel,
                    handle_navigation_requests,
                    advance_transition,
                )
                    .chain(),
            );
        app.update();
        app
    }

    fn phase(app: &App) -> JourneyPhase {
        app.world().resource::<TransitionController>().phase()
    }

    fn advance(app: &mut App, ms: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(ms));
        app.update();
    }

    fn wheel(y: f32) -> MouseWheel {
        MouseWheel {
            unit: MouseScrollUnit::Line,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        }
    }

    #[test]
    fn test_wheel_down_moves_outward() {
        let mut app = test_app();
        app.world_mut().write_message(wheel(-1.0));
        app.update();
        assert_eq!(
            phase(&app),
            JourneyPhase::Transitioning {
                from: PlanetId::Earth,
                to: PlanetId::Mars
            }
        );

        advance(&mut app, 1500);
        assert_eq!(phase(&app), JourneyPhase::Idle(PlanetId::Mars));
    }

    #[test]
    fn test_wheel_up_at_earth_stays_put() {
        let mut app = test_app();
        app.world_mut().write_message(wheel(1.0));
        app.update();
        let controller = app.world().resource::<TransitionController>();
        assert_eq!(controller.phase(), JourneyPhase::Idle(PlanetId::Earth));
        assert_eq!(controller.deadline(), None);
    }

    #[test]
    fn test_wheel_up_from_mars_returns_to_earth() {
        let mut app = test_app();
        app.world_mut().write_message(wheel(-1.0));
        app.update();
        advance(&mut app, 1500);

        app.world_mut().write_message(wheel(2.5));
        app.update();
        assert_eq!(
            phase(&app),
            JourneyPhase::Transitioning {
                from: PlanetId::Mars,
                to: PlanetId::Earth
            }
        );
    }

    #[test]
    fn test_request_resolves_after_duration() {
        let mut app = test_app();
        app.world_mut().write_message(NavigationRequest(PlanetId::Mars));
        app.update();
        assert_eq!(
            phase(&app),
            JourneyPhase::Transitioning {
                from: PlanetId::Earth,
                to: PlanetId::Mars
            }
        );

        advance(&mut app, 1499);
        assert!(matches!(phase(&app), JourneyPhase::Transitioning { .. }));

        advance(&mut app, 1);
        assert_eq!(phase(&app), JourneyPhase::Idle(PlanetId::Mars));
    }

    #[test]
    fn test_burst_of_requests_changes_planet_once() {
        let mut app = test_app();
        for target in [PlanetId::Saturn, PlanetId::Mars, PlanetId::Jupiter] {
            app.world_mut().write_message(NavigationRequest(target));
        }
        app.update();
        advance(&mut app, 1500);
        assert_eq!(phase(&app), JourneyPhase::Idle(PlanetId::Saturn));

        advance(&mut app, 5000);
        assert_eq!(phase(&app), JourneyPhase::Idle(PlanetId::Saturn));
    }

    #[test]
    fn test_request_for_current_planet_arms_nothing() {
        let mut app = test_app();
        app.world_mut().write_message(NavigationRequest(PlanetId::Earth));
        app.update();
        let controller = app.world().resource::<TransitionController>();
        assert_eq!(controller.phase(), JourneyPhase::Idle(PlanetId::Earth));
        assert_eq!(controller.deadline(), None);
    }

    #[test]
    fn test_pending_destination_departs_on_mount() {
        let mut app = test_app();
        app.world_mut()
            .insert_resource(PendingDestination(PlanetId::Saturn));
        app.world_mut().run_system_cached(reset_controller).unwrap();
        assert!(!app.world().contains_resource::<PendingDestination>());
        assert_eq!(
            phase(&app),
            JourneyPhase::Transitioning {
                from: PlanetId::Earth,
                to: PlanetId::Saturn
            }
        );
    }

    #[test]
    fn test_remount_resets_to_earth() {
        let mut app = test_app();
        app.world_mut().write_message(NavigationRequest(PlanetId::Jupiter));
        app.update();
        assert!(matches!(phase(&app), JourneyPhase::Transitioning { .. }));

        // Leaving mid-flight and coming back must not leave a dangling transition.
        app.world_mut().run_system_cached(drop_controller).unwrap();
        assert!(!app.world().contains_resource::<TransitionController>());
        app.world_mut().run_system_cached(reset_controller).unwrap();
        assert_eq!(phase(&app), JourneyPhase::Idle(PlanetId::Earth));
    }
}
