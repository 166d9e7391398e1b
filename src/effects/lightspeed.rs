//! Lightspeed overlay
//!
//! While a transition is in flight a batch of horizontal streaks is drawn over
//! the whole window and a short audio cue is played. The overlay reports
//! completion once, after a fixed delay, unless it is deactivated first.

use bevy::asset::LoadState;
use bevy::audio::Volume;
use bevy::picking::Pickable;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::Rng;

use crate::config::VoyagerSettings;
use crate::core::VisualRng;
use crate::effects::starfield::primary_viewport;
use crate::navigation::TransitionController;

/// One streak of the overlay, in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreakDescriptor {
    pub position: Vec2,
    pub length: f32,
    /// Seconds the streak takes to stretch and fade.
    pub duration: f32,
    /// Seconds before the streak starts moving.
    pub delay: f32,
}

pub fn generate_streaks<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    viewport: Vec2,
) -> Vec<StreakDescriptor> {
    (0..count)
        .map(|_| StreakDescriptor {
            position: Vec2::new(
                rng.random::<f32>() * viewport.x,
                rng.random::<f32>() * viewport.y,
            ),
            length: rng.random::<f32>() * 100.0 + 20.0,
            duration: rng.random::<f32>() + 0.5,
            delay: rng.random::<f32>() * 0.3,
        })
        .collect()
}

/// Animation progress in [0, 1], or `None` while still waiting for the delay.
pub fn streak_progress(streak: &StreakDescriptor, elapsed: f32) -> Option<f32> {
    if elapsed < streak.delay {
        return None;
    }
    Some(((elapsed - streak.delay) / streak.duration).clamp(0.0, 1.0))
}

/// Sent once when the overlay's timer runs out while it is still active.
#[derive(Message, Clone, Copy, Debug)]
pub struct LightspeedComplete;

#[derive(Resource, Default)]
pub struct LightspeedOverlay {
    pub active: bool,
    completion: Option<Timer>,
    root: Option<Entity>,
}

impl LightspeedOverlay {
    pub fn is_pending(&self) -> bool {
        self.completion.is_some()
    }
}

#[derive(Resource)]
pub struct LightspeedAssets {
    pub cue: Handle<AudioSource>,
}

#[derive(Component)]
pub struct LightspeedRoot;

#[derive(Component)]
pub struct Streak {
    pub descriptor: StreakDescriptor,
    pub elapsed: f32,
}

/// Marks the playing audio cue so a failed load can be reported.
#[derive(Component)]
pub struct LightspeedCue;

pub fn load_lightspeed_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(LightspeedAssets {
        cue: asset_server.load("audio/lightspeed.ogg"),
    });
}

/// Follow the controller: activate on entering a transition, tear down on leaving it.
pub fn sync_lightspeed(
    mut commands: Commands,
    controller: Option<Res<TransitionController>>,
    mut overlay: ResMut<LightspeedOverlay>,
    mut rng: ResMut<VisualRng>,
    settings: Res<VoyagerSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    assets: Option<Res<LightspeedAssets>>,
) {
    let transitioning = controller.is_some_and(|c| c.is_transitioning());
    if transitioning && !overlay.active {
        let viewport = primary_viewport(&windows);
        let streaks = generate_streaks(&mut **rng, settings.lightspeed_streaks, viewport);
        let root = spawn_streaks(&mut commands, streaks);

        overlay.active = true;
        overlay.root = Some(root);
        overlay.completion = Some(Timer::new(
            settings.lightspeed_duration(),
            TimerMode::Once,
        ));

        if let Some(assets) = assets {
            commands.spawn((
                AudioPlayer::new(assets.cue.clone()),
                PlaybackSettings::DESPAWN.with_volume(Volume::Linear(settings.audio_volume)),
                LightspeedCue,
            ));
        }
        debug!("Lightspeed overlay on");
    } else if !transitioning && overlay.active {
        deactivate(&mut commands, &mut overlay);
        debug!("Lightspeed overlay off");
    }
}

fn deactivate(commands: &mut Commands, overlay: &mut LightspeedOverlay) {
    if let Some(root) = overlay.root.take()
        && let Ok(mut entity) = commands.get_entity(root)
    {
        entity.despawn();
    }
    overlay.completion = None;
    overlay.active = false;
}

/// View exit: drop streaks and any pending completion.
pub fn reset_lightspeed(mut commands: Commands, mut overlay: ResMut<LightspeedOverlay>) {
    deactivate(&mut commands, &mut overlay);
}

fn spawn_streaks(commands: &mut Commands, streaks: Vec<StreakDescriptor>) -> Entity {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            GlobalZIndex(50),
            Pickable::IGNORE,
            LightspeedRoot,
            Name::new("Lightspeed Overlay"),
        ))
        .with_children(|parent| {
            for descriptor in streaks {
                parent.spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(descriptor.position.x),
                        top: Val::Px(descriptor.position.y),
                        width: Val::Px(descriptor.length),
                        height: Val::Px(1.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.85, 0.92, 1.0, 0.0)),
                    Pickable::IGNORE,
                    Streak {
                        descriptor,
                        elapsed: 0.0,
                    },
                ));
            }
        })
        .id()
}

pub fn tick_lightspeed(
    time: Res<Time>,
    mut overlay: ResMut<LightspeedOverlay>,
    mut complete: MessageWriter<LightspeedComplete>,
) {
    let finished = overlay
        .completion
        .as_mut()
        .is_some_and(|timer| timer.tick(time.delta()).is_finished());
    if finished {
        overlay.completion = None;
        complete.write(LightspeedComplete);
    }
}

pub fn animate_streaks(
    time: Res<Time>,
    mut streaks: Query<(&mut Streak, &mut Node, &mut BackgroundColor)>,
) {
    let delta = time.delta_secs();
    for (mut streak, mut node, mut color) in &mut streaks {
        streak.elapsed += delta;
        let d = streak.descriptor;
        let Some(progress) = streak_progress(&d, streak.elapsed) else {
            continue;
        };
        node.width = Val::Px(d.length * (1.0 + 2.0 * progress));
        node.left = Val::Px(d.position.x + d.length * 2.0 * progress);
        let alpha = if progress < 0.2 {
            progress / 0.2
        } else {
            1.0 - (progress - 0.2) / 0.8
        };
        color.0 = Color::srgba(0.85, 0.92, 1.0, alpha);
    }
}

pub fn log_lightspeed_complete(mut complete: MessageReader<LightspeedComplete>) {
    for _ in complete.read() {
        debug!("Lightspeed overlay complete");
    }
}

/// Audio is best-effort: a cue that fails to load is reported and dropped.
pub fn watch_audio_cue(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    cues: Query<(Entity, &AudioPlayer), With<LightspeedCue>>,
) {
    for (entity, player) in &cues {
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(player.0.id()) {
            warn!("Lightspeed audio unavailable: {}", err);
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlanetId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct Completed(usize);

    fn count_completions(
        mut complete: MessageReader<LightspeedComplete>,
        mut completed: ResMut<Completed>,
    ) {
        completed.0 += complete.read().count();
    }

    #[test]
    fn test_streak_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let viewport = Vec2::new(800.0, 600.0);
        let streaks = generate_streaks(&mut rng, 100, viewport);
        assert_eq!(streaks.len(), 100);
        for s in &streaks {
            assert!(s.position.x >= 0.0 && s.position.x <= viewport.x);
            assert!(s.position.y >= 0.0 && s.position.y <= viewport.y);
            assert!(s.length >= 20.0 && s.length < 120.0);
            assert!(s.duration >= 0.5 && s.duration < 1.5);
            assert!(s.delay >= 0.0 && s.delay < 0.3);
        }
    }

    #[test]
    fn test_streak_progress() {
        let s = StreakDescriptor {
            position: Vec2::ZERO,
            length: 50.0,
            duration: 1.0,
            delay: 0.2,
        };
        assert_eq!(streak_progress(&s, 0.1), None);
        assert_eq!(streak_progress(&s, 0.7), Some(0.5));
        assert_eq!(streak_progress(&s, 5.0), Some(1.0));
    }

    fn overlay_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(VoyagerSettings::default())
            .insert_resource(VisualRng(ChaCha8Rng::seed_from_u64(1)))
            .init_resource::<LightspeedOverlay>()
            .init_resource::<Completed>()
            .add_message::<LightspeedComplete>()
            .add_systems(
                Update,
                (sync_lightspeed, tick_lightspeed, count_completions).chain(),
            );
        app
    }

    fn streak_count(app: &mut App) -> usize {
        app.world_mut()
            .query::<&Streak>()
            .iter(app.world())
            .count()
    }

    fn completions(app: &App) -> usize {
        app.world().resource::<Completed>().0
    }

    #[test]
    fn test_activation_spawns_streaks_and_completes_once() {
        let mut app = overlay_app();
        let mut controller = TransitionController::new(Duration::from_millis(1500));
        controller.request(PlanetId::Mars, Duration::ZERO).unwrap();
        app.insert_resource(controller);

        app.update();
        assert!(app.world().resource::<LightspeedOverlay>().active);
        assert_eq!(streak_count(&mut app), 100);

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(1500));
        app.update();
        assert_eq!(completions(&app), 1);
        assert!(!app.world().resource::<LightspeedOverlay>().is_pending());

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(1500));
        app.update();
        assert_eq!(completions(&app), 1);
    }

    #[test]
    fn test_deactivation_clears_streaks_and_timer() {
        let mut app = overlay_app();
        let mut controller = TransitionController::new(Duration::from_millis(1500));
        controller.request(PlanetId::Saturn, Duration::ZERO).unwrap();
        app.insert_resource(controller);
        app.update();
        assert_eq!(streak_count(&mut app), 100);

        app.world_mut().remove_resource::<TransitionController>();
        app.update();
        let overlay = app.world().resource::<LightspeedOverlay>();
        assert!(!overlay.active);
        assert!(!overlay.is_pending());
        assert_eq!(streak_count(&mut app), 0);
    }

    #[test]
    fn test_failed_audio_cue_keeps_overlay_running() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<AudioSource>()
            .insert_resource(VoyagerSettings {
                lightspeed_ms: 60_000,
                ..default()
            })
            .insert_resource(VisualRng(ChaCha8Rng::seed_from_u64(1)))
            .init_resource::<LightspeedOverlay>()
            .init_resource::<Completed>()
            .add_message::<LightspeedComplete>()
            .add_systems(
                Update,
                (
                    sync_lightspeed,
                    tick_lightspeed,
                    watch_audio_cue,
                    count_completions,
                )
                    .chain(),
            );
        // No loader is registered for audio here, so the load always fails.
        let cue = app
            .world()
            .resource::<AssetServer>()
            .load("audio/not-there.ogg");
        app.insert_resource(LightspeedAssets { cue });
        let mut controller = TransitionController::new(Duration::from_millis(60_000));
        controller.request(PlanetId::Jupiter, Duration::ZERO).unwrap();
        app.insert_resource(controller);

        let cue_count = |app: &mut App| {
            app.world_mut()
                .query_filtered::<(), With<LightspeedCue>>()
                .iter(app.world())
                .count()
        };

        app.update();
        assert_eq!(cue_count(&mut app), 1);

        let mut frames = 0;
        while cue_count(&mut app) > 0 {
            assert!(frames < 500, "cue was never dropped");
            std::thread::sleep(Duration::from_millis(5));
            app.update();
            frames += 1;
        }
        // Let the timer see a few more frames after the cue is gone.
        for _ in 0..3 {
            std::thread::sleep(Duration::from_millis(5));
            app.update();
        }

        let overlay = app.world().resource::<LightspeedOverlay>();
        assert!(overlay.active);
        assert!(overlay.is_pending());
        let elapsed = overlay
            .completion
            .as_ref()
            .map(Timer::elapsed)
            .unwrap_or_default();
        assert!(elapsed > Duration::ZERO);
        assert_eq!(completions(&app), 0);
        assert_eq!(streak_count(&mut app), 100);
    }
}
