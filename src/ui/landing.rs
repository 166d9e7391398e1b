//! Landing page (`/`)

use bevy::picking::Pickable;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::VoyagerSettings;
use crate::core::VisualRng;
use crate::effects::{generate_stars, primary_viewport, spawn_star_field};
use crate::ui::control_panel::HoverColors;
use crate::ui::routes::{AppView, LandingScoped};
use crate::ui::state::LaunchSequence;
use crate::ui::theme;

/// Column holding the title and, later, the start button.
#[derive(Component)]
pub struct LandingContent;

#[derive(Component)]
pub struct LoadingIndicator;

#[derive(Component)]
pub struct LoadingBar;

#[derive(Component)]
pub struct StartButton;

pub fn spawn_landing(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut rng: ResMut<VisualRng>,
    settings: Res<VoyagerSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let viewport = primary_viewport(&windows);
    let stars = generate_stars(&mut **rng, settings.landing_stars, viewport);
    spawn_star_field(
        &mut commands,
        &mut meshes,
        &mut materials,
        stars,
        viewport,
        LandingScoped,
    );
    commands.insert_resource(LaunchSequence::new(settings.loading_duration()));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Pickable::IGNORE,
            LandingScoped,
            Name::new("Landing"),
        ))
        .with_children(|page| {
            page.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(24.0),
                    ..default()
                },
                Pickable::IGNORE,
                LandingContent,
            ))
            .with_children(|content| {
                content
                    .spawn((
                        Text::new("STELLAR"),
                        TextFont {
                            font_size: 64.0,
                            ..default()
                        },
                        TextColor(theme::HUD_BLUE),
                        Pickable::IGNORE,
                    ))
                    .with_child((TextSpan::new(" VOYAGER"), TextColor(Color::WHITE)));
                content.spawn((
                    Text::new("Embark on an interplanetary journey through our solar system"),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(theme::HUD_BLUE_SOFT),
                    Pickable::IGNORE,
                ));
                content
                    .spawn((
                        Node {
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Center,
                            row_gap: Val::Px(12.0),
                            margin: UiRect::top(Val::Px(16.0)),
                            ..default()
                        },
                        Pickable::IGNORE,
                        LoadingIndicator,
                    ))
                    .with_children(|loading| {
                        loading
                            .spawn((
                                Node {
                                    width: Val::Px(220.0),
                                    height: Val::Px(4.0),
                                    ..default()
                                },
                                BackgroundColor(theme::GAUGE_TRACK),
                                Pickable::IGNORE,
                            ))
                            .with_child((
                                Node {
                                    width: Val::Percent(0.0),
                                    height: Val::Percent(100.0),
                                    ..default()
                                },
                                BackgroundColor(theme::HUD_BLUE),
                                Pickable::IGNORE,
                                LoadingBar,
                            ));
                        loading.spawn((
                            Text::new("Preparing launch sequence..."),
                            TextFont {
                                font_size: 16.0,
                                ..default()
                            },
                            TextColor(theme::HUD_BLUE_SOFT),
                            Pickable::IGNORE,
                        ));
                    });
            });

            page.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(32.0),
                    ..default()
                },
                Text::new("© 2025 Stellar Voyager Odyssey | Use scroll to travel between planets"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(theme::HUD_BLUE_SOFT.with_alpha(0.7)),
                Pickable::IGNORE,
            ));
        });
}

/// Fill the loading bar, then swap the indicator for the start button.
pub fn advance_launch_sequence(
    mut commands: Commands,
    time: Res<Time>,
    mut sequence: ResMut<LaunchSequence>,
    mut bars: Query<&mut Node, With<LoadingBar>>,
    indicators: Query<Entity, With<LoadingIndicator>>,
    content: Single<Entity, With<LandingContent>>,
) {
    if sequence.is_ready() {
        return;
    }
    let ready = sequence.tick(time.delta());
    for mut bar in &mut bars {
        bar.width = Val::Percent(sequence.progress() * 100.0);
    }
    if !ready {
        return;
    }
    for indicator in &indicators {
        commands.entity(indicator).despawn();
    }
    let (idle, hover) = (
        Color::srgb_u8(0x25, 0x63, 0xeb),
        Color::srgb_u8(0x3b, 0x82, 0xf6),
    );
    commands.spawn((
        Button,
        Node {
            padding: UiRect::axes(Val::Px(40.0), Val::Px(18.0)),
            margin: UiRect::top(Val::Px(16.0)),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        BackgroundColor(idle),
        BorderColor::all(theme::HUD_BLUE_SOFT),
        HoverColors { idle, hover },
        StartButton,
        ChildOf(*content),
        children![(
            Text::new("BEGIN JOURNEY"),
            TextFont {
                font_size: 22.0,
                ..default()
            },
            TextColor(Color::WHITE),
        )],
    ));
    info!("Launch sequence ready");
}

pub fn press_start(
    buttons: Query<&Interaction, (Changed<Interaction>, With<StartButton>)>,
    mut next: ResMut<NextState<AppView>>,
) {
    if buttons.iter().any(|i| *i == Interaction::Pressed) {
        next.set(AppView::Journey);
    }
}

pub fn drop_launch_sequence(mut commands: Commands) {
    commands.remove_resource::<LaunchSequence>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::starfield::Star;
    use bevy::state::app::StatesPlugin;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    fn landing_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<ColorMaterial>>()
            .insert_resource(VoyagerSettings::default())
            .insert_resource(VisualRng(ChaCha8Rng::seed_from_u64(5)))
            .init_state::<AppView>()
            .add_systems(OnEnter(AppView::Landing), spawn_landing)
            .add_systems(
                Update,
                advance_launch_sequence.run_if(resource_exists::<LaunchSequence>),
            );
        app
    }

    fn count<T: Component>(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<(), With<T>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_mount_spawns_stars_and_loading_indicator() {
        let mut app = landing_app();
        app.update();
        assert_eq!(count::<Star>(&mut app), 150);
        assert_eq!(count::<LoadingIndicator>(&mut app), 1);
        assert_eq!(count::<StartButton>(&mut app), 0);
    }

    #[test]
    fn test_loading_swaps_for_start_button() {
        let mut app = landing_app();
        app.update();
        app.insert_resource(LaunchSequence::new(Duration::ZERO));
        app.update();
        assert_eq!(count::<LoadingIndicator>(&mut app), 0);
        assert_eq!(count::<StartButton>(&mut app), 1);
    }
}
