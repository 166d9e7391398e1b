//! Earth detail view (`/earth`)

use bevy::picking::Pickable;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::VoyagerSettings;
use crate::core::planet::{EARTH_DETAIL_DESCRIPTION, EARTH_DETAIL_FACTS};
use crate::core::{PlanetId, VisualRng};
use crate::effects::{
    SpinSpeed, generate_stars, primary_viewport, spawn_planet_disc, spawn_star_field,
};
use crate::navigation::PendingDestination;
use crate::ui::control_panel::{HoverColors, PanelNavigation, spawn_control_panel};
use crate::ui::routes::{AppView, EarthDetailScoped};
use crate::ui::theme::{self, label};

const EARTH_DISC_SIZE: f32 = 400.0;

#[derive(Component)]
pub struct ContinueJourneyButton;

pub fn spawn_earth_detail(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut rng: ResMut<VisualRng>,
    settings: Res<VoyagerSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let viewport = primary_viewport(&windows);
    let stars = generate_stars(&mut **rng, settings.detail_stars, viewport);
    spawn_star_field(
        &mut commands,
        &mut meshes,
        &mut materials,
        stars,
        viewport,
        EarthDetailScoped,
    );

    // Right-hand side, lifted clear of the control panel.
    let disc_position = Vec2::new(viewport.x * 0.2, 96.0);
    spawn_planet_disc(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut **rng,
        PlanetId::Earth,
        EARTH_DISC_SIZE,
        disc_position,
        SpinSpeed::Slow,
        EarthDetailScoped,
    );

    spawn_control_panel(&mut commands, EarthDetailScoped);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(5.0),
                top: Val::Px(48.0),
                width: Val::Percent(38.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(16.0),
                padding: UiRect::all(Val::Px(24.0)),
                ..default()
            },
            BackgroundColor(theme::PANEL_BG.with_alpha(0.5)),
            GlobalZIndex(10),
            EarthDetailScoped,
            Name::new("Earth Facts"),
        ))
        .with_children(|panel| {
            panel
                .spawn(Node {
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|header| {
                    header.spawn(label("Earth", 32.0, theme::HUD_BLUE));
                    let idle = Color::NONE;
                    let hover = theme::HUD_BLUE.with_alpha(0.15);
                    header.spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        BackgroundColor(idle),
                        BorderColor::all(theme::HUD_BLUE.with_alpha(0.5)),
                        HoverColors { idle, hover },
                        ContinueJourneyButton,
                        children![label("Continue Journey", 15.0, theme::HUD_BLUE)],
                    ));
                });

            panel.spawn(label(EARTH_DETAIL_DESCRIPTION, 15.0, theme::TEXT_MAIN));

            panel
                .spawn(Node {
                    display: Display::Grid,
                    grid_template_columns: RepeatedGridTrack::flex(2, 1.0),
                    row_gap: Val::Px(12.0),
                    column_gap: Val::Px(12.0),
                    ..default()
                })
                .with_children(|grid| {
                    for (name, value) in EARTH_DETAIL_FACTS {
                        grid.spawn((
                            Node {
                                flex_direction: FlexDirection::Column,
                                row_gap: Val::Px(4.0),
                                padding: UiRect::all(Val::Px(12.0)),
                                ..default()
                            },
                            BackgroundColor(theme::PANEL_BG.with_alpha(0.7)),
                            Pickable::IGNORE,
                        ))
                        .with_children(|cell| {
                            cell.spawn(label(name, 13.0, theme::HUD_BLUE));
                            cell.spawn(label(value, 14.0, Color::WHITE));
                        });
                    }
                });
        });
}

pub fn press_continue(
    buttons: Query<&Interaction, (Changed<Interaction>, With<ContinueJourneyButton>)>,
    mut next: ResMut<NextState<AppView>>,
) {
    if buttons.iter().any(|i| *i == Interaction::Pressed) {
        next.set(AppView::Journey);
    }
}

/// Panel buttons leave for the journey, which then travels to the chosen planet.
pub fn travel_from_detail(
    mut commands: Commands,
    mut panel: MessageReader<PanelNavigation>,
    mut next: ResMut<NextState<AppView>>,
) {
    if let Some(PanelNavigation(planet)) = panel.read().last() {
        commands.insert_resource(PendingDestination(*planet));
        next.set(AppView::Journey);
    }
}
