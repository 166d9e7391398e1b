//! Journey view (`/journey`)
//!
//! Hosts the 3D scene, the interactive star field, the control panel and an
//! info card describing the planet currently shown.

use bevy::picking::Pickable;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::VoyagerSettings;
use crate::core::{PlanetId, VisualRng};
use crate::effects::{StarFieldMode, generate_stars, primary_viewport, spawn_star_field};
use crate::navigation::{NavigationRequest, TransitionController};
use crate::ui::control_panel::{PanelNavigation, spawn_control_panel};
use crate::ui::routes::{AppView, JourneyScoped};
use crate::ui::theme;
use crate::visualization::PlanetClicked;

const HINT: &str = "Tap anywhere to toggle view mode. Scroll to travel between planets.";

#[derive(Component)]
pub struct InfoCard {
    shown: Option<PlanetId>,
}

#[derive(Component)]
pub struct InfoTitle;

#[derive(Component)]
pub struct InfoDescription;

/// Index into the planet's stat lines.
#[derive(Component)]
pub struct InfoStat(pub usize);

pub fn spawn_journey(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut rng: ResMut<VisualRng>,
    mut mode: ResMut<StarFieldMode>,
    settings: Res<VoyagerSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let viewport = primary_viewport(&windows);
    let stars = generate_stars(&mut **rng, settings.journey_stars, viewport);
    spawn_star_field(
        &mut commands,
        &mut meshes,
        &mut materials,
        stars,
        viewport,
        JourneyScoped,
    );
    mode.interactive = true;

    spawn_control_panel(&mut commands, JourneyScoped);

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        GlobalZIndex(20),
        Pickable::IGNORE,
        JourneyScoped,
        children![(
            Text::new(HINT),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(theme::HUD_BLUE_SOFT.with_alpha(0.7)),
            Pickable::IGNORE,
        )],
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(32.0),
                top: Val::Px(80.0),
                width: Val::Px(360.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(10.0),
                padding: UiRect::all(Val::Px(16.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(theme::PANEL_BG.with_alpha(0.5)),
            BorderColor::all(theme::PANEL_BORDER),
            GlobalZIndex(10),
            InfoCard { shown: None },
            JourneyScoped,
            Name::new("Planet Info"),
        ))
        .with_children(|card| {
            card.spawn((
                Text::new(""),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                InfoTitle,
            ));
            card.spawn((
                Text::new(""),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(theme::HUD_BLUE_SOFT),
                InfoDescription,
            ));
            for i in 0..4 {
                card.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 13.0,
                        ..default()
                    },
                    TextColor(theme::HUD_BLUE),
                    InfoStat(i),
                ));
            }
        });
}

pub fn leave_journey(mut mode: ResMut<StarFieldMode>) {
    mode.interactive = false;
}

/// Rewrite the card when the controller settles on another planet.
pub fn refresh_info_card(
    controller: Res<TransitionController>,
    mut cards: Query<&mut InfoCard>,
    mut titles: Query<&mut Text, (With<InfoTitle>, Without<InfoDescription>, Without<InfoStat>)>,
    mut descriptions: Query<&mut Text, (With<InfoDescription>, Without<InfoStat>)>,
    mut stats: Query<(&mut Text, &InfoStat), (Without<InfoTitle>, Without<InfoDescription>)>,
) {
    let planet = controller.active_planet();
    for mut card in &mut cards {
        if card.shown == Some(planet) {
            continue;
        }
        card.shown = Some(planet);
        let facts = planet.facts();
        for mut title in &mut titles {
            title.0 = planet.name().to_string();
        }
        for mut description in &mut descriptions {
            description.0 = facts.description.to_string();
        }
        for (mut text, stat) in &mut stats {
            if let Some((label, value)) = facts.stats.get(stat.0) {
                text.0 = format!("{}: {}", label, value);
            }
        }
    }
}

/// Clicks that land on the window itself (no mesh or UI node hit) flip parallax.
pub fn toggle_star_field(
    mut clicks: MessageReader<Pointer<Click>>,
    windows: Query<(), With<Window>>,
    mut mode: ResMut<StarFieldMode>,
) {
    for click in clicks.read() {
        if windows.contains(click.entity) {
            mode.interactive = !mode.interactive;
            debug!("Star field interactive: {}", mode.interactive);
        }
    }
}

pub fn forward_panel_navigation(
    mut panel: MessageReader<PanelNavigation>,
    mut requests: MessageWriter<NavigationRequest>,
) {
    for PanelNavigation(planet) in panel.read() {
        requests.write(NavigationRequest(*planet));
    }
}

/// Earth opens its detail page; other planets only log.
pub fn open_planet_detail(
    mut clicks: MessageReader<PlanetClicked>,
    mut next: ResMut<NextState<AppView>>,
) {
    for PlanetClicked(planet) in clicks.read() {
        match planet {
            PlanetId::Earth => next.set(AppView::EarthDetail),
            other => info!("{} selected", other),
        }
    }
}
