//! Ship control panel
//!
//! A decorative HUD docked at the bottom of the journey and Earth detail
//! views. It holds no navigation state: the four planet buttons only emit
//! [`PanelNavigation`] and the owning view decides what that means.

use std::time::Duration;

use bevy::prelude::*;
use chrono::TimeDelta;

use crate::core::{PLANET_ORDER, PlanetId};
use crate::ui::theme::{self, label};

const PANEL_HEIGHT_PX: f32 = 192.0;
/// Mission time shown when the panel is mounted (T+04:23:15).
const MISSION_START_SECS: i64 = 4 * 3600 + 23 * 60 + 15;

/// Label, fill fraction and bar color of the fixed gauges.
pub const SYSTEM_GAUGES: [(&str, f32, Color); 3] = [
    ("LIFE SUPPORT", 0.75, Color::srgb(0.13, 0.77, 0.37)),
    ("FUEL", 0.5, Color::srgb(0.23, 0.51, 0.96)),
    ("SHIELDS", 5.0 / 6.0, Color::srgb(0.66, 0.33, 0.97)),
];
pub const WARP_DRIVE_FILL: f32 = 0.75;

/// Telemetry lines under the mission clock.
const TELEMETRY: [&str; 4] = [
    "LAT: 34.2812° N",
    "LON: 118.4451° W",
    "ALT: 408 KM",
    "VEL: 27,800 KM/H",
];

/// A planet button was pressed.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelNavigation(pub PlanetId);

#[derive(Component)]
pub struct ControlPanel;

#[derive(Component)]
pub struct NavButton(pub PlanetId);

/// Buttons that only acknowledge the press.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelCommand {
    Scan,
    Dock,
    Com,
    Alert,
}

impl PanelCommand {
    pub const ALL: [PanelCommand; 4] = [
        PanelCommand::Scan,
        PanelCommand::Dock,
        PanelCommand::Com,
        PanelCommand::Alert,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelCommand::Scan => "SCAN",
            PanelCommand::Dock => "DOCK",
            PanelCommand::Com => "COM",
            PanelCommand::Alert => "ALERT",
        }
    }

    fn color(self) -> Color {
        match self {
            PanelCommand::Scan | PanelCommand::Dock => theme::HUD_BLUE,
            PanelCommand::Com => theme::HUD_GREEN,
            PanelCommand::Alert => theme::HUD_RED,
        }
    }
}

/// Background colors swapped on hover.
#[derive(Component, Clone, Copy)]
pub struct HoverColors {
    pub idle: Color,
    pub hover: Color,
}

#[derive(Component, Default)]
pub struct MissionClock {
    elapsed: Duration,
}

/// Text that slowly pulses its alpha.
#[derive(Component)]
pub struct PulsingText;

/// `T+HH:MM:SS`, counting from the mission start offset.
pub fn format_mission_elapsed(elapsed: Duration) -> String {
    let secs = i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX - MISSION_START_SECS);
    let total = TimeDelta::seconds(MISSION_START_SECS.saturating_add(secs));
    format!(
        "T+{:02}:{:02}:{:02}",
        total.num_hours(),
        total.num_minutes() % 60,
        total.num_seconds() % 60
    )
}

fn section(
    parent: &mut ChildSpawnerCommands,
    grow: f32,
    build: impl FnOnce(&mut ChildSpawnerCommands),
) {
    parent
        .spawn((
            Node {
                flex_grow: grow,
                flex_basis: Val::Px(0.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(6.0)),
                row_gap: Val::Px(4.0),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.35)),
            BorderColor::all(theme::PANEL_BORDER),
        ))
        .with_children(build);
}

fn gauge(parent: &mut ChildSpawnerCommands, name: &str, fill: f32, color: Color) {
    parent
        .spawn(Node {
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Center,
            column_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|row| {
            row.spawn(label(name, 11.0, theme::HUD_BLUE_SOFT));
            row.spawn((
                Node {
                    width: Val::Px(80.0),
                    height: Val::Px(8.0),
                    ..default()
                },
                BackgroundColor(theme::GAUGE_TRACK),
            ))
            .with_child((
                Node {
                    width: Val::Percent(fill * 100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(color),
            ));
        });
}

/// Spawn the panel; `scope` tags the root for the owning view.
pub fn spawn_control_panel(commands: &mut Commands, scope: impl Bundle) -> Entity {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                bottom: Val::Px(0.0),
                height: Val::Px(PANEL_HEIGHT_PX),
                flex_direction: FlexDirection::Column,
                padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                row_gap: Val::Px(8.0),
                border: UiRect::top(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(theme::PANEL_BG),
            BorderColor::all(theme::PANEL_BORDER),
            GlobalZIndex(30),
            ControlPanel,
            Name::new("Control Panel"),
            scope,
        ))
        .with_children(|panel| {
            panel
                .spawn(Node {
                    justify_content: JustifyContent::SpaceBetween,
                    ..default()
                })
                .with_children(|header| {
                    header.spawn(label("STELLAR VOYAGER", 15.0, theme::HUD_BLUE));
                    header
                        .spawn(label("SYSTEM STATUS: ", 13.0, theme::HUD_BLUE))
                        .with_child((TextSpan::new("ONLINE"), TextColor(theme::HUD_GREEN)));
                    header
                        .spawn(label("VELOCITY: ", 13.0, theme::HUD_BLUE))
                        .with_child((TextSpan::new("1.23c"), TextColor(Color::WHITE)));
                });

            panel
                .spawn(Node {
                    flex_grow: 1.0,
                    column_gap: Val::Px(12.0),
                    ..default()
                })
                .with_children(|grid| {
                    section(grid, 1.0, |left| {
                        left.spawn(Node {
                            flex_grow: 1.0,
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        })
                        .insert(BorderColor::all(theme::PANEL_BORDER))
                        .with_child((label("SCANNING", 10.0, theme::HUD_BLUE), PulsingText));
                        left.spawn(label("SYSTEM SCAN", 11.0, theme::HUD_BLUE_SOFT));
                    });

                    grid.spawn(Node {
                        flex_grow: 4.0,
                        flex_basis: Val::Px(0.0),
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(8.0),
                        ..default()
                    })
                    .with_children(spawn_center);

                    section(grid, 1.0, |right| {
                        right.spawn((
                            label(
                                format_mission_elapsed(Duration::ZERO),
                                11.0,
                                theme::HUD_BLUE_SOFT,
                            ),
                            MissionClock::default(),
                        ));
                        for line in TELEMETRY {
                            right.spawn(label(line, 10.0, theme::HUD_BLUE_SOFT));
                        }
                        right.spawn((
                            label("MISSION ACTIVE", 12.0, theme::HUD_BLUE_SOFT),
                            PulsingText,
                        ));
                    });
                });
        })
        .id()
}

fn spawn_center(center: &mut ChildSpawnerCommands) {
    center
        .spawn(Node {
            flex_grow: 1.0,
            column_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|upper| {
            section(upper, 1.0, |nav| {
                nav.spawn(label("NAVIGATION", 11.0, theme::HUD_BLUE_SOFT));
                nav.spawn(Node {
                    display: Display::Grid,
                    grid_template_columns: RepeatedGridTrack::flex(2, 1.0),
                    row_gap: Val::Px(4.0),
                    column_gap: Val::Px(4.0),
                    flex_grow: 1.0,
                    ..default()
                })
                .with_children(|buttons| {
                    for planet in PLANET_ORDER {
                        let (idle, hover) = theme::nav_button_colors(planet);
                        buttons
                            .spawn((
                                Button,
                                Node {
                                    justify_content: JustifyContent::Center,
                                    align_items: AlignItems::Center,
                                    ..default()
                                },
                                BackgroundColor(idle),
                                HoverColors { idle, hover },
                                NavButton(planet),
                            ))
                            .with_child(label(
                                planet.name().to_uppercase(),
                                11.0,
                                theme::HUD_BLUE_SOFT,
                            ));
                    }
                });
            });

            section(upper, 1.0, |metrics| {
                metrics.spawn(label("SYSTEM METRICS", 11.0, theme::HUD_BLUE_SOFT));
                for (name, fill, color) in SYSTEM_GAUGES {
                    gauge(metrics, name, fill, color);
                }
            });
        });

    center
        .spawn(Node {
            height: Val::Px(44.0),
            column_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|lower| {
            lower
                .spawn((
                    Node {
                        flex_grow: 3.0,
                        flex_basis: Val::Px(0.0),
                        justify_content: JustifyContent::SpaceBetween,
                        align_items: AlignItems::Center,
                        padding: UiRect::horizontal(Val::Px(16.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.35)),
                    BorderColor::all(theme::PANEL_BORDER),
                ))
                .with_children(|row| {
                    for command in PanelCommand::ALL {
                        let color = command.color();
                        row.spawn((
                            Button,
                            Node {
                                padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                            BackgroundColor(Color::NONE),
                            BorderColor::all(color.with_alpha(0.5)),
                            HoverColors {
                                idle: Color::NONE,
                                hover: color.with_alpha(0.15),
                            },
                            command,
                        ))
                        .with_child(label(command.label(), 11.0, color));
                    }
                });

            section(lower, 1.0, |warp| {
                warp.spawn(label("WARP DRIVE", 11.0, theme::HUD_BLUE));
                warp.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(6.0),
                        ..default()
                    },
                    BackgroundColor(theme::GAUGE_TRACK),
                ))
                .with_child((
                    Node {
                        width: Val::Percent(WARP_DRIVE_FILL * 100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(theme::HUD_BLUE),
                ));
            });
        });
}

pub fn press_nav_buttons(
    buttons: Query<(&Interaction, &NavButton), Changed<Interaction>>,
    mut navigation: MessageWriter<PanelNavigation>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed {
            navigation.write(PanelNavigation(button.0));
        }
    }
}

pub fn press_panel_commands(buttons: Query<(&Interaction, &PanelCommand), Changed<Interaction>>) {
    for (interaction, command) in &buttons {
        if *interaction == Interaction::Pressed {
            info!("{} acknowledged", command.label());
        }
    }
}

pub fn highlight_buttons(
    mut buttons: Query<(&Interaction, &HoverColors, &mut BackgroundColor), Changed<Interaction>>,
) {
    for (interaction, colors, mut background) in &mut buttons {
        background.0 = match interaction {
            Interaction::None => colors.idle,
            Interaction::Hovered | Interaction::Pressed => colors.hover,
        };
    }
}

pub fn tick_mission_clock(time: Res<Time>, mut clocks: Query<(&mut MissionClock, &mut Text)>) {
    for (mut clock, mut text) in &mut clocks {
        let before = clock.elapsed.as_secs();
        clock.elapsed += time.delta();
        if clock.elapsed.as_secs() != before {
            text.0 = format_mission_elapsed(clock.elapsed);
        }
    }
}

pub fn pulse_text(time: Res<Time>, mut texts: Query<&mut TextColor, With<PulsingText>>) {
    let alpha = 0.6 + 0.4 * (time.elapsed_secs() * std::f32::consts::PI).cos().abs();
    for mut color in &mut texts {
        color.0.set_alpha(alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mission_clock_starts_at_offset() {
        assert_eq!(format_mission_elapsed(Duration::ZERO), "T+04:23:15");
    }

    #[test]
    fn test_mission_clock_rolls_over() {
        assert_eq!(format_mission_elapsed(Duration::from_secs(45)), "T+04:24:00");
        assert_eq!(
            format_mission_elapsed(Duration::from_secs(36 * 60 + 45)),
            "T+05:00:00"
        );
        assert_eq!(
            format_mission_elapsed(Duration::from_secs(100 * 3600)),
            "T+104:23:15"
        );
    }

    #[test]
    fn test_gauge_fills() {
        let fills: Vec<f32> = SYSTEM_GAUGES.iter().map(|g| g.1).collect();
        assert_eq!(fills, vec![0.75, 0.5, 5.0 / 6.0]);
        assert_eq!(WARP_DRIVE_FILL, 0.75);
    }

    #[test]
    fn test_nav_button_emits_panel_navigation() {
        #[derive(Resource, Default)]
        struct Seen(Vec<PlanetId>);

        fn collect(mut nav: MessageReader<PanelNavigation>, mut seen: ResMut<Seen>) {
            seen.0.extend(nav.read().map(|n| n.0));
        }

        let mut app = App::new();
        app.add_message::<PanelNavigation>()
            .init_resource::<Seen>()
            .add_systems(Update, (press_nav_buttons, collect).chain());
        app.world_mut()
            .spawn((Interaction::Pressed, NavButton(PlanetId::Jupiter)));
        app.world_mut()
            .spawn((Interaction::Hovered, NavButton(PlanetId::Mars)));
        app.update();
        assert_eq!(app.world().resource::<Seen>().0, vec![PlanetId::Jupiter]);

        // Unchanged interactions do not fire again.
        app.update();
        assert_eq!(app.world().resource::<Seen>().0.len(), 1);
    }
}
