//! Shared HUD colors and the feathers theme.

use bevy::prelude::*;
use bevy_feathers::dark_theme::create_dark_theme;
use bevy_feathers::palette;
use bevy_feathers::theme::UiTheme;

use crate::core::PlanetId;

pub const TEXT_MAIN: Color = palette::LIGHT_GRAY_1;
pub const TEXT_DIM: Color = palette::LIGHT_GRAY_2;
pub const ACCENT: Color = palette::ACCENT;

pub const SPACE_DARKER: Color = Color::srgb(0.02, 0.02, 0.06);
pub const PANEL_BG: Color = Color::srgba(0.04, 0.07, 0.14, 0.85);
pub const PANEL_BORDER: Color = Color::srgba(0.23, 0.51, 0.96, 0.3);
pub const HUD_BLUE: Color = Color::srgb(0.38, 0.65, 0.98);
pub const HUD_BLUE_SOFT: Color = Color::srgb(0.58, 0.77, 0.99);
pub const HUD_GREEN: Color = Color::srgb(0.29, 0.87, 0.5);
pub const HUD_RED: Color = Color::srgb(0.97, 0.44, 0.44);
pub const GAUGE_TRACK: Color = Color::srgba(0.0, 0.0, 0.0, 0.5);

pub fn label(text: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Idle and hovered background of a planet's navigation button.
pub fn nav_button_colors(planet: PlanetId) -> (Color, Color) {
    let base = match planet {
        PlanetId::Earth => Color::srgb_u8(0x25, 0x63, 0xeb),
        PlanetId::Mars => Color::srgb_u8(0xdc, 0x26, 0x26),
        PlanetId::Jupiter => Color::srgb_u8(0xea, 0x58, 0x0c),
        PlanetId::Saturn => Color::srgb_u8(0xca, 0x8a, 0x04),
    };
    (base.with_alpha(0.2), base.with_alpha(0.5))
}

/// Feathers ships `UiTheme` empty; fill in the tokens the HUD relies on.
pub fn voyager_theme() -> UiTheme {
    let mut theme = UiTheme(create_dark_theme());
    theme.set_color("feathers.text.main", TEXT_MAIN);
    theme.set_color("feathers.text.dim", TEXT_DIM);
    theme.set_color("feathers.focus", ACCENT);
    theme
}
