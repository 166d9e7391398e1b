//! Decorative effects module
//!
//! Star fields, flat planet discs and the lightspeed overlay. None of these
//! own navigation state; they only read it.

use bevy::prelude::*;

pub mod lightspeed;
pub mod planet_disc;
pub mod starfield;

pub use lightspeed::{LightspeedComplete, LightspeedOverlay};
pub use planet_disc::{SpinSpeed, spawn_planet_disc};
pub use starfield::{StarFieldMode, generate_stars, primary_viewport, spawn_star_field};

use crate::navigation::NavigationSystems;
use crate::ui::routes::AppView;
use lightspeed::{
    animate_streaks, load_lightspeed_assets, log_lightspeed_complete, reset_lightspeed,
    sync_lightspeed, tick_lightspeed, watch_audio_cue,
};
use planet_disc::spin_planet_discs;
use starfield::{parallax_stars, twinkle_stars};

/// Plugin for decorative effects
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<LightspeedComplete>()
            .init_resource::<LightspeedOverlay>()
            .init_resource::<StarFieldMode>()
            .add_systems(Startup, load_lightspeed_assets)
            .add_systems(OnExit(AppView::Journey), reset_lightspeed)
            .add_systems(
                Update,
                (
                    (sync_lightspeed, tick_lightspeed, log_lightspeed_complete)
                        .chain()
                        .after(NavigationSystems),
                    animate_streaks,
                    watch_audio_cue,
                    twinkle_stars,
                    parallax_stars,
                    spin_planet_discs,
                ),
            );
    }
}
