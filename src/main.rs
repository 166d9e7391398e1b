use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_feathers::FeathersPlugins;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod config;
mod core;
mod effects;
mod navigation;
mod ui;
mod visualization;

use crate::core::VisualRng;
use config::load_settings;
use effects::EffectsPlugin;
use navigation::NavigationPlugin;
use ui::{AppView, UiPlugin, theme::voyager_theme};
use visualization::VisualizationPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Stellar Voyager".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // After DefaultPlugins so the load is logged.
    let settings = load_settings();
    app.insert_resource(VisualRng::from_seed(settings.seed));
    app.insert_resource(settings);

    // Feathers initializes `UiTheme` but does not populate it by default.
    app.insert_resource(voyager_theme());
    app.add_plugins(FeathersPlugins);

    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(MeshPickingPlugin);

    app.init_state::<AppView>();
    app.add_plugins(NavigationPlugin);
    app.add_plugins(EffectsPlugin);
    app.add_plugins(UiPlugin);
    app.add_plugins(VisualizationPlugin);

    app.run();
}
