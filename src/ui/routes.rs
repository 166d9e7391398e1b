//! Top-level views and their lifetimes

use bevy::prelude::*;

/// The three screens of the app, addressed by the paths they are linked under.
#[derive(States, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AppView {
    #[default]
    Landing,
    Journey,
    EarthDetail,
}

impl AppView {
    pub fn path(self) -> &'static str {
        match self {
            AppView::Landing => "/",
            AppView::Journey => "/journey",
            AppView::EarthDetail => "/earth",
        }
    }
}

/// Entities owned by the landing view.
#[derive(Component)]
pub struct LandingScoped;

/// Entities owned by the journey view.
#[derive(Component)]
pub struct JourneyScoped;

/// Entities owned by the Earth detail view.
#[derive(Component)]
pub struct EarthDetailScoped;

/// Despawn everything tagged with `T` (children go with their parents).
pub fn despawn_scoped<T: Component>(mut commands: Commands, scoped: Query<Entity, With<T>>) {
    for entity in &scoped {
        commands.entity(entity).despawn();
    }
}

pub fn log_view_change(view: Res<State<AppView>>) {
    info!("View: {}", view.path());
}

/// Escape leaves either sub-view for the landing page.
pub fn escape_to_landing(
    keys: Res<ButtonInput<KeyCode>>,
    view: Res<State<AppView>>,
    mut next: ResMut<NextState<AppView>>,
) {
    if keys.just_pressed(KeyCode::Escape) && *view.get() != AppView::Landing {
        next.set(AppView::Landing);
    }
}
