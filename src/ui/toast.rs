//! Transient notifications in the top-right corner.

use bevy::picking::Pickable;
use bevy::prelude::*;

use crate::config::VoyagerSettings;
use crate::ui::theme;

const MAX_VISIBLE: usize = 4;
const FADE_SECS: f32 = 0.3;

/// Fire-and-forget notification text.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
}

impl Toast {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Component)]
pub struct ToastStack;

#[derive(Component)]
pub struct ToastEntry {
    lifetime: Timer,
}

pub fn setup_toast_stack(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            right: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::FlexEnd,
            row_gap: Val::Px(8.0),
            ..default()
        },
        GlobalZIndex(60),
        Pickable::IGNORE,
        ToastStack,
        Name::new("Toasts"),
    ));
}

pub fn show_toasts(
    mut commands: Commands,
    mut toasts: MessageReader<Toast>,
    settings: Res<VoyagerSettings>,
    stack: Single<Entity, With<ToastStack>>,
    entries: Query<(Entity, &ToastEntry)>,
) {
    let mut live: Vec<(Entity, f32)> = entries
        .iter()
        .map(|(e, entry)| (e, entry.lifetime.elapsed_secs()))
        .collect();
    for toast in toasts.read() {
        // Oldest first out when the stack is full.
        if live.len() >= MAX_VISIBLE {
            live.sort_by(|a, b| b.1.total_cmp(&a.1));
            let (oldest, _) = live.remove(0);
            commands.entity(oldest).despawn();
        }
        let entity = commands
            .spawn((
                Node {
                    padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(theme::PANEL_BG),
                BorderColor::all(theme::PANEL_BORDER),
                Pickable::IGNORE,
                ToastEntry {
                    lifetime: Timer::from_seconds(settings.toast_secs, TimerMode::Once),
                },
                ChildOf(*stack),
            ))
            .with_child((
                Text::new(toast.text.clone()),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(theme::TEXT_MAIN),
                Pickable::IGNORE,
            ))
            .id();
        live.push((entity, 0.0));
    }
}

pub fn expire_toasts(
    mut commands: Commands,
    time: Res<Time>,
    mut entries: Query<(Entity, &mut ToastEntry, &mut BackgroundColor, &Children)>,
    mut texts: Query<&mut TextColor>,
) {
    for (entity, mut entry, mut background, children) in &mut entries {
        entry.lifetime.tick(time.delta());
        if entry.lifetime.is_finished() {
            commands.entity(entity).despawn();
            continue;
        }
        let remaining = entry.lifetime.remaining_secs();
        if remaining >= FADE_SECS {
            continue;
        }
        let fade = remaining / FADE_SECS;
        background.0 = theme::PANEL_BG.with_alpha(theme::PANEL_BG.alpha() * fade);
        let mut iter = texts.iter_many_mut(children);
        while let Some(mut color) = iter.fetch_next() {
            color.0 = theme::TEXT_MAIN.with_alpha(theme::TEXT_MAIN.alpha() * fade);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn toast_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(VoyagerSettings::default())
            .add_message::<Toast>()
            .add_systems(Startup, setup_toast_stack)
            .add_systems(Update, (show_toasts, expire_toasts).chain());
        app.update();
        app
    }

    fn toast_count(app: &mut App) -> usize {
        app.world_mut()
            .query::<&ToastEntry>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_toast_expires_after_lifetime() {
        let mut app = toast_app();
        app.world_mut().write_message(Toast::new("Arrived at Mars"));
        app.update();
        assert_eq!(toast_count(&mut app), 1);

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(3.0));
        app.update();
        app.update();
        assert_eq!(toast_count(&mut app), 0);
    }

    #[test]
    fn test_stack_is_capped() {
        let mut app = toast_app();
        for i in 0..7 {
            app.world_mut().write_message(Toast::new(format!("toast {i}")));
        }
        app.update();
        assert_eq!(toast_count(&mut app), MAX_VISIBLE);
    }

    #[test]
    fn test_text_fades_with_background() {
        let mut app = toast_app();
        app.world_mut().write_message(Toast::new("Arrived at Saturn"));
        app.update();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(2400));
        app.update();

        let background = app
            .world_mut()
            .query_filtered::<&BackgroundColor, With<ToastEntry>>()
            .single(app.world())
            .unwrap()
            .0;
        let text = app
            .world_mut()
            .query_filtered::<&TextColor, With<Text>>()
            .single(app.world())
            .unwrap()
            .0;
        assert!(background.alpha() < theme::PANEL_BG.alpha() * 0.5);
        assert!(text.alpha() < 0.5, "text alpha {}", text.alpha());
        assert!(text.alpha() > 0.0);
    }
}
