use super::panel_registry::PanelRegistry;
use super::router::ClickRouter;
use bevy::prelude::*;

#[derive(Component)]
pub struct CaptionText;

/// Native-only caption strip along the bottom of the window.
pub fn spawn_caption_overlay(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                TextLayout::new_with_justify(JustifyText::Center),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(24.0),
                    ..default()
                },
                CaptionText,
            ));
        });
}

/// Shows the focused panel's title and caption, or nothing.
pub fn update_caption_overlay(
    router: Res<ClickRouter>,
    registry: Res<PanelRegistry>,
    mut query: Query<&mut Text, With<CaptionText>>,
) {
    if !router.is_changed() {
        return;
    }

    let caption = router
        .focus()
        .and_then(|focus| registry.get(focus.panel))
        .and_then(|panel| panel.label.caption_pair())
        .map(|(title, caption)| format!("{title}\n{caption}"))
        .unwrap_or_default();

    for mut text in &mut query {
        text.0 = caption.clone();
    }
}
