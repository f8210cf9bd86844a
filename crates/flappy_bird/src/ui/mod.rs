use bevy::color::palettes::css::{GOLD, ORANGE_RED};
use bevy::prelude::*;

use crate::gameplay::{ActiveSession, GameEvent, ScoreInfo};
use crate::scene::AssetState;
use crate::session::{Phase, SessionEvent};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup).add_systems(
            Update,
            (
                (update_score, update_high_score),
                show_phase_overlays.run_if(in_state(AssetState::Loaded)),
            ),
        );
    }
}

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct HighScoreText;

/// UI elements visible only during one phase of the session.
#[derive(Component, Debug, Clone, Copy)]
struct PhaseOverlay(Phase);

fn setup(mut commands: Commands) {
    commands.spawn((
        Text::new("0"),
        TextFont {
            font_size: 48.0,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            justify_self: JustifySelf::Center,
            top: Val::Percent(8.0),
            ..default()
        },
        Visibility::Hidden,
        PhaseOverlay(Phase::Active),
        ScoreText,
    ));

    commands
        .spawn((overlay_node(), PhaseOverlay(Phase::AwaitingStart)))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Get Ready!"),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(GOLD.into()),
            ));
            parent.spawn((
                Text::new("Tap or press space"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });

    commands
        .spawn((
            overlay_node(),
            Visibility::Hidden,
            PhaseOverlay(Phase::Ended),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Game Over"),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(ORANGE_RED.into()),
            ));
            parent.spawn((
                Text::new("Best: 0"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                HighScoreText,
            ));
        });
}

fn overlay_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        flex_direction: FlexDirection::Column,
        ..default()
    }
}

const fn visible_in(overlay: Phase, phase: Phase) -> bool {
    match overlay {
        // The score stays on screen next to the game over banner.
        Phase::Active => !matches!(phase, Phase::AwaitingStart),
        Phase::AwaitingStart => matches!(phase, Phase::AwaitingStart),
        Phase::Ended => matches!(phase, Phase::Ended),
    }
}

fn show_phase_overlays(
    session: Res<ActiveSession>,
    mut overlays: Query<(&PhaseOverlay, &mut Visibility)>,
) {
    let phase = session.phase();
    for (overlay, mut visibility) in &mut overlays {
        let wanted = if visible_in(overlay.0, phase) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }
}

fn update_score(
    mut score_query: Query<&mut Text, With<ScoreText>>,
    mut game_events: EventReader<GameEvent>,
) {
    let latest = game_events
        .read()
        .filter_map(|event| match **event {
            SessionEvent::Scored(score) => Some(score),
            SessionEvent::Reset => Some(0),
            SessionEvent::Started | SessionEvent::Flapped | SessionEvent::Crashed => None,
        })
        .last();
    let Some(score) = latest else {
        return;
    };

    for mut text in &mut score_query {
        text.0 = format!("{score}");
    }
}

fn update_high_score(
    mut high_score_query: Query<&mut Text, With<HighScoreText>>,
    score_info: Res<ScoreInfo>,
) {
    if !score_info.is_changed() {
        return;
    }

    for mut text in &mut high_score_query {
        text.0 = format!("Best: {num}", num = score_info.high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlays_follow_the_phase() {
        let table = [
            (Phase::AwaitingStart, [false, true, false]),
            (Phase::Active, [true, false, false]),
            (Phase::Ended, [true, false, true]),
        ];
        for (phase, expected) in table {
            let shown = [Phase::Active, Phase::AwaitingStart, Phase::Ended]
                .map(|overlay| visible_in(overlay, phase));
            assert_eq!(shown, expected, "overlays during {phase}");
        }
    }
}
