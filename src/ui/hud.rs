//! HUD components and systems (scores, winner line, restart prompt)

use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::config::GameConfig;
use crate::constants::*;
use crate::game::MatchState;
use crate::paddle::Side;

/// Score number for one player
#[derive(Component)]
pub struct ScoreText(pub Side);

/// "Player N wins!" line, hidden while the match is running
#[derive(Component)]
pub struct WinnerText;

/// Play-again prompt, hidden while the match is running
#[derive(Component)]
pub struct RestartPrompt;

pub const RESTART_PROMPT: &str = "Do you want to play again? (Y/N)";

/// Screen-space top-left corner of a player's score
pub fn score_anchor(config: &GameConfig, side: Side) -> Vec2 {
    let x = match side {
        Side::Left => config.width / 4.0,
        Side::Right => config.width * 3.0 / 4.0,
    };
    Vec2::new(x.floor(), SCORE_TEXT_Y)
}

/// Spawn the score labels and the (hidden) match-over text
pub fn spawn_hud(commands: &mut Commands, config: &GameConfig) {
    for side in [Side::Left, Side::Right] {
        commands.spawn((
            Text2d::new("0"),
            TextFont::from_font_size(HUD_FONT_SIZE),
            TextColor(TEXT_PRIMARY),
            Anchor::TOP_LEFT,
            Transform::from_translation(config.to_world(score_anchor(config, side)).extend(2.0)),
            ScoreText(side),
        ));
    }

    let center = config.center();
    commands.spawn((
        Text2d::new(""),
        TextFont::from_font_size(HUD_FONT_SIZE),
        TextColor(TEXT_PRIMARY),
        TextLayout::new_with_justify(Justify::Center),
        Anchor::CENTER,
        Transform::from_translation(config.to_world(center).extend(2.0)),
        Visibility::Hidden,
        WinnerText,
    ));
    commands.spawn((
        Text2d::new(RESTART_PROMPT),
        TextFont::from_font_size(HUD_FONT_SIZE),
        TextColor(TEXT_PROMPT),
        TextLayout::new_with_justify(Justify::Center),
        // Top edge sits PROMPT_OFFSET_Y below the centre
        Anchor::TOP_CENTER,
        Transform::from_translation(
            config
                .to_world(center + Vec2::new(0.0, PROMPT_OFFSET_Y))
                .extend(2.0),
        ),
        Visibility::Hidden,
        RestartPrompt,
    ));
}

/// Update both score labels
pub fn update_score_text(state: Res<MatchState>, mut texts: Query<(&ScoreText, &mut Text2d)>) {
    if !state.is_changed() {
        return;
    }
    for (label, mut text) in &mut texts {
        let points = state.score.get(label.0).to_string();
        if text.0 != points {
            text.0 = points;
        }
    }
}

/// Show the winner and the prompt while the match is over
pub fn update_match_over_prompt(
    state: Res<MatchState>,
    mut winner: Query<(&mut Text2d, &mut Visibility), (With<WinnerText>, Without<RestartPrompt>)>,
    mut prompt: Query<&mut Visibility, (With<RestartPrompt>, Without<WinnerText>)>,
) {
    let outcome = state.outcome();
    let visibility = if outcome.is_some() {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };

    if let Ok((mut text, mut vis)) = winner.single_mut() {
        if let Some(outcome) = outcome {
            text.0 = outcome.headline();
        }
        vis.set_if_neq(visibility);
    }
    if let Ok(mut vis) = prompt.single_mut() {
        vis.set_if_neq(visibility);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Score;

    fn hud_app(state: MatchState) -> App {
        let mut app = App::new();
        let config = *state.config();
        app.insert_resource(state);
        app.add_systems(Startup, move |mut commands: Commands| {
            spawn_hud(&mut commands, &config)
        });
        app.add_systems(Update, (update_score_text, update_match_over_prompt));
        app
    }

    #[test]
    fn test_score_anchors() {
        let config = GameConfig::default();
        assert_eq!(score_anchor(&config, Side::Left), Vec2::new(200.0, 50.0));
        assert_eq!(score_anchor(&config, Side::Right), Vec2::new(600.0, 50.0));
    }

    #[test]
    fn test_hud_text_placement_and_size() {
        let mut app = hud_app(MatchState::default());
        app.update();

        let world = app.world_mut();
        let scores: Vec<(Anchor, f32, Vec3)> = world
            .query_filtered::<(&Anchor, &TextFont, &Transform), With<ScoreText>>()
            .iter(world)
            .map(|(anchor, font, transform)| (*anchor, font.font_size, transform.translation))
            .collect();
        assert_eq!(scores.len(), 2);
        for (anchor, size, translation) in scores {
            assert_eq!(anchor, Anchor::TOP_LEFT);
            assert_eq!(size, 50.0);
            // Top edge 50 px below the top of the 600 px window
            assert_eq!(translation.y, 250.0);
        }

        let (anchor, font) = world
            .query_filtered::<(&Anchor, &TextFont), With<RestartPrompt>>()
            .single(world)
            .unwrap();
        assert_eq!(*anchor, Anchor::TOP_CENTER);
        assert_eq!(font.font_size, 50.0);
    }

    #[test]
    fn test_scores_follow_state() {
        let mut state = MatchState::default();
        state.score = Score { left: 2, right: 3 };
        let mut app = hud_app(state);
        app.update();

        let world = app.world_mut();
        let mut labels: Vec<(Side, String)> = world
            .query::<(&ScoreText, &Text2d)>()
            .iter(world)
            .map(|(label, text)| (label.0, text.0.clone()))
            .collect();
        labels.sort_by_key(|(side, _)| side.player_number());
        assert_eq!(
            labels,
            vec![(Side::Left, "2".to_string()), (Side::Right, "3".to_string())]
        );
    }

    #[test]
    fn test_prompt_only_when_match_over() {
        let mut app = hud_app(MatchState::default());
        app.update();

        let world = app.world_mut();
        let hidden = world
            .query_filtered::<&Visibility, With<RestartPrompt>>()
            .single(world)
            .unwrap();
        assert_eq!(*hidden, Visibility::Hidden);

        app.world_mut().resource_mut::<MatchState>().score = Score { left: 5, right: 3 };
        app.update();

        let world = app.world_mut();
        let (text, vis) = world
            .query_filtered::<(&Text2d, &Visibility), With<WinnerText>>()
            .single(world)
            .unwrap();
        assert_eq!(text.0, "Player 1 wins!");
        assert_eq!(*vis, Visibility::Visible);
    }
}
