//! Playfield entities: camera, paddles, ball
//!
//! The match state lives in screen space; these entities only mirror it.

use bevy::prelude::*;

use crate::ball::BallSprite;
use crate::config::GameConfig;
use crate::constants::*;
use crate::game::MatchState;
use crate::paddle::{PaddleSprite, Side};

/// Spawn the 2D camera for the game window
pub fn spawn_camera(commands: &mut Commands) {
    commands.spawn((Camera2d, Transform::from_xyz(0.0, 0.0, 0.0)));
}

/// Spawn both paddle rectangles
pub fn spawn_paddles(commands: &mut Commands, state: &MatchState) {
    let config = state.config();
    let size = Vec2::new(config.paddle_width, config.paddle_height);
    for side in [Side::Left, Side::Right] {
        let center = paddle_center(state, side);
        commands.spawn((
            Sprite::from_color(PADDLE_COLOR, size),
            Transform::from_translation(center.extend(0.0)),
            PaddleSprite(side),
        ));
    }
}

/// Spawn the ball as a filled circle
pub fn spawn_ball(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    state: &MatchState,
) {
    let config = state.config();
    commands.spawn((
        Mesh2d(meshes.add(Circle::new(config.ball_radius))),
        MeshMaterial2d(materials.add(BALL_COLOR)),
        Transform::from_translation(config.to_world(state.ball.position).extend(1.0)),
        BallSprite,
    ));
}

/// World-space centre of a paddle sprite
pub fn paddle_center(state: &MatchState, side: Side) -> Vec2 {
    let config: &GameConfig = state.config();
    let paddle = state.paddle(side);
    config.to_world(Vec2::new(
        paddle.x + config.paddle_width / 2.0,
        paddle.y + config.paddle_height / 2.0,
    ))
}

/// Copy paddle and ball positions onto their sprites
pub fn sync_transforms(
    state: Res<MatchState>,
    mut paddles: Query<(&PaddleSprite, &mut Transform), Without<BallSprite>>,
    mut balls: Query<&mut Transform, (With<BallSprite>, Without<PaddleSprite>)>,
) {
    for (sprite, mut transform) in &mut paddles {
        let center = paddle_center(&state, sprite.0);
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }

    let ball = state.config().to_world(state.ball.position);
    for mut transform in &mut balls {
        transform.translation.x = ball.x;
        transform.translation.y = ball.y;
    }
}
