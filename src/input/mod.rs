//! Input module - PaddleInput resource and capture_input system

use bevy::prelude::*;

use crate::paddle::PaddleKeys;

/// Keyboard state sampled each frame for the physics step
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PaddleInput {
    pub left: PaddleKeys,  // W / S
    pub right: PaddleKeys, // ArrowUp / ArrowDown
    pub restart_held: bool, // Y - only read on the match-over prompt
    pub quit_held: bool,    // N - only read on the match-over prompt
}

fn keys(keyboard: &ButtonInput<KeyCode>, up: KeyCode, down: KeyCode) -> PaddleKeys {
    PaddleKeys {
        up: keyboard.pressed(up),
        down: keyboard.pressed(down),
    }
}

/// Runs in Update so held keys are current when FixedUpdate steps the match
pub fn capture_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<PaddleInput>) {
    input.left = keys(&keyboard, KeyCode::KeyW, KeyCode::KeyS);
    input.right = keys(&keyboard, KeyCode::ArrowUp, KeyCode::ArrowDown);
    input.restart_held = keyboard.pressed(KeyCode::KeyY);
    input.quit_held = keyboard.pressed(KeyCode::KeyN);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_input_reads_held_keys() {
        let mut app = App::new();
        app.init_resource::<PaddleInput>();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_systems(Update, capture_input);

        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.press(KeyCode::KeyW);
            keyboard.press(KeyCode::ArrowDown);
            keyboard.press(KeyCode::KeyY);
        }
        app.update();

        let input = app.world().resource::<PaddleInput>();
        assert_eq!(input.left, PaddleKeys::UP);
        assert_eq!(input.right, PaddleKeys::DOWN);
        assert!(input.restart_held);
        assert!(!input.quit_held);
    }

    #[test]
    fn test_opposite_keys_are_both_kept() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyS);
        assert_eq!(keys(&keyboard, KeyCode::KeyW, KeyCode::KeyS), PaddleKeys::BOTH);
    }
}
