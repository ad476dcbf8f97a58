//! Paddle module - paddle state and movement

mod components;
mod movement;

pub use components::*;
pub use movement::*;
