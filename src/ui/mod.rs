//! UI module - score display and the match-over prompt

mod hud;

pub use hud::*;
