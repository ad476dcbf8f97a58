//! Match events reported by the physics step
//!
//! The EventBus collects them per frame so systems can log them and
//! scenario tests can assert on their order.

mod bus;
mod types;

pub use bus::{EventBus, FrameEvent, log_match_events};
pub use types::MatchEvent;
