//! Event Bus - frame-stamped record of match events

use bevy::prelude::*;

use super::types::MatchEvent;

/// Event stamped with the physics frame it happened on
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEvent {
    pub frame: u64,
    pub event: MatchEvent,
}

/// Collects events emitted by `step_match`.
///
/// Pending events are drained by the logging system; drained events are kept
/// in `processed` until cleared.
#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted since the last drain
    pending: Vec<FrameEvent>,

    /// Events that have been consumed
    processed: Vec<FrameEvent>,

    /// Physics frames stepped so far
    frame: u64,

    /// Whether the bus records anything
    enabled: bool,
}

impl EventBus {
    /// Create a new enabled event bus
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a disabled event bus (events are dropped)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Advance the frame counter (called once per physics step)
    pub fn next_frame(&mut self) {
        self.frame += 1;
    }

    /// Current physics frame
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: MatchEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(FrameEvent {
            frame: self.frame,
            event,
        });
    }

    /// Emit multiple events at once
    pub fn emit_all(&mut self, events: impl IntoIterator<Item = MatchEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    /// Drain pending events, moving them to processed
    pub fn drain(&mut self) -> Vec<FrameEvent> {
        let events = std::mem::take(&mut self.pending);
        self.processed.extend(events.iter().cloned());
        events
    }

    /// All drained events
    pub fn processed(&self) -> &[FrameEvent] {
        &self.processed
    }

    /// Forget drained events
    pub fn clear_processed(&mut self) {
        self.processed.clear();
    }

    /// Number of pending events
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Log drained events at info level
pub fn log_match_events(mut bus: ResMut<EventBus>) {
    for FrameEvent { frame, event } in bus.drain() {
        match event {
            MatchEvent::WallBounce | MatchEvent::PaddleHit { .. } => {
                debug!("[frame {}] {}", frame, event);
            }
            _ => info!("[frame {}] {}", frame, event),
        }
    }
    // The game never reads history back, only scenario tests do
    bus.clear_processed();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paddle::Side;

    #[test]
    fn test_emit_and_drain() {
        let mut bus = EventBus::new();
        bus.next_frame();
        bus.next_frame();

        bus.emit(MatchEvent::Goal {
            scorer: Side::Left,
            left: 1,
            right: 0,
        });

        assert_eq!(bus.pending_count(), 1);

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].frame, 2);
        assert_eq!(bus.pending_count(), 0);
        assert_eq!(bus.processed().len(), 1);
    }

    #[test]
    fn test_disabled_bus() {
        let mut bus = EventBus::disabled();
        bus.emit(MatchEvent::Restart);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_event_names_and_sides() {
        let hit = MatchEvent::PaddleHit { side: Side::Right };
        assert_eq!(hit.name(), "PaddleHit");
        assert_eq!(hit.side(), Some(Side::Right));
        assert_eq!(MatchEvent::WallBounce.side(), None);
    }
}
