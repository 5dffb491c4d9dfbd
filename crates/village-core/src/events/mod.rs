//! Event Collection
//!
//! Per-tick buffer of simulation events, drained by the driver for
//! summaries and by tests for trace assertions.

use bevy_ecs::prelude::*;
use village_events::{SimEvent, SimEventKind};

/// Resource storing events generated this tick.
#[derive(Resource, Debug, Default)]
pub struct TickEvents {
    pub events: Vec<SimEvent>,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: u64, agent: impl Into<String>, kind: SimEventKind) {
        self.events.push(SimEvent::new(tick, agent, kind));
    }

    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_the_buffer() {
        let mut events = TickEvents::new();
        events.push(
            1,
            "elin",
            SimEventKind::CellDiscovered { x: 2, y: 3 },
        );
        assert_eq!(events.len(), 1);

        let drained = events.drain();
        assert_eq!(drained.len(), 1);
        assert!(events.is_empty());
    }
}
