//! Event logging for bake sessions.
//!
//! Every state change a session makes is recorded as an [`Event`], so a
//! caller can inspect what happened after the fact without scraping output.
//!
//! # Event Types
//!
//! - **BatchFilled**: sheet filled to capacity
//! - **MinuteBaked**: one tick applied, with the resulting status
//! - **AlmostReady**: the tick left the batch `almost_ready`
//! - **BatchFinished**: final report produced, batch removed
//! - **BatchDiscarded**: batch removed without a report
//!
//! # Example
//!
//! ```rust
//! use oven_core::models::{BakeStatus, Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::MinuteBaked { tick: 9, status: BakeStatus::AlmostReady });
//! log.log(Event::AlmostReady { tick: 9 });
//!
//! assert_eq!(log.events_at_tick(9).len(), 2);
//! assert_eq!(log.events_of_type("AlmostReady").len(), 1);
//! ```

use crate::models::variant::BakeStatus;
use serde::Serialize;
use uuid::Uuid;

/// Session event, stamped with the bake tick it happened at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum Event {
    BatchFilled {
        tick: u32,
        batch_id: Uuid,
        variant: &'static str,
        size: usize,
        capacity: usize,
    },

    MinuteBaked {
        tick: u32,
        status: BakeStatus,
    },

    AlmostReady {
        tick: u32,
    },

    BatchFinished {
        tick: u32,
        batch_id: Uuid,
        size: usize,
        status: BakeStatus,
    },

    BatchDiscarded {
        tick: u32,
        batch_id: Uuid,
        size: usize,
    },
}

impl Event {
    pub fn tick(&self) -> u32 {
        match self {
            Event::BatchFilled { tick, .. } => *tick,
            Event::MinuteBaked { tick, .. } => *tick,
            Event::AlmostReady { tick } => *tick,
            Event::BatchFinished { tick, .. } => *tick,
            Event::BatchDiscarded { tick, .. } => *tick,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BatchFilled { .. } => "BatchFilled",
            Event::MinuteBaked { .. } => "MinuteBaked",
            Event::AlmostReady { .. } => "AlmostReady",
            Event::BatchFinished { .. } => "BatchFinished",
            Event::BatchDiscarded { .. } => "BatchDiscarded",
        }
    }
}

/// Append-only event log
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_at_tick(&self, tick: u32) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_and_tick() {
        let event = Event::BatchDiscarded {
            tick: 3,
            batch_id: Uuid::nil(),
            size: 48,
        };
        assert_eq!(event.tick(), 3);
        assert_eq!(event.event_type(), "BatchDiscarded");
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(Event::MinuteBaked {
            tick: 1,
            status: BakeStatus::Doughy,
        })
        .unwrap();

        assert_eq!(json["event"], "MinuteBaked");
        assert_eq!(json["status"], "doughy");
    }

    #[test]
    fn test_clear() {
        let mut log = EventLog::new();
        log.log(Event::AlmostReady { tick: 1 });
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
    }
}
