//! Journal event abstractions.
//!
//! Every state change of an aggregate is recorded as an event carrying
//! [`EventMetadata`]. The journal is in-memory only; events are drained by
//! the host and written to the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;

/// Metadata attached to every journal event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for log routing, e.g. `sequencer.scene_entered`.
    pub event_type: String,
    /// Aggregate instance this event belongs to.
    pub aggregate_id: Uuid,
    /// Position within the aggregate's journal, starting at 1.
    pub sequence_number: i64,
    /// Links the event to the input that caused it.
    pub correlation_id: Uuid,
    /// When the event was recorded.
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Stamps a fresh event id and the clock's current time.
    #[must_use]
    pub fn stamp(
        event_type: &str,
        aggregate_id: Uuid,
        sequence_number: i64,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event_type.to_owned(),
            aggregate_id,
            sequence_number,
            correlation_id,
            occurred_at: clock.now(),
        }
    }
}

/// Implemented by every journal event.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;

    /// Shorthand for the metadata's sequence number.
    fn sequence_number(&self) -> i64 {
        self.metadata().sequence_number
    }
}
