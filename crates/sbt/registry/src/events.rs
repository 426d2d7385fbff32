//! Append-only journal of successful registry state changes.

use chrono::{DateTime, Utc};
use sbt_types::{Address, UserId};
use serde::{Deserialize, Serialize};

/// What changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryEventKind {
    Minted {
        target: Address,
        identifier: UserId,
    },
    Claimed {
        owner: Address,
        identifier: UserId,
        commitment_count: usize,
    },
    Burned {
        owner: Address,
        identifier: UserId,
    },
    CollaboratorUpdated {
        previous: Option<Address>,
        current: Address,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEvent {
    /// Position in the journal, starting at 1.
    pub sequence: u64,
    pub kind: RegistryEventKind,
    pub recorded_at: DateTime<Utc>,
}

/// Successful state changes in order.
///
/// The journal grows without bound until a consumer calls
/// [`drain_through`](Self::drain_through). Sequence numbers are never
/// reused, so draining does not renumber what remains.
#[derive(Clone, Debug, Default)]
pub struct EventJournal {
    events: Vec<RegistryEvent>,
    last_sequence: u64,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its sequence number.
    pub fn record(&mut self, kind: RegistryEventKind) -> u64 {
        self.last_sequence += 1;
        self.events.push(RegistryEvent {
            sequence: self.last_sequence,
            kind,
            recorded_at: Utc::now(),
        });
        self.last_sequence
    }

    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&RegistryEvent> {
        self.events.last()
    }

    /// Retained events recorded after `sequence`.
    pub fn since(&self, sequence: u64) -> &[RegistryEvent] {
        let start = self.events.partition_point(|e| e.sequence <= sequence);
        &self.events[start..]
    }

    /// Remove and return retained events up to and including `sequence`.
    pub fn drain_through(&mut self, sequence: u64) -> Vec<RegistryEvent> {
        let end = self.events.partition_point(|e| e.sequence <= sequence);
        self.events.drain(..end).collect()
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
