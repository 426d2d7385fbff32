use serde::{Deserialize, Serialize};

use crate::commitment::AttributeCommitment;

/// Operator-assigned numeric identifier, meaningful only to the collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Per-address lifecycle position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Absent,
    Minted,
    Claimed,
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LifecycleState::Absent => "absent",
            LifecycleState::Minted => "minted",
            LifecycleState::Claimed => "claimed",
        };
        f.write_str(s)
    }
}

/// A present identity record.
///
/// There is no `Absent` variant: an address without a record simply has no
/// entry, so an absent record can never be mistaken for one holding a zero
/// identifier. The identifier is fixed for the whole lifetime of a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IdentityRecord {
    /// Minted by the operator, waiting for the owner to claim it.
    Minted { identifier: UserId },
    /// Claimed by the owner. `commitments` is never empty.
    Claimed {
        identifier: UserId,
        commitments: Vec<AttributeCommitment>,
    },
}

impl IdentityRecord {
    pub fn minted(identifier: UserId) -> Self {
        IdentityRecord::Minted { identifier }
    }

    pub fn identifier(&self) -> UserId {
        match self {
            IdentityRecord::Minted { identifier } | IdentityRecord::Claimed { identifier, .. } => {
                *identifier
            }
        }
    }

    /// Attribute commitments; empty while unclaimed.
    pub fn commitments(&self) -> &[AttributeCommitment] {
        match self {
            IdentityRecord::Minted { .. } => &[],
            IdentityRecord::Claimed { commitments, .. } => commitments,
        }
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self, IdentityRecord::Claimed { .. })
    }

    pub fn state(&self) -> LifecycleState {
        match self {
            IdentityRecord::Minted { .. } => LifecycleState::Minted,
            IdentityRecord::Claimed { .. } => LifecycleState::Claimed,
        }
    }

    pub fn view(&self) -> IdentityView {
        IdentityView {
            identifier: self.identifier(),
            commitments: self.commitments().to_vec(),
        }
    }
}

/// The `(identifier, commitments)` pair returned by identity lookups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityView {
    pub identifier: UserId,
    pub commitments: Vec<AttributeCommitment>,
}
