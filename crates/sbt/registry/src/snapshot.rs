//! Persisted registry state: the record table plus the operator and
//! collaborator addresses. The event journal is not part of it.

use std::collections::{BTreeMap, HashMap};

use sbt_types::{Address, IdentityRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::access::{AccessControl, ReadPolicy};
use crate::error::{RegistryError, RegistryResult};
use crate::registry::IdentityRegistry;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub operator: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<Address>,
    #[serde(default)]
    pub records: BTreeMap<Address, IdentityRecord>,
}

impl RegistrySnapshot {
    /// Reject snapshots holding a claimed record with no commitments.
    pub fn validate(&self) -> RegistryResult<()> {
        for (address, record) in &self.records {
            if record.is_claimed() && record.commitments().is_empty() {
                return Err(RegistryError::InvalidSnapshot(format!(
                    "claimed identity for {} has no commitments",
                    address
                )));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> RegistryResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RegistryError::InvalidSnapshot(e.to_string()))
    }

    pub fn from_json(json: &str) -> RegistryResult<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| RegistryError::InvalidSnapshot(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl IdentityRegistry {
    /// Capture the persisted state.
    pub fn snapshot(&self) -> RegistryResult<RegistrySnapshot> {
        let state = self.read()?;
        Ok(RegistrySnapshot {
            operator: state.access.operator(),
            collaborator: state.access.collaborator(),
            records: state
                .records
                .iter()
                .map(|(address, record)| (*address, record.clone()))
                .collect(),
        })
    }

    /// Rebuild a registry from a snapshot. The journal starts empty.
    pub fn restore(snapshot: RegistrySnapshot, read_policy: ReadPolicy) -> RegistryResult<Self> {
        snapshot.validate()?;

        let access = AccessControl::new(snapshot.operator).with_collaborator(snapshot.collaborator);
        let records: HashMap<_, _> = snapshot.records.into_iter().collect();

        info!(
            operator = %snapshot.operator,
            identities = records.len(),
            "Identity registry restored from snapshot"
        );

        Ok(Self::from_parts(access, records, read_policy))
    }
}
