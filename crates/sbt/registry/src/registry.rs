use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sbt_types::{Address, AttributeCommitment, IdentityRecord, IdentityView, LifecycleState, UserId};
use tracing::{debug, info, warn};

use crate::access::{AccessControl, Disclosure, ReadPolicy, Role};
use crate::config::{ConfigError, RegistryConfig};
use crate::error::{RegistryError, RegistryResult};
use crate::events::{EventJournal, RegistryEvent, RegistryEventKind};

/// Everything guarded by the registry lock.
pub(crate) struct RegistryState {
    pub(crate) access: AccessControl,
    pub(crate) records: HashMap<Address, IdentityRecord>,
    pub(crate) journal: EventJournal,
}

/// Soul-bound identity registry.
///
/// Per address: `Absent -> Minted (mint) -> Claimed (claim) -> Absent (burn)`,
/// plus `Minted -> Absent (burn)`. Records are never transferred between
/// addresses.
///
/// Each mutation runs under the write lock and validates every precondition
/// before touching state, so a rejected call leaves the registry unchanged.
pub struct IdentityRegistry {
    pub(crate) state: RwLock<RegistryState>,
    pub(crate) read_policy: ReadPolicy,
}

impl IdentityRegistry {
    /// Create an empty registry administered by `operator`.
    pub fn new(operator: Address) -> Self {
        Self::with_read_policy(operator, ReadPolicy::default())
    }

    pub fn with_read_policy(operator: Address, read_policy: ReadPolicy) -> Self {
        Self::from_parts(AccessControl::new(operator), HashMap::new(), read_policy)
    }

    /// Create a registry from loaded configuration.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, ConfigError> {
        let operator = config.require_operator()?;
        let access = AccessControl::new(operator).with_collaborator(config.collaborator);

        info!(
            operator = %operator,
            collaborator = ?config.collaborator.map(|c| c.to_string()),
            read_policy = ?config.read_policy,
            "Identity registry configured"
        );

        Ok(Self::from_parts(access, HashMap::new(), config.read_policy))
    }

    pub(crate) fn from_parts(
        access: AccessControl,
        records: HashMap<Address, IdentityRecord>,
        read_policy: ReadPolicy,
    ) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                access,
                records,
                journal: EventJournal::new(),
            }),
            read_policy,
        }
    }

    pub(crate) fn read(&self) -> RegistryResult<RwLockReadGuard<'_, RegistryState>> {
        self.state.read().map_err(|_| RegistryError::LockPoisoned)
    }

    pub(crate) fn write(&self) -> RegistryResult<RwLockWriteGuard<'_, RegistryState>> {
        self.state.write().map_err(|_| RegistryError::LockPoisoned)
    }

    /// Read access for infallible queries. Mutations never leave partial
    /// state behind, so a poisoned guard is still consistent.
    fn read_lenient(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mint an unclaimed identity for `target`. Operator only.
    pub fn mint(&self, caller: &Address, target: Address, identifier: UserId) -> RegistryResult<()> {
        let mut state = self.write()?;

        if !state.access.holds(caller, Role::Operator) {
            warn!(caller = %caller, target = %target, "Mint rejected: caller is not operator");
            return Err(RegistryError::OnlyOperatorCanMint);
        }

        match state.records.get(&target) {
            Some(IdentityRecord::Minted { .. }) => {
                debug!(target = %target, "Mint rejected: pending claim");
                return Err(RegistryError::AlreadyMinted);
            }
            Some(IdentityRecord::Claimed { .. }) => {
                debug!(target = %target, "Mint rejected: identity already bound");
                return Err(RegistryError::AlreadyBound);
            }
            None => {}
        }

        state.records.insert(target, IdentityRecord::minted(identifier));
        state
            .journal
            .record(RegistryEventKind::Minted { target, identifier });

        info!(target = %target, identifier = %identifier, "Identity minted");
        Ok(())
    }

    /// Claim the caller's minted identity, binding `commitments` to it.
    ///
    /// Commitments are stored verbatim and in order. A record can be claimed
    /// exactly once.
    pub fn claim(
        &self,
        caller: &Address,
        commitments: Vec<AttributeCommitment>,
    ) -> RegistryResult<()> {
        let mut state = self.write()?;

        let identifier = match state.records.get(caller) {
            None => {
                debug!(caller = %caller, "Claim rejected: nothing minted");
                return Err(RegistryError::NoMintedIdentity);
            }
            Some(IdentityRecord::Claimed { .. }) => {
                debug!(caller = %caller, "Claim rejected: already claimed");
                return Err(RegistryError::AlreadyClaimed);
            }
            Some(IdentityRecord::Minted { identifier }) => *identifier,
        };

        if commitments.is_empty() {
            debug!(caller = %caller, "Claim rejected: no commitments supplied");
            return Err(RegistryError::EmptyCommitments);
        }

        let commitment_count = commitments.len();
        state.records.insert(
            *caller,
            IdentityRecord::Claimed {
                identifier,
                commitments,
            },
        );
        state.journal.record(RegistryEventKind::Claimed {
            owner: *caller,
            identifier,
            commitment_count,
        });

        info!(
            owner = %caller,
            identifier = %identifier,
            commitments = commitment_count,
            "Identity claimed"
        );
        Ok(())
    }

    /// Destroy the caller's own record, claimed or not.
    ///
    /// The address returns to the absent state and may be minted again.
    pub fn burn(&self, caller: &Address) -> RegistryResult<()> {
        let mut state = self.write()?;

        let record = state.records.remove(caller).ok_or_else(|| {
            debug!(caller = %caller, "Burn rejected: no identity");
            RegistryError::BurnOfAbsent
        })?;

        let identifier = record.identifier();
        state.journal.record(RegistryEventKind::Burned {
            owner: *caller,
            identifier,
        });

        info!(
            owner = %caller,
            identifier = %identifier,
            was = %record.state(),
            "Identity burned"
        );
        Ok(())
    }

    /// Whether `address` holds a record, claimed or not.
    pub fn has_identity(&self, address: &Address) -> bool {
        self.read_lenient().records.contains_key(address)
    }

    pub fn lifecycle(&self, address: &Address) -> LifecycleState {
        self.read_lenient()
            .records
            .get(address)
            .map(IdentityRecord::state)
            .unwrap_or(LifecycleState::Absent)
    }

    /// Identifier and commitments for `address`.
    ///
    /// Callers other than the owner are subject to the configured
    /// [`ReadPolicy`]; the policy is checked before existence so that
    /// unauthorized callers learn nothing about the address. A collaborator
    /// admitted by the policy gets the identifier with commitments withheld.
    pub fn get_identity(&self, caller: &Address, address: &Address) -> RegistryResult<IdentityView> {
        let state = self.read()?;

        let disclosure = self
            .read_policy
            .disclosure(&state.access, caller, address)
            .ok_or_else(|| {
                warn!(caller = %caller, target = %address, "Identity read rejected");
                RegistryError::ReadNotPermitted
            })?;

        let record = state.records.get(address).ok_or(RegistryError::NotFound)?;
        Ok(match disclosure {
            Disclosure::Full => record.view(),
            Disclosure::IdentifierOnly => IdentityView {
                identifier: record.identifier(),
                commitments: Vec::new(),
            },
        })
    }

    pub fn operator(&self) -> Address {
        self.read_lenient().access.operator()
    }

    pub fn collaborator(&self) -> Option<Address> {
        self.read_lenient().access.collaborator()
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    /// Number of addresses currently holding a record.
    pub fn identity_count(&self) -> usize {
        self.read_lenient().records.len()
    }

    /// All retained journal events.
    ///
    /// Clones the retained journal; consumers that poll should prefer
    /// [`events_since`](Self::events_since) and release what they have
    /// processed with [`drain_events_through`](Self::drain_events_through).
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.read_lenient().journal.events().to_vec()
    }

    /// Journal events recorded after `sequence`.
    pub fn events_since(&self, sequence: u64) -> Vec<RegistryEvent> {
        self.read_lenient().journal.since(sequence).to_vec()
    }

    /// Remove and return retained events with sequence up to and including
    /// `sequence`. Later events keep their sequence numbers.
    pub fn drain_events_through(&self, sequence: u64) -> RegistryResult<Vec<RegistryEvent>> {
        Ok(self.write()?.journal.drain_through(sequence))
    }
}
