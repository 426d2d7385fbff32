//! Collaborator authorization gate.
//!
//! Exactly one collaborator address (the achievement system) may look up the
//! identifier bound to an arbitrary address. Only the identifier is disclosed,
//! never the attribute commitments.

use std::sync::Arc;

use sbt_types::{Address, UserId};
use tracing::{info, warn};

use crate::access::Role;
use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEventKind;
use crate::registry::IdentityRegistry;

/// Identifier lookup as seen by the collaborator system.
pub trait IdentifierSource: Send + Sync {
    fn user_identifier(&self, caller: &Address, target: &Address) -> RegistryResult<UserId>;
}

impl IdentityRegistry {
    /// Point the gate at a new collaborator. Operator only; last write wins
    /// and the previous collaborator loses access immediately.
    pub fn set_collaborator(&self, caller: &Address, collaborator: Address) -> RegistryResult<()> {
        let mut state = self.write()?;

        if !state.access.holds(caller, Role::Operator) {
            warn!(caller = %caller, "Collaborator update rejected: caller is not operator");
            return Err(RegistryError::OnlyOperatorCanConfigure);
        }

        let previous = state.access.set_collaborator(collaborator);
        state.journal.record(RegistryEventKind::CollaboratorUpdated {
            previous,
            current: collaborator,
        });

        info!(
            previous = ?previous.map(|p| p.to_string()),
            current = %collaborator,
            "Collaborator address updated"
        );
        Ok(())
    }

    /// Identifier bound to `target`. Callable only by the configured
    /// collaborator; the record may be minted or claimed.
    pub fn get_user_identifier(&self, caller: &Address, target: &Address) -> RegistryResult<UserId> {
        let state = self.read()?;

        if !state.access.holds(caller, Role::Collaborator) {
            warn!(caller = %caller, target = %target, "Identifier lookup rejected");
            return Err(RegistryError::NotAuthorizedCollaborator);
        }

        state
            .records
            .get(target)
            .map(|record| record.identifier())
            .ok_or(RegistryError::NotFound)
    }
}

impl IdentifierSource for IdentityRegistry {
    fn user_identifier(&self, caller: &Address, target: &Address) -> RegistryResult<UserId> {
        self.get_user_identifier(caller, target)
    }
}

impl<T: IdentifierSource + ?Sized> IdentifierSource for Arc<T> {
    fn user_identifier(&self, caller: &Address, target: &Address) -> RegistryResult<UserId> {
        (**self).user_identifier(caller, target)
    }
}
