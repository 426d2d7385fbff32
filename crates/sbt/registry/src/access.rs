//! Role checks against the two configured addresses.

use sbt_types::Address;
use serde::{Deserialize, Serialize};

/// Role a caller must hold for an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Operator,
    /// The address a record is bound to.
    Owner(Address),
    Collaborator,
}

/// The operator and collaborator addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    operator: Address,
    collaborator: Option<Address>,
}

impl AccessControl {
    pub fn new(operator: Address) -> Self {
        Self {
            operator,
            collaborator: None,
        }
    }

    pub fn with_collaborator(mut self, collaborator: Option<Address>) -> Self {
        self.collaborator = collaborator;
        self
    }

    pub fn operator(&self) -> Address {
        self.operator
    }

    pub fn collaborator(&self) -> Option<Address> {
        self.collaborator
    }

    /// Replace the collaborator, returning the previous one.
    pub(crate) fn set_collaborator(&mut self, collaborator: Address) -> Option<Address> {
        self.collaborator.replace(collaborator)
    }

    /// Whether `caller` holds `role`. An unset collaborator is held by nobody.
    pub fn holds(&self, caller: &Address, role: Role) -> bool {
        match role {
            Role::Operator => *caller == self.operator,
            Role::Owner(owner) => *caller == owner,
            Role::Collaborator => self.collaborator.as_ref() == Some(caller),
        }
    }
}

/// How much of an identity a caller may see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disclosure {
    /// Identifier and attribute commitments.
    Full,
    /// Identifier only; commitments are withheld.
    IdentifierOnly,
}

/// Who may read another address's identity through `get_identity`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadPolicy {
    /// Only the owner reads its own identity.
    #[default]
    SelfOnly,
    /// The owner, plus the configured collaborator with commitments withheld.
    SelfOrCollaborator,
    /// Anyone, in full.
    Public,
}

impl ReadPolicy {
    /// What `caller` may see of `target`'s identity, or `None` if nothing.
    pub fn disclosure(
        &self,
        access: &AccessControl,
        caller: &Address,
        target: &Address,
    ) -> Option<Disclosure> {
        if access.holds(caller, Role::Owner(*target)) {
            return Some(Disclosure::Full);
        }
        match self {
            ReadPolicy::SelfOnly => None,
            ReadPolicy::SelfOrCollaborator => access
                .holds(caller, Role::Collaborator)
                .then_some(Disclosure::IdentifierOnly),
            ReadPolicy::Public => Some(Disclosure::Full),
        }
    }

    pub fn permits(&self, access: &AccessControl, caller: &Address, target: &Address) -> bool {
        self.disclosure(access, caller, target).is_some()
    }
}
