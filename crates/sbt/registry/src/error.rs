use thiserror::Error;

/// Coarse classification of a registry rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller lacks the role the operation requires.
    Authorization,
    /// Transition is illegal from the record's current lifecycle state.
    StateConflict,
    /// Query against an address with no record.
    NotFound,
    /// Malformed input (empty commitment list, inconsistent snapshot).
    InvalidInput,
    Internal,
}

/// Registry rejections.
///
/// Every rejection leaves the registry untouched. The display strings are the
/// reject reasons reported to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("only operator can mint")]
    OnlyOperatorCanMint,

    #[error("only operator can configure")]
    OnlyOperatorCanConfigure,

    #[error("caller is not authorized collaborator")]
    NotAuthorizedCollaborator,

    #[error("caller may not read this identity")]
    ReadNotPermitted,

    #[error("already minted, not yet claimed")]
    AlreadyMinted,

    #[error("identity already bound")]
    AlreadyBound,

    #[error("no minted identity for caller")]
    NoMintedIdentity,

    #[error("identity already claimed")]
    AlreadyClaimed,

    /// Burn requested for an address with no record.
    #[error("identity does not exist")]
    BurnOfAbsent,

    #[error("identity does not exist")]
    NotFound,

    #[error("attribute commitments must not be empty")]
    EmptyCommitments,

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("registry lock poisoned")]
    LockPoisoned,
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::OnlyOperatorCanMint
            | RegistryError::OnlyOperatorCanConfigure
            | RegistryError::NotAuthorizedCollaborator
            | RegistryError::ReadNotPermitted => ErrorKind::Authorization,
            RegistryError::AlreadyMinted
            | RegistryError::AlreadyBound
            | RegistryError::NoMintedIdentity
            | RegistryError::AlreadyClaimed
            | RegistryError::BurnOfAbsent => ErrorKind::StateConflict,
            RegistryError::NotFound => ErrorKind::NotFound,
            RegistryError::EmptyCommitments | RegistryError::InvalidSnapshot(_) => {
                ErrorKind::InvalidInput
            }
            RegistryError::LockPoisoned => ErrorKind::Internal,
        }
    }

    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::Authorization
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
