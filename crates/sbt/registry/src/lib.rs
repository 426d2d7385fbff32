//! # sbt-registry
//!
//! Soul-bound identity registry. The operator mints an identity placeholder
//! for an address, the address claims it once by attaching attribute
//! commitments, and may later burn it. Identities never move between
//! addresses.
//!
//! ## Components
//!
//! - **IdentityRegistry** — the per-address lifecycle state machine
//!   (`mint`, `claim`, `burn`, `has_identity`, `get_identity`)
//! - **Collaborator gate** — one operator-configured address may resolve the
//!   identifier bound to any address (`set_collaborator`,
//!   `get_user_identifier`, [`IdentifierSource`])
//! - **AccessControl / ReadPolicy** — role checks against the operator and
//!   collaborator addresses
//! - **EventJournal** — append-only log of successful state changes
//! - **RegistrySnapshot** — persisted state for save and restore
//! - **RegistryConfig** — file and environment configuration

#![deny(unsafe_code)]

pub mod access;
pub mod config;
pub mod error;
pub mod events;
pub mod gate;
pub mod registry;
pub mod snapshot;

pub use access::{AccessControl, Disclosure, ReadPolicy, Role};
pub use config::{ConfigError, RegistryConfig};
pub use error::{ErrorKind, RegistryError, RegistryResult};
pub use events::{EventJournal, RegistryEvent, RegistryEventKind};
pub use gate::IdentifierSource;
pub use registry::IdentityRegistry;
pub use snapshot::RegistrySnapshot;

pub use sbt_types::{Address, AttributeCommitment, IdentityView, LifecycleState, UserId};
