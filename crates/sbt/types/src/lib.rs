//! # sbt-types
//!
//! Core types for the soul-bound identity registry.
//!
//! - **Address** — 20-byte account address a record is bound to
//! - **UserId** — numeric identifier assigned by the operator at mint time
//! - **AttributeCommitment** — opaque 32-byte digest of an undisclosed attribute
//! - **IdentityRecord** — `Minted` or `Claimed`; absence from the registry is
//!   the third lifecycle state

#![deny(unsafe_code)]

pub mod address;
pub mod commitment;
pub mod error;
pub mod record;

pub use address::Address;
pub use commitment::AttributeCommitment;
pub use error::ParseError;
pub use record::{IdentityRecord, IdentityView, LifecycleState, UserId};
