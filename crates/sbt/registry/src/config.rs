//! Registry configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional config
//! file, then `SBT_`-prefixed environment variables (`SBT_OPERATOR`,
//! `SBT_COLLABORATOR`, `SBT_READ_POLICY`).

use sbt_types::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::access::ReadPolicy;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Operator address; fixed for the lifetime of the registry.
    #[serde(default)]
    pub operator: Option<Address>,

    /// Initial collaborator address, if any.
    #[serde(default)]
    pub collaborator: Option<Address>,

    /// Third-party read access to full identities.
    #[serde(default)]
    pub read_policy: ReadPolicy,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("operator address is not configured")]
    MissingOperator,
}

impl RegistryConfig {
    pub fn new(operator: Address) -> Self {
        Self {
            operator: Some(operator),
            ..Default::default()
        }
    }

    /// Load configuration from defaults, an optional file, and the environment.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&RegistryConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SBT")
                .prefix_separator("_")
                .separator("__"),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// The configured operator, or [`ConfigError::MissingOperator`].
    pub fn require_operator(&self) -> Result<Address, ConfigError> {
        self.operator.ok_or(ConfigError::MissingOperator)
    }
}
