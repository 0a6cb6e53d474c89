//! Engine configuration.
//!
//! ```toml
//! # Pool size drawn at startup
//! initial_salts = 128
//!
//! # Optional pinned table; keeps digests reproducible across processes
//! salts = [285764410, -1880307357]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{LogiHashError, Result};
use crate::salts::{SaltRegistry, DEFAULT_SALT_CAPACITY};

fn default_initial_salts() -> usize {
    DEFAULT_SALT_CAPACITY
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Minimum pool size after startup
    #[serde(default = "default_initial_salts")]
    pub initial_salts: usize,

    /// Pinned salts occupying the first positions of the pool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salts: Option<Vec<i32>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_salts: DEFAULT_SALT_CAPACITY,
            salts: None,
        }
    }
}

impl EngineConfig {
    /// Config pinning exactly `salts`
    pub fn pinned(salts: Vec<i32>) -> Self {
        Self {
            initial_salts: salts.len(),
            salts: Some(salts),
        }
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// - `Serialization` for malformed TOML or unknown keys
    /// - `ZeroSalt` if a pinned salt is zero
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as `from_toml_str`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|e| LogiHashError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&input)
    }

    /// Render as a TOML document
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if TOML encoding fails.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns `ZeroSalt` naming the first zero pinned salt.
    pub fn validate(&self) -> Result<()> {
        if let Some(position) = self.salts.iter().flatten().position(|s| *s == 0) {
            return Err(LogiHashError::ZeroSalt { position });
        }
        Ok(())
    }

    /// Build the salt registry this config describes.
    ///
    /// Pinned salts fill the first positions; the pool is then grown to
    /// `initial_salts` with fresh draws.
    ///
    /// # Errors
    ///
    /// `ZeroSalt` for an invalid pinned table, `RandomSourceUnavailable` if
    /// drawing fails.
    pub fn build_registry(&self) -> Result<SaltRegistry> {
        self.validate()?;
        match &self.salts {
            Some(pinned) => {
                let registry = SaltRegistry::from_salts(pinned.clone())?;
                registry.ensure(self.initial_salts)?;
                Ok(registry)
            }
            None => SaltRegistry::new(self.initial_salts),
        }
    }
}
