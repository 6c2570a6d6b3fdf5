//! Deployment configuration loading.
//!
//! A deployment describes its fault table, ordering mode and the faults
//! active at startup in one TOML file. The code width and the table
//! capacity stay compile-time choices: they are the type parameters of
//! [`MicroFaultConfig::validate`] and [`MicroFaultConfig::build_registry`].
//!
//! # TOML Example
//!
//! ```toml
//! active = [0x02]
//!
//! [shared]
//! log_level = "debug"
//! service_name = "pump-controller"
//!
//! [registry]
//! level_order = "reversed"
//! user_faults = 3
//!
//! [[faults]]
//! code = 0x01
//! level = "serious"
//!
//! [[faults]]
//! code = 0x02
//! level = "general"
//!
//! [[faults]]
//! code = 0x03
//! level = "minor"
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use microfault::config::{ConfigError, ConfigLoader, MicroFaultConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = MicroFaultConfig::load(Path::new("faults.toml"))?;
//!     let registry = config.build_registry::<u8, 32>()?;
//!     println!("{} faults registered", registry.count());
//!     Ok(())
//! }
//! ```

use heapless::Vec as FixedVec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::code::FaultCode;
use crate::consts::{DEFAULT_LEVEL_ORDER, NUMBER_OF_USER_FAULTS};
use crate::level::{LevelOrder, SeverityLevel};
use crate::registry::{FaultDefinition, FaultRegistry};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Filter directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Common configuration fields for every application using the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// `[registry]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Severity ordering mode.
    #[serde(default = "default_level_order")]
    pub level_order: LevelOrder,

    /// Number of entries `initialize()` populates.
    #[serde(default = "default_user_faults")]
    pub user_faults: usize,
}

fn default_level_order() -> LevelOrder {
    DEFAULT_LEVEL_ORDER
}

fn default_user_faults() -> usize {
    NUMBER_OF_USER_FAULTS
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            level_order: default_level_order(),
            user_faults: default_user_faults(),
        }
    }
}

/// One `[[faults]]` entry. `code` is kept wide until validated against the
/// deployment's code type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaultEntryConfig {
    pub code: u32,
    pub level: SeverityLevel,
}

/// Complete deployment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicroFaultConfig {
    /// Codes enabled right after registration.
    #[serde(default)]
    pub active: Vec<u32>,

    pub shared: SharedConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    /// Fault table, in registration order.
    pub faults: Vec<FaultEntryConfig>,
}

impl MicroFaultConfig {
    /// Parse from a TOML string without validating.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate against a registry of code type `C` and capacity `N`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `service_name` is empty
    /// - `faults` is empty or longer than `N`
    /// - `user_faults` exceeds `N`
    /// - a fault code does not fit in `C`
    /// - an `active` code is not in `faults`
    pub fn validate<C: FaultCode, const N: usize>(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        if self.faults.is_empty() {
            return Err(ConfigError::ValidationError(
                "fault table cannot be empty".to_string(),
            ));
        }
        if self.faults.len() > N {
            return Err(ConfigError::ValidationError(format!(
                "{} faults exceed table capacity {N}",
                self.faults.len()
            )));
        }
        if self.registry.user_faults > N {
            return Err(ConfigError::ValidationError(format!(
                "user_faults {} exceeds table capacity {N}",
                self.registry.user_faults
            )));
        }
        if let Some(bad) = self.faults.iter().find(|f| C::from_u32(f.code).is_none()) {
            return Err(ConfigError::ValidationError(format!(
                "fault code {:#x} does not fit in {} bits",
                bad.code,
                C::BITS
            )));
        }
        if let Some(bad) = self
            .active
            .iter()
            .find(|code| !self.faults.iter().any(|f| f.code == **code))
        {
            return Err(ConfigError::ValidationError(format!(
                "active code {bad:#x} is not in the fault table"
            )));
        }
        Ok(())
    }

    /// Fault table narrowed to `C`.
    pub fn definitions<C: FaultCode, const N: usize>(
        &self,
    ) -> Result<FixedVec<FaultDefinition<C>, N>, ConfigError> {
        self.validate::<C, N>()?;
        let mut defs = FixedVec::new();
        for f in &self.faults {
            let code = C::from_u32(f.code).ok_or_else(|| {
                ConfigError::ValidationError(format!("fault code {:#x} out of range", f.code))
            })?;
            defs.push(FaultDefinition::new(code, f.level)).map_err(|_| {
                ConfigError::ValidationError(format!("fault table exceeds capacity {N}"))
            })?;
        }
        Ok(defs)
    }

    /// Build a registry: initialize, register the table, enable `active`.
    pub fn build_registry<C: FaultCode, const N: usize>(
        &self,
    ) -> Result<FaultRegistry<C, N>, ConfigError> {
        let defs = self.definitions::<C, N>()?;
        let to_config = |e: crate::error::FaultError| ConfigError::ValidationError(e.to_string());

        let mut registry =
            FaultRegistry::with_user_faults(self.registry.level_order, self.registry.user_faults)
                .map_err(to_config)?;
        registry.initialize().map_err(to_config)?;
        registry.register(&defs).map_err(to_config)?;
        for code in &self.active {
            let code = C::from_u32(*code).ok_or_else(|| {
                ConfigError::ValidationError(format!("active code {code:#x} out of range"))
            })?;
            registry.enable(code).map_err(to_config)?;
        }
        Ok(registry)
    }
}

/// Trait for loading configuration from TOML files.
///
/// Blanket-implemented for any type implementing
/// `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
