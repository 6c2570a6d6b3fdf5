//! Prelude module for common re-exports.
//!
//! ```rust
//! use microfault::prelude::*;
//! ```

// ─── Registry ───────────────────────────────────────────────────────
pub use crate::registry::{FaultDefinition, FaultInfo, FaultRegistry, TableEntry};
pub use crate::shared::SharedRegistry;

// ─── Levels & Codes ─────────────────────────────────────────────────
pub use crate::code::FaultCode;
pub use crate::level::{LevelOrder, SeverityLevel};

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::{FaultError, FaultResult};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, MicroFaultConfig, SharedConfig};

// ─── Build Constants ────────────────────────────────────────────────
pub use crate::consts::{
    DEFAULT_LEVEL_ORDER, DefaultCode, FAULTCODE_BIT_WIDTH, MAX_FAULTS, NUMBER_OF_USER_FAULTS,
};
