//! MicroFault Library
//!
//! Bounded fault-state registry for RT loops and interrupt handlers.
//! A deployment registers a fixed table of fault definitions once, toggles
//! individual faults as conditions arise, and periodically asks the
//! registry for the single most severe active fault.
//!
//! # Module Structure
//!
//! - [`consts`] - Build-time limits and defaults
//! - [`code`] - Fault code width abstraction (`u8` / `u16` / `u32`)
//! - [`level`] - Severity levels and the ordering strategy
//! - [`error`] - Status values returned by every operation
//! - [`registry`] - Table store, mutation operations and severity resolver
//! - [`shared`] - Lock-guarded registry shared between periodic and foreground contexts
//! - [`config`] - TOML deployment configuration
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Zero-Allocation Runtime
//!
//! The table lives in a fixed-capacity `heapless::Vec`. No operation on
//! the registry allocates, blocks, or performs more than one `O(count)` pass
//! per phase.
//!
//! # Usage
//!
//! ```rust
//! use microfault::prelude::*;
//!
//! let mut reg: FaultRegistry<u8, 8> = FaultRegistry::new(LevelOrder::Normal);
//! reg.initialize().unwrap();
//! reg.register(&[
//!     FaultDefinition::new(0x01, SeverityLevel::Serious),
//!     FaultDefinition::new(0x02, SeverityLevel::General),
//! ])
//! .unwrap();
//!
//! reg.enable(0x02).unwrap();
//! let info = reg.resolve().unwrap();
//! assert_eq!(info.level, SeverityLevel::General);
//! assert_eq!(info.code, 0x02);
//! ```

pub mod code;
pub mod config;
pub mod consts;
pub mod error;
pub mod level;
pub mod prelude;
pub mod registry;
pub mod shared;
