//! Build-time constants for the fault registry.
//!
//! Single source of truth for table limits and the defaults selected by
//! cargo features. Runtime code takes these as const-generic defaults, so
//! a deployment can still instantiate a registry of a different shape.

use static_assertions::const_assert;

use crate::level::LevelOrder;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of faults a registry can store (default capacity).
pub const MAX_FAULTS: usize = 32;

/// Number of faults the deployment expects to use after `initialize()`.
pub const NUMBER_OF_USER_FAULTS: usize = 18;

const_assert!(NUMBER_OF_USER_FAULTS <= MAX_FAULTS);

/// Default fault code type for this build.
#[cfg(feature = "code-u32")]
pub type DefaultCode = u32;

/// Default fault code type for this build.
#[cfg(all(feature = "code-u16", not(feature = "code-u32")))]
pub type DefaultCode = u16;

/// Default fault code type for this build.
#[cfg(not(any(feature = "code-u16", feature = "code-u32")))]
pub type DefaultCode = u8;

/// Bit width of [`DefaultCode`].
pub const FAULTCODE_BIT_WIDTH: u32 = DefaultCode::BITS;

/// Severity ordering selected for this build.
#[cfg(feature = "level-order-reversed")]
pub const DEFAULT_LEVEL_ORDER: LevelOrder = LevelOrder::Reversed;

/// Severity ordering selected for this build.
#[cfg(not(feature = "level-order-reversed"))]
pub const DEFAULT_LEVEL_ORDER: LevelOrder = LevelOrder::Normal;
