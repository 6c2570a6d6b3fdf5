//! Fault table store, mutation operations and severity resolver.
//!
//! ## Table Store
//!
//! A fixed-capacity `heapless::Vec` of [`TableEntry`]. The populated length
//! is the table `count`: `initialize()` sets it to the configured number of
//! user faults, `register()` sets it to the length of the registered table.
//!
//! ## Resolver
//!
//! `resolve()` runs two passes over the populated entries:
//!
//! 1. Find the most severe level among enabled entries, comparing ordinals
//!    through the registry's [`LevelOrder`].
//! 2. Starting at the rotating cursor, scan forward once (wrapping to 0) for
//!    the first enabled entry *at exactly that level*, report it and move the
//!    cursor past it.
//!
//! Pass 2 tests level equality only, never the ordering comparison, so the
//! tie-break is identical in both ordering modes. Over `k` consecutive calls
//! with `k` enabled entries at the top level, each of them is reported
//! exactly once, in ascending index order from the cursor.
//!
//! ## RT Safety
//!
//! No allocation. Every operation is a bounded `O(count)` scan.

use heapless::Vec;
use tracing::{debug, trace};

use crate::code::FaultCode;
use crate::consts::{DEFAULT_LEVEL_ORDER, DefaultCode, MAX_FAULTS, NUMBER_OF_USER_FAULTS};
use crate::error::{FaultError, FaultResult};
use crate::level::{LevelOrder, SeverityLevel};

// ─── Data Model ─────────────────────────────────────────────────────

/// Fault definition supplied at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaultDefinition<C> {
    /// Application-defined fault code.
    pub code: C,
    /// Severity reported when this fault is the most severe active one.
    pub level: SeverityLevel,
}

impl<C> FaultDefinition<C> {
    /// Create a definition.
    pub const fn new(code: C, level: SeverityLevel) -> Self {
        Self { code, level }
    }
}

/// Stored form of a [`FaultDefinition`] with its runtime activation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TableEntry<C> {
    pub code: C,
    pub level: SeverityLevel,
    pub enabled: bool,
}

impl<C> From<FaultDefinition<C>> for TableEntry<C> {
    /// Registered entries always start disabled.
    fn from(def: FaultDefinition<C>) -> Self {
        Self {
            code: def.code,
            level: def.level,
            enabled: false,
        }
    }
}

/// Result of [`FaultRegistry::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaultInfo<C> {
    /// Most severe active level, or `None`.
    pub level: SeverityLevel,
    /// Code of the reported fault; `0` when `level` is `None`.
    pub code: C,
}

impl<C: FaultCode> FaultInfo<C> {
    /// The "no fault active" result: `(None, 0)`.
    #[inline]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if this result reports an actual fault.
    #[inline]
    pub fn is_fault(&self) -> bool {
        self.level.is_fault()
    }
}

// ─── Registry ───────────────────────────────────────────────────────

/// Bounded fault table with round-robin severity resolution.
///
/// `C` is the fault code type (`u8`, `u16` or `u32`), `N` the table capacity.
///
/// # Invariants
/// - `count() <= N`.
/// - `cursor() < count()`, or `cursor() == 0` when `count() == 0`.
/// - Lookups by code always hit the first matching entry by ascending index.
#[derive(Debug, Clone)]
pub struct FaultRegistry<C: FaultCode = DefaultCode, const N: usize = MAX_FAULTS> {
    entries: Vec<TableEntry<C>, N>,
    cursor: usize,
    order: LevelOrder,
    user_faults: usize,
}

impl<C: FaultCode, const N: usize> FaultRegistry<C, N> {
    /// Create an empty registry.
    ///
    /// `initialize()` will populate `min(NUMBER_OF_USER_FAULTS, N)` entries.
    pub const fn new(order: LevelOrder) -> Self {
        let user_faults = if NUMBER_OF_USER_FAULTS < N {
            NUMBER_OF_USER_FAULTS
        } else {
            N
        };
        Self {
            entries: Vec::new(),
            cursor: 0,
            order,
            user_faults,
        }
    }

    /// Create an empty registry that `initialize()`s to `user_faults` entries.
    ///
    /// # Errors
    /// `InvalidParameter` if `user_faults > N`.
    pub fn with_user_faults(order: LevelOrder, user_faults: usize) -> FaultResult<Self> {
        if user_faults > N {
            return Err(FaultError::InvalidParameter("user fault count exceeds capacity"));
        }
        Ok(Self {
            user_faults,
            ..Self::new(order)
        })
    }

    // ── Table Store ──

    /// Reset the table to `user_faults` zeroed, disabled entries.
    ///
    /// Idempotent; each call discards previous registrations and the cursor.
    pub fn initialize(&mut self) -> FaultResult<()> {
        let mut table: Vec<TableEntry<C>, N> = Vec::new();
        for _ in 0..self.user_faults {
            table
                .push(TableEntry::default())
                .map_err(|_| FaultError::InvalidParameter("user fault count exceeds capacity"))?;
        }
        self.entries = table;
        self.cursor = 0;
        debug!(count = self.user_faults, capacity = N, order = ?self.order, "fault table initialized");
        Ok(())
    }

    /// Register a fault table. All entries start disabled.
    ///
    /// The table length becomes the active `count`. The cursor is kept if it
    /// still points inside the table and wraps to 0 otherwise.
    ///
    /// # Errors
    /// `InvalidParameter` if `definitions` is empty or longer than `N`.
    /// The registry is unchanged on error.
    pub fn register(&mut self, definitions: &[FaultDefinition<C>]) -> FaultResult<()> {
        if definitions.is_empty() {
            return Err(FaultError::InvalidParameter("empty fault table"));
        }
        if definitions.len() > N {
            return Err(FaultError::InvalidParameter("fault table exceeds capacity"));
        }

        let mut table: Vec<TableEntry<C>, N> = Vec::new();
        for def in definitions {
            table
                .push(TableEntry::from(*def))
                .map_err(|_| FaultError::InvalidParameter("fault table exceeds capacity"))?;
        }
        self.entries = table;

        if self.cursor >= self.entries.len() {
            self.cursor = 0;
        }
        debug!(count = self.entries.len(), capacity = N, "fault table registered");
        Ok(())
    }

    // ── Mutation Operations ──

    /// Activate the first entry with `code`. No-op if already active.
    ///
    /// # Errors
    /// `NotFound` if no populated entry has `code`.
    pub fn enable(&mut self, code: C) -> FaultResult<()> {
        self.set_enabled(code, true)
    }

    /// Deactivate the first entry with `code`. No-op if already inactive.
    ///
    /// # Errors
    /// `NotFound` if no populated entry has `code`.
    pub fn disable(&mut self, code: C) -> FaultResult<()> {
        self.set_enabled(code, false)
    }

    /// Activate every populated entry.
    pub fn enable_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.enabled = true);
        trace!(count = self.entries.len(), "all faults enabled");
    }

    /// Deactivate every populated entry.
    pub fn disable_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.enabled = false);
        trace!(count = self.entries.len(), "all faults disabled");
    }

    /// Activation state of the first entry with `code`.
    ///
    /// Unknown codes read as `false`; use [`contains`](Self::contains) to
    /// tell "absent" from "disabled".
    pub fn is_enabled(&self, code: C) -> bool {
        self.find(code).is_some_and(|e| e.enabled)
    }

    /// Returns true if a populated entry has `code`.
    pub fn contains(&self, code: C) -> bool {
        self.find(code).is_some()
    }

    fn find(&self, code: C) -> Option<&TableEntry<C>> {
        self.entries.iter().find(|e| e.code == code)
    }

    fn set_enabled(&mut self, code: C, enabled: bool) -> FaultResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.code == code)
            .ok_or(FaultError::NotFound { code: code.to_u32() })?;
        entry.enabled = enabled;
        Ok(())
    }

    // ── Severity Resolver ──

    /// Report the most severe active fault, rotating among equals.
    ///
    /// Returns `(None, 0)` when no fault is active.
    ///
    /// # Errors
    /// `NotFound` if the rotation scan finds no entry at the level found by
    /// the first pass. Both passes read the same table, so this only
    /// surfaces if the table is corrupted between them.
    pub fn resolve(&mut self) -> FaultResult<FaultInfo<C>> {
        let Some(level) = self.top_active_level() else {
            return Ok(FaultInfo::none());
        };

        let count = self.entries.len();
        let start = self.cursor;
        let hit = (0..count)
            .map(|step| (start + step) % count)
            .find_map(|idx| {
                self.entries
                    .get(idx)
                    .filter(|e| e.enabled && e.level == level)
                    .map(|e| (idx, e.code))
            });

        match hit {
            Some((idx, code)) => {
                self.cursor = if idx + 1 >= count { 0 } else { idx + 1 };
                Ok(FaultInfo { level, code })
            }
            None => Err(FaultError::NotFound { code: 0 }),
        }
    }

    /// Most severe level among enabled entries, or `None` if no fault is
    /// active. Entries registered with `SeverityLevel::None` never count.
    pub fn top_active_level(&self) -> Option<SeverityLevel> {
        let order = self.order;
        let start = order.no_fault_extremum();
        let best = self
            .entries
            .iter()
            .filter(|e| e.enabled && e.level.is_fault())
            .map(|e| order.ordinal(e.level))
            .fold(start, |best, ord| {
                if order.is_more_severe(ord, best) {
                    ord
                } else {
                    best
                }
            });

        if best == start {
            None
        } else {
            order.level_from_ordinal(best)
        }
    }

    // ── Accessors ──

    /// Number of populated entries.
    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Table capacity (`N`).
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index at which the next rotation scan starts.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Severity ordering of this registry.
    #[inline]
    pub fn order(&self) -> LevelOrder {
        self.order
    }

    /// Number of entries `initialize()` populates.
    #[inline]
    pub fn user_faults(&self) -> usize {
        self.user_faults
    }

    /// Populated entries, in index order.
    #[inline]
    pub fn entries(&self) -> &[TableEntry<C>] {
        &self.entries
    }

    /// Number of enabled entries.
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.enabled).count()
    }

    /// Returns true if at least one entry is enabled.
    pub fn is_any_active(&self) -> bool {
        self.entries.iter().any(|e| e.enabled)
    }
}

impl<C: FaultCode, const N: usize> Default for FaultRegistry<C, N> {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_ORDER)
    }
}
