//! Lock-guarded registry shared between execution contexts.
//!
//! The intended topology is one periodic context (timer tick, RT loop)
//! that only calls [`SharedRegistry::resolve`], and one foreground context
//! that registers the table and toggles faults. Both go through the same
//! handle; every call holds the lock for exactly one bounded `O(count)`
//! operation and never while calling back into user code, except
//! [`SharedRegistry::with`] which runs the closure under the lock.
//!
//! `SharedRegistry::new` is `const`, so a deployment can keep a single
//! instance in a `static`:
//!
//! ```rust
//! use microfault::prelude::*;
//!
//! static FAULTS: SharedRegistry<u8, 16> = SharedRegistry::new(LevelOrder::Normal);
//!
//! FAULTS.register(&[FaultDefinition::new(0x01, SeverityLevel::Serious)]).unwrap();
//! FAULTS.enable(0x01).unwrap();
//! assert_eq!(FAULTS.resolve().unwrap().code, 0x01);
//! ```

use heapless::Vec;
use parking_lot::{Mutex, const_mutex};

use crate::code::FaultCode;
use crate::consts::{DefaultCode, MAX_FAULTS};
use crate::error::FaultResult;
use crate::level::LevelOrder;
use crate::registry::{FaultDefinition, FaultInfo, FaultRegistry, TableEntry};

/// [`FaultRegistry`] behind a mutex.
#[derive(Debug)]
pub struct SharedRegistry<C: FaultCode = DefaultCode, const N: usize = MAX_FAULTS> {
    inner: Mutex<FaultRegistry<C, N>>,
}

impl<C: FaultCode, const N: usize> SharedRegistry<C, N> {
    /// Create an empty shared registry.
    pub const fn new(order: LevelOrder) -> Self {
        Self {
            inner: const_mutex(FaultRegistry::new(order)),
        }
    }

    /// Wrap an existing registry.
    pub fn from_registry(registry: FaultRegistry<C, N>) -> Self {
        Self {
            inner: Mutex::new(registry),
        }
    }

    /// See [`FaultRegistry::initialize`].
    pub fn initialize(&self) -> FaultResult<()> {
        self.inner.lock().initialize()
    }

    /// See [`FaultRegistry::register`].
    pub fn register(&self, definitions: &[FaultDefinition<C>]) -> FaultResult<()> {
        self.inner.lock().register(definitions)
    }

    /// See [`FaultRegistry::enable`].
    pub fn enable(&self, code: C) -> FaultResult<()> {
        self.inner.lock().enable(code)
    }

    /// See [`FaultRegistry::disable`].
    pub fn disable(&self, code: C) -> FaultResult<()> {
        self.inner.lock().disable(code)
    }

    /// See [`FaultRegistry::enable_all`].
    pub fn enable_all(&self) {
        self.inner.lock().enable_all();
    }

    /// See [`FaultRegistry::disable_all`].
    pub fn disable_all(&self) {
        self.inner.lock().disable_all();
    }

    /// See [`FaultRegistry::is_enabled`].
    pub fn is_enabled(&self, code: C) -> bool {
        self.inner.lock().is_enabled(code)
    }

    /// See [`FaultRegistry::is_any_active`].
    pub fn is_any_active(&self) -> bool {
        self.inner.lock().is_any_active()
    }

    /// See [`FaultRegistry::resolve`].
    pub fn resolve(&self) -> FaultResult<FaultInfo<C>> {
        self.inner.lock().resolve()
    }

    /// Run `f` with exclusive access, for compound foreground updates
    /// that must not interleave with a resolve.
    pub fn with<R>(&self, f: impl FnOnce(&mut FaultRegistry<C, N>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Copy of the populated entries.
    pub fn snapshot(&self) -> Vec<TableEntry<C>, N> {
        let guard = self.inner.lock();
        let mut out = Vec::new();
        for entry in guard.entries() {
            // count <= N, so every push fits.
            if out.push(*entry).is_err() {
                break;
            }
        }
        out
    }

    /// Consume the handle and return the inner registry.
    pub fn into_inner(self) -> FaultRegistry<C, N> {
        self.inner.into_inner()
    }
}

impl<C: FaultCode, const N: usize> Default for SharedRegistry<C, N> {
    fn default() -> Self {
        Self::from_registry(FaultRegistry::default())
    }
}
