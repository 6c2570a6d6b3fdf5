//! Periodic resolve step.
//!
//! One [`FaultTicker::tick`] per period: resolve the shared registry and
//! report the result. A changed result is logged at `info`, a repeated one
//! at `debug`, a resolver error at `warn`.

use std::sync::Arc;

use microfault::prelude::*;
use tracing::{debug, info, warn};

/// Drives `resolve()` on a shared registry and remembers the last result.
pub struct FaultTicker<C: FaultCode, const N: usize> {
    registry: Arc<SharedRegistry<C, N>>,
    last: FaultInfo<C>,
    ticks: u64,
}

impl<C: FaultCode, const N: usize> FaultTicker<C, N> {
    pub fn new(registry: Arc<SharedRegistry<C, N>>) -> Self {
        Self {
            registry,
            last: FaultInfo::none(),
            ticks: 0,
        }
    }

    /// Run one resolve. Returns `None` if the resolver reported an error.
    pub fn tick(&mut self) -> Option<FaultInfo<C>> {
        self.ticks += 1;
        match self.registry.resolve() {
            Ok(current) => {
                if current != self.last {
                    info!(
                        tick = self.ticks,
                        code = current.code.to_u32(),
                        level = %current.level,
                        "fault state changed"
                    );
                } else {
                    debug!(
                        tick = self.ticks,
                        code = current.code.to_u32(),
                        level = %current.level,
                        "fault state"
                    );
                }
                self.last = current;
                Some(current)
            }
            Err(e) => {
                warn!(tick = self.ticks, "resolve failed: {e}");
                None
            }
        }
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Last successfully resolved result.
    pub fn last(&self) -> FaultInfo<C> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> Arc<SharedRegistry<u8, 4>> {
        let shared = SharedRegistry::new(LevelOrder::Normal);
        shared
            .register(&[
                FaultDefinition::new(0x01, SeverityLevel::Serious),
                FaultDefinition::new(0x02, SeverityLevel::General),
            ])
            .unwrap();
        Arc::new(shared)
    }

    #[test]
    fn tick_tracks_last_result() {
        let registry = shared();
        let mut ticker = FaultTicker::new(Arc::clone(&registry));
        assert_eq!(ticker.tick(), Some(FaultInfo::none()));

        registry.enable(0x02).unwrap();
        let info = ticker.tick().unwrap();
        assert_eq!(info.code, 0x02);
        assert_eq!(ticker.last(), info);
        assert_eq!(ticker.ticks(), 2);
    }

    #[test]
    fn clearing_returns_to_none() {
        let registry = shared();
        let mut ticker = FaultTicker::new(Arc::clone(&registry));
        registry.enable_all();
        assert_eq!(ticker.tick().unwrap().level, SeverityLevel::Serious);
        registry.disable_all();
        assert_eq!(ticker.tick(), Some(FaultInfo::none()));
    }
}
