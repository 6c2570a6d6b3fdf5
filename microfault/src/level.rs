//! Severity levels and the ordering strategy.
//!
//! [`SeverityLevel`] names a level by what it means. Its numeric ordinal
//! depends on the deployment's [`LevelOrder`]:
//!
//! | Level   | Normal | Reversed |
//! |---------|--------|----------|
//! | None    | 0      | 0        |
//! | Minor   | 1      | 3        |
//! | General | 2      | 2        |
//! | Serious | 3      | 1        |
//!
//! All severity comparisons go through the ordering strategy, so
//! `SeverityLevel` does not implement `Ord`.

use serde::{Deserialize, Serialize};

/// Severity of a fault. `None` is the identity for "no fault active".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    /// No fault.
    #[default]
    None,
    /// Minor fault.
    Minor,
    /// General fault.
    General,
    /// Serious fault.
    Serious,
}

impl SeverityLevel {
    /// The three business levels, least severe first.
    pub const FAULT_LEVELS: [Self; 3] = [Self::Minor, Self::General, Self::Serious];

    /// Returns true for every level except `None`.
    #[inline]
    pub const fn is_fault(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Lowercase name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Minor => "minor",
            Self::General => "general",
            Self::Serious => "serious",
        }
    }
}

impl core::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity ordering mode. Fixed for the lifetime of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelOrder {
    /// Greater ordinal = more severe (Serious = 3).
    #[default]
    Normal,
    /// Smaller ordinal = more severe (Serious = 1).
    Reversed,
}

impl LevelOrder {
    /// Numeric ordinal of `level` under this ordering.
    #[inline]
    pub const fn ordinal(self, level: SeverityLevel) -> u8 {
        match (self, level) {
            (_, SeverityLevel::None) => 0,
            (_, SeverityLevel::General) => 2,
            (Self::Normal, SeverityLevel::Minor) | (Self::Reversed, SeverityLevel::Serious) => 1,
            (Self::Normal, SeverityLevel::Serious) | (Self::Reversed, SeverityLevel::Minor) => 3,
        }
    }

    /// Inverse of [`ordinal`](Self::ordinal). Returns `None` for unknown ordinals.
    pub const fn level_from_ordinal(self, ordinal: u8) -> Option<SeverityLevel> {
        match (self, ordinal) {
            (_, 0) => Some(SeverityLevel::None),
            (_, 2) => Some(SeverityLevel::General),
            (Self::Normal, 1) | (Self::Reversed, 3) => Some(SeverityLevel::Minor),
            (Self::Normal, 3) | (Self::Reversed, 1) => Some(SeverityLevel::Serious),
            _ => None,
        }
    }

    /// Initial extremum for the "most severe" scan.
    ///
    /// Normal: the `None` ordinal, so only real faults can beat it.
    /// Reversed: one past the least severe ordinal (`Minor + 1`).
    #[inline]
    pub const fn no_fault_extremum(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Reversed => self.ordinal(SeverityLevel::Minor) + 1,
        }
    }

    /// Returns true if ordinal `candidate` is strictly more severe than `current`.
    #[inline]
    pub const fn is_more_severe(self, candidate: u8, current: u8) -> bool {
        match self {
            Self::Normal => candidate > current,
            Self::Reversed => candidate < current,
        }
    }

    /// The more severe of two levels. `None` loses against every fault level.
    pub const fn most_severe(self, a: SeverityLevel, b: SeverityLevel) -> SeverityLevel {
        if !a.is_fault() {
            return b;
        }
        if !b.is_fault() {
            return a;
        }
        if self.is_more_severe(self.ordinal(b), self.ordinal(a)) {
            b
        } else {
            a
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_ordinals() {
        let o = LevelOrder::Normal;
        assert_eq!(o.ordinal(SeverityLevel::None), 0);
        assert_eq!(o.ordinal(SeverityLevel::Minor), 1);
        assert_eq!(o.ordinal(SeverityLevel::General), 2);
        assert_eq!(o.ordinal(SeverityLevel::Serious), 3);
    }

    #[test]
    fn reversed_ordinals() {
        let o = LevelOrder::Reversed;
        assert_eq!(o.ordinal(SeverityLevel::None), 0);
        assert_eq!(o.ordinal(SeverityLevel::Serious), 1);
        assert_eq!(o.ordinal(SeverityLevel::General), 2);
        assert_eq!(o.ordinal(SeverityLevel::Minor), 3);
    }

    #[test]
    fn ordinal_inverse() {
        for order in [LevelOrder::Normal, LevelOrder::Reversed] {
            for level in [
                SeverityLevel::None,
                SeverityLevel::Minor,
                SeverityLevel::General,
                SeverityLevel::Serious,
            ] {
                assert_eq!(order.level_from_ordinal(order.ordinal(level)), Some(level));
            }
            assert_eq!(order.level_from_ordinal(4), None);
        }
    }

    #[test]
    fn extremum_never_beats_a_fault() {
        for order in [LevelOrder::Normal, LevelOrder::Reversed] {
            let start = order.no_fault_extremum();
            for level in SeverityLevel::FAULT_LEVELS {
                assert!(order.is_more_severe(order.ordinal(level), start));
            }
        }
        assert_eq!(LevelOrder::Reversed.no_fault_extremum(), 4);
    }

    #[test]
    fn serious_wins_in_both_orders() {
        for order in [LevelOrder::Normal, LevelOrder::Reversed] {
            assert_eq!(
                order.most_severe(SeverityLevel::General, SeverityLevel::Serious),
                SeverityLevel::Serious
            );
            assert_eq!(
                order.most_severe(SeverityLevel::Minor, SeverityLevel::General),
                SeverityLevel::General
            );
            assert_eq!(
                order.most_severe(SeverityLevel::None, SeverityLevel::Minor),
                SeverityLevel::Minor
            );
        }
    }

    #[test]
    fn serde_names_are_lowercase() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Wrapper {
            level: SeverityLevel,
            order: LevelOrder,
        }

        let w: Wrapper = toml::from_str("level = \"serious\"\norder = \"reversed\"").unwrap();
        assert_eq!(w.level, SeverityLevel::Serious);
        assert_eq!(w.order, LevelOrder::Reversed);
    }
}
