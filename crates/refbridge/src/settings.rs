//! Process-wide bridge settings
//!
//! Settings live in atomics so the hot paths (retain, release, cast) read
//! them without locking. They are applied from a loaded
//! [`refbridge_config::Config`] by [`crate::init`] or set directly with
//! [`apply`].

use log::{Level, LevelFilter};
use refbridge_config::Config;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

const LEVEL_OFF: usize = 0;

static AUDIT_OWNERSHIP: AtomicBool = AtomicBool::new(cfg!(debug_assertions));
static TRACE_REFCOUNTS: AtomicBool = AtomicBool::new(false);
static CAST_FAILURE_LEVEL: AtomicUsize = AtomicUsize::new(Level::Debug as usize);

/// Effective bridge settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeSettings {
    /// Record ownership events in the per-thread ledger
    pub audit_ownership: bool,
    /// Emit `log::trace!` for every retain and release
    pub trace_refcounts: bool,
    /// Level used to log failed checked casts; `None` disables it
    pub cast_failure_level: Option<Level>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            audit_ownership: cfg!(debug_assertions),
            trace_refcounts: false,
            cast_failure_level: Some(Level::Debug),
        }
    }
}

impl BridgeSettings {
    /// Resolve settings from configuration, falling back to defaults for
    /// anything not configured.
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            audit_ownership: config
                .audit_ownership()
                .unwrap_or(defaults.audit_ownership),
            trace_refcounts: config
                .trace_refcounts()
                .unwrap_or(defaults.trace_refcounts),
            cast_failure_level: config
                .cast_failures()
                .map_or(defaults.cast_failure_level, parse_level),
        }
    }
}

fn parse_level(name: &str) -> Option<Level> {
    name.parse::<LevelFilter>().ok().and_then(|f| f.to_level())
}

fn level_from_index(index: usize) -> Option<Level> {
    match index {
        1 => Some(Level::Error),
        2 => Some(Level::Warn),
        3 => Some(Level::Info),
        4 => Some(Level::Debug),
        5 => Some(Level::Trace),
        _ => None,
    }
}

/// Install new settings
pub fn apply(settings: BridgeSettings) {
    AUDIT_OWNERSHIP.store(settings.audit_ownership, Ordering::Relaxed);
    TRACE_REFCOUNTS.store(settings.trace_refcounts, Ordering::Relaxed);
    CAST_FAILURE_LEVEL.store(
        settings.cast_failure_level.map_or(LEVEL_OFF, |l| l as usize),
        Ordering::Relaxed,
    );
}

/// Currently installed settings
pub fn current() -> BridgeSettings {
    BridgeSettings {
        audit_ownership: audit_ownership(),
        trace_refcounts: trace_refcounts(),
        cast_failure_level: cast_failure_level(),
    }
}

pub(crate) fn audit_ownership() -> bool {
    AUDIT_OWNERSHIP.load(Ordering::Relaxed)
}

pub(crate) fn trace_refcounts() -> bool {
    TRACE_REFCOUNTS.load(Ordering::Relaxed)
}

pub(crate) fn cast_failure_level() -> Option<Level> {
    level_from_index(CAST_FAILURE_LEVEL.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("warn"), Some(Level::Warn));
        assert_eq!(parse_level("TRACE"), Some(Level::Trace));
        assert_eq!(parse_level("off"), None);
    }

    #[test]
    fn test_level_index_round_trip() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
            assert_eq!(level_from_index(level as usize), Some(level));
        }
        assert_eq!(level_from_index(LEVEL_OFF), None);
    }

    #[test]
    fn test_from_config_uses_defaults() {
        let settings = BridgeSettings::from_config(&Config::default());
        assert_eq!(settings, BridgeSettings::default());
    }
}
