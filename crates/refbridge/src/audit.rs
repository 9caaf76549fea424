//! Ownership ledger
//!
//! Counts the reference-unit events performed by bridge handles on the
//! current thread. A handle created on one thread and dropped on another
//! shows up in both ledgers, so balance checks belong in single-threaded
//! test code.
//!
//! Recording is controlled by [`crate::settings::BridgeSettings::audit_ownership`].

use crate::settings;
use std::cell::Cell;

thread_local! {
    static LEDGER: Cell<OwnershipReport> = Cell::new(OwnershipReport::default());
}

/// Event counters for the current thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnershipReport {
    /// Owned references taken over without retaining
    pub adopted: u64,
    /// References retained (borrowed wraps and clones)
    pub retained: u64,
    /// References released by dropped handles
    pub released: u64,
    /// References handed back out through `into_raw`
    pub disowned: u64,
}

impl OwnershipReport {
    /// Reference units currently held by bridge handles
    pub fn live(&self) -> i64 {
        (self.adopted + self.retained) as i64 - (self.released + self.disowned) as i64
    }

    /// Events recorded after `earlier` was taken
    pub fn since(&self, earlier: &OwnershipReport) -> OwnershipReport {
        OwnershipReport {
            adopted: self.adopted.saturating_sub(earlier.adopted),
            retained: self.retained.saturating_sub(earlier.retained),
            released: self.released.saturating_sub(earlier.released),
            disowned: self.disowned.saturating_sub(earlier.disowned),
        }
    }

    /// Every unit acquired was given up again
    pub fn is_balanced(&self) -> bool {
        self.live() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Adopt,
    Retain,
    Release,
    Disown,
}

pub(crate) fn record(event: Event) {
    if !settings::audit_ownership() {
        return;
    }
    LEDGER.with(|ledger| {
        let mut report = ledger.get();
        match event {
            Event::Adopt => report.adopted += 1,
            Event::Retain => report.retained += 1,
            Event::Release => report.released += 1,
            Event::Disown => report.disowned += 1,
        }
        ledger.set(report);
    });
}

/// Snapshot of the current thread's ledger
pub fn report() -> OwnershipReport {
    LEDGER.with(Cell::get)
}

/// Clear the current thread's ledger
pub fn reset() {
    LEDGER.with(|ledger| ledger.set(OwnershipReport::default()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_and_since() {
        let before = OwnershipReport {
            adopted: 1,
            retained: 2,
            released: 1,
            disowned: 0,
        };
        let after = OwnershipReport {
            adopted: 2,
            retained: 4,
            released: 4,
            disowned: 1,
        };
        assert_eq!(before.live(), 2);
        let delta = after.since(&before);
        assert_eq!(delta.adopted, 1);
        assert_eq!(delta.retained, 2);
        assert_eq!(delta.live(), 0);
        assert!(delta.is_balanced());
    }

    #[test]
    fn test_reset_clears_thread_ledger() {
        settings::apply(settings::BridgeSettings {
            audit_ownership: true,
            ..settings::current()
        });
        record(Event::Adopt);
        assert!(report().adopted >= 1);
        reset();
        assert_eq!(report(), OwnershipReport::default());
    }
}
