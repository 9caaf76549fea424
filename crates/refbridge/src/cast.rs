//! Checked casts between wrapper types
//!
//! A failed cast is an ordinary outcome, reported as `None` (or the handle
//! handed back) and logged at the configured cast-failure level.

use crate::foreign_type::ForeignType;
use crate::handle::ForeignHandle;
use crate::settings;

/// Retain and wrap `handle` as `T` if its object satisfies `T`'s witness.
pub fn cast<T: ForeignType>(handle: &ForeignHandle) -> Option<T> {
    if T::witness().matches(handle) {
        Some(unsafe { T::from_handle_unchecked(handle.clone()) })
    } else {
        report_mismatch(T::NAME, || handle.type_name());
        None
    }
}

/// Consuming cast. Hands the handle back unchanged on mismatch.
pub fn downcast<T: ForeignType>(handle: ForeignHandle) -> Result<T, ForeignHandle> {
    T::from_handle(handle)
}

/// Membership test without wrapping or logging
pub fn is<T: ForeignType>(handle: &ForeignHandle) -> bool {
    T::witness().matches(handle)
}

pub(crate) fn report_mismatch(expected: &'static str, found: impl FnOnce() -> String) {
    let Some(level) = settings::cast_failure_level() else {
        return;
    };
    if log::log_enabled!(target: "refbridge::cast", level) {
        log::log!(
            target: "refbridge::cast",
            level,
            "cast to {} failed: object is {}",
            expected,
            found()
        );
    }
}
