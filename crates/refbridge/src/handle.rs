//! Owning handles to foreign objects
//!
//! A [`ForeignHandle`] holds exactly one reference unit of a foreign
//! object. It is created from either side of the ownership convention:
//!
//! - [`ForeignHandle::adopt`] takes an *owned* reference (one returned by a
//!   `*_create*` or `*_copy*` function) without retaining it.
//! - [`ForeignHandle::retain_and_wrap`] takes a *borrowed* reference (one
//!   returned by a `*_get*` function) and retains it first.
//!
//! Dropping the handle releases its unit. Cloning retains a new one.
//!
//! # Threads
//!
//! Reference counting in the foreign runtime is atomic, but the contents of
//! a mutable instance are not synchronized. Any handle may alias a mutable
//! instance (through `to_immutable`, `as_object` or a plain clone), so
//! handles are neither `Send` nor `Sync`. Wrappers whose objects can never
//! be mutable ([`crate::Null`], [`crate::Boolean`], [`crate::Number`],
//! [`crate::Data`]) opt back in.
//!
//! ```compile_fail
//! use refbridge::{MutableArray, MutableVariant};
//!
//! let array = MutableArray::new().unwrap();
//! let alias = array.to_immutable();
//! std::thread::spawn(move || alias.len());
//! ```

use crate::audit::{self, Event};
use crate::settings;
use crate::types::string;
use refbridge_sys::{self as sys, FoTypeID, FoTypeRef, FoWeakRef};
use std::ffi::c_void;
use std::fmt;
use std::mem;
use std::ptr::NonNull;

/// One owned reference unit of a foreign object. Not `Send` or `Sync`,
/// see the module docs.
pub struct ForeignHandle {
    raw: NonNull<c_void>,
}

fn trace_refcount(operation: &str, raw: FoTypeRef) {
    if settings::trace_refcounts() {
        log::trace!(
            target: "refbridge::refcount",
            "{} {:p} (count {})",
            operation,
            raw,
            unsafe { sys::fo_get_retain_count(raw) }
        );
    }
}

impl ForeignHandle {
    /// Take over an owned reference. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// `owned` must be null or a live foreign object carrying a reference
    /// unit that the caller owns and transfers to the handle.
    pub unsafe fn adopt(owned: FoTypeRef) -> Option<Self> {
        let raw = NonNull::new(owned as *mut c_void)?;
        audit::record(Event::Adopt);
        trace_refcount("adopt", owned);
        Some(Self { raw })
    }

    /// Retain a borrowed reference and wrap it. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// `borrowed` must be null or a live foreign object.
    pub unsafe fn retain_and_wrap(borrowed: FoTypeRef) -> Option<Self> {
        let raw = NonNull::new(borrowed as *mut c_void)?;
        sys::fo_retain(borrowed);
        audit::record(Event::Retain);
        trace_refcount("retain", borrowed);
        Some(Self { raw })
    }

    /// Borrowed raw reference, valid while `self` lives
    pub fn as_raw(&self) -> FoTypeRef {
        self.raw.as_ptr()
    }

    /// Give up the handle without releasing. The caller now owns the unit.
    pub fn into_raw(self) -> FoTypeRef {
        let raw = self.as_raw();
        mem::forget(self);
        audit::record(Event::Disown);
        raw
    }

    /// Reference identity, not value equality
    pub fn same_object(&self, other: &ForeignHandle) -> bool {
        self.raw == other.raw
    }

    pub fn type_id(&self) -> FoTypeID {
        unsafe { sys::fo_get_type_id(self.as_raw()) }
    }

    pub fn is_mutable(&self) -> bool {
        unsafe { sys::fo_is_mutable(self.as_raw()) }
    }

    /// Current reference count. Diagnostic only; other threads may change it
    /// at any time.
    pub fn retain_count(&self) -> usize {
        let count = unsafe { sys::fo_get_retain_count(self.as_raw()) };
        usize::try_from(count).unwrap_or(0)
    }

    /// Runtime name of the object's type
    pub fn type_name(&self) -> String {
        let type_id = self.type_id();
        unsafe { copy_owned_string(sys::fo_copy_type_id_description(type_id)) }
            .unwrap_or_else(|| format!("<type {}>", type_id))
    }

    /// Runtime description of the object
    pub fn description(&self) -> String {
        unsafe { copy_owned_string(sys::fo_copy_description(self.as_raw())) }.unwrap_or_default()
    }

    /// Create a weak reference that does not keep the object alive
    pub fn downgrade(&self) -> Option<WeakHandle> {
        let raw = unsafe { sys::fo_weak_create(self.as_raw()) };
        NonNull::new(raw).map(|raw| WeakHandle { raw })
    }
}

/// Read an owned foreign string into a Rust string and release it.
unsafe fn copy_owned_string(owned: FoTypeRef) -> Option<String> {
    let handle = ForeignHandle::adopt(owned)?;
    string::read_utf8(&handle)
}

impl Clone for ForeignHandle {
    fn clone(&self) -> Self {
        unsafe {
            sys::fo_retain(self.as_raw());
        }
        audit::record(Event::Retain);
        trace_refcount("retain", self.as_raw());
        Self { raw: self.raw }
    }
}

impl Drop for ForeignHandle {
    fn drop(&mut self) {
        trace_refcount("release", self.as_raw());
        audit::record(Event::Release);
        unsafe { sys::fo_release(self.as_raw()) }
    }
}

impl fmt::Debug for ForeignHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignHandle")
            .field("ptr", &self.raw)
            .field("type", &self.type_name())
            .finish()
    }
}

/// Weak reference to a foreign object. Stays on its thread for the same
/// reason as [`ForeignHandle`]: upgrading may yield a mutable instance.
pub struct WeakHandle {
    raw: NonNull<c_void>,
}

impl WeakHandle {
    fn as_raw(&self) -> FoWeakRef {
        self.raw.as_ptr()
    }

    /// Whether the target still exists
    pub fn is_alive(&self) -> bool {
        unsafe { sys::fo_weak_is_alive(self.as_raw()) }
    }

    /// A strong handle to the target, if it still exists
    pub fn upgrade(&self) -> Option<ForeignHandle> {
        unsafe { ForeignHandle::adopt(sys::fo_weak_copy_target(self.as_raw())) }
    }
}

impl Drop for WeakHandle {
    fn drop(&mut self) {
        unsafe { sys::fo_weak_destroy(self.as_raw()) }
    }
}

impl fmt::Debug for WeakHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
