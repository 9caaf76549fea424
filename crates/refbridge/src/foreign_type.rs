//! The typed wrapper trait
//!
//! Every wrapper is a `#[repr(transparent)]` newtype over a
//! [`ForeignHandle`] whose object is known to satisfy the wrapper's
//! witness. Wrappers are declared with [`crate::declare_foreign_type!`].

use crate::cast;
use crate::handle::ForeignHandle;
use crate::types::ForeignObject;
use crate::witness::TypeWitness;
use refbridge_sys::{self as sys, FoTypeRef};

pub trait ForeignType: Sized {
    /// Name used in diagnostics
    const NAME: &'static str;

    /// The wrapper's witness, initialized on first use
    fn witness() -> &'static TypeWitness;

    /// Wrap a handle without checking it.
    ///
    /// # Safety
    ///
    /// The handle's object must satisfy [`ForeignType::witness`].
    unsafe fn from_handle_unchecked(handle: ForeignHandle) -> Self;

    fn as_handle(&self) -> &ForeignHandle;

    fn into_handle(self) -> ForeignHandle;

    /// Checked wrap. Hands the handle back on mismatch.
    fn from_handle(handle: ForeignHandle) -> Result<Self, ForeignHandle> {
        if Self::witness().matches(&handle) {
            Ok(unsafe { Self::from_handle_unchecked(handle) })
        } else {
            cast::report_mismatch(Self::NAME, || handle.type_name());
            Err(handle)
        }
    }

    /// Checked wrap of an owned reference. A mismatched reference is
    /// released.
    ///
    /// # Safety
    ///
    /// Same contract as [`ForeignHandle::adopt`].
    unsafe fn adopt(owned: FoTypeRef) -> Option<Self> {
        Self::from_handle(ForeignHandle::adopt(owned)?).ok()
    }

    /// Checked wrap of a borrowed reference. Nothing is retained on
    /// mismatch.
    ///
    /// # Safety
    ///
    /// Same contract as [`ForeignHandle::retain_and_wrap`].
    unsafe fn retain_and_wrap(borrowed: FoTypeRef) -> Option<Self> {
        if borrowed.is_null() {
            return None;
        }
        if !Self::witness().belongs_to(borrowed) {
            cast::report_mismatch(Self::NAME, || unsafe { raw_type_name(borrowed) });
            return None;
        }
        let handle = ForeignHandle::retain_and_wrap(borrowed)?;
        Some(Self::from_handle_unchecked(handle))
    }

    /// Wrap an owned reference produced by a factory known to return this
    /// type. Checked in debug builds only.
    ///
    /// # Safety
    ///
    /// Same contract as [`ForeignHandle::adopt`], and a non-null `owned`
    /// must satisfy the witness.
    unsafe fn adopt_trusted(owned: FoTypeRef) -> Option<Self> {
        debug_assert!(owned.is_null() || Self::witness().belongs_to(owned));
        let handle = ForeignHandle::adopt(owned)?;
        Some(Self::from_handle_unchecked(handle))
    }

    /// Borrowed counterpart of [`ForeignType::adopt_trusted`].
    ///
    /// # Safety
    ///
    /// Same contract as [`ForeignHandle::retain_and_wrap`], and a non-null
    /// `borrowed` must satisfy the witness.
    unsafe fn retain_trusted(borrowed: FoTypeRef) -> Option<Self> {
        debug_assert!(borrowed.is_null() || Self::witness().belongs_to(borrowed));
        let handle = ForeignHandle::retain_and_wrap(borrowed)?;
        Some(Self::from_handle_unchecked(handle))
    }

    fn as_raw(&self) -> FoTypeRef {
        self.as_handle().as_raw()
    }

    /// A new untyped reference to the same object
    fn as_object(&self) -> ForeignObject {
        ForeignObject::new(self.as_handle().clone())
    }

    fn into_object(self) -> ForeignObject {
        ForeignObject::new(self.into_handle())
    }

    /// Reference identity
    fn same_object<U: ForeignType>(&self, other: &U) -> bool {
        self.as_handle().same_object(other.as_handle())
    }

    fn retain_count(&self) -> usize {
        self.as_handle().retain_count()
    }

    fn description(&self) -> String {
        self.as_handle().description()
    }
}

unsafe fn raw_type_name(raw: FoTypeRef) -> String {
    let type_id = sys::fo_get_type_id(raw);
    match ForeignHandle::adopt(sys::fo_copy_type_id_description(type_id)) {
        Some(name) => crate::types::string::read_utf8(&name).unwrap_or_default(),
        None => format!("<type {}>", type_id),
    }
}
