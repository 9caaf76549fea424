//! The null singleton

use crate::foreign_type::ForeignType;
use crate::witness::TypeWitness;
use refbridge_sys as sys;

declare_foreign_type! {
    /// The foreign null singleton. Distinct from an absent reference.
    #[derive(Clone)]
    pub struct Null;
    name = "Null";
    witness = TypeWitness::new("Null", sys::fo_null_get_type_id());
}

// SAFETY: The null singleton is never mutated. Retain and release are atomic.
unsafe impl Send for Null {}
unsafe impl Sync for Null {}

impl Null {
    pub fn get() -> Option<Self> {
        unsafe { Self::retain_trusted(sys::fo_null_get()) }
    }
}
