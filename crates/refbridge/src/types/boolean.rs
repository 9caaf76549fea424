//! Boolean singletons

use crate::foreign_type::ForeignType;
use crate::witness::TypeWitness;
use refbridge_sys as sys;

declare_foreign_type! {
    /// Foreign booleans. `true` and `false` are runtime singletons.
    #[derive(Clone)]
    pub struct Boolean;
    name = "Boolean";
    witness = TypeWitness::new("Boolean", sys::fo_boolean_get_type_id());
}

// SAFETY: Boolean singletons are never mutated. Retain and release are atomic.
unsafe impl Send for Boolean {}
unsafe impl Sync for Boolean {}

impl Boolean {
    pub fn new(value: bool) -> Option<Self> {
        unsafe { Self::retain_trusted(sys::fo_boolean_get(value)) }
    }

    pub fn value(&self) -> bool {
        unsafe { sys::fo_boolean_get_value(self.as_raw()) }
    }
}
