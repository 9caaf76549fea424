//! Immutable byte buffers

use crate::foreign_type::ForeignType;
use crate::witness::TypeWitness;
use refbridge_sys::{self as sys, FoIndex};

declare_foreign_type! {
    /// Immutable foreign byte buffers
    #[derive(Clone)]
    pub struct Data;
    name = "Data";
    witness = TypeWitness::new("Data", sys::fo_data_get_type_id());
}

// SAFETY: The runtime has no mutable data objects. Retain and release are atomic.
unsafe impl Send for Data {}
unsafe impl Sync for Data {}

impl Data {
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let len = FoIndex::try_from(bytes.len()).ok()?;
        unsafe { Self::adopt_trusted(sys::fo_data_create(bytes.as_ptr(), len)) }
    }

    pub fn len(&self) -> usize {
        let len = unsafe { sys::fo_data_get_length(self.as_raw()) };
        usize::try_from(len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes borrowed from the foreign buffer, valid while `self` lives
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.len();
        unsafe {
            let ptr = sys::fo_data_get_bytes_ptr(self.as_raw());
            if ptr.is_null() || len == 0 {
                return &[];
            }
            std::slice::from_raw_parts(ptr, len)
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}
