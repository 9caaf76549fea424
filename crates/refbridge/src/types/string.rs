//! Strings and their mutable variant

use crate::error::{self, BridgeError, BridgeResult};
use crate::foreign_type::ForeignType;
use crate::handle::ForeignHandle;
use crate::witness::{self, TypeWitness};
use refbridge_sys::{self as sys, FoIndex};
use std::fmt;
use std::str::FromStr;

declare_foreign_type! {
    /// Foreign UTF-8 strings. Also accepts mutable instances.
    #[derive(Clone)]
    pub struct ForeignString;
    name = "String";
    witness = TypeWitness::new("String", sys::fo_string_get_type_id());
}

declare_foreign_type! {
    /// Foreign strings created by a mutable factory
    pub struct MutableString;
    name = "MutableString";
    witness = TypeWitness::new("MutableString", sys::fo_string_get_type_id())
        .refined(witness::mutable_instance);
}

declare_mutable_pair!(ForeignString => MutableString);

/// Copy a foreign string's contents. `None` if the object is not a string.
pub(crate) fn read_utf8(handle: &ForeignHandle) -> Option<String> {
    let mut len: FoIndex = 0;
    unsafe {
        let ptr = sys::fo_string_get_bytes_ptr(handle.as_raw(), &mut len);
        if ptr.is_null() {
            return None;
        }
        let bytes = std::slice::from_raw_parts(ptr, usize::try_from(len).unwrap_or(0));
        Some(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl ForeignString {
    pub fn new(value: &str) -> Option<Self> {
        Self::from_utf8(value.as_bytes())
    }

    /// `None` if `bytes` is not valid UTF-8
    pub fn from_utf8(bytes: &[u8]) -> Option<Self> {
        let len = FoIndex::try_from(bytes.len()).ok()?;
        unsafe { Self::adopt_trusted(sys::fo_string_create_with_bytes(bytes.as_ptr(), len)) }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        let len = unsafe { sys::fo_string_get_length(self.as_raw()) };
        usize::try_from(len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_rust_string(&self) -> String {
        read_utf8(self.as_handle()).unwrap_or_default()
    }

    /// A new mutable string with the same contents
    pub fn to_mutable(&self) -> Option<MutableString> {
        unsafe { MutableString::adopt_trusted(sys::fo_string_create_mutable_copy(self.as_raw())) }
    }
}

impl FromStr for ForeignString {
    type Err = BridgeError;

    fn from_str(s: &str) -> BridgeResult<Self> {
        Self::new(s).ok_or_else(|| BridgeError::foreign("fo_string_create_with_bytes"))
    }
}

impl fmt::Display for ForeignString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rust_string())
    }
}

impl MutableString {
    pub fn new() -> Option<Self> {
        unsafe { Self::adopt_trusted(sys::fo_string_create_mutable()) }
    }

    pub fn with_contents(value: &str) -> Option<Self> {
        let mut string = Self::new()?;
        string.push_str(value).ok()?;
        Some(string)
    }

    pub fn push_str(&mut self, value: &str) -> BridgeResult<()> {
        let len = FoIndex::try_from(value.len())
            .map_err(|_| BridgeError::foreign("fo_string_append_bytes"))?;
        let appended =
            unsafe { sys::fo_string_append_bytes(self.as_raw(), value.as_ptr(), len) };
        error::check(appended, "fo_string_append_bytes")
    }
}

impl fmt::Display for MutableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}
