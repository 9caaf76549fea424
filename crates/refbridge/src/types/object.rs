//! Untyped foreign objects

use crate::cast;
use crate::error::{BridgeError, BridgeResult};
use crate::foreign_type::ForeignType;
use crate::handle::ForeignHandle;
use crate::witness::{self, TypeWitness};

declare_foreign_type! {
    /// Any foreign object. The common currency of heterogeneous
    /// collections; narrow it with [`ForeignObject::cast`].
    #[derive(Clone)]
    pub struct ForeignObject;
    name = "Object";
    witness = TypeWitness::any("Object");
}

impl ForeignObject {
    /// Every live handle is a valid object
    pub fn new(handle: ForeignHandle) -> Self {
        Self(handle)
    }

    /// A new reference to the same object as `T`, if it is one
    pub fn cast<T: ForeignType>(&self) -> Option<T> {
        cast::cast(self.as_handle())
    }

    /// Consuming cast. Returns `self` unchanged on mismatch.
    pub fn downcast<T: ForeignType>(self) -> Result<T, Self> {
        cast::downcast(self.0).map_err(Self)
    }

    /// Like [`ForeignObject::cast`], but reports what was found instead
    pub fn require<T: ForeignType>(&self) -> BridgeResult<T> {
        self.cast()
            .ok_or_else(|| BridgeError::type_mismatch(T::NAME, self.type_name()))
    }

    pub fn is<T: ForeignType>(&self) -> bool {
        cast::is::<T>(self.as_handle())
    }

    /// Runtime name of the object's type
    pub fn type_name(&self) -> String {
        self.0.type_name()
    }

    /// Most specific registered witness for this object
    pub fn classify(&self) -> Option<&'static TypeWitness> {
        witness::classify(self.as_handle())
    }
}

impl From<ForeignHandle> for ForeignObject {
    fn from(handle: ForeignHandle) -> Self {
        Self::new(handle)
    }
}

impl std::fmt::Display for ForeignObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description())
    }
}
