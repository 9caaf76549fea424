//! Type witnesses and the witness table
//!
//! A [`TypeWitness`] answers "does this foreign object belong to wrapper
//! type `T`?". Most witnesses compare the object's runtime type identifier;
//! mutable variants add a refinement on top, since a mutable object shares
//! its immutable partner's identifier.
//!
//! Every wrapper type initializes its witness lazily on first use, exactly
//! once per process, and registers it here. The table is append-only;
//! registered witnesses live for the rest of the process.

use crate::handle::ForeignHandle;
use refbridge_sys::{self as sys, FoTypeID, FoTypeRef};
use std::sync::{Mutex, PoisonError};

/// Extra membership test applied after the type identifier matches
pub type Refinement = unsafe fn(FoTypeRef) -> bool;

#[derive(Debug)]
pub struct TypeWitness {
    name: &'static str,
    type_id: Option<FoTypeID>,
    refinement: Option<Refinement>,
}

impl TypeWitness {
    /// Witness matching every object with the given runtime type identifier
    pub fn new(name: &'static str, type_id: FoTypeID) -> Self {
        Self {
            name,
            type_id: Some(type_id),
            refinement: None,
        }
    }

    /// Witness matching every non-null object
    pub fn any(name: &'static str) -> Self {
        Self {
            name,
            type_id: None,
            refinement: None,
        }
    }

    /// Narrow the witness with an extra runtime test
    pub fn refined(mut self, refinement: Refinement) -> Self {
        self.refinement = Some(refinement);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> Option<FoTypeID> {
        self.type_id
    }

    pub fn is_refined(&self) -> bool {
        self.refinement.is_some()
    }

    /// Membership test on a raw reference. Null never belongs.
    ///
    /// # Safety
    ///
    /// `raw` must be null or a live foreign object.
    pub unsafe fn belongs_to(&self, raw: FoTypeRef) -> bool {
        if raw.is_null() {
            return false;
        }
        if let Some(expected) = self.type_id {
            if sys::fo_get_type_id(raw) != expected {
                return false;
            }
        }
        match self.refinement {
            Some(refine) => refine(raw),
            None => true,
        }
    }

    /// Membership test on a live handle
    pub fn matches(&self, handle: &ForeignHandle) -> bool {
        unsafe { self.belongs_to(handle.as_raw()) }
    }

    fn specificity(&self) -> u8 {
        u8::from(self.type_id.is_some()) + u8::from(self.refinement.is_some())
    }
}

/// Refinement accepting only objects created by a mutable factory
///
/// # Safety
///
/// `raw` must be a live foreign object.
pub unsafe fn mutable_instance(raw: FoTypeRef) -> bool {
    sys::fo_is_mutable(raw)
}

static TABLE: Mutex<Vec<&'static TypeWitness>> = Mutex::new(Vec::new());

/// Add a witness to the table. Called once per wrapper type from its lazy
/// initializer.
pub fn register(witness: TypeWitness) -> &'static TypeWitness {
    let witness: &'static TypeWitness = Box::leak(Box::new(witness));
    log::debug!(
        target: "refbridge::witness",
        "registered witness {} (type id {:?}, refined: {})",
        witness.name,
        witness.type_id,
        witness.is_refined()
    );
    TABLE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(witness);
    witness
}

/// All witnesses registered so far, in registration order
pub fn registered() -> Vec<&'static TypeWitness> {
    TABLE.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

/// The most specific registered witness the handle satisfies
pub fn classify(handle: &ForeignHandle) -> Option<&'static TypeWitness> {
    registered()
        .into_iter()
        .filter(|w| w.matches(handle))
        .max_by_key(|w| w.specificity())
}
