//! Integer and floating-point numbers

use crate::error::BridgeError;
use crate::foreign_type::ForeignType;
use crate::witness::TypeWitness;
use refbridge_sys as sys;
use std::fmt;

declare_foreign_type! {
    /// Foreign numbers, stored either as a 64-bit integer or a double.
    /// Integer and float values compare equal when numerically equal.
    #[derive(Clone)]
    pub struct Number;
    name = "Number";
    witness = TypeWitness::new("Number", sys::fo_number_get_type_id());
}

// SAFETY: The runtime has no mutable numbers. Retain and release are atomic.
unsafe impl Send for Number {}
unsafe impl Sync for Number {}

impl Number {
    pub fn from_i64(value: i64) -> Option<Self> {
        unsafe { Self::adopt_trusted(sys::fo_number_create_i64(value)) }
    }

    pub fn from_f64(value: f64) -> Option<Self> {
        unsafe { Self::adopt_trusted(sys::fo_number_create_f64(value)) }
    }

    pub fn is_float(&self) -> bool {
        unsafe { sys::fo_number_is_float(self.as_raw()) }
    }

    /// The value as an integer, if it is one exactly
    pub fn to_i64(&self) -> Option<i64> {
        let mut value = 0i64;
        unsafe { sys::fo_number_get_i64(self.as_raw(), &mut value) }.then_some(value)
    }

    /// The value as a double. Integers beyond 2^53 round.
    pub fn to_f64(&self) -> f64 {
        let mut value = 0f64;
        unsafe { sys::fo_number_get_f64(self.as_raw(), &mut value) }
            .then_some(value)
            .unwrap_or_default()
    }
}

impl TryFrom<i64> for Number {
    type Error = BridgeError;

    fn try_from(value: i64) -> Result<Self, BridgeError> {
        Self::from_i64(value).ok_or_else(|| BridgeError::foreign("fo_number_create_i64"))
    }
}

impl TryFrom<f64> for Number {
    type Error = BridgeError;

    fn try_from(value: f64) -> Result<Self, BridgeError> {
        Self::from_f64(value).ok_or_else(|| BridgeError::foreign("fo_number_create_f64"))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
