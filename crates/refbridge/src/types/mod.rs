//! Built-in wrapper types

mod array;
mod boolean;
mod data;
mod dictionary;
mod null;
mod number;
mod object;
mod set;
pub(crate) mod string;

pub use array::{Array, MutableArray};
pub use boolean::Boolean;
pub use data::Data;
pub use dictionary::{Dictionary, MutableDictionary};
pub use null::Null;
pub use number::Number;
pub use object::ForeignObject;
pub use set::{MutableSet, Set};
pub use string::{ForeignString, MutableString};

use crate::foreign_type::ForeignType;

/// Initialize the witnesses of every built-in wrapper type.
///
/// Witnesses are otherwise initialized on first use. Registering them up
/// front makes [`crate::witness::classify`] aware of all built-in types.
pub fn register_builtin_witnesses() {
    ForeignObject::witness();
    Null::witness();
    Boolean::witness();
    Number::witness();
    ForeignString::witness();
    MutableString::witness();
    Data::witness();
    Array::witness();
    MutableArray::witness();
    Dictionary::witness();
    MutableDictionary::witness();
    Set::witness();
    MutableSet::witness();
}
