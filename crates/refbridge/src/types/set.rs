//! Unordered sets and their mutable variant

use crate::collection::Elements;
use crate::error::{self, BridgeResult};
use crate::foreign_type::ForeignType;
use crate::types::ForeignObject;
use crate::witness::{self, TypeWitness};
use refbridge_sys::{self as sys, FoIndex, FoTypeRef};

declare_foreign_type! {
    /// Unordered collection of distinct foreign objects. Also accepts
    /// mutable instances.
    #[derive(Clone)]
    pub struct Set;
    name = "Set";
    witness = TypeWitness::new("Set", sys::fo_set_get_type_id());
}

declare_foreign_type! {
    /// Sets created by a mutable factory
    pub struct MutableSet;
    name = "MutableSet";
    witness = TypeWitness::new("MutableSet", sys::fo_set_get_type_id())
        .refined(witness::mutable_instance);
}

declare_mutable_pair!(Set => MutableSet);

impl Set {
    /// New immutable set. Equal items are stored once.
    pub fn from_items<'a, T, I>(items: I) -> Option<Self>
    where
        T: ForeignType + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let raws: Vec<FoTypeRef> = items.into_iter().map(|item| item.as_raw()).collect();
        let count = FoIndex::try_from(raws.len()).ok()?;
        unsafe { Self::adopt_trusted(sys::fo_set_create(raws.as_ptr(), count)) }
    }

    pub fn len(&self) -> usize {
        let count = unsafe { sys::fo_set_get_count(self.as_raw()) };
        usize::try_from(count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains<T: ForeignType>(&self, value: &T) -> bool {
        unsafe { sys::fo_set_contains_value(self.as_raw(), value.as_raw()) }
    }

    /// Snapshot traversal of the current members
    pub fn iter(&self) -> Elements {
        let set = self.as_raw();
        unsafe {
            Elements::snapshot(self.len(), |index| match FoIndex::try_from(index) {
                Ok(index) => sys::fo_set_get_value_at_index(set, index),
                Err(_) => std::ptr::null(),
            })
        }
    }

    pub fn to_mutable(&self) -> Option<MutableSet> {
        unsafe { MutableSet::adopt_trusted(sys::fo_set_create_mutable_copy(self.as_raw())) }
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = ForeignObject;
    type IntoIter = Elements;

    fn into_iter(self) -> Elements {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a MutableSet {
    type Item = ForeignObject;
    type IntoIter = Elements;

    fn into_iter(self) -> Elements {
        self.iter()
    }
}

impl MutableSet {
    pub fn new() -> Option<Self> {
        unsafe { Self::adopt_trusted(sys::fo_set_create_mutable()) }
    }

    /// Add `value` unless an equal member is present
    pub fn insert<T: ForeignType>(&mut self, value: &T) -> BridgeResult<()> {
        let added = unsafe { sys::fo_set_add_value(self.as_raw(), value.as_raw()) };
        error::check(added, "fo_set_add_value")
    }

    /// Returns whether an equal member was present
    pub fn remove<T: ForeignType>(&mut self, value: &T) -> bool {
        unsafe { sys::fo_set_remove_value(self.as_raw(), value.as_raw()) }
    }

    pub fn clear(&mut self) -> BridgeResult<()> {
        let cleared = unsafe { sys::fo_set_remove_all_values(self.as_raw()) };
        error::check(cleared, "fo_set_remove_all_values")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Number;

    #[test]
    fn test_deduplicates() {
        let one = Number::from_i64(1).unwrap();
        let also_one = Number::from_f64(1.0).unwrap();
        let two = Number::from_i64(2).unwrap();
        let set = Set::from_items([&one, &also_one, &two]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&also_one));
    }

    #[test]
    fn test_mutable_set() {
        let mut set = MutableSet::new().unwrap();
        let one = Number::from_i64(1).unwrap();
        set.insert(&one).unwrap();
        set.insert(&Number::from_i64(1).unwrap()).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.remove(&one));
        assert!(!set.remove(&one));
        assert_eq!(set.iter().count(), 0);
    }
}
