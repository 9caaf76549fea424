//! Keyed containers and their mutable variant

use crate::collection::{Elements, Entries};
use crate::error::{self, BridgeResult};
use crate::foreign_type::ForeignType;
use crate::types::ForeignObject;
use crate::witness::{self, TypeWitness};
use refbridge_sys::{self as sys, FoIndex, FoTypeRef};
use std::ptr;

declare_foreign_type! {
    /// Key-value mapping between foreign objects, enumerated in insertion
    /// order. Also accepts mutable instances.
    #[derive(Clone)]
    pub struct Dictionary;
    name = "Dictionary";
    witness = TypeWitness::new("Dictionary", sys::fo_dictionary_get_type_id());
}

declare_foreign_type! {
    /// Dictionaries created by a mutable factory
    pub struct MutableDictionary;
    name = "MutableDictionary";
    witness = TypeWitness::new("MutableDictionary", sys::fo_dictionary_get_type_id())
        .refined(witness::mutable_instance);
}

declare_mutable_pair!(Dictionary => MutableDictionary);

impl Dictionary {
    /// New immutable dictionary. A later pair replaces an earlier one with
    /// an equal key.
    pub fn from_pairs<'a, K, V, I>(pairs: I) -> Option<Self>
    where
        K: ForeignType + 'a,
        V: ForeignType + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        let (keys, values): (Vec<FoTypeRef>, Vec<FoTypeRef>) = pairs
            .into_iter()
            .map(|(key, value)| (key.as_raw(), value.as_raw()))
            .unzip();
        let count = FoIndex::try_from(keys.len()).ok()?;
        unsafe {
            Self::adopt_trusted(sys::fo_dictionary_create(
                keys.as_ptr(),
                values.as_ptr(),
                count,
            ))
        }
    }

    pub fn len(&self) -> usize {
        let count = unsafe { sys::fo_dictionary_get_count(self.as_raw()) };
        usize::try_from(count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get<K: ForeignType>(&self, key: &K) -> Option<ForeignObject> {
        unsafe {
            ForeignObject::retain_trusted(sys::fo_dictionary_get_value(
                self.as_raw(),
                key.as_raw(),
            ))
        }
    }

    /// Value for `key`, if present and a `T`
    pub fn get_as<T: ForeignType, K: ForeignType>(&self, key: &K) -> Option<T> {
        self.get(key)?.downcast().ok()
    }

    pub fn contains_key<K: ForeignType>(&self, key: &K) -> bool {
        unsafe { sys::fo_dictionary_contains_key(self.as_raw(), key.as_raw()) }
    }

    /// Snapshot traversal of the current entries
    pub fn entries(&self) -> Entries {
        let dict = self.as_raw();
        unsafe {
            Entries::snapshot(self.len(), |index| {
                let mut key: FoTypeRef = ptr::null();
                let mut value: FoTypeRef = ptr::null();
                let index = FoIndex::try_from(index).ok()?;
                sys::fo_dictionary_get_entry_at_index(dict, index, &mut key, &mut value)
                    .then_some((key, value))
            })
        }
    }

    pub fn keys(&self) -> Elements {
        self.entries().keys()
    }

    pub fn values(&self) -> Elements {
        self.entries().values()
    }

    /// A new mutable dictionary with the same entries
    pub fn to_mutable(&self) -> Option<MutableDictionary> {
        unsafe {
            MutableDictionary::adopt_trusted(sys::fo_dictionary_create_mutable_copy(self.as_raw()))
        }
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (ForeignObject, ForeignObject);
    type IntoIter = Entries;

    fn into_iter(self) -> Entries {
        self.entries()
    }
}

impl<'a> IntoIterator for &'a MutableDictionary {
    type Item = (ForeignObject, ForeignObject);
    type IntoIter = Entries;

    fn into_iter(self) -> Entries {
        self.entries()
    }
}

impl MutableDictionary {
    pub fn new() -> Option<Self> {
        unsafe { Self::adopt_trusted(sys::fo_dictionary_create_mutable()) }
    }

    /// Set `value` for `key`, replacing any existing value
    pub fn insert<K: ForeignType, V: ForeignType>(&mut self, key: &K, value: &V) -> BridgeResult<()> {
        let set = unsafe { sys::fo_dictionary_set_value(self.as_raw(), key.as_raw(), value.as_raw()) };
        error::check(set, "fo_dictionary_set_value")
    }

    /// Returns whether the key was present
    pub fn remove<K: ForeignType>(&mut self, key: &K) -> bool {
        unsafe { sys::fo_dictionary_remove_value(self.as_raw(), key.as_raw()) }
    }

    pub fn clear(&mut self) -> BridgeResult<()> {
        let cleared = unsafe { sys::fo_dictionary_remove_all_values(self.as_raw()) };
        error::check(cleared, "fo_dictionary_remove_all_values")
    }
}
