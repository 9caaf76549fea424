//! Ordered sequences and their mutable variant

use crate::collection::Elements;
use crate::error::{self, BridgeError, BridgeResult};
use crate::foreign_type::ForeignType;
use crate::types::ForeignObject;
use crate::witness::{self, TypeWitness};
use refbridge_sys::{self as sys, FoIndex, FoTypeRef};

declare_foreign_type! {
    /// Ordered sequence of foreign objects. Also accepts mutable instances.
    #[derive(Clone)]
    pub struct Array;
    name = "Array";
    witness = TypeWitness::new("Array", sys::fo_array_get_type_id());
}

declare_foreign_type! {
    /// Arrays created by a mutable factory
    pub struct MutableArray;
    name = "MutableArray";
    witness = TypeWitness::new("MutableArray", sys::fo_array_get_type_id())
        .refined(witness::mutable_instance);
}

declare_mutable_pair!(Array => MutableArray);

fn to_index(index: usize) -> FoIndex {
    FoIndex::try_from(index).unwrap_or(FoIndex::MAX)
}

impl Array {
    /// New immutable array holding a reference to each item
    pub fn from_items<'a, T, I>(items: I) -> Option<Self>
    where
        T: ForeignType + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let raws: Vec<FoTypeRef> = items.into_iter().map(|item| item.as_raw()).collect();
        let count = FoIndex::try_from(raws.len()).ok()?;
        unsafe { Self::adopt_trusted(sys::fo_array_create(raws.as_ptr(), count)) }
    }

    pub fn empty() -> Option<Self> {
        Self::from_items::<ForeignObject, _>([])
    }

    pub fn len(&self) -> usize {
        let count = unsafe { sys::fo_array_get_count(self.as_raw()) };
        usize::try_from(count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<ForeignObject> {
        unsafe {
            ForeignObject::retain_trusted(sys::fo_array_get_value_at_index(
                self.as_raw(),
                to_index(index),
            ))
        }
    }

    /// Element at `index`, if it is a `T`
    pub fn get_as<T: ForeignType>(&self, index: usize) -> Option<T> {
        self.get(index)?.downcast().ok()
    }

    pub fn contains<T: ForeignType>(&self, value: &T) -> bool {
        unsafe { sys::fo_array_contains_value(self.as_raw(), value.as_raw()) }
    }

    /// Snapshot traversal of the current elements
    pub fn iter(&self) -> Elements {
        let array = self.as_raw();
        unsafe {
            Elements::snapshot(self.len(), |index| {
                sys::fo_array_get_value_at_index(array, to_index(index))
            })
        }
    }

    /// A new mutable array with the same elements
    pub fn to_mutable(&self) -> Option<MutableArray> {
        unsafe { MutableArray::adopt_trusted(sys::fo_array_create_mutable_copy(self.as_raw())) }
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = ForeignObject;
    type IntoIter = Elements;

    fn into_iter(self) -> Elements {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a MutableArray {
    type Item = ForeignObject;
    type IntoIter = Elements;

    fn into_iter(self) -> Elements {
        self.iter()
    }
}

impl MutableArray {
    pub fn new() -> Option<Self> {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Option<Self> {
        let capacity = FoIndex::try_from(capacity).ok()?;
        unsafe { Self::adopt_trusted(sys::fo_array_create_mutable(capacity)) }
    }

    pub fn push<T: ForeignType>(&mut self, value: &T) -> BridgeResult<()> {
        let appended = unsafe { sys::fo_array_append_value(self.as_raw(), value.as_raw()) };
        error::check(appended, "fo_array_append_value")
    }

    /// Insert at `index`, shifting later elements. `index == len` appends.
    pub fn insert<T: ForeignType>(&mut self, index: usize, value: &T) -> BridgeResult<()> {
        error::check_index(index, self.len() + 1)?;
        let inserted = unsafe {
            sys::fo_array_insert_value_at_index(self.as_raw(), to_index(index), value.as_raw())
        };
        error::check(inserted, "fo_array_insert_value_at_index")
    }

    pub fn set<T: ForeignType>(&mut self, index: usize, value: &T) -> BridgeResult<()> {
        error::check_index(index, self.len())?;
        let replaced = unsafe {
            sys::fo_array_set_value_at_index(self.as_raw(), to_index(index), value.as_raw())
        };
        error::check(replaced, "fo_array_set_value_at_index")
    }

    /// Remove and return the element at `index`
    pub fn remove(&mut self, index: usize) -> BridgeResult<ForeignObject> {
        error::check_index(index, self.len())?;
        let removed = self
            .get(index)
            .ok_or_else(|| BridgeError::foreign("fo_array_get_value_at_index"))?;
        let ok = unsafe { sys::fo_array_remove_value_at_index(self.as_raw(), to_index(index)) };
        error::check(ok, "fo_array_remove_value_at_index")?;
        Ok(removed)
    }

    pub fn clear(&mut self) -> BridgeResult<()> {
        let cleared = unsafe { sys::fo_array_remove_all_values(self.as_raw()) };
        error::check(cleared, "fo_array_remove_all_values")
    }
}
