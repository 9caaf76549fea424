//! Snapshot traversal of foreign collections
//!
//! Starting a traversal retains every element present at that moment.
//! Elements are then wrapped one at a time as the iterator advances.
//! Mutating the collection afterwards does not affect a traversal in
//! progress, and every element stays alive until yielded or until the
//! iterator is dropped.

use crate::foreign_type::ForeignType;
use crate::handle::ForeignHandle;
use crate::types::ForeignObject;
use refbridge_sys::FoTypeRef;
use std::iter::FusedIterator;
use std::vec;

/// Elements of an array or set, or the keys or values of a dictionary
pub struct Elements {
    handles: vec::IntoIter<ForeignHandle>,
}

impl Elements {
    /// Retain the elements at positions `0..count`. Stops early if the
    /// collection reports a null element.
    ///
    /// # Safety
    ///
    /// `element_at` must return null or a live borrowed reference.
    pub(crate) unsafe fn snapshot(count: usize, element_at: impl Fn(usize) -> FoTypeRef) -> Self {
        let mut handles = Vec::with_capacity(count);
        for index in 0..count {
            match ForeignHandle::retain_and_wrap(element_at(index)) {
                Some(handle) => handles.push(handle),
                None => break,
            }
        }
        Self::from_handles(handles)
    }

    pub(crate) fn from_handles(handles: Vec<ForeignHandle>) -> Self {
        Self {
            handles: handles.into_iter(),
        }
    }

    /// Keep only elements satisfying `T`'s witness. Elements that do not
    /// match are released as they are skipped.
    pub fn of_type<T: ForeignType>(self) -> impl Iterator<Item = T> {
        self.handles
            .filter(|handle| T::witness().matches(handle))
            .map(|handle| unsafe { T::from_handle_unchecked(handle) })
    }
}

impl Iterator for Elements {
    type Item = ForeignObject;

    fn next(&mut self) -> Option<ForeignObject> {
        self.handles.next().map(ForeignObject::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.handles.size_hint()
    }
}

impl DoubleEndedIterator for Elements {
    fn next_back(&mut self) -> Option<ForeignObject> {
        self.handles.next_back().map(ForeignObject::new)
    }
}

impl ExactSizeIterator for Elements {}

impl FusedIterator for Elements {}

/// Key-value pairs of a dictionary, in enumeration order
pub struct Entries {
    pairs: vec::IntoIter<(ForeignHandle, ForeignHandle)>,
}

impl Entries {
    /// # Safety
    ///
    /// `entry_at` must return `None` or a pair of live borrowed references.
    pub(crate) unsafe fn snapshot(
        count: usize,
        entry_at: impl Fn(usize) -> Option<(FoTypeRef, FoTypeRef)>,
    ) -> Self {
        let mut pairs = Vec::with_capacity(count);
        for index in 0..count {
            let Some((key, value)) = entry_at(index) else {
                break;
            };
            match (
                ForeignHandle::retain_and_wrap(key),
                ForeignHandle::retain_and_wrap(value),
            ) {
                (Some(key), Some(value)) => pairs.push((key, value)),
                _ => break,
            }
        }
        Self {
            pairs: pairs.into_iter(),
        }
    }

    pub fn keys(self) -> Elements {
        Elements::from_handles(self.pairs.map(|(key, _)| key).collect())
    }

    pub fn values(self) -> Elements {
        Elements::from_handles(self.pairs.map(|(_, value)| value).collect())
    }
}

impl Iterator for Entries {
    type Item = (ForeignObject, ForeignObject);

    fn next(&mut self) -> Option<Self::Item> {
        self.pairs
            .next()
            .map(|(key, value)| (ForeignObject::new(key), ForeignObject::new(value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl ExactSizeIterator for Entries {}

impl FusedIterator for Entries {}
