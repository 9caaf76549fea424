//! Collection traversal tests

mod common;

use common::*;
#[allow(unused_imports)]
use common::{assert_eq, assert_ne};
use refbridge::{
    Array, BridgeError, Dictionary, ForeignObject, ForeignString, ForeignType, MutableArray,
    MutableDictionary, MutableSet, MutableVariant, Number, Set,
};

// ============================================================================
// Heterogeneous arrays
// ============================================================================

#[test]
fn test_heterogeneous_traversal_with_casts() {
    let array = heterogeneous_array();
    let mut seen = Vec::new();
    for element in &array {
        if let Some(number) = element.cast::<Number>() {
            seen.push(format!("number {}", number));
        } else if let Some(text) = element.cast::<ForeignString>() {
            seen.push(format!("string {}", text));
        }
    }
    assert_eq!(seen, vec!["number 1", "string foo", "number 3.14"]);
}

#[test]
fn test_of_type_filters() {
    let array = heterogeneous_array();
    let numbers: Vec<Number> = array.iter().of_type().collect();
    assert_eq!(numbers.len(), 2);
    assert_eq!(numbers[0].to_i64(), Some(1));
    assert!(numbers[1].is_float());

    let strings: Vec<String> = array
        .iter()
        .of_type::<ForeignString>()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(strings, vec!["foo"]);
}

#[test]
fn test_description_snapshot() {
    let array = heterogeneous_array();
    insta::assert_snapshot!(array.description(), @"(1, foo, 3.14)");

    let dict = Dictionary::from_pairs([
        (&string("name").into_object(), &string("bridge").into_object()),
        (&string("items").into_object(), &array.as_object()),
    ])
    .unwrap();
    insta::assert_snapshot!(dict.description(), @"{name = bridge; items = (1, foo, 3.14)}");
}

#[test]
fn test_iterator_is_exact_size_and_double_ended() {
    let array = heterogeneous_array();
    let mut iter = array.iter();
    assert_eq!(iter.len(), 3);
    let last = iter.next_back().unwrap();
    assert_eq!(last.description(), "3.14");
    assert_eq!(iter.len(), 2);
}

// ============================================================================
// Snapshot semantics
// ============================================================================

#[test]
fn test_traversal_survives_mutation() {
    let mut array = MutableArray::new().unwrap();
    for i in 0..3 {
        array.push(&int(i)).unwrap();
    }
    let iter = array.iter();
    array.clear().unwrap();
    array.push(&string("late")).unwrap();

    let values: Vec<i64> = iter.of_type::<Number>().filter_map(|n| n.to_i64()).collect();
    assert_eq!(values, vec![0, 1, 2]);
}

#[test]
fn test_traversal_keeps_removed_elements_alive() {
    let mut array = MutableArray::new().unwrap();
    array.push(&string("only here")).unwrap();
    let weak = array.get(0).unwrap().as_handle().downgrade().unwrap();

    let mut iter = array.iter();
    array.remove(0).unwrap();
    assert!(weak.is_alive());

    let element = iter.next().unwrap();
    assert_eq!(element.description(), "only here");
    drop(element);
    drop(iter);
    assert!(!weak.is_alive());
}

#[test]
fn test_abandoned_traversal_releases() {
    let start = start_audit();
    {
        let array = heterogeneous_array();
        let mut iter = array.iter();
        let _first = iter.next();
    }
    assert_balanced_since(&start);
}

#[test]
fn test_weak_handle_scenario() {
    let array = heterogeneous_array();
    let first = array.get(0).unwrap();
    let weak = first.as_handle().downgrade().unwrap();
    drop(first);

    let before = array.retain_count();
    let upgraded = weak.upgrade().map(ForeignObject::new).unwrap();
    assert_eq!(upgraded.cast::<Number>().and_then(|n| n.to_i64()), Some(1));
    assert_eq!(array.retain_count(), before);

    drop(upgraded);
    drop(array);
    assert!(!weak.is_alive());
}

#[test]
fn test_mutable_sequence_keeps_its_element_alive() {
    let mut array = MutableArray::new().unwrap();
    let element = string("element");
    let weak = element.as_handle().downgrade().unwrap();
    array.push(&element).unwrap();
    assert_eq!(array.iter().count(), 1);

    drop(element);
    assert!(weak.is_alive());
    let held = weak.upgrade().map(ForeignObject::new).unwrap();
    assert_eq!(held.description(), "element");
    drop(held);

    drop(array);
    assert!(!weak.is_alive());
}

// ============================================================================
// Self-containment
// ============================================================================

#[test]
fn test_array_cannot_contain_itself() {
    let mut array = MutableArray::new().unwrap();
    array.push(&int(1)).unwrap();
    let alias = array.to_immutable();

    assert!(matches!(
        array.push(&alias),
        Err(BridgeError::ForeignOperationFailure { .. })
    ));
    assert!(array.insert(0, &alias).is_err());
    assert!(array.set(0, &alias).is_err());

    assert_eq!(array.len(), 1);
    assert_eq!(array.description(), "(1)");
    assert_eq!(array, alias);
}

#[test]
fn test_indirect_cycles_are_rejected() {
    let mut outer = MutableArray::new().unwrap();
    let mut inner = MutableDictionary::new().unwrap();
    outer.push(&inner.as_object()).unwrap();

    let parent = outer.as_object();
    assert!(inner.insert(&string("parent"), &parent).is_err());
    assert!(inner.insert(&parent, &int(1)).is_err());
    assert!(inner.is_empty());

    let mut set = MutableSet::new().unwrap();
    let itself = set.as_object();
    assert!(set.insert(&itself).is_err());
    assert!(!set.remove(&itself));

    assert_eq!(outer.description(), "({})");
    assert_eq!(outer, outer.to_immutable());
}

// ============================================================================
// Dictionaries and sets
// ============================================================================

#[test]
fn test_dictionary_entries() {
    let mut dict = MutableDictionary::new().unwrap();
    dict.insert(&string("a"), &int(1)).unwrap();
    dict.insert(&string("b"), &int(2)).unwrap();

    let pairs: Vec<(String, i64)> = dict
        .entries()
        .filter_map(|(k, v)| Some((k.cast::<ForeignString>()?.to_string(), v.cast::<Number>()?.to_i64()?)))
        .collect();
    assert_eq!(pairs, vec![("a".to_string(), 1), ("b".to_string(), 2)]);

    let values: Vec<Number> = dict.values().of_type().collect();
    assert_eq!(values.len(), 2);
}

#[test]
fn test_dictionary_entries_snapshot() {
    let mut dict = MutableDictionary::new().unwrap();
    dict.insert(&string("k"), &int(1)).unwrap();
    let entries = dict.entries();
    dict.clear().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(dict.is_empty());
}

#[test]
fn test_set_traversal() {
    let mut set = MutableSet::new().unwrap();
    for i in [3, 1, 3, 2] {
        set.insert(&int(i)).unwrap();
    }
    let mut values: Vec<i64> = set.iter().of_type::<Number>().filter_map(|n| n.to_i64()).collect();
    values.sort_unstable();
    assert_eq!(values, vec![1, 2, 3]);

    let frozen: Set = set.into();
    assert_eq!((&frozen).into_iter().count(), 3);
}

#[test]
fn test_empty_collections() {
    assert_eq!(Array::empty().unwrap().iter().count(), 0);
    let empty: Dictionary = MutableDictionary::new().unwrap().into();
    assert_eq!(empty.entries().count(), 0);
    assert_eq!(empty.keys().count(), 0);
}
