//! Mutable and immutable pairing tests

mod common;

use common::*;
#[allow(unused_imports)]
use common::{assert_eq, assert_ne};
use refbridge::pairing;
use refbridge::{
    Array, Dictionary, ForeignType, ImmutableVariant, MutableArray, MutableDictionary,
    MutableSet, MutableString, MutableVariant, Set,
};

#[test]
fn test_upcast_is_total_and_same_object() {
    let mut mutable = MutableArray::new().unwrap();
    mutable.push(&int(1)).unwrap();
    let observer = mutable.as_object();

    let immutable: Array = pairing::upcast(mutable);
    assert!(immutable.same_object(&observer));
    assert_eq!(immutable.len(), 1);
}

#[test]
fn test_downcast_of_upcast_recovers_mutable() {
    let mutable = MutableSet::new().unwrap();
    let immutable = mutable.to_immutable();
    let recovered = pairing::downcast(&immutable).unwrap();
    assert!(recovered.same_object(&mutable));
}

#[test]
fn test_downcast_of_immutable_fails() {
    let array = Array::from_items([&int(1)]).unwrap();
    assert!(!array.is_mutable_instance());
    assert!(array.downcast_mutable().is_none());

    let array = match array.try_into_mutable() {
        Ok(_) => panic!("immutable array became mutable"),
        Err(array) => array,
    };
    assert_eq!(array.retain_count(), 1);
}

#[test]
fn test_try_into_mutable_moves_the_unit() {
    let dict: Dictionary = MutableDictionary::new().unwrap().upcast();
    assert!(dict.is_mutable_instance());
    let mut mutable = dict.try_into_mutable().unwrap();
    assert_eq!(mutable.retain_count(), 1);
    mutable.insert(&string("k"), &int(1)).unwrap();
    assert_eq!(mutable.len(), 1);
}

#[test]
fn test_mutation_visible_through_immutable_alias() {
    let mut mutable = MutableArray::new().unwrap();
    let alias = mutable.to_immutable();
    mutable.push(&string("a")).unwrap();
    mutable.push(&string("b")).unwrap();
    assert_eq!(alias.len(), 2);
    assert_eq!(alias.description(), "(a, b)");
}

#[test]
fn test_mutable_copy_is_independent() {
    let original = Set::from_items([&int(1), &int(2)]).unwrap();
    let mut copy = original.to_mutable().unwrap();
    copy.insert(&int(3)).unwrap();
    assert_eq!(original.len(), 2);
    assert_eq!(copy.len(), 3);
    assert!(!copy.same_object(&original));
}

#[test]
fn test_deref_exposes_immutable_api() {
    let mut s = MutableString::with_contents("abc").unwrap();
    s.push_str("def").unwrap();
    let view: &refbridge::ForeignString = &s;
    assert_eq!(view.len(), 6);
    assert_eq!(view.to_rust_string(), "abcdef");
}
