//! Object layout, reference counting and the value protocol
//!
//! Every object is an `Arc<Object>` whose raw data pointer is handed out
//! as the `FoTypeRef`. Retain and release map to the strong count, so the
//! count is atomic and the object is destroyed by the runtime when it
//! reaches zero.

use crate::number::NumberValue;
use crate::{string, FoHashCode, FoIndex, FoTypeID, FoTypeRef, FO_TYPE_ID_INVALID};
use std::cell::UnsafeCell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::mem::ManuallyDrop;
use std::ptr;
use std::sync::Arc;

/// Built-in object kinds. The discriminant is the runtime type identifier.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Null = 1,
    Boolean = 2,
    Number = 3,
    String = 4,
    Data = 5,
    Array = 6,
    Dictionary = 7,
    Set = 8,
}

impl Kind {
    const ALL: [Kind; 8] = [
        Kind::Null,
        Kind::Boolean,
        Kind::Number,
        Kind::String,
        Kind::Data,
        Kind::Array,
        Kind::Dictionary,
        Kind::Set,
    ];

    pub(crate) fn type_id(self) -> FoTypeID {
        self as FoTypeID
    }

    pub(crate) fn from_type_id(id: FoTypeID) -> Option<Kind> {
        Kind::ALL.iter().copied().find(|kind| kind.type_id() == id)
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Kind::Null => "Null",
            Kind::Boolean => "Boolean",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::Data => "Data",
            Kind::Array => "Array",
            Kind::Dictionary => "Dictionary",
            Kind::Set => "Set",
        }
    }
}

/// An owned reference held by a container. Releases on drop.
pub(crate) struct Retained(FoTypeRef);

impl Retained {
    /// Takes a new reference to `raw`.
    ///
    /// # Safety
    ///
    /// `raw` must be a live, non-null object.
    pub(crate) unsafe fn retain(raw: FoTypeRef) -> Self {
        fo_retain(raw);
        Self(raw)
    }

    pub(crate) fn as_raw(&self) -> FoTypeRef {
        self.0
    }
}

impl Drop for Retained {
    fn drop(&mut self) {
        unsafe { fo_release(self.0) }
    }
}

pub(crate) enum Body {
    Null,
    Boolean(bool),
    Number(NumberValue),
    String(UnsafeCell<String>),
    Data(Vec<u8>),
    Array(UnsafeCell<Vec<Retained>>),
    Dictionary(UnsafeCell<Vec<(Retained, Retained)>>),
    Set(UnsafeCell<Vec<Retained>>),
}

pub(crate) struct Object {
    pub(crate) mutable: bool,
    pub(crate) body: Body,
}

impl Object {
    pub(crate) fn immutable(body: Body) -> Self {
        Self {
            mutable: false,
            body,
        }
    }

    pub(crate) fn mutable(body: Body) -> Self {
        Self {
            mutable: true,
            body,
        }
    }

    pub(crate) fn kind(&self) -> Kind {
        match self.body {
            Body::Null => Kind::Null,
            Body::Boolean(_) => Kind::Boolean,
            Body::Number(_) => Kind::Number,
            Body::String(_) => Kind::String,
            Body::Data(_) => Kind::Data,
            Body::Array(_) => Kind::Array,
            Body::Dictionary(_) => Kind::Dictionary,
            Body::Set(_) => Kind::Set,
        }
    }

    pub(crate) unsafe fn string(&self) -> Option<&String> {
        match &self.body {
            Body::String(cell) => Some(&*cell.get()),
            _ => None,
        }
    }

    pub(crate) unsafe fn array(&self) -> Option<&Vec<Retained>> {
        match &self.body {
            Body::Array(cell) => Some(&*cell.get()),
            _ => None,
        }
    }

    pub(crate) unsafe fn dictionary(&self) -> Option<&Vec<(Retained, Retained)>> {
        match &self.body {
            Body::Dictionary(cell) => Some(&*cell.get()),
            _ => None,
        }
    }

    pub(crate) unsafe fn set(&self) -> Option<&Vec<Retained>> {
        match &self.body {
            Body::Set(cell) => Some(&*cell.get()),
            _ => None,
        }
    }

    // Mutable accessors return None for immutable instances.

    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn string_mut(&self) -> Option<&mut String> {
        match &self.body {
            Body::String(cell) if self.mutable => Some(&mut *cell.get()),
            _ => None,
        }
    }

    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn array_mut(&self) -> Option<&mut Vec<Retained>> {
        match &self.body {
            Body::Array(cell) if self.mutable => Some(&mut *cell.get()),
            _ => None,
        }
    }

    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn dictionary_mut(&self) -> Option<&mut Vec<(Retained, Retained)>> {
        match &self.body {
            Body::Dictionary(cell) if self.mutable => Some(&mut *cell.get()),
            _ => None,
        }
    }

    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn set_mut(&self) -> Option<&mut Vec<Retained>> {
        match &self.body {
            Body::Set(cell) if self.mutable => Some(&mut *cell.get()),
            _ => None,
        }
    }
}

/// Allocates `object` and returns its owned reference.
pub(crate) fn into_raw(object: Object) -> FoTypeRef {
    Arc::into_raw(Arc::new(object)) as FoTypeRef
}

/// Borrows the object behind `raw`, or `None` for null.
pub(crate) unsafe fn object<'a>(raw: FoTypeRef) -> Option<&'a Object> {
    (raw as *const Object).as_ref()
}

/// Position of `key` in a key/value list, using the runtime's equality.
pub(crate) unsafe fn position_of(entries: &[(Retained, Retained)], key: FoTypeRef) -> Option<usize> {
    let hash = fo_hash(key);
    entries
        .iter()
        .position(|(k, _)| fo_hash(k.as_raw()) == hash && fo_equal(k.as_raw(), key))
}

/// Position of `value` in an element list, using the runtime's equality.
pub(crate) unsafe fn index_of(elements: &[Retained], value: FoTypeRef) -> Option<usize> {
    let hash = fo_hash(value);
    elements
        .iter()
        .position(|e| fo_hash(e.as_raw()) == hash && fo_equal(e.as_raw(), value))
}

/// Whether `target` is `from` itself or is held by `from`, directly or
/// through nested containers.
///
/// Mutation entry points refuse values that reach the container being
/// mutated. That keeps every container graph acyclic, so this walk and
/// the recursive `fo_equal`, `fo_hash` and `describe` terminate, and no
/// mutation borrows a container that its own arguments also read.
pub(crate) unsafe fn reaches(from: FoTypeRef, target: FoTypeRef) -> bool {
    if ptr::eq(from, target) {
        return true;
    }
    let Some(o) = object(from) else {
        return false;
    };
    let reaches_target = |r: &Retained| reaches(r.as_raw(), target);
    match &o.body {
        Body::Array(_) => o.array().is_some_and(|xs| xs.iter().any(reaches_target)),
        Body::Set(_) => o.set().is_some_and(|xs| xs.iter().any(reaches_target)),
        Body::Dictionary(_) => o
            .dictionary()
            .is_some_and(|xs| xs.iter().any(|(k, v)| reaches_target(k) || reaches_target(v))),
        _ => false,
    }
}

pub(crate) fn hash_bytes(bytes: &[u8]) -> FoHashCode {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish() as FoHashCode
}

/// Increments the reference count. Returns `obj` for chaining.
///
/// # Safety
///
/// `obj` must be null or a live object.
pub unsafe extern "C" fn fo_retain(obj: FoTypeRef) -> FoTypeRef {
    if !obj.is_null() {
        Arc::increment_strong_count(obj as *const Object);
    }
    obj
}

/// Decrements the reference count, destroying the object at zero.
///
/// # Safety
///
/// `obj` must be null or a live object whose reference the caller owns.
pub unsafe extern "C" fn fo_release(obj: FoTypeRef) {
    if !obj.is_null() {
        Arc::decrement_strong_count(obj as *const Object);
    }
}

/// Current reference count (diagnostic only).
///
/// # Safety
///
/// `obj` must be null or a live object.
pub unsafe extern "C" fn fo_get_retain_count(obj: FoTypeRef) -> FoIndex {
    if obj.is_null() {
        return 0;
    }
    let strong = ManuallyDrop::new(Arc::from_raw(obj as *const Object));
    Arc::strong_count(&strong) as FoIndex
}

/// Dynamic type identifier, or `FO_TYPE_ID_INVALID` for null.
///
/// # Safety
///
/// `obj` must be null or a live object.
pub unsafe extern "C" fn fo_get_type_id(obj: FoTypeRef) -> FoTypeID {
    object(obj).map_or(FO_TYPE_ID_INVALID, |o| o.kind().type_id())
}

/// Whether the object was created by a `*_create_mutable*` factory.
///
/// # Safety
///
/// `obj` must be null or a live object.
pub unsafe extern "C" fn fo_is_mutable(obj: FoTypeRef) -> bool {
    object(obj).is_some_and(|o| o.mutable)
}

/// Value equality.
///
/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_equal(a: FoTypeRef, b: FoTypeRef) -> bool {
    let (Some(lhs), Some(rhs)) = (object(a), object(b)) else {
        return false;
    };
    if ptr::eq(lhs, rhs) {
        return true;
    }
    match (&lhs.body, &rhs.body) {
        (Body::Null, Body::Null) => true,
        (Body::Boolean(x), Body::Boolean(y)) => x == y,
        (Body::Number(x), Body::Number(y)) => x.equals(*y),
        (Body::String(_), Body::String(_)) => lhs.string() == rhs.string(),
        (Body::Data(x), Body::Data(y)) => x == y,
        (Body::Array(_), Body::Array(_)) => {
            let (Some(xs), Some(ys)) = (lhs.array(), rhs.array()) else {
                return false;
            };
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(x, y)| fo_equal(x.as_raw(), y.as_raw()))
        }
        (Body::Dictionary(_), Body::Dictionary(_)) => {
            let (Some(xs), Some(ys)) = (lhs.dictionary(), rhs.dictionary()) else {
                return false;
            };
            xs.len() == ys.len()
                && xs.iter().all(|(k, v)| match position_of(ys, k.as_raw()) {
                    Some(i) => fo_equal(v.as_raw(), ys[i].1.as_raw()),
                    None => false,
                })
        }
        (Body::Set(_), Body::Set(_)) => {
            let (Some(xs), Some(ys)) = (lhs.set(), rhs.set()) else {
                return false;
            };
            xs.len() == ys.len() && xs.iter().all(|x| index_of(ys, x.as_raw()).is_some())
        }
        _ => false,
    }
}

/// Hash code consistent with `fo_equal`.
///
/// Containers hash to their element count.
///
/// # Safety
///
/// `obj` must be null or a live object.
pub unsafe extern "C" fn fo_hash(obj: FoTypeRef) -> FoHashCode {
    let Some(o) = object(obj) else {
        return 0;
    };
    match &o.body {
        Body::Null => 0x6e75_6c6c,
        Body::Boolean(b) => *b as FoHashCode,
        Body::Number(n) => n.hash_code(),
        Body::String(_) => o.string().map_or(0, |s| hash_bytes(s.as_bytes())),
        Body::Data(bytes) => hash_bytes(bytes),
        Body::Array(_) => o.array().map_or(0, Vec::len),
        Body::Dictionary(_) => o.dictionary().map_or(0, Vec::len),
        Body::Set(_) => o.set().map_or(0, Vec::len),
    }
}

pub(crate) unsafe fn describe(obj: FoTypeRef) -> String {
    let Some(o) = object(obj) else {
        return "<invalid>".to_string();
    };
    match &o.body {
        Body::Null => "<null>".to_string(),
        Body::Boolean(b) => b.to_string(),
        Body::Number(n) => n.to_string(),
        Body::String(_) => o.string().cloned().unwrap_or_default(),
        Body::Data(bytes) => format!("<data: {} bytes>", bytes.len()),
        Body::Array(_) => {
            let items: Vec<String> = o
                .array()
                .map(|xs| xs.iter().map(|x| describe(x.as_raw())).collect())
                .unwrap_or_default();
            format!("({})", items.join(", "))
        }
        Body::Dictionary(_) => {
            let items: Vec<String> = o
                .dictionary()
                .map(|xs| {
                    xs.iter()
                        .map(|(k, v)| format!("{} = {}", describe(k.as_raw()), describe(v.as_raw())))
                        .collect()
                })
                .unwrap_or_default();
            format!("{{{}}}", items.join("; "))
        }
        Body::Set(_) => {
            let items: Vec<String> = o
                .set()
                .map(|xs| xs.iter().map(|x| describe(x.as_raw())).collect())
                .unwrap_or_default();
            format!("{{({})}}", items.join(", "))
        }
    }
}

/// Human-readable description as a new string object (owned).
///
/// # Safety
///
/// `obj` must be null or a live object.
pub unsafe extern "C" fn fo_copy_description(obj: FoTypeRef) -> FoTypeRef {
    if obj.is_null() {
        return ptr::null();
    }
    string::create(describe(obj), false)
}

/// Name of a type identifier as a new string object (owned), or null for
/// unknown identifiers.
///
/// # Safety
///
/// Always safe to call; `unsafe` for ABI uniformity.
pub unsafe extern "C" fn fo_copy_type_id_description(type_id: FoTypeID) -> FoTypeRef {
    match Kind::from_type_id(type_id) {
        Some(kind) => string::create(kind.name().to_string(), false),
        None => ptr::null(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fo_array_create, fo_number_create_i64, fo_string_create_with_bytes};
    use pretty_assertions::assert_eq;

    fn make_string(s: &str) -> FoTypeRef {
        unsafe { fo_string_create_with_bytes(s.as_ptr(), s.len() as FoIndex) }
    }

    #[test]
    fn test_retain_release_counts() {
        unsafe {
            let obj = fo_number_create_i64(7);
            assert_eq!(fo_get_retain_count(obj), 1);
            assert_eq!(fo_retain(obj), obj);
            assert_eq!(fo_get_retain_count(obj), 2);
            fo_release(obj);
            assert_eq!(fo_get_retain_count(obj), 1);
            fo_release(obj);
        }
    }

    #[test]
    fn test_null_is_tolerated() {
        unsafe {
            assert!(fo_retain(ptr::null()).is_null());
            fo_release(ptr::null());
            assert_eq!(fo_get_retain_count(ptr::null()), 0);
            assert_eq!(fo_get_type_id(ptr::null()), FO_TYPE_ID_INVALID);
            assert!(!fo_equal(ptr::null(), ptr::null()));
            assert!(fo_copy_description(ptr::null()).is_null());
        }
    }

    #[test]
    fn test_kind_round_trips_type_id() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_type_id(kind.type_id()), Some(kind));
        }
        assert_eq!(Kind::from_type_id(FO_TYPE_ID_INVALID), None);
    }

    #[test]
    fn test_strings_equal_by_content() {
        unsafe {
            let a = make_string("foo");
            let b = make_string("foo");
            let c = make_string("bar");
            assert!(fo_equal(a, b));
            assert_eq!(fo_hash(a), fo_hash(b));
            assert!(!fo_equal(a, c));
            for s in [a, b, c] {
                fo_release(s);
            }
        }
    }

    #[test]
    fn test_different_kinds_never_equal() {
        unsafe {
            let n = fo_number_create_i64(1);
            let s = make_string("1");
            assert!(!fo_equal(n, s));
            fo_release(n);
            fo_release(s);
        }
    }

    #[test]
    fn test_reaches_through_nested_containers() {
        unsafe {
            let n = fo_number_create_i64(1);
            let inner = fo_array_create(&n, 1);
            let outer = fo_array_create(&inner, 1);
            assert!(reaches(outer, outer));
            assert!(reaches(outer, inner));
            assert!(reaches(outer, n));
            assert!(!reaches(inner, outer));
            assert!(!reaches(n, inner));
            assert_eq!(describe(outer), "((1))");
            for obj in [outer, inner, n] {
                fo_release(obj);
            }
        }
    }

    #[test]
    fn test_type_id_description() {
        unsafe {
            let name = fo_copy_type_id_description(Kind::Array.type_id());
            assert_eq!(describe(name), "Array");
            fo_release(name);
            assert!(fo_copy_type_id_description(999).is_null());
        }
    }
}
