//! Wrapper declaration macros

/// Declare a typed wrapper over `ForeignHandle`.
///
/// ```ignore
/// declare_foreign_type! {
///     /// Foreign numbers
///     #[derive(Clone)]
///     pub struct Number;
///     name = "Number";
///     witness = TypeWitness::new("Number", sys::fo_number_get_type_id());
/// }
/// ```
///
/// The witness expression is evaluated once, on first use, and registered
/// in the witness table. Equality and hashing delegate to the foreign
/// runtime.
#[macro_export]
macro_rules! declare_foreign_type {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident;
        name = $display:expr;
        witness = $witness:expr;
    ) => {
        $(#[$meta])*
        #[repr(transparent)]
        $vis struct $name($crate::handle::ForeignHandle);

        impl $crate::foreign_type::ForeignType for $name {
            const NAME: &'static str = $display;

            fn witness() -> &'static $crate::witness::TypeWitness {
                static WITNESS: ::std::sync::OnceLock<&'static $crate::witness::TypeWitness> =
                    ::std::sync::OnceLock::new();
                *WITNESS.get_or_init(|| $crate::witness::register($witness))
            }

            unsafe fn from_handle_unchecked(handle: $crate::handle::ForeignHandle) -> Self {
                Self(handle)
            }

            fn as_handle(&self) -> &$crate::handle::ForeignHandle {
                &self.0
            }

            fn into_handle(self) -> $crate::handle::ForeignHandle {
                self.0
            }
        }

        impl<U: $crate::foreign_type::ForeignType> ::std::cmp::PartialEq<U> for $name {
            fn eq(&self, other: &U) -> bool {
                $crate::equality::equal(self, other)
            }
        }

        impl ::std::cmp::Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                state.write_usize($crate::equality::hash_code(self));
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", $display, self.0.description())
            }
        }
    };
}

/// Pair a mutable wrapper with its immutable partner.
///
/// Both types must have been declared with [`declare_foreign_type!`], and
/// the mutable witness must imply the immutable one.
#[macro_export]
macro_rules! declare_mutable_pair {
    ($immutable:ty => $mutable:ty) => {
        unsafe impl $crate::pairing::MutableVariant for $mutable {
            type Immutable = $immutable;
        }

        impl $crate::pairing::ImmutableVariant for $immutable {
            type Mutable = $mutable;
        }

        impl ::std::ops::Deref for $mutable {
            type Target = $immutable;

            fn deref(&self) -> &$immutable {
                // Both are #[repr(transparent)] over ForeignHandle.
                unsafe { &*(self as *const $mutable as *const $immutable) }
            }
        }

        impl ::std::convert::AsRef<$immutable> for $mutable {
            fn as_ref(&self) -> &$immutable {
                self
            }
        }

        impl ::std::convert::From<$mutable> for $immutable {
            fn from(mutable: $mutable) -> Self {
                $crate::pairing::MutableVariant::upcast(mutable)
            }
        }
    };
}
