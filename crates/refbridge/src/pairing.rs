//! Mutable and immutable variant pairs
//!
//! Every mutable object is also a valid instance of its immutable partner,
//! so [`MutableVariant::upcast`] always succeeds and never touches the
//! reference count. Going the other way is a checked cast.
//!
//! Pairs are declared with [`crate::declare_mutable_pair!`], which also
//! gives the mutable wrapper `Deref` to its immutable partner.

use crate::cast;
use crate::foreign_type::ForeignType;

/// The mutable half of a pair.
///
/// # Safety
///
/// Every object satisfying `Self`'s witness must satisfy the witness of
/// `Self::Immutable`, and both types must be `#[repr(transparent)]`
/// wrappers over `ForeignHandle`.
pub unsafe trait MutableVariant: ForeignType {
    type Immutable: ImmutableVariant;

    /// View as the immutable partner, moving the reference unit over.
    fn upcast(self) -> Self::Immutable {
        debug_assert!(Self::Immutable::witness().matches(self.as_handle()));
        unsafe { Self::Immutable::from_handle_unchecked(self.into_handle()) }
    }

    /// A new immutable-typed reference to the same object
    fn to_immutable(&self) -> Self::Immutable {
        unsafe { Self::Immutable::from_handle_unchecked(self.as_handle().clone()) }
    }
}

/// The immutable half of a pair
pub trait ImmutableVariant: ForeignType {
    type Mutable: MutableVariant;

    /// Checked cast to the mutable partner
    fn downcast_mutable(&self) -> Option<Self::Mutable> {
        cast::cast(self.as_handle())
    }

    /// Consuming checked cast. Returns `self` unchanged on mismatch.
    fn try_into_mutable(self) -> Result<Self::Mutable, Self> {
        Self::Mutable::from_handle(self.into_handle())
            .map_err(|handle| unsafe { Self::from_handle_unchecked(handle) })
    }

    /// Whether the object was created mutable
    fn is_mutable_instance(&self) -> bool {
        Self::Mutable::witness().matches(self.as_handle())
    }
}

pub fn upcast<M: MutableVariant>(mutable: M) -> M::Immutable {
    mutable.upcast()
}

pub fn downcast<I: ImmutableVariant>(immutable: &I) -> Option<I::Mutable> {
    immutable.downcast_mutable()
}
