//! refbridge - typed bridge over a reference-counted foreign object model
//!
//! The foreign runtime (`refbridge-sys`) exposes untyped, manually
//! reference-counted objects through a C ABI. This crate wraps them in
//! owned Rust types:
//!
//! - [`ForeignHandle`] owns one reference unit and releases it on drop.
//! - [`ForeignType`] wrappers ([`Array`], [`ForeignString`], ...) carry a
//!   [`TypeWitness`] and are only constructed through checked casts.
//! - Mutable wrappers pair with their immutable partners through
//!   [`MutableVariant`] and [`ImmutableVariant`].
//! - Equality and hashing delegate to the foreign runtime.
//! - Collection traversal works on a retained snapshot.
//!
//! ```ignore
//! use refbridge::{Array, ForeignObject, ForeignString, Number};
//!
//! let one = Number::from_i64(1).unwrap().into_object();
//! let foo = ForeignString::new("foo").unwrap().into_object();
//! let array = Array::from_items([&one, &foo]).unwrap();
//! let strings: Vec<ForeignString> = array.iter().of_type().collect();
//! ```

#[macro_use]
mod macros;

pub mod audit;
pub mod cast;
pub mod collection;
pub mod equality;
pub mod error;
pub mod foreign_type;
pub mod handle;
pub mod pairing;
pub mod settings;
pub mod types;
pub mod witness;

pub use audit::OwnershipReport;
pub use collection::{Elements, Entries};
pub use error::{BridgeError, BridgeResult};
pub use foreign_type::ForeignType;
pub use handle::{ForeignHandle, WeakHandle};
pub use pairing::{ImmutableVariant, MutableVariant};
pub use settings::BridgeSettings;
pub use types::{
    Array, Boolean, Data, Dictionary, ForeignObject, ForeignString, MutableArray,
    MutableDictionary, MutableSet, MutableString, Null, Number, Set,
};
pub use witness::TypeWitness;

pub use refbridge_config::Config;
pub use refbridge_sys as sys;

use refbridge_config::ConfigLoader;
use std::path::Path;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Apply configuration and register the built-in witnesses.
pub fn init(config: &Config) -> BridgeSettings {
    let settings = BridgeSettings::from_config(config);
    settings::apply(settings);
    types::register_builtin_witnesses();
    log::debug!(
        target: "refbridge",
        "bridge initialized (audit: {}, trace refcounts: {}, cast failures: {:?})",
        settings.audit_ownership,
        settings.trace_refcounts,
        settings.cast_failure_level
    );
    settings
}

/// Load configuration for `dir` (global file, project file, environment)
/// and [`init`] with it.
pub fn init_from_directory(dir: &Path) -> BridgeResult<BridgeSettings> {
    let config = ConfigLoader::new().load_from_directory(dir)?;
    Ok(init(&config))
}
