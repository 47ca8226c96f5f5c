//! Runtime contracts for injectors produced by `autowire-codegen`.
//!
//! Generated code only calls into this crate: it resolves services through the
//! installed [`ServiceLocator`] and reads scalar values from the target's
//! [`Carrier`]. What a locator or a carrier does internally is up to the
//! application.

pub(crate) mod any;
pub(crate) mod carrier;
pub(crate) mod errors;
pub(crate) mod injector;
pub(crate) mod locator;

pub use any::TypeInfo;
pub use carrier::{Carrier, CarrierHost};
pub use errors::{InjectError, MissingServiceError};
pub use injector::{inject, Autowired, Injector};
pub use locator::{install_locator, resolve_by_path, resolve_by_type, uninstall_locator, Provider, ServiceLocator};

#[cfg(feature = "macros")]
pub use autowire_macros::Autowired;
