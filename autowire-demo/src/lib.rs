//! A profile page wired by the injector `build.rs` generates for it.

pub mod profile;
pub mod services;
