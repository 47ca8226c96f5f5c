//! Generates injectors for `#[autowired]` fields.
//!
//! A round groups the annotated fields reported by a [`SymbolSource`] by their owner,
//! classifies every field as a locator-resolved service or a value read from the owner's
//! carrier, and renders one injector per owner implementing `autowire::Injector`.
//! Most users only need [`configure`] in a build script.

pub(crate) mod attr_parsing;
pub(crate) mod builder;
pub(crate) mod capability;
pub(crate) mod classifier;
pub(crate) mod config;
pub(crate) mod diagnostics;
pub(crate) mod emitter;
pub(crate) mod errors;
pub(crate) mod injector_spec;
pub(crate) mod processor;
pub(crate) mod scanner;
pub(crate) mod source;
pub(crate) mod symbol;
pub(crate) mod type_model;
pub(crate) mod writer;

pub use builder::{configure, Builder};
pub use capability::{classify, AccessorKind, Classification};
pub use classifier::{FieldDescriptor, OwnerGroup, PassContext};
pub use config::{Config, KEY_MODULE_NAME};
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use emitter::{Emitter, SourceUnit};
pub use errors::{ClassifyErrorKind, ProcessErrorKind, ScanErrorKind, WriteErrorKind};
pub use injector_spec::{Assignment, InjectorSpec, InjectorSpecBuilder, INJECTOR_SUFFIX};
pub use processor::{AutowiredProcessor, RoundOutcome};
pub use scanner::{module_path_for, SourceScanner};
pub use source::SymbolSource;
pub use symbol::{AutowiredArgs, DefaultValue, FieldSymbol, OwnerType, SourceSite, Visibility};
pub use type_model::{Capability, ImplIndex, TypeModel};
pub use writer::{FsWriter, MemoryWriter, Writer};
