//! Semantic model builder for generated immutable value objects.
//!
//! Given an interface and the declarations it inherits from, the crate infers
//! the members, accessors and plain methods a generated value class has to
//! implement, and returns them as a [`Clazz`] ready for rendering.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use vjmodel::{
//!     ClazzBuilder, Configuration,
//!     reflect::{Declaration, DeclarationSet, MethodDescriptor},
//!     types::TypeMirror,
//! };
//!
//! let reflection = DeclarationSet::new().with(
//!     Declaration::interface("demo.Person")
//!         .method(MethodDescriptor::new("getName", TypeMirror::declared("java.lang.String"))),
//! );
//! let config = Configuration {
//!     import_classes: Vec::new(),
//!     ..Configuration::default()
//! };
//!
//! let clazz = ClazzBuilder::new()
//!     .build(&reflection, "demo.Person", Arc::new(config))
//!     .unwrap()
//!     .into_renderable()
//!     .unwrap();
//! assert_eq!(clazz.qualified_name(), "demo.PersonImpl");
//! assert_eq!(clazz.members()[0].name, "name");
//! ```

pub mod builder;
pub mod classify;
pub mod closure;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod imports;
pub mod merge;
pub mod model;
pub mod name;
pub mod reflect;
pub mod types;

pub use builder::{Build, ClazzBuilder};
pub use config::Configuration;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{VjError, VjResult};
pub use model::Clazz;
