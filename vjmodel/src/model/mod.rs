//! The semantic model handed to the renderer.
//!
//! A [`Clazz`] owns flat lists of [`Member`]s, [`Property`]s and [`Method`]s.
//! Members and properties refer to each other through [`MemberId`] and
//! [`PropertyId`] indices into those lists; types are [`Typeref`] handles
//! into the clazz's own [`TypePool`](crate::types::TypePool).
use std::fmt;

use crate::types::Typeref;

pub use clazz::{Clazz, Complete, Content, Declared, TypeInfo, Typed};
pub use member::{Member, MemberFlags};
pub use method::Method;
pub use property::Property;

pub mod clazz;
pub mod member;
pub mod method;
pub mod property;

/// Index of a [`Member`] within its clazz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(pub usize);

/// Index of a [`Property`] within its clazz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(pub usize);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member#{}", self.0)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "property#{}", self.0)
    }
}

/// A named, typed formal parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub ty: Typeref,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Typeref) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Same parameter under another name.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
}
