//! The root aggregate of the model.
//!
//! A clazz goes through three states, each its own type:
//!
//! - [`Declared`]: name, documentation and configuration only.
//! - [`Typed`]: base type, interfaces and generic arguments are known.
//! - [`Complete`]: members, properties, methods and imports are attached and
//!   the type pool is owned by the clazz.
//!
//! Transitions consume the previous state, so a clazz can be completed once
//! and content can only be read from a [`Clazz<Complete>`].
use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::{
    config::Configuration,
    model::{Member, MemberId, Method, Property, PropertyId},
    name::{generic_qualifier, package_of},
    types::{Type, TypePool, Typeref},
};

mod sealed {
    pub trait Sealed {}
}

/// Marker trait of the clazz lifecycle states.
pub trait ClazzState: sealed::Sealed {}

#[derive(Debug)]
pub struct Declared;

#[derive(Debug)]
pub struct Typed {
    info: TypeInfo,
}

#[derive(Debug)]
pub struct Complete {
    info: TypeInfo,
    content: Content,
    types: TypePool,
}

impl sealed::Sealed for Declared {}
impl sealed::Sealed for Typed {}
impl sealed::Sealed for Complete {}
impl ClazzState for Declared {}
impl ClazzState for Typed {}
impl ClazzState for Complete {}

/// Type part of a clazz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub base: Typeref,
    /// Directly implemented interfaces.
    pub interfaces: Vec<Typeref>,
    /// Directly implemented interfaces and all of their ancestors.
    pub all_interfaces: Vec<Typeref>,
    pub generic_args: Vec<Typeref>,
}

/// Content part of a clazz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub members: Vec<Member>,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    pub imports: Vec<Typeref>,
}

/// Model of the class to generate.
///
/// Equality is identity: two clazz values are equal only if they are the
/// same build artifact. Hashing uses the qualified name.
#[derive(Debug)]
pub struct Clazz<S: ClazzState = Complete> {
    name: String,
    package: String,
    doc: String,
    config: Arc<Configuration>,
    state: S,
}

impl Clazz<Declared> {
    pub fn new(name: impl Into<String>, doc: impl Into<String>, config: Arc<Configuration>) -> Self {
        let name = name.into();
        Self {
            package: package_of(&name).to_string(),
            name,
            doc: doc.into(),
            config,
            state: Declared,
        }
    }

    pub fn init_type(self, info: TypeInfo) -> Clazz<Typed> {
        Clazz {
            name: self.name,
            package: self.package,
            doc: self.doc,
            config: self.config,
            state: Typed { info },
        }
    }
}

impl Clazz<Typed> {
    pub fn type_info(&self) -> &TypeInfo {
        &self.state.info
    }

    /// Attach the content and take ownership of the pool every [`Typeref`]
    /// of the model was issued by.
    pub fn init_content(self, content: Content, types: TypePool) -> Clazz<Complete> {
        assert_eq!(
            types.target_name(),
            self.name,
            "type pool belongs to another target"
        );
        debug_assert!(
            content.members.iter().enumerate().all(|(idx, member)| member
                .properties
                .iter()
                .all(|property| content.properties[property.0].member == MemberId(idx))),
            "member and property back-references disagree"
        );

        Clazz {
            name: self.name,
            package: self.package,
            doc: self.doc,
            config: self.config,
            state: Complete {
                info: self.state.info,
                content,
                types,
            },
        }
    }
}

impl<S: ClazzState> Clazz<S> {
    /// Qualified name, generic qualifier included.
    pub fn qualified_name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn is_in_default_package(&self) -> bool {
        self.package.is_empty()
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn generic_qualifier_text(&self) -> &str {
        generic_qualifier(&self.name)
    }

    pub fn has_generic_qualifier(&self) -> bool {
        !self.generic_qualifier_text().is_empty()
    }
}

impl Clazz<Complete> {
    pub fn type_info(&self) -> &TypeInfo {
        &self.state.info
    }

    /// The pool resolving every [`Typeref`] of this model.
    pub fn types(&self) -> &TypePool {
        &self.state.types
    }

    pub fn base_type(&self) -> Typeref {
        self.state.info.base
    }

    pub fn interfaces(&self) -> &[Typeref] {
        &self.state.info.interfaces
    }

    pub fn all_interfaces(&self) -> &[Typeref] {
        &self.state.info.all_interfaces
    }

    pub fn generic_args(&self) -> &[Typeref] {
        &self.state.info.generic_args
    }

    pub fn members(&self) -> &[Member] {
        &self.state.content.members
    }

    pub fn member(&self, id: MemberId) -> &Member {
        &self.state.content.members[id.0]
    }

    pub fn member_by_name(&self, name: &str) -> Option<&Member> {
        self.members().iter().find(|member| member.name == name)
    }

    pub fn properties(&self) -> &[Property] {
        &self.state.content.properties
    }

    pub fn property(&self, id: PropertyId) -> &Property {
        &self.state.content.properties[id.0]
    }

    /// Accessors of `member` in discovery order.
    pub fn properties_of<'a>(&'a self, member: &'a Member) -> impl Iterator<Item = &'a Property> + 'a {
        member.properties.iter().map(|id| self.property(*id))
    }

    /// Plain (non-accessor) methods.
    pub fn methods(&self) -> &[Method] {
        &self.state.content.methods
    }

    pub fn imports(&self) -> &[Typeref] {
        &self.state.content.imports
    }

    pub fn has_any_members(&self) -> bool {
        !self.members().is_empty()
    }

    pub fn is_abstract(&self) -> bool {
        self.methods().iter().any(Method::is_unclaimed)
    }

    pub fn is_final(&self) -> bool {
        !self.is_abstract() && self.config.final_class_enabled
    }

    pub fn is_synchronized(&self) -> bool {
        self.config.synchronized_access_enabled && self.members().iter().any(Member::is_mutable)
    }

    pub fn has_primitive_members(&self) -> bool {
        self.members()
            .iter()
            .any(|member| self.types()[member.ty].is_primitive())
    }

    pub fn has_array_members(&self) -> bool {
        self.members()
            .iter()
            .any(|member| matches!(self.types()[member.ty], Type::Array(_)))
    }
}

impl<S: ClazzState> PartialEq for Clazz<S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<S: ClazzState> Eq for Clazz<S> {}

impl<S: ClazzState> Hash for Clazz<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
