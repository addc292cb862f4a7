//! Reflection boundary.
//!
//! The model builder never parses source code. It consumes already-resolved
//! declarations through the [`Reflection`] trait. [`DeclarationSet`] is an
//! in-memory implementation that callers (and tests) can populate directly.
use std::collections::BTreeMap;

use crate::types::TypeMirror;

/// Opaque handle pointing back into the caller's sources. Passed through to
/// diagnostics untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(String);

impl Location {
    pub fn new(handle: impl Into<String>) -> Self {
        Location(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("<unknown>")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// An abstract (or default) method as declared in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub name: String,
    /// Formal parameter names, in declaration order.
    pub parameter_names: Vec<String>,
    /// Declared parameter types, before substitution through the owner.
    pub parameter_types: Vec<TypeMirror>,
    pub return_type: TypeMirror,
    /// Methods carrying a default body are not abstract.
    pub is_default: bool,
    pub doc: String,
    pub location: Location,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, return_type: TypeMirror) -> Self {
        Self {
            name: name.into(),
            parameter_names: Vec::new(),
            parameter_types: Vec::new(),
            return_type,
            is_default: false,
            doc: String::new(),
            location: Location::default(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, ty: TypeMirror) -> Self {
        self.parameter_names.push(name.into());
        self.parameter_types.push(ty);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn default_body(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIs, strum::Display)]
pub enum DeclarationKind {
    Interface,
    Class,
}

/// A class or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub type_parameters: Vec<String>,
    pub superclass: Option<TypeMirror>,
    /// Directly extended (or implemented) interfaces, in declaration order.
    pub interfaces: Vec<TypeMirror>,
    pub methods: Vec<MethodDescriptor>,
    pub doc: String,
    pub location: Location,
}

impl Declaration {
    fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        let name = name.into();
        Self {
            location: Location::new(name.clone()),
            name,
            kind,
            type_parameters: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            doc: String::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Interface)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Class)
    }

    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_parameters.push(name.into());
        self
    }

    pub fn superclass(mut self, superclass: TypeMirror) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn extends(mut self, interface: TypeMirror) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a method. Methods without a location are located at
    /// `<declaration>.<method>`.
    pub fn method(mut self, mut method: MethodDescriptor) -> Self {
        if method.location.is_unknown() {
            method.location = Location::new(format!("{}.{}", self.name, method.name));
        }
        self.methods.push(method);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// The declaration seen as a type, its own type parameters as arguments.
    pub fn mirror(&self) -> TypeMirror {
        TypeMirror::generic(
            self.name.clone(),
            self.type_parameters
                .iter()
                .map(|param| TypeMirror::variable(param.clone()))
                .collect(),
        )
    }
}

/// Parameter and return types of a method as seen through a concrete owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSignature {
    pub parameter_types: Vec<TypeMirror>,
    pub return_type: TypeMirror,
}

/// Read-only access to declarations and their supertype structure.
///
/// Only [`Reflection::declaration`] and [`Reflection::root_object`] are
/// required; the structural queries derive from them by substituting type
/// parameters with the arguments of the queried mirror.
pub trait Reflection {
    /// Look up a declaration by its qualified (erased) name.
    fn declaration(&self, name: &str) -> Option<&Declaration>;

    /// The implicit superclass of interfaces and classes without one.
    fn root_object(&self) -> Option<&TypeMirror>;

    /// Direct supertypes of `ty`: superclass first, then interfaces.
    ///
    /// Interfaces report the root object as their superclass. The root object
    /// itself, primitives, arrays, variables and unknown declarations have no
    /// supertypes.
    fn direct_supertypes(&self, ty: &TypeMirror) -> Vec<TypeMirror> {
        let Some(name) = ty.erased_name() else {
            return Vec::new();
        };
        let Some(declaration) = self.declaration(name) else {
            return Vec::new();
        };

        let params = &declaration.type_parameters;
        let args = ty.args();

        let superclass = declaration
            .superclass
            .as_ref()
            .map(|superclass| superclass.substitute(params, args))
            .or_else(|| {
                self.root_object()
                    .filter(|root| root.erased_name() != Some(name))
                    .cloned()
            });

        superclass
            .into_iter()
            .chain(
                declaration
                    .interfaces
                    .iter()
                    .map(|interface| interface.substitute(params, args)),
            )
            .collect()
    }

    /// Interfaces directly extended by `ty`, substituted through its arguments.
    fn declared_interfaces(&self, ty: &TypeMirror) -> Vec<TypeMirror> {
        let Some(declaration) = ty.erased_name().and_then(|name| self.declaration(name)) else {
            return Vec::new();
        };

        declaration
            .interfaces
            .iter()
            .map(|interface| interface.substitute(&declaration.type_parameters, ty.args()))
            .collect()
    }

    /// Parameter and return types of `method` as a member of `owner`.
    fn resolve_method(&self, owner: &TypeMirror, method: &MethodDescriptor) -> ResolvedSignature {
        let params = owner
            .erased_name()
            .and_then(|name| self.declaration(name))
            .map(|declaration| declaration.type_parameters.as_slice())
            .unwrap_or_default();
        let args = owner.args();

        ResolvedSignature {
            parameter_types: method
                .parameter_types
                .iter()
                .map(|ty| ty.substitute(params, args))
                .collect(),
            return_type: method.return_type.substitute(params, args),
        }
    }
}

/// In-memory [`Reflection`] source keyed by qualified name.
#[derive(Debug, Clone)]
pub struct DeclarationSet {
    declarations: BTreeMap<String, Declaration>,
    root_object: Option<TypeMirror>,
}

impl DeclarationSet {
    /// Default root object type of a fresh set.
    pub const ROOT_OBJECT: &'static str = "java.lang.Object";

    pub fn new() -> Self {
        Self {
            declarations: BTreeMap::new(),
            root_object: Some(TypeMirror::declared(Self::ROOT_OBJECT)),
        }
    }

    /// Replace (or remove) the implicit root object type.
    pub fn with_root_object(mut self, root: Option<TypeMirror>) -> Self {
        self.root_object = root;
        self
    }

    /// Insert a declaration, replacing any previous one of the same name.
    pub fn insert(&mut self, declaration: Declaration) -> &mut Self {
        self.declarations
            .insert(declaration.name.clone(), declaration);
        self
    }

    pub fn with(mut self, declaration: Declaration) -> Self {
        self.insert(declaration);
        self
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl Default for DeclarationSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Reflection for DeclarationSet {
    fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    fn root_object(&self) -> Option<&TypeMirror> {
        self.root_object.as_ref()
    }
}
