//! Types module
//!
//! This module contains the semantic type representation used by the model.
//! It is built on two layers:
//!
//! - [`TypeMirror`]: the unresolved descriptor delivered by the reflection
//!   source (see `mirror.rs`).
//! - [`Type`] values interned by a per-target [`TypePool`], addressed through
//!   stable [`Typeref`] handles.
//!
//! Within one pool there is exactly one [`Type`] per canonical textual form,
//! so comparing two [`Typeref`] handles is the same as comparing the types.
//! The class being generated is never interned as an object type: every
//! reference to it folds into the pool's single [`Type::SelfType`] entry.
use std::{collections::HashMap, fmt, ops::Index};

use log::{debug, trace};
use slotmap::SlotMap;
use strum::{EnumIs, EnumTryAs};

use crate::{
    closure::SupertypeClosure,
    name::{SELF_REFERENCE, package_of, strip_generic_qualifier},
    reflect::Reflection,
};

pub use mirror::{DeclaredMirror, TypeMirror};

pub mod mirror;

slotmap::new_key_type! {
    /// A stable reference to a type stored inside a [`TypePool`].
    pub struct Typeref;
}

/// Textual form of the "no value" type.
pub const VOID: &str = "void";

/// A semantic type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, EnumTryAs)]
pub enum Type {
    /// A primitive such as `int`.
    Primitive(String),

    /// An array whose component type lives in the same pool.
    Array(ArrayType),

    /// A declared class, interface or type variable.
    Object(ObjectType),

    /// The class currently being generated.
    SelfType,

    /// No type: a missing base type or a method returning nothing.
    Absent,
}

/// Array type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    pub name: String,
    pub component: Typeref,
}

/// Declared type together with its resolved supertype structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    /// Canonical textual form, generic arguments included.
    pub name: String,
    /// First direct supertype, or the pool's absent type.
    pub base: Typeref,
    /// Remaining direct supertypes.
    pub interfaces: Vec<Typeref>,
    /// Every interface reachable from `interfaces`, deduplicated.
    pub all_interfaces: Vec<Typeref>,
    pub generic_args: Vec<Typeref>,
}

impl ObjectType {
    /// Qualified name without generic arguments.
    pub fn erased_name(&self) -> &str {
        strip_generic_qualifier(&self.name)
    }

    pub fn package(&self) -> &str {
        package_of(&self.name)
    }
}

/// Interning pool for the types referenced while building one target.
///
/// Example:
///
/// ```rust
/// # use vjmodel::{reflect::DeclarationSet, types::{Type, TypeMirror, TypePool}};
/// let reflection = DeclarationSet::new();
/// let mut pool = TypePool::new("demo.PersonImpl");
///
/// let text = pool.resolve(&reflection, &TypeMirror::declared("demo.Text"));
/// assert_eq!(pool.resolve(&reflection, &TypeMirror::declared("demo.Text")), text);
///
/// let me = pool.resolve(&reflection, &TypeMirror::declared("demo.PersonImpl"));
/// assert_eq!(me, pool.self_type());
/// assert!(pool[me].is_self_type());
/// ```
#[derive(Debug, Clone)]
pub struct TypePool {
    target: String,
    types: SlotMap<Typeref, Type>,
    by_name: HashMap<String, Typeref>,
    self_type: Typeref,
    absent: Typeref,
}

impl TypePool {
    /// Create a pool for the class named `target` (qualified, generic
    /// qualifier included).
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        let mut types = SlotMap::with_key();
        let self_type = types.insert(Type::SelfType);
        let absent = types.insert(Type::Absent);

        let mut by_name = HashMap::new();
        by_name.insert(target.clone(), self_type);
        by_name.insert(VOID.to_string(), absent);

        Self {
            target,
            types,
            by_name,
            self_type,
            absent,
        }
    }

    /// Qualified name of the class this pool builds types for.
    pub fn target_name(&self) -> &str {
        &self.target
    }

    pub fn self_type(&self) -> Typeref {
        self.self_type
    }

    pub fn absent(&self) -> Typeref {
        self.absent
    }

    /// Retrieve the [`Type`] behind `typeref`, or [`None`] if the handle was
    /// issued by another pool.
    pub fn get(&self, typeref: Typeref) -> Option<&Type> {
        self.types.get(typeref)
    }

    /// Find an already interned type by canonical name.
    pub fn lookup(&self, name: &str) -> Option<Typeref> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Canonical textual form of a type. The self type answers with the
    /// target's name, the absent type with `void`.
    pub fn name(&self, typeref: Typeref) -> &str {
        match &self[typeref] {
            Type::Primitive(name) => name,
            Type::Array(array) => &array.name,
            Type::Object(object) => &object.name,
            Type::SelfType => &self.target,
            Type::Absent => VOID,
        }
    }

    /// Package of a type, only defined for object types and the self type.
    pub fn package(&self, typeref: Typeref) -> Option<&str> {
        match &self[typeref] {
            Type::Object(object) => Some(object.package()),
            Type::SelfType => Some(package_of(&self.target)),
            _ => None,
        }
    }

    /// Resolve a mirror into an interned type.
    ///
    /// Object types are interned before their supertypes are resolved, so
    /// self-referential hierarchies such as `Foo implements Comparable<Foo>`
    /// terminate.
    pub fn resolve<R: Reflection + ?Sized>(&mut self, reflection: &R, mirror: &TypeMirror) -> Typeref {
        let name = mirror.to_string().replace(SELF_REFERENCE, &self.target);

        if name == self.target {
            return self.self_type;
        }

        if let Some(existing) = self.lookup(&name) {
            return existing;
        }

        match mirror {
            TypeMirror::Void => self.absent,
            TypeMirror::Primitive(_) => self.intern(name, Type::Primitive(mirror.to_string())),
            TypeMirror::Array(component) => {
                let component = self.resolve(reflection, component);
                self.intern(name.clone(), Type::Array(ArrayType { name, component }))
            }
            TypeMirror::Declared(_) | TypeMirror::Variable(_) => {
                self.resolve_object(reflection, mirror, name)
            }
        }
    }

    fn resolve_object<R: Reflection + ?Sized>(
        &mut self,
        reflection: &R,
        mirror: &TypeMirror,
        name: String,
    ) -> Typeref {
        let typeref = self.intern(
            name.clone(),
            Type::Object(ObjectType {
                name,
                base: self.absent,
                interfaces: Vec::new(),
                all_interfaces: Vec::new(),
                generic_args: Vec::new(),
            }),
        );

        let supertypes = reflection.direct_supertypes(mirror);
        let (base, interfaces, all_interfaces) = match supertypes.split_first() {
            Some((base, interfaces)) => {
                let base = self.resolve(reflection, base);
                let all = SupertypeClosure::new(|ty: &TypeMirror| reflection.direct_supertypes(ty))
                    .collect(interfaces);
                let interfaces = interfaces
                    .iter()
                    .map(|ty| self.resolve(reflection, ty))
                    .collect();
                let all = all.iter().map(|ty| self.resolve(reflection, ty)).collect();
                (base, interfaces, all)
            }
            None => (self.absent, Vec::new(), Vec::new()),
        };

        let generic_args = mirror
            .args()
            .iter()
            .map(|arg| self.resolve(reflection, arg))
            .collect();

        if let Some(Type::Object(object)) = self.types.get_mut(typeref) {
            object.base = base;
            object.interfaces = interfaces;
            object.all_interfaces = dedup(all_interfaces);
            object.generic_args = generic_args;
        }

        trace!("Resolved supertypes of {}", self.name(typeref));
        typeref
    }

    fn intern(&mut self, name: String, ty: Type) -> Typeref {
        let typeref = self.types.insert(ty);
        debug!("New type encountered {name}. Registered as {typeref:?}.");

        let previous = self.by_name.insert(name, typeref);
        assert!(
            previous.is_none(),
            "type pool for {} interned the same canonical name twice",
            self.target
        );
        typeref
    }

    /// Format a given `Typeref` using this pool.
    pub fn fmt(&self, typeref: Typeref) -> impl fmt::Display + '_ {
        struct Fmt<'a> {
            pool: &'a TypePool,
            typeref: Typeref,
        }

        impl fmt::Display for Fmt<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.pool.get(self.typeref) {
                    Some(_) => f.write_str(self.pool.name(self.typeref)),
                    None => write!(f, "<unknown type {:?}>", self.typeref),
                }
            }
        }

        Fmt {
            pool: self,
            typeref,
        }
    }
}

impl Index<Typeref> for TypePool {
    type Output = Type;

    fn index(&self, typeref: Typeref) -> &Type {
        &self.types[typeref]
    }
}

fn dedup(typerefs: Vec<Typeref>) -> Vec<Typeref> {
    let mut seen = std::collections::HashSet::new();
    typerefs
        .into_iter()
        .filter(|typeref| seen.insert(*typeref))
        .collect()
}
