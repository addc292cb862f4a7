//! Type descriptors as delivered by the reflection source.
//!
//! A [`TypeMirror`] is the unresolved, textual view of a type. The pool turns
//! mirrors into interned [`Type`](super::Type) values.
use std::fmt;

use strum::{EnumIs, EnumTryAs};

/// An unresolved type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIs, EnumTryAs)]
pub enum TypeMirror {
    /// A primitive such as `int` or `boolean`.
    Primitive(String),

    /// An array of the boxed component type.
    Array(Box<TypeMirror>),

    /// A declared class or interface with its generic arguments.
    Declared(DeclaredMirror),

    /// A generic type parameter (`T`).
    Variable(String),

    /// "No value", the return type of a method returning nothing.
    Void,
}

/// Name and generic arguments of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclaredMirror {
    pub name: String,
    pub args: Vec<TypeMirror>,
}

impl TypeMirror {
    pub fn primitive(name: impl Into<String>) -> Self {
        TypeMirror::Primitive(name.into())
    }

    pub fn array_of(component: TypeMirror) -> Self {
        TypeMirror::Array(Box::new(component))
    }

    pub fn declared(name: impl Into<String>) -> Self {
        Self::generic(name, Vec::new())
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeMirror>) -> Self {
        TypeMirror::Declared(DeclaredMirror {
            name: name.into(),
            args,
        })
    }

    pub fn variable(name: impl Into<String>) -> Self {
        TypeMirror::Variable(name.into())
    }

    /// Name of the declaration behind this mirror, without generic arguments.
    pub fn erased_name(&self) -> Option<&str> {
        match self {
            TypeMirror::Declared(declared) => Some(&declared.name),
            _ => None,
        }
    }

    /// Generic arguments, empty for anything but declared types.
    pub fn args(&self) -> &[TypeMirror] {
        match self {
            TypeMirror::Declared(declared) => &declared.args,
            _ => &[],
        }
    }

    /// Replace every type variable named in `params` by the argument at the
    /// same position in `args`. Variables without a counterpart are kept.
    pub fn substitute(&self, params: &[String], args: &[TypeMirror]) -> TypeMirror {
        match self {
            TypeMirror::Variable(name) => params
                .iter()
                .position(|param| param == name)
                .and_then(|idx| args.get(idx))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeMirror::Array(component) => {
                TypeMirror::array_of(component.substitute(params, args))
            }
            TypeMirror::Declared(declared) => TypeMirror::generic(
                declared.name.clone(),
                declared
                    .args
                    .iter()
                    .map(|arg| arg.substitute(params, args))
                    .collect(),
            ),
            TypeMirror::Primitive(_) | TypeMirror::Void => self.clone(),
        }
    }
}

impl fmt::Display for TypeMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeMirror::Primitive(name) | TypeMirror::Variable(name) => f.write_str(name),
            TypeMirror::Array(component) => write!(f, "{component}[]"),
            TypeMirror::Declared(declared) => {
                f.write_str(&declared.name)?;
                if !declared.args.is_empty() {
                    f.write_str("<")?;
                    for (idx, arg) in declared.args.iter().enumerate() {
                        if idx > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeMirror::Void => f.write_str("void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_text() {
        let map = TypeMirror::generic(
            "java.util.Map",
            vec![
                TypeMirror::declared("java.lang.String"),
                TypeMirror::array_of(TypeMirror::primitive("int")),
            ],
        );
        assert_eq!(map.to_string(), "java.util.Map<java.lang.String,int[]>");
        assert_eq!(TypeMirror::Void.to_string(), "void");
    }

    #[test]
    fn substitution_reaches_nested_arguments() {
        let params = vec!["T".to_string()];
        let args = vec![TypeMirror::declared("a.Text")];
        let list_of_t = TypeMirror::generic("a.List", vec![TypeMirror::variable("T")]);

        assert_eq!(
            list_of_t.substitute(&params, &args).to_string(),
            "a.List<a.Text>"
        );
        assert_eq!(
            TypeMirror::variable("U").substitute(&params, &args),
            TypeMirror::variable("U"),
            "unknown variables are left alone"
        );
    }
}
