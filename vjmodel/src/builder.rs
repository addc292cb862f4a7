//! Model building.
//!
//! [`ClazzBuilder::build`] turns one reflected interface into a complete
//! [`Clazz`]:
//!
//! 1. name the target and create its [`TypePool`];
//! 2. resolve the base type, the implemented interfaces and their closure;
//! 3. fold every abstract method of the closure through the [`Merger`];
//! 4. filter the import candidates and complete the clazz.
//!
//! Policy violations are recorded as [`Diagnostics`] and never abort the
//! build, so a model with errors is still available for inspection.
use std::sync::Arc;

use log::{debug, info};

use crate::{
    closure::SupertypeClosure,
    config::Configuration,
    diagnostics::{DiagnosticKind, DiagnosticSink, Diagnostics},
    error::{VjError, VjResult},
    imports::filter_import_types,
    merge::{Accumulator, Candidate, Merger},
    model::{Clazz, TypeInfo},
    name::{
        class_name_from_interface_name, ensure_qualified, generic_qualifier_names, is_qualified,
        package_of, strip_generic_qualifier,
    },
    reflect::{Location, Reflection},
    types::{TypeMirror, TypePool, Typeref},
};

/// Outcome of a build: the model and everything reported while building it.
#[derive(Debug)]
pub struct Build {
    pub clazz: Clazz,
    pub diagnostics: Diagnostics,
}

impl Build {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// The model, provided no error diagnostic was recorded.
    pub fn into_renderable(self) -> VjResult<Clazz> {
        if self.has_errors() {
            return Err(VjError::ErrorsReported {
                clazz: self.clazz.qualified_name().to_string(),
                count: self.diagnostics.error_count(),
            });
        }
        Ok(self.clazz)
    }
}

/// Builds [`Clazz`] models. Holds no state between builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClazzBuilder;

impl ClazzBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the model of the class implementing `interface_name`.
    ///
    /// # Errors
    ///
    /// [`VjError::UnknownTarget`] when the reflection source does not know
    /// the interface. Everything else is reported through
    /// [`Build::diagnostics`].
    ///
    /// # Panics
    ///
    /// When the reflection source resolves a method to a different number
    /// of parameter types than it declares parameter names.
    pub fn build<R: Reflection + ?Sized>(
        &self,
        reflection: &R,
        interface_name: &str,
        config: Arc<Configuration>,
    ) -> VjResult<Build> {
        let declaration = reflection
            .declaration(strip_generic_qualifier(interface_name))
            .ok_or_else(|| VjError::UnknownTarget(interface_name.to_string()))?;
        let interface = declaration.mirror();
        let location = &declaration.location;

        let class_name = target_name(&interface, &config);
        debug!("Building {class_name} from {interface}");

        let mut diagnostics = Diagnostics::new();
        let mut pool = TypePool::new(class_name.clone());
        let clazz = Clazz::new(class_name, declaration.doc.clone(), Arc::clone(&config));
        let package = clazz.package().to_string();

        // Type part.
        let base = match named_type(
            reflection,
            config.base_clazz_name(),
            &package,
            location,
            &mut diagnostics,
        ) {
            Some(mirror) => pool.resolve(reflection, &mirror),
            None => pool.absent(),
        };

        let mut direct = vec![interface.clone()];
        for name in config
            .extra_interface_names
            .iter()
            .filter(|name| !name.is_empty())
        {
            let Some(mirror) = named_type(reflection, name, &package, location, &mut diagnostics)
            else {
                continue;
            };
            let is_class = mirror
                .erased_name()
                .and_then(|erased| reflection.declaration(erased))
                .is_some_and(|declaration| declaration.kind.is_class());
            if is_class {
                diagnostics.emit(DiagnosticKind::NotAnInterface, location, name);
                continue;
            }
            direct.push(mirror);
        }

        let closure = SupertypeClosure::new(|ty: &TypeMirror| reflection.declared_interfaces(ty))
            .collect(&direct);

        let interfaces = resolve_all(&mut pool, reflection, &direct);
        let all_interfaces = resolve_all(&mut pool, reflection, &closure);
        let generic_args = resolve_all(&mut pool, reflection, interface.args());

        let clazz = clazz.init_type(TypeInfo {
            base,
            interfaces: interfaces.clone(),
            all_interfaces,
            generic_args,
        });

        // Content part.
        let candidates = closure.iter().flat_map(|owner| {
            owner
                .erased_name()
                .and_then(|name| reflection.declaration(name))
                .into_iter()
                .flat_map(|declaration| declaration.methods.iter())
                .filter(|method| !method.is_default)
                .map(move |method| Candidate {
                    owner: owner.clone(),
                    method,
                })
        });

        let acc = {
            let mut merger = Merger::new(reflection, &config, &mut pool, &mut diagnostics);
            candidates.fold(Accumulator::default(), |acc, candidate| {
                merger.admit(acc, candidate)
            })
        };

        if acc.synthesized_parameter_names() {
            diagnostics.emit(
                DiagnosticKind::ParameterNamesUnavailable,
                location,
                &interface.to_string(),
            );
        }

        let mut import_candidates = interfaces;
        if base != pool.absent() {
            import_candidates.push(base);
        }
        for name in &config.import_classes {
            let Some(qualified) = find_declared(reflection, strip_generic_qualifier(name), &package)
            else {
                diagnostics.emit(DiagnosticKind::ImportTypeNotFound, location, name);
                continue;
            };
            let mirror = match reflection.declaration(&qualified) {
                Some(imported) => imported.mirror(),
                None => TypeMirror::declared(qualified),
            };
            import_candidates.push(pool.resolve(reflection, &mirror));
        }
        let imports = filter_import_types(
            &pool,
            &import_candidates,
            &package,
            &config.implicit_package,
        );

        let clazz = clazz.init_content(acc.into_content(imports), pool);
        info!(
            "Built {}: {} members, {} properties, {} methods, {} diagnostics",
            clazz.qualified_name(),
            clazz.members().len(),
            clazz.properties().len(),
            clazz.methods().len(),
            diagnostics.len()
        );

        Ok(Build { clazz, diagnostics })
    }
}

/// Qualified name of the generated class.
fn target_name(interface: &TypeMirror, config: &Configuration) -> String {
    let interface_name = interface.to_string();
    let name = match config.name.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => class_name_from_interface_name(&interface_name),
    };

    if is_qualified(&name) {
        return name;
    }

    let package = config
        .output_package
        .as_deref()
        .unwrap_or_else(|| package_of(&interface_name));
    ensure_qualified(&name, package)
}

/// Resolve a configured type name such as `a.Base<b.C>`.
///
/// A bare name is tried as is, then inside `package`. Unknown or malformed
/// names are reported as [`DiagnosticKind::ClassNotFound`]; when only a
/// generic argument is unknown the raw type is used.
fn named_type<R: Reflection + ?Sized, D: DiagnosticSink + ?Sized>(
    reflection: &R,
    name: &str,
    package: &str,
    location: &Location,
    sink: &mut D,
) -> Option<TypeMirror> {
    let parts = generic_qualifier_names(name)
        .zip(find_declared(reflection, strip_generic_qualifier(name), package));
    let Some((arg_names, qualified)) = parts else {
        sink.emit(DiagnosticKind::ClassNotFound, location, name);
        return None;
    };

    let mut args = Vec::new();
    for arg in arg_names {
        match named_type(reflection, &arg, package, location, sink) {
            Some(mirror) => args.push(mirror),
            None => return Some(TypeMirror::declared(qualified)),
        }
    }
    Some(TypeMirror::generic(qualified, args))
}

fn find_declared<R: Reflection + ?Sized>(reflection: &R, name: &str, package: &str) -> Option<String> {
    let root = reflection.root_object().and_then(TypeMirror::erased_name);

    [name.to_string(), ensure_qualified(name, package)]
        .into_iter()
        .find(|candidate| {
            reflection.declaration(candidate).is_some() || root == Some(candidate.as_str())
        })
}

fn resolve_all<R: Reflection + ?Sized>(
    pool: &mut TypePool,
    reflection: &R,
    mirrors: &[TypeMirror],
) -> Vec<Typeref> {
    mirrors
        .iter()
        .map(|mirror| pool.resolve(reflection, mirror))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{Declaration, DeclarationSet, MethodDescriptor};

    fn reflection() -> DeclarationSet {
        DeclarationSet::new()
            .with(Declaration::interface("app.Person"))
            .with(Declaration::class("app.Base").type_param("T"))
            .with(Declaration::class("app.Text"))
            .with(Declaration::interface("app.IShape").type_param("T"))
    }

    #[test]
    fn target_names_follow_the_interface() {
        let config = Configuration::default();
        assert_eq!(
            target_name(&TypeMirror::declared("app.Person"), &config),
            "app.PersonImpl"
        );
        assert_eq!(
            target_name(
                &TypeMirror::generic("app.IShape", vec![TypeMirror::variable("T")]),
                &config
            ),
            "app.Shape<T>"
        );

        let config = Configuration {
            name: Some("PersonValue".into()),
            output_package: Some("gen".into()),
            ..Configuration::default()
        };
        assert_eq!(
            target_name(&TypeMirror::declared("app.Person"), &config),
            "gen.PersonValue"
        );

        let config = Configuration {
            name: Some("other.PersonValue".into()),
            ..Configuration::default()
        };
        assert_eq!(
            target_name(&TypeMirror::declared("app.Person"), &config),
            "other.PersonValue"
        );
    }

    #[test]
    fn named_types_are_qualified_with_the_target_package() {
        let reflection = reflection();
        let mut sink = Diagnostics::new();
        let location = Location::new("app.Person");

        let mirror = named_type(&reflection, "Base<Text>", "app", &location, &mut sink).unwrap();
        assert_eq!(mirror.to_string(), "app.Base<app.Text>");

        let root = named_type(&reflection, "java.lang.Object", "app", &location, &mut sink).unwrap();
        assert_eq!(root.to_string(), "java.lang.Object");
        assert!(sink.is_empty());
    }

    #[test]
    fn unknown_names_are_reported() {
        let reflection = reflection();
        let mut sink = Diagnostics::new();
        let location = Location::new("app.Person");

        assert!(named_type(&reflection, "app.Missing", "app", &location, &mut sink).is_none());

        let raw = named_type(&reflection, "app.Base<app.Missing>", "app", &location, &mut sink);
        assert_eq!(raw, Some(TypeMirror::declared("app.Base")));
        assert_eq!(sink.of_kind(DiagnosticKind::ClassNotFound).count(), 2);
    }

    #[test]
    fn unknown_target_is_an_error() {
        let err = ClazzBuilder::new()
            .build(&reflection(), "app.Nope", Arc::new(Configuration::default()))
            .unwrap_err();
        assert!(err.is_unknown_target());
    }

    #[test]
    fn default_methods_are_skipped() {
        let reflection = reflection().with(
            Declaration::interface("app.Counter")
                .method(MethodDescriptor::new("getCount", TypeMirror::primitive("int")))
                .method(
                    MethodDescriptor::new("getDouble", TypeMirror::primitive("int")).default_body(),
                ),
        );
        let config = Configuration {
            import_classes: Vec::new(),
            ..Configuration::default()
        };

        let build = ClazzBuilder::new()
            .build(&reflection, "app.Counter", Arc::new(config))
            .unwrap();
        assert_eq!(build.clazz.members().len(), 1);
        assert_eq!(build.clazz.properties()[0].name, "getCount");
        assert!(build.diagnostics.is_empty());
    }
}
