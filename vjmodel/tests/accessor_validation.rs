use std::sync::Arc;

use vjmodel::{
    Build, ClazzBuilder, Configuration, DiagnosticKind, Severity,
    name::SELF_REFERENCE,
    reflect::{Declaration, DeclarationSet, MethodDescriptor, Reflection, ResolvedSignature},
    types::TypeMirror,
};

fn int() -> TypeMirror {
    TypeMirror::primitive("int")
}

fn build_with(reflection: &DeclarationSet, interface: &str, tolerate: bool) -> Build {
    let config = Configuration {
        import_classes: Vec::new(),
        ignore_malformed_properties: tolerate,
        ..Configuration::default()
    };
    ClazzBuilder::new()
        .build(reflection, interface, Arc::new(config))
        .expect("target declaration should be known")
}

fn fluent() -> DeclarationSet {
    DeclarationSet::new().with(
        Declaration::interface("app.Fluent")
            .method(MethodDescriptor::new("setA", TypeMirror::Void).param("a", int()))
            .method(
                MethodDescriptor::new("setB", TypeMirror::declared("app.Fluent")).param("b", int()),
            )
            .method(
                MethodDescriptor::new("setC", TypeMirror::declared("app.FluentImpl"))
                    .param("c", int()),
            )
            .method(
                MethodDescriptor::new("setD", TypeMirror::declared(SELF_REFERENCE))
                    .param("d", int()),
            )
            .method(
                MethodDescriptor::new("setE", TypeMirror::declared("app.Text")).param("e", int()),
            ),
    )
}

#[test]
fn setter_return_types() {
    let build = build_with(&fluent(), "app.Fluent", false);

    let rejected: Vec<_> = build.diagnostics.iter().collect();
    assert_eq!(rejected.len(), 1, "only setE returns a foreign type");
    assert_eq!(rejected[0].kind, DiagnosticKind::MalformedSetter);
    assert_eq!(rejected[0].severity, Severity::Error);
    assert_eq!(rejected[0].location.as_str(), "app.Fluent.setE");
    assert!(rejected[0].message.contains("app.Fluent.setE(int)"));

    let clazz = &build.clazz;
    let names: Vec<_> = clazz.members().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d"], "rejected setter is dropped");
    assert!(clazz.methods().is_empty());

    for name in ["a", "b", "c", "d"] {
        let member = clazz.member_by_name(name).unwrap();
        assert!(member.is_mutable(), "setter of `{name}` writes the member");
        assert!(!member.is_final());
    }

    let c = clazz.properties().iter().find(|p| p.name == "setC").unwrap();
    assert_eq!(c.return_type, clazz.types().self_type());
    assert!(build.has_errors());
}

#[test]
fn tolerated_setter_becomes_a_plain_method() {
    let build = build_with(&fluent(), "app.Fluent", true);
    assert!(build.diagnostics.is_empty());

    let clazz = build.into_renderable().expect("nothing was reported");
    assert_eq!(clazz.members().len(), 4);
    assert_eq!(clazz.methods().len(), 1);
    assert_eq!(clazz.methods()[0].name, "setE");
    assert!(clazz.is_abstract(), "nobody implements the degraded setter");
}

#[test]
fn chained_setter_requires_synchronized_access() {
    let reflection = DeclarationSet::new().with(
        Declaration::interface("app.Person")
            .method(MethodDescriptor::new("getName", TypeMirror::declared("app.Text")))
            .method(
                MethodDescriptor::new("setName", TypeMirror::declared("app.Person"))
                    .param("name", TypeMirror::declared("app.Text")),
            ),
    );
    let config = Configuration {
        import_classes: Vec::new(),
        synchronized_access_enabled: true,
        ..Configuration::default()
    };

    let build = ClazzBuilder::new()
        .build(&reflection, "app.Person", Arc::new(config))
        .unwrap();
    assert!(build.diagnostics.is_empty(), "{:?}", build.diagnostics);

    let clazz = build.clazz;
    let name = clazz.member_by_name("name").unwrap();
    assert_eq!(name.properties.len(), 2);
    assert!(name.is_mutable(), "a chained setter still writes the member");
    assert!(!name.is_final());
    assert!(clazz.is_synchronized());
}

#[test]
fn fluent_setter_inherited_from_an_ancestor() {
    let reflection = DeclarationSet::new()
        .with(
            Declaration::interface("app.Base").method(
                MethodDescriptor::new("setX", TypeMirror::declared("app.Base")).param("x", int()),
            ),
        )
        .with(Declaration::interface("app.Child").extends(TypeMirror::declared("app.Base")));

    let build = build_with(&reflection, "app.Child", false);
    assert!(build.diagnostics.is_empty(), "{:?}", build.diagnostics);
    assert_eq!(build.clazz.members().len(), 1);
    assert!(build.clazz.members()[0].is_mutable());
}

#[test]
fn malformed_accessors_are_reported_and_dropped() {
    let reflection = DeclarationSet::new().with(
        Declaration::interface("app.Bad")
            .method(MethodDescriptor::new("getValue", int()).param("index", int()))
            .method(MethodDescriptor::new("isEmpty", TypeMirror::primitive("boolean")))
            .method(
                MethodDescriptor::new("setRange", TypeMirror::Void)
                    .param("from", int())
                    .param("to", int()),
            )
            .method(MethodDescriptor::new("setNothing", TypeMirror::Void)),
    );

    let build = build_with(&reflection, "app.Bad", false);
    let getter = build
        .diagnostics
        .of_kind(DiagnosticKind::MalformedGetter)
        .next()
        .unwrap();
    assert_eq!(getter.location.as_str(), "app.Bad.getValue");
    assert_eq!(
        build.diagnostics.of_kind(DiagnosticKind::MalformedSetter).count(),
        2
    );
    assert_eq!(build.diagnostics.error_count(), 3);

    let names: Vec<_> = build.clazz.members().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["empty"]);
    assert!(build.clazz.methods().is_empty(), "dropped, not degraded");

    let err = build.into_renderable().unwrap_err();
    assert!(err.to_string().contains("3 error diagnostic"));

    let tolerated = build_with(&reflection, "app.Bad", true);
    assert!(tolerated.diagnostics.is_empty());
    assert_eq!(tolerated.clazz.methods().len(), 3);
}

#[test]
fn conflicting_member_types() {
    let reflection = DeclarationSet::new()
        .with(Declaration::interface("app.A").method(MethodDescriptor::new("getX", int())))
        .with(
            Declaration::interface("app.B")
                .method(MethodDescriptor::new("getX", TypeMirror::primitive("long"))),
        )
        .with(
            Declaration::interface("app.C")
                .extends(TypeMirror::declared("app.A"))
                .extends(TypeMirror::declared("app.B")),
        );

    let build = build_with(&reflection, "app.C", false);
    let conflicts: Vec<_> = build
        .diagnostics
        .of_kind(DiagnosticKind::ConflictingPropertyType)
        .collect();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].location.as_str(), "app.B.getX");

    let x = build.clazz.member_by_name("x").unwrap();
    assert_eq!(build.clazz.types().name(x.ty), "int", "first accessor wins");
    assert_eq!(x.properties.len(), 1);

    let tolerated = build_with(&reflection, "app.C", true);
    assert_eq!(tolerated.clazz.members().len(), 1);
    assert_eq!(tolerated.clazz.methods()[0].name, "getX");
}

#[test]
fn synthesized_parameter_names_are_replaced() {
    let reflection = DeclarationSet::new().with(
        Declaration::interface("app.Compiled")
            .method(MethodDescriptor::new("setName", TypeMirror::Void).param("arg0", int()))
            .method(MethodDescriptor::new("setAge", TypeMirror::Void).param("arg0", int()))
            .method(MethodDescriptor::new("setSize", TypeMirror::Void).param("size", int())),
    );

    let build = build_with(&reflection, "app.Compiled", false);
    let warnings: Vec<_> = build.diagnostics.iter().collect();
    assert_eq!(warnings.len(), 1, "reported once per build");
    assert_eq!(warnings[0].kind, DiagnosticKind::ParameterNamesUnavailable);
    assert_eq!(warnings[0].severity, Severity::Warning);
    assert!(!build.has_errors());

    let clazz = &build.clazz;
    for member in clazz.members() {
        let setter = clazz.properties_of(member).next().unwrap();
        assert_eq!(
            setter.parameter.as_ref().unwrap().name,
            member.name,
            "parameter of {} should carry the member name",
            setter.name
        );
    }
}

/// Reflection source that loses the parameter types of every method.
struct Lossy(DeclarationSet);

impl Reflection for Lossy {
    fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.0.declaration(name)
    }

    fn root_object(&self) -> Option<&TypeMirror> {
        self.0.root_object()
    }

    fn resolve_method(&self, owner: &TypeMirror, method: &MethodDescriptor) -> ResolvedSignature {
        let mut signature = self.0.resolve_method(owner, method);
        signature.parameter_types.clear();
        signature
    }
}

#[test]
fn parameter_count_mismatch_is_a_fault() {
    let reflection = Lossy(fluent());
    let result = std::panic::catch_unwind(|| {
        ClazzBuilder::new().build(
            &reflection,
            "app.Fluent",
            Arc::new(Configuration::default()),
        )
    });
    assert!(result.is_err(), "mismatched signatures must not be reported as diagnostics");

    let reflection = Lossy(DeclarationSet::new().with(
        Declaration::interface("app.Empty").method(MethodDescriptor::new("getX", int())),
    ));
    let build = ClazzBuilder::new()
        .build(&reflection, "app.Empty", Arc::new(Configuration::default()))
        .expect("methods without parameters are unaffected");
    assert_eq!(build.clazz.members().len(), 1);
    assert_eq!(
        build.diagnostics.of_kind(DiagnosticKind::ImportTypeNotFound).count(),
        2,
        "default imports are unknown to this source"
    );
}
