//! Accessor validation and member merging.
//!
//! The builder folds the flattened method stream of all ancestor interfaces
//! through [`Merger::admit`]. Each step takes the [`Accumulator`] by value
//! and returns it updated: accessors are validated and attached to the
//! member named after them, everything else becomes a plain [`Method`].
//! Because the same member name always maps to the same [`Member`], an
//! accessor inherited along several paths collapses into one member.
use std::collections::HashMap;

use log::trace;

use crate::{
    classify::{Classification, PropertyKind, classify},
    config::Configuration,
    diagnostics::{DiagnosticKind, DiagnosticSink},
    model::{Content, Member, MemberFlags, MemberId, Method, Parameter, Property, PropertyId},
    name::{SELF_REFERENCE, is_synthesized_parameter_name},
    reflect::{MethodDescriptor, Reflection, ResolvedSignature},
    types::{Type, TypeMirror, TypePool, Typeref, VOID},
};

/// One abstract method together with the ancestor type it was reached through.
#[derive(Debug, Clone)]
pub struct Candidate<'r> {
    pub owner: TypeMirror,
    pub method: &'r MethodDescriptor,
}

/// State threaded through the fold.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    members: Vec<Member>,
    member_index: HashMap<String, MemberId>,
    properties: Vec<Property>,
    methods: Vec<Method>,
    synthesized_parameter_names: bool,
}

impl Accumulator {
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Whether any setter parameter name had to be replaced by its member name.
    pub fn synthesized_parameter_names(&self) -> bool {
        self.synthesized_parameter_names
    }

    pub fn into_content(self, imports: Vec<Typeref>) -> Content {
        Content {
            members: self.members,
            properties: self.properties,
            methods: self.methods,
            imports,
        }
    }
}

/// Method shape after resolution through its owner.
struct Resolved {
    declaring_type: Typeref,
    return_type: Typeref,
    parameters: Vec<Parameter>,
    signature: ResolvedSignature,
}

/// Borrowed build context used by each fold step.
pub struct Merger<'a, R: Reflection + ?Sized, D: DiagnosticSink + ?Sized> {
    reflection: &'a R,
    config: &'a Configuration,
    pool: &'a mut TypePool,
    sink: &'a mut D,
}

impl<'a, R: Reflection + ?Sized, D: DiagnosticSink + ?Sized> Merger<'a, R, D> {
    pub fn new(
        reflection: &'a R,
        config: &'a Configuration,
        pool: &'a mut TypePool,
        sink: &'a mut D,
    ) -> Self {
        Self {
            reflection,
            config,
            pool,
            sink,
        }
    }

    /// Fold step: admit one candidate into the accumulator.
    pub fn admit(&mut self, mut acc: Accumulator, candidate: Candidate<'_>) -> Accumulator {
        let resolved = self.resolve(&candidate);
        let method = candidate.method;

        if let Some(classification) = classify(
            &method.name,
            self.config.getter_prefixes.as_slice(),
            self.config.setter_prefixes.as_slice(),
        ) {
            match self.check_shape(&acc, &candidate, &resolved, &classification) {
                Ok(member_type) => {
                    return self.attach(acc, &candidate, resolved, classification, member_type);
                }
                Err(kind) if !self.config.ignore_malformed_properties => {
                    let subject = describe(&candidate.owner, method, &resolved.signature);
                    self.sink.emit(kind, &method.location, &subject);
                    return acc;
                }
                Err(kind) => {
                    trace!("Tolerating {kind} `{}`, kept as plain method", method.name);
                }
            }
        }

        let claimed = self
            .config
            .implemented_method_names
            .iter()
            .any(|name| *name == method.name)
            || (self.config.comparable_enabled && method.name == self.config.ordering_method_name);

        acc.methods.push(Method {
            declaring_type: resolved.declaring_type,
            name: method.name.clone(),
            return_type: resolved.return_type,
            parameters: resolved.parameters,
            doc: method.doc.clone(),
            claimed,
        });
        acc
    }

    fn resolve(&mut self, candidate: &Candidate<'_>) -> Resolved {
        let method = candidate.method;
        let signature = self.reflection.resolve_method(&candidate.owner, method);

        assert_eq!(
            method.parameter_names.len(),
            signature.parameter_types.len(),
            "Numbers of parameters and parameter types of `{}.{}` do not match",
            candidate.owner,
            method.name
        );

        let declaring_type = self.pool.resolve(self.reflection, &candidate.owner);
        let return_type = self.pool.resolve(self.reflection, &signature.return_type);
        let parameters = method
            .parameter_names
            .iter()
            .zip(&signature.parameter_types)
            .map(|(name, ty)| Parameter::new(name.clone(), self.pool.resolve(self.reflection, ty)))
            .collect();

        Resolved {
            declaring_type,
            return_type,
            parameters,
            signature,
        }
    }

    /// Validate the accessor shape and return the member type it implies.
    fn check_shape(
        &self,
        acc: &Accumulator,
        candidate: &Candidate<'_>,
        resolved: &Resolved,
        classification: &Classification,
    ) -> Result<Typeref, DiagnosticKind> {
        let member_type = match classification.kind {
            PropertyKind::Getter => {
                if !resolved.parameters.is_empty() {
                    return Err(DiagnosticKind::MalformedGetter);
                }
                resolved.return_type
            }
            PropertyKind::Setter => {
                if resolved.parameters.len() != 1 {
                    return Err(DiagnosticKind::MalformedSetter);
                }

                let target = self.pool.target_name();
                let returned = resolved
                    .signature
                    .return_type
                    .to_string()
                    .replace(SELF_REFERENCE, target);
                if returned != VOID && returned != candidate.owner.to_string() && returned != target {
                    return Err(DiagnosticKind::MalformedSetter);
                }
                resolved.parameters[0].ty
            }
        };

        match acc.member_index.get(&classification.member_name) {
            Some(id) if acc.members[id.0].ty != member_type => {
                Err(DiagnosticKind::ConflictingPropertyType)
            }
            _ => Ok(member_type),
        }
    }

    fn attach(
        &mut self,
        mut acc: Accumulator,
        candidate: &Candidate<'_>,
        resolved: Resolved,
        classification: Classification,
        member_type: Typeref,
    ) -> Accumulator {
        let member_id = match acc.member_index.get(&classification.member_name) {
            Some(id) => *id,
            None => {
                let id = MemberId(acc.members.len());
                acc.members.push(Member::new(
                    classification.member_name.clone(),
                    member_type,
                    self.member_flags(member_type),
                ));
                acc.member_index
                    .insert(classification.member_name.clone(), id);
                id
            }
        };

        let member_name = acc.members[member_id.0].name.clone();
        let parameter = resolved.parameters.into_iter().next().map(|parameter| {
            if is_synthesized_parameter_name(&parameter.name) {
                acc.synthesized_parameter_names = true;
                parameter.renamed(member_name.clone())
            } else {
                parameter
            }
        });

        let property_id = PropertyId(acc.properties.len());
        acc.properties.push(Property {
            kind: classification.kind,
            declaring_type: resolved.declaring_type,
            name: candidate.method.name.clone(),
            return_type: resolved.return_type,
            parameter,
            member: member_id,
            doc: candidate.method.doc.clone(),
        });

        let member = &mut acc.members[member_id.0];
        member.properties.push(property_id);
        if classification.kind.is_setter() {
            member.flags |= MemberFlags::MUTABLE;
        }

        trace!(
            "Attached {} `{}` to member `{}`",
            classification.kind, candidate.method.name, member_name
        );
        acc
    }

    fn member_flags(&self, member_type: Typeref) -> MemberFlags {
        let mut flags = MemberFlags::empty();
        if self.config.final_members_enabled {
            flags |= MemberFlags::FINAL_PREFERRED;
        }
        let is_reference = matches!(
            self.pool[member_type],
            Type::Object(_) | Type::Array(_) | Type::SelfType
        );
        if self.config.ensure_not_null_enabled && is_reference {
            flags |= MemberFlags::ENSURE_NOT_NULL;
        }
        flags
    }
}

/// `owner.method(param, ...)`, as used in diagnostics.
fn describe(owner: &TypeMirror, method: &MethodDescriptor, signature: &ResolvedSignature) -> String {
    let params = signature
        .parameter_types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{owner}.{}({params})", method.name)
}
