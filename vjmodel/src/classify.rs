//! Accessor classification.
//!
//! Whether a method is a getter, a setter or a plain method is decided from
//! its name alone, against configurable prefix families.
use strum::{Display, EnumIs, IntoStaticStr};

use crate::name::{decapitalize, make_safe_identifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, Display, IntoStaticStr)]
pub enum PropertyKind {
    Getter,
    Setter,
}

/// Outcome of a successful classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Classification {
    pub kind: PropertyKind,
    /// Synthesized member name, decapitalized and identifier-safe.
    pub member_name: String,
}

/// Strip the first matching prefix (in configured order) and turn the rest
/// into a member name. A prefix only matches when at least one character
/// follows it.
pub fn synthesize_member_name<S: AsRef<str>>(method_name: &str, prefixes: &[S]) -> Option<String> {
    prefixes.iter().find_map(|prefix| {
        method_name
            .strip_prefix(prefix.as_ref())
            .filter(|rest| !rest.is_empty())
            .map(|rest| make_safe_identifier(&decapitalize(rest)))
    })
}

/// Classify `method_name`. Getter prefixes are tried before setter prefixes;
/// [`None`] means a plain method.
pub fn classify<S: AsRef<str>>(
    method_name: &str,
    getter_prefixes: &[S],
    setter_prefixes: &[S],
) -> Option<Classification> {
    let classified = synthesize_member_name(method_name, getter_prefixes)
        .map(|member_name| Classification {
            kind: PropertyKind::Getter,
            member_name,
        })
        .or_else(|| {
            synthesize_member_name(method_name, setter_prefixes).map(|member_name| Classification {
                kind: PropertyKind::Setter,
                member_name,
            })
        });

    log::trace!(
        "Classified `{method_name}` as {}",
        classified
            .as_ref()
            .map_or("plain method", |c| c.kind.into())
    );
    classified
}
