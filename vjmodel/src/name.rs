//! Naming helpers shared by the classifier, the type pool and the builder.
//!
//! Qualified names are dotted (`a.b.Foo`) and may carry a generic qualifier
//! (`a.b.Foo<c.Bar,T>`). Every helper here works on that textual form.

/// Placeholder type name standing for "the class being generated".
///
/// Any occurrence inside a textual type form is rewritten to the target's
/// own qualified name before interning.
pub const SELF_REFERENCE: &str = "vjmodel.SelfReference";

/// Words that can never be used as a member identifier as-is.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Remove the generic qualifier, `a.Foo<T>` becomes `a.Foo`.
pub fn strip_generic_qualifier(name: &str) -> &str {
    match name.find('<') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// The generic qualifier including its brackets, or an empty string.
pub fn generic_qualifier(name: &str) -> &str {
    match name.find('<') {
        Some(idx) => &name[idx..],
        None => "",
    }
}

/// Split the top-level generic arguments of `name`.
///
/// `a.Map<b.K,c.List<d.V>>` yields `["b.K", "c.List<d.V>"]` and a name
/// without qualifier yields no arguments. [`None`] when the brackets do not
/// balance, as in `a.Base<b.C`.
pub fn generic_qualifier_names(name: &str) -> Option<Vec<String>> {
    let qualifier = generic_qualifier(name);
    if qualifier.is_empty() {
        return Some(Vec::new());
    }

    let inner = qualifier.strip_prefix('<')?.strip_suffix('>')?;
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(inner[start..idx].trim().to_string());
                start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }

    let last = inner[start..].trim();
    if !last.is_empty() {
        parts.push(last.to_string());
    }
    Some(parts)
}

/// Package part of a qualified name. Empty for the default package.
pub fn package_of(qualified: &str) -> &str {
    let erased = strip_generic_qualifier(qualified);
    match erased.rfind('.') {
        Some(idx) => &erased[..idx],
        None => "",
    }
}

/// Simple (unqualified) name, generic qualifier preserved.
pub fn simple_name(qualified: &str) -> &str {
    let erased = strip_generic_qualifier(qualified);
    match erased.rfind('.') {
        Some(idx) => &qualified[idx + 1..],
        None => qualified,
    }
}

pub fn is_qualified(name: &str) -> bool {
    strip_generic_qualifier(name).contains('.')
}

/// Prefix `name` with `package` unless it is already qualified.
pub fn ensure_qualified(name: &str, package: &str) -> String {
    if is_qualified(name) || package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

/// Lower-case the first character, except when the first two characters are
/// both upper case (`URL` stays `URL`, `Name` becomes `name`).
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    if let Some(second) = chars.next() {
        if first.is_uppercase() && second.is_uppercase() {
            return name.to_string();
        }
    }

    first.to_lowercase().chain(name.chars().skip(1)).collect()
}

/// Turn `name` into something usable as an identifier: illegal characters
/// become `_`, a leading digit gets a `_` prefix and reserved words get a
/// `_` suffix.
pub fn make_safe_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                ch
            } else {
                '_'
            }
        })
        .collect();

    if ident.chars().next().is_some_and(|ch| ch.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    }

    ident
}

/// Parameter names invented by a reflection source that had no access to
/// the real ones look like `arg0`, `arg1`, ...
pub fn is_synthesized_parameter_name(name: &str) -> bool {
    name.strip_prefix("arg")
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|ch| ch.is_ascii_digit()))
}

/// Derive a class name from the (qualified) interface it implements.
///
/// `FooInterface` becomes `FooClass`, `IFoo` becomes `Foo` and anything else
/// gets an `Impl` suffix. The package is dropped, the generic qualifier is
/// kept.
pub fn class_name_from_interface_name(qualified_interface: &str) -> String {
    let simple = simple_name(qualified_interface);
    let qualifier = generic_qualifier(simple);
    let base = strip_generic_qualifier(simple);

    let mut chars = base.chars();
    let renamed = match (chars.next(), chars.next()) {
        _ if base.len() > "Interface".len() && base.ends_with("Interface") => {
            format!("{}Class", &base[..base.len() - "Interface".len()])
        }
        (Some('I'), Some(second)) if second.is_uppercase() => base[1..].to_string(),
        _ => format!("{base}Impl"),
    };

    format!("{renamed}{qualifier}")
}
