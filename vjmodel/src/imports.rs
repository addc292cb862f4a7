//! Import set filtering.
use std::collections::HashSet;

use crate::{
    name::strip_generic_qualifier,
    types::{TypePool, Typeref},
};

/// Keep the candidates the generated unit actually has to import.
///
/// A candidate is dropped when it is not an importable object type (no
/// package), lives in `implicit_package` or in `target_package`, or when an
/// earlier candidate has the same qualified name. Survivors keep their
/// relative order, so filtering an already filtered list changes nothing.
pub fn filter_import_types(
    pool: &TypePool,
    candidates: &[Typeref],
    target_package: &str,
    implicit_package: &str,
) -> Vec<Typeref> {
    let mut seen = HashSet::new();

    candidates
        .iter()
        .copied()
        .filter(|candidate| match pool.package(*candidate) {
            None | Some("") => false,
            Some(package) => package != implicit_package && package != target_package,
        })
        .filter(|candidate| seen.insert(strip_generic_qualifier(pool.name(*candidate))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reflect::DeclarationSet, types::TypeMirror};

    fn pool_with(names: &[&str]) -> (TypePool, Vec<Typeref>) {
        let reflection = DeclarationSet::new();
        let mut pool = TypePool::new("app.model.PersonImpl");
        let refs = names
            .iter()
            .map(|name| {
                let mirror = match *name {
                    "int" => TypeMirror::primitive("int"),
                    "void" => TypeMirror::Void,
                    other => match other.split_once('<') {
                        Some((raw, arg)) => TypeMirror::generic(
                            raw,
                            vec![TypeMirror::declared(arg.trim_end_matches('>'))],
                        ),
                        None => TypeMirror::declared(other),
                    },
                };
                pool.resolve(&reflection, &mirror)
            })
            .collect();
        (pool, refs)
    }

    fn names(pool: &TypePool, refs: &[Typeref]) -> Vec<String> {
        refs.iter().map(|r| pool.name(*r).to_string()).collect()
    }

    #[test]
    fn drops_implicit_same_package_and_duplicates() {
        let (pool, refs) = pool_with(&[
            "app.api.Person",
            "java.lang.Object",
            "app.model.Helper",
            "java.util.Objects",
            "app.api.Person",
            "java.util.List<app.api.Person>",
            "java.util.List<java.lang.String>",
            "int",
            "void",
            "Unpackaged",
        ]);

        let filtered = filter_import_types(&pool, &refs, "app.model", "java.lang");
        assert_eq!(
            names(&pool, &filtered),
            vec!["app.api.Person", "java.util.Objects", "java.util.List<app.api.Person>"]
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let (pool, refs) = pool_with(&[
            "java.util.Objects",
            "app.api.Person",
            "java.util.Arrays",
            "app.api.Person",
        ]);

        let once = filter_import_types(&pool, &refs, "app.model", "java.lang");
        let twice = filter_import_types(&pool, &once, "app.model", "java.lang");
        assert_eq!(once, twice);
        assert_eq!(
            names(&pool, &once),
            vec!["java.util.Objects", "app.api.Person", "java.util.Arrays"],
            "survivors keep first-occurrence order"
        );
    }

    #[test]
    fn self_type_is_never_imported() {
        let (pool, _) = pool_with(&[]);
        let filtered = filter_import_types(&pool, &[pool.self_type()], "app.model", "java.lang");
        assert!(filtered.is_empty());
    }
}
