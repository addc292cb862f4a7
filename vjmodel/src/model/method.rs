use crate::{model::Parameter, types::Typeref};

/// An abstract method that is not an accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub declaring_type: Typeref,
    pub name: String,
    pub return_type: Typeref,
    pub parameters: Vec<Parameter>,
    pub doc: String,
    /// Some other part of the generator implements this method.
    pub claimed: bool,
}

impl Method {
    /// Methods nobody implements make the generated class abstract.
    pub fn is_unclaimed(&self) -> bool {
        !self.claimed
    }
}
