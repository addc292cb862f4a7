use crate::{
    classify::PropertyKind,
    model::{MemberId, Parameter},
    types::Typeref,
};

/// One accessor method's view onto a [`Member`](super::Member).
///
/// Getters have no parameter and return the member type. Setters have a
/// single parameter of the member type and return nothing, their declaring
/// interface or the generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub kind: PropertyKind,
    pub declaring_type: Typeref,
    /// Name of the accessor method.
    pub name: String,
    pub return_type: Typeref,
    pub parameter: Option<Parameter>,
    pub member: MemberId,
    pub doc: String,
}

impl Property {
    pub fn is_getter(&self) -> bool {
        self.kind.is_getter()
    }

    pub fn is_setter(&self) -> bool {
        self.kind.is_setter()
    }
}
