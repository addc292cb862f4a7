use bitflags::bitflags;
use smallvec::SmallVec;

use crate::{
    model::PropertyId,
    types::Typeref,
};

bitflags! {
    /// Policy flags of a member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemberFlags: u8 {
        /// Configuration prefers final members.
        const FINAL_PREFERRED = 1 << 0;
        /// Assignments must be guarded against null (reference-typed members only).
        const ENSURE_NOT_NULL = 1 << 1;
        /// A setter writes this member.
        const MUTABLE = 1 << 2;
    }
}

/// A storage slot of the generated class, inferred from its accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub ty: Typeref,
    /// Accessors in discovery order.
    pub properties: SmallVec<PropertyId, 2>,
    pub flags: MemberFlags,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: Typeref, flags: MemberFlags) -> Self {
        Self {
            name: name.into(),
            ty,
            properties: SmallVec::new(),
            flags,
        }
    }

    pub fn is_mutable(&self) -> bool {
        self.flags.contains(MemberFlags::MUTABLE)
    }

    pub fn is_final(&self) -> bool {
        self.flags.contains(MemberFlags::FINAL_PREFERRED) && !self.is_mutable()
    }

    pub fn ensures_not_null(&self) -> bool {
        self.flags.contains(MemberFlags::ENSURE_NOT_NULL)
    }
}
