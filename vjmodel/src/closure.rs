//! Transitive supertype closure.
//!
//! The closure is computed over [`TypeMirror`]s with a caller supplied edge
//! function, so the same walk serves the pool (all direct supertypes) and the
//! builder (declared interfaces only).
use std::collections::HashSet;

use crate::types::TypeMirror;

/// Post-order walk over a supertype graph.
///
/// Ancestors are listed before the types that declare them and every type
/// appears once, at the position where it was first completed. The order
/// only depends on the order of the edges, so repeated builds agree.
pub struct SupertypeClosure<F> {
    edges: F,
}

impl<F> SupertypeClosure<F>
where
    F: FnMut(&TypeMirror) -> Vec<TypeMirror>,
{
    pub fn new(edges: F) -> Self {
        Self { edges }
    }

    /// Every type reachable from `roots` (roots included).
    pub fn collect(mut self, roots: &[TypeMirror]) -> Vec<TypeMirror> {
        enum Frame {
            Enter(TypeMirror),
            Exit(TypeMirror),
        }

        let mut visited = HashSet::new();
        let mut output = Vec::new();
        let mut stack: Vec<Frame> = roots.iter().rev().cloned().map(Frame::Enter).collect();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(ty) => {
                    // Marked on entry so a malformed cyclic graph terminates.
                    if !visited.insert(ty.to_string()) {
                        continue;
                    }
                    let supertypes = (self.edges)(&ty);
                    stack.push(Frame::Exit(ty));
                    stack.extend(supertypes.into_iter().rev().map(Frame::Enter));
                }
                Frame::Exit(ty) => output.push(ty),
            }
        }

        output
    }
}
