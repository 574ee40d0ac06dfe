//! Member-level resolution.
//!
//! Data members live exactly one brace level below the opening of a class
//! body. The resolver finds the nearest enclosing frame that derives from the
//! base type, searching innermost to outermost, and uses *that* frame's depth.
//!
//! A non-deriving class nested in a deriving one therefore resolves to the
//! outer class, and its own members sit one level too deep to be checked:
//!
//! ```text
//! class Outer : public Node {   // Outer opens at depth 0, member depth 1
//!   class Inner {               // depth 1
//!     String s;                 // depth 2: not at member level, not flagged
//!   };
//! };
//! ```

use crate::scope::ScopeFrame;

/// Per-line view of where data members of the governing class live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberLevelContext {
    /// Whether any enclosing frame derives from the base type.
    pub in_qualifying_scope: bool,
    /// Brace depth of the governing class body (`depth_at_open + 1`).
    pub member_depth: usize,
}

impl MemberLevelContext {
    /// Resolves the context from a depth-ordered frame stack (outermost first).
    #[must_use]
    pub fn resolve(frames: &[ScopeFrame]) -> Self {
        frames
            .iter()
            .rev()
            .find(|frame| frame.derives_from_base)
            .map_or_else(Self::default, |frame| Self {
                in_qualifying_scope: true,
                member_depth: frame.depth_at_open + 1,
            })
    }

    /// Whether a line ending at `brace_depth` sits at member level.
    #[must_use]
    pub fn is_member_line(&self, brace_depth: usize) -> bool {
        self.in_qualifying_scope && brace_depth == self.member_depth
    }
}
