//! Brace-depth scope tracking.
//!
//! The tracker never parses C++. It recognises `class`/`struct` openings with
//! a regex, counts braces on sanitized lines, and keeps a stack of open class
//! frames. Each line is applied in three steps:
//!
//! 1. push a frame for a declaration on this line, anchored at the depth
//!    *before* the line's own braces,
//! 2. apply the line's net brace delta,
//! 3. pop every frame whose body has closed (`depth <= depth_at_open`).
//!
//! Pushing before and popping after lets `struct Leaf : Node { ... };` open and
//! close on one physical line, and gives nested classes correct depths.

use regex::Regex;

use crate::member::MemberLevelContext;
use crate::rule::RuleError;
use crate::sanitize::count_braces;

const CLASS_OPEN_PATTERN: &str = r"^\s*(?:class|struct)\s+(\w+)";

/// Tokens that may prefix an entry of a base clause.
const BASE_SPECIFIERS: &[&str] = &["public", "protected", "private", "virtual"];

/// One open `class`/`struct` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    /// Declared class name.
    pub name: String,
    /// Brace depth before the declaring line's braces were counted.
    pub depth_at_open: usize,
    /// Whether the base clause names the base type.
    pub derives_from_base: bool,
}

/// A class/struct declaration recognised on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    /// Declared class name.
    pub name: String,
    /// Whether the base clause names the base type.
    pub derives_from_base: bool,
}

/// Recognises class/struct openings and evaluates their base clause.
#[derive(Debug, Clone)]
pub struct ClassMatcher {
    open: Regex,
    base_type: String,
}

impl ClassMatcher {
    /// Creates a matcher for classes deriving from `base_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration pattern fails to compile.
    pub fn new(base_type: impl Into<String>) -> Result<Self, RuleError> {
        Ok(Self {
            open: RuleError::compile(CLASS_OPEN_PATTERN)?,
            base_type: base_type.into(),
        })
    }

    /// Returns the base type this matcher qualifies classes against.
    #[must_use]
    pub fn base_type(&self) -> &str {
        &self.base_type
    }

    /// Matches a sanitized line against the declaration pattern.
    #[must_use]
    pub fn match_line(&self, sanitized: &str) -> Option<ClassDecl> {
        let caps = self.open.captures(sanitized)?;
        let name = caps.get(1)?;
        let derives_from_base = base_clause(&sanitized[name.end()..])
            .is_some_and(|clause| derives_from(clause, &self.base_type));

        Some(ClassDecl {
            name: name.as_str().to_string(),
            derives_from_base,
        })
    }
}

/// Extracts the base clause following a declared class name.
///
/// The clause starts after the first lone `:` (not part of `::`) and ends at
/// the first `{` or the end of the line.
fn base_clause(after_name: &str) -> Option<&str> {
    let head = after_name.split('{').next().unwrap_or(after_name);
    let bytes = head.as_bytes();

    let colon = (0..bytes.len()).find(|&i| {
        bytes[i] == b':'
            && bytes.get(i + 1) != Some(&b':')
            && (i == 0 || bytes[i - 1] != b':')
    })?;

    Some(&head[colon + 1..])
}

/// Whether a base clause lists `base_type` as one of its bases.
///
/// Entries are split on top-level commas; access specifiers and `virtual` are
/// skipped, then namespace qualifiers and template arguments are dropped before
/// the exact comparison. `NodeBase` or `Holder<Node>` do not count.
#[must_use]
pub fn derives_from(base_clause: &str, base_type: &str) -> bool {
    split_top_level(base_clause)
        .into_iter()
        .filter_map(base_name)
        .any(|name| name == base_type)
}

fn base_name(entry: &str) -> Option<&str> {
    let ty = entry
        .split_whitespace()
        .find(|token| !BASE_SPECIFIERS.contains(token))?;
    let ty = ty.split('<').next().unwrap_or(ty);
    ty.rsplit("::").next().map(str::trim)
}

/// Splits on commas that are not nested inside template angle brackets.
fn split_top_level(clause: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in clause.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&clause[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&clause[start..]);
    parts
}

/// Mutable per-file scanning state.
///
/// Invariant: `scope_stack` is ordered outermost first with strictly
/// increasing `depth_at_open`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    brace_depth: usize,
    scope_stack: Vec<ScopeFrame>,
}

impl ScanState {
    /// Creates the state for the start of a file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current absolute brace depth.
    #[must_use]
    pub fn brace_depth(&self) -> usize {
        self.brace_depth
    }

    /// Open class frames, outermost first.
    #[must_use]
    pub fn frames(&self) -> &[ScopeFrame] {
        &self.scope_stack
    }

    /// True when no class is open and all braces are closed.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.brace_depth == 0 && self.scope_stack.is_empty()
    }

    /// Applies one sanitized line and returns the frames it closed.
    ///
    /// A closing brace that would take the depth below zero is ignored.
    pub fn advance(&mut self, decl: Option<ClassDecl>, sanitized: &str) -> Vec<ScopeFrame> {
        if let Some(decl) = decl {
            self.scope_stack.push(ScopeFrame {
                name: decl.name,
                depth_at_open: self.brace_depth,
                derives_from_base: decl.derives_from_base,
            });
        }

        let (open, close) = count_braces(sanitized);
        self.brace_depth = (self.brace_depth + open).saturating_sub(close);

        let mut closed = Vec::new();
        while self
            .scope_stack
            .last()
            .is_some_and(|top| self.brace_depth <= top.depth_at_open)
        {
            if let Some(frame) = self.scope_stack.pop() {
                closed.push(frame);
            }
        }
        closed
    }

    /// Resolves the member-level context for the current line.
    #[must_use]
    pub fn member_level(&self) -> MemberLevelContext {
        MemberLevelContext::resolve(&self.scope_stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::sanitize_line;

    fn matcher() -> ClassMatcher {
        ClassMatcher::new("Node").expect("valid pattern")
    }

    fn run(lines: &[&str]) -> ScanState {
        let matcher = matcher();
        let mut state = ScanState::new();
        for line in lines {
            let sanitized = sanitize_line(line);
            let decl = matcher.match_line(&sanitized);
            state.advance(decl, &sanitized);
        }
        state
    }

    #[test]
    fn recognises_declaration_name() {
        let decl = matcher().match_line("class Effect : public Node {");
        assert_eq!(
            decl,
            Some(ClassDecl {
                name: "Effect".to_string(),
                derives_from_base: true,
            })
        );
        assert_eq!(
            matcher().match_line("  struct Pixel {").map(|d| d.name),
            Some("Pixel".to_string())
        );
        assert!(matcher().match_line("enum class Mode {").is_none());
        assert!(matcher().match_line("int classes = 0;").is_none());
    }

    #[test]
    fn multi_base_inheritance_qualifies() {
        let decl = matcher()
            .match_line("class Foo : public Bar, public Node {")
            .expect("declaration");
        assert!(decl.derives_from_base);
    }

    #[test]
    fn other_base_does_not_qualify() {
        let decl = matcher()
            .match_line("class Foo : public Bar {")
            .expect("declaration");
        assert!(!decl.derives_from_base);
    }

    #[test]
    fn base_clause_variants() {
        assert!(derives_from(" Node ", "Node"));
        assert!(derives_from(" virtual public Node", "Node"));
        assert!(derives_from(" protected moon::Node", "Node"));
        assert!(derives_from(" public Mixin<int, float>, Node", "Node"));
        assert!(!derives_from(" public NodeBase", "Node"));
        assert!(!derives_from(" public Holder<Node>", "Node"));
        assert!(!derives_from("", "Node"));
    }

    #[test]
    fn scope_qualifier_in_name_is_not_a_base_clause() {
        assert!(matcher().match_line("struct Foo;").is_some_and(|d| !d.derives_from_base));
        assert_eq!(base_clause(" final : public Node {"), Some(" public Node "));
        assert_eq!(base_clause(" { int x : 3; };"), None);
    }

    #[test]
    fn balanced_file_ends_empty() {
        let state = run(&[
            "class Effect : public Node {",
            " public:",
            "  void loop() {",
            "    if (x) {",
            "    }",
            "  }",
            "};",
        ]);
        assert!(state.is_balanced());
    }

    #[test]
    fn frame_anchors_at_depth_before_line() {
        let state = run(&["namespace moon {", "class Effect : public Node {"]);
        assert_eq!(state.brace_depth(), 2);
        assert_eq!(state.frames().len(), 1);
        assert_eq!(state.frames()[0].depth_at_open, 1);
        assert_eq!(state.member_level().member_depth, 2);
    }

    #[test]
    fn comment_brace_does_not_close_scope() {
        let state = run(&["class Effect : public Node {", "  // } comment with brace"]);
        assert_eq!(state.brace_depth(), 1);
        assert_eq!(state.frames().len(), 1);
    }

    #[test]
    fn single_line_class_pushes_and_pops() {
        let matcher = matcher();
        let mut state = ScanState::new();
        let line = "struct Leaf : public Node { static int x; };";
        let closed = state.advance(matcher.match_line(line), line);
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].name, "Leaf");
        assert!(state.is_balanced());
    }

    #[test]
    fn forward_declaration_is_closed_immediately() {
        let state = run(&["class Effect;"]);
        assert!(state.is_balanced());
    }

    #[test]
    fn nested_frames_are_depth_ordered() {
        let state = run(&["class Outer : public Node {", "  class Inner {", "    int a;"]);
        let depths: Vec<usize> = state.frames().iter().map(|f| f.depth_at_open).collect();
        assert_eq!(depths, vec![0, 1]);
        assert_eq!(state.brace_depth(), 2);
    }

    #[test]
    fn inner_class_closes_before_outer() {
        let state = run(&[
            "class Outer : public Node {",
            "  class Inner {",
            "  };",
            "  int a;",
        ]);
        assert_eq!(state.frames().len(), 1);
        assert_eq!(state.frames()[0].name, "Outer");
        assert!(state.member_level().is_member_line(state.brace_depth()));
    }

    #[test]
    fn unbalanced_close_clamps_at_zero() {
        let state = run(&["}", "}}", "class Effect : public Node {"]);
        assert_eq!(state.brace_depth(), 1);
        assert_eq!(state.frames()[0].depth_at_open, 0);
    }
}
