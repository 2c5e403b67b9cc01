//! Read-only helpers over the tree-sitter Go syntax tree.
//!
//! The checker works on the concrete syntax tree produced by `tree-sitter-go`
//! directly. This module holds the node kinds it cares about and a few
//! classification helpers shared by every sub-pass:
//!
//! - [`descendants`]: lazy, restartable pre-order walk of a subtree
//! - [`named_type`]: bare named-type annotation (`Status`, not `pkg.Status`)
//! - [`classify`]: identifier / literal / other classification of a value
//!
//! Only syntactic shape is inspected. There is no name resolution, so a
//! `type_identifier` is taken at face value.

use tree_sitter::{Node, TreeCursor};

/// Node kinds emitted by `tree-sitter-go` that the checker inspects.
pub mod kind {
    pub const PACKAGE_CLAUSE: &str = "package_clause";
    pub const PACKAGE_IDENTIFIER: &str = "package_identifier";

    pub const TYPE_DECLARATION: &str = "type_declaration";
    pub const TYPE_SPEC: &str = "type_spec";
    pub const TYPE_ALIAS: &str = "type_alias";
    pub const TYPE_IDENTIFIER: &str = "type_identifier";

    pub const CONST_DECLARATION: &str = "const_declaration";
    pub const CONST_SPEC: &str = "const_spec";

    pub const VAR_DECLARATION: &str = "var_declaration";
    pub const VAR_SPEC: &str = "var_spec";

    pub const FUNCTION_DECLARATION: &str = "function_declaration";
    pub const METHOD_DECLARATION: &str = "method_declaration";
    pub const FUNC_LITERAL: &str = "func_literal";

    pub const PARAMETER_LIST: &str = "parameter_list";

    pub const RETURN_STATEMENT: &str = "return_statement";
    pub const EXPRESSION_LIST: &str = "expression_list";
}

/// Value-expression kinds that Go's own AST models as plain identifiers.
///
/// `true`, `false`, `nil` and `iota` are predeclared names, not literals,
/// so they are judged by enum membership like any other identifier.
const IDENTIFIER_KINDS: &[&str] = &["identifier", "true", "false", "nil", "iota"];

/// Basic literal kinds (numbers, runes, strings).
const LITERAL_KINDS: &[&str] = &[
    "int_literal",
    "float_literal",
    "imaginary_literal",
    "rune_literal",
    "interpreted_string_literal",
    "raw_string_literal",
];

/// Syntactic form of a value written into a typed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueForm<'src> {
    /// A bare name, carrying its literal text.
    Identifier(&'src str),
    /// A basic literal, carrying its exact source text (quotes included).
    Literal(&'src str),
    /// Any other expression (calls, selectors, composites, operators...).
    Other,
}

/// Classify a value expression by its syntactic form.
pub fn classify<'src>(node: Node<'_>, source: &'src str) -> ValueForm<'src> {
    let k = node.kind();
    if IDENTIFIER_KINDS.contains(&k) {
        ValueForm::Identifier(text(node, source))
    } else if LITERAL_KINDS.contains(&k) {
        ValueForm::Literal(text(node, source))
    } else {
        ValueForm::Other
    }
}

/// Source text covered by a node.
#[inline]
pub fn text<'src>(node: Node<'_>, source: &'src str) -> &'src str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// 1-based line and byte column of a node's first character.
#[inline]
pub fn line_column(node: Node<'_>) -> (usize, usize) {
    let point = node.start_position();
    (point.row + 1, point.column + 1)
}

/// Name of a bare named-type annotation.
///
/// Returns `None` for a missing annotation and for every compound form
/// (`pkg.T`, `*T`, `[]T`, `T[int]`, ...).
pub fn named_type<'src>(node: Option<Node<'_>>, source: &'src str) -> Option<&'src str> {
    node.filter(|n| n.kind() == kind::TYPE_IDENTIFIER)
        .map(|n| text(n, source))
}

/// Named children stored under `field`, in source order.
///
/// A repeated field such as `name` in `a, b T` also spans the `,` tokens;
/// those are dropped.
pub fn field_nodes<'tree>(node: Node<'tree>, field: &str) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor)
        .filter(|n| n.is_named())
        .collect()
}

/// Named children of a list node with comments filtered out.
pub fn list_items(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| !n.is_extra())
        .collect()
}

/// Whether a node introduces its own result signature.
#[inline]
pub fn is_function_like(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        kind::FUNCTION_DECLARATION | kind::METHOD_DECLARATION | kind::FUNC_LITERAL
    )
}

/// Lazy pre-order iterator over a subtree, root included.
///
/// Calling [`descendants`] again restarts the walk from scratch.
pub struct Descendants<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> Iterator for Descendants<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Node<'tree>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();

        if self.cursor.goto_first_child() {
            return Some(node);
        }
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}

/// Walk every node below (and including) `root` in source order.
pub fn descendants(root: Node<'_>) -> Descendants<'_> {
    Descendants {
        cursor: root.walk(),
        done: false,
    }
}

/// Every node of the given kind below `root`, in source order.
pub fn nodes_of_kind<'tree>(
    root: Node<'tree>,
    wanted: &'static str,
) -> impl Iterator<Item = Node<'tree>> {
    descendants(root).filter(move |n| n.kind() == wanted)
}
