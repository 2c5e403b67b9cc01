//! Call-site index: each `return` statement paired with its owning function.
//!
//! The owner is always the innermost enclosing `func` (declaration, method
//! or literal). A `return` inside a closure belongs to the closure:
//!
//! ```go
//! func outer() Status {
//!     inner := func() int {
//!         return 5 // checked against int, not Status
//!     }
//!     return StatusActive
//! }
//! ```

use tree_sitter::Node;

use crate::parse::{SourceFile, Unit};
use crate::syntax::{self, kind};

/// A `return` statement and the function whose results it produces.
#[derive(Debug, Clone, Copy)]
pub struct ReturnSite<'u> {
    pub file: &'u SourceFile,
    pub statement: Node<'u>,
    pub owner: Node<'u>,
}

impl<'u> ReturnSite<'u> {
    /// Returned expressions in source order; empty for a bare `return`.
    pub fn values(&self) -> Vec<Node<'u>> {
        syntax::list_items(self.statement)
            .into_iter()
            .find(|n| n.kind() == kind::EXPRESSION_LIST)
            .map(syntax::list_items)
            .unwrap_or_default()
    }
}

/// Every return site of a unit, in traversal order.
#[derive(Debug, Default)]
pub struct ReturnIndex<'u> {
    sites: Vec<ReturnSite<'u>>,
}

impl<'u> ReturnIndex<'u> {
    /// Walk every file, opening a fresh owner scope at each function node.
    pub fn build(unit: &'u Unit) -> Self {
        let mut index = Self::default();
        for file in unit.files() {
            index.index_file(file);
        }
        index
    }

    fn index_file(&mut self, file: &'u SourceFile) {
        let mut stack: Vec<(Node<'u>, Option<Node<'u>>)> = vec![(file.root(), None)];

        while let Some((node, enclosing)) = stack.pop() {
            let owner = if syntax::is_function_like(node) {
                Some(node)
            } else {
                enclosing
            };

            if node.kind() == kind::RETURN_STATEMENT {
                if let Some(owner) = owner {
                    self.sites.push(ReturnSite {
                        file,
                        statement: node,
                        owner,
                    });
                }
            }

            let mut cursor = node.walk();
            let children: Vec<Node<'u>> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev().map(|child| (child, owner)));
        }
    }

    pub fn sites(&self) -> &[ReturnSite<'u>] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
