//! Type catalog: every named type declared in a unit.
//!
//! Collects `type T ...` specs (and aliases) at any nesting depth, including
//! types declared inside function bodies. Only presence is recorded.

use std::collections::HashSet;

use crate::parse::Unit;
use crate::syntax::{self, kind};

/// Names of all types declared in one unit.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    names: HashSet<String>,
}

impl TypeCatalog {
    /// Scan every type declaration group of every file in the unit.
    pub fn build(unit: &Unit) -> Self {
        let mut catalog = Self {
            names: HashSet::with_capacity(16),
        };

        for file in unit.files() {
            let source = file.source();
            for decl in syntax::nodes_of_kind(file.root(), kind::TYPE_DECLARATION) {
                for spec in syntax::list_items(decl) {
                    if !matches!(spec.kind(), kind::TYPE_SPEC | kind::TYPE_ALIAS) {
                        continue;
                    }
                    if let Some(name) = spec.child_by_field_name("name") {
                        catalog.names.insert(syntax::text(name, source).to_string());
                    }
                }
            }
        }

        catalog
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
