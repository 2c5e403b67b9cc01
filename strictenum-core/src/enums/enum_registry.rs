//! Enum discovery: named types plus their typed constants.
//!
//! A cataloged type becomes enum-like as soon as one constant is declared
//! with that type as a bare annotation:
//!
//! ```go
//! type Status string
//!
//! const (
//!     StatusActive  Status = "active"
//!     StatusPending Status = "pending"
//! )
//! ```
//!
//! Inside a parenthesized group, a spec with neither type nor value repeats
//! the previous spec (Go's implicit repetition), so `iota` groups work:
//!
//! ```go
//! const (
//!     ColorRed Color = iota
//!     ColorGreen          // also a Color
//! )
//! ```
//!
//! Untyped constants, and constants typed with anything but a bare name
//! (`pkg.T`, `*T`), never contribute.

use std::collections::{BTreeSet, HashMap};

use tree_sitter::Node;

use super::type_catalog::TypeCatalog;
use crate::parse::Unit;
use crate::syntax::{self, kind};

/// Type name → set of constant names declared with that type.
///
/// Only [`EnumRegistry::discover`] mutates the registry; validators get a
/// shared reference, so the sets are frozen once checking starts.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    enums: HashMap<String, BTreeSet<String>>,
}

impl EnumRegistry {
    /// Collect enum value sets from every const group in the unit.
    pub fn discover(unit: &Unit, catalog: &TypeCatalog) -> Self {
        let mut registry = Self::default();
        for file in unit.files() {
            let source = file.source();
            for decl in syntax::nodes_of_kind(file.root(), kind::CONST_DECLARATION) {
                registry.add_const_group(decl, source, catalog);
            }
        }
        registry
    }

    fn add_const_group(&mut self, decl: Node<'_>, source: &str, catalog: &TypeCatalog) {
        let mut carried: Option<&str> = None;

        for spec in syntax::list_items(decl) {
            if spec.kind() != kind::CONST_SPEC {
                continue;
            }

            let annotation = spec.child_by_field_name("type");
            let has_value = spec.child_by_field_name("value").is_some();
            if annotation.is_some() || has_value {
                carried = syntax::named_type(annotation, source);
            }

            let Some(type_name) = carried else {
                continue;
            };
            if !catalog.contains(type_name) {
                continue;
            }

            let members = self.enums.entry(type_name.to_string()).or_default();
            for name in syntax::field_nodes(spec, "name") {
                members.insert(syntax::text(name, source).to_string());
            }
        }
    }

    /// Constant names of an enum-like type; `None` if the type is not enum-like.
    pub fn members(&self, type_name: &str) -> Option<&BTreeSet<String>> {
        self.enums.get(type_name).filter(|set| !set.is_empty())
    }

    pub fn is_enum(&self, type_name: &str) -> bool {
        self.members(type_name).is_some()
    }

    /// Number of enum-like types.
    pub fn len(&self) -> usize {
        self.enums.values().filter(|set| !set.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enum-like type names in sorted order.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .enums
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}
