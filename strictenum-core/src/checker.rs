//! Strict enum conformance checking for one unit.
//!
//! Runs five sub-passes in a fixed order:
//!
//! ```text
//!  1. TypeCatalog::build        named types
//!  2. EnumRegistry::discover    typed constants per type
//!  ─────────────── registry frozen ───────────────
//!  3. ReturnIndex::build        return → innermost func
//!  4. check_returns             return values vs. result slots
//!  5. check_variables           annotated var initializers
//! ```
//!
//! All state lives on the stack of [`check_unit`]; concurrent calls for
//! different units share nothing.

use tracing::{debug, debug_span};

use crate::diagnostic::DiagnosticSink;
use crate::enums::{EnumRegistry, TypeCatalog};
use crate::parse::Unit;
use crate::sites::{check_returns, check_variables, ReturnIndex};

/// Counters from one unit's analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitSummary {
    pub files: usize,
    pub declared_types: usize,
    pub enum_types: usize,
    pub return_sites: usize,
    pub diagnostics: usize,
}

/// Analyze one unit, writing violations to `sink`.
pub fn check_unit(unit: &Unit, sink: &mut dyn DiagnosticSink) -> UnitSummary {
    let span = debug_span!("check_unit", unit = %unit);
    let _guard = span.enter();

    let catalog = TypeCatalog::build(unit);
    let registry = EnumRegistry::discover(unit, &catalog);
    debug!(
        types = catalog.len(),
        enums = ?registry.type_names(),
        "enum discovery finished"
    );

    let index = ReturnIndex::build(unit);
    let returns = check_returns(&index, &registry, sink);
    let variables = check_variables(unit, &registry, sink);
    debug!(
        return_sites = index.len(),
        returns, variables, "use sites checked"
    );

    UnitSummary {
        files: unit.files().len(),
        declared_types: catalog.len(),
        enum_types: registry.len(),
        return_sites: index.len(),
        diagnostics: returns + variables,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Diagnostic;

    #[test]
    fn test_summary_counts() {
        let unit = Unit::from_sources([(
            "s.go",
            r#"
package p

type Status string
type Other int

const StatusOk Status = "ok"

func a() Status { return StatusOk }
func b() Status { return "bad" }

var s Status = "worse"
"#,
        )])
        .unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let summary = check_unit(&unit, &mut sink);

        assert_eq!(
            summary,
            UnitSummary {
                files: 1,
                declared_types: 2,
                enum_types: 1,
                return_sites: 2,
                diagnostics: 2,
            }
        );
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_returns_reported_before_variables() {
        let unit = Unit::from_sources([(
            "o.go",
            r#"
package p

type Color int

const ColorRed Color = 0

var early Color = 1

func late() Color { return 2 }
"#,
        )])
        .unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        check_unit(&unit, &mut sink);
        let lines: Vec<usize> = sink.iter().map(|d| d.position.line).collect();
        assert_eq!(lines, vec![10, 8]);
    }
}
