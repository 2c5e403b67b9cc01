//! Return-site validation.

use super::return_index::ReturnIndex;
use super::signature::FunctionSignature;
use super::{judge, Offense};
use crate::diagnostic::{Diagnostic, DiagnosticSink, Position, Violation};
use crate::enums::EnumRegistry;

/// Check every indexed `return` against its owner's result types.
///
/// Values are paired with result slots by position; extra values beyond the
/// declared slots are not examined. Returns the number of diagnostics
/// reported.
pub fn check_returns(
    index: &ReturnIndex<'_>,
    registry: &EnumRegistry,
    sink: &mut dyn DiagnosticSink,
) -> usize {
    let mut reported = 0;

    for site in index.sites() {
        let source = site.file.source();
        let signature = FunctionSignature::of(site.owner, source);
        if signature.is_empty() {
            continue;
        }

        for (value, slot) in site.values().into_iter().zip(signature.slots()) {
            let Some(type_name) = *slot else {
                continue;
            };
            let Some(members) = registry.members(type_name) else {
                continue;
            };

            let violation = match judge(value, source, members) {
                Some(Offense::Identifier(name)) => Violation::ReturnedIdentifier {
                    name: name.to_string(),
                    type_name: type_name.to_string(),
                },
                Some(Offense::Literal(literal)) => Violation::ReturnedLiteral {
                    literal: literal.to_string(),
                    type_name: type_name.to_string(),
                },
                None => continue,
            };

            sink.report(Diagnostic::new(Position::of(site.file, value), violation));
            reported += 1;
        }
    }

    reported
}
