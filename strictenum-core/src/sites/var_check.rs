//! Variable-site validation.
//!
//! Only `var` specs with an explicit bare type annotation are checked:
//!
//! ```go
//! var c Color = 2        // reported
//! var d = Color(2)       // no annotation, not checked
//! var a, b Color = ColorRed, 3   // only `b` reported
//! ```

use super::{judge, Offense};
use crate::diagnostic::{Diagnostic, DiagnosticSink, Position, Violation};
use crate::enums::EnumRegistry;
use crate::parse::Unit;
use crate::syntax::{self, kind};

/// Check every annotated `var` initializer in the unit.
///
/// Names and initializers are paired by position; a name without an
/// initializer is skipped. Returns the number of diagnostics reported.
pub fn check_variables(
    unit: &Unit,
    registry: &EnumRegistry,
    sink: &mut dyn DiagnosticSink,
) -> usize {
    let mut reported = 0;

    for file in unit.files() {
        let source = file.source();
        for spec in syntax::nodes_of_kind(file.root(), kind::VAR_SPEC) {
            let Some(type_name) = syntax::named_type(spec.child_by_field_name("type"), source)
            else {
                continue;
            };
            let Some(members) = registry.members(type_name) else {
                continue;
            };

            let names = syntax::field_nodes(spec, "name");
            let values = spec
                .child_by_field_name("value")
                .map(syntax::list_items)
                .unwrap_or_default();

            for (name, value) in names.into_iter().zip(values) {
                let variable = syntax::text(name, source).to_string();
                let violation = match judge(value, source, members) {
                    Some(Offense::Identifier(ident)) => Violation::AssignedIdentifier {
                        variable,
                        name: ident.to_string(),
                        type_name: type_name.to_string(),
                    },
                    Some(Offense::Literal(literal)) => Violation::AssignedLiteral {
                        variable,
                        literal: literal.to_string(),
                        type_name: type_name.to_string(),
                    },
                    None => continue,
                };

                sink.report(Diagnostic::new(Position::of(file, value), violation));
                reported += 1;
            }
        }
    }

    reported
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::TypeCatalog;

    fn check(src: &str) -> Vec<String> {
        let unit = Unit::from_sources([("v.go", src)]).unwrap();
        let catalog = TypeCatalog::build(&unit);
        let registry = EnumRegistry::discover(&unit, &catalog);
        let mut sink: Vec<Diagnostic> = Vec::new();
        check_variables(&unit, &registry, &mut sink);
        sink.iter().map(|d| d.message()).collect()
    }

    const COLOR: &str = r#"
package p

type Color int

const (
    ColorRed Color = iota
    ColorGreen
    ColorBlue
)
"#;

    #[test]
    fn test_member_assignment_accepted() {
        let src = format!("{COLOR}\nvar c Color = ColorRed\nvar g Color = ColorGreen\n");
        assert!(check(&src).is_empty());
    }

    #[test]
    fn test_literal_assignment_rejected() {
        let src = format!("{COLOR}\nvar c Color = 2\n");
        assert_eq!(
            check(&src),
            vec!["variable 'c' assigned literal '2' which is not a valid enum value for type Color"]
        );
    }

    #[test]
    fn test_identifier_assignment_rejected() {
        let src = format!("{COLOR}\nfunc f(x Color) {{\n    var c Color = x\n    _ = c\n}}\n");
        assert_eq!(
            check(&src),
            vec!["variable 'c' assigned 'x' which is not a valid enum value for type Color"]
        );
    }

    #[test]
    fn test_multiple_names_positional() {
        let src = format!("{COLOR}\nvar a, b Color = ColorRed, 3\n");
        assert_eq!(
            check(&src),
            vec!["variable 'b' assigned literal '3' which is not a valid enum value for type Color"]
        );
    }

    #[test]
    fn test_names_without_initializer_skipped() {
        let src = format!(
            "{COLOR}\nfunc two() (Color, Color) {{ return ColorRed, ColorBlue }}\nvar a, b Color = two()\nvar c, d Color = 5\n"
        );
        assert_eq!(
            check(&src),
            vec!["variable 'c' assigned literal '5' which is not a valid enum value for type Color"]
        );
    }

    #[test]
    fn test_uninitialized_and_unannotated_skipped() {
        let src = format!("{COLOR}\nvar a Color\nvar b = Color(2)\nvar n int = 5\n");
        assert!(check(&src).is_empty());
    }

    #[test]
    fn test_grouped_var_block() {
        let src = format!(
            "{COLOR}\nvar (\n    first  Color = ColorBlue\n    second Color = 9\n)\n"
        );
        assert_eq!(
            check(&src),
            vec!["variable 'second' assigned literal '9' which is not a valid enum value for type Color"]
        );
    }

    #[test]
    fn test_bool_keyword_uses_identifier_template() {
        let src = r#"
package p

type Flag bool

const (
    FlagOn  Flag = true
    FlagOff Flag = false
)

var f Flag = true
"#;
        assert_eq!(
            check(src),
            vec!["variable 'f' assigned 'true' which is not a valid enum value for type Flag"]
        );
    }
}
