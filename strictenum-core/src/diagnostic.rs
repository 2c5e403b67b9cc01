//! Diagnostics produced by the checker and the sink they are written to.

use std::fmt;

use serde::Serialize;
use tree_sitter::Node;

use crate::parse::SourceFile;
use crate::syntax;

/// Source location of an offending expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// File path with forward slashes
    pub file: String,
    /// 1-based line
    pub line: usize,
    /// 1-based byte column
    pub column: usize,
}

impl Position {
    /// Position of `node` inside `file`.
    pub fn of(file: &SourceFile, node: Node<'_>) -> Self {
        let (line, column) = syntax::line_column(node);
        Self {
            file: file.display_path().to_string(),
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A value written into an enum-typed slot that is not one of its constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    ReturnedIdentifier {
        name: String,
        type_name: String,
    },
    ReturnedLiteral {
        literal: String,
        type_name: String,
    },
    AssignedIdentifier {
        variable: String,
        name: String,
        type_name: String,
    },
    AssignedLiteral {
        variable: String,
        literal: String,
        type_name: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReturnedIdentifier { name, type_name } => write!(
                f,
                "returning '{name}' which is not a valid enum value for type {type_name}"
            ),
            Self::ReturnedLiteral { literal, type_name } => write!(
                f,
                "returning literal '{literal}' which is not a valid enum value for type {type_name}"
            ),
            Self::AssignedIdentifier {
                variable,
                name,
                type_name,
            } => write!(
                f,
                "variable '{variable}' assigned '{name}' which is not a valid enum value for type {type_name}"
            ),
            Self::AssignedLiteral {
                variable,
                literal,
                type_name,
            } => write!(
                f,
                "variable '{variable}' assigned literal '{literal}' which is not a valid enum value for type {type_name}"
            ),
        }
    }
}

/// One reported violation at one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub position: Position,
    pub violation: Violation,
}

impl Diagnostic {
    pub fn new(position: Position, violation: Violation) -> Self {
        Self {
            position,
            violation,
        }
    }

    /// Human-readable message text.
    pub fn message(&self) -> String {
        self.violation.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.violation)
    }
}

/// Destination for diagnostics, supplied by the host.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position {
            file: "pkg/status.go".to_string(),
            line: 12,
            column: 9,
        }
    }

    #[test]
    fn test_returned_literal_message_keeps_quotes() {
        let v = Violation::ReturnedLiteral {
            literal: "\"unknown\"".to_string(),
            type_name: "Status".to_string(),
        };
        assert_eq!(
            v.to_string(),
            "returning literal '\"unknown\"' which is not a valid enum value for type Status"
        );
    }

    #[test]
    fn test_assigned_messages() {
        let lit = Violation::AssignedLiteral {
            variable: "c".to_string(),
            literal: "2".to_string(),
            type_name: "Color".to_string(),
        };
        assert_eq!(
            lit.to_string(),
            "variable 'c' assigned literal '2' which is not a valid enum value for type Color"
        );

        let ident = Violation::AssignedIdentifier {
            variable: "f".to_string(),
            name: "true".to_string(),
            type_name: "Flag".to_string(),
        };
        assert_eq!(
            ident.to_string(),
            "variable 'f' assigned 'true' which is not a valid enum value for type Flag"
        );
    }

    #[test]
    fn test_diagnostic_display_has_position_prefix() {
        let d = Diagnostic::new(
            pos(),
            Violation::ReturnedIdentifier {
                name: "true".to_string(),
                type_name: "Flag".to_string(),
            },
        );
        assert_eq!(
            d.to_string(),
            "pkg/status.go:12:9: returning 'true' which is not a valid enum value for type Flag"
        );
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        for line in [3, 1] {
            let mut p = pos();
            p.line = line;
            sink.report(Diagnostic::new(
                p,
                Violation::ReturnedLiteral {
                    literal: "1".to_string(),
                    type_name: "Color".to_string(),
                },
            ));
        }
        let lines: Vec<usize> = sink.iter().map(|d| d.position.line).collect();
        assert_eq!(lines, vec![3, 1]);
    }

    #[test]
    fn test_violation_serializes_with_kind_tag() {
        let v = Violation::ReturnedLiteral {
            literal: "5".to_string(),
            type_name: "Color".to_string(),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "returned_literal");
        assert_eq!(json["literal"], "5");
    }
}
