//! Output formatting - plaintext and JSON.

use serde_json::json;

use crate::builder::{AnalysisResult, UnitFailure};
use crate::diagnostic::Diagnostic;

/// Renders one diagnostic per line as `file:line:col: message`.
pub fn render_plain(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        out.push_str(&d.to_string());
        out.push('\n');
    }
    out
}

/// Prints diagnostics in plain text format. Load failures go to stderr.
pub fn print_plain(result: &AnalysisResult) {
    for failure in &result.failures {
        eprintln!("{}: {}", failure.dir.display(), failure.error);
    }
    if result.diagnostics.is_empty() {
        println!("No enum violations found.");
    } else {
        print!("{}", render_plain(&result.diagnostics));
    }
}

fn failure_json(failure: &UnitFailure) -> serde_json::Value {
    json!({
        "dir": failure.dir.display().to_string(),
        "error": failure.error.to_string(),
    })
}

/// Builds the JSON document for an analysis result.
pub fn to_json(result: &AnalysisResult) -> serde_json::Value {
    let diagnostics: Vec<serde_json::Value> = result
        .diagnostics
        .iter()
        .map(|d| {
            json!({
                "file": d.position.file,
                "line": d.position.line,
                "column": d.position.column,
                "message": d.message(),
                "violation": d.violation,
            })
        })
        .collect();
    let failures: Vec<serde_json::Value> = result.failures.iter().map(failure_json).collect();

    json!({
        "units": result.units,
        "files": result.files,
        "diagnostics": diagnostics,
        "failures": failures,
    })
}

/// Prints an analysis result in JSON format.
///
/// Falls back to plain lines on stdout if serialization fails.
pub fn print_json(result: &AnalysisResult) {
    match serde_json::to_string_pretty(&to_json(result)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            print!("{}", render_plain(&result.diagnostics));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Position, Violation};
    use crate::error::StrictEnumError;
    use std::path::PathBuf;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            diagnostics: vec![Diagnostic::new(
                Position {
                    file: "pkg/status.go".to_string(),
                    line: 12,
                    column: 9,
                },
                Violation::ReturnedLiteral {
                    literal: "\"unknown\"".to_string(),
                    type_name: "Status".to_string(),
                },
            )],
            failures: vec![UnitFailure {
                dir: PathBuf::from("broken"),
                error: StrictEnumError::parse("broken/b.go", "unexpected token"),
            }],
            units: 2,
            files: 3,
        }
    }

    #[test]
    fn test_render_plain() {
        let text = render_plain(&sample().diagnostics);
        assert_eq!(
            text,
            "pkg/status.go:12:9: returning literal '\"unknown\"' which is not a valid enum value for type Status\n"
        );
    }

    #[test]
    fn test_json_document() {
        let doc = to_json(&sample());
        assert_eq!(doc["units"], 2);
        assert_eq!(doc["diagnostics"][0]["line"], 12);
        assert_eq!(doc["diagnostics"][0]["violation"]["kind"], "returned_literal");
        assert_eq!(doc["diagnostics"][0]["violation"]["type_name"], "Status");
        assert_eq!(doc["failures"][0]["dir"], "broken");
        assert!(doc["failures"][0]["error"]
            .as_str()
            .unwrap()
            .contains("unexpected token"));
    }

    #[test]
    fn test_empty_result_renders_nothing() {
        assert!(render_plain(&[]).is_empty());
        let doc = to_json(&AnalysisResult::default());
        assert_eq!(doc["diagnostics"].as_array().unwrap().len(), 0);
    }
}
