//! Go source parsing and unit assembly.
//!
//! Every file is parsed once with `tree-sitter-go`; the resulting trees are
//! grouped into [`Unit`]s, one per Go package (directory + package clause).
//! A unit is the scope of enum discovery: nothing leaks between units.
//!
//! Loading is strict. A file that cannot be read or contains a syntax error
//! fails its whole unit, mirroring how the Go toolchain refuses to type-check
//! a package that does not parse.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser, Tree};

use crate::error::{IoResultExt, StrictEnumError, StrictEnumResult};
use crate::syntax::{self, kind};

/// Maximum file size to parse (10 MB).
pub const MAX_FILE_SIZE: usize = 10_000_000;

/// Normalize a path string to use forward slashes consistently.
#[inline]
pub fn normalize_path_string(path: &str) -> String {
    path.replace('\\', "/")
}

/// Convert a Path to a normalized string (forward slashes).
#[inline]
pub fn path_to_normalized_string(path: &Path) -> String {
    normalize_path_string(&path.display().to_string())
}

/// Thin wrapper over a tree-sitter parser configured for Go.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Create a parser with the Go grammar loaded.
    pub fn new() -> StrictEnumResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| StrictEnumError::language(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse one file's source text.
    ///
    /// Fails on any syntax error and on a missing package clause.
    pub fn parse(&mut self, path: impl Into<PathBuf>, source: String) -> StrictEnumResult<SourceFile> {
        let path = path.into();
        if source.len() > MAX_FILE_SIZE {
            return Err(StrictEnumError::parse(
                path,
                format!("file too large ({} bytes, max {})", source.len(), MAX_FILE_SIZE),
            ));
        }

        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| StrictEnumError::parse(&path, "parser produced no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(syntax_error(&path, root));
        }

        let package = package_name(root, &source)
            .ok_or_else(|| StrictEnumError::parse_at(&path, "expected 'package' clause", 1, 1))?
            .to_string();

        Ok(SourceFile {
            display: path_to_normalized_string(&path),
            path,
            source,
            tree,
            package,
        })
    }

    /// Read and parse a file from disk.
    pub fn parse_path(&mut self, path: &Path) -> StrictEnumResult<SourceFile> {
        let source = fs::read_to_string(path).with_path(path)?;
        self.parse(path, source)
    }
}

/// Locate the first error or missing node and describe it.
fn syntax_error(path: &Path, root: Node<'_>) -> StrictEnumError {
    match syntax::descendants(root).find(|n| n.is_error() || n.is_missing()) {
        Some(node) => {
            let (line, column) = syntax::line_column(node);
            let message = if node.is_missing() {
                format!("syntax error: missing {}", node.kind())
            } else {
                "syntax error: unexpected input".to_string()
            };
            StrictEnumError::parse_at(path, message, line, column)
        }
        None => StrictEnumError::parse(path, "syntax error"),
    }
}

fn package_name<'src>(root: Node<'_>, source: &'src str) -> Option<&'src str> {
    let clause = syntax::nodes_of_kind(root, kind::PACKAGE_CLAUSE).next()?;
    syntax::nodes_of_kind(clause, kind::PACKAGE_IDENTIFIER)
        .next()
        .map(|n| syntax::text(n, source))
}

/// A parsed Go source file.
pub struct SourceFile {
    path: PathBuf,
    display: String,
    source: String,
    tree: Tree,
    package: String,
}

impl SourceFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path with forward slashes, as used in diagnostics.
    pub fn display_path(&self) -> &str {
        &self.display
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Name from the file's `package` clause.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Whether this is a Go test file (`*_test.go`).
    pub fn is_test_file(&self) -> bool {
        is_test_path(&self.path)
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.display)
            .field("package", &self.package)
            .finish()
    }
}

/// Whether a path names a Go test file.
pub fn is_test_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_test.go"))
}

/// One compilation unit: the files of a single Go package.
#[derive(Debug)]
pub struct Unit {
    dir: PathBuf,
    package: String,
    files: Vec<SourceFile>,
}

impl Unit {
    /// Assemble a unit from already-parsed files of the same package.
    pub fn new(files: Vec<SourceFile>) -> StrictEnumResult<Self> {
        let first = files.first().ok_or_else(|| StrictEnumError::EmptyUnit {
            message: "a unit needs at least one source file".to_string(),
        })?;
        let dir = first.path.parent().map(Path::to_path_buf).unwrap_or_default();
        let package = first.package.clone();
        Ok(Self { dir, package, files })
    }

    /// Parse in-memory `(file name, source)` pairs into a single unit.
    ///
    /// Package clauses are not cross-checked; the caller decides what
    /// belongs together.
    pub fn from_sources<I, P, S>(sources: I) -> StrictEnumResult<Self>
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: Into<String>,
    {
        let mut parser = GoParser::new()?;
        let files = sources
            .into_iter()
            .map(|(path, source)| parser.parse(path, source.into()))
            .collect::<StrictEnumResult<Vec<_>>>()?;
        Self::new(files)
    }

    /// Read and parse `paths`, splitting them into one unit per package clause.
    ///
    /// Units come back ordered by package name; files keep their input order.
    pub fn load(paths: &[PathBuf]) -> StrictEnumResult<Vec<Unit>> {
        let mut parser = GoParser::new()?;
        let mut by_package: BTreeMap<String, Vec<SourceFile>> = BTreeMap::new();
        for path in paths {
            let file = parser.parse_path(path)?;
            by_package.entry(file.package.clone()).or_default().push(file);
        }
        by_package.into_values().map(Unit::new).collect()
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn package(&self) -> &str {
        &self.package
    }

}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = path_to_normalized_string(&self.dir);
        if dir.is_empty() {
            write!(f, "{}", self.package)
        } else {
            write!(f, "{} ({})", dir, self.package)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reads_package_clause() {
        let mut parser = GoParser::new().unwrap();
        let file = parser
            .parse("pkg/status.go", "package status\n\ntype Status string\n".to_string())
            .unwrap();
        assert_eq!(file.package(), "status");
        assert_eq!(file.display_path(), "pkg/status.go");
        assert!(!file.is_test_file());
    }

    #[test]
    fn test_syntax_error_fails_with_location() {
        let mut parser = GoParser::new().unwrap();
        let err = parser
            .parse("broken.go", "package p\n\nfunc f( {\n".to_string())
            .unwrap_err();
        match err {
            StrictEnumError::Parse { line, column, .. } => {
                assert!(line.is_some());
                assert!(column.is_some());
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_package_clause_rejected() {
        let mut parser = GoParser::new().unwrap();
        let err = parser
            .parse("nopkg.go", "type A int\n".to_string())
            .unwrap_err();
        assert!(err.to_string().contains("package"));
    }

    #[test]
    fn test_from_sources_builds_one_unit() {
        let unit = Unit::from_sources([
            ("a.go", "package p\ntype A int\n"),
            ("b.go", "package p\nconst X A = 1\n"),
        ])
        .unwrap();
        assert_eq!(unit.files().len(), 2);
        assert_eq!(unit.package(), "p");
    }

    #[test]
    fn test_empty_unit_rejected() {
        let err = Unit::from_sources(Vec::<(&str, &str)>::new()).unwrap_err();
        assert!(matches!(err, StrictEnumError::EmptyUnit { .. }));
    }

    #[test]
    fn test_load_splits_external_test_package() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("color.go");
        let ext = dir.path().join("color_test.go");
        fs::write(&lib, "package color\ntype Color int\n").unwrap();
        fs::write(&ext, "package color_test\nfunc helper() {}\n").unwrap();

        let units = Unit::load(&[lib, ext]).unwrap();
        let packages: Vec<&str> = units.iter().map(|u| u.package()).collect();
        assert_eq!(packages, vec!["color", "color_test"]);
        assert!(units[1].files()[0].is_test_file());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Unit::load(&[PathBuf::from("/definitely/not/here.go")]).unwrap_err();
        assert!(matches!(err, StrictEnumError::Io { .. }));
    }
}
