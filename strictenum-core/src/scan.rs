//! Parallel, deterministic Go file discovery with directory pruning.
//!
//! Patterns follow the `go` tool:
//! - `dir`: the package in `dir` only
//! - `dir/...`: `dir` and every package below it
//! - `a.go b.go`: the listed files as one ad-hoc package
//!
//! Like the `go` tool, recursive walks skip `vendor/`, `testdata/`, and any
//! directory whose name starts with `.` or `_`.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::parse::is_test_path;

/// Directories to exclude by default.
const EXCLUDED_DIRS: &[&str] = &["vendor", "testdata", "node_modules"];

/// A package pattern given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// One directory, not recursive.
    Package(PathBuf),
    /// A directory and everything below it.
    Recursive(PathBuf),
    /// A single Go file.
    File(PathBuf),
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        if raw == "..." {
            return Self::Recursive(PathBuf::from("."));
        }
        if let Some(prefix) = raw.strip_suffix("/...") {
            let root = if prefix.is_empty() { "/" } else { prefix };
            return Self::Recursive(PathBuf::from(root));
        }
        let path = PathBuf::from(raw);
        if path.extension().is_some_and(|ext| ext == "go") {
            Self::File(path)
        } else {
            Self::Package(path)
        }
    }
}

/// Files that will be loaded together, then split by package clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPlan {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Checks if a directory entry should be pruned.
#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }
    entry.file_name().to_str().is_some_and(|name| {
        excludes.contains(name) || name.starts_with('.') || name.starts_with('_')
    })
}

#[inline]
fn is_go_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "go")
}

/// Gathers all .go files below `root` with custom exclusions, in sorted order.
pub fn gather_go_files(root: &Path, excludes: &[&str]) -> Result<Vec<PathBuf>> {
    let all_excludes: HashSet<&str> = EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(excludes.iter().copied())
        .collect();

    let mut files = WalkDir::new(root)
        .into_iter()
        // filter_entry prunes whole subtrees before iteration
        .filter_entry(|e| !is_excluded_dir(e, &all_excludes))
        .par_bridge()
        .filter_map(|entry| match entry {
            Ok(e) => {
                let path = e.path();
                if is_go_file(path) {
                    Some(Ok(path.to_path_buf()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e.into())),
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Failed to gather .go files from {}", root.display()))?;

    files.sort();
    Ok(files)
}

/// The .go files directly inside `dir`, in sorted order.
pub fn package_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
            .path();
        if is_go_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Resolve patterns into per-directory unit plans.
///
/// Explicitly listed files form one extra plan of their own. Plans with no
/// files left after filtering are dropped.
pub fn plan_units(
    patterns: &[String],
    excludes: &[&str],
    include_tests: bool,
) -> Result<Vec<UnitPlan>> {
    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    let mut listed: Vec<PathBuf> = Vec::new();

    for raw in patterns {
        match Pattern::parse(raw) {
            Pattern::Package(dir) => {
                by_dir.entry(dir.clone()).or_default().extend(package_files(&dir)?);
            }
            Pattern::Recursive(root) => {
                for file in gather_go_files(&root, excludes)? {
                    let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
                    by_dir.entry(dir).or_default().push(file);
                }
            }
            Pattern::File(file) => {
                anyhow::ensure!(file.is_file(), "No such Go file: {}", file.display());
                listed.push(file);
            }
        }
    }

    let keep = |path: &PathBuf| include_tests || !is_test_path(path);

    let mut plans: Vec<UnitPlan> = by_dir
        .into_iter()
        .map(|(dir, mut files)| {
            files.sort();
            files.dedup();
            files.retain(keep);
            UnitPlan { dir, files }
        })
        .filter(|plan| !plan.files.is_empty())
        .collect();

    listed.retain(keep);
    if let Some(first) = listed.first() {
        let dir = first.parent().map(Path::to_path_buf).unwrap_or_default();
        plans.push(UnitPlan { dir, files: listed });
    }

    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "package p\n").unwrap();
    }

    fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_pattern_parse() {
        assert_eq!(Pattern::parse("./..."), Pattern::Recursive(PathBuf::from(".")));
        assert_eq!(Pattern::parse("..."), Pattern::Recursive(PathBuf::from(".")));
        assert_eq!(Pattern::parse("pkg/api"), Pattern::Package(PathBuf::from("pkg/api")));
        assert_eq!(Pattern::parse("main.go"), Pattern::File(PathBuf::from("main.go")));
    }

    #[test]
    fn test_gather_skips_go_tool_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "main.go");
        touch(root, "pkg/status.go");
        touch(root, "vendor/dep/dep.go");
        touch(root, "testdata/fixture.go");
        touch(root, ".hidden/x.go");
        touch(root, "_scratch/y.go");
        touch(root, "gen/z.go");
        touch(root, "README.md");

        let files = gather_go_files(root, &["gen"]).unwrap();
        assert_eq!(names(&files, root), vec!["main.go", "pkg/status.go"]);
    }

    #[test]
    fn test_package_pattern_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "a.go");
        touch(root, "sub/b.go");

        let files = package_files(root).unwrap();
        assert_eq!(names(&files, root), vec!["a.go"]);
    }

    #[test]
    fn test_plan_units_groups_by_directory_and_filters_tests() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "a.go");
        touch(root, "a_test.go");
        touch(root, "sub/b.go");
        touch(root, "only/c_test.go");

        let pattern = format!("{}/...", root.display());
        let with_tests = plan_units(&[pattern.clone()], &[], true).unwrap();
        assert_eq!(with_tests.len(), 3);

        let without = plan_units(&[pattern], &[], false).unwrap();
        let dirs: Vec<PathBuf> = without.iter().map(|p| p.dir.clone()).collect();
        assert_eq!(dirs, vec![root.to_path_buf(), root.join("sub")]);
        assert_eq!(without[0].files, vec![root.join("a.go")]);
    }

    #[test]
    fn test_listed_files_form_one_plan() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "x.go");
        touch(root, "y.go");

        let patterns = vec![
            root.join("x.go").display().to_string(),
            root.join("y.go").display().to_string(),
        ];
        let plans = plan_units(&patterns, &[], true).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].files.len(), 2);
    }

    #[test]
    fn test_missing_listed_file_is_error() {
        assert!(plan_units(&["/no/such/file.go".to_string()], &[], true).is_err());
    }
}
