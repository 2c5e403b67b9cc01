//! Builder pattern API for strict enum analysis.
//!
//! Provides a fluent interface for configuring and running the checker over
//! Go packages:
//!
//! ```rust,ignore
//! use strictenum_core::prelude::*;
//!
//! let result = StrictEnum::new("./...")
//!     .exclude_dirs(["generated"])
//!     .include_tests(false)
//!     .analyze()?;
//!
//! for d in &result.diagnostics {
//!     println!("{d}");
//! }
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::StrictEnumConfig;
use crate::diagnostic::Diagnostic;
use crate::error::StrictEnumError;
use crate::parse::Unit;
use crate::plugin::{Analyzer, LinterPlugin, Pass, StrictEnumLinter};
use crate::scan::{plan_units, UnitPlan};

/// Builder for configuring strict enum analysis.
#[derive(Debug, Clone)]
pub struct StrictEnum {
    /// Package patterns (`dir`, `dir/...`, or `.go` files)
    patterns: Vec<String>,

    /// Custom excluded directory names
    excluded_dirs: Vec<String>,

    /// Whether `_test.go` files are analyzed
    include_tests: bool,

    /// Raw checker settings payload
    settings: Option<serde_json::Value>,
}

impl StrictEnum {
    /// Create a new analysis builder for one package pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            patterns: vec![pattern.into()],
            excluded_dirs: Vec::new(),
            include_tests: true,
            settings: None,
        }
    }

    /// Add more package patterns.
    pub fn patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add directories to exclude from recursive scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Analyze `_test.go` files too (default: true).
    pub fn include_tests(mut self, enabled: bool) -> Self {
        self.include_tests = enabled;
        self
    }

    /// Settings payload handed to the checker plugin.
    pub fn settings(mut self, payload: Option<serde_json::Value>) -> Self {
        self.settings = payload;
        self
    }

    /// Apply values from a loaded strictenum.toml.
    pub fn with_config(mut self, config: &StrictEnumConfig) -> Result<Self> {
        if let Some(exclude) = &config.exclude {
            self.excluded_dirs.extend(exclude.iter().cloned());
        }
        if let Some(tests) = config.tests {
            self.include_tests = tests;
        }
        if let Some(payload) = config.settings_payload()? {
            self.settings = Some(payload);
        }
        Ok(self)
    }

    /// Run the analysis and return results.
    ///
    /// Units that fail to load are reported in [`AnalysisResult::failures`]
    /// and never contribute diagnostics; every other unit is still checked.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        // 1. Construct the checker
        let plugin = StrictEnumLinter::new(self.settings.as_ref())
            .context("Failed to initialize strictenum")?;
        let analyzers = plugin.build_analyzers()?;

        // 2. Resolve patterns into unit plans
        let excludes: Vec<&str> = self.excluded_dirs.iter().map(String::as_str).collect();
        let plans = plan_units(&self.patterns, &excludes, self.include_tests)
            .context("Failed to resolve package patterns")?;

        // 3. Load and check every unit in parallel
        let outcomes: Vec<PlanOutcome> = plans
            .par_iter()
            .map(|plan| run_plan(plan, &analyzers))
            .collect();

        // 4. Merge
        let mut result = AnalysisResult::default();
        for outcome in outcomes {
            result.units += outcome.units;
            result.files += outcome.files;
            result.diagnostics.extend(outcome.diagnostics);
            result.failures.extend(outcome.failure);
        }
        result.diagnostics.sort_by(|a, b| a.position.cmp(&b.position));

        info!(
            units = result.units,
            files = result.files,
            diagnostics = result.diagnostics.len(),
            failures = result.failures.len(),
            "analysis finished"
        );
        Ok(result)
    }
}

#[derive(Default)]
struct PlanOutcome {
    units: usize,
    files: usize,
    diagnostics: Vec<Diagnostic>,
    failure: Option<UnitFailure>,
}

fn run_plan(plan: &UnitPlan, analyzers: &[Analyzer]) -> PlanOutcome {
    let units = match Unit::load(&plan.files) {
        Ok(units) => units,
        Err(error) => {
            warn!(dir = %plan.dir.display(), %error, "unit failed to load");
            return PlanOutcome {
                failure: Some(UnitFailure {
                    dir: plan.dir.clone(),
                    error,
                }),
                ..PlanOutcome::default()
            };
        }
    };

    let mut outcome = PlanOutcome::default();
    for unit in &units {
        outcome.units += 1;
        outcome.files += unit.files().len();
        for analyzer in analyzers {
            let mut pass = Pass::new(unit, &mut outcome.diagnostics);
            analyzer.run(&mut pass);
        }
    }
    outcome
}

/// A unit that could not be loaded.
#[derive(Debug)]
pub struct UnitFailure {
    /// Directory of the unit
    pub dir: PathBuf,
    /// Why loading failed
    pub error: StrictEnumError,
}

/// Result of running strict enum analysis.
#[derive(Debug, Default)]
pub struct AnalysisResult {
    /// All diagnostics, sorted by file, line and column
    pub diagnostics: Vec<Diagnostic>,

    /// Units skipped because they failed to load
    pub failures: Vec<UnitFailure>,

    /// Number of units analyzed
    pub units: usize,

    /// Number of files analyzed
    pub files: usize,
}

impl AnalysisResult {
    /// Check if any violation was found.
    pub fn has_violations(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Check if any unit failed to load.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
