//! strictenum-core: strict enum conformance checking for Go
//!
//! Go has no closed enum types. The idiom is a named type plus a group of
//! typed constants:
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
//! The compiler still accepts `return "unknown"` from a function returning
//! `Status`. This library reports every identifier or literal written into an
//! enum-typed return slot or annotated variable that is not one of the type's
//! declared constants.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use strictenum_core::prelude::*;
//!
//! let result = StrictEnum::new("./...").analyze()?;
//!
//! for d in &result.diagnostics {
//!     println!("{d}");
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`syntax`]: tree-sitter Go node helpers and value classification
//! - [`parse`]: Go source loading and unit grouping
//! - [`enums`]: named type catalog and enum registry
//! - [`sites`]: return and variable use-site checks
//! - [`checker`]: the per-unit pass pipeline
//! - [`plugin`]: analyzer interface for host drivers
//! - [`scan`]: Go package pattern resolution
//! - [`builder`]: fluent builder API for configuration
//! - [`error`]: typed error handling

pub mod builder;
pub mod checker;
pub mod config;
pub mod diagnostic;
pub mod enums;
pub mod error;
pub mod logging;
pub mod parse;
pub mod plugin;
pub mod prelude;
pub mod report;
pub mod scan;
pub mod sites;
pub mod syntax;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{IoResultExt, StrictEnumError, StrictEnumResult};

// Builder API
pub use builder::{AnalysisResult, StrictEnum, UnitFailure};

// Checking
pub use checker::{check_unit, UnitSummary};
pub use diagnostic::{Diagnostic, DiagnosticSink, Position, Violation};
pub use enums::{EnumRegistry, TypeCatalog};
pub use sites::{check_returns, check_variables, FunctionSignature, ReturnIndex, ReturnSite};

// Configuration
pub use config::{load_config, OutputConfig, StrictEnumConfig, CONFIG_FILE};

// Logging
pub use logging::init_structured_logging;

// Parsing
pub use parse::{
    is_test_path, normalize_path_string, path_to_normalized_string, GoParser, SourceFile, Unit,
};

// Plugin interface
pub use plugin::{
    Analyzer, LinterPlugin, LoadMode, Pass, PluginConstructor, PluginRegistry, Settings,
    StrictEnumLinter, PLUGIN_NAME,
};

// Reporting
pub use report::{print_json, print_plain, render_plain, to_json};

// File scanning
pub use scan::{gather_go_files, package_files, plan_units, Pattern, UnitPlan};
