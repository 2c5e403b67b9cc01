//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use strictenum_core::prelude::*;
//! ```

// Error types
pub use crate::error::{StrictEnumError, StrictEnumResult};

// Loading
pub use crate::parse::{GoParser, SourceFile, Unit};

// Checking
pub use crate::checker::{check_unit, UnitSummary};
pub use crate::diagnostic::{Diagnostic, DiagnosticSink, Position, Violation};

// Plugin interface
pub use crate::plugin::{LinterPlugin, Pass, PluginRegistry, StrictEnumLinter};

// Configuration
pub use crate::config::{load_config, StrictEnumConfig};

// Builder API
pub use crate::builder::{AnalysisResult, StrictEnum};
