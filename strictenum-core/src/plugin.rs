//! Plugin capability interface exposed to host drivers.
//!
//! A host discovers the checker through a [`PluginRegistry`], constructs it
//! from an optional settings payload, and asks it for [`Analyzer`]
//! descriptions to run over each unit:
//!
//! ```rust,ignore
//! let registry = PluginRegistry::default();
//! let plugin = registry.construct("strictenum", None)?;
//! for analyzer in plugin.build_analyzers()? {
//!     let mut pass = Pass::new(&unit, &mut diagnostics);
//!     analyzer.run(&mut pass);
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::checker::{check_unit, UnitSummary};
use crate::diagnostic::DiagnosticSink;
use crate::error::{StrictEnumError, StrictEnumResult};
use crate::parse::Unit;

/// Name the checker registers under.
pub const PLUGIN_NAME: &str = "strictenum";

/// Checker settings. The schema is empty; any map payload is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {}

impl Settings {
    /// Decode a host-supplied payload.
    ///
    /// `None` and `null` give the defaults. Maps are accepted with unknown
    /// keys ignored; any other shape is rejected.
    pub fn decode(payload: Option<&serde_json::Value>) -> StrictEnumResult<Self> {
        match payload {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| StrictEnumError::settings(e.to_string())),
        }
    }
}

/// How much the host must load before running an analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Parsed syntax trees only.
    Syntax,
    /// Syntax plus full type information.
    TypesInfo,
}

/// One unit of analysis handed to an analyzer.
pub struct Pass<'a> {
    pub unit: &'a Unit,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Pass<'a> {
    pub fn new(unit: &'a Unit, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { unit, sink }
    }

    pub fn sink(&mut self) -> &mut dyn DiagnosticSink {
        &mut *self.sink
    }
}

/// Description of an analyzer a plugin provides.
#[derive(Clone, Copy)]
pub struct Analyzer {
    pub name: &'static str,
    pub doc: &'static str,
    run: fn(&mut Pass<'_>) -> UnitSummary,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    pub fn run(&self, pass: &mut Pass<'_>) -> UnitSummary {
        (self.run)(pass)
    }
}

/// Capabilities a host expects from a linter plugin.
pub trait LinterPlugin: Send + Sync {
    fn build_analyzers(&self) -> StrictEnumResult<Vec<Analyzer>>;

    fn load_mode(&self) -> LoadMode;
}

/// The strict enum checker as a plugin.
#[derive(Debug, Clone, Default)]
pub struct StrictEnumLinter {
    settings: Settings,
}

impl StrictEnumLinter {
    pub fn new(payload: Option<&serde_json::Value>) -> StrictEnumResult<Self> {
        Ok(Self {
            settings: Settings::decode(payload)?,
        })
    }

    /// The single analyzer this plugin provides.
    pub fn analyzer() -> Analyzer {
        Analyzer {
            name: PLUGIN_NAME,
            doc: "Check that only enum values are returned for enum types",
            run: run_strict_enum,
        }
    }
}

fn run_strict_enum(pass: &mut Pass<'_>) -> UnitSummary {
    let unit = pass.unit;
    check_unit(unit, pass.sink())
}

impl LinterPlugin for StrictEnumLinter {
    fn build_analyzers(&self) -> StrictEnumResult<Vec<Analyzer>> {
        debug!(settings = ?self.settings, "building analyzers");
        Ok(vec![Self::analyzer()])
    }

    fn load_mode(&self) -> LoadMode {
        LoadMode::Syntax
    }
}

/// Builds a plugin from a settings payload.
pub type PluginConstructor =
    fn(Option<&serde_json::Value>) -> StrictEnumResult<Box<dyn LinterPlugin>>;

/// Name → constructor table a host uses to discover plugins.
#[derive(Clone)]
pub struct PluginRegistry {
    constructors: BTreeMap<&'static str, PluginConstructor>,
}

impl PluginRegistry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, constructor: PluginConstructor) {
        self.constructors.insert(name, constructor);
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    pub fn construct(
        &self,
        name: &str,
        payload: Option<&serde_json::Value>,
    ) -> StrictEnumResult<Box<dyn LinterPlugin>> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| StrictEnumError::UnknownPlugin {
                name: name.to_string(),
            })?;
        constructor(payload)
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.constructors.keys()).finish()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(PLUGIN_NAME, construct_strict_enum);
        registry
    }
}

fn construct_strict_enum(
    payload: Option<&serde_json::Value>,
) -> StrictEnumResult<Box<dyn LinterPlugin>> {
    let linter = StrictEnumLinter::new(payload)?;
    Ok(Box::new(linter))
}
