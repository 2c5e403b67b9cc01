//! Enum discovery for strict enum checking.
//!
//! Go has no sum types; an "enum" is a named type plus a group of constants
//! typed with it. Discovery runs over the whole unit before any use site is
//! judged, so declaration order never changes the outcome.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │ type_catalog.rs     │     │ enum_registry.rs    │
//! │  ─────────────────  │────▶│  ─────────────────  │
//! │  Collect declared   │     │  Attach typed const │
//! │  named types        │     │  names to types     │
//! └─────────────────────┘     └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use strictenum_core::enums::{EnumRegistry, TypeCatalog};
//!
//! let catalog = TypeCatalog::build(&unit);
//! let registry = EnumRegistry::discover(&unit, &catalog);
//!
//! if let Some(values) = registry.members("Status") {
//!     println!("Status has {} values", values.len());
//! }
//! ```

pub mod enum_registry;
pub mod type_catalog;

pub use enum_registry::EnumRegistry;
pub use type_catalog::TypeCatalog;
