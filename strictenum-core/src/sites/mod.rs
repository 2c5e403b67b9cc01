//! Use-site validation: values flowing into enum-typed slots.
//!
//! Two kinds of write sites are checked, both purely syntactically:
//!
//! - `return` values, matched positionally against the owning function's
//!   flattened result types ([`return_check`])
//! - `var` initializers with an explicit named-type annotation
//!   ([`var_check`])
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │ return_index.rs     │     │ signature.rs        │
//! │  return → owner fn  │     │  result type slots  │
//! └──────────┬──────────┘     └──────────┬──────────┘
//!            └───────────┬───────────────┘
//!                        ▼
//!            ┌─────────────────────┐     ┌─────────────────────┐
//!            │ return_check.rs     │     │ var_check.rs        │
//!            └─────────────────────┘     └─────────────────────┘
//! ```
//!
//! A bare identifier is accepted only if it names one of the type's
//! constants; any basic literal is rejected, even when its value equals a
//! constant's value. Every other expression form is left alone.

pub mod return_check;
pub mod return_index;
pub mod signature;
pub mod var_check;

pub use return_check::check_returns;
pub use return_index::{ReturnIndex, ReturnSite};
pub use signature::FunctionSignature;
pub use var_check::check_variables;

use std::collections::BTreeSet;

use tree_sitter::Node;

use crate::syntax::{self, ValueForm};

/// Why a value was rejected for an enum-typed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Offense<'src> {
    Identifier(&'src str),
    Literal(&'src str),
}

fn judge<'src>(
    value: Node<'_>,
    source: &'src str,
    members: &BTreeSet<String>,
) -> Option<Offense<'src>> {
    match syntax::classify(value, source) {
        ValueForm::Identifier(name) if !members.contains(name) => Some(Offense::Identifier(name)),
        ValueForm::Literal(text) => Some(Offense::Literal(text)),
        _ => None,
    }
}
