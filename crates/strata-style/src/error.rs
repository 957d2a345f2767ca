//! Error types for style compilation.
//!
//! Only request and configuration validation can fail. Problems inside an
//! attribute tree are never errors: the affected feature compiles to an empty
//! declaration set and a warning is recorded.

use thiserror::Error;

/// Errors that abort a compilation request before any CSS is produced.
#[derive(Debug, Error)]
pub enum StyleError {
    /// Attribute or configuration JSON could not be parsed.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The engine configuration lists no breakpoints.
    #[error("engine configuration must declare at least one breakpoint")]
    EmptyBreakpoints,

    /// A breakpoint name appears more than once.
    #[error("breakpoint '{0}' is declared more than once")]
    DuplicateBreakpoint(String),

    /// The base state is not among the configured states.
    #[error("base state '{0}' is not declared in the state list")]
    MissingBaseState(String),

    /// The request has no selector to attach declarations to.
    #[error("style request has an empty selector")]
    EmptySelector,

    /// A selector override or option names a breakpoint the configuration does not know.
    #[error("unknown breakpoint '{0}'")]
    UnknownBreakpoint(String),

    /// A selector override or option names a state the configuration does not know.
    #[error("unknown state '{0}'")]
    UnknownState(String),
}
