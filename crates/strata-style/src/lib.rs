//! Responsive style computation: attribute trees in, minimal CSS out.
//!
//! # Scope
//!
//! This crate implements:
//! - **Value resolution** over a `breakpoint → state → property` cascade
//!   - Exact, closest, whole-object, and merged lookup modes
//!   - Per-feature terminal values (`""`, `none`, `off`) that stop inheritance
//!   - Change detection against the nearest explicit ancestor
//!
//! - **Declaration compilers**, one per feature
//!   - Background color and layers, gradient, pattern, mask
//!   - Transform, section dividers, sizing, rounded-corner overflow
//!   - Font and text
//!
//! - **Background layer composition**
//!   - Image and gradient stacking, overlay order, blend-mode color reset
//!
//! - **Parallax containers**, built in two passes over shared class sets
//!
//! - **Statement grouping** by `(atRules, selector)` with text or structured output
//!
//! # Not Implemented
//!
//! - Parsing arbitrary CSS
//! - Markup generation; containers and class names are handed to the caller

/// Element attributes and borrowed attribute trees.
pub mod attrs;
/// Per-request memoization of gradients and SVG data URIs.
pub mod cache;
/// Ordered, de-duplicated class-name lists.
pub mod classnames;
/// Declaration compilers.
pub mod compile;
/// Breakpoint and state axes.
pub mod config;
/// Hand-written CSS fields.
pub mod custom_css;
/// CSS declarations and their targets.
pub mod declarations;
/// The compilation entry point.
pub mod engine;
/// Request validation errors.
pub mod error;
/// The `!important` policy.
pub mod important;
/// Background layer composition.
pub mod layers;
/// Parallax containers.
pub mod parallax;
/// Cascade resolution.
pub mod resolve;
/// Selector construction.
pub mod selector;
/// Statement grouping and serialization.
pub mod statement;
/// Built-in pattern, mask, and divider shapes.
pub mod svg;
/// Loosely-typed value helpers.
pub mod values;

// Re-exports for convenience
pub use attrs::{AttributeTree, Coordinate, ElementAttrs};
pub use cache::CompileCache;
pub use classnames::ClassNames;
pub use compile::{Compiler, DeclarationCompiler, DeclarationContext, Feature};
pub use config::{BreakpointConfig, EngineConfig, StateConfig};
pub use declarations::{Declaration, DeclarationSet, Declarations, Target};
pub use engine::{CompiledStyle, StyleEngine, StyleRequest};
pub use error::StyleError;
pub use important::Important;
pub use layers::{ColorDecision, Layer, LayerKind, LayerStack};
pub use parallax::{ParallaxBuild, ParallaxBuilder, ParallaxContainer};
pub use resolve::{ResolveMode, Resolver, Terminals};
pub use selector::Selectors;
pub use statement::{CssStatement, OutputFormat, StatementGroup, StyleOutput};
