//! Hierarchical configuration resolution for SEAMM and its plug-ins.
//!
//! Your starting point should probably be [`Document::from_path`].
//!
//! # Internals
//! SEAMM's configuration lives in INI-formatted files with a distinguished
//! `[DEFAULT]` section and `${section:option}` cross-references. This crate
//! parses such a file into an immutable [`Document`], answers
//! `(section, option)` lookups with fallback to `[DEFAULT]`, and expands
//! references recursively on demand (detecting cycles instead of looping).
//!
//! The document is a plain value with an explicit lifecycle: load it once at
//! startup, hand out shared references to the platform's job-execution and
//! plug-in layers, and reload by replacing the whole value — there is no
//! process-wide mutable configuration state.

pub use self::document::{Document, Section, DEFAULT_SECTION, DEFAULT_TEMPLATE};
pub use self::errors::ConfigError;

mod document;
mod errors;
pub mod logging;
pub mod utilities;
