//! Error types surfaced by document loading and value resolution.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;


/// All the ways loading or resolving a configuration document can fail.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A line in the document could not be parsed. Loading aborts on the
    /// first malformed line.
    #[error("malformed configuration on line {line_number}: {reason}\n  {line}")]
    #[diagnostic(code(seamm_config::parse_error))]
    Parse {
        /// 1-based line number of the offending line.
        line_number: usize,

        /// The offending line, verbatim.
        line: String,

        /// What was wrong with it.
        reason: String,
    },

    /// The requested option exists neither in the named section nor in
    /// `[DEFAULT]`.
    #[error("no option {key:?} in section [{section}] or [DEFAULT]")]
    #[diagnostic(code(seamm_config::key_not_found))]
    KeyNotFound { section: String, key: String },

    /// Expanding `${...}` references ran into a cycle.
    #[error("circular reference while expanding {chain}")]
    #[diagnostic(code(seamm_config::circular_reference))]
    CircularReference {
        /// The cycle, formatted as `section:option -> ... -> section:option`.
        chain: String,
    },

    /// A `$` in a value did not start a valid `$$` escape or `${...}`
    /// reference.
    #[error("malformed ${{...}} reference at byte {position} of value {value:?}")]
    #[diagnostic(code(seamm_config::interpolation_syntax))]
    InterpolationSyntax { value: String, position: usize },

    /// Reading or creating the configuration file failed.
    #[error("I/O error on configuration file {}", path.display())]
    #[diagnostic(code(seamm_config::io_error))]
    Io {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },
}
