//! The parsed configuration document and section-level lookups.
//!
//! Your starting point should probably be [`Document::from_path`]
//! (or [`Document::load_or_init`] on first run).
//!
//! # Internals
//! A [`Document`] is parsed once and immutable afterwards: consumers hold a
//! shared reference to it, and "reloading" means parsing a fresh `Document`
//! and replacing that reference, never mutating in place. Named sections keep
//! their file order; the `[DEFAULT]` section is stored apart from them and
//! every lookup in another section falls back to it.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::ConfigError;

mod interpolation;
mod parser;


/// Name of the distinguished fallback section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// The packaged configuration template written on first run
/// (prolog, then `[DEFAULT]` and `[SEAMM]` at the top of the file).
pub const DEFAULT_TEMPLATE: &str = include_str!("../../data/seamm.ini");


/// Normalize an option name for lookup: option names are case-insensitive
/// and treat `-` and `_` as identical. Section names are never normalized.
pub(crate) fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('-', "_")
}


/// A named group of options. Option names are stored normalized
/// (see [`normalize_key`]); values are the raw strings from the file,
/// `${...}` references unexpanded.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    options: HashMap<String, String>,
}

impl Section {
    pub(crate) fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            options: HashMap::new(),
        }
    }

    /// The section's name, exactly as it appeared in the `[...]` header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value of an option in this section alone, without the
    /// `[DEFAULT]` fallback. `key` is normalized before lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(&normalize_key(key)).map(String::as_str)
    }

    pub(crate) fn insert(&mut self, normalized_key: String, value: String) {
        self.options.insert(normalized_key, value);
    }

    pub(crate) fn append_to(&mut self, normalized_key: &str, continuation: &str) {
        if let Some(value) = self.options.get_mut(normalized_key) {
            value.push('\n');
            value.push_str(continuation);
        }
    }
}


/// An entire parsed configuration document: the `[DEFAULT]` section plus
/// named sections in file order.
#[derive(Debug, Clone)]
pub struct Document {
    /// The file this document was loaded from, if it came from a file.
    file_path: Option<PathBuf>,

    default_section: Section,

    /// Named sections, in the order their headers first appeared.
    sections: Vec<Section>,
}

impl Document {
    /// Parse an INI-formatted document from a string.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let (default_section, sections) = parser::parse_sections(text)?;

        debug!(
            section_count = sections.len(),
            "Parsed configuration document."
        );

        Ok(Self {
            file_path: None,
            default_section,
            sections,
        })
    }

    /// Read and parse the configuration file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut document = Self::parse(&text)?;

        // Record the canonical path so `reload` and error messages refer to
        // the real file even when loaded through a symlink or relative path.
        document.file_path = Some(dunce::canonicalize(path).map_err(|source| {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?);

        Ok(document)
    }

    /// Load the configuration file at `path`, first creating it from the
    /// packaged template ([`DEFAULT_TEMPLATE`]) if it does not exist yet.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(
                path = %path.display(),
                "Configuration file missing, writing the packaged template."
            );

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            }

            fs::write(path, DEFAULT_TEMPLATE).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }

        Self::from_path(path)
    }

    /// Parse a fresh `Document` from the file this one was loaded from.
    /// The returned document replaces this one at the call site; the
    /// original is never mutated.
    pub fn reload(&self) -> Result<Self, ConfigError> {
        match &self.file_path {
            Some(path) => Self::from_path(path),
            None => Err(ConfigError::Io {
                path: PathBuf::new(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "document was not loaded from a file",
                ),
            }),
        }
    }

    /// The canonical path this document was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Names of the named sections, in file order (`DEFAULT` excluded).
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::name)
    }

    /// Look up a named section, or the `[DEFAULT]` section when `name`
    /// is exactly `DEFAULT`.
    pub fn section(&self, name: &str) -> Option<&Section> {
        if name == DEFAULT_SECTION {
            return Some(&self.default_section);
        }

        self.sections.iter().find(|section| section.name == name)
    }

    /// Raw value of `key` in `section`, falling back to `[DEFAULT]` when
    /// the section has no such option (or does not exist at all — an
    /// undeclared section behaves as an empty one).
    ///
    /// The returned string may still contain `${...}` references; use
    /// [`resolve`][Self::resolve] for the fully expanded value.
    pub fn get(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        let normalized_key = normalize_key(key);

        if section != DEFAULT_SECTION {
            if let Some(value) = self
                .section(section)
                .and_then(|found| found.options.get(&normalized_key))
            {
                return Ok(value);
            }
        }

        self.default_section
            .options
            .get(&normalized_key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::KeyNotFound {
                section: section.to_string(),
                key: normalized_key,
            })
    }

    /// All options visible from `section` — its own plus the `[DEFAULT]`
    /// fallbacks it does not override — with raw, unexpanded values.
    pub fn section_values(&self, section: &str) -> BTreeMap<String, String> {
        let mut values: BTreeMap<String, String> = self
            .default_section
            .options
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if section != DEFAULT_SECTION {
            if let Some(found) = self.section(section) {
                for (key, value) in &found.options {
                    values.insert(key.clone(), value.clone());
                }
            }
        }

        values
    }
}
