//! Recursive `${...}` reference expansion with cycle detection.
//!
//! A value may embed `${section:option}` references (resolved against the
//! named section) and bare `${option}` references (resolved against the
//! section the value was read from, falling back to `[DEFAULT]` as usual).
//! `$$` produces a literal `$`. Expansion follows references recursively and
//! reports genuine cycles instead of bounding the recursion depth.

use std::collections::BTreeMap;

use tracing::trace;

use super::{normalize_key, Document};
use crate::errors::ConfigError;


/// One `(section, option)` hop on the active expansion path.
type Frame = (String, String);

fn format_chain(frames: &[Frame], repeated: &Frame) -> String {
    let mut chain = String::new();

    for (section, key) in frames {
        chain.push_str(section);
        chain.push(':');
        chain.push_str(key);
        chain.push_str(" -> ");
    }

    chain.push_str(&repeated.0);
    chain.push(':');
    chain.push_str(&repeated.1);

    chain
}

impl Document {
    /// Fully expanded value of `key` in `section`: the raw value from
    /// [`get`][Self::get] with every `${...}` reference recursively
    /// replaced by its own resolved value.
    pub fn resolve(&self, section: &str, key: &str) -> Result<String, ConfigError> {
        let mut active_path: Vec<Frame> = Vec::new();
        self.resolve_with_path(section, key, &mut active_path)
    }

    /// All options visible from `section`, fully expanded.
    pub fn resolve_values(&self, section: &str) -> Result<BTreeMap<String, String>, ConfigError> {
        let mut resolved = BTreeMap::new();

        for key in self.section_values(section).into_keys() {
            let value = self.resolve(section, &key)?;
            resolved.insert(key, value);
        }

        Ok(resolved)
    }

    fn resolve_with_path(
        &self,
        section: &str,
        key: &str,
        active_path: &mut Vec<Frame>,
    ) -> Result<String, ConfigError> {
        let frame: Frame = (section.to_string(), normalize_key(key));

        if let Some(first_visit) = active_path.iter().position(|visited| visited == &frame) {
            return Err(ConfigError::CircularReference {
                chain: format_chain(&active_path[first_visit..], &frame),
            });
        }

        let raw = self.get(section, key)?;

        trace!(section, key, raw, "Expanding configuration value.");

        active_path.push(frame);
        let expanded = self.expand_value(section, raw, active_path);
        active_path.pop();

        expanded
    }

    /// Expand every `$$` escape and `${...}` reference in `value`.
    /// Bare `${option}` references resolve against `current_section`.
    fn expand_value(
        &self,
        current_section: &str,
        value: &str,
        active_path: &mut Vec<Frame>,
    ) -> Result<String, ConfigError> {
        let mut expanded = String::with_capacity(value.len());
        let mut characters = value.char_indices().peekable();

        while let Some((position, character)) = characters.next() {
            if character != '$' {
                expanded.push(character);
                continue;
            }

            match characters.peek() {
                Some((_, '$')) => {
                    characters.next();
                    expanded.push('$');
                }
                Some((_, '{')) => {
                    characters.next();

                    let mut reference = String::new();
                    let mut terminated = false;
                    for (_, inner) in characters.by_ref() {
                        if inner == '}' {
                            terminated = true;
                            break;
                        }
                        reference.push(inner);
                    }

                    if !terminated {
                        return Err(ConfigError::InterpolationSyntax {
                            value: value.to_string(),
                            position,
                        });
                    }

                    let (target_section, target_key) = match reference.split_once(':') {
                        Some((explicit_section, key)) => (explicit_section, key),
                        None => (current_section, reference.as_str()),
                    };

                    let resolved =
                        self.resolve_with_path(target_section, target_key, active_path)?;
                    expanded.push_str(&resolved);
                }
                _ => {
                    return Err(ConfigError::InterpolationSyntax {
                        value: value.to_string(),
                        position,
                    });
                }
            }
        }

        Ok(expanded)
    }
}
