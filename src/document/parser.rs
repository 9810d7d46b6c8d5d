//! Line-oriented INI parser.
//!
//! Accepts `#`/`;` full-line comments, `[name]` section headers and
//! `key = value` option lines. An indented line continues the previous
//! option's value. The first malformed line aborts the parse.

use tracing::trace;

use super::{normalize_key, Section, DEFAULT_SECTION};
use crate::errors::ConfigError;


/// Which section the parser is currently filling.
enum Cursor {
    /// No header seen yet; option lines are an error here.
    None,
    Default,
    Named(usize),
}

fn parse_error(line_number: usize, line: &str, reason: &str) -> ConfigError {
    ConfigError::Parse {
        line_number,
        line: line.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse `text` into the `[DEFAULT]` section and the named sections in
/// file order.
pub(super) fn parse_sections(text: &str) -> Result<(Section, Vec<Section>), ConfigError> {
    let mut default_section = Section::new(DEFAULT_SECTION);
    let mut sections: Vec<Section> = Vec::new();

    let mut cursor = Cursor::None;

    // Normalized name of the last option line, for continuation lines.
    let mut last_key: Option<String> = None;

    for (line_index, line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        let trimmed = line.trim();

        // Blank lines end any in-progress multi-line value.
        if trimmed.is_empty() {
            last_key = None;
            continue;
        }

        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        // An indented line continues the previous option's value, even
        // when it would otherwise parse as a header or an option line.
        if line.starts_with(char::is_whitespace) {
            match (&last_key, &cursor) {
                (Some(key), Cursor::Default) => {
                    default_section.append_to(key, trimmed);
                }
                (Some(key), Cursor::Named(index)) => {
                    sections[*index].append_to(key, trimmed);
                }
                _ => {
                    return Err(parse_error(
                        line_number,
                        line,
                        "continuation line without a preceding option",
                    ));
                }
            }
            continue;
        }

        if trimmed.starts_with('[') {
            if !trimmed.ends_with(']') {
                return Err(parse_error(
                    line_number,
                    line,
                    "section header is missing the closing `]`",
                ));
            }

            let name = trimmed[1..trimmed.len() - 1].trim();
            if name.is_empty() {
                return Err(parse_error(line_number, line, "section header has no name"));
            }

            trace!(section = name, line_number, "Entering section.");

            if name == DEFAULT_SECTION {
                cursor = Cursor::Default;
            } else {
                // A repeated header reopens the existing section.
                let index = match sections.iter().position(|section| section.name() == name) {
                    Some(existing) => existing,
                    None => {
                        sections.push(Section::new(name));
                        sections.len() - 1
                    }
                };
                cursor = Cursor::Named(index);
            }

            last_key = None;
            continue;
        }

        let current_section = match cursor {
            Cursor::None => {
                return Err(parse_error(
                    line_number,
                    line,
                    "option line before any section header",
                ));
            }
            Cursor::Default => &mut default_section,
            Cursor::Named(index) => &mut sections[index],
        };

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            return Err(parse_error(line_number, line, "option line is missing `=`"));
        };

        let key = normalize_key(raw_key);
        if key.is_empty() {
            return Err(parse_error(line_number, line, "option line has an empty key"));
        }

        current_section.insert(key.clone(), raw_value.trim().to_string());
        last_key = Some(key);
    }

    Ok((default_section, sections))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let document = Document::parse(
            "# prolog comment\n\
             ; alternate comment style\n\
             \n\
             [SEAMM]\n\
             # about the project\n\
             project = dev\n",
        )
        .unwrap();

        assert_eq!(document.get("SEAMM", "project").unwrap(), "dev");
    }

    #[test]
    fn empty_value_is_the_empty_string() {
        let document = Document::parse("[SEAMM]\nsecret-key =\n").unwrap();

        assert_eq!(document.get("SEAMM", "secret-key").unwrap(), "");
    }

    #[test]
    fn values_keep_internal_whitespace() {
        let document = Document::parse("[SEAMM]\ntitle = A longer   value\n").unwrap();

        assert_eq!(document.get("SEAMM", "title").unwrap(), "A longer   value");
    }

    #[test]
    fn indented_lines_continue_the_previous_value() {
        let document = Document::parse(
            "[SEAMM]\n\
             description = first line\n\
             \tsecond line\n\
             \tthird line\n",
        )
        .unwrap();

        assert_eq!(
            document.get("SEAMM", "description").unwrap(),
            "first line\nsecond line\nthird line"
        );
    }

    #[test]
    fn indented_bracket_line_is_a_continuation_not_a_header() {
        let document = Document::parse(
            "[SEAMM]\n\
             options = first\n\
             \t[\"a\", \"b\"]\n",
        )
        .unwrap();

        assert_eq!(
            document.get("SEAMM", "options").unwrap(),
            "first\n[\"a\", \"b\"]"
        );
        assert_eq!(document.section_names().count(), 1);
    }

    #[test]
    fn indented_option_like_line_is_a_continuation() {
        let document = Document::parse(
            "[SEAMM]\n\
             command = run\n\
             \t--level = high\n",
        )
        .unwrap();

        assert_eq!(
            document.get("SEAMM", "command").unwrap(),
            "run\n--level = high"
        );
    }

    #[test]
    fn duplicate_header_reopens_the_section() {
        let document = Document::parse(
            "[SEAMM]\n\
             a = 1\n\
             [other]\n\
             b = 2\n\
             [SEAMM]\n\
             c = 3\n",
        )
        .unwrap();

        assert_eq!(document.get("SEAMM", "a").unwrap(), "1");
        assert_eq!(document.get("SEAMM", "c").unwrap(), "3");
        assert_eq!(document.section_names().count(), 2);
    }

    #[test]
    fn later_duplicate_key_overrides_earlier() {
        let document = Document::parse("[SEAMM]\na = 1\na = 2\n").unwrap();

        assert_eq!(document.get("SEAMM", "a").unwrap(), "2");
    }

    #[test]
    fn option_before_any_header_is_a_parse_error() {
        let error = Document::parse("a = 1\n").unwrap_err();

        assert!(matches!(
            error,
            ConfigError::Parse { line_number: 1, .. }
        ));
    }

    #[test]
    fn missing_equals_is_a_parse_error() {
        let error = Document::parse("[SEAMM]\nthis is not an option\n").unwrap_err();

        assert!(matches!(
            error,
            ConfigError::Parse { line_number: 2, .. }
        ));
    }

    #[test]
    fn unterminated_header_is_a_parse_error() {
        let error = Document::parse("[SEAMM\n").unwrap_err();

        assert!(matches!(error, ConfigError::Parse { line_number: 1, .. }));
    }

    #[test]
    fn empty_header_is_a_parse_error() {
        let error = Document::parse("[]\n").unwrap_err();

        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_key_is_a_parse_error() {
        let error = Document::parse("[SEAMM]\n= value\n").unwrap_err();

        assert!(matches!(error, ConfigError::Parse { line_number: 2, .. }));
    }

    #[test]
    fn continuation_without_option_is_a_parse_error() {
        let error = Document::parse("[SEAMM]\n\tdangling continuation\n").unwrap_err();

        assert!(matches!(error, ConfigError::Parse { line_number: 2, .. }));
    }

    #[test]
    fn keys_are_stored_normalized() {
        let document = Document::parse("[SEAMM]\nLog-Level = INFO\n").unwrap();

        assert_eq!(document.get("SEAMM", "log_level").unwrap(), "INFO");
    }
}
