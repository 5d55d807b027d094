//! INI document parsing
//!
//! Supports the subset of the INI format used by the configuration file:
//! `[Section]` headers, `key = value` or `key: value` pairs, `#`/`;` comment
//! lines, indented continuation lines and a `[DEFAULT]` section whose values
//! are visible from every other section. Keys are case-insensitive, section
//! names are not.

use std::collections::HashMap;

/// Name of the section providing fallback values for all other sections
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Syntax error with the 1-based line it was found on
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct IniError {
    pub line: usize,
    pub message: String,
}

impl IniError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Parsed INI document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: HashMap<String, String>,
    sections: HashMap<String, HashMap<String, String>>,
}

impl IniDocument {
    /// Parse INI text
    ///
    /// A repeated section is merged into the earlier one; a repeated key
    /// keeps the last value.
    pub fn parse(text: &str) -> Result<Self, IniError> {
        let mut document = Self::default();
        let mut current_section: Option<String> = None;
        let mut current_key: Option<String> = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = raw_line.trim();

            if trimmed.is_empty() {
                current_key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw_line.starts_with(char::is_whitespace);
            if indented {
                if let (Some(section), Some(key)) = (&current_section, &current_key) {
                    if let Some(value) = document.entries_mut(section).get_mut(key) {
                        if !value.is_empty() {
                            value.push('\n');
                        }
                        value.push_str(trimmed);
                    }
                    continue;
                }
            }

            if let Some(name) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                if name.is_empty() {
                    return Err(IniError::new(line_number, "empty section name"));
                }
                document.entries_mut(name);
                current_section = Some(name.to_string());
                current_key = None;
                continue;
            }

            let Some(section) = &current_section else {
                return Err(IniError::new(
                    line_number,
                    format!("'{trimmed}' appears before any [section] header"),
                ));
            };

            let Some(delimiter) = trimmed.find(['=', ':']) else {
                return Err(IniError::new(
                    line_number,
                    format!("expected 'key = value', found '{trimmed}'"),
                ));
            };

            let key = trimmed[..delimiter].trim().to_lowercase();
            if key.is_empty() {
                return Err(IniError::new(line_number, "missing key before delimiter"));
            }
            let value = trimmed[delimiter + 1..].trim().to_string();

            document.entries_mut(section).insert(key.clone(), value);
            current_key = Some(key);
        }

        Ok(document)
    }

    /// True if a section named `name` was declared (`[DEFAULT]` excluded)
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Look up `key` in `section`, falling back to `[DEFAULT]`
    ///
    /// Returns `None` when the section does not exist.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let entries = self.sections.get(section)?;
        let key = key.to_lowercase();
        entries
            .get(&key)
            .or_else(|| self.defaults.get(&key))
            .map(String::as_str)
    }

    fn entries_mut(&mut self, section: &str) -> &mut HashMap<String, String> {
        if section == DEFAULT_SECTION {
            &mut self.defaults
        } else {
            self.sections.entry(section.to_string()).or_default()
        }
    }
}
