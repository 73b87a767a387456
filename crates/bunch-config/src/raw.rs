//! Sectioned `key=value` text format.
//!
//! ```text
//! [general]
//! route = Downtown-12
//! morningPeak = 0700-0749
//!
//! # a comment
//! [stop]
//! distAvg = 400.0
//! ```
//!
//! Lines are trimmed; blank lines and lines starting with `#` are ignored.
//! A `[section]` line opens a new section; every `key = value` line before
//! the first section header, or inside one, is stored under
//! `"section.key"` (or bare `"key"` if no section is open yet).

use std::collections::HashMap;

use crate::error::{ConfigError, ConfigResult};

pub fn parse(text: &str) -> ConfigResult<HashMap<String, String>> {
    let mut map = HashMap::new();
    let mut section = String::new();

    for (i, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            section = name.trim().to_string();
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::BadLine { line_no: i + 1, line: raw_line.to_string() });
        };
        let key = key.trim();
        let value = value.trim().to_string();
        let qualified = if section.is_empty() {
            key.to_string()
        } else {
            format!("{section}.{key}")
        };
        map.insert(qualified, value);
    }

    Ok(map)
}
