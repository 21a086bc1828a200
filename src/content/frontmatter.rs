//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A `---` line at the very start, the block, and a closing `---` line.
    static ref FRONT_MATTER: Regex =
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
            .expect("front-matter pattern is valid");
}

/// Metadata block at the top of a markdown file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    /// Plain `key: value` pairs, in file order
    pub fields: IndexMap<String, String>,
    /// Comma-separated `tags` value, if the key was present
    pub tags: Option<Vec<String>>,
}

impl FrontMatter {
    /// Split front-matter from markdown.
    /// Returns (front_matter, body). Text without a leading block is all body.
    pub fn parse(text: &str) -> (Self, &str) {
        let Some(caps) = FRONT_MATTER.captures(text) else {
            return (FrontMatter::default(), text);
        };

        let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
        let body = text[end..].trim();
        let block = caps.get(1).map(|m| m.as_str()).unwrap_or("");

        let mut fm = FrontMatter::default();
        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                continue;
            }

            if key == "tags" {
                fm.tags = Some(split_tags(value));
            } else {
                fm.fields.insert(key.to_string(), value.to_string());
            }
        }

        (fm, body)
    }

    /// Look up a plain field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.get("excerpt")
    }

    /// Parse the `date` field into a calendar date
    pub fn date(&self) -> Option<NaiveDate> {
        self.get("date").and_then(parse_date)
    }
}

/// Split a `tags:` value on commas. Tolerates a `[a, b]` wrapper.
fn split_tags(value: &str) -> Vec<String> {
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    let mut tags: Vec<String> = Vec::new();
    for tag in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Parse a date string in various formats
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim().trim_matches(|c| c == '"' || c == '\'');

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
