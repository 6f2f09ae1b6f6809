//! Front-matter parsing
//!
//! Documents may start with a `---` delimited header of `key: value` lines.
//! Parsing is best-effort: a missing or malformed header never fails, it just
//! yields empty metadata and leaves the text untouched.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// `---` line, header lines, `---` line, then the body. `\r\n` and `\n`
    /// are accepted interchangeably.
    static ref HEADER_BLOCK: Regex =
        Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---\r?\n(.*)\z").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"\r?\n").unwrap();
}

/// Byte-order mark some editors (mostly on Windows) put at the start of UTF-8 files
const BOM: char = '\u{feff}';

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    Text(String),
    List(Vec<String>),
}

impl FrontMatterValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontMatterValue::Text(s) => Some(s),
            FrontMatterValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FrontMatterValue::List(items) => Some(items),
            FrontMatterValue::Text(_) => None,
        }
    }
}

/// Front-matter data from a document header
///
/// Keys keep the order they were declared in. Later duplicates overwrite
/// earlier values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    entries: IndexMap<String, FrontMatterValue>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        let content = strip_bom(content);

        let Some(caps) = HEADER_BLOCK.captures(content) else {
            return (FrontMatter::default(), content);
        };

        let header = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        let mut fm = FrontMatter::default();
        for line in LINE_BREAK.split(header) {
            if let Some((key, value)) = parse_line(line) {
                fm.entries.insert(key, value);
            }
        }

        (fm, body)
    }

    /// Get any entry, including keys this crate does not interpret
    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.entries.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.text("date")
    }

    pub fn category(&self) -> Option<&str> {
        self.text("category")
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    /// Tags, only when the header declared them as a list
    pub fn tags(&self) -> Option<&[String]> {
        self.entries.get("tags").and_then(FrontMatterValue::as_list)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FrontMatterValue)> {
        self.entries.iter()
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(FrontMatterValue::as_str)
    }
}

/// Remove a single leading byte-order mark, if present
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix(BOM).unwrap_or(content)
}

/// Split a header line at its first colon. Lines without a colon, or with
/// the colon in the first column, carry no entry.
fn parse_line(line: &str) -> Option<(String, FrontMatterValue)> {
    let colon = line.find(':')?;
    if colon == 0 {
        return None;
    }

    let key = line[..colon].trim().to_string();
    let value = strip_quotes(line[colon + 1..].trim());

    if key == "tags" && value.starts_with('[') && value.ends_with(']') {
        return Some((key, FrontMatterValue::List(parse_tag_list(value))));
    }

    Some((key, FrontMatterValue::Text(value.to_string())))
}

/// Strip exactly one layer of matching single or double quotes
fn strip_quotes(value: &str) -> &str {
    let quoted = (value.starts_with('"') && value.ends_with('"'))
        || (value.starts_with('\'') && value.ends_with('\''));
    if !quoted {
        return value;
    }
    if value.len() < 2 {
        return "";
    }
    &value[1..value.len() - 1]
}

/// Parse a bracketed tag list. Strict JSON first (`["a", "b"]`), then a
/// comma split for the loose forms people actually write (`[a, 'b']`).
fn parse_tag_list(value: &str) -> Vec<String> {
    if let Ok(tags) = serde_json::from_str::<Vec<serde_json::Value>>(value) {
        return tags
            .into_iter()
            .map(|tag| match tag {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect();
    }

    let inner = if value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        ""
    };

    inner
        .split(',')
        .map(|tag| {
            let tag = tag.trim();
            let tag = tag.strip_prefix(['"', '\'']).unwrap_or(tag);
            let tag = tag.strip_suffix(['"', '\'']).unwrap_or(tag);
            tag.to_string()
        })
        .collect()
}
