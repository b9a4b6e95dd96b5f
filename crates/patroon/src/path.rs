//! Path resolution against target values.
//!
//! A path is the sequence of keys from a pattern's root down to one of its
//! leaves. At match time the same path is followed through the target. When
//! the target lacks that structure the resolver fails with `PathMissing`,
//! which the compiler turns into a plain non-match.

use crate::value::Value;
use std::fmt;

/// One step of a path: a sequence index or a mapping key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl Key {
    /// The key as a mapping key (`Index(3)` becomes `"3"`).
    pub fn to_name(&self) -> String {
        match self {
            Key::Index(i) => i.to_string(),
            Key::Name(name) => name.clone(),
        }
    }

    /// The key as a sequence index, if it is one or spells one canonically.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(name) => parse_index(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "[{i}]"),
            Key::Name(name) => write!(f, ".{name}"),
        }
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

/// Keys from a pattern root to one leaf.
pub type Path = Vec<Key>;

/// Render a path as `$.a[0].b` for diagnostics.
pub fn format_path(path: &[Key]) -> String {
    let mut out = String::from("$");
    for key in path {
        out.push_str(&key.to_string());
    }
    out
}

/// The target lacks the structure a pattern expects at `path`.
///
/// Carries the full path and the root it was resolved against. This is a
/// structural signal, kept apart from `MatchError` so it can never be mistaken
/// for a fault raised by user code.
#[derive(Debug, Clone, thiserror::Error)]
#[error("cannot read path {} of {root}", format_path(.path))]
pub struct PathMissing {
    pub path: Path,
    pub root: Value,
}

/// Parse a canonical decimal index ("0", "12", but not "01" or "+1").
fn parse_index(name: &str) -> Option<usize> {
    let canonical = name == "0" || (!name.starts_with('0') && !name.is_empty());
    if canonical && name.bytes().all(|b| b.is_ascii_digit()) {
        name.parse().ok()
    } else {
        None
    }
}

/// Look up one child of `value`.
///
/// Sequences answer index keys and canonical numeric names; mappings answer
/// names and stringified indices. Everything else has no keyed access.
pub fn child(value: &Value, key: &Key) -> Option<Value> {
    match value {
        Value::Seq(seq) => key.as_index().and_then(|i| seq.get(i)),
        Value::Map(map) => match key {
            Key::Name(name) => map.get(name),
            Key::Index(i) => map.get(&i.to_string()),
        },
        _ => None,
    }
}

/// Follow `path` from `root`.
pub fn resolve(path: &[Key], root: &Value) -> Result<Value, PathMissing> {
    let mut current = root.clone();
    for key in path {
        current = child(&current, key).ok_or_else(|| PathMissing {
            path: path.to_vec(),
            root: root.clone(),
        })?;
    }
    Ok(current)
}
