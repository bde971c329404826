//! Parser for yarn.lock v1 files.
//!
//! The v1 format is neither JSON nor YAML: a line-oriented layout with
//! `#` comments, two-space indentation, optional double quotes around keys
//! and values, and headers that may list several descriptors for one entry
//! (`"a@^1.0.0", "a@^1.2.0":`). Each descriptor is fanned out to its own
//! map entry so the resolver can do exact descriptor lookups.
//!
//! Scalar fields other than `version`, `resolved` and `integrity` are
//! ignored, as are sub-blocks other than `dependencies` and
//! `optionalDependencies`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::graph::DependencyList;

/// Standard file name of the yarn lockfile.
pub const YARN_LOCK: &str = "yarn.lock";

/// A parsed yarn.lock: descriptor string (`name@range`) to entry.
pub type YarnLockfile = BTreeMap<String, YarnLockEntry>;

/// One entry of a yarn.lock file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YarnLockEntry {
    /// Exact pinned version.
    pub version: String,

    /// Registry tarball URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,

    /// Content hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,

    /// Declared ranges of this entry's dependencies.
    #[serde(default)]
    pub dependencies: DependencyList,

    /// Declared ranges of this entry's optional dependencies.
    #[serde(default)]
    pub optional_dependencies: DependencyList,
}

impl YarnLockEntry {
    /// All declared ranges: regular dependencies plus optional ones.
    ///
    /// npm lockfile entries list optional dependencies in `requires`
    /// alongside everything else; merging here keeps the two formats'
    /// resolver inputs symmetric.
    pub fn declared_dependencies(&self) -> DependencyList {
        let mut all = self.dependencies.clone();
        all.extend(
            self.optional_dependencies
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        all
    }
}

/// Errors produced while parsing a yarn.lock file.
#[derive(Debug, thiserror::Error)]
pub enum YarnLockError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// A line is indented to a depth the format does not have.
    #[error("yarn.lock line {line}: unexpected indentation")]
    UnexpectedIndent {
        /// 1-based line number.
        line: usize,
    },

    /// A line could not be split into a key and a value.
    #[error("yarn.lock line {line}: expected a 'key value' pair")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
    },

    /// A property line appeared before any entry header.
    #[error("yarn.lock line {line}: property outside of an entry")]
    OrphanProperty {
        /// 1-based line number.
        line: usize,
    },

    /// An entry ended without a `version` field.
    #[error("yarn.lock entry '{key}' has no version field")]
    MissingVersion {
        /// First descriptor of the offending entry.
        key: String,
    },
}

/// Parses a yarn.lock file from a file path.
pub fn parse_file(path: &Path) -> Result<YarnLockfile, YarnLockError> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a yarn.lock from a string.
///
/// # Example
///
/// ```
/// use lockgraph::parser::yarn_lock::parse_str;
///
/// let lock = parse_str("left-pad@^1.0.0:\n  version \"1.3.0\"\n").unwrap();
/// assert_eq!(lock["left-pad@^1.0.0"].version, "1.3.0");
/// ```
pub fn parse_str(content: &str) -> Result<YarnLockfile, YarnLockError> {
    let mut lock = YarnLockfile::new();
    let mut current: Option<EntryBuilder> = None;
    let mut block = Block::None;

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim_end();
        if trimmed.is_empty() || trimmed.trim_start().starts_with('#') {
            continue;
        }

        let text = trimmed.trim_start();
        let indent = trimmed.len() - text.len();

        match indent {
            0 => {
                flush(&mut lock, current.take())?;
                block = Block::None;

                let header = trimmed
                    .strip_suffix(':')
                    .ok_or(YarnLockError::MalformedLine { line })?;
                let keys = header
                    .split(", ")
                    .map(|k| unquote(k).to_string())
                    .collect();
                current = Some(EntryBuilder::new(keys));
            }
            2 => {
                let entry = current
                    .as_mut()
                    .ok_or(YarnLockError::OrphanProperty { line })?;

                if let Some(name) = text.strip_suffix(':') {
                    block = match unquote(name) {
                        "dependencies" => Block::Dependencies,
                        "optionalDependencies" => Block::OptionalDependencies,
                        _ => Block::Unknown,
                    };
                } else {
                    block = Block::None;
                    let (key, value) =
                        split_pair(text).ok_or(YarnLockError::MalformedLine { line })?;
                    match key.as_str() {
                        "version" => entry.version = Some(value),
                        "resolved" => entry.resolved = Some(value),
                        "integrity" => entry.integrity = Some(value),
                        _ => {}
                    }
                }
            }
            4 => {
                let entry = current
                    .as_mut()
                    .ok_or(YarnLockError::OrphanProperty { line })?;
                let target = match block {
                    Block::Dependencies => &mut entry.dependencies,
                    Block::OptionalDependencies => &mut entry.optional_dependencies,
                    Block::Unknown => continue,
                    Block::None => return Err(YarnLockError::UnexpectedIndent { line }),
                };
                let (name, range) =
                    split_pair(text).ok_or(YarnLockError::MalformedLine { line })?;
                target.insert(name, range);
            }
            _ => return Err(YarnLockError::UnexpectedIndent { line }),
        }
    }

    flush(&mut lock, current.take())?;
    Ok(lock)
}

/// Which sub-block the parser is currently inside.
enum Block {
    None,
    Dependencies,
    OptionalDependencies,
    Unknown,
}

/// Accumulates one entry until the next header or end of input.
struct EntryBuilder {
    keys: Vec<String>,
    version: Option<String>,
    resolved: Option<String>,
    integrity: Option<String>,
    dependencies: DependencyList,
    optional_dependencies: DependencyList,
}

impl EntryBuilder {
    fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            version: None,
            resolved: None,
            integrity: None,
            dependencies: DependencyList::new(),
            optional_dependencies: DependencyList::new(),
        }
    }
}

fn flush(lock: &mut YarnLockfile, builder: Option<EntryBuilder>) -> Result<(), YarnLockError> {
    let Some(builder) = builder else {
        return Ok(());
    };

    let version = builder.version.ok_or_else(|| YarnLockError::MissingVersion {
        key: builder.keys.first().cloned().unwrap_or_default(),
    })?;
    let entry = YarnLockEntry {
        version,
        resolved: builder.resolved,
        integrity: builder.integrity,
        dependencies: builder.dependencies,
        optional_dependencies: builder.optional_dependencies,
    };

    for key in builder.keys {
        lock.insert(key, entry.clone());
    }
    Ok(())
}

/// Strips one pair of surrounding double quotes, if present.
fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Splits a `key value` line, where either part may be quoted.
fn split_pair(text: &str) -> Option<(String, String)> {
    let (key, rest) = if let Some(stripped) = text.strip_prefix('"') {
        let end = stripped.find('"')?;
        (&stripped[..end], stripped[end + 1..].trim_start())
    } else {
        let end = text.find(char::is_whitespace)?;
        (&text[..end], text[end..].trim_start())
    };

    if rest.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(rest).to_string()))
}
