//! Parser for npm package-lock.json files.
//!
//! The lockfile is a nested tree: each entry pins a version and may carry
//! its own `dependencies` map of privately nested entries that shadow
//! whatever an ancestor would otherwise provide. Parsing keeps that shape;
//! flattening it is the resolver's job.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::package_json::ParseResult;
use crate::graph::DependencyList;

/// Standard file name of the npm lockfile.
pub const PACKAGE_LOCK: &str = "package-lock.json";

/// A parsed package-lock.json file.
///
/// Top-level fields other than the dependency tree (such as the
/// `requires: true` marker npm writes at the root) carry no resolution
/// information and are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpmLockfile {
    /// Project name as recorded by npm.
    pub name: Option<String>,

    /// Project version as recorded by npm.
    pub version: Option<String>,

    /// Lockfile schema version.
    #[serde(rename = "lockfileVersion")]
    pub lockfile_version: Option<u32>,

    /// Top-level (hoisted) entries.
    #[serde(default)]
    pub dependencies: BTreeMap<String, NpmLockEntry>,
}

/// One entry in the nested lockfile tree.
///
/// `requires` and `dependencies` are always present as possibly-empty
/// maps, so downstream code never branches on their presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpmLockEntry {
    /// Exact pinned version.
    pub version: String,

    /// Registry tarball URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,

    /// Content hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,

    /// Declared ranges of this entry's own dependencies.
    #[serde(default)]
    pub requires: DependencyList,

    /// Privately nested entries shadowing ancestor-provided versions.
    #[serde(default)]
    pub dependencies: BTreeMap<String, NpmLockEntry>,
}

/// Parses a package-lock.json file from a file path.
pub fn parse_file(path: &Path) -> ParseResult<NpmLockfile> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a package-lock.json from a string.
///
/// # Example
///
/// ```
/// use lockgraph::parser::package_lock::parse_str;
///
/// let json = r#"{
///     "name": "my-app",
///     "lockfileVersion": 1,
///     "dependencies": {
///         "left-pad": {"version": "1.3.0"}
///     }
/// }"#;
/// let lock = parse_str(json).unwrap();
/// assert_eq!(lock.dependencies["left-pad"].version, "1.3.0");
/// ```
pub fn parse_str(content: &str) -> ParseResult<NpmLockfile> {
    let lock: NpmLockfile = serde_json::from_str(content)?;
    Ok(lock)
}
