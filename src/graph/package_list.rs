//! Canonical resolved-dependency graph model.
//!
//! Both lockfile resolvers produce the same output shape: a [`PackageList`]
//! mapping `name@version` references to [`PackageInfo`] entries whose
//! dependency edges carry exact resolved versions. The model is built once
//! per resolver invocation and returned by value; nothing here mutates
//! shared state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Name (and version) reserved for the project's own root package.
pub const ROOT_NAME: &str = ".";

/// A declared dependency map as read from a manifest or lockfile entry:
/// package name to version range (or exact version, depending on context).
pub type DependencyList = BTreeMap<String, String>;

/// A resolved dependency map: package name to the exact version the edge
/// was pinned to, or an explicit [`Resolution::Missing`] marker.
pub type ResolvedDependencies = BTreeMap<String, Resolution>;

/// Error returned when a composite `name@version` reference cannot be
/// split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed package reference '{0}': expected 'name@version'")]
pub struct MalformedRef(pub String);

/// A `name@version` key uniquely identifying one resolved package instance.
///
/// The separator is the **last** `@` in the string, so scoped npm names
/// work as expected. The reference `.@.` identifies the project root.
///
/// # Example
///
/// ```rust
/// use lockgraph::graph::PackageRef;
///
/// let r: PackageRef = "@babel/core@7.1.0".parse().unwrap();
/// assert_eq!(r.name, "@babel/core");
/// assert_eq!(r.version, "7.1.0");
/// assert_eq!(r.to_string(), "@babel/core@7.1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PackageRef {
    /// Package name, possibly scoped (e.g. "@types/node").
    pub name: String,
    /// Exact resolved version, or "." for the root.
    pub version: String,
}

impl PackageRef {
    /// Creates a reference from a name and an exact version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The reference of the synthetic root package, `.@.`.
    pub fn root() -> Self {
        Self::new(ROOT_NAME, ROOT_NAME)
    }

    /// Returns true if this is the synthetic root reference.
    pub fn is_root(&self) -> bool {
        self.name == ROOT_NAME
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

impl FromStr for PackageRef {
    type Err = MalformedRef;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A leading '@' belongs to a scope, never to the separator.
        match s.rfind('@') {
            Some(i) if i > 0 => Ok(Self::new(&s[..i], &s[i + 1..])),
            _ => Err(MalformedRef(s.to_string())),
        }
    }
}

impl From<PackageRef> for String {
    fn from(r: PackageRef) -> Self {
        r.to_string()
    }
}

impl TryFrom<String> for PackageRef {
    type Error = MalformedRef;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Outcome of resolving one declared dependency range.
///
/// Lockfiles are occasionally inconsistent: a declared range may have no
/// entry in scope (optional or platform-specific packages, or a truncated
/// file). Such edges are kept and marked [`Resolution::Missing`] rather
/// than silently dropped, so callers can inspect them. `Missing`
/// serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolution {
    /// The edge was pinned to this exact version.
    Pinned(String),
    /// No entry in scope resolved this edge.
    Missing,
}

impl Resolution {
    /// The pinned version, if the edge resolved.
    pub fn version(&self) -> Option<&str> {
        match self {
            Resolution::Pinned(v) => Some(v),
            Resolution::Missing => None,
        }
    }

    /// Returns true if no resolution was found for the edge.
    pub fn is_missing(&self) -> bool {
        matches!(self, Resolution::Missing)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Pinned(v) => write!(f, "{}", v),
            Resolution::Missing => write!(f, "(missing)"),
        }
    }
}

/// One concrete installed package instance.
///
/// `dependencies` is always present, possibly empty; presence-checking
/// branches are not needed anywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Package name ("." for the root).
    pub name: String,
    /// Exact version ("." for the root).
    pub version: String,
    /// Source locator (registry tarball URL), when the lockfile had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
    /// Content hash, when the lockfile had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    /// Resolved dependency edges.
    #[serde(default)]
    pub dependencies: ResolvedDependencies,
}

impl PackageInfo {
    /// Creates an entry with no metadata and no dependencies.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            resolved: None,
            integrity: None,
            dependencies: ResolvedDependencies::new(),
        }
    }

    /// The `name@version` reference this entry is keyed by.
    pub fn package_ref(&self) -> PackageRef {
        PackageRef::new(&self.name, &self.version)
    }

    /// Names of declared dependencies that found no resolution.
    pub fn missing_dependencies(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|(_, r)| r.is_missing())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns true if every dependency edge was pinned.
    pub fn is_fully_resolved(&self) -> bool {
        self.dependencies.values().all(|r| !r.is_missing())
    }
}

/// The canonical resolved graph: every known package instance keyed by
/// `name@version`, including the synthetic `.@.` root.
///
/// The expected closure invariant is that every pinned `(name, version)`
/// edge points at another key in the same list; [`PackageList::dangling_edges`]
/// reports violations without failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageList(BTreeMap<PackageRef, PackageInfo>);

impl PackageList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry under its own `name@version` reference.
    ///
    /// Returns the previous entry with the same reference, if any.
    pub fn insert(&mut self, info: PackageInfo) -> Option<PackageInfo> {
        self.0.insert(info.package_ref(), info)
    }

    /// Looks up an entry by reference.
    pub fn get(&self, r: &PackageRef) -> Option<&PackageInfo> {
        self.0.get(r)
    }

    /// Returns true if the reference has an entry.
    pub fn contains(&self, r: &PackageRef) -> bool {
        self.0.contains_key(r)
    }

    /// The synthetic root entry, when present.
    pub fn root(&self) -> Option<&PackageInfo> {
        self.0.get(&PackageRef::root())
    }

    /// Number of entries, root included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in reference order.
    pub fn iter(&self) -> impl Iterator<Item = (&PackageRef, &PackageInfo)> {
        self.0.iter()
    }

    /// Iterates references in order.
    pub fn refs(&self) -> impl Iterator<Item = &PackageRef> {
        self.0.keys()
    }

    /// Pinned edges whose target reference has no entry in this list.
    ///
    /// Each violation is reported as `(owner, target)`. Edges marked
    /// [`Resolution::Missing`] are not violations; they were already
    /// flagged at resolution time.
    pub fn dangling_edges(&self) -> Vec<(PackageRef, PackageRef)> {
        let mut dangling = Vec::new();
        for (owner, info) in &self.0 {
            for (dep_name, resolution) in &info.dependencies {
                if let Some(version) = resolution.version() {
                    let target = PackageRef::new(dep_name, version);
                    if !self.0.contains_key(&target) {
                        dangling.push((owner.clone(), target));
                    }
                }
            }
        }
        dangling
    }

    /// Returns true if every pinned edge points at an entry in this list.
    pub fn is_complete(&self) -> bool {
        self.dangling_edges().is_empty()
    }

    /// Reduces the list to just references and their resolved edges.
    ///
    /// Metadata (`resolved`, `integrity`) and the redundant name/version
    /// fields are dropped; the values are carried over unchanged, so
    /// projecting an already-projected list changes nothing further.
    pub fn simplify(&self) -> SimplePackageList {
        SimplePackageList(
            self.0
                .iter()
                .map(|(r, info)| (r.clone(), info.dependencies.clone()))
                .collect(),
        )
    }
}

impl FromIterator<PackageInfo> for PackageList {
    fn from_iter<I: IntoIterator<Item = PackageInfo>>(iter: I) -> Self {
        let mut list = Self::new();
        for info in iter {
            list.insert(info);
        }
        list
    }
}

impl<'a> IntoIterator for &'a PackageList {
    type Item = (&'a PackageRef, &'a PackageInfo);
    type IntoIter = std::collections::btree_map::Iter<'a, PackageRef, PackageInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A read-only projection of a [`PackageList`] containing only resolved
/// dependency edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimplePackageList(BTreeMap<PackageRef, ResolvedDependencies>);

impl SimplePackageList {
    /// Looks up the resolved edges of a reference.
    pub fn get(&self, r: &PackageRef) -> Option<&ResolvedDependencies> {
        self.0.get(r)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the projection has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in reference order.
    pub fn iter(&self) -> impl Iterator<Item = (&PackageRef, &ResolvedDependencies)> {
        self.0.iter()
    }

    /// Iterates references in order.
    pub fn refs(&self) -> impl Iterator<Item = &PackageRef> {
        self.0.keys()
    }
}
