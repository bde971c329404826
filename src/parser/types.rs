//! Shared types for manifest parsing.
//!
//! This module defines the structure of the project manifest
//! (package.json) that both lockfile resolvers consume.

use serde::{Deserialize, Serialize};

use crate::graph::DependencyList;

/// Represents the structure of a package.json file.
///
/// This struct mirrors the npm package.json specification, capturing the
/// fields needed for lockfile resolution. Unknown fields are ignored.
///
/// # Example
///
/// ```rust
/// use lockgraph::parser::PackageJson;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg: PackageJson = serde_json::from_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageJson {
    /// The name of the package.
    pub name: Option<String>,

    /// The version of the package (semver format).
    pub version: Option<String>,

    /// A brief description of the package.
    pub description: Option<String>,

    /// Production dependencies required at runtime.
    #[serde(default)]
    pub dependencies: DependencyList,

    /// Development-only dependencies (testing, building, etc.).
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: DependencyList,

    /// Peer dependencies that the host package must provide.
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: DependencyList,

    /// Optional dependencies that enhance functionality if available.
    #[serde(default, rename = "optionalDependencies")]
    pub optional_dependencies: DependencyList,
}

impl PackageJson {
    /// Returns true if the package has any dependencies defined.
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
            || !self.dev_dependencies.is_empty()
            || !self.peer_dependencies.is_empty()
            || !self.optional_dependencies.is_empty()
    }

    /// Returns the total count of all dependencies.
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
            + self.dev_dependencies.len()
            + self.peer_dependencies.len()
            + self.optional_dependencies.len()
    }

    /// The declared ranges that end up in a lockfile: direct, dev and
    /// optional dependencies merged into one map.
    ///
    /// Peer declarations are excluded. npm v6 and yarn v1 do not install
    /// peers, so they never have a lockfile entry to resolve against. If
    /// the same name appears in several sections, the last section wins
    /// (direct, then dev, then optional).
    pub fn combined_dependencies(&self) -> DependencyList {
        let mut combined = self.dependencies.clone();
        combined.extend(
            self.dev_dependencies
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        combined.extend(
            self.optional_dependencies
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        combined
    }
}
