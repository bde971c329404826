//! Resolver for npm's nested package-lock.json format.
//!
//! The lockfile is a tree: each entry may carry privately nested entries
//! that shadow whatever a hoisted ancestor would otherwise provide. An
//! entry's declared ranges (`requires`) are therefore resolved by walking
//! the chain of ancestor nodes nearest-first and taking the first nested
//! `dependencies` map that knows the name.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

use super::ResolveError;
use crate::graph::{
    DependencyList, PackageInfo, PackageList, PackageRef, Resolution, ResolvedDependencies,
    ROOT_NAME,
};
use crate::parser::package_json::{self, PACKAGE_JSON};
use crate::parser::package_lock::{self, NpmLockEntry, PACKAGE_LOCK};
use crate::parser::types::PackageJson;
use crate::parser::NpmLockfile;

/// The nested maps of every ancestor from the lockfile root down to the
/// node currently being resolved, nearest ancestor last.
type AncestorPath<'a> = Vec<&'a BTreeMap<String, NpmLockEntry>>;

/// Loads and resolves the npm lockfile of a project directory.
///
/// Returns `Ok(None)` when the directory has no package-lock.json; the
/// manifest is read next to it and any parse failure is fatal.
pub fn load(dir: &Path) -> Result<Option<PackageList>, ResolveError> {
    let lock_path = dir.join(PACKAGE_LOCK);
    if !lock_path.exists() {
        return Ok(None);
    }

    debug!(path = %lock_path.display(), "resolving npm lockfile");
    let manifest = package_json::parse_file(&dir.join(PACKAGE_JSON))?;
    let lock = package_lock::parse_file(&lock_path)?;
    Ok(Some(resolve(&manifest, &lock)))
}

/// Flattens a parsed lockfile tree into the canonical package list.
///
/// The manifest supplies the root's declared ranges; the lockfile's own
/// top-level `requires: true` marker carries no information. The root
/// entry is keyed `.@.` so root-level edges look like any other edge.
pub fn resolve(manifest: &PackageJson, lock: &NpmLockfile) -> PackageList {
    let mut packages = PackageList::new();
    let mut visited = BTreeSet::new();
    let mut path: AncestorPath = vec![&lock.dependencies];

    let mut root = PackageInfo::new(ROOT_NAME, ROOT_NAME);
    root.dependencies = resolve_requires(&manifest.combined_dependencies(), &path);
    packages.insert(root);

    for (name, entry) in &lock.dependencies {
        visit(name, entry, &mut path, &mut packages, &mut visited);
    }

    debug!(packages = packages.len(), "flattened npm lockfile");
    packages
}

/// Expands one lockfile node and its nested children.
///
/// A `(name, version)` pair is only expanded once; re-encounters of the
/// same pair elsewhere in the tree are skipped, which keeps diamond
/// shapes linear. The first expansion wins.
fn visit<'a>(
    name: &str,
    entry: &'a NpmLockEntry,
    path: &mut AncestorPath<'a>,
    packages: &mut PackageList,
    visited: &mut BTreeSet<PackageRef>,
) {
    let r = PackageRef::new(name, &entry.version);
    if !visited.insert(r) {
        return;
    }

    // the node's own nested map shadows every ancestor
    path.push(&entry.dependencies);

    let mut info = PackageInfo::new(name, &entry.version);
    info.resolved = entry.resolved.clone();
    info.integrity = entry.integrity.clone();
    info.dependencies = resolve_requires(&entry.requires, path);
    packages.insert(info);

    for (child_name, child) in &entry.dependencies {
        visit(child_name, child, path, packages, visited);
    }

    path.pop();
}

/// Pins every declared range by scanning the ancestor chain nearest-first.
fn resolve_requires(requires: &DependencyList, path: &AncestorPath) -> ResolvedDependencies {
    requires
        .iter()
        .map(|(name, range)| {
            let resolution = match find_in_path(name, path) {
                Some(version) => Resolution::Pinned(version.to_string()),
                None => {
                    debug!(name = %name, range = %range, "no entry in scope for declared range");
                    Resolution::Missing
                }
            };
            (name.clone(), resolution)
        })
        .collect()
}

/// First nested map on the ancestor chain (nearest-first) that provides
/// the named package.
fn find_in_path<'a>(name: &str, path: &AncestorPath<'a>) -> Option<&'a str> {
    path.iter()
        .rev()
        .find_map(|deps| deps.get(name).map(|entry| entry.version.as_str()))
}
