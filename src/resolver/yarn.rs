//! Resolver for yarn's flat yarn.lock format.
//!
//! The lockfile has no nesting: it is keyed by descriptor strings
//! (`name@range`), and a given descriptor always pins exactly one version
//! globally. Resolving a declared range is therefore a single exact
//! lookup of the descriptor rebuilt from the dependency's name and range;
//! no ancestor walk exists in this format.

use std::path::Path;
use tracing::debug;

use super::ResolveError;
use crate::graph::{
    DependencyList, MalformedRef, PackageInfo, PackageList, PackageRef, Resolution,
    ResolvedDependencies, ROOT_NAME,
};
use crate::parser::package_json::{self, PACKAGE_JSON};
use crate::parser::types::PackageJson;
use crate::parser::yarn_lock::{self, YARN_LOCK};
use crate::parser::YarnLockfile;

/// Loads and resolves the yarn lockfile of a project directory.
///
/// Returns `Ok(None)` when the directory has no yarn.lock; the manifest
/// is read next to it and any parse failure is fatal.
pub fn load(dir: &Path) -> Result<Option<PackageList>, ResolveError> {
    let lock_path = dir.join(YARN_LOCK);
    if !lock_path.exists() {
        return Ok(None);
    }

    debug!(path = %lock_path.display(), "resolving yarn lockfile");
    let manifest = package_json::parse_file(&dir.join(PACKAGE_JSON))?;
    let lock = yarn_lock::parse_file(&lock_path)?;
    Ok(Some(resolve(&manifest, &lock)?))
}

/// Resolves a parsed yarn lockfile into the canonical package list.
///
/// Several descriptors may pin the same `(name, version)` pair; they
/// collapse onto one entry, and when their dependency sets differ the
/// last descriptor encountered (lexicographic key order) wins. The
/// manifest's declared ranges are resolved the same way and injected as
/// the synthetic `.@.` root. A descriptor key without a usable `@`
/// separator aborts the resolution.
pub fn resolve(manifest: &PackageJson, lock: &YarnLockfile) -> Result<PackageList, MalformedRef> {
    let mut packages = PackageList::new();

    for (descriptor, entry) in lock {
        let parsed: PackageRef = descriptor.parse()?;

        let mut info = PackageInfo::new(&parsed.name, &entry.version);
        info.resolved = entry.resolved.clone();
        info.integrity = entry.integrity.clone();
        info.dependencies = resolve_ranges(&entry.declared_dependencies(), lock);
        packages.insert(info);
    }

    let mut root = PackageInfo::new(ROOT_NAME, ROOT_NAME);
    root.dependencies = resolve_ranges(&manifest.combined_dependencies(), lock);
    packages.insert(root);

    debug!(packages = packages.len(), "resolved yarn lockfile");
    Ok(packages)
}

/// Pins every declared range by exact descriptor lookup.
fn resolve_ranges(ranges: &DependencyList, lock: &YarnLockfile) -> ResolvedDependencies {
    ranges
        .iter()
        .map(|(name, range)| {
            let descriptor = format!("{}@{}", name, range);
            let resolution = match lock.get(&descriptor) {
                Some(entry) => Resolution::Pinned(entry.version.clone()),
                None => {
                    debug!(descriptor = %descriptor, "no lockfile entry for descriptor");
                    Resolution::Missing
                }
            };
            (name.clone(), resolution)
        })
        .collect()
}
