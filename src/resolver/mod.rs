//! Lockfile resolvers and the format dispatcher.
//!
//! Each resolver turns one lockfile format into the canonical
//! [`PackageList`](crate::graph::PackageList): [`npm`] walks the nested
//! package-lock.json tree with ancestor-chain shadowing, [`yarn`] resolves
//! the flat yarn.lock by exact descriptor lookup. [`resolve_dir`] picks
//! whichever format a project directory provides, npm first.

pub mod npm;
pub mod yarn;

use std::path::Path;
use tracing::debug;

use crate::graph::{MalformedRef, PackageList};
use crate::parser::{ParseError, YarnLockError};

/// Errors that can abort a resolution.
///
/// A missing lockfile is not an error; the loaders report absence as
/// `Ok(None)` and the dispatcher as `Ok(None)` overall.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The manifest or npm lockfile could not be read or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The yarn lockfile could not be read or parsed.
    #[error(transparent)]
    YarnLock(#[from] YarnLockError),

    /// A descriptor key could not be split into name and range.
    #[error(transparent)]
    MalformedRef(#[from] MalformedRef),
}

/// Resolves whichever supported lockfile the project directory has.
///
/// Tries package-lock.json first, then yarn.lock; when both are present
/// the npm result wins. Returns `Ok(None)` when neither file exists.
pub fn resolve_dir(dir: &Path) -> Result<Option<PackageList>, ResolveError> {
    if let Some(packages) = npm::load(dir)? {
        return Ok(Some(packages));
    }
    if let Some(packages) = yarn::load(dir)? {
        return Ok(Some(packages));
    }
    debug!(dir = %dir.display(), "no supported lockfile found");
    Ok(None)
}
