//! Parsers for the raw project files the resolvers consume.
//!
//! Three input formats are handled:
//!
//! - **package.json** - the project manifest (serde)
//! - **package-lock.json** - npm's nested lockfile tree (serde)
//! - **yarn.lock** - yarn's flat v1 text format (hand-written line parser)
//!
//! Parsing only produces typed structures mirroring each file; turning
//! them into a resolved graph is the [`crate::resolver`] module's job.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use lockgraph::parser::{package_json, package_lock};
//!
//! let manifest = package_json::parse_file(Path::new("package.json")).unwrap();
//! let lock = package_lock::parse_file(Path::new("package-lock.json")).unwrap();
//! println!("{} top-level entries", lock.dependencies.len());
//! ```

pub mod package_json;
pub mod package_lock;
pub mod types;
pub mod yarn_lock;

// Re-export commonly used types for convenience
pub use package_json::{validate, ParseError, ParseResult, PACKAGE_JSON};
pub use package_lock::{NpmLockEntry, NpmLockfile, PACKAGE_LOCK};
pub use types::PackageJson;
pub use yarn_lock::{YarnLockEntry, YarnLockError, YarnLockfile, YARN_LOCK};
