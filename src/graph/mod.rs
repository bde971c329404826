//! Graph model for resolved lockfile content.
//!
//! This module defines the canonical [`PackageList`] produced by both
//! lockfile resolvers, the [`SimplePackageList`] projection, and a
//! petgraph-backed [`DependencyGraph`] view for inspection.
//!
//! # Example
//!
//! ```rust
//! use lockgraph::graph::{PackageInfo, PackageList, PackageRef, Resolution};
//!
//! let mut root = PackageInfo::new(".", ".");
//! root.dependencies.insert("left-pad".into(), Resolution::Pinned("1.3.0".into()));
//!
//! let list: PackageList = vec![root, PackageInfo::new("left-pad", "1.3.0")]
//!     .into_iter()
//!     .collect();
//!
//! assert!(list.is_complete());
//! assert!(list.simplify().get(&PackageRef::root()).is_some());
//! ```

mod dependency_graph;
mod package_list;

pub use dependency_graph::{CycleInfo, DependencyGraph};
pub use package_list::{
    DependencyList, MalformedRef, PackageInfo, PackageList, PackageRef, Resolution,
    ResolvedDependencies, SimplePackageList, ROOT_NAME,
};
