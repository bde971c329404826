//! Lockgraph - normalize npm and yarn lockfiles into one resolved dependency graph
//!
//! This crate reads a project's package-lock.json or yarn.lock, resolves
//! every dependency edge to an exact version using the format's own lookup
//! semantics, and exposes the result as one canonical graph for
//! inspection, diffing, or reporting.

pub mod export;
pub mod graph;
pub mod parser;
pub mod resolver;
