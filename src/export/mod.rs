//! Output formatting for resolved package lists.
//!
//! This module provides exporters for the two output surfaces the CLI
//! offers: machine-readable JSON (full or simplified) and the sorted
//! plain-text package listing.

pub mod json;
pub mod text;

use crate::graph::PackageList;
use std::io::{self, Write};

/// Trait for exporters.
pub trait Exporter {
    /// Export the resolved list to the given writer.
    fn export<W: Write>(&self, packages: &PackageList, writer: &mut W) -> io::Result<()>;
}

/// Export a resolved list to a string.
pub fn export_to_string<E: Exporter>(exporter: &E, packages: &PackageList) -> io::Result<String> {
    let mut buffer = Vec::new();
    exporter.export(packages, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
