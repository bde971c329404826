//! Plain-text export implementation.
//!
//! Prints the resolved packages one per line, sorted. By default versions
//! are stripped and duplicate names collapse; with versions enabled every
//! distinct `name@version` instance is listed. The synthetic root entry
//! is never part of the listing.

use super::Exporter;
use crate::graph::PackageList;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Plain-text exporter implementation.
pub struct TextExporter {
    /// Keep `name@version` keys instead of collapsing to bare names.
    pub with_versions: bool,
}

impl Exporter for TextExporter {
    fn export<W: Write>(&self, packages: &PackageList, writer: &mut W) -> io::Result<()> {
        let lines: BTreeSet<String> = packages
            .refs()
            .filter(|r| !r.is_root())
            .map(|r| {
                if self.with_versions {
                    r.to_string()
                } else {
                    r.name.clone()
                }
            })
            .collect();

        for line in lines {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}
