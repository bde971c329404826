//! JSON export implementation.
//!
//! Emits the resolved graph as pretty-printed JSON, either in full or
//! reduced to the simplified projection. Missing resolutions appear as
//! `null` values so inspection tools can see them.

use super::Exporter;
use crate::graph::PackageList;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter {
    /// Emit the simplified projection instead of the full graph.
    pub simplified: bool,
}

impl JsonExporter {
    /// Exporter for the full resolved graph.
    pub fn full() -> Self {
        Self { simplified: false }
    }

    /// Exporter for the simplified projection.
    pub fn simplified() -> Self {
        Self { simplified: true }
    }
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, packages: &PackageList, writer: &mut W) -> io::Result<()> {
        let json = if self.simplified {
            serde_json::to_string_pretty(&packages.simplify())
        } else {
            serde_json::to_string_pretty(packages)
        }
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
