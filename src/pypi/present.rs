//! Result bounding, installed annotation and rendering

use super::installed::PackageInventory;
use crate::{DisplayRecord, Result, ResultSet, SearchError};
use nu_ansi_term::Color;
use std::num::NonZeroUsize;

/// Marker printed after the version of an installed package
pub const INSTALLED_MARKER: &str = "[installed]";

/// Turns scraped results into display records
pub struct Presenter<'a> {
    inventory: &'a dyn PackageInventory,
}

impl<'a> Presenter<'a> {
    pub fn new(inventory: &'a dyn PackageInventory) -> Self {
        Self { inventory }
    }

    /// Build at most `max_results` records, in document order
    ///
    /// The inventory is only consulted when there is something to show.
    pub fn present(
        &self,
        results: &ResultSet,
        max_results: NonZeroUsize,
    ) -> Result<Vec<DisplayRecord>> {
        let n = results.len().min(max_results.get());
        if n == 0 {
            return Err(SearchError::EmptyResult);
        }

        check_len("names", &results.names, n)?;
        check_len("descriptions", &results.descriptions, n)?;

        let installed = self.inventory.installed_names();

        let records = results
            .names
            .iter()
            .zip(&results.versions)
            .zip(&results.descriptions)
            .take(n)
            .map(|((name, version), description)| DisplayRecord {
                name: name.clone(),
                version: version.clone(),
                installed: installed.contains(&name.to_lowercase()),
                description: description.clone(),
            })
            .collect();
        Ok(records)
    }
}

fn check_len(field: &'static str, values: &[String], expected: usize) -> Result<()> {
    if values.len() < expected {
        tracing::debug!(field, expected, found = values.len(), "search page fields out of step");
        return Err(SearchError::Integrity {
            field,
            expected,
            found: values.len(),
        });
    }
    Ok(())
}

/// Format one record: a blank line, then name, version and marker, then the
/// description on its own line
pub fn describe(record: &DisplayRecord, color: bool) -> String {
    let name = if color {
        Color::Green.bold().paint(record.name.as_str()).to_string()
    } else {
        record.name.clone()
    };
    let marker = if record.installed { INSTALLED_MARKER } else { "" };
    format!(
        "\n{} {} {}\n{}\n",
        name, record.version, marker, record.description
    )
}

/// Format the whole listing
pub fn render(records: &[DisplayRecord], color: bool) -> String {
    records.iter().map(|record| describe(record, color)).collect()
}
