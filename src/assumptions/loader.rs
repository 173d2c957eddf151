//! CSV loader for CARE revaluation histories
//!
//! Expected columns: `year,revaluation_pct`. The percentage may be left blank
//! for a year with no published revaluation.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::Result;
use crate::pension::RevaluationHistory;

#[derive(Debug, Deserialize)]
struct RevaluationRow {
    year: i32,
    revaluation_pct: Option<f64>,
}

/// Load a revaluation history from a CSV file
pub fn load_revaluation_history<P: AsRef<Path>>(path: P) -> Result<RevaluationHistory> {
    let file = File::open(path.as_ref())?;
    let history = load_revaluation_history_from_reader(file)?;
    debug!(
        "Loaded {} revaluation years from {}",
        history.len(),
        path.as_ref().display()
    );
    Ok(history)
}

/// Load a revaluation history from any reader
pub fn load_revaluation_history_from_reader<R: Read>(reader: R) -> Result<RevaluationHistory> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut history = RevaluationHistory::new();

    for result in csv_reader.deserialize() {
        let row: RevaluationRow = result?;
        history.insert(row.year, row.revaluation_pct);
    }

    Ok(history)
}
