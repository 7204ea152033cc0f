use std::{fs::File, io::Read, path::Path};

use anyhow::Context;
use chrono::NaiveDate;

use crate::{foundation::error::SlipResult, schedule::date::parse_date};

/// One row of the schedule table.
///
/// Missing columns read as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Person")]
    pub person: String,
    #[serde(rename = "PartType")]
    pub part_type: String,
    #[serde(rename = "Assignment")]
    pub assignment: String,
    #[serde(rename = "School")]
    pub school: String,
}

impl RawRecord {
    /// The school column is a string flag; only `"1"` means set.
    pub fn school_flag(&self) -> bool {
        self.school.trim() == "1"
    }

    pub(crate) fn is_usable(&self) -> bool {
        !self.date.is_empty() && !self.person.is_empty()
    }
}

/// A main assignment merged with its optional assistant.
///
/// `date` is the canonical shifted date or empty when the recorded date did not parse.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct JoinedEntry {
    pub date: String,
    pub date_display: String,
    pub person: String,
    pub assistant: String,
    pub assignment: String,
    pub school: bool,
}

impl JoinedEntry {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Read schedule rows from CSV with a header line.
///
/// Values are trimmed, blank lines skipped, and rows without a date or a person dropped.
pub fn read_records<R: Read>(reader: R) -> SlipResult<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    let mut dropped = 0usize;
    for (idx, row) in rdr.deserialize::<RawRecord>().enumerate() {
        let row = row.with_context(|| format!("parse csv row {}", idx + 1))?;
        if row.is_usable() {
            out.push(row);
        } else {
            dropped += 1;
        }
    }

    tracing::debug!(kept = out.len(), dropped, "read schedule rows");
    Ok(out)
}

pub fn read_records_path(path: &Path) -> SlipResult<Vec<RawRecord>> {
    let f = File::open(path).with_context(|| format!("open csv '{}'", path.display()))?;
    read_records(f)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/record.rs"]
mod tests;
