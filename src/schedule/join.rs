use std::collections::{BTreeSet, HashMap};

use crate::schedule::{
    date::{DateShift, format_date, format_human, parse_date},
    record::{JoinedEntry, RawRecord},
};

/// Part types rendered by the built-in template.
pub const DEFAULT_ALLOWED_KINDS: [&str; 5] = ["BibleReading", "Apply1", "Apply2", "Apply3", "Apply4"];

const ASSISTANT_MARKER: &str = "assistant";

/// Whether a part type names the assistant role (case-insensitive).
pub fn is_assistant(part_type: &str) -> bool {
    assistant_marker_at(part_type).is_some()
}

/// Part type with the first assistant marker removed and surrounding whitespace trimmed.
pub fn base_kind(part_type: &str) -> String {
    match assistant_marker_at(part_type) {
        Some(at) => {
            let mut s = String::with_capacity(part_type.len());
            s.push_str(&part_type[..at]);
            s.push_str(&part_type[at + ASSISTANT_MARKER.len()..]);
            s.trim().to_string()
        }
        None => part_type.trim().to_string(),
    }
}

fn assistant_marker_at(part_type: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets aligned with the original string.
    part_type.to_ascii_lowercase().find(ASSISTANT_MARKER)
}

/// Merges main rows with their assistant rows and applies the date shift.
#[derive(Clone, Debug)]
pub struct RecordJoiner {
    allowed: BTreeSet<String>,
    shift: DateShift,
}

impl Default for RecordJoiner {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_KINDS, DateShift::default())
    }
}

impl RecordJoiner {
    pub fn new<I, S>(allowed: I, shift: DateShift) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            shift,
        }
    }

    /// Produce one entry per `(date, base kind)` slot that has a main row.
    ///
    /// Rows of unrecognized kinds are skipped. When several rows share a slot within the main
    /// or the assistant side, the last one wins. Entries keep the order in which their slot was
    /// first seen. A main row whose date does not parse still yields an entry, with empty date
    /// fields.
    #[tracing::instrument(skip_all, fields(rows = rows.len()))]
    pub fn join(&self, rows: &[RawRecord]) -> Vec<JoinedEntry> {
        let mut mains = SlotMap::default();
        let mut assistants = SlotMap::default();
        let mut skipped = 0usize;

        for row in rows {
            if !row.is_usable() {
                skipped += 1;
                continue;
            }
            let base = base_kind(&row.part_type);
            if !self.allowed.contains(&base) {
                skipped += 1;
                continue;
            }
            let key = format!("{}__{}", row.date, base);
            if is_assistant(&row.part_type) {
                assistants.insert(key, row);
            } else {
                mains.insert(key, row);
            }
        }

        let entries: Vec<JoinedEntry> = mains
            .iter()
            .map(|(key, main)| {
                let assistant = assistants
                    .get(key)
                    .map(|a| a.person.clone())
                    .unwrap_or_default();
                let shifted = parse_date(&main.date).and_then(|d| self.shift.shifted_date(d));
                let (date, date_display) = match shifted {
                    Some(d) => (format_date(d), format_human(d)),
                    None => {
                        tracing::debug!(date = %main.date, person = %main.person, "unparseable or out-of-range date");
                        (String::new(), String::new())
                    }
                };
                JoinedEntry {
                    date,
                    date_display,
                    person: main.person.clone(),
                    assistant,
                    assignment: main.assignment.clone(),
                    school: main.school_flag(),
                }
            })
            .collect();

        tracing::debug!(
            entries = entries.len(),
            skipped,
            assistants = assistants.len(),
            "joined schedule rows"
        );
        entries
    }
}

/// Last-write-wins map that remembers first insertion order.
#[derive(Default)]
struct SlotMap<'a> {
    order: Vec<String>,
    rows: HashMap<String, &'a RawRecord>,
}

impl<'a> SlotMap<'a> {
    fn insert(&mut self, key: String, row: &'a RawRecord) {
        if self.rows.insert(key.clone(), row).is_none() {
            self.order.push(key);
        }
    }

    fn get(&self, key: &str) -> Option<&'a RawRecord> {
        self.rows.get(key).copied()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &'a RawRecord)> + '_ {
        self.order
            .iter()
            .filter_map(|k| self.rows.get(k).map(|row| (k.as_str(), *row)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/join.rs"]
mod tests;
