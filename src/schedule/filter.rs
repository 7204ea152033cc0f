use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::schedule::{collate, record::JoinedEntry};

/// Inclusive date range; a missing bound is unrestricted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// `from` compares at the start of its day and `to` at the very end of its day.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let at = date.and_time(NaiveTime::MIN);
        let ok_from = self.from.is_none_or(|from| at >= from.and_time(NaiveTime::MIN));
        let ok_to = self.to.is_none_or(|to| at <= end_of_day(to));
        ok_from && ok_to
    }

    /// Entries with a parseable date inside the range, ordered by date then person.
    #[tracing::instrument(skip(entries), fields(entries = entries.len()))]
    pub fn apply(&self, entries: &[JoinedEntry]) -> Vec<JoinedEntry> {
        let mut kept: Vec<(NaiveDate, &JoinedEntry)> = entries
            .iter()
            .filter_map(|e| e.parsed_date().map(|d| (d, e)))
            .filter(|(d, _)| self.contains(*d))
            .collect();

        kept.sort_by(|(da, a), (db, b)| {
            da.cmp(db)
                .then_with(|| collate::compare(&a.person, &b.person))
        });

        tracing::debug!(kept = kept.len(), "filtered entries");
        kept.into_iter().map(|(_, e)| e.clone()).collect()
    }
}

/// Earliest and latest parseable entry dates.
pub fn date_bounds(entries: &[JoinedEntry]) -> Option<DateRange> {
    let mut dates = entries.iter().filter_map(JoinedEntry::parsed_date);
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateRange::new(Some(min), Some(max)))
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last_ms = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last_ms)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/filter.rs"]
mod tests;
