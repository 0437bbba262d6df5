//! Upcoming events: ordering, filtering, and month grouping.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use vanguard_feeds::EventRecord;

/// Sort ascending by start date. Events without a parseable date go last;
/// ties keep their input order.
pub fn sort_by_start_date(events: &mut [EventRecord]) {
    events.sort_by_key(|e| match e.starts_at() {
        Some(dt) => (false, Some(dt)),
        None => (true, None),
    });
}

/// Event title with embedded line breaks folded to spaces.
pub fn display_title(event: &EventRecord) -> String {
    event.event_title.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Case-insensitive substring over title and session leader.
    pub search: Option<String>,
    /// Case-insensitive substring of `audience_network`.
    pub audience: Option<String>,
    /// Exact location.
    pub location: Option<String>,
    /// Only events starting on this calendar day.
    pub date: Option<NaiveDate>,
}

fn is_set(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl EventFilter {
    pub fn matches(&self, event: &EventRecord) -> bool {
        if let Some(term) = is_set(&self.search) {
            let term = term.to_lowercase();
            let in_title = event.event_title.to_lowercase().contains(&term);
            let in_leader = event
                .session_leader_name
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(&term));
            if !in_title && !in_leader {
                return false;
            }
        }

        if let Some(audience) = is_set(&self.audience) {
            let audience = audience.to_lowercase();
            if !event
                .audience_network
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(&audience))
            {
                return false;
            }
        }

        if let Some(location) = is_set(&self.location) {
            if event.location.as_deref() != Some(location) {
                return false;
            }
        }

        if let Some(day) = self.date {
            if event.starts_at().map(|dt| dt.date()) != Some(day) {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, events: &'a [EventRecord]) -> Vec<&'a EventRecord> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Distinct audiences, splitting comma-separated lists, sorted.
pub fn audiences(events: &[EventRecord]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| e.audience_network.as_deref())
        .flat_map(|a| a.split(','))
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct locations, sorted.
pub fn locations(events: &[EventRecord]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| e.location.as_deref())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Events sharing a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup<'a> {
    /// `YYYY-MM`.
    pub key: String,
    /// `November 2024`.
    pub label: String,
    pub events: Vec<&'a EventRecord>,
}

/// Group dated events by month in chronological order. Undated events are
/// left out; within a month the input order is kept.
pub fn group_by_month<'a, I>(events: I) -> Vec<MonthGroup<'a>>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut months: BTreeMap<(i32, u32), MonthGroup<'a>> = BTreeMap::new();

    for event in events {
        let Some(start) = event.starts_at() else {
            continue;
        };
        months
            .entry((start.year(), start.month()))
            .or_insert_with(|| MonthGroup {
                key: start.format("%Y-%m").to_string(),
                label: start.format("%B %Y").to_string(),
                events: Vec::new(),
            })
            .events
            .push(event);
    }

    months.into_values().collect()
}
