#![allow(dead_code)]

//! Triage derivation — dashboard counts, filtering, and deadline ordering.
//!
//! Everything here is derived from (student, letter, brag-sheet completion)
//! tuples; there is no independent state machine. "Now" is always passed in
//! so the derivations are deterministic under test.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::letter::LetterStatus;

/// A letter is urgent when its deadline is at most this many days out.
const URGENT_WINDOW_DAYS: i64 = 7;

/// One row of the triage list: a student with their single letter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageEntry {
    pub student_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub completion_percent: u8,
    pub status: LetterStatus,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageFilter {
    Urgent,
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct TriageCounts {
    pub urgent: usize,
    pub pending: usize,
    pub completed: usize,
}

/// Whole days until the deadline, rounded up. Negative when overdue.
fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = (deadline - now).num_seconds();
    (secs as f64 / 86_400.0).ceil() as i64
}

/// Urgent = deadline within the 7-day window (inclusive, overdue counts)
/// and the letter is not already completed.
pub fn is_urgent(entry: &TriageEntry, now: DateTime<Utc>) -> bool {
    match entry.deadline {
        Some(deadline) => {
            entry.status != LetterStatus::Completed
                && days_until(deadline, now) <= URGENT_WINDOW_DAYS
        }
        None => false,
    }
}

pub fn matches_filter(entry: &TriageEntry, filter: TriageFilter, now: DateTime<Utc>) -> bool {
    match filter {
        TriageFilter::Urgent => is_urgent(entry, now),
        TriageFilter::Pending => entry.status == LetterStatus::Blocked,
        TriageFilter::Completed => entry.status == LetterStatus::Completed,
    }
}

pub fn summarize(entries: &[TriageEntry], now: DateTime<Utc>) -> TriageCounts {
    TriageCounts {
        urgent: entries.iter().filter(|e| is_urgent(e, now)).count(),
        pending: entries
            .iter()
            .filter(|e| e.status == LetterStatus::Blocked)
            .count(),
        completed: entries
            .iter()
            .filter(|e| e.status == LetterStatus::Completed)
            .count(),
    }
}

/// Click-to-toggle filter selection: re-selecting the active category
/// clears it.
pub fn toggle_filter(current: Option<TriageFilter>, clicked: TriageFilter) -> Option<TriageFilter> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

/// Applies the optional filter and sorts ascending by deadline, letters
/// without a deadline last. The sort is stable, so ties keep input order.
pub fn filter_and_sort(
    entries: Vec<TriageEntry>,
    filter: Option<TriageFilter>,
    now: DateTime<Utc>,
) -> Vec<TriageEntry> {
    let mut list: Vec<TriageEntry> = entries
        .into_iter()
        .filter(|e| filter.map_or(true, |f| matches_filter(e, f, now)))
        .collect();
    list.sort_by_key(|e| match e.deadline {
        Some(d) => (0u8, d),
        None => (1u8, DateTime::<Utc>::MAX_UTC),
    });
    list
}

/// Human-readable deadline label with its urgency flag, as shown on each
/// triage card.
pub fn deadline_label(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> (String, bool) {
    let Some(deadline) = deadline else {
        return ("No deadline".to_string(), false);
    };
    let days = days_until(deadline, now);
    if days < 0 {
        (format!("{}d overdue", -days), true)
    } else if days == 0 {
        ("Due today".to_string(), true)
    } else if days == 1 {
        ("Tomorrow".to_string(), true)
    } else if days <= URGENT_WINDOW_DAYS {
        (format!("{days}d left"), true)
    } else {
        (deadline.format("%b %-d").to_string(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap()
    }

    fn entry(name: &str, status: LetterStatus, deadline_days: Option<i64>) -> TriageEntry {
        TriageEntry {
            student_id: Uuid::new_v4(),
            first_name: name.to_string(),
            last_name: "Demo".to_string(),
            completion_percent: 100,
            status,
            deadline: deadline_days.map(|d| now() + Duration::days(d)),
        }
    }

    #[test]
    fn test_urgent_within_window_excludes_completed() {
        let n = now();
        assert!(is_urgent(&entry("a", LetterStatus::Draft, Some(7)), n));
        assert!(is_urgent(&entry("b", LetterStatus::Blocked, Some(-2)), n));
        assert!(!is_urgent(&entry("c", LetterStatus::Completed, Some(2)), n));
        assert!(!is_urgent(&entry("d", LetterStatus::Draft, Some(8)), n));
        assert!(!is_urgent(&entry("e", LetterStatus::Draft, None), n));
    }

    #[test]
    fn test_summarize_counts() {
        let entries = vec![
            entry("a", LetterStatus::Draft, Some(3)),
            entry("b", LetterStatus::Blocked, Some(5)),
            entry("c", LetterStatus::Blocked, Some(30)),
            entry("d", LetterStatus::Completed, None),
        ];
        let counts = summarize(&entries, now());
        assert_eq!(
            counts,
            TriageCounts {
                urgent: 2,
                pending: 2,
                completed: 1
            }
        );
    }

    #[test]
    fn test_toggle_filter_clears_on_reselect() {
        assert_eq!(toggle_filter(None, TriageFilter::Urgent), Some(TriageFilter::Urgent));
        assert_eq!(toggle_filter(Some(TriageFilter::Urgent), TriageFilter::Urgent), None);
        assert_eq!(
            toggle_filter(Some(TriageFilter::Urgent), TriageFilter::Pending),
            Some(TriageFilter::Pending)
        );
    }

    #[test]
    fn test_sort_by_deadline_with_missing_deadlines_last() {
        let entries = vec![
            entry("five", LetterStatus::Draft, Some(5)),
            entry("two", LetterStatus::Draft, Some(2)),
            entry("none", LetterStatus::Draft, None),
        ];
        let sorted = filter_and_sort(entries, None, now());
        let names: Vec<_> = sorted.iter().map(|e| e.first_name.as_str()).collect();
        assert_eq!(names, vec!["two", "five", "none"]);
    }

    #[test]
    fn test_sort_is_stable_on_equal_deadlines() {
        let entries = vec![
            entry("first", LetterStatus::Draft, Some(3)),
            entry("second", LetterStatus::Draft, Some(3)),
        ];
        let sorted = filter_and_sort(entries, None, now());
        assert_eq!(sorted[0].first_name, "first");
        assert_eq!(sorted[1].first_name, "second");
    }

    #[test]
    fn test_filter_pending_keeps_only_blocked() {
        let entries = vec![
            entry("a", LetterStatus::Draft, Some(3)),
            entry("b", LetterStatus::Blocked, Some(5)),
        ];
        let filtered = filter_and_sort(entries, Some(TriageFilter::Pending), now());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].first_name, "b");
    }

    #[test]
    fn test_deadline_labels() {
        let n = now();
        assert_eq!(deadline_label(None, n), ("No deadline".to_string(), false));
        assert_eq!(
            deadline_label(Some(n - Duration::days(3)), n),
            ("3d overdue".to_string(), true)
        );
        assert_eq!(deadline_label(Some(n), n), ("Due today".to_string(), true));
        assert_eq!(
            deadline_label(Some(n + Duration::days(1)), n),
            ("Tomorrow".to_string(), true)
        );
        assert_eq!(
            deadline_label(Some(n + Duration::days(5)), n),
            ("5d left".to_string(), true)
        );
        let (label, urgent) = deadline_label(Some(n + Duration::days(30)), n);
        assert!(!urgent);
        assert!(!label.is_empty());
    }
}
