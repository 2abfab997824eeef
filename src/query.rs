//! Search query construction from the current filter state.

use crate::models::{FilterState, TimeRange};
use chrono::{Duration, Months, NaiveDate, Utc};

/// Used when neither a search term nor a cutoff narrows the search, so the
/// API still gets a non-empty, bounded query.
pub const POPULARITY_FLOOR: &str = "stars:>1";

/// Earliest creation date considered for `time`, relative to `today`.
///
/// Month and year steps are calendar based and clamp to the last valid day
/// (March 31 minus one month is February 28 or 29).
pub fn cutoff_date(time: TimeRange, today: NaiveDate) -> Option<NaiveDate> {
    match time {
        TimeRange::All => None,
        TimeRange::Week => today.checked_sub_signed(Duration::days(7)),
        TimeRange::Month => today.checked_sub_months(Months::new(1)),
        TimeRange::Year => today.checked_sub_months(Months::new(12)),
    }
}

/// Builds the `q` parameter for the repository search endpoint.
///
/// The result is not URL-encoded.
pub fn build_query(filters: &FilterState, today: NaiveDate) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);

    let term = filters.search_term.trim();
    if !term.is_empty() {
        parts.push(term.to_string());
    }

    match cutoff_date(filters.time, today) {
        Some(cutoff) => parts.push(format!("created:>{}", cutoff.format("%Y-%m-%d"))),
        None if term.is_empty() => parts.push(POPULARITY_FLOOR.to_string()),
        None => {}
    }

    let language = filters.language.trim();
    if !language.is_empty() {
        parts.push(format!("language:{}", language));
    }

    parts.join(" ")
}

/// [`build_query`] against the current UTC date.
pub fn build_query_now(filters: &FilterState) -> String {
    build_query(filters, Utc::now().date_naive())
}
