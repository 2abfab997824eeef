use chrono::{Duration, NaiveDate, Utc};
use github_repo_explorer::models::{FilterState, TimeRange};
use github_repo_explorer::query::{build_query, build_query_now, cutoff_date, POPULARITY_FLOOR};

fn filters(time: TimeRange, language: &str, search_term: &str) -> FilterState {
    FilterState {
        time,
        language: language.to_string(),
        search_term: search_term.to_string(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_week_with_language() {
    let today = date(2024, 6, 15);
    let query = build_query(&filters(TimeRange::Week, "go", ""), today);
    assert_eq!(query, "created:>2024-06-08 language:go");
}

#[test]
fn test_week_cutoff_against_now() {
    let before = Utc::now().date_naive();
    let query = build_query_now(&filters(TimeRange::Week, "go", ""));
    let after = Utc::now().date_naive();

    // The UTC date may roll over between the reads; either day is correct.
    let expected = |today: NaiveDate| {
        format!("created:>{} language:go", (today - Duration::days(7)).format("%Y-%m-%d"))
    };
    assert!(
        query == expected(before) || query == expected(after),
        "unexpected query: {}",
        query
    );
}

#[test]
fn test_defaults_use_popularity_floor() {
    let query = build_query(&FilterState::default(), date(2024, 6, 15));
    assert_eq!(query, "stars:>1");
    assert_eq!(query, POPULARITY_FLOOR);
}

#[test]
fn test_search_term_suppresses_popularity_floor() {
    let query = build_query(&filters(TimeRange::All, "", "foo"), date(2024, 6, 15));
    assert_eq!(query, "foo");
}

#[test]
fn test_all_parts_in_order() {
    let query = build_query(&filters(TimeRange::Year, "rust", "async runtime"), date(2024, 6, 15));
    assert_eq!(query, "async runtime created:>2023-06-15 language:rust");
}

#[test]
fn test_language_without_cutoff_keeps_floor() {
    let query = build_query(&filters(TimeRange::All, "python", ""), date(2024, 6, 15));
    assert_eq!(query, "stars:>1 language:python");
}

#[test]
fn test_cutoff_dates() {
    let today = date(2024, 1, 5);
    assert_eq!(cutoff_date(TimeRange::All, today), None);
    assert_eq!(cutoff_date(TimeRange::Week, today), Some(date(2023, 12, 29)));
    assert_eq!(cutoff_date(TimeRange::Month, today), Some(date(2023, 12, 5)));
    assert_eq!(cutoff_date(TimeRange::Year, today), Some(date(2023, 1, 5)));
}

#[test]
fn test_month_cutoff_with_search_term() {
    let query = build_query(&filters(TimeRange::Month, "", "cli"), date(2024, 6, 15));
    assert_eq!(query, "cli created:>2024-05-15");
}
