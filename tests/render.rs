use github_repo_explorer::models::RepoSummary;
use github_repo_explorer::pagination::PageWindow;
use github_repo_explorer::render::{
    description_or_fallback, format_stars, language_or_fallback, pagination_line, NO_DESCRIPTION,
    NO_LANGUAGE,
};

#[test]
fn test_format_stars() {
    assert_eq!(format_stars(0), "0");
    assert_eq!(format_stars(999), "999");
    assert_eq!(format_stars(1000), "1,000");
    assert_eq!(format_stars(98_765), "98,765");
    assert_eq!(format_stars(1_234_567), "1,234,567");
}

#[test]
fn test_card_fallbacks() {
    let mut repo = RepoSummary {
        name: "x".to_string(),
        owner_login: "o".to_string(),
        owner_avatar_url: String::new(),
        html_url: "https://github.com/o/x".to_string(),
        description: None,
        star_count: 0,
        language: None,
    };
    assert_eq!(description_or_fallback(&repo), NO_DESCRIPTION);
    assert_eq!(language_or_fallback(&repo), NO_LANGUAGE);

    repo.description = Some("Fast".to_string());
    repo.language = Some("Zig".to_string());
    assert_eq!(description_or_fallback(&repo), "Fast");
    assert_eq!(language_or_fallback(&repo), "Zig");
}

#[test]
fn test_pagination_line() {
    assert_eq!(pagination_line(&PageWindow::compute(5, 300, 30, 34)), "‹ 1 … 4 [5] 6 … 10 ›");
    assert_eq!(pagination_line(&PageWindow::compute(1, 300, 30, 34)), "  [1] 2 … 10 ›");
    assert_eq!(pagination_line(&PageWindow::compute(3, 90, 30, 34)), "‹ 1 2 [3]  ");
    assert_eq!(pagination_line(&PageWindow::compute(1, 10, 30, 34)), "");
}
