use github_repo_explorer::models::{
    FilterChange, FilterState, LanguageOptions, RepoSummary, ResultsState, TimeRange,
};
use github_repo_explorer::types::GitHubRepo;

fn summary(name: &str, language: Option<&str>) -> RepoSummary {
    RepoSummary {
        name: name.to_string(),
        owner_login: "owner".to_string(),
        owner_avatar_url: "https://github.com/owner.png".to_string(),
        html_url: format!("https://github.com/owner/{}", name),
        description: None,
        star_count: 1,
        language: language.map(str::to_string),
    }
}

#[test]
fn test_repo_summary_from_api_repo() {
    let api: GitHubRepo = serde_json::from_str(
        r#"{
            "name": "test-repo",
            "html_url": "https://github.com/owner/test-repo",
            "description": "   ",
            "stargazers_count": 100,
            "language": "",
            "owner": { "login": "owner", "avatar_url": "https://github.com/owner.png" }
        }"#,
    )
    .unwrap();

    let repo = RepoSummary::from(api);
    assert_eq!(repo.name, "test-repo");
    assert_eq!(repo.owner_login, "owner");
    assert_eq!(repo.star_count, 100);
    assert_eq!(repo.description, None);
    assert_eq!(repo.language, None);
}

#[test]
fn test_api_repo_optional_fields_may_be_absent() {
    let api: GitHubRepo = serde_json::from_str(
        r#"{
            "name": "bare",
            "html_url": "https://github.com/owner/bare",
            "stargazers_count": 0,
            "owner": { "login": "owner", "avatar_url": "" }
        }"#,
    )
    .unwrap();
    assert!(api.description.is_none());
    assert!(api.language.is_none());
}

#[test]
fn test_results_state_default() {
    let state = ResultsState::default();
    assert_eq!(state.current_page, 1);
    assert_eq!(state.total_results, 0);
    assert!(!state.is_loading);
    assert!(!state.errored);
}

#[test]
fn test_time_range_parsing_and_serialization() {
    assert_eq!("week".parse::<TimeRange>().unwrap(), TimeRange::Week);
    assert_eq!(" YEAR ".parse::<TimeRange>().unwrap(), TimeRange::Year);
    assert!("decade".parse::<TimeRange>().is_err());

    let json = serde_json::to_string(&TimeRange::Month).unwrap();
    assert_eq!(json, "\"month\"");
    assert_eq!(TimeRange::default(), TimeRange::All);
}

#[test]
fn test_filter_change_apply_reports_changes() {
    let mut filters = FilterState::default();

    assert!(FilterChange::language("go").apply_to(&mut filters));
    assert!(!FilterChange::language("go").apply_to(&mut filters));
    assert!(!FilterChange::default().apply_to(&mut filters));
    assert!(FilterChange::default().is_empty());

    assert!(FilterChange::time(TimeRange::Week).apply_to(&mut filters));
    assert_eq!(filters.language, "go");
    assert_eq!(filters.time, TimeRange::Week);
}

#[test]
fn test_language_options_from_page_sample() {
    let repos = vec![
        summary("a", Some("Rust")),
        summary("b", None),
        summary("c", Some("Go")),
        summary("d", Some("Rust")),
        summary("e", Some("C")),
    ];

    let options = LanguageOptions::from_repos(&repos, "Go");
    assert_eq!(options.languages, vec!["C", "Go", "Rust"]);
    assert_eq!(options.selected, "Go");
    assert_eq!(options.values(), vec!["", "C", "Go", "Rust"]);
}

#[test]
fn test_language_options_empty_page_keeps_sentinel() {
    let options = LanguageOptions::from_repos(&Vec::<RepoSummary>::new(), "");
    assert!(options.languages.is_empty());
    assert_eq!(options.values(), vec![""]);
}
