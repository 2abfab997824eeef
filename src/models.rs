use crate::types::GitHubRepo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time range restricting results to recently created repositories.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [TimeRange::All, TimeRange::Week, TimeRange::Month, TimeRange::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::All => "all",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TimeRange::All),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            other => Err(format!("unknown time range '{}', expected all|week|month|year", other)),
        }
    }
}

/// User-selected constraints driving the search query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    pub time: TimeRange,
    /// Empty means "all languages".
    pub language: String,
    pub search_term: String,
}

/// Partial update to a [`FilterState`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChange {
    pub time: Option<TimeRange>,
    pub language: Option<String>,
    pub search_term: Option<String>,
}

impl FilterChange {
    pub fn time(time: TimeRange) -> Self {
        Self { time: Some(time), ..Default::default() }
    }

    pub fn language(language: impl Into<String>) -> Self {
        Self { language: Some(language.into()), ..Default::default() }
    }

    pub fn search_term(term: impl Into<String>) -> Self {
        Self { search_term: Some(term.into()), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_none() && self.language.is_none() && self.search_term.is_none()
    }

    /// Merge into `filters`, returning whether anything changed.
    pub fn apply_to(&self, filters: &mut FilterState) -> bool {
        let before = filters.clone();
        if let Some(time) = self.time {
            filters.time = time;
        }
        if let Some(language) = &self.language {
            filters.language = language.clone();
        }
        if let Some(term) = &self.search_term {
            filters.search_term = term.clone();
        }
        *filters != before
    }
}

/// One search hit as shown in the results list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoSummary {
    pub name: String,
    pub owner_login: String,
    pub owner_avatar_url: String,
    pub html_url: String,
    pub description: Option<String>,
    pub star_count: u64,
    pub language: Option<String>,
}

impl From<GitHubRepo> for RepoSummary {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            name: repo.name,
            owner_login: repo.owner.login,
            owner_avatar_url: repo.owner.avatar_url,
            html_url: repo.html_url,
            description: repo.description.filter(|d| !d.trim().is_empty()),
            star_count: repo.stargazers_count,
            language: repo.language.filter(|l| !l.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultsState {
    pub repos: Vec<RepoSummary>,
    pub current_page: u32,
    pub total_results: u64,
    pub is_loading: bool,
    /// Set when the last fetch failed; the view shows an error instead of the list.
    pub errored: bool,
}

impl Default for ResultsState {
    fn default() -> Self {
        Self {
            repos: Vec::new(),
            current_page: 1,
            total_results: 0,
            is_loading: false,
            errored: false,
        }
    }
}

/// One page of search results as returned by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub total_results: u64,
    pub repos: Vec<RepoSummary>,
    pub rate_limit: Option<RateLimitState>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Selectable languages derived from a page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageOptions {
    /// Distinct languages, sorted ascending. The "all languages" entry is implicit.
    pub languages: Vec<String>,
    /// Currently selected language, empty for "all languages".
    pub selected: String,
}

impl LanguageOptions {
    /// Builds the option list from the given repos only. Languages that do not
    /// appear on this page are not offered.
    pub fn from_repos<'a>(repos: impl IntoIterator<Item = &'a RepoSummary>, selected: &str) -> Self {
        let mut languages: Vec<String> = repos
            .into_iter()
            .filter_map(|repo| repo.language.clone())
            .collect();
        languages.sort();
        languages.dedup();

        Self {
            languages,
            selected: selected.to_string(),
        }
    }

    /// Option values in display order, "all languages" (empty value) first.
    pub fn values(&self) -> Vec<&str> {
        std::iter::once("").chain(self.languages.iter().map(String::as_str)).collect()
    }
}

/// Rate limit state from the last response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
    pub reset_time: chrono::DateTime<chrono::Utc>,
    pub is_limited: bool,
}
