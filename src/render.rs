//! Presentation layer. The orchestrator only talks to [`ResultsView`]; the
//! terminal implementation below is what the binary uses.

use crate::models::{LanguageOptions, RepoSummary, ResultsState, ThemeMode, TimeRange};
use crate::pagination::{PageMarker, PageWindow};
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

pub const LOADING_MESSAGE: &str = "Loading repositories...";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load repositories, please try again later.";
pub const EMPTY_RESULTS_MESSAGE: &str = "No repositories match these filters.";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NO_LANGUAGE: &str = "N/A";
pub const ALL_LANGUAGES_LABEL: &str = "All languages";

/// UI surface refreshed by the orchestrator after each state transition.
pub trait ResultsView: Send + Sync {
    fn show_loading(&self);
    fn show_results(&self, results: &ResultsState);
    fn show_pagination(&self, window: &PageWindow);
    fn show_languages(&self, options: &LanguageOptions);
    fn show_error(&self, message: &str);
    fn apply_theme(&self, mode: ThemeMode);
}

/// Star count with thousands separators, e.g. `12,345`.
pub fn format_stars(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn description_or_fallback(repo: &RepoSummary) -> &str {
    repo.description.as_deref().unwrap_or(NO_DESCRIPTION)
}

pub fn language_or_fallback(repo: &RepoSummary) -> &str {
    repo.language.as_deref().unwrap_or(NO_LANGUAGE)
}

/// Plain-text pagination line: `‹ 1 … 4 [5] 6 … 10 ›`. Disabled arrows are
/// rendered as blanks. Empty when there is nothing to paginate.
pub fn pagination_line(window: &PageWindow) -> String {
    if !window.is_visible() {
        return String::new();
    }

    let mut parts = Vec::with_capacity(window.markers.len() + 2);
    parts.push(if window.prev_disabled { " ".to_string() } else { "‹".to_string() });
    for marker in &window.markers {
        parts.push(match marker {
            PageMarker::Page(page) if window.is_active(*page) => format!("[{}]", page),
            PageMarker::Page(page) => page.to_string(),
            PageMarker::Ellipsis => "…".to_string(),
        });
    }
    parts.push(if window.next_disabled { " ".to_string() } else { "›".to_string() });
    parts.join(" ")
}

/// Renders to stdout with ANSI colours picked from the active theme.
#[derive(Debug, Default)]
pub struct TerminalView {
    dark: AtomicBool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_dark(&self) -> bool {
        self.dark.load(Ordering::Relaxed)
    }

    fn accent(&self, text: &str) -> ColoredString {
        if self.is_dark() {
            text.bright_cyan().bold()
        } else {
            text.blue().bold()
        }
    }

    fn muted(&self, text: &str) -> ColoredString {
        if self.is_dark() {
            text.bright_black()
        } else {
            text.dimmed()
        }
    }

    fn print_card(&self, repo: &RepoSummary) {
        println!(
            "{} {}",
            self.muted(&format!("{}/", repo.owner_login)),
            self.accent(&repo.name)
        );
        println!("  {}", self.muted(&repo.html_url).underline());
        println!("  {}", description_or_fallback(repo));
        println!(
            "  {} {}   {}",
            "★".yellow(),
            format_stars(repo.star_count),
            language_or_fallback(repo).bold()
        );
        println!();
    }

    /// Lists the selectable time ranges with the active one highlighted.
    pub fn show_time_ranges(&self, active: TimeRange) {
        let line = TimeRange::ALL
            .iter()
            .map(|range| {
                if *range == active {
                    format!("[{}]", range).green().bold().to_string()
                } else {
                    range.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("{} {}", self.muted("time:"), line);
    }
}

impl ResultsView for TerminalView {
    fn show_loading(&self) {
        println!("{}", self.muted(LOADING_MESSAGE));
    }

    fn show_results(&self, results: &ResultsState) {
        if results.repos.is_empty() {
            println!("{}", EMPTY_RESULTS_MESSAGE.yellow());
            return;
        }
        println!(
            "{}\n",
            self.muted(&format!(
                "{} repositories, page {}",
                format_stars(results.total_results),
                results.current_page
            ))
        );
        for repo in &results.repos {
            self.print_card(repo);
        }
    }

    fn show_pagination(&self, window: &PageWindow) {
        let line = pagination_line(window);
        if !line.is_empty() {
            println!("{}", self.accent(&line));
        }
    }

    fn show_languages(&self, options: &LanguageOptions) {
        let line = options
            .values()
            .into_iter()
            .map(|value| {
                let label = if value.is_empty() { ALL_LANGUAGES_LABEL } else { value };
                if value == options.selected {
                    format!("[{}]", label).green().bold().to_string()
                } else {
                    label.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        println!("{} {}", self.muted("languages:"), line);
    }

    fn show_error(&self, message: &str) {
        eprintln!("{}", message.red().bold());
    }

    fn apply_theme(&self, mode: ThemeMode) {
        self.dark.store(mode == ThemeMode::Dark, Ordering::Relaxed);
    }
}
