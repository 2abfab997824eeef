use crate::config::{ExplorerConfig, DEFAULT_API_BASE_URL};
use crate::models::{FilterChange, FilterState, TimeRange};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "github-repo-explorer")]
#[command(about = "GitHub Repo Explorer - Browse popular and recent repositories from the GitHub search API")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Free-text search term
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Restrict results to one language (e.g. rust, go)
    #[arg(short, long, default_value = "")]
    pub language: String,

    /// Only repositories created within this range: all, week, month, year
    #[arg(short, long, default_value = "all")]
    pub time: TimeRange,

    /// Page to open after the first load
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Keep reading commands from stdin
    #[arg(short, long)]
    pub interactive: bool,

    /// Flip the persisted light/dark theme before rendering
    #[arg(long)]
    pub toggle_theme: bool,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "EXPLORER_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Preferences file (defaults to the user config directory)
    #[arg(long, env = "EXPLORER_PREFS")]
    pub prefs: Option<PathBuf>,

    /// Do not read or write the preferences file
    #[arg(long)]
    pub no_persist: bool,
}

impl Cli {
    pub fn to_config(&self) -> ExplorerConfig {
        ExplorerConfig {
            api_base_url: self.api_url.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            preferences_path: self.prefs.clone(),
            ..Default::default()
        }
    }

    pub fn initial_filters(&self) -> FilterState {
        FilterState {
            time: self.time,
            language: self.language.clone(),
            search_term: self.search.clone(),
        }
    }
}

/// One line typed in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Filter(FilterChange),
    Page(u32),
    Next,
    Prev,
    Theme,
    Languages,
    Help,
    Quit,
}

pub const REPL_HELP: &str = "\
commands:
  search <term>   search for a term (no term clears it)
  lang <name>     filter by language, `lang all` clears it
  time <range>    all | week | month | year
  page <n>        jump to page n
  next, prev      move one page
  langs           list languages seen on the first page
  theme           toggle light/dark
  quit";

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match cmd.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(ReplCommand::Filter(FilterChange::search_term(arg))),
            "lang" | "l" => {
                let language = if arg.eq_ignore_ascii_case("all") { "" } else { arg };
                Ok(ReplCommand::Filter(FilterChange::language(language)))
            }
            "time" | "t" => arg.parse().map(|time| ReplCommand::Filter(FilterChange::time(time))),
            "page" | "p" => arg
                .parse::<u32>()
                .map(ReplCommand::Page)
                .map_err(|_| format!("invalid page number '{}'", arg)),
            "next" | "n" => Ok(ReplCommand::Next),
            "prev" => Ok(ReplCommand::Prev),
            "theme" => Ok(ReplCommand::Theme),
            "langs" => Ok(ReplCommand::Languages),
            "help" | "?" => Ok(ReplCommand::Help),
            "quit" | "q" | "exit" => Ok(ReplCommand::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{}', type `help`", other)),
        }
    }
}
