use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use github_repo_explorer::cli::{Cli, ReplCommand, REPL_HELP};
use github_repo_explorer::github::GitHubClient;
use github_repo_explorer::orchestrator::{FetchOrchestrator, RefreshOutcome};
use github_repo_explorer::render::{ResultsView, TerminalView};
use github_repo_explorer::theme::{FilePreferenceStore, MemoryPreferenceStore, ThemePreference};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Logs go to stderr so they never interleave with the rendered list
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("github_repo_explorer=info,warn"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = cli.to_config();
    config.validate().context("Invalid configuration")?;

    let theme = if cli.no_persist {
        ThemePreference::new(MemoryPreferenceStore::new())
    } else {
        let path = match &config.preferences_path {
            Some(path) => path.clone(),
            None => FilePreferenceStore::default_path().context("Failed to locate preferences")?,
        };
        debug!(path = %path.display(), "Using preferences file");
        ThemePreference::new(FilePreferenceStore::new(path))
    };

    let client = GitHubClient::new(&config).context("Failed to create GitHub client")?;
    let view = Arc::new(TerminalView::new());
    let orchestrator = FetchOrchestrator::new(Arc::new(client), view.clone(), theme, config)
        .with_filters(cli.initial_filters());

    if cli.toggle_theme {
        match orchestrator.on_theme_toggle() {
            Ok(mode) => println!("Theme set to {}", mode.to_string().bold()),
            Err(e) => warn!(error = %e, "Could not save theme preference"),
        }
    }

    println!("{}", "GitHub Repo Explorer".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    view.show_time_ranges(orchestrator.filters().await.time);
    orchestrator.start().await;
    if cli.page > 1 {
        orchestrator.on_page_change(cli.page).await;
    }

    if cli.interactive {
        run_interactive(&orchestrator, &view).await?;
    }

    Ok(())
}

async fn run_interactive(orchestrator: &FetchOrchestrator, view: &TerminalView) -> Result<()> {
    println!("\n{}", "Type `help` for commands.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ReplCommand>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e.yellow());
                continue;
            }
        };

        let outcome = match command {
            ReplCommand::Filter(change) => {
                let outcome = orchestrator.on_filter_change(change).await;
                view.show_time_ranges(orchestrator.filters().await.time);
                outcome
            }
            ReplCommand::Page(page) => orchestrator.on_page_change(page).await,
            ReplCommand::Next => orchestrator.on_next_page().await,
            ReplCommand::Prev => orchestrator.on_prev_page().await,
            ReplCommand::Theme => {
                match orchestrator.on_theme_toggle() {
                    Ok(mode) => println!("Theme set to {}", mode.to_string().bold()),
                    Err(e) => eprintln!("{}", format!("Could not save theme: {}", e).red()),
                }
                continue;
            }
            ReplCommand::Languages => {
                view.show_languages(&orchestrator.language_options().await);
                continue;
            }
            ReplCommand::Help => {
                println!("{}", REPL_HELP);
                continue;
            }
            ReplCommand::Quit => break,
        };

        if outcome == RefreshOutcome::Ignored {
            println!("{}", "Nothing to do.".dimmed());
        }
    }

    Ok(())
}
