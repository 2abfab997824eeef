#![allow(dead_code)]

use async_trait::async_trait;
use github_repo_explorer::error::{ExplorerError, Result};
use github_repo_explorer::github::{SearchBackend, SearchRequest};
use github_repo_explorer::models::{LanguageOptions, RepoSummary, ResultsState, SearchPage, ThemeMode};
use github_repo_explorer::pagination::PageWindow;
use github_repo_explorer::render::ResultsView;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub fn repo(name: &str, language: Option<&str>, stars: u64) -> RepoSummary {
    RepoSummary {
        name: name.to_string(),
        owner_login: "octocat".to_string(),
        owner_avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
        html_url: format!("https://github.com/octocat/{}", name),
        description: None,
        star_count: stars,
        language: language.map(str::to_string),
    }
}

pub fn page(total_results: u64, repos: Vec<RepoSummary>) -> SearchPage {
    SearchPage {
        total_results,
        repos,
        rate_limit: None,
    }
}

pub enum Reply {
    Page(SearchPage),
    Status(u16),
    Malformed,
    Hang,
}

/// Backend that answers from a queue of scripted replies and records every
/// request. The first call can be held until [`FakeBackend::release`].
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<SearchRequest>>,
    calls: AtomicUsize,
    gate_first: bool,
    started: Notify,
    release: Notify,
}

impl FakeBackend {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    /// Holds the first request until `release` is called.
    pub fn gated(replies: Vec<Reply>) -> Self {
        Self {
            gate_first: true,
            ..Self::new(replies)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl SearchBackend for FakeBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();

        if self.gate_first && call == 0 {
            self.started.notify_one();
            self.release.notified().await;
        }

        match reply {
            Some(Reply::Page(page)) => Ok(page),
            Some(Reply::Status(status)) => Err(ExplorerError::Http {
                status,
                body: "error".to_string(),
            }),
            Some(Reply::Malformed) => {
                let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
                Err(ExplorerError::MalformedResponse(err))
            }
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(page(0, Vec::new()))
            }
            None => Ok(page(0, Vec::new())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Loading,
    Results(ResultsState),
    Pagination(PageWindow),
    Languages(LanguageOptions),
    Error(String),
    Theme(ThemeMode),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ResultsView for RecordingView {
    fn show_loading(&self) {
        self.push(ViewEvent::Loading);
    }

    fn show_results(&self, results: &ResultsState) {
        self.push(ViewEvent::Results(results.clone()));
    }

    fn show_pagination(&self, window: &PageWindow) {
        self.push(ViewEvent::Pagination(window.clone()));
    }

    fn show_languages(&self, options: &LanguageOptions) {
        self.push(ViewEvent::Languages(options.clone()));
    }

    fn show_error(&self, message: &str) {
        self.push(ViewEvent::Error(message.to_string()));
    }

    fn apply_theme(&self, mode: ThemeMode) {
        self.push(ViewEvent::Theme(mode));
    }
}
