//! Drives fetches for the current filter state and keeps the view in sync.
//!
//! The UI layer never touches the store directly. It calls the `on_*`
//! command handlers, each of which applies one transition and refreshes.
//! At most one request is in flight at a time: triggers that arrive while a
//! fetch is open are dropped. A response whose filters or page were changed
//! while it was in flight is discarded and the latest state is fetched instead.

use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, Result};
use crate::github::{SearchBackend, SearchRequest};
use crate::models::{FilterChange, FilterState, LanguageOptions, ResultsState, SearchPage, ThemeMode};
use crate::pagination::PageWindow;
use crate::query::build_query_now;
use crate::render::{ResultsView, LOAD_FAILED_MESSAGE};
use crate::store::{FetchTicket, ResultsStore};
use crate::theme::ThemePreference;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// How a refresh or command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Results were fetched and rendered.
    Applied,
    /// The fetch failed; the view shows the error state.
    Failed,
    /// Another fetch was already open, nothing was requested.
    Dropped,
    /// The command did not change anything worth fetching.
    Ignored,
}

/// Closes an open fetch lifecycle if `refresh` is dropped before it applies
/// or discards the response.
struct OpenFetch {
    store: Arc<Mutex<ResultsStore>>,
    armed: bool,
}

impl OpenFetch {
    fn new(store: &Arc<Mutex<ResultsStore>>) -> Self {
        Self {
            store: Arc::clone(store),
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for OpenFetch {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("Refresh cancelled with a fetch open, clearing loading state");
        match self.store.try_lock() {
            Ok(mut store) => store.abandon_fetch(),
            Err(_) => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let store = Arc::clone(&self.store);
                    handle.spawn(async move {
                        store.lock().await.abandon_fetch();
                    });
                }
                Err(e) => error!(error = %e, "Could not clear loading state"),
            },
        }
    }
}

pub struct FetchOrchestrator {
    store: Arc<Mutex<ResultsStore>>,
    backend: Arc<dyn SearchBackend>,
    view: Arc<dyn ResultsView>,
    theme: ThemePreference,
    languages: Mutex<LanguageOptions>,
    config: ExplorerConfig,
}

impl FetchOrchestrator {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        view: Arc<dyn ResultsView>,
        theme: ThemePreference,
        config: ExplorerConfig,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(ResultsStore::new())),
            backend,
            view,
            theme,
            languages: Mutex::new(LanguageOptions::default()),
            config,
        }
    }

    /// Starts from `filters` instead of the defaults.
    pub fn with_filters(self, filters: FilterState) -> Self {
        Self {
            store: Arc::new(Mutex::new(ResultsStore::with_filters(filters))),
            ..self
        }
    }

    pub async fn filters(&self) -> FilterState {
        self.store.lock().await.filters().clone()
    }

    pub async fn results(&self) -> ResultsState {
        self.store.lock().await.results().clone()
    }

    /// Languages published after the last first-page fetch.
    pub async fn language_options(&self) -> LanguageOptions {
        self.languages.lock().await.clone()
    }

    pub async fn page_window(&self) -> PageWindow {
        let store = self.store.lock().await;
        self.window_for(store.results())
    }

    fn window_for(&self, results: &ResultsState) -> PageWindow {
        PageWindow::compute(
            results.current_page,
            results.total_results,
            self.config.page_size,
            self.config.api_max_pages,
        )
    }

    /// Applies the persisted theme and loads the first page.
    pub async fn start(&self) -> RefreshOutcome {
        let mode = self.theme.load();
        self.theme.apply(mode, self.view.as_ref());
        info!(theme = %mode, "Explorer started");
        self.refresh().await
    }

    /// Fetches results for the current state.
    pub async fn refresh(&self) -> RefreshOutcome {
        let mut superseded = 0u32;

        loop {
            let ticket = match self.store.lock().await.begin_fetch() {
                Some(ticket) => ticket,
                None => {
                    debug!("Fetch already in flight, dropping refresh");
                    return RefreshOutcome::Dropped;
                }
            };

            let mut open = OpenFetch::new(&self.store);
            self.view.show_loading();
            let result = self.fetch(&ticket).await;

            let mut store = self.store.lock().await;
            open.disarm();
            if !store.is_current(&ticket) {
                store.abandon_fetch();
                superseded += 1;
                debug!(sequence = ticket.sequence, superseded, "Discarding superseded response");
                continue;
            }

            return match result {
                Ok(page) => {
                    let count = page.repos.len();
                    store.apply_fetch_result(page.total_results, page.repos);
                    let results = store.results().clone();
                    let selected = store.filters().language.clone();
                    drop(store);

                    info!(
                        page = ticket.page,
                        total_results = results.total_results,
                        count,
                        "Repositories loaded"
                    );
                    self.render(&results);
                    if ticket.page == 1 {
                        self.publish_languages(&results, &selected).await;
                    }
                    RefreshOutcome::Applied
                }
                Err(e) => {
                    store.apply_fetch_error();
                    drop(store);

                    error!(error = %e, page = ticket.page, "Failed to fetch repositories");
                    self.view.show_error(LOAD_FAILED_MESSAGE);
                    RefreshOutcome::Failed
                }
            };
        }
    }

    async fn fetch(&self, ticket: &FetchTicket) -> Result<SearchPage> {
        let request = SearchRequest {
            query: build_query_now(&ticket.filters),
            page: ticket.page,
            per_page: self.config.page_size,
        };
        debug!(query = %request.query, page = request.page, "Issuing search request");

        match timeout(self.config.request_timeout, self.backend.search(&request)).await {
            Ok(result) => result,
            Err(_) => Err(ExplorerError::Timeout(self.config.request_timeout)),
        }
    }

    fn render(&self, results: &ResultsState) {
        self.view.show_results(results);
        self.view.show_pagination(&self.window_for(results));
    }

    /// Republishes the language list from the current page's sample only.
    async fn publish_languages(&self, results: &ResultsState, selected: &str) {
        let options = LanguageOptions::from_repos(&results.repos, selected);
        self.view.show_languages(&options);
        *self.languages.lock().await = options;
    }

    pub async fn on_filter_change(&self, change: FilterChange) -> RefreshOutcome {
        {
            let mut store = self.store.lock().await;
            let only_time = change.language.is_none() && change.search_term.is_none();
            if change.is_empty() || (only_time && change.time == Some(store.filters().time)) {
                return RefreshOutcome::Ignored;
            }
            store.set_filter(&change);
        }
        self.refresh().await
    }

    pub async fn on_page_change(&self, page: u32) -> RefreshOutcome {
        {
            let mut store = self.store.lock().await;
            let window = self.window_for(store.results());
            if page == 0 || page > window.total_pages.max(1) {
                debug!(page, total_pages = window.total_pages, "Ignoring out-of-range page");
                return RefreshOutcome::Ignored;
            }
            store.set_page(page);
        }
        self.refresh().await
    }

    pub async fn on_next_page(&self) -> RefreshOutcome {
        match self.page_window().await.next_page() {
            Some(page) => self.on_page_change(page).await,
            None => RefreshOutcome::Ignored,
        }
    }

    pub async fn on_prev_page(&self) -> RefreshOutcome {
        match self.page_window().await.prev_page() {
            Some(page) => self.on_page_change(page).await,
            None => RefreshOutcome::Ignored,
        }
    }

    pub fn on_theme_toggle(&self) -> Result<ThemeMode> {
        let mode = self.theme.toggle()?;
        self.theme.apply(mode, self.view.as_ref());
        Ok(mode)
    }
}
