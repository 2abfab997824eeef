use crate::models::{FilterChange, FilterState, RepoSummary, ResultsState};
use tracing::debug;

/// Handed out by [`ResultsStore::begin_fetch`]. Carries the state the request
/// was built from and the sequence number used to detect superseded responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub sequence: u64,
    pub filters: FilterState,
    pub page: u32,
}

/// Filters, current page and last fetched results for one explorer session.
#[derive(Debug, Default)]
pub struct ResultsStore {
    filters: FilterState,
    results: ResultsState,
    /// Bumped on every filter or page change.
    sequence: u64,
}

impl ResultsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(filters: FilterState) -> Self {
        Self {
            filters,
            ..Default::default()
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn results(&self) -> &ResultsState {
        &self.results
    }

    pub fn current_page(&self) -> u32 {
        self.results.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.results.is_loading
    }

    /// Merges `change` into the filters and goes back to page 1.
    pub fn set_filter(&mut self, change: &FilterChange) {
        let changed = change.apply_to(&mut self.filters);
        self.results.current_page = 1;
        self.touch();
        debug!(changed, filters = ?self.filters, "Filters updated");
    }

    pub fn set_page(&mut self, page: u32) {
        self.results.current_page = page.max(1);
        self.touch();
        debug!(page = self.results.current_page, "Page updated");
    }

    /// Starts a fetch lifecycle. Returns `None` while another fetch is open;
    /// the trigger is dropped, not queued.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.results.is_loading {
            return None;
        }
        self.results.is_loading = true;

        Some(FetchTicket {
            sequence: self.sequence,
            filters: self.filters.clone(),
            page: self.results.current_page,
        })
    }

    /// Whether no filter or page change happened since `ticket` was issued.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.sequence == self.sequence
    }

    pub fn apply_fetch_result(&mut self, total_results: u64, repos: Vec<RepoSummary>) {
        self.results.total_results = total_results;
        self.results.repos = repos;
        self.results.is_loading = false;
        self.results.errored = false;
    }

    pub fn apply_fetch_error(&mut self) {
        self.results.repos.clear();
        self.results.total_results = 0;
        self.results.is_loading = false;
        self.results.errored = true;
    }

    /// Closes a fetch lifecycle whose response is being discarded.
    pub fn abandon_fetch(&mut self) {
        self.results.is_loading = false;
    }

    /// Invalidates any ticket issued before this change.
    fn touch(&mut self) {
        self.sequence = self.sequence.wrapping_add(1);
    }
}
