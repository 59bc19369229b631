//! Search session state machine.
//!
//! [`SearchSession`] owns everything the original widget tracked: the
//! submitted query, the accumulated results, the 1-based page cursor, the
//! has-more flag, and the [`LoadState`]. State transitions are pure and
//! synchronous (`begin_*` / `apply_*`), with thin async drivers
//! ([`SearchSession::search`], [`SearchSession::load_more`]) layered on top,
//! so every property of the widget contract is testable without I/O.
//!
//! Each fetch is tagged with a monotonically increasing sequence number via
//! a [`FetchTicket`]. A completion whose ticket is no longer the latest is
//! discarded, so an older page's response can never overwrite or trail a
//! newer one.

mod state;

use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{ImageHit, SearchClient};

pub use state::LoadState;

/// Precondition violations for session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A search was submitted with an empty or whitespace-only query.
    #[error("search query must not be empty")]
    EmptyQuery,

    /// A fetch was requested while another fetch is in flight.
    #[error("a fetch is already in flight")]
    FetchInFlight,

    /// Load-more was requested but the last fetch reported no more results.
    #[error("no more pages to load")]
    NoMorePages,
}

/// Handle for one in-flight fetch.
///
/// Issued by [`SearchSession::begin_search`] and
/// [`SearchSession::begin_load_more`]; consumed by exactly one
/// `apply_success` / `apply_failure` call. Completions presenting a ticket
/// that is no longer the latest are discarded.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    seq: u64,
    page: u32,
    query: String,
}

impl FetchTicket {
    /// Page number this fetch targets (1-based).
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Query this fetch was issued for.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// State for one interactive search session.
///
/// All state is created empty and dies with the session; nothing persists.
#[derive(Debug, Default)]
pub struct SearchSession {
    query: String,
    results: Vec<ImageHit>,
    page: u32,
    has_more: bool,
    state: LoadState,
    latest_seq: u64,
}

impl SearchSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last-submitted query, empty before the first search.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Accumulated results in arrival order.
    #[must_use]
    pub fn results(&self) -> &[ImageHit] {
        &self.results
    }

    /// Current page cursor (1-based); 0 before the first search.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// True iff the most recent applied fetch returned a non-empty page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Current load state.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Begins a new search: resets the page cursor to 1 and clears
    /// accumulated results before the fetch resolves.
    ///
    /// Submitting while a fetch is in flight supersedes it: the older
    /// ticket goes stale and its completion will be discarded, so only the
    /// latest search's result ever applies.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyQuery`] for a blank query.
    pub fn begin_search(&mut self, query: &str) -> Result<FetchTicket, SessionError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyQuery);
        }

        self.query = trimmed.to_string();
        self.page = 1;
        self.results.clear();
        self.state = LoadState::Loading;
        Ok(self.issue_ticket())
    }

    /// Begins fetching the next page for the last-submitted query.
    ///
    /// Advances the page cursor before the fetch resolves; a failed fetch
    /// does not roll the cursor back.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::FetchInFlight`] while another fetch is
    /// loading and [`SessionError::NoMorePages`] when the most recent fetch
    /// reported an empty page.
    pub fn begin_load_more(&mut self) -> Result<FetchTicket, SessionError> {
        if self.state.is_loading() {
            return Err(SessionError::FetchInFlight);
        }
        if !self.has_more {
            return Err(SessionError::NoMorePages);
        }

        self.page += 1;
        self.state = LoadState::Loading;
        Ok(self.issue_ticket())
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        FetchTicket {
            seq: self.latest_seq,
            page: self.page,
            query: self.query.clone(),
        }
    }

    /// Applies a successful page fetch.
    ///
    /// Page 1 replaces the result set; later pages append in arrival order
    /// (duplicate ids across pages are kept). The has-more flag is
    /// recomputed from this page's item count. Stale tickets are discarded
    /// without touching any state.
    pub fn apply_success(&mut self, ticket: &FetchTicket, items: Vec<ImageHit>) {
        if !self.is_latest(ticket) {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale fetch success"
            );
            return;
        }

        self.has_more = !items.is_empty();
        if ticket.page == 1 {
            self.results = items;
        } else {
            self.results.extend(items);
        }
        self.state = LoadState::Idle;
        debug!(
            page = ticket.page,
            total = self.results.len(),
            has_more = self.has_more,
            "applied page fetch"
        );
    }

    /// Applies a failed page fetch.
    ///
    /// Results and the has-more flag remain exactly as they were before the
    /// fetch began; only the load state changes. Stale tickets are
    /// discarded without touching any state.
    pub fn apply_failure(&mut self, ticket: &FetchTicket, message: impl Into<String>) {
        if !self.is_latest(ticket) {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale fetch failure"
            );
            return;
        }
        self.state = LoadState::Error(message.into());
    }

    /// Records an error that did not come from a page fetch (e.g. a failed
    /// image download), surfacing it through the same error state.
    ///
    /// Ignored while a fetch is in flight; the fetch's own completion owns
    /// the state transition in that case.
    pub fn report_error(&mut self, message: impl Into<String>) {
        if self.state.is_loading() {
            return;
        }
        self.state = LoadState::Error(message.into());
    }

    fn is_latest(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Runs a full search: begin, fetch, apply.
    ///
    /// Fetch failures are captured in the session state, not returned; the
    /// ticket is always consumed by exactly one apply call, so the loading
    /// state cannot stick.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] only for precondition violations.
    pub async fn search(
        &mut self,
        client: &SearchClient,
        query: &str,
    ) -> Result<(), SessionError> {
        let ticket = self.begin_search(query)?;
        self.run_fetch(client, ticket).await;
        Ok(())
    }

    /// Fetches the next page: begin, fetch, apply.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] only for precondition violations.
    pub async fn load_more(&mut self, client: &SearchClient) -> Result<(), SessionError> {
        let ticket = self.begin_load_more()?;
        self.run_fetch(client, ticket).await;
        Ok(())
    }

    async fn run_fetch(&mut self, client: &SearchClient, ticket: FetchTicket) {
        match client.search_photos(&ticket.query, ticket.page).await {
            Ok(response) => self.apply_success(&ticket, response.results),
            Err(error) => {
                warn!(error = %error, page = ticket.page, "search fetch failed");
                self.apply_failure(&ticket, error.user_message());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ImageUrls;

    fn hit(id: &str) -> ImageHit {
        ImageHit {
            id: id.to_string(),
            urls: ImageUrls {
                small: format!("https://img.example.com/{id}-small"),
                full: format!("https://img.example.com/{id}-full"),
            },
            alt_description: None,
        }
    }

    fn hits(prefix: &str, count: usize) -> Vec<ImageHit> {
        (0..count).map(|i| hit(&format!("{prefix}-{i}"))).collect()
    }

    #[test]
    fn test_begin_search_resets_page_and_results_before_fetch_resolves() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, hits("cats", 20));
        assert_eq!(session.results().len(), 20);
        assert_eq!(session.page(), 1);

        let ticket = session.begin_load_more().unwrap();
        session.apply_success(&ticket, hits("cats2", 5));
        assert_eq!(session.results().len(), 25);
        assert_eq!(session.page(), 2);

        // New search clears results and resets the cursor before any apply.
        let ticket = session.begin_search("dogs").unwrap();
        assert_eq!(session.results().len(), 0);
        assert_eq!(session.page(), 1);
        assert!(session.state().is_loading());
        assert_eq!(ticket.page(), 1);
        assert_eq!(ticket.query(), "dogs");
    }

    #[test]
    fn test_begin_search_rejects_blank_query() {
        let mut session = SearchSession::new();
        assert_eq!(session.begin_search("").unwrap_err(), SessionError::EmptyQuery);
        assert_eq!(
            session.begin_search("   ").unwrap_err(),
            SessionError::EmptyQuery
        );
        assert_eq!(session.results().len(), 0);
        assert!(!session.state().is_loading());
    }

    #[test]
    fn test_begin_search_trims_query() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("  cats  ").unwrap();
        assert_eq!(ticket.query(), "cats");
        assert_eq!(session.query(), "cats");
    }

    #[test]
    fn test_page_one_success_replaces_results() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, hits("a", 3));

        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, hits("b", 2));

        let ids: Vec<&str> = session.results().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["b-0", "b-1"]);
        assert_eq!(session.state(), &LoadState::Idle);
    }

    #[test]
    fn test_later_page_success_appends_in_order_keeping_duplicates() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, vec![hit("x"), hit("y")]);

        let ticket = session.begin_load_more().unwrap();
        // The API may return overlapping results across pages; they are kept.
        session.apply_success(&ticket, vec![hit("y"), hit("z")]);

        let ids: Vec<&str> = session.results().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["x", "y", "y", "z"]);
    }

    #[test]
    fn test_has_more_tracks_most_recent_page_count() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, hits("a", 20));
        assert!(session.has_more());

        let ticket = session.begin_load_more().unwrap();
        session.apply_success(&ticket, Vec::new());
        assert!(!session.has_more());
        assert_eq!(session.results().len(), 20, "empty page appends nothing");
    }

    #[test]
    fn test_failure_leaves_results_and_has_more_untouched() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, hits("a", 20));

        let ticket = session.begin_load_more().unwrap();
        session.apply_failure(&ticket, "Failed to fetch images. Please try again.");

        assert_eq!(session.results().len(), 20);
        assert!(session.has_more());
        assert_eq!(
            session.state().error(),
            Some("Failed to fetch images. Please try again.")
        );
    }

    #[test]
    fn test_loading_always_ends_after_apply() {
        let mut session = SearchSession::new();

        let ticket = session.begin_search("cats").unwrap();
        assert!(session.state().is_loading());
        session.apply_success(&ticket, hits("a", 1));
        assert!(!session.state().is_loading());

        let ticket = session.begin_load_more().unwrap();
        assert!(session.state().is_loading());
        session.apply_failure(&ticket, "nope");
        assert!(!session.state().is_loading());
    }

    #[test]
    fn test_resubmit_supersedes_inflight_fetch() {
        let mut session = SearchSession::new();
        let stale = session.begin_search("cats").unwrap();
        // Rapid double-submit: the second search supersedes the first while
        // it is still in flight.
        let fresh = session.begin_search("dogs").unwrap();

        // The older response resolves after the newer request was issued.
        session.apply_success(&stale, hits("cats", 20));
        assert_eq!(session.results().len(), 0, "stale page must not apply");
        assert!(session.state().is_loading(), "fresh fetch still in flight");

        session.apply_success(&fresh, hits("dogs", 2));
        let ids: Vec<&str> = session.results().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["dogs-0", "dogs-1"]);
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut session = SearchSession::new();
        let stale = session.begin_search("cats").unwrap();
        let fresh = session.begin_search("dogs").unwrap();
        session.apply_success(&fresh, hits("dogs", 1));

        session.apply_failure(&stale, "late failure");
        assert_eq!(session.state(), &LoadState::Idle);
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn test_load_more_preconditions() {
        let mut session = SearchSession::new();
        assert_eq!(
            session.begin_load_more().unwrap_err(),
            SessionError::NoMorePages
        );

        let ticket = session.begin_search("cats").unwrap();
        assert_eq!(
            session.begin_load_more().unwrap_err(),
            SessionError::FetchInFlight,
            "load-more control is unavailable while loading"
        );
        session.apply_success(&ticket, hits("a", 1));
        assert!(session.begin_load_more().is_ok());
    }

    #[test]
    fn test_load_more_failure_does_not_roll_back_cursor() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, hits("a", 20));

        let ticket = session.begin_load_more().unwrap();
        assert_eq!(session.page(), 2);
        session.apply_failure(&ticket, "boom");
        assert_eq!(session.page(), 2);
    }

    #[test]
    fn test_report_error_surfaces_download_failures() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, hits("a", 2));

        session.report_error("Failed to download image. Please try again.");
        assert_eq!(
            session.state().error(),
            Some("Failed to download image. Please try again.")
        );
        assert_eq!(session.results().len(), 2);
    }

    #[test]
    fn test_report_error_ignored_while_loading() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.report_error("out of band");
        assert!(session.state().is_loading());
        session.apply_success(&ticket, Vec::new());
        assert_eq!(session.state(), &LoadState::Idle);
    }
}
