//! Paginated query source state machine.
//!
//! Wraps "fetch page N of collection X" as explicit state, so the rendering
//! layer can always answer loading / data / error without re-entrant fetch
//! logic. While a new page loads, the previously fetched page is kept as a
//! placeholder to avoid layout collapse; after a failure the last good page
//! stays readable.

use saffron_core::PageResult;

use crate::error::ApiError;

/// Ticket identifying one in-flight fetch.
///
/// Resolving with a stale ticket is a no-op: any context change bumps the
/// source's generation, so a late-arriving response for a superseded
/// (parameters, page) tuple is discarded instead of clobbering fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Observable state of a paginated query source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceState<T> {
    /// No request has been made or should be made: either nothing was
    /// fetched yet, or a required parameter / identity is absent. Reports
    /// `loading = false` and empty data rather than erroring.
    Idle,
    /// A fetch is in flight. `previous` carries the last fetched page as a
    /// placeholder, when one exists.
    Loading { previous: Option<PageResult<T>> },
    /// The last fetch succeeded.
    Ready(PageResult<T>),
    /// The last fetch failed. `previous` retains the last good page so a
    /// transient failure does not blank the UI.
    Failed {
        message: String,
        previous: Option<PageResult<T>>,
    },
}

/// A paginated query source with generation-gated resolution.
#[derive(Debug)]
pub struct QuerySource<T> {
    state: SourceState<T>,
    generation: u64,
}

impl<T> QuerySource<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SourceState::Idle,
            generation: 0,
        }
    }

    /// Start a fetch, keeping any existing page as a placeholder.
    ///
    /// Returns the ticket the eventual response must present to
    /// [`resolve`](Self::resolve).
    pub fn begin(&mut self) -> FetchTicket {
        let prior = std::mem::replace(&mut self.state, SourceState::Idle);
        let previous = match prior {
            SourceState::Ready(page) => Some(page),
            SourceState::Loading { previous } | SourceState::Failed { previous, .. } => previous,
            SourceState::Idle => None,
        };
        self.state = SourceState::Loading { previous };
        self.generation += 1;
        FetchTicket(self.generation)
    }

    /// Apply a fetch outcome. Returns `false` if the ticket was stale and
    /// the outcome was discarded.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<PageResult<T>, ApiError>,
    ) -> bool {
        if ticket.0 != self.generation {
            return false;
        }

        self.state = match outcome {
            Ok(page) => SourceState::Ready(page),
            Err(error) => {
                let previous = match std::mem::replace(&mut self.state, SourceState::Idle) {
                    SourceState::Loading { previous } => previous,
                    SourceState::Ready(page) => Some(page),
                    SourceState::Failed { previous, .. } => previous,
                    SourceState::Idle => None,
                };
                SourceState::Failed {
                    message: error.user_message(),
                    previous,
                }
            }
        };
        true
    }

    /// Put the source in its neutral no-request state.
    ///
    /// Used when a required parameter (category name) or identity is absent.
    /// Also invalidates in-flight tickets.
    pub fn disable(&mut self) {
        self.generation += 1;
        self.state = SourceState::Idle;
    }

    /// Invalidate in-flight tickets without discarding current data.
    ///
    /// Called when the selection context changes, so responses for the old
    /// context can no longer be applied.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    #[must_use]
    pub const fn state(&self) -> &SourceState<T> {
        &self.state
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, SourceState::Loading { .. })
    }

    /// Best available page: current data, or the retained previous page
    /// while loading or after a failure.
    #[must_use]
    pub const fn data(&self) -> Option<&PageResult<T>> {
        match &self.state {
            SourceState::Ready(page) => Some(page),
            SourceState::Loading { previous } | SourceState::Failed { previous, .. } => {
                previous.as_ref()
            }
            SourceState::Idle => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SourceState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for QuerySource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: Vec<u8>, current: u32, total: u32) -> PageResult<u8> {
        PageResult::new(items, current, total)
    }

    fn server_error(message: &str) -> ApiError {
        ApiError::Server {
            status: 500,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_starts_idle_with_no_data() {
        let source: QuerySource<u8> = QuerySource::new();
        assert!(!source.is_loading());
        assert!(source.data().is_none());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_successful_fetch_becomes_ready() {
        let mut source = QuerySource::new();
        let ticket = source.begin();
        assert!(source.is_loading());

        assert!(source.resolve(ticket, Ok(page(vec![1, 2], 1, 3))));
        assert!(!source.is_loading());
        assert_eq!(source.data().map(PageResult::len), Some(2));
    }

    #[test]
    fn test_previous_page_serves_as_placeholder_while_loading() {
        let mut source = QuerySource::new();
        let ticket = source.begin();
        source.resolve(ticket, Ok(page(vec![1], 1, 3)));

        let _ticket = source.begin();
        assert!(source.is_loading());
        // page 1 still visible while page 2 loads
        assert_eq!(source.data().map(|p| p.current_page), Some(1));
    }

    #[test]
    fn test_failure_keeps_last_good_page() {
        let mut source = QuerySource::new();
        let ticket = source.begin();
        source.resolve(ticket, Ok(page(vec![1], 1, 3)));

        let ticket = source.begin();
        source.resolve(ticket, Err(server_error("boom")));

        assert_eq!(source.error(), Some("boom"));
        assert_eq!(source.data().map(|p| p.current_page), Some(1));
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut source = QuerySource::new();
        let stale = source.begin();
        let fresh = source.begin();

        assert!(!source.resolve(stale, Ok(page(vec![9], 9, 9))));
        assert!(source.is_loading());

        assert!(source.resolve(fresh, Ok(page(vec![1], 1, 1))));
        assert_eq!(source.data().map(|p| p.current_page), Some(1));
    }

    #[test]
    fn test_invalidate_blocks_in_flight_resolution() {
        let mut source = QuerySource::new();
        let ticket = source.begin();
        source.invalidate();

        assert!(!source.resolve(ticket, Ok(page(vec![1], 1, 1))));
    }

    #[test]
    fn test_disable_clears_state_and_tickets() {
        let mut source = QuerySource::new();
        let ticket = source.begin();
        source.disable();

        assert!(!source.is_loading());
        assert!(source.data().is_none());
        assert!(!source.resolve(ticket, Ok(page(vec![1], 1, 1))));
    }
}
