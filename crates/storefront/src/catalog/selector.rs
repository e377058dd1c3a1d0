//! Active result-set selection.
//!
//! Exactly one of the three backing listings is authoritative at a time,
//! decided by precedence: an active filter beats category browsing, which
//! beats the plain listing. Typed/priced search deliberately ignores the
//! route category entirely.

use saffron_core::{FilterCriteria, PageResult, Product};

use super::source::QuerySource;

/// Which backing listing is currently authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Unfiltered default listing.
    Plain,
    /// Category-scoped listing from the route.
    Category,
    /// Free-text / price-filtered listing.
    Filtered,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::Category => "category",
            Self::Filtered => "filtered",
        };
        f.write_str(name)
    }
}

/// Route and filter state that determines the authoritative listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionContext {
    /// Category from the current route, if any. Empty strings are treated
    /// as absent.
    pub route_category: Option<String>,
    /// Current filter criteria.
    pub filter: FilterCriteria,
}

impl SelectionContext {
    /// Precedence: filter > category > plain.
    #[must_use]
    pub fn active_kind(&self) -> SourceKind {
        if self.filter.is_active() {
            SourceKind::Filtered
        } else if self
            .route_category
            .as_deref()
            .is_some_and(|c| !c.is_empty())
        {
            SourceKind::Category
        } else {
            SourceKind::Plain
        }
    }
}

/// Snapshot of the active listing for rendering.
///
/// Only the selected tier's own state is reported; another tier's data is
/// never borrowed as a placeholder while this one loads.
#[derive(Debug)]
pub struct Listing<'a> {
    /// The tier this snapshot came from.
    pub kind: SourceKind,
    /// Whether the active tier has a fetch in flight.
    pub loading: bool,
    /// Failure message of the active tier, if its last fetch failed.
    pub error: Option<&'a str>,
    /// Best available page of the active tier.
    pub result: Option<&'a PageResult<Product>>,
}

impl Listing<'_> {
    /// A loaded, error-free result with zero items: "no matches", distinct
    /// from both the loading and error states.
    #[must_use]
    pub fn is_no_matches(&self) -> bool {
        !self.loading && self.error.is_none() && self.result.is_some_and(PageResult::is_empty)
    }
}

/// Pick the authoritative source's output for the given context.
pub fn select<'a>(
    context: &SelectionContext,
    plain: &'a QuerySource<Product>,
    category: &'a QuerySource<Product>,
    filtered: &'a QuerySource<Product>,
) -> Listing<'a> {
    let kind = context.active_kind();
    let source = match kind {
        SourceKind::Plain => plain,
        SourceKind::Category => category,
        SourceKind::Filtered => filtered,
    };
    Listing {
        kind,
        loading: source.is_loading(),
        error: source.error(),
        result: source.data(),
    }
}
