//! Free-text and price filter criteria.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price ceiling used as the "no constraint" sentinel.
///
/// Matches the filter side nav's default slider position; a ceiling equal to
/// this value means the viewer has not touched the price control.
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Criteria for the attribute-filtered product listing.
///
/// The criteria are considered *active* - and take precedence over category
/// and plain listings - iff the title query is non-empty or the price ceiling
/// differs from [`DEFAULT_MAX_PRICE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Keyword / substring match against product titles. Empty = no constraint.
    pub title_query: String,
    /// Maximum price ceiling.
    pub max_price: Decimal,
}

impl FilterCriteria {
    /// Criteria with a title query and the default price ceiling.
    #[must_use]
    pub fn with_title(query: impl Into<String>) -> Self {
        Self {
            title_query: query.into(),
            ..Self::default()
        }
    }

    /// Criteria with a price ceiling and no title query.
    #[must_use]
    pub fn with_max_price(max_price: Decimal) -> Self {
        Self {
            title_query: String::new(),
            max_price,
        }
    }

    /// Whether these criteria should override category and plain listings.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.title_query.is_empty() || self.max_price != DEFAULT_MAX_PRICE
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            title_query: String::new(),
            max_price: DEFAULT_MAX_PRICE,
        }
    }
}
