use std::num::IntErrorKind;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::domain::product::Product;

/// Result cap applied when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 20;

/// Hard ceiling on the result cap. Larger requests are clamped, not rejected.
pub const MAX_LIMIT: usize = 100;

/// Filter parameters exactly as they arrive at the boundary.
///
/// Every field is an optional raw string so that a malformed value can be
/// coerced instead of failing query-string deserialization. All coercion
/// lives in [`ProductFilter::from_params`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilterParams {
    pub q: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "priceMin")]
    pub price_min: Option<String>,
    #[serde(rename = "priceMax")]
    pub price_max: Option<String>,
    pub limit: Option<String>,
}

/// A coerced, ready-to-run filter. All predicates are conjunctive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductFilter {
    /// Lowercased needle matched against name and tags. `None` skips the
    /// dimension.
    pub query: Option<String>,
    pub category: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub limit: usize,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self { query: None, category: None, price_min: None, price_max: None, limit: DEFAULT_LIMIT }
    }
}

impl ProductFilter {
    /// Coerces raw parameters into a runnable filter.
    ///
    /// Unusable values never produce an error: malformed price bounds leave
    /// that dimension unfiltered, a malformed or non-positive `limit` falls
    /// back to [`DEFAULT_LIMIT`], and an oversized `limit` clamps to
    /// [`MAX_LIMIT`]. Blank `q` and `category` are treated as absent.
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            query: normalized(params.q.as_deref()).map(|q| q.to_ascii_lowercase()),
            category: normalized(params.category.as_deref()).map(str::to_string),
            price_min: params.price_min.as_deref().and_then(parse_price),
            price_max: params.price_max.as_deref().and_then(parse_price),
            limit: coerce_limit(params.limit.as_deref()),
        }
    }

    /// Runs the filter over the catalog.
    ///
    /// Returns matches in catalog order, truncated to `limit`. Borrows the
    /// catalog immutably and allocates only the result vector, so concurrent
    /// callers need no coordination.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog.products().iter().filter(|product| self.matches(product)).take(self.limit).collect()
    }

    /// True when every supplied predicate holds for `product`.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(query) = &self.query {
            let in_name = product.name.to_ascii_lowercase().contains(query.as_str());
            let in_tags =
                product.tags.iter().any(|tag| tag.to_ascii_lowercase().contains(query.as_str()));
            if !in_name && !in_tags {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }

        if let Some(price_min) = self.price_min {
            if product.price < price_min {
                return false;
            }
        }

        if let Some(price_max) = self.price_max {
            if product.price > price_max {
                return false;
            }
        }

        true
    }
}

fn normalized(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_price(raw: &str) -> Option<Decimal> {
    raw.trim().parse::<Decimal>().ok()
}

fn coerce_limit(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };

    match raw.trim().parse::<i64>() {
        Ok(parsed) if parsed <= 0 => DEFAULT_LIMIT,
        Ok(parsed) => usize::try_from(parsed).map_or(MAX_LIMIT, |limit| limit.min(MAX_LIMIT)),
        // Numerals beyond i64 are oversized requests, not malformed ones.
        Err(error) if matches!(error.kind(), IntErrorKind::PosOverflow) => MAX_LIMIT,
        Err(_) => DEFAULT_LIMIT,
    }
}
