//! Typed query model rendered to BSON at the repository boundary.
//!
//! Callers build [`Filter`] trees and [`FindQuery`] values instead of raw BSON
//! documents, keeping field names and operators in one tested place.

use bson::{Bson, Document, doc};

/// A query predicate selecting matching documents for read, update, or delete.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// Field equality.
    Eq(String, Bson),
    /// Field greater-than-or-equal comparison.
    Gte(String, Bson),
    /// Server-side regular expression match against a string field.
    Regex(String, String),
    /// All branches must match.
    And(Vec<Filter>),
    /// At least one branch must match.
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::Gte(field.into(), value.into())
    }

    pub fn regex(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Regex(field.into(), pattern.into())
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Self::And(filters)
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Self::Or(filters)
    }

    /// Renders the predicate as a MongoDB filter document.
    ///
    /// Single-branch `And`/`Or` collapse to the branch itself; empty
    /// combinators render as match-all.
    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::Eq(field, value) => doc! { field: value.clone() },
            Filter::Gte(field, value) => doc! { field: { "$gte": value.clone() } },
            Filter::Regex(field, pattern) => doc! { field: { "$regex": pattern.clone() } },
            Filter::And(branches) => Self::combine("$and", branches),
            Filter::Or(branches) => Self::combine("$or", branches),
        }
    }

    fn combine(operator: &str, branches: &[Filter]) -> Document {
        match branches {
            [] => Document::new(),
            [single] => single.to_document(),
            many => {
                let rendered: Vec<Bson> = many
                    .iter()
                    .map(|f| Bson::Document(f.to_document()))
                    .collect();
                doc! { operator: rendered }
            }
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::All
    }
}

/// Sort direction for a find query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_i32(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// A find request: predicate plus optional sort, limit, and skip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Filter,
    pub sort: Option<(String, SortOrder)>,
    pub limit: Option<i64>,
    pub skip: Option<u64>,
}

impl FindQuery {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Renders the sort specification, if any.
    pub fn sort_document(&self) -> Option<Document> {
        self.sort
            .as_ref()
            .map(|(field, order)| doc! { field: order.as_i32() })
    }
}

/// Pagination parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Validates pagination parameters and converts to skip/limit.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: 20
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and 500
    ///
    /// # Returns
    ///
    /// `(skip, limit)` tuple for find queries.
    pub fn validate_and_get_skip_limit(&self) -> Result<(u64, i64), String> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(20);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=500).contains(&page_size) {
            return Err("Page size must be between 1 and 500".to_string());
        }

        let skip = u64::from(page - 1) * u64::from(page_size);
        let limit = i64::from(page_size);

        Ok((skip, limit))
    }
}
