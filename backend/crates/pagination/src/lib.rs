//! Page-number pagination primitives.
//!
//! List endpoints accept `limit` and `page` query parameters, skip
//! `limit * (page - 1)` records and answer with a [`Pagination`] envelope.
//! An empty collection always reports `page = 1` and `totalPages = 1`,
//! whatever page the client asked for.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageParams, PageRequest};
//!
//! let params = PageParams {
//!     limit: Some("10".to_owned()),
//!     page: Some("2".to_owned()),
//! };
//! let request = PageRequest::try_from(params).expect("valid page request");
//! assert_eq!(request.offset(), 10);
//!
//! let envelope = request.envelope(25);
//! assert_eq!(envelope.total_pages, 3);
//! ```

use serde::{Deserialize, Serialize};

/// Page size used when the client omits `limit`.
pub const DEFAULT_LIMIT: u32 = 10;
/// Page number used when the client omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Raw query parameters as received on the wire.
///
/// Values stay textual so malformed numbers surface as field-level
/// validation failures instead of extractor errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Requested page size.
    pub limit: Option<String>,
    /// Requested one-based page number.
    pub page: Option<String>,
}

/// Errors raised while interpreting page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `limit` is not a whole number within `1..=MAX_LIMIT`.
    #[error("limit must be a whole number between 1 and {max}")]
    InvalidLimit {
        /// Upper bound accepted for `limit`.
        max: u32,
    },
    /// `page` is not a whole number greater than zero.
    #[error("page must be a whole number greater than zero")]
    InvalidPage,
}

impl PageRequestError {
    /// Name of the query parameter that failed to parse.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidLimit { .. } => "limit",
            Self::InvalidPage => "page",
        }
    }
}

/// Validated page request.
///
/// ## Invariants
/// - `limit` lies within `1..=MAX_LIMIT`.
/// - `page` is at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl PageRequest {
    /// Build a page request, enforcing the range invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::InvalidLimit`] when `limit` is zero or
    /// above [`MAX_LIMIT`], and [`PageRequestError::InvalidPage`] when `page`
    /// is zero.
    pub const fn new(limit: u32, page: u32) -> Result<Self, PageRequestError> {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::InvalidLimit { max: MAX_LIMIT });
        }
        if page == 0 {
            return Err(PageRequestError::InvalidPage);
        }
        Ok(Self { limit, page })
    }

    /// Requested page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Requested one-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of records to skip before the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.limit) * u64::from(self.page.saturating_sub(1))
    }

    /// Build the envelope describing this request against `count` records.
    #[must_use]
    pub fn envelope(&self, count: u64) -> Pagination {
        Pagination::for_count(*self, count)
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: PageParams) -> Result<Self, Self::Error> {
        let limit = parse_or_default(value.limit.as_deref(), DEFAULT_LIMIT)
            .ok_or(PageRequestError::InvalidLimit { max: MAX_LIMIT })?;
        let page =
            parse_or_default(value.page.as_deref(), DEFAULT_PAGE).ok_or(PageRequestError::InvalidPage)?;
        Self::new(limit, page)
    }
}

/// Blank or missing values fall back to `default`; anything else must be a
/// whole number.
fn parse_or_default(raw: Option<&str>, default: u32) -> Option<u32> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(value) => value.parse().ok(),
    }
}

/// Pagination block returned next to list payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Page size applied to the query.
    pub limit: u32,
    /// Page number reported to the client.
    pub page: u32,
    /// Number of records matching the listing filter.
    pub count: u64,
    /// Number of pages needed to cover `count` records.
    pub total_pages: u64,
}

impl Pagination {
    /// Describe `request` against a collection of `count` records.
    ///
    /// An empty collection reports page one of one so clients never see a
    /// zero page count.
    #[must_use]
    pub fn for_count(request: PageRequest, count: u64) -> Self {
        if count == 0 {
            return Self {
                limit: request.limit,
                page: DEFAULT_PAGE,
                count: 0,
                total_pages: 1,
            };
        }
        Self {
            limit: request.limit,
            page: request.page,
            count,
            total_pages: count.div_ceil(u64::from(request.limit)),
        }
    }
}

/// One page of records together with its pagination block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page.
    pub data: Vec<T>,
    /// Pagination block describing the page.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Page for a collection of `count` records.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, count: u64) -> Self {
        Self {
            data,
            pagination: request.envelope(count),
        }
    }

    /// Page for an empty collection.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Convert each record while keeping the pagination block.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
