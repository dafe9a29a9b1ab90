//! Keyset pagination over store-assigned ids.
//!
//! Clients see only an opaque page token. Internally it is the id of the
//! last item already returned; the next page starts strictly after it, so
//! pages never overlap even while other tasks are inserted or deleted.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;

use crate::error::AppError;

/// Page size used when the request asks for 0.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Larger requests are clamped to this.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    after: i64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CursorPayload {
    after: i64,
}

impl Cursor {
    pub fn after(id: i64) -> Self {
        Self { after: id }
    }

    /// Id of the last item on the previous page.
    pub fn position(self) -> i64 {
        self.after
    }

    pub fn encode(self) -> String {
        let payload = serde_json::json!({ "after": self.after });
        URL_SAFE_NO_PAD.encode(payload.to_string())
    }

    pub fn decode(token: &str) -> Result<Self, AppError> {
        let invalid = || AppError::invalid_input("invalid page token");

        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| invalid().with_source(e))?;
        let payload: CursorPayload =
            serde_json::from_slice(&bytes).map_err(|e| invalid().with_source(e))?;
        if payload.after < 0 {
            return Err(invalid());
        }
        Ok(Cursor::after(payload.after))
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Cursor {
    type Err = AppError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Cursor::decode(token)
    }
}

/// A validated page request: how many items, and after which cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    after: Option<Cursor>,
}

impl PageRequest {
    /// Normalizes a raw page size and page token from the wire.
    ///
    /// `0` selects [`DEFAULT_PAGE_SIZE`], sizes above [`MAX_PAGE_SIZE`] are
    /// clamped and negative sizes are rejected. An empty token means the
    /// first page.
    pub fn new(page_size: i32, page_token: &str) -> Result<Self, AppError> {
        let limit = match page_size {
            n if n < 0 => return Err(AppError::invalid_input("page size must not be negative")),
            0 => DEFAULT_PAGE_SIZE,
            n => n.unsigned_abs().min(MAX_PAGE_SIZE),
        };
        let after = if page_token.trim().is_empty() {
            None
        } else {
            Some(page_token.parse::<Cursor>()?)
        };
        Ok(Self { limit, after })
    }

    #[cfg(test)]
    pub fn first(limit: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            after: None,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn after(&self) -> Option<Cursor> {
        self.after
    }

    /// One more than the page size, so the store reveals whether a next page
    /// exists without a second query.
    pub fn fetch_limit(&self) -> u32 {
        self.limit + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` exactly when no further items exist.
    pub next_cursor: Option<Cursor>,
    /// Matching items across all pages. Read alongside the page, not in the
    /// same snapshot, so it may lag concurrent writes.
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Builds a page from a lookahead fetch of up to `limit + 1` rows.
    pub fn from_lookahead<F>(
        mut rows: Vec<T>,
        request: &PageRequest,
        total_count: u64,
        position: F,
    ) -> Self
    where
        F: Fn(&T) -> i64,
    {
        let limit = request.limit() as usize;
        let has_more = rows.len() > limit;
        rows.truncate(limit);

        let next_cursor = if has_more {
            rows.last().map(|row| Cursor::after(position(row)))
        } else {
            None
        };

        Self {
            items: rows,
            next_cursor,
            total_count,
        }
    }

    /// The wire form of [`Page::next_cursor`]; empty on the last page.
    pub fn next_page_token(&self) -> String {
        self.next_cursor.map(Cursor::encode).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cursor_token_is_opaque_and_parses_back() {
        let token = Cursor::after(42).encode();
        assert!(!token.contains("42"));
        assert_eq!(token.parse::<Cursor>().unwrap().position(), 42);
    }

    #[test]
    fn test_garbage_tokens_are_invalid_input() {
        let not_json = URL_SAFE_NO_PAD.encode("after=3");
        let negative = URL_SAFE_NO_PAD.encode(r#"{"after":-1}"#);
        let extra = URL_SAFE_NO_PAD.encode(r#"{"after":1,"owner":"x"}"#);

        for token in ["%%%", "not base64!", not_json.as_str(), negative.as_str(), extra.as_str()] {
            let err = Cursor::decode(token).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "token {:?}", token);
        }
    }

    #[test]
    fn test_page_size_policy() {
        assert_eq!(PageRequest::new(0, "").unwrap().limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(1, "").unwrap().limit(), 1);
        assert_eq!(PageRequest::new(100, "").unwrap().limit(), 100);
        assert_eq!(PageRequest::new(5000, "").unwrap().limit(), MAX_PAGE_SIZE);
        assert_eq!(
            PageRequest::new(-1, "").unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_page_request_carries_cursor() {
        let token = Cursor::after(9).encode();
        let request = PageRequest::new(10, &token).unwrap();
        assert_eq!(request.after(), Some(Cursor::after(9)));
        assert_eq!(request.fetch_limit(), 11);
        assert_eq!(PageRequest::new(10, "").unwrap().after(), None);
    }

    #[test]
    fn test_lookahead_sets_next_cursor_only_when_more_remain() {
        let request = PageRequest::new(3, "").unwrap();

        let full = Page::from_lookahead(vec![1, 2, 3, 4], &request, 10, |id| *id);
        assert_eq!(full.items, vec![1, 2, 3]);
        assert_eq!(full.next_cursor, Some(Cursor::after(3)));
        assert!(!full.next_page_token().is_empty());

        let exact = Page::from_lookahead(vec![4, 5, 6], &request, 6, |id| *id);
        assert_eq!(exact.items.len(), 3);
        assert_eq!(exact.next_cursor, None);
        assert_eq!(exact.next_page_token(), "");

        let empty = Page::<i64>::from_lookahead(vec![], &request, 0, |id| *id);
        assert!(empty.items.is_empty());
        assert_eq!(empty.next_cursor, None);
    }
}
