//! Lazy pagination over TaskRouter list responses
//!
//! A list response looks like:
//!
//! ```text
//! {
//!   "meta": { "key": "workers", "next_page_url": "https://...&Page=1", ... },
//!   "workers": [ { ... }, { ... } ]
//! }
//! ```

use super::ClientError;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;

/// Position of the next page to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// The first page, built from the listing's own query
    First,
    /// An absolute `next_page_url` handed back by the API
    Url(String),
}

/// One decoded page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_url: Option<String>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a list response body
    pub fn from_json(mut body: serde_json::Value) -> Result<Self, ClientError> {
        let meta = body
            .get("meta")
            .ok_or_else(|| ClientError::Decode("list response has no 'meta'".to_string()))?;

        let key = meta
            .get("key")
            .and_then(|k| k.as_str())
            .ok_or_else(|| ClientError::Decode("list response has no 'meta.key'".to_string()))?
            .to_string();

        let next_page_url = meta
            .get("next_page_url")
            .and_then(|u| u.as_str())
            .filter(|u| !u.is_empty())
            .map(|u| u.to_string());

        let items = match body.get_mut(&key).map(serde_json::Value::take) {
            Some(array) => serde_json::from_value(array)?,
            None => {
                return Err(ClientError::Decode(format!(
                    "list response has no '{}' array",
                    key
                )))
            }
        };

        Ok(Self {
            items,
            next_page_url,
        })
    }
}

type FetchPage<'a, T> = Box<dyn FnMut(&PageCursor) -> Result<Page<T>, ClientError> + 'a>;

/// Iterator that yields records page by page
///
/// A page is requested only once the previous one is drained, so taking the
/// first element costs exactly one request. After an error the pager is
/// exhausted.
pub struct Pager<'a, T> {
    fetch: FetchPage<'a, T>,
    cursor: Option<PageCursor>,
    buffered: VecDeque<T>,
}

impl<'a, T> Pager<'a, T> {
    pub fn new(fetch: impl FnMut(&PageCursor) -> Result<Page<T>, ClientError> + 'a) -> Self {
        Self {
            fetch: Box::new(fetch),
            cursor: Some(PageCursor::First),
            buffered: VecDeque::new(),
        }
    }
}

impl<T> Iterator for Pager<'_, T> {
    type Item = Result<T, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.pop_front() {
                return Some(Ok(item));
            }

            let cursor = self.cursor.take()?;
            match (self.fetch)(&cursor) {
                Ok(page) => {
                    self.cursor = page.next_page_url.map(PageCursor::Url);
                    self.buffered.extend(page.items);
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
