//! Paginated listings
//!
//! A [`PageSequence`] turns a multi-page remote listing into one lazy,
//! forward-only sequence. Nothing is fetched until the first page or item is
//! asked for, each continuation token is spent exactly once, and a failed
//! fetch ends the sequence after surfacing its error.
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//!
//! let disks: Vec<Disk> = client.list_by_resource_group("rg")?.into_stream().try_collect().await?;
//! ```

use crate::blocking::block_on;
use crate::error::{CoreError, Result};
use crate::http::{API_VERSION, Invoker, Method, RawResponse, Request, ensure_query_param};
use futures::Stream;
use futures::future::BoxFuture;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, trace};

/// One fetched slice of a collection
#[derive(Debug, Clone)]
pub struct Page<T> {
    items: Vec<T>,
    continuation_token: Option<String>,
    raw_response: RawResponse,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, continuation_token: Option<String>, raw_response: RawResponse) -> Self {
        Self {
            items,
            continuation_token,
            raw_response,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Token for the next page; `None` on the last page
    pub fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    pub fn raw_response(&self) -> &RawResponse {
        &self.raw_response
    }
}

type FetchPage<T> = Box<dyn FnMut(Option<String>) -> BoxFuture<'static, Result<Page<T>>> + Send>;

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// A lazy, single-pass sequence of pages
pub struct PageSequence<T> {
    fetch: FetchPage<T>,
    cursor: Cursor,
    buffered: VecDeque<T>,
    consumed: HashSet<String>,
    pages_fetched: usize,
}

impl<T: Send + 'static> PageSequence<T> {
    /// Build a sequence from a page fetcher
    ///
    /// `fetch(None)` must produce the first page and `fetch(Some(token))` the
    /// page that `token` points at.
    pub fn new<F, Fut>(mut fetch: F) -> Self
    where
        F: FnMut(Option<String>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Page<T>>> + Send + 'static,
    {
        Self {
            fetch: Box::new(move |token| Box::pin(fetch(token))),
            cursor: Cursor::Start,
            buffered: VecDeque::new(),
            consumed: HashSet::new(),
            pages_fetched: 0,
        }
    }

    /// Number of page requests issued so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// True once no further items or pages will be produced
    pub fn is_done(&self) -> bool {
        matches!(self.cursor, Cursor::Done) && self.buffered.is_empty()
    }

    /// Fetch the next page
    ///
    /// Returns `Ok(None)` after the last page, after an error, and on every
    /// later call. A page with no items but a token is a normal page.
    /// Items already pulled through [`next_item`](Self::next_item) are not
    /// repeated here.
    pub async fn next_page(&mut self) -> Result<Option<Page<T>>> {
        let token = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
            Cursor::Done => return Ok(None),
        };

        trace!(page = self.pages_fetched + 1, has_token = token.is_some(), "Fetching page");
        if let Some(token) = &token {
            self.consumed.insert(token.clone());
        }
        let page = (self.fetch)(token).await?;
        self.pages_fetched += 1;

        if let Some(next) = page.continuation_token() {
            if self.consumed.contains(next) {
                return Err(CoreError::UnexpectedResponseShape(format!(
                    "service returned an already consumed continuation token: {next}"
                )));
            }
            self.cursor = Cursor::Next(next.to_string());
        }

        debug!(
            page = self.pages_fetched,
            items = page.items().len(),
            more = page.continuation_token().is_some(),
            "Fetched page"
        );
        Ok(Some(page))
    }

    /// Next item, fetching the next page only when the buffered one is used up
    pub async fn next_item(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(item) = self.buffered.pop_front() {
                return Ok(Some(item));
            }
            match self.next_page().await? {
                Some(page) => self.buffered.extend(page.into_items()),
                None => return Ok(None),
            }
        }
    }

    /// Drain the whole sequence into a `Vec`
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next_item().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Item view as a `Stream`
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + Send {
        futures::stream::try_unfold(self, |mut sequence| async move {
            Ok(sequence.next_item().await?.map(|item| (item, sequence)))
        })
    }

    /// Page view as a `Stream`
    pub fn into_page_stream(self) -> impl Stream<Item = Result<Page<T>>> + Send {
        futures::stream::try_unfold(self, |mut sequence| async move {
            Ok(sequence.next_page().await?.map(|page| (page, sequence)))
        })
    }

    /// Item view as a blocking iterator
    pub fn blocking_items(self) -> BlockingItems<T> {
        BlockingItems {
            sequence: self,
            finished: false,
        }
    }

    /// Page view as a blocking iterator
    pub fn blocking_pages(self) -> BlockingPages<T> {
        BlockingPages {
            sequence: self,
            finished: false,
        }
    }
}

/// Blocking item iterator over a [`PageSequence`]
pub struct BlockingItems<T> {
    sequence: PageSequence<T>,
    finished: bool,
}

impl<T: Send + 'static> Iterator for BlockingItems<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match block_on(self.sequence.next_item()).and_then(|r| r) {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Blocking page iterator over a [`PageSequence`]
pub struct BlockingPages<T> {
    sequence: PageSequence<T>,
    finished: bool,
}

impl<T: Send + 'static> Iterator for BlockingPages<T> {
    type Item = Result<Page<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match block_on(self.sequence.next_page()).and_then(|r| r) {
            Ok(Some(page)) => Some(Ok(page)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

#[derive(Deserialize)]
struct ListEnvelope<T> {
    value: Vec<T>,
    #[serde(default, rename = "nextLink")]
    next_link: Option<String>,
}

/// Pages over a resource-management listing
///
/// Each response must be `{"value": [...], "nextLink": "..."}`; `nextLink` is
/// optional and an empty string counts as absent. Continuation requests are
/// GETs on `nextLink` (resolved against the first URL) that keep the first
/// request's headers and get `api-version` appended when the link lacks it.
pub fn next_link_pages<T>(
    invoker: Arc<dyn Invoker>,
    first: Request,
    api_version: Option<String>,
) -> PageSequence<T>
where
    T: DeserializeOwned + Send + 'static,
{
    PageSequence::new(move |token: Option<String>| {
        let invoker = invoker.clone();
        let first = first.clone();
        let api_version = api_version.clone();
        async move {
            let request = match token {
                None => first,
                Some(link) => {
                    let mut url = first.url().join(&link).map_err(|e| {
                        CoreError::UnexpectedResponseShape(format!("invalid nextLink '{link}': {e}"))
                    })?;
                    if let Some(version) = &api_version {
                        ensure_query_param(&mut url, API_VERSION, version);
                    }
                    Request::new(Method::GET, url).with_headers(first.headers().clone())
                }
            };

            let response = invoker.invoke(&request).await?.expect_status(&[200])?;
            let envelope: ListEnvelope<T> = response.json()?;
            let next_link = envelope.next_link.filter(|link| !link.trim().is_empty());
            Ok(Page::new(envelope.value, next_link, response))
        }
    })
}
