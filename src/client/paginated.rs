//! Page-by-page iteration over leaderboard results.
//!
//! Results endpoints return at most [`MAX_PAGE_SIZE`] items per call. This
//! module drives repeated calls to such an endpoint, one page at a time:
//!
//! - [`iterate`] runs a loop and hands every page to a callback.
//! - [`PageStream`] yields the same pages lazily as a `Stream`.
//!
//! Both share [`IterationState`], which decides when to stop:
//!
//! 1. the page came back empty, or
//! 2. the page is short (fewer items than `limit`: the resource is
//!    exhausted, so no extra round trip for a trailing empty page), or
//! 3. a cap (`max`) is set and has been reached. The page that crosses the
//!    cap is truncated at the end so exactly `max` items are delivered.
//!
//! Only the current page is held in memory. Pages are fetched strictly one
//! after another, and an error stops iteration without retrying.

use std::future::Future;
use std::ops::ControlFlow;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures_util::Stream;
use serde_json::{Map, Value};

use super::transport::path_segment;
use crate::models::{LeaderboardId, PlayerId, Positions};
use crate::{Error, Result};

/// Largest page the API will return.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = MAX_PAGE_SIZE;

/// Options for fetching or iterating results.
///
/// # Example
///
/// ```
/// use behave_rs::client::IterateOptions;
/// use behave_rs::models::Positions;
///
/// let options = IterateOptions::new()
///     .with_limit(50)
///     .with_max(120)
///     .with_positions(Positions::Absolute);
/// assert_eq!(options.page, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IterateOptions {
    /// First page to fetch (1-based)
    pub page: u32,
    /// Items per page, clamped to [`MAX_PAGE_SIZE`]
    pub limit: u32,
    /// Cap on the total number of items delivered; 0 means no cap
    pub max: u64,
    /// Context filter, forwarded as is
    pub context: Option<Map<String, Value>>,
    /// Restrict results to these players
    pub players: Option<Vec<PlayerId>>,
    /// How positions are reported
    pub positions: Positions,
}

impl Default for IterateOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            max: 0,
            context: None,
            players: None,
            positions: Positions::Relative,
        }
    }
}

impl IterateOptions {
    /// Options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first page to fetch.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Cap the total number of items delivered.
    pub fn with_max(mut self, max: u64) -> Self {
        self.max = max;
        self
    }

    /// Filter results by context.
    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    /// Restrict results to the given players.
    pub fn with_players(mut self, players: Vec<PlayerId>) -> Self {
        self.players = Some(players);
        self
    }

    /// Set how positions are reported.
    pub fn with_positions(mut self, positions: Positions) -> Self {
        self.positions = positions;
        self
    }

    /// Validate the options for `leaderboard_id`.
    ///
    /// Fails with [`Error::Config`] on an empty or dot-segment id, `page == 0` or
    /// `limit == 0`. A limit above [`MAX_PAGE_SIZE`] is clamped, and a
    /// limit above a non-zero `max` is lowered to `max`.
    pub fn into_request(self, leaderboard_id: &LeaderboardId) -> Result<PageRequest> {
        path_segment("leaderboard id", leaderboard_id.as_str())?;
        if self.page == 0 {
            return Err(Error::config("page numbers start at 1"));
        }
        if self.limit == 0 {
            return Err(Error::config("limit must be at least 1"));
        }

        let mut limit = self.limit.min(MAX_PAGE_SIZE);
        if self.max > 0 && u64::from(limit) > self.max {
            limit = self.max as u32;
        }

        Ok(PageRequest {
            leaderboard_id: leaderboard_id.clone(),
            page: self.page,
            limit,
            max_items: self.max,
            context: self.context,
            players: self.players,
            positions: self.positions,
        })
    }
}

/// A validated request for one page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// The leaderboard being read
    pub leaderboard_id: LeaderboardId,
    /// Page number (1-based)
    pub page: u32,
    /// Items per page, in `1..=MAX_PAGE_SIZE`
    pub limit: u32,
    /// Cap on total items delivered; 0 means no cap
    pub max_items: u64,
    /// Context filter
    pub context: Option<Map<String, Value>>,
    /// Player filter
    pub players: Option<Vec<PlayerId>>,
    /// Position mode
    pub positions: Positions,
}

impl PageRequest {
    /// Number of items before this page: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// One delivered page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in result order, possibly truncated by the cap
    pub items: Vec<T>,
    /// Page number (1-based)
    pub number: u32,
}

impl<T> Page<T> {
    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Bookkeeping for one iteration run.
///
/// Created from a [`PageRequest`], updated once per fetched page through
/// [`record`](Self::record), and finished when a stop condition is met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationState {
    page: u32,
    limit: u32,
    max_items: u64,
    total_fetched: u64,
    finished: bool,
}

impl IterationState {
    /// Start at the request's page.
    pub fn new(request: &PageRequest) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            max_items: request.max_items,
            total_fetched: 0,
            finished: false,
        }
    }

    /// The page to fetch next (or the last page fetched, once finished).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Position reached so far: `(page - 1) * limit` plus the items of the
    /// last page, never above the cap.
    pub fn total_fetched(&self) -> u64 {
        self.total_fetched
    }

    /// Returns `true` once no further page should be fetched.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stop without fetching another page.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Account for the items fetched for the current page.
    ///
    /// Returns the page to deliver, or `None` if nothing is left to deliver
    /// after applying the cap. Advances to the next page unless a stop
    /// condition holds.
    pub fn record<T>(&mut self, mut items: Vec<T>) -> Option<Page<T>> {
        let fetched = items.len() as u64;
        let number = self.page;
        let total = u64::from(number.saturating_sub(1)) * u64::from(self.limit) + fetched;
        let capped = self.max_items > 0 && total >= self.max_items;

        if self.max_items > 0 && total > self.max_items {
            let keep = fetched.saturating_sub(total - self.max_items);
            items.truncate(keep as usize);
        }
        self.total_fetched = if self.max_items > 0 {
            total.min(self.max_items)
        } else {
            total
        };

        if fetched == 0 || fetched < u64::from(self.limit) || capped {
            self.finished = true;
        } else {
            self.page += 1;
        }

        if items.is_empty() {
            None
        } else {
            Some(Page { items, number })
        }
    }
}

/// Something that can fetch a single page of results.
///
/// Fetching must not have side effects: the same request within one
/// iteration is expected to return the same items.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// The result type.
    type Item: Send;

    /// Fetch the items at `request.offset()`, at most `request.limit` of them.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Self::Item>>;
}

/// What an [`iterate`] run delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterationSummary {
    /// Pages handed to the callback
    pub pages: u32,
    /// Items handed to the callback
    pub items: u64,
    /// Whether the callback asked to stop
    pub stopped_by_callback: bool,
}

/// Fetch pages from `source` and hand each one to `on_page`.
///
/// `on_page` receives the page's items and its number, in page order, and
/// is never called with an empty page. Returning `ControlFlow::Break(())`
/// stops iteration after the current page.
///
/// The first fetch error is returned as is; pages already delivered stay
/// delivered.
///
/// # Example
///
/// ```no_run
/// use std::ops::ControlFlow;
/// use behave_rs::client::{iterate, IterateOptions};
/// use behave_rs::LeaderboardId;
///
/// # async fn example(client: behave_rs::BehaveClient) -> behave_rs::Result<()> {
/// let board = LeaderboardId::new("weekly-xp");
/// let request = IterateOptions::new().with_limit(100).into_request(&board)?;
/// let source = client.leaderboards().current_results();
///
/// iterate(&source, request, |results, page| {
///     println!("page {page}: {} results", results.len());
///     ControlFlow::Continue(())
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn iterate<S, F>(
    source: &S,
    mut request: PageRequest,
    mut on_page: F,
) -> Result<IterationSummary>
where
    S: PageSource + ?Sized,
    F: FnMut(Vec<S::Item>, u32) -> ControlFlow<()>,
{
    let mut state = IterationState::new(&request);
    let mut summary = IterationSummary::default();

    while !state.is_finished() {
        request.page = state.page();
        let items = source.fetch_page(&request).await?;
        tracing::debug!(
            leaderboard = %request.leaderboard_id,
            page = request.page,
            offset = request.offset(),
            count = items.len(),
            "fetched results page"
        );

        let Some(page) = state.record(items) else {
            continue;
        };

        summary.pages += 1;
        summary.items += page.items.len() as u64;
        if on_page(page.items, page.number).is_break() {
            summary.stopped_by_callback = true;
            state.finish();
        }
    }

    Ok(summary)
}

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type FetchFn<T> = Box<dyn Fn(PageRequest) -> BoxFuture<'static, Result<Vec<T>>> + Send + Sync>;

/// A stream that lazily fetches pages of results.
///
/// Each item is one non-empty [`Page`]. Stops under the same rules as
/// [`iterate`]; after an error it yields nothing further.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use behave_rs::client::IterateOptions;
/// use behave_rs::LeaderboardId;
///
/// # async fn example(client: behave_rs::BehaveClient) -> behave_rs::Result<()> {
/// let board = LeaderboardId::new("weekly-xp");
/// let mut pages = client
///     .leaderboards()
///     .results_stream(&board, IterateOptions::new().with_max(500))?;
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     println!("page {}: {} results", page.number, page.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct PageStream<T> {
    /// Function to fetch one page.
    fetch_page: FetchFn<T>,
    /// Request template; its page is updated before each fetch.
    request: PageRequest,
    state: IterationState,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<Vec<T>>>>,
}

impl<T: Send + 'static> PageStream<T> {
    /// Create a stream from a page-fetching function.
    pub fn new<F>(request: PageRequest, fetch_page: F) -> Self
    where
        F: Fn(PageRequest) -> BoxFuture<'static, Result<Vec<T>>> + Send + Sync + 'static,
    {
        let state = IterationState::new(&request);
        Self {
            fetch_page: Box::new(fetch_page),
            request,
            state,
            pending_fetch: None,
        }
    }

    /// Create a stream over a shared [`PageSource`].
    pub fn from_source<S>(source: Arc<S>, request: PageRequest) -> Self
    where
        S: PageSource<Item = T> + 'static,
    {
        Self::new(request, move |request: PageRequest| {
            let source = source.clone();
            Box::pin(async move { source.fetch_page(&request).await })
        })
    }
}

impl<T> PageStream<T> {
    /// Current iteration bookkeeping.
    pub fn state(&self) -> &IterationState {
        &self.state
    }
}

impl<T> Stream for PageStream<T> {
    type Item = Result<Page<T>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(items)) => {
                        this.pending_fetch = None;
                        if let Some(page) = this.state.record(items) {
                            return Poll::Ready(Some(Ok(page)));
                        }
                        // Nothing to deliver means the state is finished.
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.state.finish();
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => {
                        return Poll::Pending;
                    }
                }
            }

            if this.state.is_finished() {
                return Poll::Ready(None);
            }

            this.request.page = this.state.page();
            this.pending_fetch = Some((this.fetch_page)(this.request.clone()));
        }
    }
}

impl<T> Unpin for PageStream<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use std::sync::Mutex;

    /// Serves pages of sequential numbers with the given sizes.
    struct ScriptedSource {
        sizes: Vec<usize>,
        fail_on_page: Option<u32>,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl ScriptedSource {
        fn new(sizes: &[usize]) -> Self {
            Self {
                sizes: sizes.to_vec(),
                fail_on_page: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, page: u32) -> Self {
            self.fail_on_page = Some(page);
            self
        }

        fn fetched_pages(&self) -> Vec<u32> {
            self.requests.lock().unwrap().iter().map(|r| r.page).collect()
        }
    }

    #[async_trait]
    impl PageSource for ScriptedSource {
        type Item = u64;

        async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<u64>> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail_on_page == Some(request.page) {
                return Err(Error::NotFound("leaderboard vanished".into()));
            }
            let size = self
                .sizes
                .get(request.page as usize - 1)
                .copied()
                .unwrap_or(0);
            let start = request.offset();
            Ok((start..start + size as u64).collect())
        }
    }

    fn request(options: IterateOptions) -> PageRequest {
        options.into_request(&LeaderboardId::new("weekly")).unwrap()
    }

    async fn collect(source: &ScriptedSource, options: IterateOptions) -> Vec<(u32, Vec<u64>)> {
        let mut seen = Vec::new();
        iterate(source, request(options), |items, page| {
            seen.push((page, items));
            ControlFlow::Continue(())
        })
        .await
        .unwrap();
        seen
    }

    fn counts(seen: &[(u32, Vec<u64>)]) -> Vec<usize> {
        seen.iter().map(|(_, items)| items.len()).collect()
    }

    #[tokio::test]
    async fn test_stops_after_short_page() {
        let source = ScriptedSource::new(&[10, 10, 10, 4]);
        let seen = collect(&source, IterateOptions::new().with_limit(10)).await;

        assert_eq!(counts(&seen), vec![10, 10, 10, 4]);
        assert_eq!(seen.iter().map(|(p, _)| *p).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(source.fetched_pages(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_cap_truncates_last_page() {
        let source = ScriptedSource::new(&[5, 5, 5]);
        let seen = collect(&source, IterateOptions::new().with_limit(5).with_max(12)).await;

        assert_eq!(counts(&seen), vec![5, 5, 2]);
        // Truncation drops trailing items only.
        assert_eq!(seen[2].1, vec![10, 11]);
        assert_eq!(source.fetched_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_cap_on_page_boundary_stops_without_extra_fetch() {
        let source = ScriptedSource::new(&[5, 5, 5, 5]);
        let seen = collect(&source, IterateOptions::new().with_limit(5).with_max(10)).await;

        assert_eq!(counts(&seen), vec![5, 5]);
        assert_eq!(source.fetched_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_empty_first_page_never_calls_back() {
        let source = ScriptedSource::new(&[]);
        let mut calls = 0;
        let summary = iterate(&source, request(IterateOptions::new().with_limit(100)), |_, _| {
            calls += 1;
            ControlFlow::Continue(())
        })
        .await
        .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(summary, IterationSummary::default());
        assert_eq!(source.fetched_pages(), vec![1]);
    }

    #[tokio::test]
    async fn test_trailing_empty_page_is_not_delivered() {
        let source = ScriptedSource::new(&[3, 3]);
        let seen = collect(&source, IterateOptions::new().with_limit(3)).await;

        assert_eq!(counts(&seen), vec![3, 3]);
        assert_eq!(source.fetched_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_error_stops_iteration() {
        let source = ScriptedSource::new(&[5, 5, 5]).failing_on(2);
        let mut calls = 0;
        let result = iterate(&source, request(IterateOptions::new().with_limit(5)), |_, _| {
            calls += 1;
            ControlFlow::Continue(())
        })
        .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(calls, 1);
        assert_eq!(source.fetched_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_break_stops_fetching() {
        let source = ScriptedSource::new(&[5, 5, 5]);
        let summary = iterate(&source, request(IterateOptions::new().with_limit(5)), |_, page| {
            if page == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .await
        .unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(summary.items, 10);
        assert!(summary.stopped_by_callback);
        assert_eq!(source.fetched_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_starts_at_requested_page() {
        let source = ScriptedSource::new(&[4, 4, 4, 1]);
        let seen = collect(&source, IterateOptions::new().with_limit(4).with_page(3)).await;

        assert_eq!(seen.iter().map(|(p, _)| *p).collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(seen[0].1, vec![8, 9, 10, 11]);
    }

    #[tokio::test]
    async fn test_repeated_runs_match() {
        let source = ScriptedSource::new(&[7, 7, 2]);
        let options = IterateOptions::new().with_limit(7).with_max(15);
        let first = collect(&source, options.clone()).await;
        let second = collect(&source, options).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_stream_matches_iterate() {
        let source = Arc::new(ScriptedSource::new(&[5, 5, 5]));
        let stream = PageStream::from_source(
            source.clone(),
            request(IterateOptions::new().with_limit(5).with_max(12)),
        );

        let pages: Vec<Page<u64>> = stream.map(|page| page.unwrap()).collect().await;
        assert_eq!(pages.iter().map(|p| p.len()).collect::<Vec<_>>(), vec![5, 5, 2]);
        assert_eq!(pages[2].number, 3);
        assert_eq!(source.fetched_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_stream_ends_after_error() {
        let source = Arc::new(ScriptedSource::new(&[5, 5]).failing_on(2));
        let mut stream = PageStream::from_source(
            source.clone(),
            request(IterateOptions::new().with_limit(5)),
        );

        assert!(stream.next().await.unwrap().is_ok());
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
        assert!(stream.state().is_finished());
    }

    #[test]
    fn test_options_validation() {
        let board = LeaderboardId::new("weekly");
        assert!(IterateOptions::new().with_limit(0).into_request(&board).is_err());
        assert!(IterateOptions::new().with_page(0).into_request(&board).is_err());

        let err = IterateOptions::new()
            .into_request(&LeaderboardId::new(""))
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_limit_clamping() {
        let board = LeaderboardId::new("weekly");
        let request = IterateOptions::new().with_limit(5000).into_request(&board).unwrap();
        assert_eq!(request.limit, MAX_PAGE_SIZE);

        let request = IterateOptions::new().with_max(3).into_request(&board).unwrap();
        assert_eq!(request.limit, 3);

        let request = IterateOptions::new()
            .with_limit(20)
            .with_page(3)
            .into_request(&board)
            .unwrap();
        assert_eq!(request.offset(), 40);
    }

    #[test]
    fn test_state_when_start_is_past_cap() {
        let board = LeaderboardId::new("weekly");
        let request = IterateOptions::new()
            .with_limit(10)
            .with_page(3)
            .with_max(15)
            .into_request(&board)
            .unwrap();

        let mut state = IterationState::new(&request);
        assert_eq!(state.record(vec![1, 2, 3]), None);
        assert!(state.is_finished());
        assert_eq!(state.total_fetched(), 15);
    }
}
