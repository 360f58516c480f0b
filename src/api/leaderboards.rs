//! Leaderboards service: management, results and paginated iteration.

use std::borrow::Cow;
use std::ops::ControlFlow;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use super::players::require_player;
use crate::client::paginated::{
    iterate, IterateOptions, IterationSummary, PageRequest, PageSource, PageStream,
};
use crate::client::{path_segment, ApiRequest, ClientInner};
use crate::models::{
    Leaderboard, LeaderboardId, LeaderboardResult, LeaderboardUpdate, NewLeaderboard, PlayerId,
    Positions,
};
use crate::{Error, Result};

/// Which results of a leaderboard to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultSet {
    /// The running period
    Current,
    /// The last archived period
    Previous,
}

impl ResultSet {
    fn path(self, leaderboard_id: &LeaderboardId) -> Result<String> {
        let leaderboard = require_leaderboard(leaderboard_id)?;
        Ok(match self {
            ResultSet::Current => format!("/leaderboards/{}/results", leaderboard),
            ResultSet::Previous => format!("/leaderboards/{}/results/prev", leaderboard),
        })
    }
}

/// The results endpoint of every leaderboard, as a [`PageSource`].
///
/// Obtained from [`LeaderboardsService::current_results`] or
/// [`LeaderboardsService::previous_results`].
pub struct LeaderboardResults {
    inner: Arc<ClientInner>,
    set: ResultSet,
}

impl LeaderboardResults {
    /// Which result set this source reads.
    pub fn result_set(&self) -> ResultSet {
        self.set
    }
}

#[async_trait]
impl PageSource for LeaderboardResults {
    type Item = LeaderboardResult;

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<LeaderboardResult>> {
        #[derive(Serialize)]
        struct Filters<'a> {
            context: Option<&'a Map<String, Value>>,
            players: Option<&'a [PlayerId]>,
            positions: Positions,
        }

        let filters = Filters {
            context: request.context.as_ref(),
            players: request.players.as_deref(),
            positions: request.positions,
        };

        let path = self.set.path(&request.leaderboard_id)?;
        let api_request = ApiRequest::new(Method::POST, path)
            .with_query("offset", request.offset())
            .with_query("limit", request.limit)
            .with_body(serde_json::to_value(&filters)?);

        let results: Option<Vec<LeaderboardResult>> = self.inner.execute(api_request).await?;
        Ok(results.unwrap_or_default())
    }
}

/// Filters for [`LeaderboardsService::results_for_player`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerResultsQuery {
    /// Only these leaderboards (all of them when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaderboards: Option<Vec<LeaderboardId>>,
    /// Maximum number of results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Service for leaderboard operations.
///
/// # Example
///
/// ```no_run
/// use std::ops::ControlFlow;
/// use behave_rs::client::IterateOptions;
/// use behave_rs::LeaderboardId;
///
/// # async fn example(client: behave_rs::BehaveClient) -> behave_rs::Result<()> {
/// let board = LeaderboardId::new("weekly-xp");
///
/// // Top 3 only
/// let podium = client
///     .leaderboards()
///     .fetch_results(&board, IterateOptions::new().with_max(3))
///     .await?;
///
/// // Walk the whole leaderboard, 200 results at a time
/// client
///     .leaderboards()
///     .iterate_results(&board, IterateOptions::new().with_limit(200), |results, page| {
///         println!("page {page}: {} results", results.len());
///         ControlFlow::Continue(())
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct LeaderboardsService {
    inner: Arc<ClientInner>,
}

impl LeaderboardsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Page source over current results.
    pub fn current_results(&self) -> LeaderboardResults {
        self.results_source(ResultSet::Current)
    }

    /// Page source over previous (archived) results.
    pub fn previous_results(&self) -> LeaderboardResults {
        self.results_source(ResultSet::Previous)
    }

    fn results_source(&self, set: ResultSet) -> LeaderboardResults {
        LeaderboardResults {
            inner: self.inner.clone(),
            set,
        }
    }

    /// Fetch one page of current results.
    ///
    /// `options.page` selects the page; with a non-zero `options.max` the
    /// page size is lowered to at most `max`.
    pub async fn fetch_results(
        &self,
        leaderboard_id: &LeaderboardId,
        options: IterateOptions,
    ) -> Result<Vec<LeaderboardResult>> {
        let request = options.into_request(leaderboard_id)?;
        self.current_results().fetch_page(&request).await
    }

    /// Fetch one page of previous results.
    pub async fn fetch_previous_results(
        &self,
        leaderboard_id: &LeaderboardId,
        options: IterateOptions,
    ) -> Result<Vec<LeaderboardResult>> {
        let request = options.into_request(leaderboard_id)?;
        self.previous_results().fetch_page(&request).await
    }

    /// Iterate over current results page by page.
    ///
    /// See [`iterate`](crate::client::iterate) for the stop rules.
    pub async fn iterate_results<F>(
        &self,
        leaderboard_id: &LeaderboardId,
        options: IterateOptions,
        on_page: F,
    ) -> Result<IterationSummary>
    where
        F: FnMut(Vec<LeaderboardResult>, u32) -> ControlFlow<()>,
    {
        let request = options.into_request(leaderboard_id)?;
        iterate(&self.current_results(), request, on_page).await
    }

    /// Iterate over previous results page by page.
    pub async fn iterate_previous_results<F>(
        &self,
        leaderboard_id: &LeaderboardId,
        options: IterateOptions,
        on_page: F,
    ) -> Result<IterationSummary>
    where
        F: FnMut(Vec<LeaderboardResult>, u32) -> ControlFlow<()>,
    {
        let request = options.into_request(leaderboard_id)?;
        iterate(&self.previous_results(), request, on_page).await
    }

    /// Stream current results page by page.
    pub fn results_stream(
        &self,
        leaderboard_id: &LeaderboardId,
        options: IterateOptions,
    ) -> Result<PageStream<LeaderboardResult>> {
        let request = options.into_request(leaderboard_id)?;
        Ok(PageStream::from_source(Arc::new(self.current_results()), request))
    }

    /// Stream previous results page by page.
    pub fn previous_results_stream(
        &self,
        leaderboard_id: &LeaderboardId,
        options: IterateOptions,
    ) -> Result<PageStream<LeaderboardResult>> {
        let request = options.into_request(leaderboard_id)?;
        Ok(PageStream::from_source(Arc::new(self.previous_results()), request))
    }

    /// Get one player's current result on a leaderboard.
    ///
    /// Positions are absolute. Returns `None` if the player has no result.
    pub async fn fetch_result_for_player(
        &self,
        leaderboard_id: &LeaderboardId,
        player_id: &PlayerId,
        context: Option<Map<String, Value>>,
    ) -> Result<Option<LeaderboardResult>> {
        require_player(player_id)?;

        let mut options = IterateOptions::new()
            .with_players(vec![player_id.clone()])
            .with_positions(Positions::Absolute);
        options.context = context;

        let results = self.fetch_results(leaderboard_id, options).await?;
        Ok(results.into_iter().next())
    }

    /// Get a player's results across leaderboards (all of them by default).
    pub async fn results_for_player(
        &self,
        player_id: &PlayerId,
        query: PlayerResultsQuery,
    ) -> Result<Vec<LeaderboardResult>> {
        #[derive(Serialize)]
        struct Request<'a> {
            player_id: &'a PlayerId,
            #[serde(flatten)]
            query: PlayerResultsQuery,
        }

        require_player(player_id)?;

        let results: Option<Vec<LeaderboardResult>> = self
            .inner
            .post("/leaderboards/player-results", &Request { player_id, query })
            .await?;
        Ok(results.unwrap_or_default())
    }

    /// Create a new leaderboard.
    pub async fn create(&self, leaderboard: NewLeaderboard) -> Result<Leaderboard> {
        self.inner.post("/leaderboards", &leaderboard).await
    }

    /// Update a leaderboard.
    ///
    /// Returns the updated leaderboard when the API sends it back.
    pub async fn update(
        &self,
        leaderboard_id: &LeaderboardId,
        update: LeaderboardUpdate,
    ) -> Result<Option<Leaderboard>> {
        let leaderboard = require_leaderboard(leaderboard_id)?;
        if update.is_empty() {
            return Err(Error::config("leaderboard update has no fields set"));
        }

        self.inner
            .put(&format!("/leaderboards/{}", leaderboard), &update)
            .await
    }

    /// Reset a leaderboard. This cannot be undone; previous results are
    /// archived and remain readable through the previous-results calls.
    ///
    /// Only all-time leaderboards can be reset manually.
    pub async fn reset(&self, leaderboard_id: &LeaderboardId) -> Result<()> {
        let leaderboard = require_leaderboard(leaderboard_id)?;
        let _: Value = self
            .inner
            .get(&format!("/leaderboards/{}/reset", leaderboard))
            .await?;
        Ok(())
    }

    /// Delete a leaderboard. This cannot be undone.
    pub async fn delete(&self, leaderboard_id: &LeaderboardId) -> Result<()> {
        let leaderboard = require_leaderboard(leaderboard_id)?;
        let _: Value = self
            .inner
            .delete(&format!("/leaderboards/{}", leaderboard))
            .await?;
        Ok(())
    }
}

fn require_leaderboard(leaderboard_id: &LeaderboardId) -> Result<Cow<'_, str>> {
    path_segment("leaderboard id", leaderboard_id.as_str())
}
