//! Leaderboard and leaderboard result models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{LeaderboardType, ScoreType, TimeFrame};
use super::primitives::LeaderboardId;

/// A leaderboard as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Behave's internal id
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Reference id chosen at creation
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Ranking type
    #[serde(default, rename = "type")]
    pub leaderboard_type: Option<LeaderboardType>,
    /// How scores are combined
    #[serde(default, rename = "scoreType")]
    pub score_type: Option<ScoreType>,
    /// Automatic reset period
    #[serde(default, rename = "timeFrame")]
    pub time_frame: Option<TimeFrame>,
    /// Rewards attached to positions
    #[serde(default)]
    pub rewards: Option<Vec<Value>>,
    /// Free-form metadata
    #[serde(default)]
    pub metadata: Option<Value>,
    /// Whether the leaderboard accepts scores
    #[serde(default)]
    pub active: Option<bool>,
    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Leaderboard {
    /// The identifier to use for follow-up calls, preferring the reference id.
    pub fn leaderboard_id(&self) -> Option<LeaderboardId> {
        self.reference_id
            .as_deref()
            .or(self.id.as_deref())
            .map(LeaderboardId::new)
    }
}

/// Request body for creating a leaderboard.
///
/// Use [`NewLeaderboard::builder`] to construct one.
///
/// # Example
///
/// ```
/// use behave_rs::models::{NewLeaderboard, ScoreType, TimeFrame};
///
/// let leaderboard = NewLeaderboard::builder("Weekly XP", "weekly-xp")
///     .score_type(ScoreType::Sum)
///     .time_frame(TimeFrame::Weekly)
///     .build()
///     .unwrap();
/// assert_eq!(leaderboard.reference_id, "weekly-xp");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct NewLeaderboard {
    /// Display name
    pub name: String,
    /// Unique reference id, required when creating from an SDK
    pub reference_id: String,
    /// Ranking type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub leaderboard_type: Option<LeaderboardType>,
    /// How scores are combined
    #[serde(rename = "scoreType", skip_serializing_if = "Option::is_none")]
    pub score_type: Option<ScoreType>,
    /// Automatic reset period
    #[serde(rename = "timeFrame", skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<TimeFrame>,
    /// Rewards attached to positions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Vec<Value>>,
    /// Free-form metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Whether the leaderboard accepts scores
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl NewLeaderboard {
    /// Start building a leaderboard with its two required fields.
    pub fn builder(
        name: impl Into<String>,
        reference_id: impl Into<String>,
    ) -> NewLeaderboardBuilder {
        NewLeaderboardBuilder {
            name: name.into(),
            reference_id: reference_id.into(),
            update: LeaderboardUpdate::default(),
        }
    }
}

/// Builder for [`NewLeaderboard`].
#[derive(Debug, Clone)]
pub struct NewLeaderboardBuilder {
    name: String,
    reference_id: String,
    update: LeaderboardUpdate,
}

impl NewLeaderboardBuilder {
    /// Set the ranking type.
    pub fn leaderboard_type(mut self, leaderboard_type: LeaderboardType) -> Self {
        self.update.leaderboard_type = Some(leaderboard_type);
        self
    }

    /// Set how scores are combined.
    pub fn score_type(mut self, score_type: ScoreType) -> Self {
        self.update.score_type = Some(score_type);
        self
    }

    /// Set the automatic reset period.
    pub fn time_frame(mut self, time_frame: TimeFrame) -> Self {
        self.update.time_frame = Some(time_frame);
        self
    }

    /// Set the position rewards.
    pub fn rewards(mut self, rewards: Vec<Value>) -> Self {
        self.update.rewards = Some(rewards);
        self
    }

    /// Set free-form metadata.
    pub fn metadata(mut self, metadata: Value) -> Self {
        self.update.metadata = Some(metadata);
        self
    }

    /// Activate or deactivate the leaderboard.
    pub fn active(mut self, active: bool) -> Self {
        self.update.active = Some(active);
        self
    }

    /// Build the request, validating required fields.
    pub fn build(self) -> crate::Result<NewLeaderboard> {
        if self.name.trim().is_empty() {
            return Err(crate::Error::Config("leaderboard name is required".to_string()));
        }
        if self.reference_id.trim().is_empty() {
            return Err(crate::Error::Config(
                "leaderboard reference_id is required".to_string(),
            ));
        }

        let update = self.update;
        Ok(NewLeaderboard {
            name: self.name,
            reference_id: self.reference_id,
            leaderboard_type: update.leaderboard_type,
            score_type: update.score_type,
            time_frame: update.time_frame,
            rewards: update.rewards,
            metadata: update.metadata,
            active: update.active,
        })
    }
}

/// Partial update of a leaderboard. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeaderboardUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New reference id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    /// New ranking type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub leaderboard_type: Option<LeaderboardType>,
    /// New score combination
    #[serde(rename = "scoreType", skip_serializing_if = "Option::is_none")]
    pub score_type: Option<ScoreType>,
    /// New reset period
    #[serde(rename = "timeFrame", skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<TimeFrame>,
    /// New position rewards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Vec<Value>>,
    /// New metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// New active flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl LeaderboardUpdate {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.reference_id.is_none()
            && self.leaderboard_type.is_none()
            && self.score_type.is_none()
            && self.time_frame.is_none()
            && self.rewards.is_none()
            && self.metadata.is_none()
            && self.active.is_none()
    }
}

/// One player's standing on a leaderboard.
///
/// Only the common fields are modeled; anything else the API sends is kept
/// in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResult {
    /// Position on the leaderboard (1-based)
    #[serde(default)]
    pub position: Option<u64>,
    /// Current score
    #[serde(default)]
    pub score: Option<f64>,
    /// The player this result belongs to
    #[serde(default)]
    pub player: Option<Value>,
    /// The player id, when sent flat
    #[serde(default, alias = "playerId")]
    pub player_id: Option<String>,
    /// The leaderboard this result belongs to
    #[serde(default, alias = "leaderboardId")]
    pub leaderboard_id: Option<String>,
    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
