//! Enumeration types for the Behave API.
//!
//! Leaderboard settings travel as integer codes; the result position mode
//! travels as a lowercase string.

use serde::{Deserialize, Serialize};

/// What a leaderboard ranks players by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum LeaderboardType {
    /// Ranked by a reported score
    #[default]
    Score,
    /// Ranked by tracked behaviours
    Behavioural,
}

impl From<LeaderboardType> for u8 {
    fn from(value: LeaderboardType) -> Self {
        match value {
            LeaderboardType::Score => 0,
            LeaderboardType::Behavioural => 1,
        }
    }
}

impl TryFrom<u8> for LeaderboardType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LeaderboardType::Score),
            1 => Ok(LeaderboardType::Behavioural),
            other => Err(format!("unknown leaderboard type code {other}")),
        }
    }
}

/// How successive scores of a player are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum ScoreType {
    /// Keep the best score
    #[default]
    Max,
    /// Add scores together
    Sum,
}

impl From<ScoreType> for u8 {
    fn from(value: ScoreType) -> Self {
        match value {
            ScoreType::Max => 0,
            ScoreType::Sum => 1,
        }
    }
}

impl TryFrom<u8> for ScoreType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ScoreType::Max),
            1 => Ok(ScoreType::Sum),
            other => Err(format!("unknown score type code {other}")),
        }
    }
}

/// The period after which a leaderboard resets automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum TimeFrame {
    /// Never resets on its own; may be reset manually
    #[default]
    AllTime,
    /// Resets every day
    Daily,
    /// Resets every week
    Weekly,
    /// Resets every month
    Monthly,
}

impl TimeFrame {
    /// Returns `true` if the leaderboard can be reset through the API.
    ///
    /// Only all-time leaderboards accept a manual reset.
    pub fn is_manually_resettable(&self) -> bool {
        matches!(self, TimeFrame::AllTime)
    }
}

impl From<TimeFrame> for u8 {
    fn from(value: TimeFrame) -> Self {
        match value {
            TimeFrame::AllTime => 0,
            TimeFrame::Daily => 1,
            TimeFrame::Weekly => 2,
            TimeFrame::Monthly => 3,
        }
    }
}

impl TryFrom<u8> for TimeFrame {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TimeFrame::AllTime),
            1 => Ok(TimeFrame::Daily),
            2 => Ok(TimeFrame::Weekly),
            3 => Ok(TimeFrame::Monthly),
            other => Err(format!("unknown time frame code {other}")),
        }
    }
}

/// How result positions are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Positions {
    /// Positions relative to the filtered result set
    #[default]
    Relative,
    /// Positions within the whole leaderboard
    Absolute,
}
