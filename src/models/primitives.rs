//! Primitive types and newtypes for type-safe API interactions.
//!
//! Player and leaderboard identifiers are both plain strings on the wire;
//! wrapping them keeps them from being swapped at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identifier of a player, as passed to `identify()`.
///
/// # Example
///
/// ```
/// use behave_rs::PlayerId;
///
/// let player = PlayerId::new("user-42");
/// assert_eq!(player.as_str(), "user-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the player ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PlayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A leaderboard identifier.
///
/// Either the leaderboard's id in Behave's database or the reference id
/// chosen when the leaderboard was created. The API resolves reference ids
/// first.
///
/// # Example
///
/// ```
/// use behave_rs::LeaderboardId;
///
/// let board = LeaderboardId::new("weekly-xp");
/// println!("Leaderboard: {}", board);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaderboardId(String);

impl LeaderboardId {
    /// Create a new leaderboard ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the leaderboard ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeaderboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LeaderboardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for LeaderboardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LeaderboardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A badge reference id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeId(String);

impl BadgeId {
    /// Create a new badge ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the badge ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BadgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
