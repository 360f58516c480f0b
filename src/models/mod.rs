//! Data models for the Behave API.
//!
//! - [`primitives`] - Identifier newtypes (`PlayerId`, `LeaderboardId`)
//! - [`enums`] - Leaderboard settings and result position modes
//! - [`player`] - Player records
//! - [`badge`] - Badge definitions and creation requests
//! - [`leaderboard`] - Leaderboards, their create/update requests and results

pub mod primitives;
pub mod enums;
pub mod player;
pub mod badge;
pub mod leaderboard;

pub use primitives::*;
pub use enums::*;
pub use player::*;
pub use badge::*;
pub use leaderboard::*;
