//! API service modules for Behave endpoints.
//!
//! Each service provides methods for one area of the API and is obtained
//! from [`BehaveClient`](crate::BehaveClient).

mod badges;
mod leaderboards;
mod players;

pub use badges::BadgesService;
pub use leaderboards::{LeaderboardResults, LeaderboardsService, PlayerResultsQuery, ResultSet};
pub use players::PlayersService;
