//! # behave-rs
//!
//! An async Rust client for the Behave gamification API.
//!
//! This crate formats requests for Behave's REST endpoints, authenticates
//! them with your app token and decodes the responses into typed values.
//!
//! ## Features
//!
//! - **Players**: track behaviours, identify players, list unlocked badges
//! - **Badges**: create badge definitions
//! - **Leaderboards**: create, update, reset and delete leaderboards
//! - **Results**: fetch a page, fetch one player's result, or iterate over
//!   every page with an optional cap on the number of results
//! - **Pluggable transport**: requests go through a [`client::Transport`]
//!   trait, backed by `reqwest` by default
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use behave_rs::{BehaveClient, PlayerId};
//!
//! #[tokio::main]
//! async fn main() -> behave_rs::Result<()> {
//!     let client = BehaveClient::new("your-app-token")?;
//!
//!     let player = PlayerId::new("user-42");
//!     let rewards = client.players().track(&player, "finished-tutorial", None).await?;
//!     println!("Unlocked: {rewards}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Iterating Results
//!
//! ```rust,no_run
//! use std::ops::ControlFlow;
//! use behave_rs::{BehaveClient, LeaderboardId};
//! use behave_rs::client::IterateOptions;
//!
//! #[tokio::main]
//! async fn main() -> behave_rs::Result<()> {
//!     let client = BehaveClient::from_env()?;
//!     let board = LeaderboardId::new("weekly-xp");
//!
//!     // Top 250 players, 100 per page: pages of 100, 100 and 50
//!     let options = IterateOptions::new().with_limit(100).with_max(250);
//!     client
//!         .leaderboards()
//!         .iterate_results(&board, options, |results, page| {
//!             for result in &results {
//!                 println!("#{:?} {:?}", result.position, result.score);
//!             }
//!             println!("-- end of page {page}");
//!             ControlFlow::Continue(())
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::ApiToken;
pub use client::{BehaveClient, ClientConfig};
pub use error::{Error, Result};
pub use models::{LeaderboardId, PlayerId};

/// Prelude module for convenient imports.
///
/// ```rust
/// use behave_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::ApiToken;
    pub use crate::client::{
        BehaveClient, ClientConfig, IterateOptions, IterationSummary, Page, PageSource,
        PageStream,
    };
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Badge, Leaderboard, LeaderboardId, LeaderboardResult, LeaderboardType,
        LeaderboardUpdate, NewBadge, NewLeaderboard, Player, PlayerId, Positions, ScoreType,
        TimeFrame,
    };
}
