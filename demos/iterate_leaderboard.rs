//! Walk a leaderboard page by page.
//!
//! Prints the top results of a leaderboard, then streams its previous
//! (archived) period.
//!
//! Run with: BEHAVE_API_TOKEN=... cargo run --example iterate_leaderboard -- weekly-xp

use std::ops::ControlFlow;

use futures_util::StreamExt;
use behave_rs::client::IterateOptions;
use behave_rs::{BehaveClient, LeaderboardId};

#[tokio::main]
async fn main() -> behave_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let board = std::env::args()
        .nth(1)
        .map(LeaderboardId::new)
        .expect("usage: iterate_leaderboard <leaderboard-reference-id>");

    let client = BehaveClient::from_env()?;

    // Top 250, 100 per page
    println!("=== {} (current) ===", board);
    let options = IterateOptions::new().with_limit(100).with_max(250);
    let summary = client
        .leaderboards()
        .iterate_results(&board, options, |results, page| {
            println!("-- page {page}");
            for result in &results {
                println!(
                    "  #{:<5} {:>10} {}",
                    result.position.unwrap_or_default(),
                    result.score.unwrap_or_default(),
                    result.player_id.as_deref().unwrap_or("?")
                );
            }
            ControlFlow::Continue(())
        })
        .await?;
    println!("{} results over {} page(s)", summary.items, summary.pages);

    println!("\n=== {} (previous) ===", board);
    let mut pages = client
        .leaderboards()
        .previous_results_stream(&board, IterateOptions::new().with_limit(50).with_max(100))?;
    while let Some(page) = pages.next().await {
        let page = page?;
        println!("-- page {}: {} results", page.number, page.len());
    }

    Ok(())
}
