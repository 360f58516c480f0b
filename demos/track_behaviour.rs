//! Identify a player, track a behaviour and list their badges.
//!
//! Run with: BEHAVE_API_TOKEN=... cargo run --example track_behaviour -- user-42 finished-tutorial

use serde_json::{json, Map};
use behave_rs::{BehaveClient, PlayerId};

#[tokio::main]
async fn main() -> behave_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let player = args
        .next()
        .map(PlayerId::new)
        .expect("usage: track_behaviour <player-id> <behaviour>");
    let behaviour = args.next().unwrap_or_else(|| "login".to_string());

    let client = BehaveClient::from_env()?;

    let identified = client
        .players()
        .identify(&player, Some(json!({ "name": "Demo Player" })), None)
        .await?;
    println!("Identified {:?}", identified.reference_id);

    let mut context = Map::new();
    context.insert("source".to_string(), json!("demo"));
    let rewards = client
        .players()
        .track(&player, &behaviour, Some(context))
        .await?;
    println!("Tracked '{behaviour}', rewards: {rewards}");

    let badges = client.players().badges(&player).await?;
    println!("\n{} badge(s):", badges.len());
    for badge in &badges {
        println!(
            "  - {} ({})",
            badge.name.as_deref().unwrap_or("unnamed"),
            badge.reference_id.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
