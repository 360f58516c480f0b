//! Players service: behaviour tracking, identification and unlocked badges.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::{path_segment, ClientInner};
use crate::models::{Badge, Player, PlayerId};
use crate::{Error, Result};

/// Service for player operations.
///
/// # Example
///
/// ```no_run
/// use behave_rs::PlayerId;
/// use serde_json::json;
///
/// # async fn example(client: behave_rs::BehaveClient) -> behave_rs::Result<()> {
/// let player = PlayerId::new("user-42");
///
/// // Make the player known, with a few traits
/// client.players().identify(&player, Some(json!({ "name": "Ada" })), None).await?;
///
/// // Report a behaviour; the response lists anything it unlocked
/// let rewards = client.players().track(&player, "answered-question", None).await?;
/// println!("{rewards}");
/// # Ok(())
/// # }
/// ```
pub struct PlayersService {
    inner: Arc<ClientInner>,
}

impl PlayersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Track a behaviour taken by a player.
    ///
    /// `context` can carry anything the recipes need; it defaults to an
    /// empty object. The response may contain unlocked rewards (badges,
    /// points, missions) and is returned undecoded.
    pub async fn track(
        &self,
        player_id: &PlayerId,
        behaviour: &str,
        context: Option<Map<String, Value>>,
    ) -> Result<Value> {
        #[derive(Serialize)]
        struct Request<'a> {
            verb: &'a str,
            context: Map<String, Value>,
        }

        let player = require_player(player_id)?;
        if behaviour.trim().is_empty() {
            return Err(Error::config("behaviour must not be empty"));
        }

        self.inner
            .post(
                &format!("/players/{}/track", player),
                &Request {
                    verb: behaviour,
                    context: context.unwrap_or_default(),
                },
            )
            .await
    }

    /// Identify a player, storing optional traits.
    ///
    /// Common traits are `email` and `name`, but any JSON value is stored.
    /// `timestamp` backdates the identification.
    pub async fn identify(
        &self,
        player_id: &PlayerId,
        traits: Option<Value>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Player> {
        #[derive(Serialize)]
        struct Request {
            traits: Option<Value>,
            #[serde(
                with = "chrono::serde::ts_seconds_option",
                skip_serializing_if = "Option::is_none"
            )]
            timestamp: Option<DateTime<Utc>>,
        }

        let player = require_player(player_id)?;

        self.inner
            .post(
                &format!("/players/{}/identify", player),
                &Request { traits, timestamp },
            )
            .await
    }

    /// Get the badges a player has completed.
    pub async fn badges(&self, player_id: &PlayerId) -> Result<Vec<Badge>> {
        let player = require_player(player_id)?;

        let badges: Option<Vec<Badge>> = self
            .inner
            .get(&format!("/players/{}/badges", player))
            .await?;
        Ok(badges.unwrap_or_default())
    }
}

/// The player id as one percent-encoded path segment.
pub(crate) fn require_player(player_id: &PlayerId) -> Result<Cow<'_, str>> {
    path_segment("player id", player_id.as_str())
}
