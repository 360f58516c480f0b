//! Badges service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{Badge, NewBadge};
use crate::Result;

/// Service for badge definitions.
///
/// Badges a player has unlocked are listed through
/// [`PlayersService::badges`](crate::api::PlayersService::badges).
///
/// # Example
///
/// ```no_run
/// use behave_rs::models::NewBadge;
///
/// # async fn example(client: behave_rs::BehaveClient) -> behave_rs::Result<()> {
/// let badge = client
///     .badges()
///     .create(NewBadge::new("Early bird", "early-bird", "https://cdn.example.com/bird.png"))
///     .await?;
/// println!("created {:?}", badge.reference_id);
/// # Ok(())
/// # }
/// ```
pub struct BadgesService {
    inner: Arc<ClientInner>,
}

impl BadgesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a new badge.
    pub async fn create(&self, badge: NewBadge) -> Result<Badge> {
        badge.validate()?;
        self.inner.post("/badges", &badge).await
    }
}
