//! Badge models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::primitives::BadgeId;

/// A badge definition, or a badge unlocked by a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    /// Behave's internal id
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Reference id chosen at creation
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Icon URL
    #[serde(default)]
    pub icon: Option<String>,
    /// Hint shown before the badge is unlocked
    #[serde(default)]
    pub hint: Option<String>,
    /// Message shown when the badge is unlocked
    #[serde(default)]
    pub message: Option<String>,
    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Badge {
    /// The badge's reference id, falling back to the internal id.
    pub fn badge_id(&self) -> Option<BadgeId> {
        self.reference_id
            .as_deref()
            .or(self.id.as_deref())
            .map(BadgeId::new)
    }
}

/// Request body for creating a badge.
///
/// `limit`, `unique` and `active` default to `0`, `true` and `true`.
///
/// # Example
///
/// ```
/// use behave_rs::models::NewBadge;
///
/// let badge = NewBadge::new("Early bird", "early-bird", "https://cdn.example.com/bird.png")
///     .with_hint("Log in before 7am")
///     .with_unique(false);
/// assert!(badge.active);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct NewBadge {
    /// Display name
    pub name: String,
    /// Unique reference id
    pub reference_id: String,
    /// Icon URL
    pub icon: String,
    /// Hint shown before the badge is unlocked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Message shown when the badge is unlocked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// How many players may unlock it (0 = unlimited)
    pub limit: u32,
    /// Whether a player can unlock it only once
    pub unique: bool,
    /// Whether the badge can currently be unlocked
    pub active: bool,
}

impl NewBadge {
    /// Create a badge request with the three required fields.
    pub fn new(
        name: impl Into<String>,
        reference_id: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reference_id: reference_id.into(),
            icon: icon.into(),
            hint: None,
            message: None,
            limit: 0,
            unique: true,
            active: true,
        }
    }

    /// Set the hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the unlock message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the unlock limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set whether the badge is unique per player.
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Set whether the badge is active.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("reference_id", &self.reference_id),
            ("icon", &self.icon),
        ] {
            if value.trim().is_empty() {
                return Err(crate::Error::Config(format!("badge {field} is required")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_badge_id_prefers_reference() {
        let badge: Badge = serde_json::from_value(json!({
            "id": "b-77",
            "reference_id": "first-login",
            "name": "First Login"
        }))
        .unwrap();
        assert_eq!(badge.badge_id(), Some(BadgeId::new("first-login")));

        let bare: Badge = serde_json::from_value(json!({ "id": "b-77" })).unwrap();
        assert_eq!(bare.badge_id().unwrap().as_str(), "b-77");
    }

    #[test]
    fn test_new_badge_defaults_on_the_wire() {
        let badge = NewBadge::new("Early bird", "early-bird", "https://cdn/bird.png");
        assert_eq!(
            serde_json::to_value(&badge).unwrap(),
            json!({
                "name": "Early bird",
                "reference_id": "early-bird",
                "icon": "https://cdn/bird.png",
                "limit": 0,
                "unique": true,
                "active": true
            })
        );
    }

    #[test]
    fn test_new_badge_validation() {
        assert!(NewBadge::new("a", "b", "c").validate().is_ok());
        assert!(NewBadge::new("a", "", "c").validate().is_err());
    }
}
