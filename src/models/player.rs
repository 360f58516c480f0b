//! Player models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A player as known to Behave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Behave's internal id
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    /// The id the player was identified with
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Stored traits (email, name, ...)
    #[serde(default)]
    pub traits: Option<Value>,
    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Player {
    /// A trait value by name, if the player has it.
    pub fn trait_value(&self, name: &str) -> Option<&Value> {
        self.traits.as_ref().and_then(|traits| traits.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trait_lookup() {
        let player: Player = serde_json::from_value(json!({
            "reference_id": "user-42",
            "traits": { "email": "ada@example.com" },
            "level": 3
        }))
        .unwrap();

        assert_eq!(player.trait_value("email"), Some(&json!("ada@example.com")));
        assert_eq!(player.trait_value("name"), None);
        assert_eq!(player.extra.get("level"), Some(&json!(3)));
    }
}
