//! Payloads for creating and partially updating rows.
//!
//! Every `Update*` struct carries the row id plus one `Option` per mutable
//! column; `None` leaves the column untouched.

use serde::{Deserialize, Serialize};

use crate::entity::games::{CardType, GameState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGame {
    pub which_player_turn: String,
    pub card_to_play: CardType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGame {
    pub id: String,
    pub state: Option<GameState>,
    pub round_number: Option<i32>,
    pub card_to_play: Option<CardType>,
    pub which_player_turn: Option<String>,
}

impl UpdateGame {
    pub fn new(id: impl Into<String>) -> Self {
        UpdateGame {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none()
            && self.round_number.is_none()
            && self.card_to_play.is_none()
            && self.which_player_turn.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlayer {
    pub id: String,
    pub name: Option<String>,
    pub score: Option<i32>,
}

impl UpdatePlayer {
    pub fn new(id: impl Into<String>) -> Self {
        UpdatePlayer {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.score.is_none()
    }
}

/// Partial card update.
///
/// `player_id` and `claim_id` are doubly optional: `Some(None)` detaches the
/// card from its holder or claim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCard {
    pub id: String,
    pub card_type: Option<CardType>,
    pub player_id: Option<Option<String>>,
    pub claim_id: Option<Option<String>>,
}

impl UpdateCard {
    pub fn new(id: impl Into<String>) -> Self {
        UpdateCard {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.card_type.is_none() && self.player_id.is_none() && self.claim_id.is_none()
    }
}

/// Which cards to list. Holder and claim filters are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilter {
    pub player_id: Option<String>,
    pub claim_id: Option<String>,
}

impl CardFilter {
    pub fn held_by(player_id: impl Into<String>) -> Self {
        CardFilter {
            player_id: Some(player_id.into()),
            claim_id: None,
        }
    }

    pub fn in_claim(claim_id: impl Into<String>) -> Self {
        CardFilter {
            player_id: None,
            claim_id: Some(claim_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_game_is_empty() {
        let mut update = UpdateGame::new("g1");
        assert!(update.is_empty());

        update.round_number = Some(2);
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_card_detach_is_not_empty() {
        let mut update = UpdateCard::new("c1");
        assert!(update.is_empty());

        update.claim_id = Some(None);
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_player_deserializes_partial_payload() {
        let update: UpdatePlayer =
            serde_json::from_str(r#"{"id":"p1","score":12}"#).expect("valid payload");
        assert_eq!(update.id, "p1");
        assert_eq!(update.score, Some(12));
        assert!(update.name.is_none());
    }
}
