use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Player currently on turn. Unique across all games.
    #[sea_orm(unique)]
    pub which_player_turn: String,
    pub state: Option<GameState>,
    pub started_at: Option<DateTime>,
    pub round_number: Option<i32>,
    pub card_to_play: CardType,
}

/// Lifecycle of a game, stored as its integer index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum GameState {
    #[sea_orm(num_value = 0)]
    InProgress,
    #[sea_orm(num_value = 1)]
    Ended,
    #[sea_orm(num_value = 2)]
    WaitingForPlayers,
    #[sea_orm(num_value = 3)]
    Starting,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::InProgress => "In Progress",
            GameState::Ended => "Ended",
            GameState::WaitingForPlayers => "Waiting for Players",
            GameState::Starting => "Starting",
        }
    }

    pub fn index(&self) -> i32 {
        self.to_value()
    }
}

/// Card ranks used by the game, stored as their integer index.
///
/// The Joker is a wild card: it can be played as any rank but is never
/// drawn as the rank a round asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum CardType {
    #[sea_orm(num_value = 0)]
    King,
    #[sea_orm(num_value = 1)]
    Queen,
    #[sea_orm(num_value = 2)]
    Jack,
    #[sea_orm(num_value = 3)]
    Ace,
    #[sea_orm(num_value = 4)]
    Joker,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::King => "King",
            CardType::Queen => "Queen",
            CardType::Jack => "Jack",
            CardType::Ace => "Ace",
            CardType::Joker => "Joker",
        }
    }

    pub fn index(&self) -> i32 {
        self.to_value()
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, CardType::Joker)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::chats::Entity")]
    Chats,
}

impl Related<super::chats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
