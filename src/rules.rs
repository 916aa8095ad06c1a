//! Game rules module
//!
//! Constants and pure helpers shared by the repositories. Nothing in here
//! touches the database.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entity::games::CardType;

/// Messages kept per chat. Posting beyond this drops the oldest message.
pub const MAX_CHAT_MESSAGES: i32 = 50;

/// Upper bound of cards put down in a single claim.
pub const MAX_CARDS_PER_CLAIM: usize = 4;

/// Ranks a round can ask for. The wild Joker is never one of them.
pub const PLAYABLE_RANKS: [CardType; 4] = [
    CardType::King,
    CardType::Queen,
    CardType::Jack,
    CardType::Ace,
];

/// Pick the rank every player has to (claim to) play this round.
pub fn draw_card_to_play<R: Rng + ?Sized>(rng: &mut R) -> CardType {
    *PLAYABLE_RANKS.choose(rng).unwrap_or(&CardType::King)
}

/// Like `draw_card_to_play`, but never repeats the previous round's rank.
pub fn draw_next_card_to_play<R: Rng + ?Sized>(rng: &mut R, previous: CardType) -> CardType {
    let candidates: Vec<CardType> = PLAYABLE_RANKS
        .iter()
        .copied()
        .filter(|rank| *rank != previous)
        .collect();
    *candidates.choose(rng).unwrap_or(&CardType::King)
}

pub fn is_valid_claim_size(number_of_cards: usize) -> bool {
    (1..=MAX_CARDS_PER_CLAIM).contains(&number_of_cards)
}

/// A chat message needs some visible content.
pub fn is_valid_message(content: &str) -> bool {
    !content.trim().is_empty()
}

/// A player name needs some visible content.
pub fn is_valid_player_name(name: &str) -> bool {
    !name.trim().is_empty()
}
