use serde::{Deserialize, Serialize};

use crate::entity::{cards, claims};

/// A claim with the cards that were put down in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimSnapshot {
    pub claim: claims::Model,
    pub cards: Vec<cards::Model>,
}
