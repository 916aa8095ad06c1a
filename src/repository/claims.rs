//! Claims: a player puts down up to `MAX_CARDS_PER_CLAIM` cards at once.
//!
//! Creating and deleting a claim also rewrites `cards.claim_id`, so both run
//! in a single transaction.

use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use sea_orm::sea_query::Expr;
use tracing::info;

use crate::dto::claim_snapshot::ClaimSnapshot;
use crate::dto::updates::{CardFilter, UpdateCard};
use crate::entity::{cards, claims};
use crate::error::{RepositoryError, Result};
use crate::repository::cards::{find_card_in, list_cards_in, update_card_in};
use crate::repository::new_id;
use crate::rules::{is_valid_claim_size, MAX_CARDS_PER_CLAIM};

pub async fn create_claim(
    db: &DatabaseConnection,
    created_by: &str,
    card_ids: &[String],
) -> Result<ClaimSnapshot> {
    if !is_valid_claim_size(card_ids.len()) {
        return Err(RepositoryError::invalid(format!(
            "a claim holds between 1 and {MAX_CARDS_PER_CLAIM} cards, got {}",
            card_ids.len()
        )));
    }
    let distinct: HashSet<&String> = card_ids.iter().collect();
    if distinct.len() != card_ids.len() {
        return Err(RepositoryError::invalid("a card can only be claimed once"));
    }

    let txn = db.begin().await?;

    let claim = claims::ActiveModel {
        id: Set(new_id()),
        created_by: Set(created_by.to_string()),
        number_of_cards: Set(Some(card_ids.len() as i32)),
    }
    .insert(&txn)
    .await?;

    let mut claimed = Vec::with_capacity(card_ids.len());
    for card_id in card_ids {
        let card = find_card_in(&txn, card_id).await?;
        if let Some(existing) = &card.claim_id {
            return Err(RepositoryError::invalid(format!(
                "card {card_id} is already part of claim {existing}"
            )));
        }

        let update = UpdateCard {
            claim_id: Some(Some(claim.id.clone())),
            ..UpdateCard::new(card_id.clone())
        };
        claimed.push(update_card_in(&txn, update).await?);
    }

    txn.commit().await?;
    info!(claim_id = %claim.id, created_by = %created_by, cards = claimed.len(), "created claim");

    Ok(ClaimSnapshot {
        claim,
        cards: claimed,
    })
}

pub async fn find_claim(db: &DatabaseConnection, id: &str) -> Result<ClaimSnapshot> {
    let claim = claims::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| RepositoryError::not_found("claim", id))?;

    let cards = list_cards_in(db, CardFilter::in_claim(claim.id.clone())).await?;
    Ok(ClaimSnapshot { claim, cards })
}

/// All claims, or only those made by `created_by`.
pub async fn list_claims(
    db: &DatabaseConnection,
    created_by: Option<&str>,
) -> Result<Vec<claims::Model>> {
    let query = match created_by {
        Some(player_id) => claims::Entity::find().filter(claims::Column::CreatedBy.eq(player_id)),
        None => claims::Entity::find(),
    };

    Ok(query.order_by_asc(claims::Column::Id).all(db).await?)
}

/// Delete a claim after handing its cards back (their `claim_id` is cleared).
pub async fn delete_claim(db: &DatabaseConnection, id: &str) -> Result<()> {
    let txn = db.begin().await?;

    cards::Entity::update_many()
        .col_expr(cards::Column::ClaimId, Expr::value(Option::<String>::None))
        .filter(cards::Column::ClaimId.eq(id))
        .exec(&txn)
        .await?;

    let result = claims::Entity::delete_by_id(id.to_string()).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(RepositoryError::not_found("claim", id));
    }

    txn.commit().await?;
    info!(claim_id = %id, "deleted claim");
    Ok(())
}
