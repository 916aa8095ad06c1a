use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::dto::updates::{CardFilter, UpdateCard};
use crate::entity::cards;
use crate::entity::games::CardType;
use crate::error::{RepositoryError, Result};
use crate::repository::new_id;

/// Create a card, optionally dealt straight to a player.
pub async fn create_card(
    db: &DatabaseConnection,
    card_type: CardType,
    player_id: Option<&str>,
) -> Result<cards::Model> {
    let card = cards::ActiveModel {
        id: Set(new_id()),
        card_type: Set(Some(card_type)),
        player_id: Set(player_id.map(str::to_string)),
        claim_id: Set(None),
    };

    let card = card.insert(db).await?;
    debug!(card_id = %card.id, card_type = card_type.as_str(), "created card");
    Ok(card)
}

pub async fn find_card(db: &DatabaseConnection, id: &str) -> Result<cards::Model> {
    find_card_in(db, id).await
}

pub(crate) async fn find_card_in<C: ConnectionTrait>(db: &C, id: &str) -> Result<cards::Model> {
    cards::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| RepositoryError::not_found("card", id))
}

/// List cards held by a player, put down in a claim, or all of them.
pub async fn list_cards(db: &DatabaseConnection, filter: CardFilter) -> Result<Vec<cards::Model>> {
    list_cards_in(db, filter).await
}

pub(crate) async fn list_cards_in<C: ConnectionTrait>(
    db: &C,
    filter: CardFilter,
) -> Result<Vec<cards::Model>> {
    let query = match (filter.player_id, filter.claim_id) {
        (Some(_), Some(_)) => {
            return Err(RepositoryError::invalid(
                "either claim_id or player_id may be given, but not both",
            ))
        }
        (Some(player_id), None) => {
            cards::Entity::find().filter(cards::Column::PlayerId.eq(player_id))
        }
        (None, Some(claim_id)) => cards::Entity::find().filter(cards::Column::ClaimId.eq(claim_id)),
        (None, None) => cards::Entity::find(),
    };

    Ok(query.order_by_asc(cards::Column::Id).all(db).await?)
}

pub async fn update_card(db: &DatabaseConnection, update: UpdateCard) -> Result<cards::Model> {
    update_card_in(db, update).await
}

pub(crate) async fn update_card_in<C: ConnectionTrait>(
    db: &C,
    update: UpdateCard,
) -> Result<cards::Model> {
    if update.is_empty() {
        return Err(RepositoryError::invalid(
            "no new card data was provided, the update was aborted",
        ));
    }

    let card = find_card_in(db, &update.id).await?;
    let mut card_model: cards::ActiveModel = card.into();

    if let Some(card_type) = update.card_type {
        card_model.card_type = Set(Some(card_type));
    }
    if let Some(player_id) = update.player_id {
        card_model.player_id = Set(player_id);
    }
    if let Some(claim_id) = update.claim_id {
        card_model.claim_id = Set(claim_id);
    }

    Ok(card_model.update(db).await?)
}

pub async fn delete_card(db: &DatabaseConnection, id: &str) -> Result<()> {
    let result = cards::Entity::delete_by_id(id.to_string()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(RepositoryError::not_found("card", id));
    }
    Ok(())
}
