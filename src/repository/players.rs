use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::{debug, info};

use crate::dto::updates::UpdatePlayer;
use crate::entity::players;
use crate::error::{RepositoryError, Result};
use crate::repository::new_id;
use crate::rules::is_valid_player_name;

/// Register a player. Score and join time come from column defaults.
pub async fn create_player(db: &DatabaseConnection, name: &str) -> Result<players::Model> {
    if !is_valid_player_name(name) {
        return Err(RepositoryError::invalid("a player needs a name"));
    }

    let player = players::ActiveModel {
        id: Set(new_id()),
        name: Set(name.trim().to_string()),
        ..Default::default()
    };

    let player = player.insert(db).await?;
    info!(player_id = %player.id, "created player");
    Ok(player)
}

pub async fn find_player(db: &DatabaseConnection, id: &str) -> Result<players::Model> {
    players::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| RepositoryError::not_found("player", id))
}

pub async fn list_players(db: &DatabaseConnection) -> Result<Vec<players::Model>> {
    Ok(players::Entity::find()
        .order_by_asc(players::Column::JoinedAt)
        .order_by_asc(players::Column::Id)
        .all(db)
        .await?)
}

pub async fn update_player(
    db: &DatabaseConnection,
    update: UpdatePlayer,
) -> Result<players::Model> {
    if update.is_empty() {
        return Err(RepositoryError::invalid(
            "no new player data was provided, the update was aborted",
        ));
    }
    if let Some(name) = &update.name {
        if !is_valid_player_name(name) {
            return Err(RepositoryError::invalid("a player needs a name"));
        }
    }

    let player = find_player(db, &update.id).await?;
    let mut player_model: players::ActiveModel = player.into();

    if let Some(name) = update.name {
        player_model.name = Set(name.trim().to_string());
    }
    if let Some(score) = update.score {
        player_model.score = Set(Some(score));
    }

    let player = player_model.update(db).await?;
    debug!(player_id = %player.id, "updated player");
    Ok(player)
}

/// Delete a player. Fails while cards, messages or claims still reference them.
pub async fn delete_player(db: &DatabaseConnection, id: &str) -> Result<()> {
    let result = players::Entity::delete_by_id(id.to_string()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(RepositoryError::not_found("player", id));
    }

    info!(player_id = %id, "deleted player");
    Ok(())
}
