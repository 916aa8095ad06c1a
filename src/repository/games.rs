//! Game rows: creation, partial updates, round progression and snapshots.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};

use crate::dto::game_snapshot::{ChatSnapshot, GameSnapshot};
use crate::dto::updates::{NewGame, UpdateGame};
use crate::entity::{chats, games};
use crate::error::{RepositoryError, Result};
use crate::repository::{chats as chat_repository, new_id};
use crate::rules::{draw_card_to_play, draw_next_card_to_play};

/// Insert a game. State, start time and round number come from column defaults.
pub async fn create_game(db: &DatabaseConnection, new_game: NewGame) -> Result<games::Model> {
    let game = games::ActiveModel {
        id: Set(new_id()),
        which_player_turn: Set(new_game.which_player_turn),
        card_to_play: Set(new_game.card_to_play),
        ..Default::default()
    };

    let game = game.insert(db).await?;
    info!(game_id = %game.id, "created game");
    Ok(game)
}

/// Open a game for `which_player_turn` with a randomly drawn rank to play.
pub async fn start_game(db: &DatabaseConnection, which_player_turn: &str) -> Result<games::Model> {
    let card_to_play = draw_card_to_play(&mut rand::thread_rng());

    create_game(
        db,
        NewGame {
            which_player_turn: which_player_turn.to_string(),
            card_to_play,
        },
    )
    .await
}

pub async fn find_game(db: &DatabaseConnection, id: &str) -> Result<games::Model> {
    find_game_in(db, id).await
}

async fn find_game_in<C: ConnectionTrait>(db: &C, id: &str) -> Result<games::Model> {
    games::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| RepositoryError::not_found("game", id))
}

pub async fn list_games(db: &DatabaseConnection) -> Result<Vec<games::Model>> {
    Ok(games::Entity::find()
        .order_by_asc(games::Column::StartedAt)
        .order_by_asc(games::Column::Id)
        .all(db)
        .await?)
}

/// Apply the fields set in `update`; an update without any field is rejected.
pub async fn update_game(db: &DatabaseConnection, update: UpdateGame) -> Result<games::Model> {
    if update.is_empty() {
        return Err(RepositoryError::invalid(
            "no new game data was provided, the update was aborted",
        ));
    }

    let game = find_game(db, &update.id).await?;
    let mut game_model: games::ActiveModel = game.into();

    if let Some(state) = update.state {
        game_model.state = Set(Some(state));
    }
    if let Some(round_number) = update.round_number {
        game_model.round_number = Set(Some(round_number));
    }
    if let Some(card_to_play) = update.card_to_play {
        game_model.card_to_play = Set(card_to_play);
    }
    if let Some(which_player_turn) = update.which_player_turn {
        game_model.which_player_turn = Set(which_player_turn);
    }

    let game = game_model.update(db).await?;
    debug!(game_id = %game.id, "updated game");
    Ok(game)
}

/// Move to the next round and draw a new rank to play, never the previous one.
pub async fn start_next_round(db: &DatabaseConnection, id: &str) -> Result<games::Model> {
    let txn = db.begin().await?;
    let game = find_game_in(&txn, id).await?;

    let next_round = game
        .round_number
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| RepositoryError::invalid(format!("game {id} has no rounds left")))?;
    let next_card = draw_next_card_to_play(&mut rand::thread_rng(), game.card_to_play);

    let mut game_model: games::ActiveModel = game.into();
    game_model.round_number = Set(Some(next_round));
    game_model.card_to_play = Set(next_card);

    let game = game_model.update(&txn).await?;
    txn.commit().await?;

    info!(
        game_id = %game.id,
        round = next_round,
        card_to_play = game.card_to_play.as_str(),
        "started next round"
    );
    Ok(game)
}

/// Delete a game. Fails with a foreign key violation while a chat still belongs to it.
pub async fn delete_game(db: &DatabaseConnection, id: &str) -> Result<()> {
    let result = games::Entity::delete_by_id(id.to_string()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(RepositoryError::not_found("game", id));
    }

    info!(game_id = %id, "deleted game");
    Ok(())
}

pub async fn load_game_snapshot(db: &DatabaseConnection, id: &str) -> Result<GameSnapshot> {
    let game = find_game(db, id).await?;

    let chat = chats::Entity::find()
        .filter(chats::Column::GameId.eq(game.id.as_str()))
        .one(db)
        .await?;

    let chat = match chat {
        Some(chat) => {
            let messages = chat_repository::list_messages(db, &chat.id).await?;
            Some(ChatSnapshot { chat, messages })
        }
        None => None,
    };

    Ok(GameSnapshot { game, chat })
}
