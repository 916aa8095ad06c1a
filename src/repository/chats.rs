//! Chats and their messages.
//!
//! A chat keeps at most `MAX_CHAT_MESSAGES` messages: posting to a full chat
//! drops the oldest one, so `number_of_messages` never exceeds the cap.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, warn};

use crate::entity::{chat_messages, chats};
use crate::error::{RepositoryError, Result};
use crate::repository::new_id;
use crate::rules::{is_valid_message, MAX_CHAT_MESSAGES};

/// Open a chat for a game. The game has to exist.
pub async fn open_chat(db: &DatabaseConnection, game_id: &str) -> Result<chats::Model> {
    let chat = chats::ActiveModel {
        id: Set(new_id()),
        game_id: Set(game_id.to_string()),
        ..Default::default()
    };

    let chat = chat.insert(db).await?;
    info!(chat_id = %chat.id, game_id = %game_id, "opened chat");
    Ok(chat)
}

pub async fn find_chat(db: &DatabaseConnection, id: &str) -> Result<chats::Model> {
    find_chat_in(db, id).await
}

pub async fn find_chat_for_game(
    db: &DatabaseConnection,
    game_id: &str,
) -> Result<Option<chats::Model>> {
    Ok(chats::Entity::find()
        .filter(chats::Column::GameId.eq(game_id))
        .one(db)
        .await?)
}

async fn find_chat_in<C: ConnectionTrait>(db: &C, id: &str) -> Result<chats::Model> {
    chats::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| RepositoryError::not_found("chat", id))
}

/// Store a message in a chat, evicting the oldest one when the chat is full.
pub async fn post_message(
    db: &DatabaseConnection,
    chat_id: &str,
    player_id: &str,
    content: &str,
) -> Result<chat_messages::Model> {
    if !is_valid_message(content) {
        return Err(RepositoryError::invalid(
            "the message is too short to be added to the chat",
        ));
    }

    let txn = db.begin().await?;
    let chat = find_chat_in(&txn, chat_id).await?;

    let message = chat_messages::ActiveModel {
        id: Set(new_id()),
        player_id: Set(player_id.to_string()),
        content: Set(content.to_string()),
        sent_at: Set(Some(Utc::now().naive_utc())),
        chat_id: Set(chat.id.clone()),
    }
    .insert(&txn)
    .await?;

    let stored = chat.number_of_messages.unwrap_or(0);
    let mut chat_model: chats::ActiveModel = chat.into();
    if stored >= MAX_CHAT_MESSAGES {
        warn!(chat_id = %chat_id, "chat is full, dropping the oldest message");
        if let Some(oldest) = oldest_message(&txn, chat_id).await? {
            chat_messages::Entity::delete_by_id(oldest.id).exec(&txn).await?;
        }
        chat_model.number_of_messages = Set(Some(MAX_CHAT_MESSAGES));
    } else {
        chat_model.number_of_messages = Set(Some(stored + 1));
    }
    chat_model.update(&txn).await?;

    txn.commit().await?;
    debug!(chat_id = %chat_id, message_id = %message.id, "posted message");
    Ok(message)
}

async fn oldest_message<C: ConnectionTrait>(
    db: &C,
    chat_id: &str,
) -> Result<Option<chat_messages::Model>> {
    Ok(messages_in_order(chat_id).one(db).await?)
}

/// Messages of a chat, in order of their sending time. Ties keep insertion order.
fn messages_in_order(chat_id: &str) -> sea_orm::Select<chat_messages::Entity> {
    chat_messages::Entity::find()
        .filter(chat_messages::Column::ChatId.eq(chat_id))
        .order_by_asc(chat_messages::Column::SentAt)
        .order_by_asc(Expr::cust("rowid"))
}

pub async fn list_messages(
    db: &DatabaseConnection,
    chat_id: &str,
) -> Result<Vec<chat_messages::Model>> {
    Ok(messages_in_order(chat_id).all(db).await?)
}

/// Remove every message of a chat and zero its counter.
pub async fn reset_chat(db: &DatabaseConnection, chat_id: &str) -> Result<chats::Model> {
    let txn = db.begin().await?;
    let chat = find_chat_in(&txn, chat_id).await?;

    chat_messages::Entity::delete_many()
        .filter(chat_messages::Column::ChatId.eq(chat_id))
        .exec(&txn)
        .await?;

    let mut chat_model: chats::ActiveModel = chat.into();
    chat_model.number_of_messages = Set(Some(0));
    let chat = chat_model.update(&txn).await?;

    txn.commit().await?;
    info!(chat_id = %chat_id, "reset chat");
    Ok(chat)
}
