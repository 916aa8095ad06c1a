//! Shared helpers for the integration tests.
//!
//! Every bootstrap call hands out a brand-new in-memory SQLite database, so
//! tests never see each other's rows.
#![allow(dead_code)]

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lue_lue_backend::entity::games::CardType;
use lue_lue_backend::entity::{games, players};
use lue_lue_backend::{connect, DatabaseSettings, Migrator, MigratorTrait};

static INIT: Once = Once::new();

pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,lue_lue_backend=debug"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_test_writer())
            .try_init();
    });
}

/// Empty in-memory database with foreign keys enforced and no migration applied.
pub async fn empty_database() -> Result<DatabaseConnection, DbErr> {
    init_tracing_for_tests();
    connect(&DatabaseSettings::in_memory()).await
}

/// In-memory database with only the first migration (the original schema) applied.
pub async fn initial_schema_database() -> Result<DatabaseConnection, DbErr> {
    let db = empty_database().await?;
    Migrator::up(&db, Some(1)).await?;
    Ok(db)
}

/// In-memory database migrated to the latest schema.
pub async fn test_bootstrap() -> Result<DatabaseConnection, DbErr> {
    let db = empty_database().await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_player(db: &DatabaseConnection, name: &str) -> Result<players::Model, DbErr> {
    players::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// A game whose turn belongs to `player_id`.
pub async fn seed_game(db: &DatabaseConnection, player_id: &str) -> Result<games::Model, DbErr> {
    games::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        which_player_turn: Set(player_id.to_string()),
        card_to_play: Set(CardType::King),
        ..Default::default()
    }
    .insert(db)
    .await
}
