use sea_orm_migration::prelude::*;

use crate::m20250601_000001_init_schema::{Chats, Games};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // chat_messages is left in place. With foreign keys enforced, the drop fails
        // while any message still points at a chat; otherwise every chat row is lost.
        manager
            .drop_table(Table::drop().table(Chats::Table).to_owned())
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Chats::Table)
                    .col(ColumnDef::new(Chats::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Chats::NumberOfMessages)
                            .integer()
                            .default(0),
                    )
                    .col(ColumnDef::new(GameLink::GameId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chats_game_id")
                            .from(Chats::Table, GameLink::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chats::Table).to_owned())
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Chats::Table)
                    .col(ColumnDef::new(Chats::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Chats::NumberOfMessages)
                            .integer()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum GameLink {
    GameId,
}
