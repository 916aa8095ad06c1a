use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create games table
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Games::WhichPlayerTurn)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Games::State).integer().default(0))
                    .col(
                        ColumnDef::new(Games::StartedAt)
                            .custom(Alias::new("timestamp"))
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Games::RoundNumber).integer().default(0))
                    .col(ColumnDef::new(Games::CardToPlay).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create players table
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Players::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Players::Name).text().not_null())
                    .col(ColumnDef::new(Players::Score).integer().default(0))
                    .col(
                        ColumnDef::new(Players::JoinedAt)
                            .custom(Alias::new("timestamp"))
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create cards table. It references claims, which does not exist yet:
        // SQLite only resolves foreign keys on DML, so the forward reference is accepted.
        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cards::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Cards::CardType).integer().default(0))
                    .col(ColumnDef::new(Cards::PlayerId).string().null())
                    .col(ColumnDef::new(Cards::ClaimId).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cards_player_id")
                            .from(Cards::Table, Cards::PlayerId)
                            .to(Players::Table, Players::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cards_claim_id")
                            .from(Cards::Table, Cards::ClaimId)
                            .to(Claims::Table, Claims::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create chats table (no link to a game yet)
        manager
            .create_table(
                Table::create()
                    .table(Chats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Chats::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Chats::NumberOfMessages)
                            .integer()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Create chat_messages table
        manager
            .create_table(
                Table::create()
                    .table(ChatMessages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ChatMessages::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(ChatMessages::PlayerId).string().not_null())
                    .col(ColumnDef::new(ChatMessages::Content).text().not_null())
                    .col(
                        ColumnDef::new(ChatMessages::SentAt)
                            .custom(Alias::new("timestamp"))
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ChatMessages::ChatId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_messages_player_id")
                            .from(ChatMessages::Table, ChatMessages::PlayerId)
                            .to(Players::Table, Players::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_messages_chat_id")
                            .from(ChatMessages::Table, ChatMessages::ChatId)
                            .to(Chats::Table, Chats::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create claims table
        manager
            .create_table(
                Table::create()
                    .table(Claims::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Claims::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Claims::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Claims::NumberOfCards)
                            .integer()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_claims_created_by")
                            .from(Claims::Table, Claims::CreatedBy)
                            .to(Players::Table, Players::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop referencing tables before the tables they point at
        manager
            .drop_table(Table::drop().table(ChatMessages::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Chats::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Cards::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Claims::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Games {
    Table,
    Id,
    WhichPlayerTurn,
    State,
    StartedAt,
    RoundNumber,
    CardToPlay,
}

#[derive(DeriveIden)]
pub enum Players {
    Table,
    Id,
    Name,
    Score,
    JoinedAt,
}

#[derive(DeriveIden)]
pub enum Cards {
    Table,
    Id,
    CardType,
    PlayerId,
    ClaimId,
}

#[derive(DeriveIden)]
pub enum Chats {
    Table,
    Id,
    NumberOfMessages,
}

#[derive(DeriveIden)]
pub enum ChatMessages {
    Table,
    Id,
    PlayerId,
    Content,
    SentAt,
    ChatId,
}

#[derive(DeriveIden)]
pub enum Claims {
    Table,
    Id,
    CreatedBy,
    NumberOfCards,
}
