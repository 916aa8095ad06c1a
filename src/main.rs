use anyhow::Context;
use sea_orm::{ConnectionTrait, DbBackend};
use tracing::info;

use lue_lue_backend::{catalog, connect_and_migrate_from_env, init_tracing, load_dotenv};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    info!("Starting lue-lue backend store...");

    let db = connect_and_migrate_from_env()
        .await
        .context("failed to prepare the database")?;

    if db.get_database_backend() != DbBackend::Sqlite {
        info!("Schema catalog is only reported for SQLite databases");
        db.close().await?;
        return Ok(());
    }

    for table in catalog::table_names(&db).await? {
        let columns = catalog::columns(&db, &table).await?;
        let foreign_keys = catalog::foreign_keys(&db, &table).await?;
        info!(
            table = %table,
            columns = columns.len(),
            foreign_keys = foreign_keys.len(),
            "table ready"
        );
    }

    db.close().await?;
    Ok(())
}
