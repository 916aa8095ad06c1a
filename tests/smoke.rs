mod common;
use common::{init_tracing_for_tests, test_bootstrap};
use lue_lue_backend::{catalog, connect_and_migrate, DatabaseSettings, MigratorTrait};

#[test]
fn test_tracing_and_env() {
    // Initialize tracing for tests (should not panic, also when called twice)
    init_tracing_for_tests();
    init_tracing_for_tests();

    let settings = DatabaseSettings::from_env();
    println!("DATABASE_URL: {}", lue_lue_backend::bootstrap::redact_db_url(&settings.url));

    assert!(!settings.url.is_empty(), "a database URL is always resolved");
    assert!(settings.max_connections >= 1);
}

#[tokio::test]
async fn smoke_migrate_in_memory() -> anyhow::Result<()> {
    init_tracing_for_tests();

    let db = connect_and_migrate(&DatabaseSettings::in_memory()).await?;

    assert!(catalog::foreign_keys_enabled(&db).await?);
    assert_eq!(catalog::table_names(&db).await?.len(), 6);

    // Running the migrator again is a no-op
    lue_lue_backend::Migrator::up(&db, None).await?;
    assert!(lue_lue_backend::Migrator::get_pending_migrations(&db)
        .await?
        .is_empty());

    Ok(())
}

#[tokio::test]
async fn smoke_test_bootstrap_is_isolated() -> anyhow::Result<()> {
    let first = test_bootstrap().await?;
    let second = test_bootstrap().await?;

    lue_lue_backend::repository::players::create_player(&first, "Ada").await?;

    assert_eq!(lue_lue_backend::repository::players::list_players(&first).await?.len(), 1);
    assert!(lue_lue_backend::repository::players::list_players(&second)
        .await?
        .is_empty());

    Ok(())
}
