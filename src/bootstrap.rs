use migration::Migrator;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr};
use std::env;
use std::sync::OnceLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog;

static DOTENV_INIT: OnceLock<()> = OnceLock::new();
static TRACING_INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DATABASE_URL: &str = "sqlite://lue-lue.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_FILTER: &str = "info,sea_orm=info,sqlx=warn";

/// Database connection settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    /// Read `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`, falling back to defaults.
    pub fn from_env() -> Self {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            warn!("DATABASE_URL not set, using default");
            DEFAULT_DATABASE_URL.to_string()
        });

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("DATABASE_MAX_CONNECTIONS={raw} is not a number, using default");
                DEFAULT_MAX_CONNECTIONS
            }),
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        DatabaseSettings {
            url,
            max_connections,
        }
    }

    pub fn in_memory() -> Self {
        DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    /// Every pooled connection to `:memory:` would open its own empty database.
    pub fn is_in_memory(&self) -> bool {
        self.is_sqlite() && self.url.contains(":memory:")
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.clone());
        if self.is_in_memory() {
            options.max_connections(1).min_connections(1);
        } else {
            options.max_connections(self.max_connections.max(1));
        }
        options
    }
}

/// Load environment variables from .env file exactly once
pub fn load_dotenv() {
    DOTENV_INIT.get_or_init(|| {
        dotenv::dotenv().ok();
    });
}

/// Initialize tracing exactly once
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let is_production =
            env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()) == "production";

        // A subscriber may already be installed (e.g. by a test harness).
        let installed = if is_production {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
        };

        if let Err(err) = installed {
            eprintln!("tracing subscriber not installed: {err}");
        }
    });
}

/// Open a connection. SQLite connections always get foreign key enforcement.
pub async fn connect(settings: &DatabaseSettings) -> Result<DatabaseConnection, DbErr> {
    info!("Database URL: {}", redact_db_url(&settings.url));

    let db = Database::connect(settings.connect_options()).await?;

    if db.get_database_backend() == DbBackend::Sqlite {
        catalog::enable_foreign_keys(&db).await?;
    }

    info!("Connected to database successfully!");
    Ok(db)
}

/// Connect and bring the schema up to the latest migration.
pub async fn connect_and_migrate(settings: &DatabaseSettings) -> Result<DatabaseConnection, DbErr> {
    let db = connect(settings).await?;

    Migrator::up(&db, None).await?;

    info!("Database migrations completed successfully!");
    Ok(db)
}

pub async fn connect_and_migrate_from_env() -> Result<DatabaseConnection, DbErr> {
    load_dotenv();
    connect_and_migrate(&DatabaseSettings::from_env()).await
}

/// Helper to log a DB URL without credentials.
pub fn redact_db_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            if url[..colon_pos].contains("//") {
                let mut s = String::with_capacity(url.len());
                s.push_str(&url[..(colon_pos + 1)]);
                s.push_str("***");
                s.push_str(&url[at_pos..]);
                return s;
            }
        }
    }
    url.to_string()
}
