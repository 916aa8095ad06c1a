pub mod bootstrap;
pub mod catalog;
pub mod dto;
pub mod entity;
pub mod error;
pub mod repository;
pub mod rules;

pub use bootstrap::{
    connect, connect_and_migrate, connect_and_migrate_from_env, init_tracing, load_dotenv,
    DatabaseSettings,
};
pub use error::{ConstraintKind, RepositoryError};
pub use migration::{Migrator, MigratorTrait};
