//! Errors returned by the repository layer.
//!
//! Database failures are classified so callers can tell a broken constraint
//! (duplicate turn holder, dangling reference, missing column value) apart from
//! connection or query problems.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Which kind of constraint the engine refused to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Unique or primary key collision. SQLite reports both the same way.
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl ConstraintKind {
    /// Classify a database error, if it is a constraint violation at all.
    pub fn classify(err: &DbErr) -> Option<ConstraintKind> {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => return Some(ConstraintKind::Unique),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                return Some(ConstraintKind::ForeignKey)
            }
            _ => {}
        }

        let message = err.to_string();
        if message.contains("UNIQUE constraint failed") {
            Some(ConstraintKind::Unique)
        } else if message.contains("FOREIGN KEY constraint failed") {
            Some(ConstraintKind::ForeignKey)
        } else if message.contains("NOT NULL constraint failed") {
            Some(ConstraintKind::NotNull)
        } else if message.contains("CHECK constraint failed") {
            Some(ConstraintKind::Check)
        } else {
            None
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{kind:?} constraint violated: {source}")]
    Constraint { kind: ConstraintKind, source: DbErr },
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Db(DbErr),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        RepositoryError::InvalidInput(message.into())
    }

    /// The violated constraint, if this error is a constraint violation.
    pub fn constraint(&self) -> Option<ConstraintKind> {
        match self {
            RepositoryError::Constraint { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match ConstraintKind::classify(&err) {
            Some(kind) => RepositoryError::Constraint { kind, source: err },
            None => RepositoryError::Db(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    fn exec_err(message: &str) -> DbErr {
        DbErr::Exec(RuntimeErr::Internal(message.to_string()))
    }

    #[test]
    fn test_classify_sqlite_messages() {
        assert_eq!(
            ConstraintKind::classify(&exec_err("NOT NULL constraint failed: games.card_to_play")),
            Some(ConstraintKind::NotNull)
        );
        assert_eq!(
            ConstraintKind::classify(&exec_err(
                "UNIQUE constraint failed: games.which_player_turn"
            )),
            Some(ConstraintKind::Unique)
        );
        assert_eq!(
            ConstraintKind::classify(&exec_err("FOREIGN KEY constraint failed")),
            Some(ConstraintKind::ForeignKey)
        );
        assert_eq!(ConstraintKind::classify(&exec_err("disk I/O error")), None);
    }

    #[test]
    fn test_from_db_err_wraps_constraints() {
        let err = RepositoryError::from(exec_err("NOT NULL constraint failed: players.name"));
        assert_eq!(err.constraint(), Some(ConstraintKind::NotNull));

        let err = RepositoryError::from(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, RepositoryError::Db(_)));
        assert_eq!(err.constraint(), None);
    }

    #[test]
    fn test_not_found_display() {
        let err = RepositoryError::not_found("game", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "game with id abc not found");
    }
}
