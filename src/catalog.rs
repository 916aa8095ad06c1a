//! Schema catalog introspection
//!
//! Reads table, column, key and index metadata back out of a SQLite database
//! through its `PRAGMA` interface. Only SQLite connections are supported.

use sea_orm::{ConnectionTrait, DbBackend, DbErr, QueryResult, Statement};
use serde::Serialize;

/// Bookkeeping table of the migration runner, hidden from `table_names`.
const MIGRATIONS_TABLE: &str = "seaql_migrations";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type as written in the DDL.
    pub data_type: String,
    pub not_null: bool,
    /// Default expression as written in the DDL.
    pub default_value: Option<String>,
    pub primary_key: bool,
}

impl ColumnInfo {
    /// The default expression without the quoting/parentheses SQLite may keep.
    pub fn default_literal(&self) -> Option<&str> {
        self.default_value
            .as_deref()
            .map(|value| value.trim_matches(|c| c == '(' || c == ')' || c == '\''))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyInfo {
    pub from_column: String,
    pub table: String,
    pub to_column: String,
    pub on_update: String,
    pub on_delete: String,
}

fn ensure_sqlite<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    match db.get_database_backend() {
        DbBackend::Sqlite => Ok(()),
        other => Err(DbErr::Custom(format!(
            "schema catalog is only available on SQLite, not {other:?}"
        ))),
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

async fn pragma<C: ConnectionTrait>(db: &C, sql: String) -> Result<Vec<QueryResult>, DbErr> {
    ensure_sqlite(db)?;
    db.query_all(Statement::from_string(DbBackend::Sqlite, sql))
        .await
}

/// User tables, sorted by name.
pub async fn table_names<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, DbErr> {
    let rows = pragma(
        db,
        format!(
            "SELECT name FROM sqlite_master WHERE type = 'table' \
             AND name NOT LIKE 'sqlite_%' AND name <> '{MIGRATIONS_TABLE}' ORDER BY name"
        ),
    )
    .await?;

    rows.iter()
        .map(|row| row.try_get::<String>("", "name"))
        .collect()
}

pub async fn columns<C: ConnectionTrait>(db: &C, table: &str) -> Result<Vec<ColumnInfo>, DbErr> {
    let rows = pragma(db, format!("PRAGMA table_info({})", quote_ident(table))).await?;

    rows.iter()
        .map(|row| {
            Ok(ColumnInfo {
                name: row.try_get("", "name")?,
                data_type: row.try_get("", "type")?,
                not_null: row.try_get::<i64>("", "notnull")? != 0,
                default_value: row.try_get("", "dflt_value")?,
                primary_key: row.try_get::<i64>("", "pk")? != 0,
            })
        })
        .collect()
}

pub async fn foreign_keys<C: ConnectionTrait>(
    db: &C,
    table: &str,
) -> Result<Vec<ForeignKeyInfo>, DbErr> {
    let rows = pragma(db, format!("PRAGMA foreign_key_list({})", quote_ident(table))).await?;

    rows.iter()
        .map(|row| {
            Ok(ForeignKeyInfo {
                from_column: row.try_get("", "from")?,
                table: row.try_get("", "table")?,
                to_column: row.try_get("", "to")?,
                on_update: row.try_get("", "on_update")?,
                on_delete: row.try_get("", "on_delete")?,
            })
        })
        .collect()
}

/// Columns carrying a single-column UNIQUE constraint (primary keys excluded).
pub async fn unique_columns<C: ConnectionTrait>(db: &C, table: &str) -> Result<Vec<String>, DbErr> {
    let indexes = pragma(db, format!("PRAGMA index_list({})", quote_ident(table))).await?;

    let mut unique = Vec::new();
    for index in indexes {
        let is_unique = index.try_get::<i64>("", "unique")? != 0;
        let origin: String = index.try_get("", "origin")?;
        if !is_unique || origin != "u" {
            continue;
        }

        let index_name: String = index.try_get("", "name")?;
        let parts = pragma(db, format!("PRAGMA index_info({})", quote_ident(&index_name))).await?;
        if let [only] = parts.as_slice() {
            unique.push(only.try_get::<String>("", "name")?);
        }
    }

    unique.sort();
    Ok(unique)
}

pub async fn foreign_keys_enabled<C: ConnectionTrait>(db: &C) -> Result<bool, DbErr> {
    let rows = pragma(db, "PRAGMA foreign_keys".to_string()).await?;
    match rows.first() {
        Some(row) => Ok(row.try_get::<i64>("", "foreign_keys")? != 0),
        None => Ok(false),
    }
}

pub async fn enable_foreign_keys<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    ensure_sqlite(db)?;
    db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    Ok(())
}
