//! Data access, one module per table.
//!
//! Every operation takes the shared `DatabaseConnection`; the ones that touch
//! more than one row open their own transaction.

pub mod cards;
pub mod chats;
pub mod claims;
pub mod games;
pub mod players;

/// Fresh primary key for a new row.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
