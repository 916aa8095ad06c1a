pub mod claim_snapshot;
pub mod game_snapshot;
pub mod updates;
