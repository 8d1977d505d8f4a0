//! Best-effort local persistence of the last player name and the leaderboard.
//!
//! Nothing here may affect a session: every failure is logged and swallowed.

mod leaderboard;

pub use leaderboard::{LeaderboardEntry, LocalStore, StoreError, StoredData};
