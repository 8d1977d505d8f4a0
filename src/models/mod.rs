mod category;
mod player;
mod question;
mod result;

pub use category::{Category, Difficulty};
pub use player::{Player, normalize_player_name};
pub use question::{Question, QuestionSet, RawQuestion};
pub use result::{Rank, SessionResult};
