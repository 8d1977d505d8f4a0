//! Question loading and normalization.

mod decode;
mod error;
mod loader;
mod normalize;
mod shuffle;
mod source;

pub use decode::decode_html;
pub use error::{DataError, LoadError};
pub use loader::{FileSource, load_raw_questions};
pub use normalize::{Normalized, normalize};
pub use shuffle::{RandomShuffle, Shuffle};
pub use source::{OPEN_TDB_URL, OpenTdbSource, QuestionRequest, QuestionSource};
