pub mod conformance;
mod error;
mod memory;
#[cfg(feature = "mongo")]
mod mongo;
mod record;
mod traits;

pub use error::StorageError;
pub use memory::MemoryQuestionStore;
#[cfg(feature = "mongo")]
pub use mongo::{MongoQuestionStore, MongoSettings};
pub use record::{Difficulty, InvalidDifficulty, Question, QuestionFilter, QuestionStatus};
pub use traits::QuestionStore;
