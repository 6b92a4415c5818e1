//! Question store selection.

use std::sync::Arc;

use clap::ValueEnum;
use quizgen_core::StoreConfig;
use quizgen_storage::{MemoryQuestionStore, QuestionStore, StorageError};

/// Which [`QuestionStore`] backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StoreKind {
    /// Process-local store; contents are lost on exit.
    Memory,
    /// MongoDB collection configured by MONGODB_URI / MONGODB_DATABASE / MONGODB_COLLECTION.
    Mongo,
}

pub(crate) async fn open_store(
    kind: StoreKind,
    config: &StoreConfig,
) -> Result<Arc<dyn QuestionStore>, StorageError> {
    match kind {
        StoreKind::Memory => {
            tracing::info!("using in-memory question store");
            Ok(Arc::new(MemoryQuestionStore::new()))
        }
        StoreKind::Mongo => open_mongo(config).await,
    }
}

#[cfg(feature = "mongo")]
async fn open_mongo(config: &StoreConfig) -> Result<Arc<dyn QuestionStore>, StorageError> {
    let settings = quizgen_storage::MongoSettings {
        uri: config.uri.clone(),
        database: config.database.clone(),
        collection: config.collection.clone(),
    };
    let store = quizgen_storage::MongoQuestionStore::connect(&settings).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mongo"))]
async fn open_mongo(_config: &StoreConfig) -> Result<Arc<dyn QuestionStore>, StorageError> {
    Err(StorageError::Backend(
        "this build has no MongoDB support; rebuild with the `mongo` feature or use --store memory"
            .to_string(),
    ))
}
