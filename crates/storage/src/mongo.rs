//! MongoDB-backed question store.
//!
//! Questions live in a single collection with no schema beyond the fields
//! the sampler filters on (`status`, `difficulty`). Random sampling uses
//! the server-side `$sample` aggregation stage.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::{Client, Collection};

use crate::error::StorageError;
use crate::record::{Question, QuestionFilter, QuestionStatus};
use crate::traits::QuestionStore;

/// Connection parameters for [`MongoQuestionStore`].
#[derive(Debug, Clone)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

pub struct MongoQuestionStore {
    collection: Collection<Document>,
}

impl MongoQuestionStore {
    /// Connect to the configured deployment.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first query rather than here.
    pub async fn connect(settings: &MongoSettings) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(&settings.uri)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let collection = client
            .database(&settings.database)
            .collection::<Document>(&settings.collection);
        tracing::info!(
            database = %settings.database,
            collection = %settings.collection,
            "question store connected"
        );
        Ok(Self { collection })
    }
}

fn to_document(question: &Question) -> Result<Document, StorageError> {
    bson::to_document(question).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Decode a stored document. The `_id` ObjectId is exposed as its hex string.
fn from_document(mut document: Document) -> Result<Question, StorageError> {
    if let Ok(id) = document.get_object_id("_id") {
        document.insert("_id", id.to_hex());
    }
    bson::from_document(document).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Build the `$match` condition: non-pending AND every filter field.
pub(crate) fn match_condition(filter: &QuestionFilter) -> Result<Document, StorageError> {
    let mut constraints = Document::new();
    for (field, value) in filter.fields() {
        let value: Bson =
            bson::to_bson(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        constraints.insert(field, value);
    }
    Ok(doc! {
        "$and": [
            { "status": { "$ne": QuestionStatus::PENDING } },
            constraints,
        ]
    })
}

#[async_trait]
impl QuestionStore for MongoQuestionStore {
    async fn insert_one(&self, question: &Question) -> Result<(), StorageError> {
        let document = to_document(question)?;
        self.collection
            .insert_one(document)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn insert_many(&self, questions: &[Question]) -> Result<(), StorageError> {
        if questions.is_empty() {
            return Ok(());
        }
        let documents = questions
            .iter()
            .map(to_document)
            .collect::<Result<Vec<_>, _>>()?;
        self.collection
            .insert_many(documents)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn sample(
        &self,
        amount: usize,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, StorageError> {
        if amount == 0 {
            return Ok(Vec::new());
        }
        let size = i64::try_from(amount).unwrap_or(i64::MAX);
        let pipeline = vec![
            doc! { "$match": match_condition(filter)? },
            doc! { "$sample": { "size": size } },
        ];
        let cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        documents.into_iter().map(from_document).collect()
    }
}
