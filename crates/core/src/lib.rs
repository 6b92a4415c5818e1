//! Core of the quizgen service: AI question generation and random sampling.
//!
//! - [`prompt`] builds the instruction text for the model.
//! - [`ai`] sends it to the provider ([`AiClient`], [`GeminiClient`]).
//! - [`parse`] pulls the question JSON out of the reply.
//! - [`pipeline`] runs a whole batch and persists it atomically.
//! - [`sampler`] serves random reviewed questions.

pub mod ai;
pub mod config;
mod error;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod sampler;

pub use ai::{AiClient, AiError, GeminiClient};
pub use config::{AiConfig, Config, ConfigError, StoreConfig};
pub use error::QuizError;
pub use parse::{extract_json_object, parse_question, ResponseParseError};
pub use pipeline::{GenerationPipeline, MAX_BATCH_AMOUNT, MAX_TOPIC_CHARS, MIN_TOPIC_CHARS};
pub use prompt::build_prompt;
pub use sampler::RandomSampler;

pub use quizgen_storage as storage;
