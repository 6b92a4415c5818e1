//! Application state shared across request handlers.

use quizgen_core::{GenerationPipeline, RandomSampler};

pub(crate) struct AppState {
    /// AI generation + bulk persistence for `/questions/ai`.
    pub(crate) pipeline: GenerationPipeline,
    /// Random reviewed questions for `/questions/random`.
    pub(crate) sampler: RandomSampler,
}
