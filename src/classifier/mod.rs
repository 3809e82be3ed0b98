//! The multi-stage classification pipeline.

pub use pipeline::{summary, Pipeline, PipelineError, Stage};

mod pipeline;
