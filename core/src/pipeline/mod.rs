// core/src/pipeline/mod.rs

//! A small async step pipeline: named steps with ordered handlers, early stop,
//! and a shared lockable context. Multi-stage workflows (see `crate::workflows`)
//! are expressed as pipelines.

pub mod context_data;
pub mod control;
pub mod definition;
pub mod error;
pub mod execution;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use definition::{Handler, Pipeline, StepDef};
pub use error::PipelineError;
