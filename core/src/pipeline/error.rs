// core/src/pipeline/error.rs

use thiserror::Error;

/// Errors raised by the pipeline machinery itself, as opposed to its handlers.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Step '{step_name}' finished without producing {missing}")]
  MissingOutput { step_name: String, missing: &'static str },
}
