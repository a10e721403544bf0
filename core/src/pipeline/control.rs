// core/src/pipeline/control.rs

//! Flow-control signals returned by step handlers, and the outcome of a run.

/// Returned by a handler to tell the pipeline whether to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Run the remaining handlers of this step, then the following steps.
  Continue,
  /// Halt immediately. Nothing after the current handler runs.
  Stop,
}

/// Outcome of a pipeline run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  Completed,
  Stopped,
}
