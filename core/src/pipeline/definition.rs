// core/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` type: an ordered list of named steps and the
//! handlers registered against them.

use crate::pipeline::context_data::ContextData;
use crate::pipeline::control::PipelineControl;
use crate::pipeline::error::PipelineError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// A step handler. Receives a clone of the run's context handle and resolves
/// to a control signal or the pipeline's error type.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

/// A named step. Optional steps with no handlers are skipped instead of failing the run.
#[derive(Debug, Clone)]
pub struct StepDef {
  pub name: String,
  pub optional: bool,
}

pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(step_name, optional)` pairs, in execution order.
  pub fn new(step_defs: &[(&str, bool)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
      })
      .collect();

    Self {
      steps,
      on: HashMap::new(),
    }
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  /// Panics on an unknown step name: registering against a typo is a wiring bug,
  /// not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("Pipeline setup error: step '{}' is not defined.", step_name);
    }
  }

  /// Registers a handler for a step. Handlers of one step run in registration order.
  pub fn on_root<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler = wrap_handler(handler_fn);
    self.on.entry(step_name.to_string()).or_default().push(handler);
  }
}

fn wrap_handler<TData, Err, F, UserErr>(
  handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
) -> Handler<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: 'static,
  F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
  UserErr: Into<Err> + Send + Sync + 'static,
{
  Box::new(
    move |ctx_data: ContextData<TData>| -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>> {
      let user_fut = handler_fn(ctx_data);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    },
  )
}
