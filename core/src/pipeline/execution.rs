// core/src/pipeline/execution.rs

use crate::pipeline::context_data::ContextData;
use crate::pipeline::control::{PipelineControl, PipelineResult};
use crate::pipeline::definition::{Handler, Pipeline};
use crate::pipeline::error::PipelineError;
use tracing::{event, instrument, Instrument, Level};

enum StepOutcome<Err> {
  Continue,
  Stopped,
  Failed(Err),
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Runs every step in order against `ctx_data`.
  ///
  /// The first handler error aborts the run and is returned as-is. A handler
  /// returning [`PipelineControl::Stop`] ends the run with [`PipelineResult::Stopped`].
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let Some(handlers) = self.on.get(step_name).filter(|v| !v.is_empty()) else {
        if step_def.optional {
          event!(Level::DEBUG, step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, step_name, "Non-optional step has no handlers.");
        return Err(Err::from(PipelineError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      };

      let step_span = tracing::info_span!("pipeline_step", step_name, step_index = step_idx);
      match run_handlers(handlers, &ctx_data).instrument(step_span).await {
        StepOutcome::Continue => {}
        StepOutcome::Stopped => return Ok(PipelineResult::Stopped),
        StepOutcome::Failed(e) => return Err(e),
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }
}

async fn run_handlers<TData, Err>(handlers: &[Handler<TData, Err>], ctx_data: &ContextData<TData>) -> StepOutcome<Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  for handler_fn in handlers {
    match handler_fn(ctx_data.clone()).await {
      Ok(PipelineControl::Continue) => {}
      Ok(PipelineControl::Stop) => {
        event!(Level::INFO, "Pipeline stopped by a handler.");
        return StepOutcome::Stopped;
      }
      Err(e) => {
        event!(Level::WARN, error = %e, "Handler failed.");
        return StepOutcome::Failed(e);
      }
    }
  }
  StepOutcome::Continue
}
