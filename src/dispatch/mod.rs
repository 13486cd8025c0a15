/*!
Command dispatcher.

The single serialization boundary between typed intents and the executor's
free-text protocol:

  build(&intent)              -> instruction text      (intent.rs)
  Executor::send(instruction) -> ExecutionResult       (executor/)
  interpret(&intent, result)  -> DispatchOutcome       (outcome.rs)

`Dispatcher` chains the three for callers that just want an outcome. It adds
no retry, no deduplication and no follow-up refresh after mutations; those are
caller concerns.
*/

mod intent;
mod outcome;

pub use intent::{CommandIntent, build};
pub use outcome::{DispatchOutcome, interpret};

use crate::executor::Executor;

/// Build, send and interpret one intent at a time.
#[derive(Debug, Clone)]
pub struct Dispatcher<E> {
    executor: E,
}

impl<E: Executor> Dispatcher<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub async fn dispatch(&self, intent: &CommandIntent) -> DispatchOutcome {
        let instruction = build(intent);
        tracing::debug!(verb = intent.verb(), %instruction, "dispatching");

        let result = self.executor.send(&instruction).await;
        let outcome = interpret(intent, result);

        match &outcome {
            DispatchOutcome::Failure(msg) => {
                tracing::warn!(verb = intent.verb(), error = %msg, "operation failed")
            }
            other => tracing::debug!(verb = intent.verb(), outcome = other.kind(), "done"),
        }
        outcome
    }
}
