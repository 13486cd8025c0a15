//! Interpretation of executor results per intent.

use serde::Serialize;

use super::intent::CommandIntent;
use crate::executor::ExecutionResult;
use crate::listing::{self, ListingEntry};

/// Typed result of one dispatched intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Listing(Vec<ListingEntry>),
    Text(String),
    Acknowledged,
    Failure(String),
}

impl DispatchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, DispatchOutcome::Failure(_))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchOutcome::Listing(_) => "listing",
            DispatchOutcome::Text(_) => "text",
            DispatchOutcome::Acknowledged => "acknowledged",
            DispatchOutcome::Failure(_) => "failure",
        }
    }
}

/// Map a normalized executor result to the outcome the caller renders.
pub fn interpret(intent: &CommandIntent, result: ExecutionResult) -> DispatchOutcome {
    if !result.success {
        let message = result
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| intent.fallback_message().to_string());
        return DispatchOutcome::Failure(message);
    }

    match intent {
        CommandIntent::List { .. } => DispatchOutcome::Listing(listing::parse(&result.raw)),
        _ if intent.is_mutation() => DispatchOutcome::Acknowledged,
        _ => DispatchOutcome::Text(result.raw),
    }
}
