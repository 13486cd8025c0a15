//! drivecmd: typed client for a free-text cloud-drive command executor.
//!
//! The executor accepts one English-like instruction per request
//! (`POST api/execute`) and answers with free text. This crate builds those
//! instructions from typed intents, sends them, and turns the replies back
//! into typed outcomes, including a parser for the numbered file listing.
//!
//! ```no_run
//! use drivecmd::{CommandIntent, Dispatcher, DispatchOutcome};
//! use drivecmd::executor::{HttpExecutor, parse_server};
//!
//! # async fn run() -> Result<(), drivecmd::executor::ExecutorError> {
//! let executor = HttpExecutor::new(parse_server("http://localhost:5000")?);
//! let dispatcher = Dispatcher::new(executor);
//! if let DispatchOutcome::Listing(entries) = dispatcher.dispatch(&CommandIntent::list("/")).await {
//!     for e in entries {
//!         println!("{} {}", e.kind, e.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod cmd;
pub mod config;
pub mod dispatch;
pub mod executor;
pub mod listing;
pub mod utils;

pub use dispatch::{CommandIntent, DispatchOutcome, Dispatcher, build, interpret};
pub use executor::{ExecutionResult, Executor};
pub use listing::{EntryKind, ListingEntry, parse};
