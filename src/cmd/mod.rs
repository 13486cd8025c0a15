/*!
Subcommand implementations, one file per command group.

  src/cmd/
    mod.rs       (this file: declarations + re-exports)
    subject.rs   SummarySubject / EntryFilter value enums
    list.rs      list [PATH] [--only ...]
    ops.rs       delete / move / copy
    summary.rs   summary <file|folder> PATH, help-text
    status.rs    status / ping (auxiliary endpoints)
    shared.rs    RunContext, dispatch_intent, output helpers
    format.rs    boxed headers, tables, wrapping

Each subcommand exposes a public `execute_*` returning `anyhow::Result<()>`.
Argument structs derive `clap::Args`.
*/

pub mod format;
pub mod list;
pub mod ops;
pub mod shared;
pub mod status;
pub mod subject;
pub mod summary;

pub use list::{ListArgs, execute_list};
pub use ops::{DeleteArgs, TransferArgs, execute_copy, execute_delete, execute_move};
pub use shared::RunContext;
pub use status::{execute_ping, execute_status};
pub use subject::{EntryFilter, SummarySubject};
pub use summary::{SummaryArgs, execute_help_text, execute_summary};
