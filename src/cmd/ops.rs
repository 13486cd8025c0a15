/*!
`ops.rs`

Mutating subcommands: `delete PATH`, `move SRC DST`, `copy SRC DST`.

Each sends exactly one instruction. On success the executor's text is not
shown (the outcome is a bare acknowledgement); run `list` afterwards to see
the new state. Nothing is refreshed automatically.

JSON success:
{ "status": "ok", "intent": "move", "instruction": "move /a to /b", "elapsed_ms": 12 }
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, box_header, color, icon};
use crate::cmd::shared::{
    RunContext, dispatch_intent, output_error, print_json, rooted, server_subtitle,
};
use crate::dispatch::{CommandIntent, DispatchOutcome};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// File to delete
    pub path: String,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Source file
    pub source: String,

    /// Destination folder
    pub destination: String,
}

pub fn execute_delete(ctx: &RunContext, args: DeleteArgs) -> Result<()> {
    run_mutation(ctx, CommandIntent::delete(rooted(&args.path)))
}

pub fn execute_move(ctx: &RunContext, args: TransferArgs) -> Result<()> {
    run_mutation(
        ctx,
        CommandIntent::move_to(rooted(&args.source), rooted(&args.destination)),
    )
}

pub fn execute_copy(ctx: &RunContext, args: TransferArgs) -> Result<()> {
    run_mutation(
        ctx,
        CommandIntent::copy_to(rooted(&args.source), rooted(&args.destination)),
    )
}

fn run_mutation(ctx: &RunContext, intent: CommandIntent) -> Result<()> {
    let dispatched = dispatch_intent(ctx, &intent)?;
    let title = format!("{} failed", capitalize(intent.verb()));

    match dispatched.outcome {
        DispatchOutcome::Acknowledged => {}
        DispatchOutcome::Failure(msg) => return output_error(ctx.json, &title, &msg),
        other => {
            return output_error(
                ctx.json,
                &title,
                &format!("unexpected {} outcome", other.kind()),
            );
        }
    }

    if ctx.json {
        print_json(&serde_json::json!({
            "status": "ok",
            "intent": intent.verb(),
            "instruction": dispatched.instruction,
            "elapsed_ms": dispatched.elapsed_ms,
        }));
        return Ok(());
    }

    let style = StyleOptions::detect();
    let title = format!("{} {}", icon("ok", &style), success_line(&intent));
    println!(
        "{}",
        box_header(
            title.trim(),
            Some(server_subtitle(ctx, dispatched.elapsed_ms).as_str()),
            &style
        )
    );
    println!(
        "{} {}",
        icon("info", &style),
        color(
            Role::Dim,
            format!("Run `drivecmd list {}` to refresh", refresh_path(&intent)),
            &style
        )
    );
    Ok(())
}

fn success_line(intent: &CommandIntent) -> String {
    match intent {
        CommandIntent::Delete { path } => format!("Deleted {path}"),
        CommandIntent::Move {
            source,
            destination,
        } => format!("Moved {source} to {destination}"),
        CommandIntent::Copy {
            source,
            destination,
        } => format!("Copied {source} to {destination}"),
        other => format!("{} done", capitalize(other.verb())),
    }
}

/// Folder whose listing changed: the parent for delete, the destination otherwise.
fn refresh_path(intent: &CommandIntent) -> String {
    match intent {
        CommandIntent::Delete { path } => parent_of(path),
        CommandIntent::Move { destination, .. } | CommandIntent::Copy { destination, .. } => {
            destination.clone()
        }
        _ => "/".to_string(),
    }
}

fn parent_of(path: &str) -> String {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some(("", _)) | None => "/".to_string(),
        Some((parent, _)) => parent.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
