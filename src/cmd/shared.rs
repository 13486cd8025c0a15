/*!
shared.rs - helpers used by every subcommand.

  - RunContext: resolved settings + output mode
  - dispatch_intent: build -> send -> interpret on a current-thread runtime
  - rooted: turn a user-typed path into a `/`-rooted one
  - output_error / print_json (Reported marks errors already shown)
*/

use std::time::Instant;

use anyhow::Result;

use crate::cmd::format::{Role, StyleOptions, box_header, color, icon};
use crate::config::Settings;
use crate::dispatch::{CommandIntent, DispatchOutcome, Dispatcher};
use crate::utils;

/// Everything a subcommand needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub settings: Settings,
    pub json: bool,
}

/// Result of one dispatched intent plus timing for display.
#[derive(Debug)]
pub struct Dispatched {
    pub instruction: String,
    pub outcome: DispatchOutcome,
    pub elapsed_ms: u128,
}

/// Send one intent and wait for its outcome.
pub fn dispatch_intent(ctx: &RunContext, intent: &CommandIntent) -> Result<Dispatched> {
    let dispatcher = Dispatcher::new(ctx.settings.executor()?);
    let started = Instant::now();
    let outcome = utils::block_on(dispatcher.dispatch(intent))?;
    Ok(Dispatched {
        instruction: intent.to_string(),
        outcome,
        elapsed_ms: started.elapsed().as_millis(),
    })
}

/// Prefix `/` when missing; empty input means the root.
pub fn rooted(path: &str) -> String {
    let p = path.trim();
    if p.starts_with('/') {
        p.to_string()
    } else {
        format!("/{p}")
    }
}

/// Subtitle shared by boxed headers: `server=<url> • <ms>ms`.
pub fn server_subtitle(ctx: &RunContext, elapsed_ms: u128) -> String {
    format!("server={} • {elapsed_ms}ms", ctx.settings.server)
}

pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}

/// A failure that has already been printed; `main` only sets the exit code.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Print an error in the requested mode, then fail the command.
pub fn output_error(json: bool, title: &str, msg: &str) -> Result<()> {
    if json {
        print_json(&serde_json::json!({"status": "error", "error": msg}));
    } else {
        let style = StyleOptions::detect();
        let title = format!("{} {title}", icon("error", &style));
        println!("{}", box_header(title.trim(), None, &style));
        println!("{}", color(Role::Error, msg, &style));
    }
    Err(Reported(msg.to_string()).into())
}
