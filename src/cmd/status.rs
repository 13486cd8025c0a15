/*!
`status.rs`

Auxiliary executor endpoints, outside the free-text protocol:

  drivecmd status   GET api/auth/status?whatsapp_number=<identity>
  drivecmd ping     GET api/test/connection

`status` needs an identity (`-w` / DRIVECMD_WHATSAPP / config file).
*/

use anyhow::Result;

use crate::cmd::format::{Role, StyleOptions, box_header, color, icon};
use crate::cmd::shared::{Reported, RunContext, output_error, print_json};
use crate::executor::{AuthStatus, ConnectionCheck, ExecutorError};
use crate::utils;

pub fn execute_status(ctx: &RunContext) -> Result<()> {
    let executor = ctx.settings.executor()?;
    match utils::block_on(executor.auth_status())? {
        Ok(status) => {
            if ctx.json {
                print_json(&status_json(&status));
            } else {
                print_status(ctx, &status);
            }
            Ok(())
        }
        Err(e) => output_error(ctx.json, "Status failed", &describe(&e)),
    }
}

pub fn execute_ping(ctx: &RunContext) -> Result<()> {
    let executor = ctx.settings.executor()?;
    let check = match utils::block_on(executor.test_connection())? {
        Ok(check) => check,
        Err(e) => {
            tracing::warn!(error = %e, "connection test failed");
            return output_error(ctx.json, "Ping failed", crate::executor::CONNECTION_FAILED);
        }
    };

    if ctx.json {
        print_json(&ping_json(ctx, &check));
    } else {
        let style = StyleOptions::detect();
        let title = ping_title(&check, &style);
        let subtitle = format!("server={}", ctx.settings.server);
        println!("{}", box_header(&title, Some(subtitle.as_str()), &style));
        if let Some(msg) = &check.message {
            println!("{}", color(Role::Muted, msg, &style));
        }
    }

    if check.ok {
        Ok(())
    } else {
        let msg = check
            .message
            .unwrap_or_else(|| "connection test failed".to_string());
        Err(Reported(msg).into())
    }
}

/// Plain title; `box_header` applies the color so widths stay right.
fn ping_title(check: &ConnectionCheck, style: &StyleOptions) -> String {
    let (tag, text) = if check.ok {
        ("ok", "Executor reachable")
    } else {
        ("error", "Executor reported a failed self-test")
    };
    format!("{} {text}", icon(tag, style)).trim().to_string()
}

fn describe(e: &ExecutorError) -> String {
    match e {
        e if e.is_unauthorized() => format!("Not authorized: {e}"),
        ExecutorError::Request(_) => crate::executor::CONNECTION_FAILED.to_string(),
        other => other.to_string(),
    }
}

fn print_status(ctx: &RunContext, status: &AuthStatus) {
    let style = StyleOptions::detect();
    let title = format!("{} Drive authorization", icon("link", &style));
    let subtitle = format!("server={}", ctx.settings.server);
    println!("{}", box_header(title.trim(), Some(subtitle.as_str()), &style));
    let state = if status.authenticated {
        color(Role::Success, "connected", &style)
    } else {
        color(Role::Error, "not connected", &style)
    };
    println!(
        "{} {}: {state}",
        color(Role::Accent, "WhatsApp", &style),
        status.whatsapp_number
    );
}

fn status_json(status: &AuthStatus) -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "whatsapp_number": status.whatsapp_number,
        "authenticated": status.authenticated,
    })
}

fn ping_json(ctx: &RunContext, check: &ConnectionCheck) -> serde_json::Value {
    serde_json::json!({
        "status": if check.ok { "ok" } else { "error" },
        "server": ctx.settings.server.to_string(),
        "message": check.message,
    })
}
