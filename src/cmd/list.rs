/*!
`list.rs`

Implements `drivecmd list [PATH] [--only all|files|folders]`.

Sends `list <PATH>` (PATH defaults to `/`), parses the numbered listing and
prints it as a table, or as JSON with `--json`:

{
  "status": "ok",
  "intent": "list",
  "path": "/",
  "elapsed_ms": 31,
  "count": 2,
  "folders": 1,
  "files": 1,
  "entries": [
    { "name": "report.pdf", "kind": "file", "category": "other",
      "type_label": "application/pdf", "size_label": "1.2 MB",
      "modified_label": "2024-01-01" }
  ]
}

Counts are taken after `--only` filtering. Listing text the parser cannot
read yields an empty table, not an error.
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, box_header, category_icon, color, icon, table};
use crate::cmd::shared::{
    RunContext, dispatch_intent, output_error, print_json, rooted, server_subtitle,
};
use crate::cmd::subject::EntryFilter;
use crate::dispatch::{CommandIntent, DispatchOutcome};
use crate::listing::{ListingEntry, split_by_kind};

/// CLI arguments for `drivecmd list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Folder to list
    #[arg(default_value = "/")]
    pub path: String,

    /// Show only files or only folders
    #[arg(long, value_enum, default_value_t = EntryFilter::All)]
    pub only: EntryFilter,
}

pub fn execute_list(ctx: &RunContext, args: ListArgs) -> Result<()> {
    let path = rooted(&args.path);
    let intent = CommandIntent::list(path.clone());
    let dispatched = dispatch_intent(ctx, &intent)?;

    let entries = match dispatched.outcome {
        DispatchOutcome::Listing(entries) => args.only.apply(entries),
        DispatchOutcome::Failure(msg) => return output_error(ctx.json, "List failed", &msg),
        other => {
            return output_error(
                ctx.json,
                "List failed",
                &format!("unexpected {} outcome for list", other.kind()),
            );
        }
    };

    if ctx.json {
        print_json(&listing_json(&path, dispatched.elapsed_ms, &entries));
        return Ok(());
    }

    let style = StyleOptions::detect();
    let (files, folders) = split_by_kind(entries.clone());
    let title = format!(
        "{} {path} ({} folders, {} files)",
        icon("drive", &style),
        folders.len(),
        files.len()
    );
    println!(
        "{}",
        box_header(
            title.trim(),
            Some(server_subtitle(ctx, dispatched.elapsed_ms).as_str()),
            &style
        )
    );

    if entries.is_empty() {
        println!(
            "{}",
            color(Role::Dim, format!("{} (no entries)", icon("info", &style)), &style)
        );
        return Ok(());
    }

    println!(
        "{}",
        table(
            &["#", "NAME", "KIND", "TYPE", "SIZE", "MODIFIED"],
            &entry_rows(&entries, &style),
            &style
        )
    );
    Ok(())
}

fn entry_rows(entries: &[ListingEntry], style: &StyleOptions) -> Vec<Vec<String>> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, e)| {
            let glyph = category_icon(e.category(), style);
            let name = if glyph.is_empty() {
                e.name.clone()
            } else {
                format!("{glyph} {}", e.name)
            };
            vec![
                (idx + 1).to_string(),
                name,
                e.kind.to_string(),
                e.type_label.clone(),
                e.size_label.clone(),
                e.modified_label.clone(),
            ]
        })
        .collect()
}

fn listing_json(path: &str, elapsed_ms: u128, entries: &[ListingEntry]) -> serde_json::Value {
    let folders = entries.iter().filter(|e| e.is_folder()).count();
    let items: Vec<serde_json::Value> = entries
        .iter()
        .map(|e| {
            let mut v = serde_json::to_value(e).unwrap_or(serde_json::Value::Null);
            if let serde_json::Value::Object(ref mut map) = v {
                map.insert("category".into(), e.category().as_str().into());
            }
            v
        })
        .collect();
    serde_json::json!({
        "status": "ok",
        "intent": "list",
        "path": path,
        "elapsed_ms": elapsed_ms,
        "count": entries.len(),
        "folders": folders,
        "files": entries.len() - folders,
        "entries": items,
    })
}
