/*!
`summary.rs`

Text-returning subcommands:
  drivecmd summary <file|folder> PATH   -> `file summary PATH` / `folder summary PATH`
  drivecmd help-text                    -> `help`

The executor's text is printed as-is in JSON mode and paragraph-wrapped to
the terminal width in human mode.

JSON success:
{ "status": "ok", "intent": "summarize", "instruction": "...", "elapsed_ms": 80, "text": "..." }
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{StyleOptions, box_header, icon, wrap_paragraphs};
use crate::cmd::shared::{
    Dispatched, RunContext, dispatch_intent, output_error, print_json, rooted, server_subtitle,
};
use crate::cmd::subject::SummarySubject;
use crate::dispatch::{CommandIntent, DispatchOutcome};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// What to summarize
    #[arg(value_enum)]
    pub subject: SummarySubject,

    /// File or folder path
    pub path: String,
}

pub fn execute_summary(ctx: &RunContext, args: SummaryArgs) -> Result<()> {
    let intent = args.subject.intent(rooted(&args.path));
    let title = format!("{} summary ({})", args.subject, rooted(&args.path));
    run_text(ctx, &intent, &title)
}

pub fn execute_help_text(ctx: &RunContext) -> Result<()> {
    run_text(ctx, &CommandIntent::Help, "Executor help")
}

fn run_text(ctx: &RunContext, intent: &CommandIntent, title: &str) -> Result<()> {
    let dispatched = dispatch_intent(ctx, intent)?;
    let text = match &dispatched.outcome {
        DispatchOutcome::Text(t) => t.clone(),
        DispatchOutcome::Failure(msg) => {
            return output_error(ctx.json, &format!("{title}: failed"), msg);
        }
        other => {
            return output_error(
                ctx.json,
                title,
                &format!("unexpected {} outcome", other.kind()),
            );
        }
    };

    if ctx.json {
        print_json(&text_json(intent, &dispatched, &text));
        return Ok(());
    }

    let style = StyleOptions::detect();
    let heading = format!("{} {title}", icon("summary", &style));
    println!(
        "{}",
        box_header(
            heading.trim(),
            Some(server_subtitle(ctx, dispatched.elapsed_ms).as_str()),
            &style
        )
    );
    for line in wrap_paragraphs(&text, style.term_width) {
        println!("{line}");
    }
    Ok(())
}

fn text_json(intent: &CommandIntent, dispatched: &Dispatched, text: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "intent": intent.verb(),
        "instruction": dispatched.instruction,
        "elapsed_ms": dispatched.elapsed_ms,
        "text": text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        cmd: TestSub,
    }

    #[derive(clap::Subcommand, Debug)]
    enum TestSub {
        Summary(SummaryArgs),
    }

    #[test]
    fn clap_parses_subject_and_path() {
        let cli = TestCli::try_parse_from(["t", "summary", "folder", "/Photos"]).unwrap();
        let TestSub::Summary(a) = cli.cmd;
        assert_eq!(a.subject, SummarySubject::Folder);
        assert_eq!(a.path, "/Photos");
    }

    #[test]
    fn clap_rejects_unknown_subject() {
        assert!(TestCli::try_parse_from(["t", "summary", "drive", "/"]).is_err());
    }

    #[test]
    fn text_is_kept_verbatim_in_json() {
        let dispatched = Dispatched {
            instruction: "help".into(),
            outcome: DispatchOutcome::Text("  a\n\nb ".into()),
            elapsed_ms: 1,
        };
        let v = text_json(&CommandIntent::Help, &dispatched, "  a\n\nb ");
        assert_eq!(v["text"], "  a\n\nb ");
        assert_eq!(v["intent"], "help");
    }
}
