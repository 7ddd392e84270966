// dqlens/src/commands/analyze.rs
//
// USE CASE: select -> fetch -> render, in one shot.

use anyhow::{Context as _, bail};
use tracing::warn;

use super::{Context, build_workflow, renderer};
use crate::cli::OutputFormat;
use dqlens_core::application::{FetchOutcome, present_report};

pub async fn execute(
    ctx: &Context,
    tables: Vec<String>,
    all: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let workflow = build_workflow(ctx)?;

    // 1. Selection
    if all {
        let catalog = workflow
            .load_catalog()
            .await
            .context("Failed to load the table catalog")?;
        for table in catalog {
            workflow.toggle(table);
        }
    } else {
        for table in tables {
            if !workflow.toggle(table.clone()) {
                // Given twice on the command line: keep it selected.
                workflow.toggle(table);
            }
        }
    }

    let selected = workflow.snapshot().selection.len();
    if format == OutputFormat::Text && selected > 0 {
        println!("🔍 Analyzing {} table(s)...\n", selected);
    }

    // 2. Fetch (an empty selection fails here, before any request)
    let outcome = workflow
        .fetch()
        .await
        .with_context(|| format!("Failed to analyze {} table(s)", selected))?;
    let report = match outcome {
        FetchOutcome::Applied(report) => report,
        FetchOutcome::Discarded { token, reason } => {
            warn!(%token, ?reason, "Report discarded");
            bail!("request {token} was discarded ({reason:?})");
        }
    };

    // 3. Render
    let output = renderer(format)
        .render(&present_report(&report))
        .context("Failed to render the report")?;
    print!("{}", output);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}
