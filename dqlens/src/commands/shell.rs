// dqlens/src/commands/shell.rs
//
// USE CASE: line-driven session over one workflow. Every failure is printed
// and the prompt comes back; only `quit` (or EOF) ends the session.

use anyhow::Context as _;
use std::io::{IsTerminal, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::{Context, build_workflow, renderer};
use crate::cli::OutputFormat;
use dqlens_core::application::{FetchOutcome, QualityWorkflow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Reload,
    Toggle(String),
    Selected,
    Fetch,
    Show(OutputFormat),
    Status,
    Help,
    Quit,
    Empty,
}

const HELP: &str = "\
Commands:
  list            tables of the catalog ([x] = selected)
  reload          reload the catalog
  toggle <name>   add or remove a table from the selection
  selected        current selection
  fetch           fetch metrics for the selection
  show [json]     render the last report
  status          workflow state
  help            this message
  quit            leave the shell";

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let rest: Vec<&str> = words.collect();

    let cmd = match (head, rest.as_slice()) {
        ("list" | "ls", []) => ShellCommand::List,
        ("reload", []) => ShellCommand::Reload,
        ("toggle" | "t", [name]) => ShellCommand::Toggle((*name).to_string()),
        ("toggle" | "t", _) => return Err("usage: toggle <name>".into()),
        ("selected", []) => ShellCommand::Selected,
        ("fetch" | "analyze", []) => ShellCommand::Fetch,
        ("show", []) | ("show", ["text"]) => ShellCommand::Show(OutputFormat::Text),
        ("show", ["json"]) => ShellCommand::Show(OutputFormat::Json),
        ("show", _) => return Err("usage: show [text|json]".into()),
        ("status", []) => ShellCommand::Status,
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "exit" | "q", []) => ShellCommand::Quit,
        (other, _) => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(cmd)
}

pub async fn execute(ctx: &Context) -> anyhow::Result<()> {
    let workflow = build_workflow(ctx)?;
    let interactive = std::io::stdin().is_terminal();

    // Initial catalog load, like opening the page. A failure is not fatal.
    match workflow.load_catalog().await {
        Ok(tables) => println!("📚 {} table(s) in the catalog. Type 'help'.", tables.len()),
        Err(e) => eprintln!("❌ {}", e),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("dqlens> ");
            std::io::stdout()
                .flush()
                .context("Failed to write the prompt")?;
        }

        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
        else {
            break;
        };

        match parse_command(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(cmd) => run(&workflow, cmd).await,
            Err(msg) => eprintln!("⚠️  {}", msg),
        }
    }

    workflow.teardown();
    debug!("Shell session closed");
    Ok(())
}

async fn run(workflow: &QualityWorkflow, cmd: ShellCommand) {
    match cmd {
        ShellCommand::Empty | ShellCommand::Quit => {}
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::List => {
            let state = workflow.snapshot();
            if state.catalog.is_empty() {
                println!("ℹ️  The catalog is empty (try 'reload').");
            }
            for table in &state.catalog {
                let mark = if state.selection.contains(table) { "x" } else { " " };
                println!("[{}] {}", mark, table);
            }
        }
        ShellCommand::Reload => match workflow.load_catalog().await {
            Ok(tables) => println!("📚 {} table(s) in the catalog.", tables.len()),
            Err(e) => eprintln!("❌ {}", e),
        },
        ShellCommand::Toggle(name) => {
            if workflow.toggle(name.clone()) {
                println!("✅ {} selected", name);
            } else {
                println!("➖ {} deselected", name);
            }
        }
        ShellCommand::Selected => {
            let selection = workflow.snapshot().selection;
            if selection.is_empty() {
                println!("ℹ️  Nothing selected.");
            }
            for table in selection.iter() {
                println!("   ➜ {}", table);
            }
        }
        ShellCommand::Fetch => match workflow.fetch().await {
            Ok(FetchOutcome::Applied(report)) => {
                println!("✨ Report received for {} table(s).", report.len());
                show(workflow, OutputFormat::Text);
            }
            Ok(FetchOutcome::Discarded { token, reason }) => {
                println!("⏭️  Request {} discarded ({:?})", token, reason);
            }
            Err(e) if e.is_validation() => eprintln!("⚠️  {}", e),
            Err(e) => eprintln!("❌ {}", e),
        },
        ShellCommand::Show(format) => show(workflow, format),
        ShellCommand::Status => {
            let state = workflow.snapshot();
            println!("   Phase:     {}", state.phase);
            println!("   Loading:   {}", state.loading());
            println!("   Busy:      {}", state.busy());
            println!("   Catalog:   {} table(s)", state.catalog.len());
            println!("   Selected:  {} table(s)", state.selection.len());
            match state.fetched_at {
                Some(at) => println!("   Report:    {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
                None => println!("   Report:    none"),
            }
            if let Some(err) = &state.last_error {
                println!("   Last error: {}", err);
            }
        }
    }
}

fn show(workflow: &QualityWorkflow, format: OutputFormat) {
    let Some(view) = workflow.view() else {
        println!("ℹ️  No report yet (try 'fetch').");
        return;
    };
    match renderer(format).render(&view) {
        Ok(out) => println!("{}", out),
        Err(e) => eprintln!("❌ {}", e),
    }
}
