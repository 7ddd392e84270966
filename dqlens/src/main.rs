// dqlens/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use dqlens_core::QualityError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug dqlens analyze ... pour voir les détails.
    // Sur stderr : stdout reste réservé au rapport.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        project_dir: cli.project_dir,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Tables => commands::tables::execute(&ctx).await,
        Commands::Columns { tables } => commands::columns::execute(&ctx, tables).await,
        Commands::Analyze {
            tables,
            all,
            format,
        } => commands::analyze::execute(&ctx, tables, all, format).await,
        Commands::Shell => commands::shell::execute(&ctx).await,
    };

    if let Err(e) = result {
        report_error(e);
        // Exit with error code for CI/CD
        std::process::exit(1);
    }

    Ok(())
}

fn report_error(err: anyhow::Error) {
    match err.downcast_ref::<QualityError>() {
        // Empty selection: a notice, not a failure report.
        Some(e) if e.is_validation() => {
            eprintln!("⚠️  {}", e);
            eprintln!("👉 Pick tables with '-t <table>' or use '--all'.");
        }
        _ => eprintln!("❌ {:?}", err),
    }
}
