// dqlens/src/commands/mod.rs

pub mod analyze;
pub mod columns;
pub mod shell;
pub mod tables;

use anyhow::Context as _;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::OutputFormat;
use dqlens_core::application::QualityWorkflow;
use dqlens_core::application::ports::ReportRenderer;
use dqlens_core::infrastructure::adapters::build_adapters;
use dqlens_core::infrastructure::config::load_config;
use dqlens_core::infrastructure::render::{JsonRenderer, TerminalRenderer};

/// Global options shared by every command.
pub struct Context {
    pub project_dir: PathBuf,
    pub config: Option<PathBuf>,
}

/// Config -> adapters -> workflow. Nothing touches the network here.
pub fn build_workflow(ctx: &Context) -> anyhow::Result<QualityWorkflow> {
    let config = load_config(&ctx.project_dir, ctx.config.as_deref()).with_context(|| {
        format!(
            "Failed to load configuration from {:?}",
            ctx.config.as_deref().unwrap_or(&ctx.project_dir)
        )
    })?;
    debug!(
        base_url = %config.service.base_url,
        policy = ?config.fetch.policy,
        "Configuration loaded"
    );

    let adapters = build_adapters(&config).with_context(|| {
        format!("Failed to set up adapters for {}", config.service.base_url)
    })?;
    Ok(QualityWorkflow::new(
        adapters.catalog,
        adapters.metrics,
        config.fetch.policy,
    ))
}

pub fn renderer(format: OutputFormat) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Text => Box::new(TerminalRenderer::new(styled_stdout())),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

/// Colours only for a real terminal, and never with NO_COLOR set.
fn styled_stdout() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
