// dqlens/src/commands/tables.rs
//
// USE CASE: list the catalog, one table name per line.

use anyhow::Context as _;

use super::{Context, build_workflow};

pub async fn execute(ctx: &Context) -> anyhow::Result<()> {
    let workflow = build_workflow(ctx)?;
    let tables = workflow
        .load_catalog()
        .await
        .context("Failed to load the table catalog")?;

    if tables.is_empty() {
        eprintln!("ℹ️  The catalog is empty.");
    }
    for table in &tables {
        println!("{}", table);
    }

    Ok(())
}
