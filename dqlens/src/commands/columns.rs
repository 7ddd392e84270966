// dqlens/src/commands/columns.rs
//
// USE CASE: show the column list of the requested tables.

use anyhow::Context as _;

use super::{Context, build_workflow};

pub async fn execute(ctx: &Context, tables: Vec<String>) -> anyhow::Result<()> {
    let workflow = build_workflow(ctx)?;
    let listing = workflow
        .describe_columns(&tables)
        .await
        .with_context(|| format!("Failed to list the columns of {}", tables.join(", ")))?;

    for (table, columns) in &listing {
        match columns {
            Some(columns) => {
                println!("📋 {} ({} columns)", table, columns.len());
                for column in columns {
                    println!("   ➜ {}", column);
                }
            }
            None => println!("❓ {}: table not found", table),
        }
    }

    Ok(())
}
