use anyhow::{Context, Result, anyhow};
use journeyflow_core::models::JourneyId;
use journeyflow_core::{AutosaveConfig, JourneyApi};
use std::sync::Arc;

use crate::cli::ConnectArgs;
use crate::commands::{flush, open_session};
use crate::output::{OutputFormat, json::print_json};

pub async fn connect(
    api: Arc<dyn JourneyApi>,
    args: ConnectArgs,
    autosave: &AutosaveConfig,
    format: OutputFormat,
) -> Result<()> {
    let mut session =
        open_session(api, JourneyId::Persisted(args.journey), autosave, false).await?;
    session
        .connect(&args.source, &args.target)
        .await
        .with_context(|| format!("Failed to connect {} -> {}", args.source, args.target))?;
    flush(&mut session).await?;

    let edge = session
        .graph()
        .edges()
        .iter()
        .find(|e| e.connects(&args.source, &args.target))
        .ok_or_else(|| anyhow!("Connection {} -> {} missing after save", args.source, args.target))?;

    if format.is_json() {
        return print_json(edge);
    }
    println!("Connected {} -> {} ({})", edge.source, edge.target, edge.id);
    Ok(())
}

pub async fn disconnect(
    api: Arc<dyn JourneyApi>,
    args: ConnectArgs,
    autosave: &AutosaveConfig,
    format: OutputFormat,
) -> Result<()> {
    let mut session =
        open_session(api, JourneyId::Persisted(args.journey), autosave, false).await?;
    let edge_id = session
        .graph()
        .edges()
        .iter()
        .find(|e| e.connects(&args.source, &args.target))
        .map(|e| e.id.clone())
        .ok_or_else(|| anyhow!("No connection from {} to {}", args.source, args.target))?;

    session.delete_edge(&edge_id).await?;
    flush(&mut session).await?;

    if format.is_json() {
        return print_json(&serde_json::json!({ "deleted": edge_id }));
    }
    println!("Connection removed: {}", edge_id);
    Ok(())
}
