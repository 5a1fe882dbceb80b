use anyhow::{Context, Result};
use journeyflow_core::models::JourneyId;
use journeyflow_core::{AutosaveConfig, DesignerSession, JourneyApi, JourneyList};
use serde_json::json;
use std::sync::Arc;

use crate::cli::JourneyCommands;
use crate::commands::open_session;
use crate::output::{OutputFormat, json::print_json, table};

pub async fn run(
    api: Arc<dyn JourneyApi>,
    command: JourneyCommands,
    autosave: &AutosaveConfig,
    format: OutputFormat,
) -> Result<()> {
    match command {
        JourneyCommands::List { sort } => {
            let mut list = JourneyList::new(api);
            list.set_sort(sort.into());
            list.load().await.context("Failed to list journeys")?;

            if format.is_json() {
                return print_json(&list.journeys());
            }
            if list.journeys().is_empty() {
                println!("No journeys yet. Create one with `journeyflow journey create <name>`.");
                return Ok(());
            }
            table::print_table(table::journeys(list.journeys()))
        }
        JourneyCommands::Show { id } => {
            let session = open_session(api, JourneyId::Persisted(id), autosave, false).await?;
            show_journey(&session, format)
        }
        JourneyCommands::Create { name, description } => {
            let mut session = DesignerSession::new(api, JourneyId::New, autosave);
            session.load().await?;
            session.set_details(name, description);
            let saved = session.save().await.context("Failed to create journey")?;

            if format.is_json() {
                return print_json(&saved);
            }
            println!("Journey created: {}", saved.id);
            Ok(())
        }
        JourneyCommands::Rename {
            id,
            name,
            description,
        } => {
            let mut session = open_session(api, JourneyId::Persisted(id), autosave, false).await?;
            let description = description.or_else(|| session.description().map(str::to_string));
            session.set_details(name, description);
            let saved = session.save().await.context("Failed to rename journey")?;

            if format.is_json() {
                return print_json(&saved);
            }
            println!("Journey renamed: {} ({})", saved.name, saved.id);
            Ok(())
        }
        JourneyCommands::Delete { id } => {
            api.delete_journey(id)
                .await
                .with_context(|| format!("Failed to delete journey {}", id))?;

            if format.is_json() {
                return print_json(&json!({ "deleted": id }));
            }
            println!("Journey deleted: {}", id);
            Ok(())
        }
    }
}

pub(crate) fn show_journey(session: &DesignerSession, format: OutputFormat) -> Result<()> {
    let graph = session.graph();

    if format.is_json() {
        return print_json(&json!({
            "journey": session.journey(),
            "workflow": graph.to_workflow(),
        }));
    }

    println!("Journey:     {}", session.journey_id());
    println!("Name:        {}", session.name().unwrap_or("-"));
    println!("Description: {}", session.description().unwrap_or("-"));
    if let Some(status) = session.journey().and_then(|j| j.status.as_deref()) {
        println!("Status:      {}", status);
    }

    if graph.nodes().is_empty() {
        println!("\nNo steps.");
    } else {
        println!("\nSteps:");
        table::print_table(table::nodes(graph.nodes()))?;
    }
    if !graph.edges().is_empty() {
        println!("\nConnections:");
        table::print_table(table::edges(graph.edges()))?;
    }
    Ok(())
}
