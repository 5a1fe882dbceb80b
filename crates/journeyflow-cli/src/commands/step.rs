use anyhow::{Context, Result, anyhow};
use journeyflow_core::designer::StepForm;
use journeyflow_core::models::{FlowNode, JourneyId, Position};
use journeyflow_core::{AutosaveConfig, DesignerSession, JourneyApi, SyncError};
use serde_json::json;
use std::sync::Arc;

use crate::cli::{StepCommands, StepFields};
use crate::commands::{flush, open_session};
use crate::output::{OutputFormat, json::print_json};

pub async fn run(
    api: Arc<dyn JourneyApi>,
    command: StepCommands,
    autosave: &AutosaveConfig,
    format: OutputFormat,
) -> Result<()> {
    match command {
        StepCommands::Add {
            journey,
            name,
            fields,
        } => {
            let mut session = open(api, journey, autosave, false).await?;
            session.open_add_step();
            let form = session.modal_mut().ok_or(SyncError::NoActiveForm)?;
            form.name = name;
            apply_fields(form, fields);
            session.submit_modal().await.context("Failed to add step")?;
            flush(&mut session).await?;

            let node = session
                .graph()
                .nodes()
                .last()
                .ok_or_else(|| anyhow!("Created step missing from journey {}", journey))?;
            print_node(node, "Step added", format)
        }
        StepCommands::Edit {
            journey,
            step,
            name,
            fields,
        } => {
            let mut session = open(api, journey, autosave, false).await?;
            session.open_node_menu(&step, 0.0, 0.0)?;
            session.menu_edit()?;
            let form = session.modal_mut().ok_or(SyncError::NoActiveForm)?;
            if let Some(name) = name {
                form.name = name;
            }
            apply_fields(form, fields);
            session.submit_modal().await.context("Failed to update step")?;
            flush(&mut session).await?;

            print_node(require_node(&session, &step)?, "Step updated", format)
        }
        StepCommands::Remove {
            journey,
            step,
            cascade,
        } => {
            let mut session = open(api, journey, autosave, cascade).await?;
            session.delete_node(&step).await.context("Failed to delete step")?;
            flush(&mut session).await?;

            if format.is_json() {
                return print_json(&json!({ "deleted": step }));
            }
            println!("Step deleted: {}", step);
            Ok(())
        }
        StepCommands::Move {
            journey,
            step,
            x,
            y,
        } => {
            let mut session = open(api, journey, autosave, false).await?;
            session.move_node(&step, Position::new(x, y))?;
            flush(&mut session).await?;

            print_node(require_node(&session, &step)?, "Step moved", format)
        }
    }
}

async fn open(
    api: Arc<dyn JourneyApi>,
    journey: i64,
    autosave: &AutosaveConfig,
    cascade: bool,
) -> Result<DesignerSession> {
    open_session(api, JourneyId::Persisted(journey), autosave, cascade).await
}

fn require_node<'a>(session: &'a DesignerSession, id: &str) -> Result<&'a FlowNode> {
    session
        .graph()
        .node(id)
        .ok_or_else(|| SyncError::NodeNotFound(id.to_string()).into())
}

/// Copies the fields given on the command line into the form.
pub(crate) fn apply_fields(form: &mut StepForm, fields: StepFields) {
    if let Some(step_type) = fields.step_type {
        form.step_type = step_type;
    }
    if let Some(channel) = fields.channel {
        form.channel = channel;
    }
    if let Some(budget) = fields.budget {
        form.budget = budget;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
}

fn print_node(node: &FlowNode, message: &str, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        return print_json(node);
    }

    println!("{}: {} [{}]", message, node.title(), node.id);
    println!(
        "  channel {}, budget ${}, at ({}, {})",
        node.data.channel, node.data.budget, node.position.x, node.position.y
    );
    Ok(())
}
