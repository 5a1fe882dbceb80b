//! Interactive designer shell.
//!
//! Each line is one gesture on the open journey. The autosave deadline is
//! raced against stdin, so unsaved changes are flushed after the configured
//! idle time even while the shell waits for input.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use journeyflow_core::designer::{MenuAction, StepForm};
use journeyflow_core::models::{JourneyId, Position};
use journeyflow_core::{AutosaveConfig, DesignerSession, JourneyApi, SyncError};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::journey::show_journey;
use crate::commands::open_session;
use crate::output::OutputFormat;

const HELP: &str = "\
Commands:
  show                         print steps and connections
  select <step>                show step details
  clear                        clear selection and close menus
  menu node <step>             open the step menu
  menu edge <edge>             open the connection menu
  edit | delete                run a menu action
  add                          open the add-step form
  set <field> <value>          set name, type, channel, budget or description
  submit | cancel              submit or discard the open form
  connect <source> <target>    connect two steps
  move <step> <x> <y>          move a step
  rename <name>                rename the journey
  save                         save now
  quit                         save pending changes and exit";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run(
    api: Arc<dyn JourneyApi>,
    journey_id: JourneyId,
    autosave: &AutosaveConfig,
    cascade: bool,
) -> Result<()> {
    let mut session = open_session(api, journey_id, autosave, cascade).await?;
    show_journey(&session, OutputFormat::Text)?;
    println!("\nType `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&session)?;
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match execute(&mut session, &line).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(err) => report(&mut session, err),
                }
            }
            _ = session.autosave_due() => {
                if session.has_unsaved_changes() {
                    match session.save().await {
                        Ok(_) => println!("\n{}", "Autosaved".dimmed()),
                        Err(err) => report(&mut session, err.into()),
                    }
                }
            }
        }
    }

    if session.has_unsaved_changes() {
        session
            .save()
            .await
            .context("Failed to save journey on exit")?;
        println!("Saved journey {}", session.journey_id());
    }
    Ok(())
}

fn prompt(session: &DesignerSession) -> Result<()> {
    let marker = if session.has_unsaved_changes() { "*" } else { "" };
    print!("journey {}{}> ", session.journey_id(), marker);
    std::io::stdout().flush()?;
    Ok(())
}

fn report(session: &mut DesignerSession, err: anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);
    session.dismiss_error();
}

async fn execute(session: &mut DesignerSession, line: &str) -> Result<Flow> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Ok(Flow::Continue);
    };

    match (command, args) {
        ("help", _) => println!("{HELP}"),
        ("quit" | "exit", _) => return Ok(Flow::Quit),
        ("show", []) => show_journey(session, OutputFormat::Text)?,
        ("select", [id]) => {
            session.click_node(id)?;
            if let Some(details) = session.selected_step() {
                println!("{} ({})", details.name, details.step_type);
                println!("  channel: {}", details.channel);
                println!("  budget:  {}", details.budget);
                if let Some(description) = details.description {
                    println!("  {}", description);
                }
            }
        }
        ("clear", []) => session.click_pane(),
        ("menu", ["node", id]) => {
            session.open_node_menu(id, 0.0, 0.0)?;
            print_menu(session);
        }
        ("menu", ["edge", id]) => {
            session.open_edge_menu(id, 0.0, 0.0)?;
            print_menu(session);
        }
        ("edit", []) => {
            if session.menu_edit()? {
                print_form(session);
            } else {
                println!("Connections have no edit action.");
            }
        }
        ("delete", []) => session.menu_delete().await?,
        ("add", []) => {
            session.open_add_step();
            print_form(session);
        }
        ("set", [field, value @ ..]) if !value.is_empty() => {
            let form = session.modal_mut().ok_or(SyncError::NoActiveForm)?;
            set_field(form, field, &value.join(" "))?;
        }
        ("submit", []) => {
            session.submit_modal().await?;
            println!("Step saved.");
        }
        ("cancel", []) => session.cancel_modal(),
        ("connect", [source, target]) => session.connect(source, target).await?,
        ("move", [id, x, y]) => {
            let x: f64 = x.parse().context("x must be a number")?;
            let y: f64 = y.parse().context("y must be a number")?;
            session.move_node(id, Position::new(x, y))?;
        }
        ("rename", name @ [_, ..]) => {
            let description = session.description().map(str::to_string);
            session.set_details(name.join(" "), description);
        }
        ("save", []) => {
            let saved = session.save().await?;
            println!("Saved journey {}", saved.id);
        }
        _ => bail!("Unknown command: {} (type `help`)", line.trim()),
    }
    Ok(Flow::Continue)
}

fn set_field(form: &mut StepForm, field: &str, value: &str) -> Result<()> {
    match field {
        "name" => form.name = value.to_string(),
        "type" => form.step_type = value.parse()?,
        "channel" => form.channel = value.to_string(),
        "budget" => form.budget = value.parse().context("budget must be a number")?,
        "description" => form.description = value.to_string(),
        other => bail!("Unknown step field: {}", other),
    }
    Ok(())
}

fn print_menu(session: &DesignerSession) {
    let Some(menu) = session.context_menu() else {
        return;
    };
    let actions: Vec<&str> = menu
        .actions()
        .iter()
        .map(|action| match action {
            MenuAction::Edit => "edit",
            MenuAction::Delete => "delete",
        })
        .collect();
    let labels: Vec<&str> = menu.actions().iter().map(|a| menu.label(*a)).collect();
    println!("{} ({})", labels.join(" | "), actions.join(", "));
}

fn print_form(session: &DesignerSession) {
    let Some(modal) = session.modal() else {
        return;
    };
    let form = &modal.form;
    println!("{}", modal.title().bold());
    println!("  name:        {}", form.name);
    println!("  type:        {}", form.step_type);
    println!("  channel:     {}", form.channel);
    println!("  budget:      {}", form.budget);
    println!("  description: {}", form.description);
}
