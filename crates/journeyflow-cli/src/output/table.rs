use anyhow::Result;
use comfy_table::{Cell, Table};
use journeyflow_core::dashboard::format_updated;
use journeyflow_core::models::{FlowEdge, FlowNode, Journey};

pub fn print_table(table: Table) -> Result<()> {
    println!("{table}");
    Ok(())
}

pub fn journeys(journeys: &[Journey]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Status", "Last updated", "Description"]);

    for journey in journeys {
        table.add_row(vec![
            Cell::new(journey.id),
            Cell::new(&journey.name),
            Cell::new(journey.status.as_deref().unwrap_or("-")),
            Cell::new(format_updated(journey)),
            Cell::new(preview_text(journey.description.as_deref().unwrap_or(""), 40)),
        ]);
    }

    table
}

pub fn nodes(nodes: &[FlowNode]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Step", "Channel", "Budget", "Position"]);

    for node in nodes {
        table.add_row(vec![
            Cell::new(&node.id),
            Cell::new(node.title()),
            Cell::new(&node.data.channel),
            Cell::new(format!("${}", node.data.budget)),
            Cell::new(format!("({}, {})", node.position.x, node.position.y)),
        ]);
    }

    table
}

pub fn edges(edges: &[FlowEdge]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Source", "Target"]);

    for edge in edges {
        table.add_row(vec![
            Cell::new(&edge.id),
            Cell::new(&edge.source),
            Cell::new(&edge.target),
        ]);
    }

    table
}

fn preview_text(input: &str, max_len: usize) -> String {
    if input.chars().count() <= max_len {
        return input.to_string();
    }

    let mut preview = input.chars().take(max_len).collect::<String>();
    preview.push('…');
    preview
}
