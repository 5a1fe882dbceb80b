use journeyflow_models::{ConnectionRequest, FlowEdge, JourneySave, SavedStep};

use crate::error::{Result, SyncError};
use crate::graph::GraphStore;

pub(crate) fn step_id(node_id: &str) -> Result<i64> {
    node_id
        .parse()
        .map_err(|_| SyncError::InvalidStepId(node_id.to_string()))
}

pub(crate) fn connection(edge: &FlowEdge) -> Result<ConnectionRequest> {
    Ok(ConnectionRequest {
        source_step_id: step_id(&edge.source)?,
        target_step_id: step_id(&edge.target)?,
    })
}

/// Whole-graph save body for the current store contents.
pub(crate) fn journey_save(
    name: Option<&str>,
    description: Option<&str>,
    store: &GraphStore,
) -> Result<JourneySave> {
    let mut body = JourneySave::new(name, description);
    body.steps = store
        .nodes()
        .iter()
        .map(|node| SavedStep {
            name: node.data.label.clone(),
            step_type: node.data.step_type,
            channel: node.data.channel.clone(),
            budget: node.data.budget,
            pos_x: node.position.x,
            pos_y: node.position.y,
        })
        .collect();
    body.connections = store
        .edges()
        .iter()
        .map(connection)
        .collect::<Result<_>>()?;
    Ok(body)
}
