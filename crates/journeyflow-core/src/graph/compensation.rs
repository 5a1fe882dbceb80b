//! Optimistic mutations and their inverses.
//!
//! Applying a [`Mutation`] yields the [`Compensation`] that undoes it. The
//! caller keeps the compensation until the server confirms, and applies it
//! only when the server rejects the change.

use journeyflow_models::{FlowEdge, FlowNode, Position};
use tracing::warn;

use super::store::GraphStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AppendNode(FlowNode),
    RemoveNode(String),
    MoveNode { id: String, position: Position },
    AppendEdge(FlowEdge),
    RemoveEdge(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Compensation {
    RemoveNode(String),
    RestoreNode { index: usize, node: FlowNode },
    RestorePosition { id: String, position: Position },
    RemoveEdge(String),
    RestoreEdge { index: usize, edge: FlowEdge },
}

impl Compensation {
    pub fn apply(self, store: &mut GraphStore) {
        warn!(compensation = ?self, "Rolling back optimistic change");
        match self {
            Compensation::RemoveNode(id) => {
                store.remove_node(&id);
            }
            Compensation::RestoreNode { index, node } => store.insert_node(index, node),
            Compensation::RestorePosition { id, position } => {
                store.move_node(&id, position);
            }
            Compensation::RemoveEdge(id) => {
                store.remove_edge(&id);
            }
            Compensation::RestoreEdge { index, edge } => store.insert_edge(index, edge),
        }
    }
}

impl GraphStore {
    /// Applies `mutation` and returns its inverse, or `None` when the target
    /// does not exist and nothing changed.
    pub fn apply(&mut self, mutation: Mutation) -> Option<Compensation> {
        match mutation {
            Mutation::AppendNode(node) => {
                let id = node.id.clone();
                self.append_node(node);
                Some(Compensation::RemoveNode(id))
            }
            Mutation::RemoveNode(id) => {
                let index = self.nodes().iter().position(|n| n.id == id)?;
                let node = self.remove_node(&id)?;
                Some(Compensation::RestoreNode { index, node })
            }
            Mutation::MoveNode { id, position } => {
                let previous = self.move_node(&id, position)?;
                Some(Compensation::RestorePosition {
                    id,
                    position: previous,
                })
            }
            Mutation::AppendEdge(edge) => {
                let id = edge.id.clone();
                self.append_edge(edge);
                Some(Compensation::RemoveEdge(id))
            }
            Mutation::RemoveEdge(id) => {
                let index = self.edges().iter().position(|e| e.id == id)?;
                let edge = self.remove_edge(&id)?;
                Some(Compensation::RestoreEdge { index, edge })
            }
        }
    }
}
