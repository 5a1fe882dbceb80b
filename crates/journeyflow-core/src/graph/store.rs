use journeyflow_models::{FlowEdge, FlowNode, Position, StepData, StepType, Workflow};
use tracing::debug;

/// In-memory nodes and edges of the open journey.
///
/// Order is insertion order and is preserved across mutations. The store does
/// not check that edge endpoints exist; the server owns referential integrity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStore {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
}

/// Partial update of a node's step fields. Position is never touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub step_type: Option<StepType>,
    pub channel: Option<String>,
    pub budget: Option<f64>,
    pub description: Option<Option<String>>,
}

impl From<StepData> for NodePatch {
    fn from(data: StepData) -> Self {
        Self {
            label: Some(data.label),
            step_type: Some(data.step_type),
            channel: Some(data.channel),
            budget: Some(data.budget),
            description: Some(data.description),
        }
    }
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_workflow(workflow: Workflow) -> Self {
        let mut store = Self::new();
        store.replace_all(workflow);
        store
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&FlowEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn has_edge_between(&self, source: &str, target: &str) -> bool {
        self.edges.iter().any(|e| e.connects(source, target))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Snapshot of the whole graph.
    pub fn to_workflow(&self) -> Workflow {
        Workflow {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    pub fn replace_all(&mut self, workflow: Workflow) {
        debug!(
            nodes = workflow.nodes.len(),
            edges = workflow.edges.len(),
            "Replacing graph"
        );
        self.nodes = workflow.nodes;
        self.edges = workflow.edges;
    }

    pub fn append_node(&mut self, node: FlowNode) {
        debug!(node = %node.id, "Appending node");
        self.nodes.push(node);
    }

    /// Removes a node, leaving edges that reference it in place.
    pub fn remove_node(&mut self, id: &str) -> Option<FlowNode> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        debug!(node = %id, "Removing node");
        Some(self.nodes.remove(index))
    }

    /// Applies a partial update. Returns false when the node is unknown.
    pub fn patch_node(&mut self, id: &str, patch: NodePatch) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };

        if let Some(label) = patch.label {
            node.data.label = label;
        }
        if let Some(step_type) = patch.step_type {
            node.node_type = step_type;
            node.data.step_type = step_type;
        }
        if let Some(channel) = patch.channel {
            node.data.channel = channel;
        }
        if let Some(budget) = patch.budget {
            node.data.budget = budget;
        }
        if let Some(description) = patch.description {
            node.data.description = description;
        }
        debug!(node = %id, "Patched node");
        true
    }

    /// Moves a node. Returns the previous position.
    pub fn move_node(&mut self, id: &str, position: Position) -> Option<Position> {
        let node = self.nodes.iter_mut().find(|n| n.id == id)?;
        Some(std::mem::replace(&mut node.position, position))
    }

    pub fn append_edge(&mut self, edge: FlowEdge) {
        debug!(edge = %edge.id, source = %edge.source, target = %edge.target, "Appending edge");
        self.edges.push(edge);
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<FlowEdge> {
        let index = self.edges.iter().position(|e| e.id == id)?;
        debug!(edge = %id, "Removing edge");
        Some(self.edges.remove(index))
    }

    pub(crate) fn insert_node(&mut self, index: usize, node: FlowNode) {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node);
    }

    pub(crate) fn insert_edge(&mut self, index: usize, edge: FlowEdge) {
        let index = index.min(self.edges.len());
        self.edges.insert(index, edge);
    }

    /// Removes every edge with `node_id` as an endpoint.
    pub fn remove_edges_touching(&mut self, node_id: &str) -> Vec<FlowEdge> {
        let (removed, kept) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| e.touches(node_id));
        self.edges = kept;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, label: &str) -> FlowNode {
        FlowNode {
            id: id.to_string(),
            node_type: StepType::Default,
            position: Position::new(10.0, 20.0),
            data: StepData {
                label: label.to_string(),
                step_type: StepType::Default,
                channel: "default".to_string(),
                budget: 0.0,
                description: None,
            },
        }
    }

    fn sample() -> GraphStore {
        GraphStore::from_workflow(Workflow {
            nodes: vec![node("1", "Banner"), node("2", "Post"), node("3", "Retarget")],
            edges: vec![FlowEdge::between("1", "2"), FlowEdge::between("2", "3")],
        })
    }

    #[test]
    fn test_replace_all_discards_previous_graph() {
        let mut store = sample();
        store.replace_all(Workflow::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_node_keeps_dangling_edges() {
        let mut store = sample();
        let removed = store.remove_node("2").unwrap();

        assert_eq!(removed.data.label, "Post");
        assert_eq!(store.nodes().len(), 2);
        assert_eq!(store.edges().len(), 2);
        assert!(store.remove_node("2").is_none());
    }

    #[test]
    fn test_remove_edges_touching() {
        let mut store = sample();
        let removed = store.remove_edges_touching("3");

        assert_eq!(removed.len(), 1);
        assert_eq!(store.edges().len(), 1);
        assert!(store.has_edge_between("1", "2"));
    }

    #[test]
    fn test_patch_node_preserves_id_and_position() {
        let mut store = sample();
        let patched = store.patch_node(
            "1",
            NodePatch {
                label: Some("Big banner".to_string()),
                step_type: Some(StepType::Ad),
                budget: Some(250.0),
                ..NodePatch::default()
            },
        );

        assert!(patched);
        let node = store.node("1").unwrap();
        assert_eq!(node.data.label, "Big banner");
        assert_eq!(node.node_type, StepType::Ad);
        assert_eq!(node.data.step_type, StepType::Ad);
        assert_eq!(node.data.budget, 250.0);
        assert_eq!(node.data.channel, "default");
        assert_eq!(node.position, Position::new(10.0, 20.0));
        assert!(!store.patch_node("99", NodePatch::default()));
    }

    #[test]
    fn test_move_node_returns_previous_position() {
        let mut store = sample();
        let previous = store.move_node("2", Position::new(300.0, 40.0));

        assert_eq!(previous, Some(Position::new(10.0, 20.0)));
        assert_eq!(store.node("2").unwrap().position, Position::new(300.0, 40.0));
        assert_eq!(store.move_node("missing", Position::default()), None);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut store = sample();
        store.append_node(node("4", "Email"));
        store.remove_edge("edge-1-2");
        store.append_edge(FlowEdge::between("3", "4"));

        let ids: Vec<_> = store.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
        let edges: Vec<_> = store.edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(edges, ["edge-2-3", "edge-3-4"]);
    }
}
