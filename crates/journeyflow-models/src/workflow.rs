use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::step::{Position, StepData, StepRecord, StepType};

/// Designer graph of a journey, as served by `GET /api/journeys/{id}/workflow`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Workflow {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: StepType,
    #[serde(default)]
    pub position: Position,
    pub data: StepData,
}

impl FlowNode {
    /// Server step id backing this node, if the node id is numeric.
    pub fn step_id(&self) -> Option<i64> {
        self.id.parse().ok()
    }

    /// Text shown on the rendered node, e.g. `Ad: Spring banner`.
    pub fn title(&self) -> String {
        match self.data.step_type.display_prefix() {
            Some(prefix) => format!("{}: {}", prefix, self.data.label),
            None => self.data.label.clone(),
        }
    }
}

impl From<StepRecord> for FlowNode {
    fn from(record: StepRecord) -> Self {
        Self {
            id: record.id.to_string(),
            node_type: record.step_type,
            position: record.position(),
            data: record.data(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl FlowEdge {
    /// Edge created locally by connecting two node handles.
    pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("edge-{}-{}", source, target),
            source,
            target,
        }
    }

    pub fn connects(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Body of the connection endpoints and entry of a full journey save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConnectionRequest {
    pub source_step_id: i64,
    pub target_step_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_deserializes_designer_shape() {
        let workflow: Workflow = serde_json::from_str(
            r#"{
                "nodes": [
                    {"id": "1", "type": "ad", "position": {"x": 10, "y": 20},
                     "data": {"label": "Banner", "type": "ad", "channel": "Meta Ads", "budget": 100}},
                    {"id": "2", "type": "post", "position": {"x": 200, "y": 20},
                     "data": {"label": "Launch post", "type": "post", "channel": "Instagram", "budget": 0}}
                ],
                "edges": [{"id": "e1-2", "source": "1", "target": "2"}]
            }"#,
        )
        .unwrap();

        assert_eq!(workflow.nodes.len(), 2);
        assert_eq!(workflow.nodes[0].step_id(), Some(1));
        assert_eq!(workflow.nodes[0].title(), "Ad: Banner");
        assert_eq!(workflow.edges[0].source, "1");
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let workflow: Workflow = serde_json::from_str("{}").unwrap();
        assert!(workflow.nodes.is_empty());
        assert!(workflow.edges.is_empty());
    }

    #[test]
    fn test_node_from_step_record() {
        let record = StepRecord {
            id: 12,
            name: "Search campaign".to_string(),
            step_type: StepType::Campaign,
            channel: Some("Google Ads".to_string()),
            budget: Some(500.0),
            description: Some("Q3".to_string()),
            pos_x: 100.0,
            pos_y: 100.0,
        };

        let node = FlowNode::from(record);
        assert_eq!(node.id, "12");
        assert_eq!(node.position, Position::new(100.0, 100.0));
        assert_eq!(node.data.label, "Search campaign");
        assert_eq!(node.data.description.as_deref(), Some("Q3"));
    }

    #[test]
    fn test_edge_helpers() {
        let edge = FlowEdge::between("3", "4");
        assert_eq!(edge.id, "edge-3-4");
        assert!(edge.connects("3", "4"));
        assert!(!edge.connects("4", "3"));
        assert!(edge.touches("4"));
        assert!(!edge.touches("5"));
    }
}
