use journeyflow_models::FlowNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuTarget {
    Node(String),
    Edge(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Edit,
    Delete,
}

/// Right-click menu anchored at screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    pub x: f64,
    pub y: f64,
    pub target: MenuTarget,
}

impl ContextMenu {
    /// Edit is offered for nodes only.
    pub fn actions(&self) -> &'static [MenuAction] {
        match self.target {
            MenuTarget::Node(_) => &[MenuAction::Edit, MenuAction::Delete],
            MenuTarget::Edge(_) => &[MenuAction::Delete],
        }
    }

    pub fn label(&self, action: MenuAction) -> &'static str {
        match (action, &self.target) {
            (MenuAction::Edit, _) => "Edit Node",
            (MenuAction::Delete, MenuTarget::Node(_)) => "Delete Node",
            (MenuAction::Delete, MenuTarget::Edge(_)) => "Delete Edge",
        }
    }
}

/// Read-only side panel for the selected node.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDetails {
    pub id: String,
    pub name: String,
    pub step_type: String,
    pub channel: String,
    pub budget: String,
    pub description: Option<String>,
}

impl From<&FlowNode> for StepDetails {
    fn from(node: &FlowNode) -> Self {
        Self {
            id: node.id.clone(),
            name: node.data.label.clone(),
            step_type: node.data.step_type.to_string(),
            channel: node.data.channel.clone(),
            budget: format!("${}", node.data.budget),
            description: node.data.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_menu_only_offers_delete() {
        let menu = ContextMenu {
            x: 10.0,
            y: 20.0,
            target: MenuTarget::Edge("edge-1-2".to_string()),
        };
        assert_eq!(menu.actions(), &[MenuAction::Delete]);
        assert_eq!(menu.label(MenuAction::Delete), "Delete Edge");
    }

    #[test]
    fn test_node_menu_offers_edit_and_delete() {
        let menu = ContextMenu {
            x: 0.0,
            y: 0.0,
            target: MenuTarget::Node("3".to_string()),
        };
        assert_eq!(menu.actions(), &[MenuAction::Edit, MenuAction::Delete]);
        assert_eq!(menu.label(MenuAction::Delete), "Delete Node");
    }
}
