use journeyflow_models::{FlowNode, Position, StepDraft, StepType, StepUpdate};

use crate::error::{Result, SyncError};

/// Where steps created from the modal are placed.
pub const NEW_STEP_POSITION: Position = Position { x: 100.0, y: 100.0 };

/// Fields captured by the step modal.
#[derive(Debug, Clone, PartialEq)]
pub struct StepForm {
    pub name: String,
    pub step_type: StepType,
    pub channel: String,
    pub budget: f64,
    pub description: String,
}

impl Default for StepForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            step_type: StepType::Default,
            channel: "default".to_string(),
            budget: 0.0,
            description: String::new(),
        }
    }
}

impl StepForm {
    pub fn from_node(node: &FlowNode) -> Self {
        Self {
            name: node.data.label.clone(),
            step_type: node.data.step_type,
            channel: node.data.channel.clone(),
            budget: node.data.budget,
            description: node.data.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SyncError::InvalidStep("name is required".to_string()));
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(SyncError::InvalidStep(format!(
                "budget must be a non-negative number, got {}",
                self.budget
            )));
        }
        Ok(())
    }

    fn description(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn to_draft(&self, position: Position) -> StepDraft {
        StepDraft {
            name: self.name.trim().to_string(),
            step_type: self.step_type,
            channel: self.channel.clone(),
            budget: self.budget,
            description: self.description(),
            pos_x: position.x,
            pos_y: position.y,
        }
    }

    pub fn to_update(&self) -> StepUpdate {
        StepUpdate {
            name: self.name.trim().to_string(),
            step_type: self.step_type,
            channel: self.channel.clone(),
            budget: self.budget,
            description: self.description(),
        }
    }
}

/// Step modal state, shared by the create and edit flows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepModal {
    /// Node being edited; `None` when creating.
    pub editing_id: Option<String>,
    pub form: StepForm,
}

impl StepModal {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(node: &FlowNode) -> Self {
        Self {
            editing_id: Some(node.id.clone()),
            form: StepForm::from_node(node),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() { "Edit Step" } else { "Add Step" }
    }
}
