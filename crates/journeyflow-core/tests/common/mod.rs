//! In-memory journey backend for session tests.

#![allow(dead_code)]

use async_trait::async_trait;
use journeyflow_core::models::{
    ConnectionRequest, FlowEdge, FlowNode, Journey, JourneyId, JourneySave, Position, StepData,
    StepDraft, StepRecord, StepType, StepUpdate, Workflow,
};
use journeyflow_core::{JourneyApi, Result, SyncError};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    journeys: Vec<Journey>,
    workflows: HashMap<i64, Workflow>,
    next_id: i64,
    saves: Vec<(JourneyId, JourneySave)>,
    connections_created: Vec<ConnectionRequest>,
    calls: Vec<String>,
    fail_connections: bool,
    fail_steps: bool,
    fail_workflows: bool,
}

pub struct FakeApi {
    state: Mutex<State>,
}

fn rejected(message: &str) -> SyncError {
    SyncError::Status {
        status: 500,
        message: message.to_string(),
    }
}

pub fn node(id: &str, label: &str, step_type: StepType, position: Position) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        node_type: step_type,
        position,
        data: StepData {
            label: label.to_string(),
            step_type,
            channel: "Instagram".to_string(),
            budget: 100.0,
            description: None,
        },
    }
}

impl FakeApi {
    /// Journey 4 with two steps connected by one edge.
    pub fn with_journey_four() -> Self {
        let journey = Journey {
            id: 4,
            name: "Spring launch".to_string(),
            description: Some("Q2 push".to_string()),
            status: Some("Ativa".to_string()),
            created_at: None,
            updated_at: None,
        };
        let workflow = Workflow {
            nodes: vec![
                node("1", "Teaser", StepType::Post, Position::new(0.0, 0.0)),
                node("2", "Banner", StepType::Ad, Position::new(250.0, 0.0)),
            ],
            edges: vec![FlowEdge {
                id: "e1-2".to_string(),
                source: "1".to_string(),
                target: "2".to_string(),
            }],
        };

        let state = State {
            journeys: vec![journey],
            workflows: HashMap::from([(4, workflow)]),
            next_id: 100,
            ..State::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn fail_connections(&self) {
        self.state.lock().unwrap().fail_connections = true;
    }

    pub fn fail_workflows(&self) {
        self.state.lock().unwrap().fail_workflows = true;
    }

    pub fn fail_steps(&self) {
        self.state.lock().unwrap().fail_steps = true;
    }

    pub fn saves(&self) -> Vec<(JourneyId, JourneySave)> {
        self.state.lock().unwrap().saves.clone()
    }

    pub fn save_count(&self) -> usize {
        self.state.lock().unwrap().saves.len()
    }

    pub fn connections_created(&self) -> Vec<ConnectionRequest> {
        self.state.lock().unwrap().connections_created.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.state.lock().unwrap().calls.push(call.into());
    }
}

#[async_trait]
impl JourneyApi for FakeApi {
    async fn list_journeys(&self) -> Result<Vec<Journey>> {
        self.record("list_journeys");
        Ok(self.state.lock().unwrap().journeys.clone())
    }

    async fn get_journey(&self, journey_id: i64) -> Result<Journey> {
        self.record(format!("get_journey {}", journey_id));
        let state = self.state.lock().unwrap();
        state
            .journeys
            .iter()
            .find(|j| j.id == journey_id)
            .cloned()
            .ok_or_else(|| SyncError::Status {
                status: 404,
                message: "Failed to fetch journey data".to_string(),
            })
    }

    async fn get_workflow(&self, journey_id: i64) -> Result<Workflow> {
        self.record(format!("get_workflow {}", journey_id));
        let state = self.state.lock().unwrap();
        if state.fail_workflows {
            return Err(rejected("Failed to fetch workflow data"));
        }
        Ok(state.workflows.get(&journey_id).cloned().unwrap_or_default())
    }

    async fn create_step(&self, journey_id: i64, draft: &StepDraft) -> Result<StepRecord> {
        self.record(format!("create_step {}", journey_id));
        let mut state = self.state.lock().unwrap();
        if state.fail_steps {
            return Err(rejected("Failed to add step"));
        }
        state.next_id += 1;
        Ok(StepRecord {
            id: state.next_id,
            name: draft.name.clone(),
            step_type: draft.step_type,
            channel: Some(draft.channel.clone()),
            budget: Some(draft.budget),
            description: draft.description.clone(),
            pos_x: draft.pos_x,
            pos_y: draft.pos_y,
        })
    }

    async fn update_step(
        &self,
        journey_id: i64,
        step_id: i64,
        update: &StepUpdate,
    ) -> Result<StepRecord> {
        self.record(format!("update_step {} {}", journey_id, step_id));
        if self.state.lock().unwrap().fail_steps {
            return Err(rejected("Failed to update step"));
        }
        // The real backend does not echo positions on update.
        Ok(StepRecord {
            id: step_id,
            name: update.name.clone(),
            step_type: update.step_type,
            channel: Some(update.channel.clone()),
            budget: Some(update.budget),
            description: update.description.clone(),
            pos_x: 0.0,
            pos_y: 0.0,
        })
    }

    async fn delete_step(&self, journey_id: i64, step_id: i64) -> Result<()> {
        self.record(format!("delete_step {} {}", journey_id, step_id));
        if self.state.lock().unwrap().fail_steps {
            return Err(rejected("Failed to delete step"));
        }
        Ok(())
    }

    async fn create_connection(
        &self,
        journey_id: i64,
        connection: ConnectionRequest,
    ) -> Result<()> {
        self.record(format!(
            "create_connection {} {}->{}",
            journey_id, connection.source_step_id, connection.target_step_id
        ));
        let mut state = self.state.lock().unwrap();
        if state.fail_connections {
            return Err(rejected("Failed to save connection"));
        }
        state.connections_created.push(connection);
        Ok(())
    }

    async fn delete_connection(
        &self,
        journey_id: i64,
        connection: ConnectionRequest,
    ) -> Result<()> {
        self.record(format!(
            "delete_connection {} {}->{}",
            journey_id, connection.source_step_id, connection.target_step_id
        ));
        Ok(())
    }

    async fn save_journey(&self, id: JourneyId, body: &JourneySave) -> Result<Journey> {
        self.record(format!("save_journey {}", id));
        let mut state = self.state.lock().unwrap();
        let journey_id = match id {
            JourneyId::New => {
                state.next_id += 1;
                state.next_id
            }
            JourneyId::Persisted(id) => id,
        };
        state.saves.push((id, body.clone()));
        Ok(Journey {
            id: journey_id,
            name: body.nome.clone(),
            description: None,
            status: Some("Ativa".to_string()),
            created_at: None,
            updated_at: None,
        })
    }

    async fn delete_journey(&self, journey_id: i64) -> Result<()> {
        self.record(format!("delete_journey {}", journey_id));
        Ok(())
    }
}
