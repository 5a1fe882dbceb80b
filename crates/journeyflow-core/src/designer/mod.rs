//! Designer session: the interaction layer of the journey editor.
//!
//! A [`DesignerSession`] owns the graph of one journey and translates user
//! gestures (click, right-click, connect, drag, modal submit) into graph
//! mutations and API calls. It is driven from a single task through
//! `&mut self`; API responses are applied when they arrive.

mod menu;
mod modal;
mod payload;

pub use menu::{ContextMenu, MenuAction, MenuTarget, StepDetails};
pub use modal::{NEW_STEP_POSITION, StepForm, StepModal};

use journeyflow_models::{FlowEdge, FlowNode, Journey, JourneyId, Position};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::JourneyApi;
use crate::autosave::AutosaveScheduler;
use crate::config::AutosaveConfig;
use crate::error::{Result, SyncError};
use crate::graph::{GraphStore, Mutation, NodePatch};
use crate::view::ViewState;

pub struct DesignerSession {
    api: Arc<dyn JourneyApi>,
    journey_id: JourneyId,
    journey: Option<Journey>,
    name: Option<String>,
    description: Option<String>,
    store: GraphStore,
    view: ViewState,
    selected: Option<String>,
    menu: Option<ContextMenu>,
    modal: Option<StepModal>,
    autosave: AutosaveScheduler,
    unsaved_changes: bool,
    cascade_deletes: bool,
}

impl DesignerSession {
    pub fn new(api: Arc<dyn JourneyApi>, journey_id: JourneyId, autosave: &AutosaveConfig) -> Self {
        Self {
            api,
            journey_id,
            journey: None,
            name: None,
            description: None,
            store: GraphStore::new(),
            view: ViewState::Idle,
            selected: None,
            menu: None,
            modal: None,
            autosave: AutosaveScheduler::from_config(autosave),
            unsaved_changes: false,
            cascade_deletes: false,
        }
    }

    /// Also drop edges touching a node when the node is deleted.
    pub fn with_cascade_deletes(mut self, cascade: bool) -> Self {
        self.cascade_deletes = cascade;
        self
    }

    pub fn journey_id(&self) -> JourneyId {
        self.journey_id
    }

    pub fn journey(&self) -> Option<&Journey> {
        self.journey.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn graph(&self) -> &GraphStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    pub fn autosave(&self) -> &AutosaveScheduler {
        &self.autosave
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    pub fn modal(&self) -> Option<&StepModal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut StepForm> {
        self.modal.as_mut().map(|m| &mut m.form)
    }

    pub fn selected_step(&self) -> Option<StepDetails> {
        let id = self.selected.as_deref()?;
        self.store.node(id).map(StepDetails::from)
    }

    /// Clears an error view so the graph renders again.
    pub fn dismiss_error(&mut self) {
        if self.view.error().is_some() {
            self.view = ViewState::Loaded;
        }
    }

    /// Fetches the journey and its graph. A new journey starts empty.
    pub async fn load(&mut self) -> Result<()> {
        self.view = ViewState::Loading;
        let Some(journey_id) = self.journey_id.persisted() else {
            self.store = GraphStore::new();
            self.view = ViewState::Loaded;
            return Ok(());
        };

        let result = self.api.get_journey(journey_id).await;
        let journey = match result {
            Ok(journey) => journey,
            Err(err) => return Err(self.fail(err)),
        };

        let result = self.api.get_workflow(journey_id).await;
        let workflow = match result {
            Ok(workflow) => workflow,
            Err(err) => return Err(self.fail(err)),
        };
        info!(
            journey = journey_id,
            nodes = workflow.nodes.len(),
            edges = workflow.edges.len(),
            "Workflow loaded"
        );
        self.name = Some(journey.name.clone());
        self.description = journey.description.clone();
        self.journey = Some(journey);
        self.store.replace_all(workflow);
        self.view = ViewState::Loaded;
        Ok(())
    }

    pub fn click_node(&mut self, id: &str) -> Result<()> {
        self.require_node(id)?;
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn click_pane(&mut self) {
        self.selected = None;
        self.menu = None;
    }

    pub fn open_node_menu(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        self.require_node(id)?;
        self.menu = Some(ContextMenu {
            x,
            y,
            target: MenuTarget::Node(id.to_string()),
        });
        Ok(())
    }

    pub fn open_edge_menu(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        if self.store.edge(id).is_none() {
            return Err(SyncError::EdgeNotFound(id.to_string()));
        }
        self.menu = Some(ContextMenu {
            x,
            y,
            target: MenuTarget::Edge(id.to_string()),
        });
        Ok(())
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    /// "Edit" from the context menu. Returns false for edge menus, which
    /// offer no edit action.
    pub fn menu_edit(&mut self) -> Result<bool> {
        let menu = self.menu.as_ref().ok_or(SyncError::NoContextMenu)?;
        let MenuTarget::Node(id) = &menu.target else {
            return Ok(false);
        };
        let node = self
            .store
            .node(id)
            .ok_or_else(|| SyncError::NodeNotFound(id.clone()))?;
        self.modal = Some(StepModal::edit(node));
        self.menu = None;
        Ok(true)
    }

    /// "Delete" from the context menu.
    pub async fn menu_delete(&mut self) -> Result<()> {
        let menu = self.menu.as_ref().ok_or(SyncError::NoContextMenu)?;
        match menu.target.clone() {
            MenuTarget::Node(id) => self.delete_node(&id).await?,
            MenuTarget::Edge(id) => self.delete_edge(&id).await?,
        }
        self.menu = None;
        Ok(())
    }

    pub fn open_add_step(&mut self) {
        self.menu = None;
        self.modal = Some(StepModal::create());
    }

    pub fn cancel_modal(&mut self) {
        self.modal = None;
    }

    /// Creates or updates the step described by the open modal.
    ///
    /// The modal stays open when the request fails.
    pub async fn submit_modal(&mut self) -> Result<()> {
        let modal = self.modal.clone().ok_or(SyncError::NoActiveForm)?;
        let journey_id = self.persisted_id()?;
        modal.form.validate()?;

        match modal.editing_id {
            Some(node_id) => {
                let step_id = payload::step_id(&node_id)?;
                let update = modal.form.to_update();
                let result = self.api.update_step(journey_id, step_id, &update).await;
                let record = match result {
                    Ok(record) => record,
                    Err(err) => return Err(self.fail(err)),
                };
                if !self.store.patch_node(&node_id, NodePatch::from(record.data())) {
                    warn!(node = %node_id, "Updated step is no longer in the graph");
                }
            }
            None => {
                let draft = modal.form.to_draft(NEW_STEP_POSITION);
                let result = self.api.create_step(journey_id, &draft).await;
                let record = match result {
                    Ok(record) => record,
                    Err(err) => return Err(self.fail(err)),
                };
                self.store.append_node(FlowNode::from(record));
            }
        }

        self.modal = None;
        self.mark_dirty();
        Ok(())
    }

    /// Deletes a step on the server, then locally.
    pub async fn delete_node(&mut self, id: &str) -> Result<()> {
        let journey_id = self.persisted_id()?;
        self.require_node(id)?;
        let step_id = payload::step_id(id)?;

        let result = self.api.delete_step(journey_id, step_id).await;
        if let Err(err) = result {
            return Err(self.fail(err));
        }

        self.store.remove_node(id);
        if self.cascade_deletes {
            let dropped = self.store.remove_edges_touching(id);
            debug!(node = %id, edges = dropped.len(), "Cascaded node delete");
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.mark_dirty();
        Ok(())
    }

    /// Deletes a connection on the server, then locally.
    pub async fn delete_edge(&mut self, id: &str) -> Result<()> {
        let journey_id = self.persisted_id()?;
        let edge = self
            .store
            .edge(id)
            .ok_or_else(|| SyncError::EdgeNotFound(id.to_string()))?;
        let connection = payload::connection(edge)?;

        let result = self.api.delete_connection(journey_id, connection).await;
        if let Err(err) = result {
            return Err(self.fail(err));
        }

        self.store.remove_edge(id);
        self.mark_dirty();
        Ok(())
    }

    /// Connects two nodes: the edge shows up immediately and is removed again
    /// if the server rejects it. Only an accepted edge counts as an unsaved
    /// change. Connecting an already connected pair is a no-op.
    pub async fn connect(&mut self, source: &str, target: &str) -> Result<()> {
        let journey_id = self.persisted_id()?;
        if self.store.has_edge_between(source, target) {
            debug!(source, target, "Edge already exists");
            return Ok(());
        }

        let edge = FlowEdge::between(source, target);
        let connection = payload::connection(&edge)?;
        let undo = self.store.apply(Mutation::AppendEdge(edge));

        let result = self.api.create_connection(journey_id, connection).await;
        match result {
            Ok(()) => {
                self.mark_dirty();
                Ok(())
            }
            Err(err) => {
                if let Some(undo) = undo {
                    undo.apply(&mut self.store);
                }
                Err(self.fail(err))
            }
        }
    }

    /// Drag of a node. Only affects local state until the next flush.
    pub fn move_node(&mut self, id: &str, position: Position) -> Result<()> {
        if self.store.move_node(id, position).is_none() {
            return Err(SyncError::NodeNotFound(id.to_string()));
        }
        self.mark_dirty();
        Ok(())
    }

    /// Renames the journey locally; persisted with the next flush.
    pub fn set_details(&mut self, name: impl Into<String>, description: Option<String>) {
        self.name = Some(name.into());
        self.description = description;
        self.mark_dirty();
    }

    /// Flushes the whole graph now. A new journey adopts the id the server
    /// assigns to it.
    pub async fn save(&mut self) -> Result<Journey> {
        let body = payload::journey_save(
            self.name.as_deref(),
            self.description.as_deref(),
            &self.store,
        )?;
        self.autosave.cancel();

        let result = self.api.save_journey(self.journey_id, &body).await;
        let saved = match result {
            Ok(saved) => saved,
            Err(err) => return Err(self.fail(err)),
        };

        if self.journey_id.is_new() {
            info!(journey = saved.id, "New journey persisted");
            self.journey_id = JourneyId::Persisted(saved.id);
        }
        self.name = Some(body.nome.clone());
        self.description = Some(body.descricao.clone());
        self.journey = Some(saved.clone());
        self.unsaved_changes = false;
        Ok(saved)
    }

    /// Resolves when the autosave deadline elapses. Cancel safe.
    pub async fn autosave_due(&mut self) {
        self.autosave.fired().await;
    }

    /// Waits for the autosave deadline and flushes if changes are still
    /// unsaved. Returns `None` when there was nothing to flush.
    ///
    /// Not cancel safe once the flush request is in flight; inside
    /// `select!` use [`Self::autosave_due`] followed by [`Self::save`].
    pub async fn run_autosave(&mut self) -> Result<Option<Journey>> {
        self.autosave_due().await;
        if !self.unsaved_changes {
            return Ok(None);
        }
        info!(journey = %self.journey_id, "Autosaving journey");
        self.save().await.map(Some)
    }

    fn mark_dirty(&mut self) {
        self.unsaved_changes = true;
        self.autosave.arm();
    }

    fn persisted_id(&self) -> Result<i64> {
        self.journey_id
            .persisted()
            .ok_or(SyncError::JourneyNotPersisted)
    }

    fn require_node(&self, id: &str) -> Result<()> {
        match self.store.node(id) {
            Some(_) => Ok(()),
            None => Err(SyncError::NodeNotFound(id.to_string())),
        }
    }

    /// Puts remote failures into the error view.
    fn fail(&mut self, err: SyncError) -> SyncError {
        if err.is_remote() {
            warn!(journey = %self.journey_id, "{}", err);
            self.view = ViewState::Error(err.to_string());
        }
        err
    }
}
