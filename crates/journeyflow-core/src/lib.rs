//! Client-side core of the JourneyFlow editor.
//!
//! - [`graph`]: in-memory nodes/edges of the open journey, with
//!   compensating actions for optimistic updates
//! - [`api`]: the journey backend as an async trait, plus its HTTP client
//! - [`autosave`]: debounced whole-graph flush
//! - [`designer`]: gesture-level operations on one journey
//! - [`dashboard`]: journey list with local sorting

pub mod api;
pub mod autosave;
pub mod config;
pub mod dashboard;
pub mod designer;
pub mod error;
pub mod graph;
pub mod view;

pub use api::{HttpJourneyApi, JourneyApi};
pub use autosave::AutosaveScheduler;
pub use config::{AutosaveConfig, ClientConfig};
pub use dashboard::{JourneyList, JourneySort, Route};
pub use designer::DesignerSession;
pub use error::{Result, SyncError};
pub use graph::GraphStore;
pub use view::ViewState;

pub use journeyflow_models as models;
