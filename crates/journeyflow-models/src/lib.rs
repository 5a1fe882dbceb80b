//! Wire and domain models shared by the JourneyFlow client crates.
//!
//! Two shapes coexist for a step: the designer graph shape ([`FlowNode`],
//! string ids, nested `data`) and the step endpoint shape ([`StepRecord`],
//! integer ids, flat `pos_x`/`pos_y`). Conversions live next to the types.

pub mod journey;
pub mod step;
pub mod workflow;

pub use journey::{Journey, JourneyId, JourneySave, ParseJourneyIdError, SavedStep};
pub use step::{
    ParseStepTypeError, Position, StepData, StepDraft, StepRecord, StepType, StepUpdate,
};
pub use workflow::{ConnectionRequest, FlowEdge, FlowNode, Workflow};
