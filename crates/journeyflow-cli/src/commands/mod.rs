pub mod connection;
pub mod design;
pub mod journey;
pub mod step;

use anyhow::{Context, Result};
use journeyflow_core::models::JourneyId;
use journeyflow_core::{AutosaveConfig, DesignerSession, JourneyApi};
use std::sync::Arc;

/// Loads a journey into a designer session.
pub(crate) async fn open_session(
    api: Arc<dyn JourneyApi>,
    journey_id: JourneyId,
    autosave: &AutosaveConfig,
    cascade: bool,
) -> Result<DesignerSession> {
    let mut session =
        DesignerSession::new(api, journey_id, autosave).with_cascade_deletes(cascade);
    session
        .load()
        .await
        .with_context(|| format!("Failed to open journey {}", journey_id))?;
    Ok(session)
}

/// One-shot commands exit right away, so pending changes are flushed
/// instead of waiting for autosave.
pub(crate) async fn flush(session: &mut DesignerSession) -> Result<()> {
    if session.has_unsaved_changes() {
        session
            .save()
            .await
            .with_context(|| format!("Failed to save journey {}", session.journey_id()))?;
    }
    Ok(())
}
