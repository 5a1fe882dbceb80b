use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

use crate::step::StepType;
use crate::workflow::ConnectionRequest;

/// Marketing campaign container grouping steps and connections.
///
/// The backend is not consistent about field names: some endpoints emit
/// `nome`/`descricao`, others `name`/`description`. Both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Journey {
    pub id: i64,
    #[serde(alias = "nome", default)]
    pub name: String,
    #[serde(alias = "descricao", default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Route identity of a journey. `New` exists only locally until its first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JourneyId {
    New,
    Persisted(i64),
}

impl JourneyId {
    pub fn is_new(self) -> bool {
        matches!(self, JourneyId::New)
    }

    pub fn persisted(self) -> Option<i64> {
        match self {
            JourneyId::New => None,
            JourneyId::Persisted(id) => Some(id),
        }
    }
}

impl From<i64> for JourneyId {
    fn from(id: i64) -> Self {
        JourneyId::Persisted(id)
    }
}

impl fmt::Display for JourneyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyId::New => f.write_str("new"),
            JourneyId::Persisted(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid journey id '{0}' (expected an integer or 'new')")]
pub struct ParseJourneyIdError(pub String);

impl FromStr for JourneyId {
    type Err = ParseJourneyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "new" {
            return Ok(JourneyId::New);
        }
        trimmed
            .parse::<i64>()
            .map(JourneyId::Persisted)
            .map_err(|_| ParseJourneyIdError(s.to_string()))
    }
}

/// Whole-graph save body for `POST /api/journeys` and `PUT /api/journeys/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JourneySave {
    pub nome: String,
    pub descricao: String,
    pub steps: Vec<SavedStep>,
    pub connections: Vec<ConnectionRequest>,
}

impl JourneySave {
    pub const DEFAULT_NAME: &'static str = "New Journey";
    pub const DEFAULT_DESCRIPTION: &'static str = "No description";

    /// Empty save body; blank name or description fall back to placeholders.
    pub fn new(name: Option<&str>, description: Option<&str>) -> Self {
        let pick = |value: Option<&str>, fallback: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            nome: pick(name, Self::DEFAULT_NAME),
            descricao: pick(description, Self::DEFAULT_DESCRIPTION),
            steps: Vec::new(),
            connections: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SavedStep {
    pub name: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub channel: String,
    pub budget: f64,
    pub pos_x: f64,
    pub pos_y: f64,
}
