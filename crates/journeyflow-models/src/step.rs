use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

/// Kind of journey step. Drives how the designer renders a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum StepType {
    #[default]
    Default,
    Ad,
    Post,
    Campaign,
}

impl StepType {
    pub const ALL: [StepType; 4] = [
        StepType::Default,
        StepType::Ad,
        StepType::Post,
        StepType::Campaign,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepType::Default => "default",
            StepType::Ad => "ad",
            StepType::Post => "post",
            StepType::Campaign => "campaign",
        }
    }

    /// Prefix shown before the label of non-default nodes.
    pub fn display_prefix(self) -> Option<&'static str> {
        match self {
            StepType::Default => None,
            StepType::Ad => Some("Ad"),
            StepType::Post => Some("Post"),
            StepType::Campaign => Some("Campaign"),
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown step type '{0}' (expected default, ad, post or campaign)")]
pub struct ParseStepTypeError(pub String);

impl FromStr for StepType {
    type Err = ParseStepTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        StepType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ParseStepTypeError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Payload carried by a designer node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepData {
    pub label: String,
    #[serde(rename = "type", default)]
    pub step_type: StepType,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Step as returned by the step endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepRecord {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub step_type: StepType,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pos_x: f64,
    #[serde(default)]
    pub pos_y: f64,
}

impl StepRecord {
    pub fn position(&self) -> Position {
        Position::new(self.pos_x, self.pos_y)
    }

    pub fn data(&self) -> StepData {
        StepData {
            label: self.name.clone(),
            step_type: self.step_type,
            channel: self.channel.clone().unwrap_or_default(),
            budget: self.budget.unwrap_or_default(),
            description: self.description.clone(),
        }
    }
}

/// Body of `POST /api/journeys/{id}/steps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub channel: String,
    pub budget: f64,
    pub description: Option<String>,
    pub pos_x: f64,
    pub pos_y: f64,
}

/// Body of `PUT /api/journeys/{id}/steps/{stepId}`. Position is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepUpdate {
    pub name: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub channel: String,
    pub budget: f64,
    pub description: Option<String>,
}
