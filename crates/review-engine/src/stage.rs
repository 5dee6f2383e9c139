//! Analysis stage machine and the navigation interrupt gate.

use serde::{Deserialize, Serialize};

/// Where the review session currently is.
///
/// Preview and Analyse are transient, time-driven stages owned by the outer
/// orchestrator; Manual is the only stage in which free navigation and branch
/// exploration are permitted. Normal play runs Preview -> Analyse -> Manual,
/// but a user navigation interrupt can force Analyse -> Manual early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Preview,
    Analyse,
    Manual,
}

/// What the interrupt gate decided about a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Preview owns playback; the request is dropped.
    Refused,
    /// The request forced Analyse -> Manual. The transition itself
    /// repositions the view, so the request is not additionally processed.
    Interrupted,
    /// Manual: the request proceeds.
    Allowed,
}

impl Stage {
    /// Gate a navigation request against this stage.
    pub fn gate(self) -> Gate {
        match self {
            Stage::Preview => Gate::Refused,
            Stage::Analyse => Gate::Interrupted,
            Stage::Manual => Gate::Allowed,
        }
    }

    /// Whether navigation controls should be enabled at all. Used by callers
    /// to gray out controls; the gate above is what actually blocks requests.
    pub fn allows_navigation(self) -> bool {
        match self {
            Stage::Preview => false,
            Stage::Analyse | Stage::Manual => true,
        }
    }
}
