//! Creation parameters that need checking before they reach the API

use crate::error::{Result, TaskRouterError};
use crate::types::NewWorkflow;
use serde::{Deserialize, Serialize};

/// Desired workspace identity for [`super::WorkspaceHandle::replace`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceParams {
    pub friendly_name: String,

    #[serde(default)]
    pub event_callback_url: Option<String>,
}

/// Workflow parameters as written by a caller
///
/// `task_reservation_timeout` stays in its textual form until
/// [`WorkflowParams::validate`] converts it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowParams {
    pub friendly_name: String,

    /// Routing configuration document (JSON text)
    pub configuration: String,

    #[serde(default)]
    pub assignment_callback_url: Option<String>,

    #[serde(default)]
    pub fallback_assignment_callback_url: Option<String>,

    /// Seconds, as text
    #[serde(default)]
    pub task_reservation_timeout: Option<String>,
}

impl WorkflowParams {
    /// Convert into API-ready parameters
    pub fn validate(&self) -> Result<NewWorkflow> {
        let task_reservation_timeout = self
            .task_reservation_timeout
            .as_deref()
            .map(parse_timeout)
            .transpose()?;

        Ok(NewWorkflow {
            friendly_name: self.friendly_name.clone(),
            configuration: self.configuration.clone(),
            assignment_callback_url: self.assignment_callback_url.clone(),
            fallback_assignment_callback_url: self.fallback_assignment_callback_url.clone(),
            task_reservation_timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<u32> {
    raw.parse::<u32>().map_err(|e| {
        TaskRouterError::validation(
            "TaskReservationTimeout",
            format!("'{}' is not a number of seconds ({})", raw, e),
        )
    })
}
