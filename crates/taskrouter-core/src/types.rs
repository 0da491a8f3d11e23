//! Resource records and creation requests
//!
//! Records mirror the JSON objects returned by the TaskRouter v1 API. Field
//! names follow the API's snake_case keys, except `sid` which is exposed as
//! `id`.

use serde::{Deserialize, Serialize};

/// Identity of a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceIdentity {
    #[serde(rename = "sid")]
    pub id: String,

    pub friendly_name: String,

    #[serde(default)]
    pub event_callback_url: Option<String>,
}

/// A worker (agent) inside a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    #[serde(rename = "sid")]
    pub id: String,

    pub friendly_name: String,

    /// Id of the worker's current activity
    #[serde(rename = "activity_sid", default)]
    pub activity_id: Option<String>,

    #[serde(default)]
    pub activity_name: Option<String>,

    #[serde(default)]
    pub available: bool,

    /// Opaque JSON document; conventionally carries `contact_uri`
    #[serde(default = "empty_attributes")]
    pub attributes: String,
}

fn empty_attributes() -> String {
    "{}".to_string()
}

/// A named worker state (Idle, Busy, Offline, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(rename = "sid")]
    pub id: String,

    pub friendly_name: String,

    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQueueRecord {
    #[serde(rename = "sid")]
    pub id: String,

    pub friendly_name: String,

    #[serde(rename = "reservation_activity_sid", default)]
    pub reservation_activity_id: Option<String>,

    #[serde(rename = "assignment_activity_sid", default)]
    pub assignment_activity_id: Option<String>,

    #[serde(default)]
    pub target_workers: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRecord {
    #[serde(rename = "sid")]
    pub id: String,

    pub friendly_name: String,

    /// Routing configuration document (JSON text)
    #[serde(default)]
    pub configuration: String,

    #[serde(default)]
    pub assignment_callback_url: Option<String>,

    #[serde(default)]
    pub fallback_assignment_callback_url: Option<String>,

    /// Seconds a reservation stays pending before timing out
    #[serde(default)]
    pub task_reservation_timeout: Option<u32>,
}

/// Optional filters for listing workers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerFilter {
    pub friendly_name: Option<String>,
    pub activity_name: Option<String>,
    pub available: Option<bool>,
}

impl WorkerFilter {
    /// No filtering; lists every worker in the workspace
    pub fn all() -> Self {
        Self::default()
    }
}

/// Parameters for creating a worker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorker {
    pub friendly_name: String,

    #[serde(default)]
    pub activity_id: Option<String>,

    /// JSON text
    #[serde(default)]
    pub attributes: Option<String>,
}

/// Parameters for creating a task queue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskQueue {
    pub friendly_name: String,
    pub reservation_activity_id: String,
    pub assignment_activity_id: String,

    #[serde(default)]
    pub target_workers: Option<String>,
}

/// Validated parameters for creating a workflow
///
/// Built from [`crate::workspace::WorkflowParams::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWorkflow {
    pub friendly_name: String,
    pub configuration: String,
    pub assignment_callback_url: Option<String>,
    pub fallback_assignment_callback_url: Option<String>,
    pub task_reservation_timeout: Option<u32>,
}
