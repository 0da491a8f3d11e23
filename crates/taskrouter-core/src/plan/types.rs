//! Provisioning plan types
//!
//! Defines the structure of a workspace plan file. Activities and queues are
//! referenced by friendly name; ids are resolved while provisioning.

use crate::error::{Result, TaskRouterError};
use crate::workspace::{WorkflowParams, WorkspaceParams, IDLE_ACTIVITY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Root plan structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Workspace to (re)create
    pub workspace: WorkspaceParams,

    #[serde(default)]
    pub workers: Vec<WorkerPlan>,

    #[serde(default)]
    pub task_queues: Vec<TaskQueuePlan>,

    #[serde(default)]
    pub workflow: Option<WorkflowPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerPlan {
    pub friendly_name: String,

    /// Starting activity name
    #[serde(default = "default_activity")]
    pub activity: String,

    /// Free-form attributes, sent as a JSON document
    #[serde(default)]
    pub attributes: toml::Table,
}

fn default_activity() -> String {
    IDLE_ACTIVITY.to_string()
}

impl WorkerPlan {
    /// Attributes rendered as JSON text
    pub fn attributes_json(&self) -> Result<String> {
        serde_json::to_string(&self.attributes).map_err(|e| {
            TaskRouterError::config(format!(
                "attributes of worker '{}' are not representable as JSON: {}",
                self.friendly_name, e
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQueuePlan {
    pub friendly_name: String,

    /// Activity a worker moves to when reserved
    pub reservation_activity: String,

    /// Activity a worker moves to when assigned
    pub assignment_activity: String,

    /// Worker selection expression, e.g. `products HAS "ProgrammableSMS"`
    #[serde(default)]
    pub target_workers: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPlan {
    pub friendly_name: String,

    #[serde(default)]
    pub assignment_callback_url: Option<String>,

    #[serde(default)]
    pub fallback_assignment_callback_url: Option<String>,

    /// Seconds; accepts `15` or `"15"`
    #[serde(default, deserialize_with = "timeout_text")]
    pub task_reservation_timeout: Option<String>,

    /// Queue for tasks no route matches
    pub default_queue: String,

    #[serde(default)]
    pub routes: Vec<RoutePlan>,
}

/// One filter of the workflow's routing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    #[serde(default)]
    pub name: Option<String>,

    /// Task attribute expression, e.g. `selected_product=="ProgrammableSMS"`
    pub expression: String,

    /// Target queue friendly name
    pub queue: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimeout {
    Seconds(i64),
    Text(String),
}

fn timeout_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<RawTimeout> = Option::deserialize(deserializer)?;
    Ok(raw.map(|r| match r {
        RawTimeout::Seconds(n) => n.to_string(),
        RawTimeout::Text(s) => s,
    }))
}

impl WorkflowPlan {
    /// Workflow parameters once the routing configuration is known
    pub fn params(&self, configuration: String) -> WorkflowParams {
        WorkflowParams {
            friendly_name: self.friendly_name.clone(),
            configuration,
            assignment_callback_url: self.assignment_callback_url.clone(),
            fallback_assignment_callback_url: self.fallback_assignment_callback_url.clone(),
            task_reservation_timeout: self.task_reservation_timeout.clone(),
        }
    }
}

impl Plan {
    /// Parse a plan from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a plan file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Local consistency checks; runs before anything remote is touched
    ///
    /// Catches empty names, routes to queues the plan does not create, and a
    /// malformed reservation timeout.
    pub fn validate(&self) -> Result<()> {
        if self.workspace.friendly_name.is_empty() {
            return Err(TaskRouterError::validation(
                "workspace.friendly_name",
                "must not be empty",
            ));
        }

        for worker in &self.workers {
            if worker.friendly_name.is_empty() {
                return Err(TaskRouterError::validation(
                    "workers.friendly_name",
                    "must not be empty",
                ));
            }
            worker.attributes_json()?;
        }

        let queues: HashSet<&str> = self
            .task_queues
            .iter()
            .map(|q| q.friendly_name.as_str())
            .collect();

        if let Some(workflow) = &self.workflow {
            let targets = workflow
                .routes
                .iter()
                .map(|r| r.queue.as_str())
                .chain(std::iter::once(workflow.default_queue.as_str()));
            for queue in targets {
                if !queues.contains(queue) {
                    return Err(TaskRouterError::validation(
                        "workflow",
                        format!("routes to task queue '{}' which the plan does not define", queue),
                    ));
                }
            }

            workflow.params(String::new()).validate()?;
        }

        Ok(())
    }
}

/// Create a sample plan file content
pub fn sample_plan() -> &'static str {
    r#"# Workspace provisioning plan
# Activities and queues are referenced by name.

[workspace]
friendly_name = "Support"
event_callback_url = "https://example.com/events"

[[workers]]
friendly_name = "Bob"
activity = "Idle"
attributes = { products = ["ProgrammableSMS"], contact_uri = "+15550100" }

[[workers]]
friendly_name = "Alice"
attributes = { products = ["ProgrammableVoice"], contact_uri = "+15550101" }

[[task_queues]]
friendly_name = "SMS"
target_workers = 'products HAS "ProgrammableSMS"'
reservation_activity = "Busy"
assignment_activity = "Busy"

[[task_queues]]
friendly_name = "Voice"
target_workers = 'products HAS "ProgrammableVoice"'
reservation_activity = "Busy"
assignment_activity = "Busy"

[[task_queues]]
friendly_name = "Default"
target_workers = "1==1"
reservation_activity = "Busy"
assignment_activity = "Busy"

[workflow]
friendly_name = "Tech Support"
assignment_callback_url = "https://example.com/call/assignment"
fallback_assignment_callback_url = "https://example.com/call/fallback"
task_reservation_timeout = 15
default_queue = "Default"

[[workflow.routes]]
name = "SMS"
expression = 'selected_product=="ProgrammableSMS"'
queue = "SMS"

[[workflow.routes]]
name = "Voice"
expression = 'selected_product=="ProgrammableVoice"'
queue = "Voice"
"#
}
