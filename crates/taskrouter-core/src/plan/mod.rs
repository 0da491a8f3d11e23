//! Declarative workspace provisioning
//!
//! A [`Plan`] describes a whole workspace in TOML: the workspace itself,
//! its workers, task queues and one workflow. [`provision`] turns it into
//! remote resources through a [`crate::WorkspaceHandle`].

mod runner;
mod types;

pub use runner::{provision, ProvisionReport};
pub use types::{sample_plan, Plan, RoutePlan, TaskQueuePlan, WorkerPlan, WorkflowPlan};
