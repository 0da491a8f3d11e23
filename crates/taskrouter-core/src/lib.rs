//! taskrouter-core - typed access to TaskRouter workspaces
//!
//! This crate provides:
//! - `WorkspaceHandle`: create-or-replace provisioning, name lookups,
//!   a memoized idle activity and a phone-to-worker index
//! - `ResourceClient`: the seam to the remote API, with a blocking REST
//!   implementation
//! - Declarative provisioning plans
//! - Configuration loading
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  calls   ┌──────────────────┐  HTTPS   ┌────────────────┐
//! │  Plan / CLI  │ ───────→ │ WorkspaceHandle  │ ───────→ │ ResourceClient │
//! │              │ ←─────── │  (caches)        │ ←─────── │  (RestClient)  │
//! └──────────────┘ records  └──────────────────┘  pages   └────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use taskrouter_core::{load_config, RestClient, WorkspaceHandle};
//! use std::sync::Arc;
//!
//! let config = load_config(&std::env::current_dir()?)?;
//! let client = Arc::new(RestClient::from_config(&config));
//!
//! let mut workspace = WorkspaceHandle::fetch(client, "WS0123")?;
//! let idle = workspace.idle_activity()?;
//! println!("Idle activity: {}", idle.id);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod plan;
pub mod types;
pub mod workspace;

pub use client::{ClientError, ResourceClient, ResourceIter, RestClient, SharedClient};
pub use config::{load_config, load_from_file, ConfigError, TaskRouterConfig};
pub use error::{Result, TaskRouterError};
pub use plan::{provision, Plan, ProvisionReport};
pub use types::{
    ActivityRecord, NewTaskQueue, NewWorker, NewWorkflow, TaskQueueRecord, WorkerFilter,
    WorkerRecord, WorkflowRecord, WorkspaceIdentity,
};
pub use workspace::{PhoneIndex, WorkflowParams, WorkspaceHandle, WorkspaceParams};

/// Get the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
