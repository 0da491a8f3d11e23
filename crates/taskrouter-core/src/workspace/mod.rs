//! Workspace facade
//!
//! Typed access to one remote workspace and its child resources.
//!
//! # Architecture
//!
//! ```text
//! WorkspaceHandle
//!     │
//!     ├── SharedClient (Arc<dyn ResourceClient>, shared by all handles)
//!     │
//!     ├── WorkspaceIdentity (immutable)
//!     │
//!     └── Caches (filled on first use, never invalidated)
//!         ├── Option<ActivityRecord>   "Idle"
//!         └── Option<PhoneIndex>       contact_uri -> WorkerRecord
//! ```
//!
//! # Example
//!
//! ```ignore
//! use taskrouter_core::{RestClient, WorkspaceHandle, WorkspaceParams};
//! use std::sync::Arc;
//!
//! let client = Arc::new(RestClient::new(&account_sid, &auth_token));
//!
//! // Drop any workspace called "Support" and start fresh
//! let mut workspace = WorkspaceHandle::replace(client, &WorkspaceParams {
//!     friendly_name: "Support".into(),
//!     event_callback_url: None,
//! })?;
//!
//! if let Some(worker) = workspace.find_worker_by_phone("+15550100")? {
//!     workspace.update_worker_status(&worker, "Busy")?;
//! }
//! ```

mod handle;
mod params;
mod phone_index;

pub use handle::{WorkspaceHandle, IDLE_ACTIVITY};
pub use params::{WorkflowParams, WorkspaceParams};
pub use phone_index::{contact_uri, PhoneIndex, CONTACT_ATTRIBUTE};
