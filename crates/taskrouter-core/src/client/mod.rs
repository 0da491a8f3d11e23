//! TaskRouter resource client
//!
//! The workspace facade reaches the remote API only through the
//! [`ResourceClient`] trait. [`RestClient`] is the HTTP implementation.

mod error;
mod pager;
mod rest;

#[cfg(test)]
pub(crate) mod mock;

pub use error::ClientError;
pub use pager::{Page, PageCursor, Pager};
pub use rest::RestClient;

use crate::types::{
    ActivityRecord, NewTaskQueue, NewWorker, NewWorkflow, TaskQueueRecord, WorkerFilter,
    WorkerRecord, WorkflowRecord, WorkspaceIdentity,
};

/// Lazily paginated listing; further pages are fetched as the iterator advances
pub type ResourceIter<'a, T> = Box<dyn Iterator<Item = Result<T, ClientError>> + 'a>;

/// Resource client trait
///
/// Every method is a blocking round trip. Listings are filtered on the remote
/// side; "first" means the first element of the first page.
pub trait ResourceClient: Send + Sync {
    /// List workspaces whose friendly name matches `friendly_name`
    fn list_workspaces(&self, friendly_name: &str) -> ResourceIter<'_, WorkspaceIdentity>;

    fn create_workspace(
        &self,
        friendly_name: &str,
        event_callback_url: Option<&str>,
    ) -> Result<WorkspaceIdentity, ClientError>;

    fn delete_workspace(&self, workspace_id: &str) -> Result<(), ClientError>;

    fn fetch_workspace(&self, workspace_id: &str) -> Result<WorkspaceIdentity, ClientError>;

    fn list_workers(
        &self,
        workspace_id: &str,
        filter: &WorkerFilter,
    ) -> ResourceIter<'_, WorkerRecord>;

    fn create_worker(
        &self,
        workspace_id: &str,
        worker: &NewWorker,
    ) -> Result<WorkerRecord, ClientError>;

    /// Move a worker to another activity
    fn update_worker(
        &self,
        workspace_id: &str,
        worker_id: &str,
        activity_id: &str,
    ) -> Result<WorkerRecord, ClientError>;

    fn list_activities(
        &self,
        workspace_id: &str,
        friendly_name: &str,
    ) -> ResourceIter<'_, ActivityRecord>;

    fn list_task_queues(
        &self,
        workspace_id: &str,
        friendly_name: &str,
    ) -> ResourceIter<'_, TaskQueueRecord>;

    fn create_task_queue(
        &self,
        workspace_id: &str,
        queue: &NewTaskQueue,
    ) -> Result<TaskQueueRecord, ClientError>;

    fn list_workflows(
        &self,
        workspace_id: &str,
        friendly_name: &str,
    ) -> ResourceIter<'_, WorkflowRecord>;

    fn create_workflow(
        &self,
        workspace_id: &str,
        workflow: &NewWorkflow,
    ) -> Result<WorkflowRecord, ClientError>;
}

/// Shared handle to a client; one authenticated client serves every workspace
pub type SharedClient = std::sync::Arc<dyn ResourceClient>;
