//! WorkspaceHandle - facade over one remote workspace
//!
//! Wraps a workspace identity and the shared client, and memoizes two
//! lookups: the "Idle" activity and the contact-to-worker index. Neither
//! cache is ever invalidated; discard the handle to see remote changes.

use super::params::{WorkflowParams, WorkspaceParams};
use super::phone_index::PhoneIndex;
use crate::client::{ResourceClient, ResourceIter, SharedClient};
use crate::error::{Result, TaskRouterError};
use crate::types::{
    ActivityRecord, NewTaskQueue, NewWorker, TaskQueueRecord, WorkerFilter, WorkerRecord,
    WorkflowRecord, WorkspaceIdentity,
};
use tracing::{debug, info};

/// Activity every provisioned workspace is expected to have
pub const IDLE_ACTIVITY: &str = "Idle";

/// Handle to a single workspace
///
/// Cache-filling lookups take `&mut self`; a handle is meant for one owner
/// issuing calls in sequence.
pub struct WorkspaceHandle {
    client: SharedClient,

    workspace: WorkspaceIdentity,

    /// Resolved on first use of [`WorkspaceHandle::idle_activity`]
    idle_activity: Option<ActivityRecord>,

    /// Built on first phone lookup
    phone_index: Option<PhoneIndex>,
}

impl WorkspaceHandle {
    /// Wrap an already-known workspace
    pub fn new(client: SharedClient, workspace: WorkspaceIdentity) -> Self {
        Self {
            client,
            workspace,
            idle_activity: None,
            phone_index: None,
        }
    }

    /// Delete any workspace with the same friendly name, then create a fresh one
    ///
    /// Two separate remote calls: if the delete succeeds and the create
    /// fails, no workspace with this name is left. Only the first listed
    /// match is deleted.
    pub fn replace(client: SharedClient, params: &WorkspaceParams) -> Result<Self> {
        let existing = first(client.list_workspaces(&params.friendly_name))?;
        if let Some(existing) = existing {
            info!(
                workspace = %existing.id,
                name = %existing.friendly_name,
                "Deleting existing workspace"
            );
            client.delete_workspace(&existing.id)?;
        }

        let workspace = client.create_workspace(
            &params.friendly_name,
            params.event_callback_url.as_deref(),
        )?;
        info!(workspace = %workspace.id, name = %workspace.friendly_name, "Created workspace");

        Ok(Self::new(client, workspace))
    }

    /// Fetch a workspace by id
    pub fn fetch(client: SharedClient, workspace_id: &str) -> Result<Self> {
        let workspace = client.fetch_workspace(workspace_id).map_err(|e| {
            if e.is_not_found() {
                TaskRouterError::not_found(format!("workspace '{}'", workspace_id))
            } else {
                TaskRouterError::Transport(e)
            }
        })?;
        Ok(Self::new(client, workspace))
    }

    pub fn id(&self) -> &str {
        &self.workspace.id
    }

    pub fn friendly_name(&self) -> &str {
        &self.workspace.friendly_name
    }

    pub fn identity(&self) -> &WorkspaceIdentity {
        &self.workspace
    }

    // ========== Creation ==========

    /// Create a worker; not idempotent
    pub fn add_worker(&self, worker: &NewWorker) -> Result<WorkerRecord> {
        debug!(workspace = %self.workspace.id, name = %worker.friendly_name, "Creating worker");
        Ok(self.client.create_worker(&self.workspace.id, worker)?)
    }

    /// Create a task queue; not idempotent
    pub fn add_task_queue(&self, queue: &NewTaskQueue) -> Result<()> {
        debug!(workspace = %self.workspace.id, name = %queue.friendly_name, "Creating task queue");
        self.client.create_task_queue(&self.workspace.id, queue)?;
        Ok(())
    }

    /// Validate and create a workflow; not idempotent
    ///
    /// Invalid parameters fail before any remote call.
    pub fn add_workflow(&self, params: &WorkflowParams) -> Result<WorkflowRecord> {
        let workflow = params.validate()?;
        debug!(workspace = %self.workspace.id, name = %workflow.friendly_name, "Creating workflow");
        Ok(self.client.create_workflow(&self.workspace.id, &workflow)?)
    }

    // ========== Name resolution ==========

    /// First activity with this friendly name, if any
    pub fn find_activity_by_name(&self, name: &str) -> Result<Option<ActivityRecord>> {
        find_activity(self.client.as_ref(), &self.workspace.id, name)
    }

    pub fn find_task_queue_by_name(&self, name: &str) -> Result<Option<TaskQueueRecord>> {
        debug!(workspace = %self.workspace.id, name = %name, "Looking up task queue");
        first(self.client.list_task_queues(&self.workspace.id, name))
    }

    pub fn find_workflow_by_name(&self, name: &str) -> Result<Option<WorkflowRecord>> {
        debug!(workspace = %self.workspace.id, name = %name, "Looking up workflow");
        first(self.client.list_workflows(&self.workspace.id, name))
    }

    // ========== Cached lookups ==========

    /// The workspace's "Idle" activity, resolved once per handle
    pub fn idle_activity(&mut self) -> Result<&ActivityRecord> {
        get_or_try_init(&mut self.idle_activity, || {
            find_activity(self.client.as_ref(), &self.workspace.id, IDLE_ACTIVITY)?.ok_or_else(
                || {
                    TaskRouterError::not_found(format!(
                        "activity '{}' in workspace '{}'",
                        IDLE_ACTIVITY, self.workspace.friendly_name
                    ))
                },
            )
        })
    }

    /// Contact-to-worker index, built from a full worker listing on first use
    ///
    /// A failed build leaves nothing cached.
    pub fn phone_index(&mut self) -> Result<&PhoneIndex> {
        get_or_try_init(&mut self.phone_index, || {
            debug!(workspace = %self.workspace.id, "Building phone index");
            let index = PhoneIndex::build(
                self.client
                    .list_workers(&self.workspace.id, &WorkerFilter::all()),
            )?;
            debug!(workspace = %self.workspace.id, workers = index.len(), "Phone index built");
            Ok(index)
        })
    }

    /// Worker whose `contact_uri` equals `phone` exactly
    pub fn find_worker_by_phone(&mut self, phone: &str) -> Result<Option<WorkerRecord>> {
        Ok(self.phone_index()?.get(phone).cloned())
    }

    // ========== Mutation ==========

    /// Move `worker` to the activity named `activity_name`
    ///
    /// Cached worker records (the phone index) keep their old activity.
    pub fn update_worker_status(
        &self,
        worker: &WorkerRecord,
        activity_name: &str,
    ) -> Result<WorkerRecord> {
        let activity = self.find_activity_by_name(activity_name)?.ok_or_else(|| {
            TaskRouterError::UnknownActivity {
                activity: activity_name.to_string(),
                workspace: self.workspace.friendly_name.clone(),
            }
        })?;

        info!(
            worker = %worker.friendly_name,
            activity = %activity.friendly_name,
            "Updating worker status"
        );
        Ok(self
            .client
            .update_worker(&self.workspace.id, &worker.id, &activity.id)?)
    }
}

impl std::fmt::Debug for WorkspaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceHandle")
            .field("workspace", &self.workspace)
            .field("idle_activity", &self.idle_activity)
            .field("phone_index_built", &self.phone_index.is_some())
            .finish()
    }
}

fn find_activity(
    client: &dyn ResourceClient,
    workspace_id: &str,
    name: &str,
) -> Result<Option<ActivityRecord>> {
    debug!(workspace = %workspace_id, name = %name, "Looking up activity");
    first(client.list_activities(workspace_id, name))
}

/// First element of a listing; only the first page is ever requested
fn first<T>(mut items: ResourceIter<'_, T>) -> Result<Option<T>> {
    items
        .next()
        .transpose()
        .map_err(TaskRouterError::Transport)
}

/// Single-assignment cache: run `load` only while `slot` is empty
fn get_or_try_init<T>(slot: &mut Option<T>, load: impl FnOnce() -> Result<T>) -> Result<&T> {
    let value = match slot.take() {
        Some(value) => value,
        None => load()?,
    };
    Ok(&*slot.insert(value))
}
