//! In-memory [`ResourceClient`] for tests
//!
//! Keeps per-operation call counters so tests can assert how many remote
//! round trips an operation cost. New workspaces get the classic default
//! activities (Offline, Idle, Busy, Reserved).

use super::{ClientError, ResourceClient, ResourceIter};
use crate::types::{
    ActivityRecord, NewTaskQueue, NewWorker, NewWorkflow, TaskQueueRecord, WorkerFilter,
    WorkerRecord, WorkflowRecord, WorkspaceIdentity,
};
use parking_lot::Mutex;
use std::collections::HashMap;

const DEFAULT_ACTIVITIES: [(&str, bool); 4] = [
    ("Offline", false),
    ("Idle", true),
    ("Busy", false),
    ("Reserved", false),
];

#[derive(Default)]
struct MockState {
    next_id: u32,
    workspaces: Vec<WorkspaceIdentity>,
    workers: Vec<(String, WorkerRecord)>,
    activities: Vec<(String, ActivityRecord)>,
    task_queues: Vec<(String, TaskQueueRecord)>,
    workflows: Vec<(String, WorkflowRecord)>,
    worker_updates: Vec<(String, String)>,
}

impl MockState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{:04}", prefix, self.next_id)
    }
}

#[derive(Default)]
pub(crate) struct MockClient {
    state: Mutex<MockState>,
    calls: Mutex<HashMap<&'static str, usize>>,
    failures: Mutex<HashMap<&'static str, ClientError>>,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Seed a workspace (with default activities) without counting a call
    pub(crate) fn seed_workspace(&self, friendly_name: &str) -> WorkspaceIdentity {
        let mut state = self.state.lock();
        insert_workspace(&mut state, friendly_name, None)
    }

    pub(crate) fn seed_activity(&self, workspace_id: &str, friendly_name: &str) -> ActivityRecord {
        let mut state = self.state.lock();
        let activity = ActivityRecord {
            id: state.next_id("WA"),
            friendly_name: friendly_name.to_string(),
            available: false,
        };
        state
            .activities
            .push((workspace_id.to_string(), activity.clone()));
        activity
    }

    /// Remove every activity with this name from a workspace
    pub(crate) fn remove_activity(&self, workspace_id: &str, friendly_name: &str) {
        self.state
            .lock()
            .activities
            .retain(|(ws, a)| !(ws == workspace_id && a.friendly_name == friendly_name));
    }

    pub(crate) fn seed_worker(
        &self,
        workspace_id: &str,
        friendly_name: &str,
        attributes: &str,
    ) -> WorkerRecord {
        let mut state = self.state.lock();
        let worker = WorkerRecord {
            id: state.next_id("WK"),
            friendly_name: friendly_name.to_string(),
            activity_id: None,
            activity_name: None,
            available: false,
            attributes: attributes.to_string(),
        };
        state.workers.push((workspace_id.to_string(), worker.clone()));
        worker
    }

    pub(crate) fn seed_task_queue(&self, workspace_id: &str, friendly_name: &str) -> TaskQueueRecord {
        let mut state = self.state.lock();
        let queue = TaskQueueRecord {
            id: state.next_id("WQ"),
            friendly_name: friendly_name.to_string(),
            reservation_activity_id: None,
            assignment_activity_id: None,
            target_workers: None,
        };
        state
            .task_queues
            .push((workspace_id.to_string(), queue.clone()));
        queue
    }

    pub(crate) fn seed_workflow(&self, workspace_id: &str, friendly_name: &str) -> WorkflowRecord {
        let mut state = self.state.lock();
        let workflow = WorkflowRecord {
            id: state.next_id("WW"),
            friendly_name: friendly_name.to_string(),
            configuration: "{}".to_string(),
            assignment_callback_url: None,
            fallback_assignment_callback_url: None,
            task_reservation_timeout: None,
        };
        state
            .workflows
            .push((workspace_id.to_string(), workflow.clone()));
        workflow
    }

    /// Make every later call to `operation` fail with `error`
    pub(crate) fn fail_on(&self, operation: &'static str, error: ClientError) {
        self.failures.lock().insert(operation, error);
    }

    pub(crate) fn calls(&self, operation: &str) -> usize {
        self.calls.lock().get(operation).copied().unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    pub(crate) fn workspaces_named(&self, friendly_name: &str) -> Vec<WorkspaceIdentity> {
        self.state
            .lock()
            .workspaces
            .iter()
            .filter(|w| w.friendly_name == friendly_name)
            .cloned()
            .collect()
    }

    pub(crate) fn workers_in(&self, workspace_id: &str) -> Vec<WorkerRecord> {
        children(&self.state.lock().workers, workspace_id)
    }

    pub(crate) fn task_queues_in(&self, workspace_id: &str) -> Vec<TaskQueueRecord> {
        children(&self.state.lock().task_queues, workspace_id)
    }

    pub(crate) fn workflows_in(&self, workspace_id: &str) -> Vec<WorkflowRecord> {
        children(&self.state.lock().workflows, workspace_id)
    }

    /// (worker id, activity id) pairs in update order
    pub(crate) fn worker_updates(&self) -> Vec<(String, String)> {
        self.state.lock().worker_updates.clone()
    }

    fn record(&self, operation: &'static str) -> Result<(), ClientError> {
        *self.calls.lock().entry(operation).or_insert(0) += 1;
        match self.failures.lock().get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn record_list<'a, T: 'a>(
        &self,
        operation: &'static str,
        items: impl FnOnce(&MockState) -> Vec<T>,
    ) -> ResourceIter<'a, T> {
        match self.record(operation) {
            Ok(()) => {
                let items = items(&*self.state.lock());
                Box::new(items.into_iter().map(Ok))
            }
            Err(err) => Box::new(std::iter::once(Err(err))),
        }
    }
}

fn insert_workspace(
    state: &mut MockState,
    friendly_name: &str,
    event_callback_url: Option<&str>,
) -> WorkspaceIdentity {
    let workspace = WorkspaceIdentity {
        id: state.next_id("WS"),
        friendly_name: friendly_name.to_string(),
        event_callback_url: event_callback_url.map(|u| u.to_string()),
    };
    state.workspaces.push(workspace.clone());

    for (name, available) in DEFAULT_ACTIVITIES {
        let activity = ActivityRecord {
            id: state.next_id("WA"),
            friendly_name: name.to_string(),
            available,
        };
        state.activities.push((workspace.id.clone(), activity));
    }

    workspace
}

fn children<T: Clone>(items: &[(String, T)], workspace_id: &str) -> Vec<T> {
    items
        .iter()
        .filter(|(ws, _)| ws == workspace_id)
        .map(|(_, item)| item.clone())
        .collect()
}

fn named<T: Clone>(
    items: &[(String, T)],
    workspace_id: &str,
    friendly_name: &str,
    name_of: impl Fn(&T) -> &str,
) -> Vec<T> {
    items
        .iter()
        .filter(|(ws, item)| ws == workspace_id && name_of(item) == friendly_name)
        .map(|(_, item)| item.clone())
        .collect()
}

fn not_found(what: &str) -> ClientError {
    ClientError::Api {
        status: 404,
        message: format!("The requested resource {} was not found", what),
    }
}

impl ResourceClient for MockClient {
    fn list_workspaces(&self, friendly_name: &str) -> ResourceIter<'_, WorkspaceIdentity> {
        self.record_list("list_workspaces", |state| {
            state
                .workspaces
                .iter()
                .filter(|w| w.friendly_name == friendly_name)
                .cloned()
                .collect()
        })
    }

    fn create_workspace(
        &self,
        friendly_name: &str,
        event_callback_url: Option<&str>,
    ) -> Result<WorkspaceIdentity, ClientError> {
        self.record("create_workspace")?;
        Ok(insert_workspace(
            &mut self.state.lock(),
            friendly_name,
            event_callback_url,
        ))
    }

    fn delete_workspace(&self, workspace_id: &str) -> Result<(), ClientError> {
        self.record("delete_workspace")?;
        let mut state = self.state.lock();
        let before = state.workspaces.len();
        state.workspaces.retain(|w| w.id != workspace_id);
        if state.workspaces.len() == before {
            return Err(not_found(&format!("/Workspaces/{}", workspace_id)));
        }
        state.workers.retain(|(ws, _)| ws != workspace_id);
        state.activities.retain(|(ws, _)| ws != workspace_id);
        state.task_queues.retain(|(ws, _)| ws != workspace_id);
        state.workflows.retain(|(ws, _)| ws != workspace_id);
        Ok(())
    }

    fn fetch_workspace(&self, workspace_id: &str) -> Result<WorkspaceIdentity, ClientError> {
        self.record("fetch_workspace")?;
        self.state
            .lock()
            .workspaces
            .iter()
            .find(|w| w.id == workspace_id)
            .cloned()
            .ok_or_else(|| not_found(&format!("/Workspaces/{}", workspace_id)))
    }

    fn list_workers(
        &self,
        workspace_id: &str,
        filter: &WorkerFilter,
    ) -> ResourceIter<'_, WorkerRecord> {
        self.record_list("list_workers", |state| {
            children(&state.workers, workspace_id)
                .into_iter()
                .filter(|w| {
                    filter
                        .friendly_name
                        .as_ref()
                        .map_or(true, |n| &w.friendly_name == n)
                        && filter
                            .activity_name
                            .as_ref()
                            .map_or(true, |a| w.activity_name.as_ref() == Some(a))
                        && filter.available.map_or(true, |av| w.available == av)
                })
                .collect()
        })
    }

    fn create_worker(
        &self,
        workspace_id: &str,
        worker: &NewWorker,
    ) -> Result<WorkerRecord, ClientError> {
        self.record("create_worker")?;
        let mut state = self.state.lock();
        let activity = worker.activity_id.as_ref().and_then(|id| {
            state
                .activities
                .iter()
                .find(|(ws, a)| ws == workspace_id && &a.id == id)
                .map(|(_, a)| a.clone())
        });
        let record = WorkerRecord {
            id: state.next_id("WK"),
            friendly_name: worker.friendly_name.clone(),
            activity_id: worker.activity_id.clone(),
            activity_name: activity.as_ref().map(|a| a.friendly_name.clone()),
            available: activity.map_or(false, |a| a.available),
            attributes: worker.attributes.clone().unwrap_or_else(|| "{}".to_string()),
        };
        state.workers.push((workspace_id.to_string(), record.clone()));
        Ok(record)
    }

    fn update_worker(
        &self,
        workspace_id: &str,
        worker_id: &str,
        activity_id: &str,
    ) -> Result<WorkerRecord, ClientError> {
        self.record("update_worker")?;
        let mut state = self.state.lock();
        let activity = state
            .activities
            .iter()
            .find(|(ws, a)| ws == workspace_id && a.id == activity_id)
            .map(|(_, a)| a.clone())
            .ok_or_else(|| not_found(&format!("Activity {}", activity_id)))?;

        let updated = state
            .workers
            .iter_mut()
            .find(|(ws, w)| ws == workspace_id && w.id == worker_id)
            .map(|(_, w)| {
                w.activity_id = Some(activity.id.clone());
                w.activity_name = Some(activity.friendly_name.clone());
                w.available = activity.available;
                w.clone()
            })
            .ok_or_else(|| not_found(&format!("Worker {}", worker_id)))?;

        state
            .worker_updates
            .push((worker_id.to_string(), activity_id.to_string()));
        Ok(updated)
    }

    fn list_activities(
        &self,
        workspace_id: &str,
        friendly_name: &str,
    ) -> ResourceIter<'_, ActivityRecord> {
        self.record_list("list_activities", |state| {
            named(&state.activities, workspace_id, friendly_name, |a| {
                a.friendly_name.as_str()
            })
        })
    }

    fn list_task_queues(
        &self,
        workspace_id: &str,
        friendly_name: &str,
    ) -> ResourceIter<'_, TaskQueueRecord> {
        self.record_list("list_task_queues", |state| {
            named(&state.task_queues, workspace_id, friendly_name, |q| {
                q.friendly_name.as_str()
            })
        })
    }

    fn create_task_queue(
        &self,
        workspace_id: &str,
        queue: &NewTaskQueue,
    ) -> Result<TaskQueueRecord, ClientError> {
        self.record("create_task_queue")?;
        let mut state = self.state.lock();
        let record = TaskQueueRecord {
            id: state.next_id("WQ"),
            friendly_name: queue.friendly_name.clone(),
            reservation_activity_id: Some(queue.reservation_activity_id.clone()),
            assignment_activity_id: Some(queue.assignment_activity_id.clone()),
            target_workers: queue.target_workers.clone(),
        };
        state
            .task_queues
            .push((workspace_id.to_string(), record.clone()));
        Ok(record)
    }

    fn list_workflows(
        &self,
        workspace_id: &str,
        friendly_name: &str,
    ) -> ResourceIter<'_, WorkflowRecord> {
        self.record_list("list_workflows", |state| {
            named(&state.workflows, workspace_id, friendly_name, |w| {
                w.friendly_name.as_str()
            })
        })
    }

    fn create_workflow(
        &self,
        workspace_id: &str,
        workflow: &NewWorkflow,
    ) -> Result<WorkflowRecord, ClientError> {
        self.record("create_workflow")?;
        let mut state = self.state.lock();
        let record = WorkflowRecord {
            id: state.next_id("WW"),
            friendly_name: workflow.friendly_name.clone(),
            configuration: workflow.configuration.clone(),
            assignment_callback_url: workflow.assignment_callback_url.clone(),
            fallback_assignment_callback_url: workflow.fallback_assignment_callback_url.clone(),
            task_reservation_timeout: workflow.task_reservation_timeout,
        };
        state
            .workflows
            .push((workspace_id.to_string(), record.clone()));
        Ok(record)
    }
}
