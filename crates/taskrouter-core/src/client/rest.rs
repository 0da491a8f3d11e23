//! REST client for the TaskRouter v1 API
//!
//! Blocking HTTP over a shared `ureq::Agent`. Requests carry HTTP Basic
//! credentials (account sid + auth token); mutations are form-encoded.

use super::pager::{Page, PageCursor, Pager};
use super::{ClientError, ResourceClient, ResourceIter};
use crate::config::TaskRouterConfig;
use crate::types::{
    ActivityRecord, NewTaskQueue, NewWorker, NewWorkflow, TaskQueueRecord, WorkerFilter,
    WorkerRecord, WorkflowRecord, WorkspaceIdentity,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Form fields / query parameters as (name, value) pairs
type Params = Vec<(&'static str, String)>;

/// HTTP implementation of [`ResourceClient`]
pub struct RestClient {
    agent: ureq::Agent,

    /// API root, e.g. `https://taskrouter.twilio.com/v1`
    base_url: String,

    /// Precomputed `Authorization` header value
    authorization: String,

    /// Records requested per page
    page_size: u32,
}

impl RestClient {
    /// Create a client against the public TaskRouter endpoint
    pub fn new(account_sid: &str, auth_token: &str) -> Self {
        Self {
            agent: build_agent(Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS)),
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            authorization: basic_authorization(account_sid, auth_token),
            page_size: crate::config::DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &TaskRouterConfig) -> Self {
        Self::new(&config.account.sid, &config.account.auth_token)
            .with_base_url(&config.api.base_url)
            .with_timeout(Duration::from_secs(config.api.timeout))
            .with_page_size(config.api.page_size)
    }

    /// Point the client at a different API root (regional edge, local proxy)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(timeout);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn call_json<T: DeserializeOwned>(&self, request: ureq::Request) -> Result<T, ClientError> {
        let response = request.set("Authorization", &self.authorization).call()?;
        Ok(response.into_json()?)
    }

    fn post_form<T: DeserializeOwned>(&self, path: &str, form: &Params) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!(url = %url, "POST");

        let pairs: Vec<(&str, &str)> = form.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &self.authorization)
            .send_form(&pairs)?;
        Ok(response.into_json()?)
    }

    /// Lazily page through a collection
    fn list<'a, T: DeserializeOwned + 'a>(
        &'a self,
        path: String,
        query: Params,
    ) -> ResourceIter<'a, T> {
        Box::new(Pager::new(move |cursor: &PageCursor| {
            let request = match cursor {
                PageCursor::First => {
                    let url = self.url(&path);
                    debug!(url = %url, "GET first page");
                    let mut request = self
                        .agent
                        .get(&url)
                        .query("PageSize", &self.page_size.to_string());
                    for (name, value) in &query {
                        request = request.query(name, value);
                    }
                    request
                }
                PageCursor::Url(url) => {
                    debug!(url = %url, "GET next page");
                    self.agent.get(url)
                }
            };
            let body: serde_json::Value = self.call_json(request)?;
            Page::from_json(body)
        }))
    }
}

impl ResourceClient for RestClient {
    fn list_workspaces(&self, friendly_name: &str) -> ResourceIter<'_, WorkspaceIdentity> {
        self.list(
            "/Workspaces".to_string(),
            vec![("FriendlyName", friendly_name.to_string())],
        )
    }

    fn create_workspace(
        &self,
        friendly_name: &str,
        event_callback_url: Option<&str>,
    ) -> Result<WorkspaceIdentity, ClientError> {
        self.post_form("/Workspaces", &workspace_form(friendly_name, event_callback_url))
    }

    fn delete_workspace(&self, workspace_id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/Workspaces/{}", workspace_id));
        debug!(url = %url, "DELETE");
        self.agent
            .delete(&url)
            .set("Authorization", &self.authorization)
            .call()?;
        Ok(())
    }

    fn fetch_workspace(&self, workspace_id: &str) -> Result<WorkspaceIdentity, ClientError> {
        let url = self.url(&format!("/Workspaces/{}", workspace_id));
        debug!(url = %url, "GET");
        self.call_json(self.agent.get(&url))
    }

    fn list_workers(
        &self,
        workspace_id: &str,
        filter: &WorkerFilter,
    ) -> ResourceIter<'_, WorkerRecord> {
        self.list(
            format!("/Workspaces/{}/Workers", workspace_id),
            worker_query(filter),
        )
    }

    fn create_worker(
        &self,
        workspace_id: &str,
        worker: &NewWorker,
    ) -> Result<WorkerRecord, ClientError> {
        self.post_form(
            &format!("/Workspaces/{}/Workers", workspace_id),
            &worker_form(worker),
        )
    }

    fn update_worker(
        &self,
        workspace_id: &str,
        worker_id: &str,
        activity_id: &str,
    ) -> Result<WorkerRecord, ClientError> {
        self.post_form(
            &format!("/Workspaces/{}/Workers/{}", workspace_id, worker_id),
            &vec![("ActivitySid", activity_id.to_string())],
        )
    }

    fn list_activities(
        &self,
        workspace_id: &str,
        friendly_name: &str,
    ) -> ResourceIter<'_, ActivityRecord> {
        self.list(
            format!("/Workspaces/{}/Activities", workspace_id),
            vec![("FriendlyName", friendly_name.to_string())],
        )
    }

    fn list_task_queues(
        &self,
        workspace_id: &str,
        friendly_name: &str,
    ) -> ResourceIter<'_, TaskQueueRecord> {
        self.list(
            format!("/Workspaces/{}/TaskQueues", workspace_id),
            vec![("FriendlyName", friendly_name.to_string())],
        )
    }

    fn create_task_queue(
        &self,
        workspace_id: &str,
        queue: &NewTaskQueue,
    ) -> Result<TaskQueueRecord, ClientError> {
        self.post_form(
            &format!("/Workspaces/{}/TaskQueues", workspace_id),
            &task_queue_form(queue),
        )
    }

    fn list_workflows(
        &self,
        workspace_id: &str,
        friendly_name: &str,
    ) -> ResourceIter<'_, WorkflowRecord> {
        self.list(
            format!("/Workspaces/{}/Workflows", workspace_id),
            vec![("FriendlyName", friendly_name.to_string())],
        )
    }

    fn create_workflow(
        &self,
        workspace_id: &str,
        workflow: &NewWorkflow,
    ) -> Result<WorkflowRecord, ClientError> {
        self.post_form(
            &format!("/Workspaces/{}/Workflows", workspace_id),
            &workflow_form(workflow),
        )
    }
}

fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(timeout).build()
}

fn basic_authorization(account_sid: &str, auth_token: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", account_sid, auth_token))
    )
}

fn workspace_form(friendly_name: &str, event_callback_url: Option<&str>) -> Params {
    let mut form = vec![("FriendlyName", friendly_name.to_string())];
    if let Some(url) = event_callback_url {
        form.push(("EventCallbackUrl", url.to_string()));
    }
    form
}

fn worker_query(filter: &WorkerFilter) -> Params {
    let mut query = Vec::new();
    if let Some(name) = &filter.friendly_name {
        query.push(("FriendlyName", name.clone()));
    }
    if let Some(activity) = &filter.activity_name {
        query.push(("ActivityName", activity.clone()));
    }
    if let Some(available) = filter.available {
        query.push(("Available", available.to_string()));
    }
    query
}

fn worker_form(worker: &NewWorker) -> Params {
    let mut form = vec![("FriendlyName", worker.friendly_name.clone())];
    if let Some(activity_id) = &worker.activity_id {
        form.push(("ActivitySid", activity_id.clone()));
    }
    if let Some(attributes) = &worker.attributes {
        form.push(("Attributes", attributes.clone()));
    }
    form
}

fn task_queue_form(queue: &NewTaskQueue) -> Params {
    let mut form = vec![
        ("FriendlyName", queue.friendly_name.clone()),
        ("ReservationActivitySid", queue.reservation_activity_id.clone()),
        ("AssignmentActivitySid", queue.assignment_activity_id.clone()),
    ];
    if let Some(target) = &queue.target_workers {
        form.push(("TargetWorkers", target.clone()));
    }
    form
}

fn workflow_form(workflow: &NewWorkflow) -> Params {
    let mut form = vec![
        ("FriendlyName", workflow.friendly_name.clone()),
        ("Configuration", workflow.configuration.clone()),
    ];
    if let Some(url) = &workflow.assignment_callback_url {
        form.push(("AssignmentCallbackUrl", url.clone()));
    }
    if let Some(url) = &workflow.fallback_assignment_callback_url {
        form.push(("FallbackAssignmentCallbackUrl", url.clone()));
    }
    if let Some(timeout) = workflow.task_reservation_timeout {
        form.push(("TaskReservationTimeout", timeout.to_string()));
    }
    form
}
