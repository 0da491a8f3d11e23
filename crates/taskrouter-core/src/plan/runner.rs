//! Provisioning runner
//!
//! Replaces the workspace, then creates workers, task queues and the
//! workflow in dependency order, translating names into ids as it goes.

use super::types::{Plan, RoutePlan, WorkflowPlan};
use crate::client::SharedClient;
use crate::error::{Result, TaskRouterError};
use crate::types::{NewTaskQueue, NewWorker, WorkerRecord, WorkflowRecord, WorkspaceIdentity};
use crate::workspace::{WorkspaceHandle, IDLE_ACTIVITY};
use serde_json::json;
use tracing::info;

/// What a provisioning run created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub workspace: WorkspaceIdentity,
    pub workers: Vec<WorkerRecord>,
    /// Friendly names of the created queues
    pub task_queues: Vec<String>,
    pub workflow: Option<WorkflowRecord>,
}

/// Provision a workspace from a plan
///
/// The plan is validated locally first. Any existing workspace with the
/// plan's name is deleted. Failures part-way leave whatever was already
/// created; re-running the plan starts over from a fresh workspace.
pub fn provision(client: SharedClient, plan: &Plan) -> Result<(WorkspaceHandle, ProvisionReport)> {
    plan.validate()?;

    let mut handle = WorkspaceHandle::replace(client, &plan.workspace)?;

    let mut workers = Vec::with_capacity(plan.workers.len());
    for worker in &plan.workers {
        let activity_id = resolve_activity(&mut handle, &worker.activity)?;
        let record = handle.add_worker(&NewWorker {
            friendly_name: worker.friendly_name.clone(),
            activity_id: Some(activity_id),
            attributes: Some(worker.attributes_json()?),
        })?;
        workers.push(record);
    }
    info!(count = workers.len(), "Workers created");

    let mut task_queues = Vec::with_capacity(plan.task_queues.len());
    for queue in &plan.task_queues {
        let reservation_activity_id = resolve_activity(&mut handle, &queue.reservation_activity)?;
        let assignment_activity_id = resolve_activity(&mut handle, &queue.assignment_activity)?;
        handle.add_task_queue(&NewTaskQueue {
            friendly_name: queue.friendly_name.clone(),
            reservation_activity_id,
            assignment_activity_id,
            target_workers: queue.target_workers.clone(),
        })?;
        task_queues.push(queue.friendly_name.clone());
    }
    info!(count = task_queues.len(), "Task queues created");

    let workflow = match &plan.workflow {
        Some(workflow) => {
            let configuration = routing_configuration(&handle, workflow)?;
            let record = handle.add_workflow(&workflow.params(configuration))?;
            info!(workflow = %record.id, name = %record.friendly_name, "Workflow created");
            Some(record)
        }
        None => None,
    };

    let report = ProvisionReport {
        workspace: handle.identity().clone(),
        workers,
        task_queues,
        workflow,
    };
    Ok((handle, report))
}

/// Activity id for a name; the idle activity comes from the handle's cache
fn resolve_activity(handle: &mut WorkspaceHandle, name: &str) -> Result<String> {
    if name == IDLE_ACTIVITY {
        return Ok(handle.idle_activity()?.id.clone());
    }

    handle
        .find_activity_by_name(name)?
        .map(|activity| activity.id)
        .ok_or_else(|| {
            TaskRouterError::not_found(format!(
                "activity '{}' in workspace '{}'",
                name,
                handle.friendly_name()
            ))
        })
}

fn resolve_queue(handle: &WorkspaceHandle, name: &str) -> Result<String> {
    handle
        .find_task_queue_by_name(name)?
        .map(|queue| queue.id)
        .ok_or_else(|| {
            TaskRouterError::not_found(format!(
                "task queue '{}' in workspace '{}'",
                name,
                handle.friendly_name()
            ))
        })
}

/// Build the workflow's `task_routing` document with queue ids in place of names
fn routing_configuration(handle: &WorkspaceHandle, workflow: &WorkflowPlan) -> Result<String> {
    let filters = workflow
        .routes
        .iter()
        .map(|route| route_filter(handle, route))
        .collect::<Result<Vec<_>>>()?;

    let default_queue = resolve_queue(handle, &workflow.default_queue)?;

    let configuration = json!({
        "task_routing": {
            "filters": filters,
            "default_filter": { "queue": default_queue }
        }
    });
    Ok(configuration.to_string())
}

fn route_filter(handle: &WorkspaceHandle, route: &RoutePlan) -> Result<serde_json::Value> {
    let queue = resolve_queue(handle, &route.queue)?;
    let name = route.name.clone().unwrap_or_else(|| route.queue.clone());
    Ok(json!({
        "filter_friendly_name": name,
        "expression": route.expression,
        "targets": [{ "queue": queue }]
    }))
}
