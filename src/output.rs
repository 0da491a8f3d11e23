//! Human-readable and JSON rendering of command results

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use taskrouter_core::{
    ActivityRecord, PhoneIndex, ProvisionReport, WorkerRecord, WorkspaceIdentity,
};

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn workspace(identity: &WorkspaceIdentity, idle: &ActivityRecord, json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "workspace": identity,
            "idle_activity": idle,
        }));
    }
    println!("{}", format_workspace(identity, idle));
    Ok(())
}

pub fn worker(worker: &WorkerRecord, json: bool) -> Result<()> {
    if json {
        return print_json(worker);
    }
    println!("{}", format_worker(worker));
    Ok(())
}

/// Workers keyed by contact, sorted by contact
pub fn contacts(index: &PhoneIndex, json: bool) -> Result<()> {
    if json {
        let sorted: BTreeMap<&str, &WorkerRecord> = index.iter().collect();
        return print_json(&sorted);
    }
    println!("{}", format_contacts(index));
    Ok(())
}

pub fn report(report: &ProvisionReport, json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "workspace": report.workspace,
            "workers": report.workers,
            "task_queues": report.task_queues,
            "workflow": report.workflow,
        }));
    }
    println!("{}", format_report(report));
    Ok(())
}

fn format_workspace(identity: &WorkspaceIdentity, idle: &ActivityRecord) -> String {
    format!(
        "Workspace: {} ({})\nEvent callback: {}\nIdle activity: {}",
        identity.friendly_name,
        identity.id,
        identity.event_callback_url.as_deref().unwrap_or("-"),
        idle.id
    )
}

fn format_worker(worker: &WorkerRecord) -> String {
    format!(
        "{} ({})  activity: {}  available: {}",
        worker.friendly_name,
        worker.id,
        worker.activity_name.as_deref().unwrap_or("-"),
        if worker.available { "yes" } else { "no" }
    )
}

fn format_contacts(index: &PhoneIndex) -> String {
    if index.is_empty() {
        return "No workers".to_string();
    }
    let mut entries: Vec<_> = index.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(contact, worker)| format!("{:<16} {}", contact, format_worker(worker)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_report(report: &ProvisionReport) -> String {
    let mut lines = vec![format!(
        "Workspace: {} ({})",
        report.workspace.friendly_name, report.workspace.id
    )];
    for worker in &report.workers {
        lines.push(format!("  worker  {}", format_worker(worker)));
    }
    for queue in &report.task_queues {
        lines.push(format!("  queue   {}", queue));
    }
    if let Some(workflow) = &report.workflow {
        lines.push(format!(
            "Workflow: {} ({})",
            workflow.friendly_name, workflow.id
        ));
    }
    lines.join("\n")
}
