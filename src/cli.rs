//! Command-line interface
//!
//! Each subcommand maps onto one workspace operation.

use crate::output;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskrouter_core::config::sample_config;
use taskrouter_core::plan::sample_plan;
use taskrouter_core::{
    load_config, load_from_file, provision, Plan, RestClient, SharedClient, TaskRouterConfig,
    WorkspaceHandle,
};

/// Provision and inspect TaskRouter workspaces
#[derive(Parser, Debug)]
#[command(name = "taskrouter", version, about)]
pub struct Cli {
    /// Config file (default: ./.taskrouter.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace a workspace and create everything a plan file describes
    Provision {
        /// Plan file (TOML)
        plan: PathBuf,
    },
    /// Show a workspace and its idle activity
    Show {
        workspace_id: String,
    },
    /// List every worker by contact_uri
    Contacts {
        workspace_id: String,
    },
    /// Find the worker whose contact_uri matches a phone number
    FindWorker {
        workspace_id: String,
        phone: String,
    },
    /// Move the worker with this phone number to another activity
    SetStatus {
        workspace_id: String,
        phone: String,
        /// Activity friendly name, e.g. Idle or Offline
        activity: String,
    },
    /// Print a sample plan file
    SamplePlan,
    /// Print a sample config file
    SampleConfig,
}

impl Command {
    /// Whether the command talks to the API
    fn is_remote(&self) -> bool {
        !matches!(self, Command::SamplePlan | Command::SampleConfig)
    }
}

/// Run a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    if !cli.command.is_remote() {
        match cli.command {
            Command::SamplePlan => print!("{}", sample_plan()),
            _ => print!("{}", sample_config()),
        }
        return Ok(());
    }

    let config = resolve_config(cli.config.as_deref())?;
    config.validate().context("TaskRouter credentials are not configured")?;
    let client: SharedClient = Arc::new(RestClient::from_config(&config));

    execute(cli.command, client, cli.json)
}

fn resolve_config(path: Option<&Path>) -> Result<TaskRouterConfig> {
    let config = match path {
        Some(path) => load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            load_config(&cwd)?
        }
    };
    Ok(config)
}

/// Run a remote command against `client`
pub fn execute(command: Command, client: SharedClient, json: bool) -> Result<()> {
    match command {
        Command::Provision { plan } => {
            let plan = Plan::load(&plan)
                .with_context(|| format!("Failed to load plan {}", plan.display()))?;
            let (_, report) = provision(client, &plan)?;
            output::report(&report, json)
        }
        Command::Show { workspace_id } => {
            let mut workspace = WorkspaceHandle::fetch(client, &workspace_id)?;
            let identity = workspace.identity().clone();
            let idle = workspace.idle_activity()?;
            output::workspace(&identity, idle, json)
        }
        Command::Contacts { workspace_id } => {
            let mut workspace = WorkspaceHandle::fetch(client, &workspace_id)?;
            output::contacts(workspace.phone_index()?, json)
        }
        Command::FindWorker {
            workspace_id,
            phone,
        } => {
            let mut workspace = WorkspaceHandle::fetch(client, &workspace_id)?;
            match workspace.find_worker_by_phone(&phone)? {
                Some(worker) => output::worker(&worker, json),
                None => anyhow::bail!("No worker with contact '{}'", phone),
            }
        }
        Command::SetStatus {
            workspace_id,
            phone,
            activity,
        } => {
            let mut workspace = WorkspaceHandle::fetch(client, &workspace_id)?;
            let worker = workspace
                .find_worker_by_phone(&phone)?
                .with_context(|| format!("No worker with contact '{}'", phone))?;
            let updated = workspace.update_worker_status(&worker, &activity)?;
            output::worker(&updated, json)
        }
        Command::SamplePlan | Command::SampleConfig => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_provision() {
        let cli = Cli::try_parse_from(["taskrouter", "provision", "plan.toml"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Provision {
                plan: PathBuf::from("plan.toml")
            }
        );
        assert!(!cli.json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_set_status_with_global_flags() {
        let cli = Cli::try_parse_from([
            "taskrouter",
            "set-status",
            "WS0001",
            "+15550100",
            "Offline",
            "--json",
            "--config",
            "/tmp/tr.toml",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::SetStatus {
                workspace_id: "WS0001".to_string(),
                phone: "+15550100".to_string(),
                activity: "Offline".to_string(),
            }
        );
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tr.toml")));
    }

    #[test]
    fn test_parse_contacts() {
        let cli = Cli::try_parse_from(["taskrouter", "contacts", "WS0001"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Contacts {
                workspace_id: "WS0001".to_string()
            }
        );
    }

    #[test]
    fn test_parse_requires_arguments() {
        assert!(Cli::try_parse_from(["taskrouter", "find-worker", "WS0001"]).is_err());
        assert!(Cli::try_parse_from(["taskrouter"]).is_err());
    }

    #[test]
    fn test_sample_commands_are_local() {
        assert!(!Command::SamplePlan.is_remote());
        assert!(!Command::SampleConfig.is_remote());
        assert!(Command::Show {
            workspace_id: "WS1".to_string()
        }
        .is_remote());
    }

    #[test]
    fn test_resolve_config_from_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tr.toml");
        std::fs::write(&path, "[api]\npage_size = 3\n").unwrap();

        let config = resolve_config(Some(&path)).unwrap();
        assert_eq!(config.api.page_size, 3);
    }

    #[test]
    fn test_resolve_config_missing_file() {
        let err = resolve_config(Some(Path::new("/nonexistent/tr.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tr.toml"));
    }
}
