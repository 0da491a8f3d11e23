//! Reverse index from a worker's contact identifier to the worker

use crate::client::ClientError;
use crate::error::{Result, TaskRouterError};
use crate::types::WorkerRecord;
use std::collections::HashMap;

/// Attribute carrying the worker's phone / contact identifier
pub const CONTACT_ATTRIBUTE: &str = "contact_uri";

/// Snapshot of the workspace's workers keyed by contact identifier
///
/// Built once from a full worker listing; it is never refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneIndex {
    workers: HashMap<String, WorkerRecord>,
}

impl PhoneIndex {
    /// Build the index from a worker listing
    ///
    /// A later worker with the same contact replaces an earlier one. Any
    /// worker with unusable attributes fails the whole build.
    pub fn build(
        workers: impl IntoIterator<Item = std::result::Result<WorkerRecord, ClientError>>,
    ) -> Result<Self> {
        let mut index = HashMap::new();
        for worker in workers {
            let worker = worker?;
            let contact = contact_uri(&worker)?;
            index.insert(contact, worker);
        }
        Ok(Self { workers: index })
    }

    /// Exact-match lookup
    pub fn get(&self, contact: &str) -> Option<&WorkerRecord> {
        self.workers.get(contact)
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Entries in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WorkerRecord)> {
        self.workers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Extract the contact identifier from a worker's attributes document
///
/// String values are used verbatim; other scalars by their JSON text.
pub fn contact_uri(worker: &WorkerRecord) -> Result<String> {
    let attributes: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&worker.attributes).map_err(|e| TaskRouterError::DataIntegrity {
            worker: worker.friendly_name.clone(),
            reason: e.to_string(),
        })?;

    match attributes.get(CONTACT_ATTRIBUTE) {
        Some(serde_json::Value::String(contact)) => Ok(contact.clone()),
        Some(serde_json::Value::Null) | None => Err(TaskRouterError::DataIntegrity {
            worker: worker.friendly_name.clone(),
            reason: format!("missing '{}'", CONTACT_ATTRIBUTE),
        }),
        Some(other) => Ok(other.to_string()),
    }
}
