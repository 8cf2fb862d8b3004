//! Inventory service
//!
//! Manages the stock of already-available logs between planning runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{LengthClass, Log};
use crate::infrastructure::traits::InventoryStore;

/// Canned starter inventories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 3 logs
    Small,
    /// 8 logs, balanced
    Medium,
    /// 9 logs, nearly all long
    ManyLong,
}

impl Preset {
    pub const NAMES: [&'static str; 3] = ["small", "medium", "many-long"];

    pub fn logs(&self) -> Vec<Log> {
        match self {
            Preset::Small => vec![Log::long(270), Log::short(280), Log::long(240)],
            Preset::Medium => vec![
                Log::long(280),
                Log::long(280),
                Log::long(270),
                Log::long(270),
                Log::short(280),
                Log::short(270),
                Log::short(260),
                Log::short(250),
            ],
            Preset::ManyLong => {
                let mut logs = vec![Log::long(280); 7];
                logs.push(Log::long(270));
                logs.push(Log::short(280));
                logs
            }
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Preset::Small),
            "medium" => Ok(Preset::Medium),
            "many-long" => Ok(Preset::ManyLong),
            other => Err(ApplicationError::Config {
                message: format!(
                    "unknown preset '{}' (expected one of: {})",
                    other,
                    Preset::NAMES.join(", ")
                ),
            }),
        }
    }
}

/// Counts and a thinnest-first listing of the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySummary {
    pub total: usize,
    pub long: usize,
    pub short: usize,
    pub sorted: Vec<Log>,
}

impl InventorySummary {
    pub fn from_logs(logs: &[Log]) -> Self {
        let long = logs.iter().filter(|l| l.is_long()).count();
        let mut sorted = logs.to_vec();
        sorted.sort_by_key(|l| l.diameter);
        Self {
            total: logs.len(),
            long,
            short: logs.len() - long,
            sorted,
        }
    }
}

/// A record in either the tagged or the legacy single-key form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LogRecord {
    Tagged(Log),
    Legacy(BTreeMap<String, u32>),
}

impl LogRecord {
    fn into_log(self, index: usize) -> ApplicationResult<Log> {
        match self {
            LogRecord::Tagged(log) => Ok(log),
            LogRecord::Legacy(map) => {
                let mut entries = map.into_iter();
                let (key, diameter) = match (entries.next(), entries.next()) {
                    (Some(entry), None) => entry,
                    _ => {
                        return Err(ApplicationError::InvalidRecord {
                            message: format!("record {index}: expected exactly one length key"),
                        })
                    }
                };
                let length = match key.as_str() {
                    "long" => LengthClass::Long,
                    "short" => LengthClass::Short,
                    other => {
                        return Err(ApplicationError::InvalidRecord {
                            message: format!("record {index}: unknown length '{other}'"),
                        })
                    }
                };
                Ok(Log::new(length, diameter))
            }
        }
    }
}

/// Parse a JSON array of log records (tagged or legacy form).
pub fn parse_records(json: &str) -> ApplicationResult<Vec<Log>> {
    let records: Vec<LogRecord> =
        serde_json::from_str(json).map_err(|e| ApplicationError::InvalidRecord {
            message: e.to_string(),
        })?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_log(i))
        .collect()
}

/// Parse stored records, skipping (and reporting) any that are malformed.
///
/// Only a document that is not a JSON array is an error.
pub fn parse_records_lenient(json: &str) -> ApplicationResult<Vec<Log>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| ApplicationError::InvalidRecord {
            message: e.to_string(),
        })?;
    let logs = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| {
            match serde_json::from_value::<LogRecord>(value)
                .map_err(|e| ApplicationError::InvalidRecord {
                    message: format!("record {i}: {e}"),
                })
                .and_then(|r| r.into_log(i))
            {
                Ok(log) => Some(log),
                Err(e) => {
                    warn!("skipping inventory record: {}", e);
                    None
                }
            }
        })
        .collect();
    Ok(logs)
}

/// Service for editing the stored log inventory.
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
}

impl InventoryService {
    /// Create a new inventory service.
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> ApplicationResult<Vec<Log>> {
        self.store.load()
    }

    pub fn summary(&self) -> ApplicationResult<InventorySummary> {
        Ok(InventorySummary::from_logs(&self.store.load()?))
    }

    pub fn add(&self, log: Log) -> ApplicationResult<()> {
        if log.diameter == 0 {
            return Err(ApplicationError::InvalidRecord {
                message: "diameter must be positive".into(),
            });
        }
        debug!(%log, "add log");
        self.store.append(log)
    }

    /// Remove the log at `index`; returns it, or None if out of range.
    pub fn remove(&self, index: usize) -> ApplicationResult<Option<Log>> {
        let logs = self.store.load()?;
        let Some(&removed) = logs.get(index) else {
            debug!(index, len = logs.len(), "remove: index out of range");
            return Ok(None);
        };
        self.store.remove_at(index)?;
        Ok(Some(removed))
    }

    pub fn clear(&self) -> ApplicationResult<()> {
        debug!("clear inventory");
        self.store.clear()
    }

    /// Replace the inventory with the records in `json`.
    pub fn import(&self, json: &str) -> ApplicationResult<usize> {
        let logs = parse_records(json)?;
        if logs.iter().any(|l| l.diameter == 0) {
            return Err(ApplicationError::InvalidRecord {
                message: "diameter must be positive".into(),
            });
        }
        self.store.replace(&logs)?;
        Ok(logs.len())
    }

    pub fn apply_preset(&self, preset: Preset) -> ApplicationResult<usize> {
        let logs = preset.logs();
        self.store.replace(&logs)?;
        Ok(logs.len())
    }
}
