//! FILENAME: core/engine/src/config.rs
//! PURPOSE: Tunables for a sheet and its undo history.
//! CONTEXT: Hosts usually embed these in their own settings file, so every
//! field has a default and a partial JSON object is accepted.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

/// Maximum number of undo operations to keep in history.
pub const MAX_HISTORY_SIZE: usize = 100;

pub const DEFAULT_ROWS: u32 = 1000;
pub const DEFAULT_COLUMNS: u32 = 26;

/// Sheet events held before the oldest is dropped.
pub const DEFAULT_MAX_EVENTS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Row count of a freshly created sheet.
    pub initial_rows: u32,
    /// Column count of a freshly created sheet.
    pub initial_columns: u32,
    /// Undo entries kept before the oldest is evicted.
    pub max_history: usize,
    /// Queued sheet events kept for the host; 0 disables recording.
    pub max_events: usize,
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SheetError::Config(e.to_string()))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            initial_rows: DEFAULT_ROWS,
            initial_columns: DEFAULT_COLUMNS,
            max_history: MAX_HISTORY_SIZE,
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}
