//! Wire types for the two polled endpoints.
//!
//! These match the JSON shapes produced by the manager service: a dashboard
//! snapshot (pre-formatted status fields plus pre-aggregated activity
//! windows) and a metrics snapshot (raw counter values per role). Field
//! names on the wire are camelCase.
//!
//! Every block is optional: the engine treats an absent block as "nothing to
//! update this cycle" rather than an error, so one missing field never
//! prevents unrelated fields from updating.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The full dashboard payload from `/api/dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Whether the manager currently has a live connection to the pair.
    #[serde(default)]
    pub is_connected: bool,

    /// Status block for the active (primary) database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_db: Option<DbStatus>,

    /// Status block for the standby database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standby_db: Option<DbStatus>,

    /// Which instance the traffic selector currently targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector_status: Option<SelectorStatus>,

    /// Replication synchronization metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_metrics: Option<SyncMetrics>,

    /// Pre-aggregated write counts per bucket, full window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_activity: Option<WriteActivity>,

    /// Pre-aggregated read counts per bucket, full window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_activity: Option<ReadActivity>,

    /// Recent notable events (failovers, lag warnings, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_events: Option<Vec<SystemEvent>>,
}

/// Per-role status card fields, pre-formatted upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbStatus {
    /// Display status: "Active", "Standby" or "Down".
    #[serde(default)]
    pub status: String,

    /// Pre-formatted uptime string (e.g. "3d 4h 12m 9s").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qps: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_heartbeat: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_healthy: Option<bool>,
}

/// Traffic selector state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_switched_formatted: Option<String>,
}

/// Replication synchronization metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetrics {
    /// Synchronization rate in percent, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_data_transferred: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standby_data_transferred: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_gtid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standby_gtid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_time: Option<String>,
}

/// Write activity: one full pre-aggregated window per instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteActivity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_db_writes: Option<Vec<ActivityPoint>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standby_db_writes: Option<Vec<ActivityPoint>>,
}

/// Read activity: one full pre-aggregated window per instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadActivity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_db_reads: Option<Vec<ActivityPoint>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standby_db_reads: Option<Vec<ActivityPoint>>,
}

/// One bucket of pre-aggregated activity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActivityPoint {
    #[serde(default)]
    pub count: u64,
}

/// One entry from the system event log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemEvent {
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub severity: String,

    #[serde(default)]
    pub event_type: String,

    #[serde(default)]
    pub timestamp: String,
}

/// The metrics payload from `/api/metrics`: raw counters per role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<RoleMetrics>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standby: Option<RoleMetrics>,
}

impl MetricsSnapshot {
    /// Borrow the block for `role`, if the payload carried one.
    pub fn role(&self, role: crate::data::Role) -> Option<&RoleMetrics> {
        match role {
            crate::data::Role::Active => self.active.as_ref(),
            crate::data::Role::Standby => self.standby.as_ref(),
        }
    }
}

/// Raw metrics for one role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleMetrics {
    /// Static instance info (version, host). Not used for derivation.
    #[serde(default)]
    pub info: BTreeMap<String, String>,

    /// Counter name to raw numeric value. Cumulative counters and gauges
    /// share this map; which is which is per-counter policy in the engine.
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}
