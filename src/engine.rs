//! Dashboard state reduction.
//!
//! [`DashboardEngine`] is the orchestration layer between the pollers and
//! the view sink. It owns the only shared mutable state (the sample store
//! and the chart windows), applies incoming snapshots to it, and projects a
//! consolidated [`DashboardViewModel`] after each cycle.
//!
//! The two entry points mirror the two independently polled endpoints:
//!
//! - [`apply_dashboard_snapshot`](DashboardEngine::apply_dashboard_snapshot)
//!   projects pre-formatted status fields directly and replaces the activity
//!   windows wholesale (the server supplies full windows, not deltas).
//! - [`apply_metrics_snapshot`](DashboardEngine::apply_metrics_snapshot)
//!   derives per-second rates from raw counters and pushes one new point per
//!   chart. Rates are always computed before the store is overwritten with
//!   the new sample; the next cycle derives against this one.

use serde::Serialize;
use tracing::debug;

use crate::data::counter;
use crate::data::{RateCalculator, Role, SampleStore, SlidingWindowSeries};
use crate::source::{
    ActivityPoint, DashboardSnapshot, DbStatus, MetricsSnapshot, SelectorStatus, SyncMetrics,
    SystemEvent,
};

/// Points per chart window; matches the upstream pre-aggregated window size.
pub const DEFAULT_WINDOW_POINTS: usize = 30;

/// Status card for one database instance.
#[derive(Debug, Clone, Serialize)]
pub struct RoleCard {
    /// Display status: "Active", "Standby" or "Down".
    pub status: String,
    pub healthy: bool,
    pub uptime: String,
    pub connections: u64,
    /// Queries per second, either reported upstream or derived as
    /// total queries over uptime.
    pub qps: f64,
    pub last_heartbeat: String,
}

impl Default for RoleCard {
    fn default() -> Self {
        Self {
            status: String::new(),
            // Unknown is treated as healthy until the upstream says otherwise
            healthy: true,
            uptime: String::new(),
            connections: 0,
            qps: 0.0,
            last_heartbeat: String::new(),
        }
    }
}

/// Heap usage gauge for one instance.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MemoryGauge {
    pub heap_in_use: f64,
    pub heap_free: f64,
}

/// Chart windows derived for one role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleCharts {
    /// CPU cores consumed per second.
    pub cpu: Vec<f64>,
    /// Bytes sent per second.
    pub network_sent: Vec<f64>,
    /// Bytes received per second.
    pub network_received: Vec<f64>,
    pub memory: MemoryGauge,
}

/// Everything one role contributes to the view.
#[derive(Debug, Clone, Serialize)]
pub struct RoleView {
    /// `None` until the role has been observed at least once.
    pub card: Option<RoleCard>,
    pub charts: RoleCharts,
}

/// The consolidated, read-only projection handed to the view sink.
///
/// Recomputed from current engine state after every cycle; the sink must not
/// mutate it back.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardViewModel {
    pub connected: bool,
    pub active: RoleView,
    pub standby: RoleView,
    pub selector: Option<SelectorStatus>,
    pub sync: Option<SyncMetrics>,
    pub system_events: Vec<SystemEvent>,
    /// Write counts per bucket: series 0 is the active instance, series 1
    /// the standby.
    pub write_activity: Vec<Vec<f64>>,
    /// Read counts per bucket, same series layout as `write_activity`.
    pub read_activity: Vec<Vec<f64>>,
}

/// Per-role engine state.
#[derive(Debug, Clone)]
struct RoleState {
    card: Option<RoleCard>,
    cpu: SlidingWindowSeries,
    network: SlidingWindowSeries,
    memory: MemoryGauge,
}

impl RoleState {
    fn new(window_points: usize) -> Self {
        Self {
            card: None,
            cpu: SlidingWindowSeries::new(1, window_points, 0.0),
            network: SlidingWindowSeries::new(2, window_points, 0.0),
            memory: MemoryGauge::default(),
        }
    }

    fn view(&self) -> RoleView {
        let cpu = self.cpu.snapshot().remove(0);
        let mut network = self.network.snapshot();
        let network_received = network.remove(1);
        let network_sent = network.remove(0);
        RoleView {
            card: self.card.clone(),
            charts: RoleCharts {
                cpu,
                network_sent,
                network_received,
                memory: self.memory,
            },
        }
    }
}

/// Owns all dashboard state and applies incoming snapshots to it.
#[derive(Debug, Clone)]
pub struct DashboardEngine {
    store: SampleStore,
    active: RoleState,
    standby: RoleState,
    connected: bool,
    selector: Option<SelectorStatus>,
    sync: Option<SyncMetrics>,
    events: Vec<SystemEvent>,
    write_activity: SlidingWindowSeries,
    read_activity: SlidingWindowSeries,
}

impl Default for DashboardEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_POINTS)
    }
}

impl DashboardEngine {
    /// Create an engine with `window_points` points per chart window.
    /// A zero value is clamped to one point.
    pub fn new(window_points: usize) -> Self {
        let window_points = window_points.max(1);
        Self {
            store: SampleStore::new(),
            active: RoleState::new(window_points),
            standby: RoleState::new(window_points),
            connected: false,
            selector: None,
            sync: None,
            events: Vec::new(),
            write_activity: SlidingWindowSeries::new(2, window_points, 0.0),
            read_activity: SlidingWindowSeries::new(2, window_points, 0.0),
        }
    }

    /// Apply a full dashboard snapshot.
    ///
    /// Each block updates independently; an absent block leaves the
    /// corresponding state untouched. A role missing from the payload keeps
    /// its last-known card rather than getting a zeroed one.
    pub fn apply_dashboard_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.connected = snapshot.is_connected;

        if let Some(status) = snapshot.active_db {
            self.apply_db_status(Role::Active, status);
        }
        if let Some(status) = snapshot.standby_db {
            self.apply_db_status(Role::Standby, status);
        }

        if let Some(selector) = snapshot.selector_status {
            self.selector = Some(selector);
        }
        if let Some(sync) = snapshot.sync_metrics {
            self.sync = Some(sync);
        }

        // Activity windows are replaced wholesale; both series of a chart
        // must be present and non-empty, otherwise the chart keeps its
        // previous contents.
        if let Some(activity) = snapshot.write_activity {
            Self::replace_activity(
                &mut self.write_activity,
                activity.active_db_writes.as_deref(),
                activity.standby_db_writes.as_deref(),
            );
        }
        if let Some(activity) = snapshot.read_activity {
            Self::replace_activity(
                &mut self.read_activity,
                activity.active_db_reads.as_deref(),
                activity.standby_db_reads.as_deref(),
            );
        }

        if let Some(events) = snapshot.system_events {
            self.events = events;
        }

        debug!(connected = self.connected, "applied dashboard snapshot");
    }

    fn role_state_mut(&mut self, role: Role) -> &mut RoleState {
        match role {
            Role::Active => &mut self.active,
            Role::Standby => &mut self.standby,
        }
    }

    fn apply_db_status(&mut self, role: Role, status: DbStatus) {
        let card = self.role_state_mut(role).card.get_or_insert_with(RoleCard::default);

        card.healthy = status.is_healthy.unwrap_or(true) && status.status != "Down";
        card.status = status.status;
        if let Some(uptime) = status.uptime {
            card.uptime = uptime;
        }
        if let Some(connections) = status.connections {
            card.connections = connections;
        }
        if let Some(qps) = status.qps {
            card.qps = qps;
        }
        if let Some(heartbeat) = status.last_heartbeat {
            card.last_heartbeat = heartbeat;
        }
    }

    fn replace_activity(
        window: &mut SlidingWindowSeries,
        active: Option<&[ActivityPoint]>,
        standby: Option<&[ActivityPoint]>,
    ) {
        let (Some(active), Some(standby)) = (active, standby) else {
            return;
        };
        if active.is_empty() || standby.is_empty() {
            return;
        }

        let counts = |points: &[ActivityPoint]| -> Vec<f64> {
            points.iter().map(|p| p.count as f64).collect()
        };
        window.replace(0, &counts(active));
        window.replace(1, &counts(standby));
    }

    /// Apply a raw metrics snapshot observed at `now_ms` (unix milliseconds).
    ///
    /// For each role present in the payload: derive the CPU and network
    /// rates against the previous sample, push them onto the charts, project
    /// the heap gauge and detail fields, and only then record the new raw
    /// sample so the next cycle derives against it.
    pub fn apply_metrics_snapshot(&mut self, snapshot: &MetricsSnapshot, now_ms: u64) {
        for role in Role::ALL {
            let Some(block) = snapshot.role(role) else {
                continue;
            };
            let metrics = &block.metrics;
            let value = |name: &str| metrics.get(name).copied().unwrap_or(0.0);

            // Rates must be derived before the store sees the new sample.
            let (cpu, sent, received) = {
                let calc = RateCalculator::new(&self.store);
                (
                    calc.rate(role, counter::CPU_SECONDS_TOTAL, value(counter::CPU_SECONDS_TOTAL), now_ms),
                    calc.rate(role, counter::BYTES_SENT, value(counter::BYTES_SENT), now_ms),
                    calc.rate(role, counter::BYTES_RECEIVED, value(counter::BYTES_RECEIVED), now_ms),
                )
            };

            let state = self.role_state_mut(role);
            state.cpu.push(&[cpu]);
            state.network.push(&[sent, received]);

            let heap_in_use = value(counter::HEAP_IN_USE);
            let heap_sys = value(counter::HEAP_SYS);
            state.memory = MemoryGauge {
                heap_in_use,
                heap_free: (heap_sys - heap_in_use).max(0.0),
            };

            // Detail fields: QPS over the whole uptime, connection count
            // from the thread gauge. A zero/missing uptime falls back to 1
            // so the division stays defined.
            let uptime = value(counter::UPTIME_SECONDS);
            let uptime = if uptime > 0.0 { uptime } else { 1.0 };
            let card = state.card.get_or_insert_with(RoleCard::default);
            card.qps = value(counter::QUERIES) / uptime;
            card.connections = value(counter::THREADS_CONNECTED).round() as u64;

            self.store.record(role, metrics.clone(), now_ms);
            debug!(role = %role, now_ms, "applied metrics snapshot");
        }
    }

    /// Project the current state into a fresh view model.
    pub fn view_model(&self) -> DashboardViewModel {
        DashboardViewModel {
            connected: self.connected,
            active: self.active.view(),
            standby: self.standby.view(),
            selector: self.selector.clone(),
            sync: self.sync.clone(),
            system_events: self.events.clone(),
            write_activity: self.write_activity.snapshot(),
            read_activity: self.read_activity.snapshot(),
        }
    }
}
