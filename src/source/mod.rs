//! Snapshot fetching abstraction.
//!
//! The engine consumes two payload shapes over an abstract fetch
//! collaborator; the transport behind it is interchangeable. [`HttpApi`]
//! polls the manager's REST endpoints, [`FileApi`] reads the same payloads
//! from local JSON files (handy for demos and tests).

mod error;
mod file;
mod http;
mod snapshot;

pub use error::FetchError;
pub use file::FileApi;
pub use http::HttpApi;
pub use snapshot::{
    ActivityPoint, DashboardSnapshot, DbStatus, MetricsSnapshot, ReadActivity, RoleMetrics,
    SelectorStatus, SyncMetrics, SystemEvent, WriteActivity,
};

use async_trait::async_trait;

/// A transport-agnostic provider of the two dashboard payloads.
///
/// Implementations must not retry internally; the poller treats any error as
/// a failed cycle and tries again on the next tick.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetch the full dashboard snapshot (status cards, sync metrics,
    /// pre-aggregated activity windows, system events).
    async fn fetch_dashboard(&self) -> Result<DashboardSnapshot, FetchError>;

    /// Fetch the raw metrics snapshot (cumulative counters and gauges per
    /// role).
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, FetchError>;

    /// Human-readable description of where snapshots come from.
    fn description(&self) -> &str;
}
