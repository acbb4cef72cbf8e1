//! Core data types and derivation logic.
//!
//! This module turns raw counter samples into chart-ready values:
//!
//! - [`store`]: last-known sample per monitored role ([`SampleStore`])
//! - [`rate`]: counter-to-rate derivation ([`RateCalculator`])
//! - [`window`]: fixed-width chart buffers ([`SlidingWindowSeries`])
//!
//! ## Data Flow
//!
//! ```text
//! MetricsSnapshot (raw counters)
//!        │
//!        ▼
//! RateCalculator::rate()  ◀── SampleStore (previous sample)
//!        │
//!        ▼
//! SlidingWindowSeries::push()
//! ```

pub mod rate;
pub mod store;
pub mod window;

pub use rate::RateCalculator;
pub use store::SampleStore;
pub use window::SlidingWindowSeries;

use serde::{Deserialize, Serialize};

/// One monitored database instance.
///
/// The set of roles is fixed at startup; instances are not discovered
/// dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The primary instance serving writes.
    Active,
    /// The replica ready to take over.
    Standby,
}

impl Role {
    /// Both roles, in display order.
    pub const ALL: [Role; 2] = [Role::Active, Role::Standby];

    /// Returns the lowercase name used in payloads and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Active => "active",
            Role::Standby => "standby",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current wall-clock time in unix milliseconds.
///
/// Sample timestamps are taken on the client when a snapshot is observed;
/// server clocks are never consulted.
pub fn unix_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Counter names exported by the monitored databases.
///
/// These match the Prometheus exporter names the upstream endpoints relay
/// verbatim.
pub mod counter {
    /// Cumulative CPU seconds consumed by the database process.
    pub const CPU_SECONDS_TOTAL: &str = "process_cpu_seconds_total";
    /// Cumulative bytes sent to clients.
    pub const BYTES_SENT: &str = "mysql_global_status_bytes_sent";
    /// Cumulative bytes received from clients.
    pub const BYTES_RECEIVED: &str = "mysql_global_status_bytes_received";
    /// Heap bytes currently in use (gauge).
    pub const HEAP_IN_USE: &str = "go_memstats_heap_inuse_bytes";
    /// Heap bytes obtained from the OS (gauge).
    pub const HEAP_SYS: &str = "go_memstats_heap_sys_bytes";
    /// Server uptime in seconds.
    pub const UPTIME_SECONDS: &str = "mysql_global_status_uptime";
    /// Cumulative query count.
    pub const QUERIES: &str = "mysql_global_status_queries";
    /// Currently connected threads (gauge).
    pub const THREADS_CONNECTED: &str = "mysql_global_status_threads_connected";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serde_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Active).unwrap(), "\"active\"");
        assert_eq!(serde_json::to_string(&Role::Standby).unwrap(), "\"standby\"");
        let role: Role = serde_json::from_str("\"standby\"").unwrap();
        assert_eq!(role, Role::Standby);
    }

    #[test]
    fn role_display_matches_as_str() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.as_str());
        }
    }
}
