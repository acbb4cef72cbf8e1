//! # replwatch
//!
//! Metrics ingestion and derivation engine for a live primary/standby
//! database dashboard.
//!
//! The crate polls two REST endpoints on fixed intervals, converts
//! cumulative counters (CPU seconds, bytes sent/received, query counts)
//! into point-in-time rates, and maintains fixed-width sliding windows of
//! derived values that feed time-series charts. Rendering is out of scope:
//! the engine publishes a consolidated, read-only view model to a pluggable
//! [`ViewSink`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ┌────────┐   ┌─────────────────┐   ┌────────────┐           │
//! │  │ poller │──▶│ DashboardEngine │──▶│  ViewSink  │           │
//! │  │ (tick) │   │    (reduce)     │   │ (publish)  │           │
//! │  └───┬────┘   └───────┬─────────┘   └────────────┘           │
//! │      │                │                                      │
//! │      ▼                ▼                                      │
//! │  ┌────────┐   ┌──────────────────────────────┐               │
//! │  │ source │   │ SampleStore · RateCalculator │               │
//! │  │ (fetch)│   │     SlidingWindowSeries      │               │
//! │  └────────┘   └──────────────────────────────┘               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: the abstract fetch collaborator ([`DashboardApi`]) with
//!   HTTP and file-backed implementations, plus the wire types of the two
//!   endpoint payloads
//! - **[`data`]**: sample bookkeeping and derivation — last-known samples,
//!   counter-to-rate conversion, fixed-width chart windows
//! - **[`engine`]**: the reducer that applies snapshots to owned state and
//!   projects the [`DashboardViewModel`]
//! - **[`poller`]**: periodic scheduling with per-cycle error containment
//! - **[`view`]**: sinks consuming published view models
//!
//! ## Derivation policy
//!
//! A rate that would be undefined or negative (first observation, duplicate
//! timestamp, counter reset) resolves to `0.0` for that cycle. One sample is
//! dropped after any glitch; a NaN or -Infinity is never plotted.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use replwatch::{data::unix_millis, DashboardEngine, HttpApi};
//! use replwatch::source::DashboardApi;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let api = HttpApi::builder().endpoint("http://localhost:8080").build();
//! let mut engine = DashboardEngine::default();
//!
//! let snapshot = api.fetch_metrics().await?;
//! engine.apply_metrics_snapshot(&snapshot, unix_millis());
//! let view = engine.view_model();
//! println!("{} events", view.system_events.len());
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod engine;
pub mod poller;
pub mod source;
pub mod view;

// Re-export main types for convenience
pub use data::{Role, SampleStore, SlidingWindowSeries};
pub use engine::{DashboardEngine, DashboardViewModel, DEFAULT_WINDOW_POINTS};
pub use poller::{Poller, PollerHandle};
pub use source::{DashboardApi, DashboardSnapshot, FetchError, FileApi, HttpApi, MetricsSnapshot};
pub use view::{JsonLinesSink, TracingSink, ViewSink};
