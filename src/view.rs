//! View sinks: consumers of the published view model.
//!
//! The engine republishes a full [`DashboardViewModel`] after every poll
//! cycle; a sink decides what to do with it. Rendering proper (DOM, charts,
//! terminals) lives outside this crate — these sinks cover headless use:
//! JSON lines for piping into other tools, and a log summary for operating
//! the poller itself.

use std::io::Write;

use tracing::{info, warn};

use crate::engine::DashboardViewModel;

/// Consumes the view model published after each poll cycle.
///
/// The view model is a read-only projection; sinks must not feed state back
/// into the engine.
pub trait ViewSink: Send {
    fn publish(&mut self, view: &DashboardViewModel);
}

/// Writes one JSON object per published view model.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ViewSink for JsonLinesSink<W> {
    fn publish(&mut self, view: &DashboardViewModel) {
        match serde_json::to_string(view) {
            Ok(json) => {
                if let Err(err) = writeln!(self.writer, "{}", json) {
                    warn!(error = %err, "failed to write view model");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize view model"),
        }
    }
}

/// Logs a one-line summary of each published view model.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ViewSink for TracingSink {
    fn publish(&mut self, view: &DashboardViewModel) {
        let qps = |card: &Option<crate::engine::RoleCard>| {
            card.as_ref().map(|c| c.qps).unwrap_or(0.0)
        };
        info!(
            connected = view.connected,
            active_qps = qps(&view.active.card),
            standby_qps = qps(&view.standby.card),
            events = view.system_events.len(),
            "dashboard updated"
        );
    }
}
