use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use replwatch::data::unix_millis;
use replwatch::source::DashboardApi;
use replwatch::{
    DashboardEngine, FileApi, HttpApi, JsonLinesSink, Poller, TracingSink, ViewSink,
};

#[derive(Parser, Debug)]
#[command(name = "replwatch")]
#[command(about = "Poll a primary/standby database dashboard and derive live metrics")]
struct Args {
    /// Base URL of the manager service
    #[arg(short, long, default_value = "http://localhost:8080",
          conflicts_with_all = ["dashboard_file", "metrics_file"])]
    endpoint: String,

    /// Read the dashboard payload from a JSON file instead of HTTP
    #[arg(long, requires = "metrics_file")]
    dashboard_file: Option<PathBuf>,

    /// Read the metrics payload from a JSON file instead of HTTP
    #[arg(long, requires = "dashboard_file")]
    metrics_file: Option<PathBuf>,

    /// Dashboard poll interval in seconds
    #[arg(long, default_value = "3")]
    dashboard_interval: u64,

    /// Metrics poll interval in seconds
    #[arg(long, default_value = "3")]
    metrics_interval: u64,

    /// Points per chart window
    #[arg(short, long, default_value = "30")]
    window: usize,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Emit full view models as JSON lines on stdout instead of log summaries
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let api: Arc<dyn DashboardApi> = match (&args.dashboard_file, &args.metrics_file) {
        (Some(dashboard), Some(metrics)) => Arc::new(FileApi::new(dashboard, metrics)),
        _ => Arc::new(
            HttpApi::builder()
                .endpoint(&args.endpoint)
                .timeout(Duration::from_secs(args.timeout))
                .build(),
        ),
    };

    let sink: Arc<Mutex<dyn ViewSink>> = if args.json {
        Arc::new(Mutex::new(JsonLinesSink::new(std::io::stdout())))
    } else {
        Arc::new(Mutex::new(TracingSink))
    };

    let engine = Arc::new(Mutex::new(DashboardEngine::new(args.window)));
    info!(source = api.description(), window = args.window, "starting pollers");

    let dashboard_poller = {
        let api = api.clone();
        let engine = engine.clone();
        let sink = sink.clone();
        Poller::spawn(
            "dashboard",
            Duration::from_secs(args.dashboard_interval),
            move || {
                let api = api.clone();
                let engine = engine.clone();
                let sink = sink.clone();
                async move {
                    let snapshot = api.fetch_dashboard().await?;
                    let view = {
                        let mut engine = engine.lock().unwrap();
                        engine.apply_dashboard_snapshot(snapshot);
                        engine.view_model()
                    };
                    sink.lock().unwrap().publish(&view);
                    Ok(())
                }
            },
        )
    };

    let metrics_poller = {
        let api = api.clone();
        let engine = engine.clone();
        let sink = sink.clone();
        Poller::spawn(
            "metrics",
            Duration::from_secs(args.metrics_interval),
            move || {
                let api = api.clone();
                let engine = engine.clone();
                let sink = sink.clone();
                async move {
                    let snapshot = api.fetch_metrics().await?;
                    // Derive and store under one lock acquisition; the fetch
                    // above is the only suspension point in the cycle.
                    let view = {
                        let mut engine = engine.lock().unwrap();
                        engine.apply_metrics_snapshot(&snapshot, unix_millis());
                        engine.view_model()
                    };
                    sink.lock().unwrap().publish(&view);
                    Ok(())
                }
            },
        )
    };

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    dashboard_poller.stop();
    metrics_poller.stop();

    Ok(())
}
