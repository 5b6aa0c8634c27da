mod shell;

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use signal_dashboard::config::Config;
use signal_dashboard::controller::DashboardController;
use signal_dashboard::export::Exporter;
use signal_dashboard::store::HttpSignalStore;

use crate::shell::Shell;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let store = Box::new(HttpSignalStore::new(&cfg)?);
    let exporter = Exporter::new(&cfg.export_dir);
    let controller = DashboardController::new(store, exporter);

    let mut shell = Shell::new(controller, &cfg);
    shell.run().await?;

    Ok(())
}
