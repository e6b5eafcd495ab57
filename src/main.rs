//! cardiodash: Cardiovascular statistics dashboard
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiodash::tui::App;
use cardiodash::DashboardConfig;

fn main() -> Result<()> {
    let config = DashboardConfig::from_env()?;

    // Initialize logging.
    //
    // Writing logs to the terminal would corrupt the TUI (alternate screen), so
    // an interactive session logs to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = std::path::Path::new(&config.log_file)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            // Best-effort: a missing directory surfaces as the open error below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Failed to open log file {}", config.log_file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!(start_route = %config.start_route, "Starting cardiodash...");

    // Run the TUI application
    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("cardiodash shutdown complete.");
    Ok(())
}
