use airq_dashboard::{DashboardConfig, DashboardError, DashboardServer};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), DashboardError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::from_env();
    DashboardServer::new().serve_http(&config.http_addr)
}
