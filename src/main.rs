//! hospitalinfo - A read-only HTTP router over static blood donation datasets.
//!
//! # API Endpoints
//!
//! - `GET /` - HTML description of the API
//! - `GET /bloodbank[/{id}]` - Blood banks, filterable by `name`, `loc`, `add`
//! - `GET /donor[/{id}]` - Available donors, filterable by `id`, `location`, `bloodgroup`
//! - `GET /camps[/{id}]` - Donation camps, filterable by `location`
//! - `GET /events[/{id}]` - Events, filterable by `location`

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hospitalinfo::api::{AppState, app};
use hospitalinfo::config::Config;
use hospitalinfo::source::DatasetClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("hospitalinfo=info".parse()?))
        .init();

    let config = Config::from_env();

    info!(
        port = config.port,
        data_url = %config.data_url,
        donor_availability = ?config.donor_availability,
        "Starting hospitalinfo server"
    );

    let state = AppState {
        client: DatasetClient::with_base_url(&config.data_url),
        donor_availability: config.donor_availability,
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "hospitalinfo is listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
