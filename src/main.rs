use dustwatch::api::{AirKoreaClient, GeocodingClient};
use dustwatch::config::Config;
use dustwatch::console::App;
use dustwatch::db::{seed, Store};
use dustwatch::service::{AlertJob, RefreshJob};
use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// Single-threaded by construction: scheduler checks and menu screens share
// one task, so refresh and alert can never run concurrently.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        radius_km = cfg.nearby_radius_km,
        refresh_interval_secs = cfg.refresh_interval_secs,
        loglevel = %cfg.loglevel,
    );

    let store = Store::connect(&cfg.database_url).await?;
    if let Some(stations_file) = cfg.stations_file.as_ref() {
        seed::seed_if_empty(&store, stations_file).await?;
    }

    let http = reqwest::Client::new();
    let air_korea = AirKoreaClient::new(http.clone(), &cfg)?;
    let geocoder = GeocodingClient::new(http, &cfg)?;

    let refresh = RefreshJob::new(store.clone(), air_korea);
    let alert = AlertJob::new(store.clone(), cfg.nearby_radius_km);

    let app = App::new(store, geocoder, refresh, alert, &cfg);
    app.run().await?;
    Ok(())
}
