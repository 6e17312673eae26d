use finance_tracker::{
    api::{start_server, ApiState},
    assistant::AssistantResponder,
    classifier::IntentClassifier,
    config::TrackerConfig,
    market::{CoinGeckoSource, MarketTicker},
    tracker::Tracker,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = TrackerConfig::from_env()?;

    info!("Finance Tracker - API Server");
    info!("Port: {}", config.port);

    // Create components
    let classifier = Arc::new(IntentClassifier::train());
    let tracker = Tracker::new(classifier, AssistantResponder::with_delay(config.assistant_delay));

    let source = CoinGeckoSource::new(&config.market_api_base_url, config.market_timeout)?;
    let market = Arc::new(MarketTicker::new(Arc::new(source)));
    market.clone().spawn_polling(config.market_poll_interval);

    info!("Tracker initialized");
    info!("Starting API server...");

    start_server(ApiState::new(tracker, market), config.port).await?;

    Ok(())
}
