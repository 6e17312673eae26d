//! Market ticker
//!
//! Polls a public price feed for four fixed assets and keeps the latest
//! result for display. Any failure only flips the feed to `Unavailable`;
//! it never reaches the ledger or parser.

use crate::error::TrackerError;
use crate::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// (feed id, display symbol), in ticker order
pub const TRACKED_ASSETS: &[(&str, &str)] = &[
    ("bitcoin", "BTC"),
    ("ethereum", "ETH"),
    ("solana", "SOL"),
    ("tether", "USDT"),
];

pub const UNAVAILABLE_TEXT: &str = "Market data unavailable (API limited)";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketQuote {
    pub symbol: String,
    pub price_usd: f64,
    pub change_24h_pct: f64,
}

impl MarketQuote {
    /// e.g. `BTC: $64000 (▲ 1.25%)`
    pub fn ticker_line(&self) -> String {
        let icon = if self.change_24h_pct >= 0.0 { '▲' } else { '▼' };
        format!(
            "{}: ${} ({} {:.2}%)",
            self.symbol, self.price_usd, icon, self.change_24h_pct
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MarketFeed {
    Live {
        quotes: Vec<MarketQuote>,
        fetched_at: DateTime<Utc>,
    },
    Unavailable,
}

impl MarketFeed {
    pub fn is_live(&self) -> bool {
        matches!(self, MarketFeed::Live { .. })
    }

    pub fn ticker_lines(&self) -> Vec<String> {
        match self {
            MarketFeed::Live { quotes, .. } => quotes.iter().map(MarketQuote::ticker_line).collect(),
            MarketFeed::Unavailable => vec![UNAVAILABLE_TEXT.to_string()],
        }
    }
}

//
// ================= Sources =================
//

/// Where quotes come from
#[async_trait::async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<MarketQuote>>;
}

#[derive(Debug, Deserialize)]
struct CoinPrice {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
}

/// CoinGecko `simple/price` endpoint
pub struct CoinGeckoSource {
    client: Client,
    base_url: String,
}

impl CoinGeckoSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(2)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn price_url(&self) -> String {
        let ids: Vec<&str> = TRACKED_ASSETS.iter().map(|(id, _)| *id).collect();
        format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.base_url,
            ids.join(",")
        )
    }
}

#[async_trait::async_trait]
impl QuoteSource for CoinGeckoSource {
    async fn fetch(&self) -> Result<Vec<MarketQuote>> {
        let response = self.client.get(self.price_url()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::MarketData(format!(
                "Price feed returned {}",
                status
            )));
        }

        let body: HashMap<String, CoinPrice> = response.json().await?;
        quotes_from_prices(&body)
    }
}

/// Map a `simple/price` body to quotes; every tracked asset must be present
fn quotes_from_prices(body: &HashMap<String, CoinPrice>) -> Result<Vec<MarketQuote>> {
    TRACKED_ASSETS
        .iter()
        .map(|(id, symbol)| {
            let price = body
                .get(*id)
                .ok_or_else(|| TrackerError::MarketData(format!("Missing asset '{}'", id)))?;

            match (price.usd, price.usd_24h_change) {
                (Some(price_usd), Some(change_24h_pct)) => Ok(MarketQuote {
                    symbol: symbol.to_string(),
                    price_usd,
                    change_24h_pct,
                }),
                _ => Err(TrackerError::MarketData(format!(
                    "Incomplete price data for '{}'",
                    id
                ))),
            }
        })
        .collect()
}

//
// ================= Ticker =================
//

pub struct MarketTicker {
    source: Arc<dyn QuoteSource>,
    feed: RwLock<MarketFeed>,
}

impl MarketTicker {
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self {
            source,
            feed: RwLock::new(MarketFeed::Unavailable),
        }
    }

    pub async fn current(&self) -> MarketFeed {
        self.feed.read().await.clone()
    }

    /// Fetch once and swap in the result. Failures degrade to `Unavailable`.
    pub async fn refresh(&self) -> MarketFeed {
        let feed = match self.source.fetch().await {
            Ok(quotes) => {
                debug!(quotes = quotes.len(), "Market quotes refreshed");
                MarketFeed::Live {
                    quotes,
                    fetched_at: Utc::now(),
                }
            }
            Err(e) => {
                warn!("Market data fetch failed: {}", e);
                MarketFeed::Unavailable
            }
        };

        *self.feed.write().await = feed.clone();
        feed
    }

    /// Refresh now and then every `every`, in a background task
    pub fn spawn_polling(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        info!(interval_secs = every.as_secs(), "Starting market polling");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                self.refresh().await;
            }
        })
    }
}
