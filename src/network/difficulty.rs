// src/network/difficulty.rs
//! Network difficulty fetcher
//!
//! Fetches a plain-text float from the difficulty endpoint and keeps it in a
//! global single-slot cache. Failures never escape: the last known value (or
//! `None`) is returned instead.

use crate::cache::TimedCache;
use crate::network::http::HttpSource;
use crate::utils::error::DashboardError;
use crate::utils::numeric::parse_leading_f64;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Default public difficulty endpoint
pub const DEFAULT_DIFFICULTY_URL: &str = "https://blockchain.info/q/getdifficulty?cors=true";

/// Cached client for the network difficulty endpoint
pub struct DifficultyFetcher {
    source: Arc<dyn HttpSource>,
    url: String,
    cache: Mutex<TimedCache<(), f64>>,
}

impl DifficultyFetcher {
    /// Creates a fetcher for `url` whose cache entries live for `ttl`
    pub fn new(source: Arc<dyn HttpSource>, url: impl Into<String>, ttl: Duration) -> Self {
        DifficultyFetcher {
            source,
            url: url.into(),
            cache: Mutex::new(TimedCache::new(ttl)),
        }
    }

    /// Current network difficulty, from cache when fresh
    pub async fn get(&self) -> Option<f64> {
        self.get_at(Instant::now()).await
    }

    /// Same as [`get`](Self::get) with an explicit clock reading
    pub async fn get_at(&self, now: Instant) -> Option<f64> {
        if let Some(diff) = self.cache.lock().await.fresh(&(), now) {
            log::debug!("Network difficulty served from cache: {}", diff);
            return Some(diff);
        }

        match self.fetch().await {
            Ok(diff) => {
                self.cache.lock().await.store((), diff, now);
                log::info!("Fetched network difficulty {} from {}", diff, self.url);
                Some(diff)
            }
            Err(e) => {
                log::error!("Error fetching network difficulty from {}: {}", self.url, e);
                self.cache.lock().await.latest()
            }
        }
    }

    async fn fetch(&self) -> Result<f64, DashboardError> {
        let body = self.source.get_text(&self.url).await?;
        parse_difficulty(&body)
    }
}

/// Parses a difficulty response body
///
/// # Errors
/// Returns `DashboardError::ParseError` if the body does not start with a finite number
pub fn parse_difficulty(body: &str) -> Result<f64, DashboardError> {
    parse_leading_f64(body).ok_or_else(|| {
        let preview: String = body.chars().take(40).collect();
        DashboardError::ParseError(format!("difficulty body is not a number: {:?}", preview))
    })
}
