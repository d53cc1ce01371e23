// src/network/status.rs
//! ckpool worker status fetcher
//!
//! The pool publishes per-user statistics as an HTML page with the JSON
//! snapshot embedded in it. Requests go through a relay prefix when one is
//! configured, the payload is cut out by a [`PayloadExtractor`], and the
//! parsed [`UserStatus`] is cached per identifier.

use crate::cache::TimedCache;
use crate::network::extract::{BraceRegionExtractor, PayloadExtractor};
use crate::network::http::HttpSource;
use crate::types::HashrateWindow;
use crate::utils::error::DashboardError;
use crate::utils::numeric::{value_as_f64, value_text};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use url::{Url, form_urlencoded};

/// Default ckpool user status base
pub const DEFAULT_STATUS_BASE_URL: &str = "https://eusolo.ckpool.org/users";

/// Default CORS relay prefix; the target URL is appended percent-encoded
pub const DEFAULT_RELAY_URL: &str = "https://corsproxy.io/?";

/// Per-worker statistics as published by ckpool
///
/// Numeric values arrive either as JSON numbers or as strings with unit
/// suffixes, so they are kept as raw [`Value`]s and read through accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerEntry {
    /// Worker name
    #[serde(default)]
    pub workername: Value,
    /// Unix time of the last share
    #[serde(default)]
    pub lastshare: Value,
    /// Accepted shares
    #[serde(default)]
    pub shares: Value,
    /// Best share ever (raw difficulty)
    #[serde(default)]
    pub bestever: Value,
    /// Best share this round (raw difficulty)
    #[serde(default)]
    pub bestshare: Value,
    /// 1-minute hashrate, e.g. `"12.5T"`
    #[serde(default)]
    pub hashrate1m: Value,
    /// 5-minute hashrate
    #[serde(default)]
    pub hashrate5m: Value,
    /// 1-hour hashrate
    #[serde(default)]
    pub hashrate1hr: Value,
    /// 1-day hashrate
    #[serde(default)]
    pub hashrate1d: Value,
    /// 7-day hashrate
    #[serde(default)]
    pub hashrate7d: Value,
}

impl WorkerEntry {
    /// Worker name as text
    pub fn name(&self) -> Option<String> {
        value_text(&self.workername)
    }

    /// Last share timestamp as reported
    pub fn last_share(&self) -> Option<String> {
        value_text(&self.lastshare)
    }

    /// Share count as reported
    pub fn share_count(&self) -> Option<String> {
        value_text(&self.shares)
    }

    /// Best share of the round in raw difficulty units
    pub fn best_share(&self) -> Option<f64> {
        value_as_f64(&self.bestshare)
    }

    /// Best share ever in raw difficulty units
    pub fn best_ever(&self) -> Option<f64> {
        value_as_f64(&self.bestever)
    }

    /// Hashrate for `window`, taking the leading number and ignoring the unit
    pub fn hashrate(&self, window: HashrateWindow) -> Option<f64> {
        let raw = match window {
            HashrateWindow::OneMinute => &self.hashrate1m,
            HashrateWindow::FiveMinutes => &self.hashrate5m,
            HashrateWindow::OneHour => &self.hashrate1hr,
            HashrateWindow::OneDay => &self.hashrate1d,
            HashrateWindow::SevenDays => &self.hashrate7d,
        };
        value_as_f64(raw)
    }
}

/// Snapshot of a pool user: account-level totals plus its workers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStatus {
    /// Worker name
    #[serde(default)]
    pub workername: Value,
    /// Unix time of the last share
    #[serde(default)]
    pub lastshare: Value,
    /// Accepted shares
    #[serde(default)]
    pub shares: Value,
    /// Best share ever (raw difficulty)
    #[serde(default)]
    pub bestever: Value,
    /// Best share this round (raw difficulty)
    #[serde(default)]
    pub bestshare: Value,
    /// Workers in the order the pool lists them
    #[serde(default)]
    pub worker: Vec<WorkerEntry>,
}

impl UserStatus {
    /// First listed worker, the one the dashboard displays
    pub fn primary_worker(&self) -> Option<&WorkerEntry> {
        self.worker.first()
    }
}

/// Percent-encodes a single URL component
///
/// Spaces become `%20` rather than `+`, so the result is valid both in a
/// path segment and in a query string.
pub fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Cached client for ckpool user status pages
pub struct WorkerStatusFetcher {
    source: Arc<dyn HttpSource>,
    status_base: String,
    relay: Option<String>,
    extractor: Box<dyn PayloadExtractor>,
    cache: Mutex<TimedCache<String, UserStatus>>,
}

impl WorkerStatusFetcher {
    /// Creates a fetcher using the default brace-region extractor
    ///
    /// An empty `relay` disables relaying.
    pub fn new(
        source: Arc<dyn HttpSource>,
        status_base: impl Into<String>,
        relay: Option<String>,
        ttl: Duration,
    ) -> Self {
        WorkerStatusFetcher {
            source,
            status_base: status_base.into(),
            relay: relay.filter(|r| !r.trim().is_empty()),
            extractor: Box::new(BraceRegionExtractor::worker_payload()),
            cache: Mutex::new(TimedCache::new(ttl)),
        }
    }

    /// Replaces the payload extraction strategy
    pub fn with_extractor(mut self, extractor: Box<dyn PayloadExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Status page URL for `identifier`, before relaying
    ///
    /// # Errors
    /// Returns `DashboardError::UrlError` if the configured base is not a URL
    pub fn status_url(&self, identifier: &str) -> Result<String, DashboardError> {
        let target = format!(
            "{}/{}",
            self.status_base.trim_end_matches('/'),
            encode_component(identifier)
        );
        Url::parse(&target)?;
        Ok(target)
    }

    /// URL actually requested, with the relay applied
    ///
    /// # Errors
    /// Returns `DashboardError::UrlError` if the configured base is not a URL
    pub fn request_url(&self, identifier: &str) -> Result<String, DashboardError> {
        let target = self.status_url(identifier)?;
        Ok(match &self.relay {
            Some(relay) => format!("{}{}", relay, encode_component(&target)),
            None => target,
        })
    }

    /// Status for `identifier`, from cache when fresh for the same identifier
    pub async fn get(&self, identifier: &str) -> Option<UserStatus> {
        self.get_at(identifier, Instant::now()).await
    }

    /// Same as [`get`](Self::get) with an explicit clock reading
    pub async fn get_at(&self, identifier: &str, now: Instant) -> Option<UserStatus> {
        let key = identifier.to_string();
        if let Some(status) = self.cache.lock().await.fresh(&key, now) {
            log::debug!("Worker status for '{}' served from cache", identifier);
            return Some(status);
        }

        match self.fetch(identifier).await {
            Ok(status) => {
                log::info!(
                    "Fetched worker status for '{}' ({} workers)",
                    identifier,
                    status.worker.len()
                );
                self.cache.lock().await.store(key, status.clone(), now);
                Some(status)
            }
            Err(e) => {
                log::error!("Error fetching worker data for '{}': {}", identifier, e);
                None
            }
        }
    }

    async fn fetch(&self, identifier: &str) -> Result<UserStatus, DashboardError> {
        let url = self.request_url(identifier)?;
        let page = self.source.get_text(&url).await?;
        self.parse_page(&page, &url)
    }

    fn parse_page(&self, page: &str, url: &str) -> Result<UserStatus, DashboardError> {
        let payload = self
            .extractor
            .extract(page)
            .ok_or_else(|| DashboardError::MissingPayload(url.to_string()))?;
        Ok(serde_json::from_str(payload)?)
    }
}
