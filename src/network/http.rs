// src/network/http.rs
//! HTTP text source
//!
//! Both fetchers only ever need "GET this URL, give me the body as text".
//! [`HttpSource`] is that seam; [`ReqwestSource`] is the production
//! implementation and tests substitute scripted sources.

use crate::utils::error::DashboardError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Anything that can fetch a URL body as text
#[async_trait]
pub trait HttpSource: Send + Sync {
    /// Issues a GET and returns the response body
    async fn get_text(&self, url: &str) -> Result<String, DashboardError>;
}

/// [`HttpSource`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestSource {
    client: Client,
}

impl ReqwestSource {
    /// Builds a client, optionally with a per-request timeout
    ///
    /// # Errors
    /// Returns `DashboardError::HttpError` if the TLS backend cannot be initialized
    pub fn new(timeout: Option<Duration>) -> Result<Self, DashboardError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(ReqwestSource {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HttpSource for ReqwestSource {
    async fn get_text(&self, url: &str) -> Result<String, DashboardError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted source shared by fetcher and presenter tests

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned bodies by URL substring and records every request
    #[derive(Default)]
    pub struct ScriptedSource {
        routes: Mutex<HashMap<String, Result<String, String>>>,
        requests: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        pub fn new() -> Self {
            Self::default()
        }

        /// Any URL containing `needle` answers with `body`
        pub fn respond(&self, needle: &str, body: &str) {
            self.routes
                .lock()
                .unwrap()
                .insert(needle.to_string(), Ok(body.to_string()));
        }

        /// Any URL containing `needle` fails with a connection error
        pub fn fail(&self, needle: &str) {
            self.routes
                .lock()
                .unwrap()
                .insert(needle.to_string(), Err("connection refused".to_string()));
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        pub fn count(&self, needle: &str) -> usize {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|u| u.contains(needle))
                .count()
        }
    }

    #[async_trait]
    impl HttpSource for ScriptedSource {
        async fn get_text(&self, url: &str) -> Result<String, DashboardError> {
            self.requests.lock().unwrap().push(url.to_string());
            let routes = self.routes.lock().unwrap();
            let hit = routes
                .iter()
                .filter(|(needle, _)| url.contains(needle.as_str()))
                .max_by_key(|(needle, _)| needle.len())
                .map(|(_, r)| r.clone());
            match hit {
                Some(Ok(body)) => Ok(body),
                Some(Err(msg)) => Err(DashboardError::InputError(msg)),
                None => Err(DashboardError::InputError(format!("no route for {}", url))),
            }
        }
    }
}
