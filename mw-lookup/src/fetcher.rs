use crate::traits::{RemoteResponse, RemoteSource};
use crate::types::{LookupError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    /// `None` keeps the HTTP client's own default.
    pub timeout_seconds: Option<u64>,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("mw-lookup/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: None,
            max_redirects: 5,
        }
    }
}

/// `RemoteSource` backed by a reqwest client.
pub struct HttpSource {
    client: Client,
    config: FetchConfig,
}

impl HttpSource {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects));

        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    fn source_name(&self) -> String {
        format!("HTTP ({})", self.config.user_agent)
    }

    async fn get(&self, url: &str) -> Result<RemoteResponse> {
        let start_time = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();

        // Bodies of failed requests are never persisted, don't bother downloading them.
        let body = if status == StatusCode::OK {
            response.bytes().await?.to_vec()
        } else {
            Vec::new()
        };

        debug!(
            "GET {} -> {} ({} bytes, {} ms)",
            redact_key(url),
            status.as_u16(),
            body.len(),
            start_time.elapsed().as_millis()
        );

        Ok(RemoteResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// In-memory `RemoteSource`. Unknown URLs behave like an unreachable host.
#[derive(Default)]
pub struct MockSource {
    routes: HashMap<String, RemoteResponse>,
    requests: RwLock<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(
            url.into(),
            RemoteResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Every URL requested so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl RemoteSource for MockSource {
    fn source_name(&self) -> String {
        format!("Mock ({} routes)", self.routes.len())
    }

    async fn get(&self, url: &str) -> Result<RemoteResponse> {
        self.requests.write().await.push(url.to_string());

        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| LookupError::Transport(format!("no route to {}", url)))
    }
}

/// Strips the API key from a URL before it is logged.
pub fn redact_key(url: &str) -> String {
    match url.find("key=") {
        Some(pos) => {
            let rest = &url[pos + 4..];
            let end = rest.find('&').map(|i| pos + 4 + i).unwrap_or(url.len());
            format!("{}***{}", &url[..pos + 4], &url[end..])
        }
        None => url.to_string(),
    }
}
