use crate::fetcher::redact_key;
use crate::traits::RemoteSource;
use crate::types::{Method, MethodOrder, ResourceRequest, ResourceResult, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Decides whether an artifact comes from the cache directory or the network.
pub struct Resolver {
    source: Arc<dyn RemoteSource>,
}

impl Resolver {
    pub fn new(source: Arc<dyn RemoteSource>) -> Self {
        Self { source }
    }

    /// Tries each method in `order` until one produces a file at `request.local_path`.
    ///
    /// A `Disk` hit is any regular file at the path, however old. A `Net` hit is a
    /// 200 answer whose body has been written to the path. Network failures only end
    /// the current step; failing to write a fetched body is an error.
    pub async fn resolve(&self, request: &ResourceRequest, order: &MethodOrder) -> Result<ResourceResult> {
        for method in order.methods() {
            let found = match method {
                Method::Disk => self.try_disk(&request.local_path).await,
                Method::Net => self.try_net(request).await?,
            };

            if found {
                debug!(
                    "Resolved {} {} via {}",
                    request.kind,
                    request.local_path.display(),
                    method
                );
                return Ok(ResourceResult::Found(request.local_path.clone()));
            }
        }

        debug!(
            "No method in [{}] produced {} {}",
            order,
            request.kind,
            request.local_path.display()
        );
        Ok(ResourceResult::NotFound)
    }

    async fn try_disk(&self, path: &Path) -> bool {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata.is_file(),
            Err(_) => false,
        }
    }

    async fn try_net(&self, request: &ResourceRequest) -> Result<bool> {
        let url = redact_key(&request.remote_url);

        let response = match self.source.get(&request.remote_url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetching {} from {} failed: {}", url, self.source.source_name(), e);
                return Ok(false);
            }
        };

        if response.status != 200 {
            warn!("Fetching {} returned HTTP {}", url, response.status);
            return Ok(false);
        }

        if let Some(parent) = request.local_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&request.local_path, &response.body).await?;

        info!(
            "Fetched {} ({} bytes) into {}",
            request.kind,
            response.body.len(),
            request.local_path.display()
        );
        Ok(true)
    }
}
