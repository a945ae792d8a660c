use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Seam for retrieving remote command content.
///
/// Kept narrow so tests (and embedded callers) can substitute a canned
/// fetcher instead of touching the network.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> CoreResult<String>;
}

/// [`Fetcher`] backed by a blocking http client.
#[derive(Debug, Default)]
pub struct UrlFetcher;

impl Fetcher for UrlFetcher {
    fn fetch(&self, url: &str) -> CoreResult<String> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Load(format!("unsupported url scheme: {url}")));
        }

        debug!(%url, "fetching command content");

        match ureq::get(url).call() {
            Ok(response) => response
                .into_string()
                .map_err(|e| CoreError::Load(format!("failed to read response body: {e}"))),
            Err(ureq::Error::Status(code, _)) => {
                Err(CoreError::Load(format!("{url} returned status {code}")))
            }
            Err(e) => Err(CoreError::Load(format!("failed to fetch {url}: {e}"))),
        }
    }
}
