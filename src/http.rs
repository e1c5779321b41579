//! Outbound HTTP for all sources.
//!
//! One [`Client`] is built on first use and shared by every source. It
//! carries the request timeout and user agent and holds no per-request
//! state, so sources stay isolated from each other. If the client cannot be
//! built, every fetch fails with [`SourceError::Client`].

use crate::error::SourceError;
use once_cell::sync::OnceCell;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument};

/// Every request gets exactly one attempt bounded by this timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("haberler_plus/", env!("CARGO_PKG_VERSION"));

static HTTP_CLIENT: OnceCell<Client> = OnceCell::new();

fn build_client(timeout: Duration) -> Result<Client, SourceError> {
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(SourceError::Client)
}

fn shared_client() -> Result<&'static Client, SourceError> {
    HTTP_CLIENT.get_or_try_init(|| build_client(REQUEST_TIMEOUT))
}

/// GET `url` and return the body as text.
///
/// Transport failures, non-2xx statuses and undecodable bodies are all
/// reported; it is up to the caller whether to swallow them.
#[instrument(level = "debug", skip_all, fields(%url))]
pub async fn fetch_text(url: &str) -> Result<String, SourceError> {
    fetch_text_with(shared_client()?, url).await
}

async fn fetch_text_with(client: &Client, url: &str) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| SourceError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Http {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await.map_err(|source| SourceError::Body {
        url: url.to_string(),
        source,
    })?;
    debug!(bytes = body.len(), "Received body");
    Ok(body)
}
