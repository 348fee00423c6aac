use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::core::error::SentryError;
use crate::core::types::WebsiteFetchResult;
use crate::detectors::domain::normalize_url;

pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub fn build_client(
    user_agent: &str,
    connect_timeout: Duration,
    max_redirects: usize,
) -> Result<Client, SentryError> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(connect_timeout)
        .redirect(reqwest::redirect::Policy::limited(max_redirects))
        .build()
        .map_err(SentryError::from)
}

/// Retrieve page markup. Failures, including non-2xx statuses, come back as
/// the error half of the result rather than as `Err`.
pub async fn fetch_website(client: &Client, url: &str) -> WebsiteFetchResult {
    let url = normalize_url(url);
    debug!("fetching {}", url);

    let resp = match client.get(&url).send().await {
        Ok(resp) => resp,
        Err(err) => {
            let message = describe(err);
            warn!("fetch {} failed: {}", url, message);
            return WebsiteFetchResult::failed(url, message);
        }
    };

    let status = resp.status();
    if !status.is_success() {
        let message = format!(
            "Failed to fetch: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )
        .trim_end()
        .to_string();
        warn!("fetch {}: {}", url, message);
        return WebsiteFetchResult::failed(url, message);
    }

    match resp.text().await {
        Ok(html) => WebsiteFetchResult::fetched(url, html),
        Err(err) => {
            let message = describe(err);
            warn!("reading body of {} failed: {}", url, message);
            WebsiteFetchResult::failed(url, message)
        }
    }
}

/// [`fetch_website`] bounded by `deadline`; dropping the future cancels the request.
pub async fn fetch_website_within(
    client: &Client,
    url: &str,
    deadline: Duration,
) -> WebsiteFetchResult {
    match tokio::time::timeout(deadline, fetch_website(client, url)).await {
        Ok(result) => result,
        Err(_) => {
            warn!("fetch {} exceeded {:?}", url, deadline);
            WebsiteFetchResult::failed(normalize_url(url), SentryError::Timeout.to_string())
        }
    }
}

fn describe(err: reqwest::Error) -> String {
    let detail = err.to_string();
    match SentryError::from(err) {
        SentryError::Unknown => detail,
        classified => classified.to_string(),
    }
}
