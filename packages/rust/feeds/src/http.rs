//! Shared HTTP client construction and JSON fetching.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use vanguard_shared::{Result, VanguardError};

use crate::lenient::records_from_values;

/// User-Agent string for all outgoing requests.
pub const USER_AGENT: &str = concat!("VanguardSite/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Build a reqwest client. `timeout: None` leaves requests unbounded.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| VanguardError::Network(format!("failed to build HTTP client: {e}")))
}

/// GET `url` and decode a 2xx JSON body into `T`.
///
/// Transport failures map to [`VanguardError::Network`], non-2xx to
/// [`VanguardError::Status`], and bodies that are not the expected JSON to
/// [`VanguardError::Decode`].
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    debug!(%url, "fetching");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| VanguardError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(VanguardError::status(url, status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| VanguardError::Network(format!("{url}: body read failed: {e}")))?;

    serde_json::from_slice(&body).map_err(|e| VanguardError::decode(format!("{url}: {e}")))
}

/// GET `url` as a JSON array of records, skipping entries that are not
/// objects. Errors as [`get_json`].
pub async fn get_records<T: DeserializeOwned>(client: &Client, url: &str) -> Result<Vec<T>> {
    let values: Vec<Value> = get_json(client, url).await?;
    Ok(records_from_values(values))
}
