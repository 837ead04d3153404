//! HTTP execution of [`Query`] descriptors.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{TwitchError, TwitchResult};
use crate::ingests::ingests;
use crate::models::{Ingest, IngestList};
use crate::query::{Credentials, Query};

/// Executes queries against the Twitch API.
pub struct TwitchClient {
    http_client: Client,
    credentials: Credentials,
    base_url: Option<String>,
}

impl TwitchClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_client(Client::new(), credentials)
    }

    /// Creates a client sharing an existing connection pool.
    pub fn with_client(http_client: Client, credentials: Credentials) -> Self {
        Self {
            http_client,
            credentials,
            base_url: None,
        }
    }

    /// Sends every query to `base_url` instead of the version's public base.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Executes `query` and decodes the JSON body.
    ///
    /// # Errors
    /// Fails on transport errors, non-success statuses and bodies that do
    /// not decode into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, query: &Query) -> TwitchResult<T> {
        let url = match &self.base_url {
            Some(base) => query.url_with_base(base)?,
            None => query.url()?,
        };

        log::debug!("[Twitch] {} {}", query.http_method(), url);

        let response = self
            .http_client
            .request(query.http_method().clone(), url)
            .headers(header_map(&query.headers(&self.credentials)))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::warn!("[Twitch] {} failed with {}", query.path(), status);
            return Err(TwitchError::Status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown").to_string(),
            ));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Lists the available ingest servers.
    pub async fn list_ingests(&self) -> TwitchResult<Vec<Ingest>> {
        let list: IngestList = self.execute(&ingests()).await?;
        log::debug!("[Twitch] {} ingests", list.ingests.len());
        Ok(list.ingests)
    }
}

/// Converts header pairs, skipping any that are not valid HTTP headers.
fn header_map(headers: &[(String, String)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                map.append(name, value);
            }
            _ => log::warn!("[Twitch] Skipping invalid header {:?}", name),
        }
    }
    map
}
