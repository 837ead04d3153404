//! Query descriptors.
//!
//! A [`Query`] says what to request, not how: the path, method, parameters
//! and whether the OAuth token should be sent. [`TwitchClient`] turns a
//! descriptor into an HTTP request.
//!
//! [`TwitchClient`]: crate::client::TwitchClient

use reqwest::{Method, Url};

use crate::error::{TwitchError, TwitchResult};

/// Twitch API generations with their own base URL and media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// The v5 ("kraken") API.
    V5,
}

impl ApiVersion {
    /// Base URL every path of this version is resolved against.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::V5 => "https://api.twitch.tv/kraken/",
        }
    }

    /// `Accept` header value selecting this version.
    #[must_use]
    pub fn accept(self) -> &'static str {
        match self {
            Self::V5 => "application/vnd.twitchtv.v5+json",
        }
    }
}

/// Application credentials sent with every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    /// User token; only sent for queries that ask for it.
    pub oauth_token: Option<String>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            oauth_token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.oauth_token = Some(token.into());
        self
    }
}

/// Description of one API request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    version: ApiVersion,
    path: String,
    method: Method,
    use_token: bool,
    params: Vec<(String, String)>,
    headers: Vec<(String, String)>,
}

impl Query {
    /// Creates a `GET` query for `path` that sends the token when available.
    pub fn new(version: ApiVersion, path: impl Into<String>) -> Self {
        Self {
            version,
            path: path.into(),
            method: Method::GET,
            use_token: true,
            params: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Shorthand for a v5 query.
    pub fn v5(path: impl Into<String>) -> Self {
        Self::new(ApiVersion::V5, path)
    }

    #[must_use]
    pub fn use_token(mut self, use_token: bool) -> Self {
        self.use_token = use_token;
        self
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Adds a query-string parameter; parameters keep their insertion order.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Adds an extra request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn http_method(&self) -> &Method {
        &self.method
    }

    pub fn requires_token(&self) -> bool {
        self.use_token
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Full request URL against the version's public base.
    ///
    /// # Errors
    /// Returns [`TwitchError::InvalidUrl`] if the path does not form a URL.
    pub fn url(&self) -> TwitchResult<Url> {
        self.url_with_base(self.version.base_url())
    }

    /// Full request URL against `base` (which should end in `/`).
    ///
    /// # Errors
    /// Returns [`TwitchError::InvalidUrl`] if `base` and the path do not
    /// form a URL.
    pub fn url_with_base(&self, base: &str) -> TwitchResult<Url> {
        let raw = format!("{}{}", base, self.path.trim_start_matches('/'));
        let url = if self.params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, &self.params)
        };
        url.map_err(|e| TwitchError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Headers to send with this query, in order.
    ///
    /// `Authorization` is only included when the query wants the token and
    /// `credentials` carries one.
    pub fn headers(&self, credentials: &Credentials) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Accept".to_string(), self.version.accept().to_string()),
            ("Client-ID".to_string(), credentials.client_id.clone()),
        ];

        if self.use_token {
            if let Some(token) = credentials.oauth_token.as_deref().filter(|t| !t.is_empty()) {
                headers.push(("Authorization".to_string(), format!("OAuth {}", token)));
            }
        }

        headers.extend(self.headers.iter().cloned());
        headers
    }
}
