// API client module: a small blocking HTTP client that talks to the
// solutions API. Kept synchronous on purpose; a submit run is one request.

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::package::Package;

/// Multipart field name the API expects for every submitted file.
pub const FILES_FIELD: &str = "files[]";

/// Holds a reqwest blocking client, the API base URL and the token sent
/// with every request.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

/// What the API answers after a submission. Fields are optional because
/// older deployments reply with an empty body.
#[derive(Deserialize, Debug, Default)]
pub struct SubmitResponse {
    #[serde(default)]
    pub url: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("exsubmit/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Build a client from the user's configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let configured = config.ensure_configured()?;
        Self::new(&config.api_base_url, configured.token)
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let val = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .context("API token contains characters not allowed in a header")?;
        headers.insert(AUTHORIZATION, val);
        Ok(headers)
    }

    /// Upload every file of `package` to `PATCH /solutions/{id}`, one
    /// `files[]` part per file named by its exercise-relative path.
    pub fn submit(&self, package: &Package) -> Result<SubmitResponse> {
        let url = format!("{}/solutions/{}", &self.base_url, package.solution.id);

        let mut form = multipart::Form::new();
        for (relative, content) in &package.files {
            let part = multipart::Part::bytes(content.clone()).file_name(relative.clone());
            form = form.part(FILES_FIELD, part);
        }

        debug!(%url, files = package.len(), "sending submission");
        let res = self
            .client
            .patch(&url)
            .headers(self.auth_headers()?)
            .multipart(form)
            .send()
            .context("Failed to send submit request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_default();
            anyhow::bail!("Submit failed: {} - {}", status, txt);
        }

        let body = res.text().context("Reading submit response")?;
        if body.trim().is_empty() {
            return Ok(SubmitResponse::default());
        }
        serde_json::from_str(&body).context("Parsing submit response json")
    }
}
