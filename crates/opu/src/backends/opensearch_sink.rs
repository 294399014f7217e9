use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::backends::Sink;
use crate::common::BulkResponse;

// -- 📡 The domain the original test cluster lived on. Override with OPU_SINK_CONFIG__URL
// -- or `[sink_config] url = ...` when pointing at anything else (like a wiremock in tests).
const DEFAULT_URL: &str = "https://search-dgoodwin-test-o4g3tsj6smjnfyxybu4m67ospy.us-east-1.es.amazonaws.com";
const DEFAULT_USERNAME: &str = "openshift";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// 🔧 Where the bodies go and who we claim to be when we get there.
///
/// Config lives next to the sink that uses it. The password normally arrives
/// from `OPENSEARCH_PASS` (see `app_config`), read once at startup.
#[derive(Deserialize, Clone)]
pub struct OpenSearchSinkConfig {
    /// 📡 Cluster root URL. `/_bulk` is appended, trailing slashes forgiven.
    #[serde(default = "default_url")]
    pub url: String,
    /// 🔒 Basic-auth username. The bouncer at the club. Except the club is a search index.
    #[serde(default = "default_username")]
    pub username: String,
    /// 🔒 Basic-auth password. `None` sends the username alone and the cluster answers 401.
    #[serde(default)]
    pub password: Option<String>,
    /// ⏱️ Whole-request timeout per chunk, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for OpenSearchSinkConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: default_username(),
            password: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// 🔒 manual Debug so the password never ends up in a log line, a panic, or a screenshot in Slack.
impl std::fmt::Debug for OpenSearchSinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSearchSinkConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// 📡 POSTs rendered `_bulk` bodies to OpenSearch. Pure I/O, zero buffering.
///
/// Internally holds:
/// - `client`: the HTTP muscle 💪, reused across every chunk
/// - `sink_config`: URL and credentials
///
/// Knock knock. Who's there? HTTP POST. HTTP POST who? HTTP POST your NDJSON
/// and hope the cluster's in a good mood.
#[derive(Debug)]
pub(crate) struct OpenSearchSink {
    client: reqwest::Client,
    sink_config: OpenSearchSinkConfig,
}

impl OpenSearchSink {
    /// 🚀 Build the client. 10s to connect, `request_timeout_secs` for the whole round trip.
    ///
    /// No connectivity ping. The first chunk is the ping.
    pub(crate) fn new(sink_config: OpenSearchSinkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(sink_config.request_timeout_secs))
            .build()
            .context("💀 The HTTP client refused to be born. Probably a TLS backend that woke up on the wrong side of the bed.")?;

        Ok(Self {
            client,
            sink_config,
        })
    }

    fn bulk_url(&self) -> String {
        format!("{}/_bulk", self.sink_config.url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Sink for OpenSearchSink {
    /// 📡 POST the body to `/_bulk`, hand back whatever status and body the cluster chose.
    ///
    /// ⚠️ Content-Type is `application/json`, not `application/x-ndjson`. The
    /// cluster accepts both for `_bulk`, and this is the one the uploader has always sent.
    /// 🔄 No retries. A non-2xx is still an `Ok`; the caller decides what to feel about it.
    async fn send(&mut self, payload: String) -> Result<BulkResponse> {
        let bulk_url = self.bulk_url();
        debug!("📡 Sending {} bytes to {}", payload.len(), bulk_url);

        let response = self
            .client
            .post(&bulk_url)
            .header("Content-Type", "application/json")
            .basic_auth(&self.sink_config.username, self.sink_config.password.as_ref())
            .body(payload)
            .send()
            .await
            .context(format!(
                "💀 The bulk request to '{bulk_url}' never got an answer. We launched the payload into the network \
                 and the network responded with what can only be described as 'not vibing with it.' \
                 Check connectivity, DNS, and TLS."
            ))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("💀 The cluster answered, then hung up halfway through the response body.")?;
        trace!("📬 bulk response {status}: {} bytes", body.len());

        Ok(BulkResponse { status, body })
    }

    /// 🗑️ Nothing to flush. The client drops, the connection pool says goodbye. 🦆
    async fn close(&mut self) -> Result<()> {
        debug!("🗑️ OpenSearch sink closing: no buffer to flush, just vibes to release");
        Ok(())
    }
}
