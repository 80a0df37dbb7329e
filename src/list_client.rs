use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    utils,
    web::types::{MemberId, MemberUpsert, ValidSubscription},
};

/// The provider ignores the Basic auth username, only the API key (password) matters.
const BASIC_AUTH_USER: &str = "anystring";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A client for the mailing-list provider's Marketing API.
/// Every call is a single request bounded by `timeout`, nothing gets retried.
#[derive(Debug)]
pub struct ListClient {
    pub http_client: Client,
    pub base_url: Url,
    pub list_id: String,
    api_key: SecretString,
    timeout: Duration,
}

/// Status and parsed JSON body of a response the provider did send back.
#[derive(Debug)]
pub struct ProviderResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ProviderResponse {
    pub fn is_rejected(&self) -> bool {
        self.status.as_u16() >= 400
    }

    /// The provider's `detail`, falling back to its `title`.
    pub fn error_message(&self) -> Option<&str> {
        ["detail", "title"].into_iter().find_map(|field| {
            self.body
                .get(field)
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty())
        })
    }
}

impl ListClient {
    pub fn new(
        base_url: Url,
        list_id: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            // One outbound connection per relayed request.
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|er| Error::ClientBuild(utils::error_chain_string(&er)))?;

        Ok(ListClient {
            http_client,
            base_url,
            list_id: list_id.into(),
            api_key,
            timeout,
        })
    }

    /// `{base_url}/3.0/lists/{list_id}/members/{member_id}`
    pub fn member_url(&self, member_id: &MemberId) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::UrlParsing(format!("'{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["3.0", "lists", self.list_id.as_str(), "members", member_id.as_str()]);

        Ok(url)
    }

    /// Creates or updates the list member for `subscription` with a `PUT`.
    ///
    /// Returns `Ok` for every response the provider sent back, rejections included,
    /// the caller decides what a status `>= 400` means.
    #[tracing::instrument(name = "Upserting list member", skip_all, fields(member_id = tracing::field::Empty))]
    pub async fn upsert_member(&self, subscription: &ValidSubscription) -> Result<ProviderResponse> {
        let member_id = MemberId::from_email(&subscription.email);
        tracing::Span::current().record("member_id", member_id.as_str());
        let url = self.member_url(&member_id)?;

        debug!("{:<12} - PUT {url}", "upsert_member");
        let resp = self
            .http_client
            .put(url)
            .basic_auth(BASIC_AUTH_USER, Some(self.api_key.expose_secret()))
            .json(&MemberUpsert::subscribed(subscription))
            .send()
            .await
            .map_err(|er| self.request_error(er))?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|er| self.request_error(er))?;
        let body = parse_body(&bytes)?;
        debug!("{:<12} - provider responded with {status}", "upsert_member");

        Ok(ProviderResponse { status, body })
    }

    fn request_error(&self, er: reqwest::Error) -> Error {
        if er.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Transport(utils::error_chain_string(&er))
        }
    }
}

/// An empty body is an empty object, anything else has to be valid JSON.
fn parse_body(bytes: &[u8]) -> Result<Value> {
    if bytes.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(bytes).map_err(|er| Error::Parse(er.to_string()))
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request timeout after {} seconds", .0.as_secs())]
    Timeout(Duration),
    #[error("{0}")]
    Transport(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("invalid provider url: {0}")]
    UrlParsing(String),
    #[error("failed to build the http client: {0}")]
    ClientBuild(String),
}
