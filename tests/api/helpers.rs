use std::{net::SocketAddr, sync::OnceLock};

use anyhow::Result;
use mailrelay::{
    config::{ApiKey, AppConfig, ListConfig, NetConfig},
    init_dbg_tracing, App,
};
use reqwest::Response;
use serde_json::Value;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "0123456789abcdef-us21";
pub const TEST_LIST_ID: &str = "list123";
/// Short enough to keep the timeout test fast, long enough for a local mock server.
pub const TEST_TIMEOUT_MILLIS: u64 = 1_000;

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: reqwest::Client,
    /// Stands in for the Mailchimp API.
    pub list_server: MockServer,
}

/// Set `TEST_LOG` to see the application logs while testing.
fn init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        if std::env::var("TEST_LOG").is_ok() {
            init_dbg_tracing();
        }
    });
}

impl TestApp {
    /// Spawns the app on a random port, talking to a fresh `MockServer` instead of the provider.
    pub async fn spawn() -> Result<Self> {
        init_test_subscriber();

        let list_server = MockServer::start().await;

        let mut list_config = ListConfig::new(ApiKey::parse(TEST_API_KEY)?, TEST_LIST_ID);
        list_config.base_url = Some(list_server.uri());
        list_config.timeout_millis = TEST_TIMEOUT_MILLIS;

        let config = AppConfig {
            // Trying to bind port 0 will trigger an OS scan for an available port.
            net_config: NetConfig {
                host: [127, 0, 0, 1],
                app_port: 0,
            },
            list_config,
        };

        let app = App::build_from_config(config).await?;
        let addr = app.local_addr()?;
        tokio::spawn(mailrelay::serve(app));

        Ok(TestApp {
            addr,
            http_client: reqwest::Client::new(),
            list_server,
        })
    }

    pub async fn home_get(&self) -> Result<Response> {
        let resp = self
            .http_client
            .get(format!("http://{}/", self.addr))
            .send()
            .await?;
        Ok(resp)
    }

    pub async fn subscribe_put(&self, body: &Value) -> Result<Response> {
        let resp = self
            .http_client
            .put(format!("http://{}/subscribe", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(resp)
    }
}

/// Path of the member resource on the mocked provider.
pub fn member_path(member_id: &str) -> String {
    format!("/3.0/lists/{TEST_LIST_ID}/members/{member_id}")
}
