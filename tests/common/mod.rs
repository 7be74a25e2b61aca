//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;

use mock_server::config::MockConfig;
use mock_server::region::RegionStore;
use mock_server::{HttpServer, Shutdown};
use mock_server_sdk::MockClient;
use tokio::net::TcpListener;

/// A mock server running on an ephemeral port. Shuts down on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    pub regions: Arc<RegionStore>,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> MockClient {
        MockClient::new(&self.url())
    }

    pub fn client_for(&self, region: &str) -> MockClient {
        self.client().with_region(region)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Bind 127.0.0.1:0 and serve in the background.
pub async fn start_server(config: MockConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let regions = server.regions();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        regions,
        shutdown,
    }
}

/// reqwest client that never goes through an environment proxy.
#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
