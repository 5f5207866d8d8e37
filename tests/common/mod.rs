//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use origin_sdk::OriginClient;
use origin_server::{OriginConfig, OriginServer, Shutdown};
use tokio::net::TcpListener;

/// A running origin bound to an ephemeral loopback port.
#[allow(dead_code)]
pub struct TestOrigin {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestOrigin {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> OriginClient {
        OriginClient::with_client(http_client(), &self.url())
    }
}

/// Start an origin with the given config on `127.0.0.1:0`.
pub async fn start_origin(mut config: OriginConfig) -> TestOrigin {
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = OriginServer::new(config);
    let task = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestOrigin { addr, shutdown, task }
}

/// Client that ignores proxy environment variables and never pools.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap()
}
