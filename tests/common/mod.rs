//! Shared utilities for end-to-end tests.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use phonebook::config::PhonebookConfig;
use phonebook::http::HttpServer;
use phonebook::lifecycle::Shutdown;
use phonebook::store::PersonStore;

/// A phonebook server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    /// Start a server over `store` with otherwise default settings.
    pub async fn start(store: Arc<dyn PersonStore>) -> Self {
        let mut config = PhonebookConfig::default();
        config.observability.access_log = false;
        config.storage.backend = store.backend();
        Self::start_with(config, store).await
    }

    pub async fn start_with(config: PhonebookConfig, store: Arc<dyn PersonStore>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        let server = HttpServer::new(config, store);
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        Self {
            addr,
            client,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
