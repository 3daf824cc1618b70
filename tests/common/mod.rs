//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::{body::Body, http::Request, Router};
use receipt_validator::config::ServiceConfig;
use receipt_validator::net;
use receipt_validator::{HttpServer, Shutdown};
use tokio::task::JoinHandle;

/// Router with every production layer, for in-process requests.
#[allow(dead_code)]
pub fn router() -> Router {
    HttpServer::new(ServiceConfig::default()).router()
}

#[allow(dead_code)]
pub fn router_with(config: ServiceConfig) -> Router {
    HttpServer::new(config).router()
}

/// POST a raw body to the validation endpoint.
#[allow(dead_code)]
pub fn post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/receipt/validate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A server listening on an ephemeral localhost port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn start() -> Self {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();

        let listener = net::bind(&config.listener).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config);
        let rx = shutdown.subscribe();
        let handle = tokio::spawn(async move { server.run(listener, rx).await });

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/receipt/validate", self.addr)
    }
}
