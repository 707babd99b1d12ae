//! Shared helpers for integration tests.

use std::net::SocketAddr;

use fluent_host::FluentHost;

/// A host bound to an ephemeral loopback port.
pub fn ephemeral_host() -> FluentHost {
    FluentHost::bind("127.0.0.1:0")
}

/// Start the host and return the concrete address it serves on.
pub async fn start(host: &FluentHost) -> SocketAddr {
    host.start().await.expect("host failed to start");
    host.local_addr().await.expect("started host has no bound address")
}

/// A client without connection pooling, so assertions about stopped hosts
/// are not satisfied by a stale keep-alive connection.
#[allow(dead_code)]
pub fn fresh_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .expect("client")
}
