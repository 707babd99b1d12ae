//! Host lifecycle state machine tests.

use fluent_host::{FluentHost, HandlerResponse, HostError, HostState, VerbSet};

mod common;

#[tokio::test]
async fn start_twice_fails_with_invalid_state() {
    let host = common::ephemeral_host();
    common::start(&host).await;

    let error = host.start().await.unwrap_err();
    assert!(matches!(error, HostError::InvalidState(HostState::Running)));
    assert_eq!(host.state().await, HostState::Running);

    host.stop().await;
}

#[tokio::test]
async fn stop_is_idempotent() {
    let host = common::ephemeral_host();
    common::start(&host).await;

    host.stop().await;
    assert_eq!(host.state().await, HostState::Stopped);
    host.stop().await;
    assert_eq!(host.state().await, HostState::Stopped);
}

#[tokio::test]
async fn stop_before_start_is_a_no_op() {
    let host = common::ephemeral_host();
    host.stop().await;
    assert_eq!(host.state().await, HostState::Stopped);

    // The host is still startable afterwards.
    common::start(&host).await;
    host.stop().await;
}

#[tokio::test]
async fn stopped_host_refuses_connections() {
    let host = common::ephemeral_host();
    host.handles("/healthy", VerbSet::GET, |_req| {
        Ok(HandlerResponse::text("ok"))
    });
    let addr = common::start(&host).await;

    let client = common::fresh_client();
    let response = client
        .get(format!("http://{addr}/healthy"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    host.stop().await;

    assert!(client
        .get(format!("http://{addr}/healthy"))
        .send()
        .await
        .is_err());
}

#[tokio::test]
async fn restart_serves_on_the_same_address() {
    let host = common::ephemeral_host();
    host.handles("/healthy", VerbSet::GET, |_req| {
        Ok(HandlerResponse::text("ok"))
    });
    let addr = common::start(&host).await;

    let client = common::fresh_client();
    let body = client
        .get(format!("http://{addr}/healthy"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");

    host.stop().await;
    let addr_again = common::start(&host).await;
    assert_eq!(addr_again, addr);

    let body = client
        .get(format!("http://{addr}/healthy"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");

    host.stop().await;
}

#[tokio::test]
async fn dispose_blocks_further_starts() {
    let host = common::ephemeral_host();
    common::start(&host).await;

    host.dispose().await;
    assert_eq!(host.state().await, HostState::Disposed);

    let error = host.start().await.unwrap_err();
    assert!(matches!(error, HostError::Disposed));

    // Dispose and stop both stay no-ops afterwards.
    host.dispose().await;
    host.stop().await;
    assert_eq!(host.state().await, HostState::Disposed);
}

#[tokio::test]
async fn bind_failure_leaves_the_host_startable() {
    // Occupy a port, then point a host at it.
    let taken = common::ephemeral_host();
    let addr = common::start(&taken).await;

    let host = FluentHost::bind(addr.to_string());
    let error = host.start().await.unwrap_err();
    assert!(matches!(error, HostError::Bind { .. }));
    assert_eq!(host.state().await, HostState::Stopped);

    // Once the port frees up, the same host can start.
    taken.stop().await;
    common::start(&host).await;
    host.stop().await;
}

#[tokio::test]
async fn routes_registered_while_running_take_effect() {
    let host = common::ephemeral_host();
    let addr = common::start(&host).await;

    let client = common::fresh_client();
    let response = client
        .get(format!("http://{addr}/late"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    host.handles("/late", VerbSet::GET, |_req| {
        Ok(HandlerResponse::text("registered late"))
    });

    let response = client
        .get(format!("http://{addr}/late"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "registered late");

    host.stop().await;
}
