//! Routing and dispatch behavior tests against a live host.

use fluent_host::{HandlerResponse, VerbSet};

mod common;

#[tokio::test]
async fn unmatched_route_yields_404_with_empty_body() {
    let host = common::ephemeral_host();
    host.handles("/known", VerbSet::GET, |_req| {
        Ok(HandlerResponse::text("known"))
    });
    let addr = common::start(&host).await;

    let client = common::fresh_client();
    let response = client
        .get(format!("http://{addr}/unknown"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert!(response.text().await.unwrap().is_empty());

    host.stop().await;
}

#[tokio::test]
async fn fallback_route_serves_custom_404() {
    let host = common::ephemeral_host();
    host.handles("*", VerbSet::ALL, |req| {
        Ok(HandlerResponse::text_with_status(
            format!("No handler found for the route {}.", req.path()),
            404,
        ))
    })
    .handles("/known", VerbSet::GET, |_req| {
        Ok(HandlerResponse::text("known"))
    });
    let addr = common::start(&host).await;

    let client = common::fresh_client();

    // Specific routes win even though the fallback was registered first.
    let response = client
        .get(format!("http://{addr}/known"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "known");

    let response = client
        .get(format!("http://{addr}/missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(
        response.text().await.unwrap(),
        "No handler found for the route /missing."
    );

    host.stop().await;
}

#[tokio::test]
async fn most_recent_registration_wins() {
    let host = common::ephemeral_host();
    host.handles("/versioned", VerbSet::GET, |_req| {
        Ok(HandlerResponse::text("old"))
    })
    .handles("/versioned", VerbSet::GET, |_req| {
        Ok(HandlerResponse::text("new"))
    });
    let addr = common::start(&host).await;

    let client = common::fresh_client();
    let body = client
        .get(format!("http://{addr}/versioned"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "new");

    host.stop().await;
}

#[tokio::test]
async fn wildcard_suffix_matches_prefix_case_insensitively() {
    let host = common::ephemeral_host();
    host.handles("/static/*", VerbSet::GET, |req| {
        Ok(HandlerResponse::text(format!("served {}", req.path())))
    });
    let addr = common::start(&host).await;

    let client = common::fresh_client();
    let response = client
        .get(format!("http://{addr}/STATIC/app.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "served /STATIC/app.js");

    let response = client
        .get(format!("http://{addr}/assets/app.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    host.stop().await;
}

#[tokio::test]
async fn verb_mismatch_is_a_404() {
    let host = common::ephemeral_host();
    host.handles("/submit", VerbSet::POST, |_req| {
        Ok(HandlerResponse::text("accepted"))
    });
    let addr = common::start(&host).await;

    let client = common::fresh_client();
    let response = client
        .get(format!("http://{addr}/submit"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = client
        .post(format!("http://{addr}/submit"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    host.stop().await;
}

#[tokio::test]
async fn handler_fault_yields_500_and_host_keeps_serving() {
    let host = common::ephemeral_host();
    host.handles("/healthy", VerbSet::GET, |_req| {
        Ok(HandlerResponse::text("ok"))
    })
    .handles("/boom", VerbSet::GET, |_req| Err("boom".into()));
    let addr = common::start(&host).await;

    let client = common::fresh_client();
    let response = client
        .get(format!("http://{addr}/boom"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    assert!(response.text().await.unwrap().is_empty());

    let response = client
        .get(format!("http://{addr}/healthy"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");

    host.stop().await;
}

#[tokio::test]
async fn json_handler_sets_content_type() {
    #[derive(serde::Serialize)]
    struct Foo {
        bar: &'static str,
    }

    let host = common::ephemeral_host();
    host.handles("/json", VerbSet::GET, |_req| {
        HandlerResponse::json(&Foo { bar: "baz" })
    });
    let addr = common::start(&host).await;

    let client = common::fresh_client();
    let response = client
        .get(format!("http://{addr}/json"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"],
        "application/json; charset=utf-8"
    );
    let value: serde_json::Value = response.json().await.unwrap();
    assert_eq!(value["bar"], "baz");

    host.stop().await;
}
