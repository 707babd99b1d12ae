//! Demo host mirroring a typical embedding: a few plain routes, a JSON
//! route, a CORS-enabled API prefix, and a custom 404 fallback.

use clap::Parser;
use fluent_host::{CorsPolicy, FluentHost, HandlerResponse, HostConfig, VerbSet};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "fluent-demo")]
#[command(about = "Demo server for the fluent-host library", long_about = None)]
struct Cli {
    /// Address to serve on.
    #[arg(short, long, default_value = "127.0.0.1:1234")]
    bind: String,
}

#[derive(Serialize)]
struct Foo {
    bar: &'static str,
    baz: &'static str,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fluent_host::observability::logging::init();

    let cli = Cli::parse();
    let host = FluentHost::new(HostConfig {
        bind_address: cli.bind,
    });

    host.handles("/hello/world", VerbSet::GET, |_req| {
        Ok(HandlerResponse::text("Hello World!"))
    })
    .handles("/goodbye", VerbSet::GET, |_req| {
        Ok(HandlerResponse::text("Good Bye!"))
    })
    .handles("/json", VerbSet::GET, |_req| {
        HandlerResponse::json(&Foo {
            bar: "Bar follows Foo.",
            baz: "Baz is third.",
        })
    })
    .handles_with_cors(
        "/api/*",
        VerbSet::GET | VerbSet::POST,
        |req| Ok(HandlerResponse::text(format!("api: {}", req.path()))),
        CorsPolicy::allow_all(),
    )
    .handles("*", VerbSet::ALL, |req| {
        Ok(HandlerResponse::text_with_status(
            format!("No handler found for the route {}.", req.path()),
            404,
        ))
    });

    host.start().await?;
    if let Some(addr) = host.local_addr().await {
        tracing::info!(
            address = %addr,
            routes = host.handlers().len(),
            "fluent-demo serving, press Ctrl+C to stop"
        );
    }

    tokio::signal::ctrl_c().await?;
    host.stop().await;
    Ok(())
}
