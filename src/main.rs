use dotenvy::dotenv;
use std::net::SocketAddr;

use trial_overview::config::AppConfig;
use trial_overview::web;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!(
        roster = %config.roster_path.display(),
        sheet = %config.roster_sheet,
        activity = %config.activity_path.display(),
        window_days = config.engagement_window.days,
        "trial overview configured"
    );

    let host = config.host.clone();
    let port = config.port;
    let app = web::app(config);

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Invalid HOST/PORT {}:{}: {}", host, port, e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = SocketAddr::new(addr.ip(), port.wrapping_add(1));
            tracing::warn!(%addr, %fallback, error = %e, "bind failed, trying fallback port");
            match tokio::net::TcpListener::bind(fallback).await {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Could not bind {} or {}: {}", addr, fallback, e);
                    std::process::exit(1);
                }
            }
        }
    };

    match listener.local_addr() {
        Ok(bound) => println!("🚀 Trial overview on http://{}/overview", bound),
        Err(e) => tracing::warn!(error = %e, "local_addr unavailable"),
    }

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("server error: {}", e);
        std::process::exit(1);
    }
}
