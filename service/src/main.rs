use axum::error_handling::HandleErrorLayer;
use axum::Router;
use common::nav::{CredentialSettings, NavBinding};
use common::pdf::PdfPollSettings;
use common::util::consts::{DEFAULT_CODEUNIT, DEFAULT_GREETING_COMPANY, DEFAULT_POLL_DELAY_MILLIS, DEFAULT_POLL_RETRIES, DEFAULT_TIMEOUT_MINUTES, MAX_TIMEOUT_MINUTES};
use common::util::state::{parse_companies, NavSettings};
use service::heartbeat::HeartbeatWorker;
use service::routes;
use service::state::ServiceCollection;
use std::collections::HashMap;
use std::env;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt().json().finish();
    tracing::subscriber::set_global_default(subscriber).expect("Could not init tracing.");

    let timeout_minutes = get_timeout_minutes();
    let binding = NavBinding::with_timeout_minutes(timeout_minutes);
    let pdf = get_pdf_settings();
    let request_timeout = binding.operation_timeout().saturating_add(pdf.delay.saturating_mul(pdf.retries)).saturating_add(Duration::from_secs(30));

    let settings = NavSettings {
        companies: get_companies(),
        url_template: env::var("NAV_URL_TEMPLATE").ok(),
        codeunit: env::var("NAV_CODEUNIT").unwrap_or_else(|_| DEFAULT_CODEUNIT.to_string()),
        greeting_company: get_greeting_company(),
        binding,
        credentials: get_credentials(),
        pdf,
    };
    info!(
        "NAV proxy configured with {} companies, timeout {} minutes, {} credentials, PDFs under {}",
        settings.companies.len(),
        timeout_minutes,
        settings.credentials.build().kind(),
        settings.pdf.root.display()
    );

    let services = ServiceCollection::build(&settings).expect("Could not build services.");

    let cancel = CancellationToken::new();
    let heartbeat = HeartbeatWorker {
        nav_service: services.nav_service.clone(),
        interval: get_heartbeat_interval(),
        input_text: env::var("NAV_HEARTBEAT_TEXT").unwrap_or_else(|_| "Test from Worker".to_string()),
    }
    .spawn(cancel.clone());

    let app = Router::new()
        .merge(routes::root::create_route())
        .merge(routes::nav::create_route(services.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(routes::nav::handle_timeout))
                .layer(TimeoutLayer::new(request_timeout)),
        );

    let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)), get_port());
    info!("listening on {}", &addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await
        .expect("Server failed.");

    cancel.cancel();
    let _ = heartbeat.await;
    info!("shut down");
}

async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Could not install Ctrl+C handler.");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Could not install signal handler.")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
    cancel.cancel();
}

fn get_port() -> u16 {
    match env::var("PORT").map(|port| port.parse::<u16>()) {
        Ok(Ok(port)) => port,
        _ => 8000,
    }
}

fn get_companies() -> HashMap<String, String> {
    let companies = env::var("NAV_COMPANIES").unwrap_or_default();
    parse_companies(&companies).expect("Invalid NAV_COMPANIES.")
}

fn get_greeting_company() -> String {
    env::var("NAV_GREETING_COMPANY").unwrap_or_else(|_| DEFAULT_GREETING_COMPANY.to_string())
}

fn get_timeout_minutes() -> u64 {
    let timeout = env::var("NAV_TIMEOUT_MINUTES").map(|timeout| timeout.parse::<u64>());
    match timeout {
        Ok(Ok(timeout)) if timeout > 0 => timeout.min(MAX_TIMEOUT_MINUTES),
        _ => DEFAULT_TIMEOUT_MINUTES,
    }
}

fn get_credentials() -> CredentialSettings {
    let mode = env::var("NAV_AUTH").unwrap_or_else(|_| "windows".to_string());
    CredentialSettings::parse(&mode, env::var("NAV_USERNAME").ok(), env::var("NAV_PASSWORD").ok(), env::var("NAV_NEGOTIATE_TOKEN").ok()).expect("Invalid NAV_AUTH.")
}

fn get_pdf_settings() -> PdfPollSettings {
    let root = env::var("NAV_PDF_ROOT").unwrap_or_else(|_| "./pdf".to_string());
    let retries = match env::var("PDF_POLL_RETRIES").map(|retries| retries.parse::<u32>()) {
        Ok(Ok(retries)) if retries > 0 => retries,
        _ => DEFAULT_POLL_RETRIES,
    };
    let delay = match env::var("PDF_POLL_DELAY_MILLIS").map(|delay| delay.parse::<u64>()) {
        Ok(Ok(delay)) => delay,
        _ => DEFAULT_POLL_DELAY_MILLIS,
    };
    PdfPollSettings {
        root: PathBuf::from(root),
        retries,
        delay: Duration::from_millis(delay),
    }
}

fn get_heartbeat_interval() -> Duration {
    let interval = env::var("NAV_HEARTBEAT_SECONDS").map(|interval| interval.parse::<u64>());
    let interval = match interval {
        Ok(Ok(interval)) if interval > 0 => interval,
        _ => 60,
    };
    Duration::from_secs(interval)
}
