//! Stand-in for a NAV codeunit web service, for running the proxy locally.

use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::post, Router};
use common::models::NavOperation;
use common::nav::soap::{build_fault, build_response, parse_request};
use std::env;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use tracing::info;

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt().json().finish();
    tracing::subscriber::set_global_default(subscriber).expect("Could not init tracing.");

    let app = Router::new().route("/*path", post(codeunit));

    let port = env::var("FAKE_NAV_PORT").ok().and_then(|port| port.parse::<u16>().ok()).unwrap_or(7649);
    let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)), port);
    info!("listening on {}", &addr);
    axum::Server::bind(&addr).serve(app.into_make_service()).await.unwrap();
}

/// Serves `/{instance}/WS/{company}/Codeunit/{codeunit}`.
pub async fn codeunit(Path(path): Path<String>, body: String) -> impl IntoResponse {
    let codeunit = path.rsplit('/').next().unwrap_or_default().to_string();
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(err) => return soap(StatusCode::BAD_REQUEST, build_fault("a:BadRequest", &err.to_string())),
    };
    info!("{} called on {}", &request.operation, &path);

    let parameter = |name: &str| request.parameters.get(name).cloned().unwrap_or_default();
    match NavOperation::from_name(&request.operation) {
        Some(operation @ NavOperation::HelloWorld) => soap(StatusCode::OK, build_response(&codeunit, operation, &format!("Hello {}!", parameter("inputText")))),
        Some(operation @ NavOperation::StartJob) => {
            let job_id = parameter("jobId");
            info!("StartJob {} with {}", &job_id, parameter("inputJson"));
            soap(StatusCode::OK, build_response(&codeunit, operation, &format!("Job {} started", job_id)))
        }
        Some(operation @ NavOperation::CheckJob) => match parameter("jobId").as_str() {
            "X999" => soap(StatusCode::INTERNAL_SERVER_ERROR, build_fault("a:Microsoft.Dynamics.Nav.Types.Exceptions.NavCSideException", "Job X999 does not exist.")),
            job_id => soap(StatusCode::OK, build_response(&codeunit, operation, &format!("Job {} finished", job_id))),
        },
        None => soap(
            StatusCode::INTERNAL_SERVER_ERROR,
            build_fault("a:ActionNotSupported", &format!("Operation {} is not supported", &request.operation)),
        ),
    }
}

fn soap(status: StatusCode, body: String) -> (StatusCode, [(&'static str, &'static str); 1], String) {
    (status, [("content-type", "text/xml; charset=utf-8")], body)
}
