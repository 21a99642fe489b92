use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::dtos::{RootDto, RootLinks};
use common::util::consts::{NAME, VERSION};

pub fn create_route() -> Router {
    Router::new().route("/", get(root_links)).route("/health", get(health))
}

pub async fn root_links() -> Json<RootDto<'static>> {
    Json(RootDto {
        version: VERSION,
        name: NAME,
        _links: RootLinks {
            hello_world: "/api/nav/helloworld",
            start_job: "/api/nav/startjob",
            check_job: "/api/nav/checkjob",
            job_pdf: "/api/nav/job/pdf",
        },
    })
}

#[tracing::instrument]
pub async fn health() -> StatusCode {
    StatusCode::OK
}
