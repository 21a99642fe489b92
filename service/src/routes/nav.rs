use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    BoxError, Json, Router,
};
use common::{
    dtos::{ErrorDto, HelloWorldRequestDto, JobRequestDto, PdfDto, ResultDto, StartJobRequestDto},
    error::NavError,
};
use tracing::{error, info, warn};

use crate::state::Services;

pub fn create_route(services: Services) -> Router {
    Router::new()
        .route("/api/nav/helloworld", post(hello_world))
        .route("/api/nav/startjob", post(start_job))
        .route("/api/nav/checkjob", post(check_job))
        .route("/api/nav/job/pdf", post(job_pdf))
        .with_state(services)
}

pub type ErrorResponse = (StatusCode, Json<ErrorDto>);

/// Maps a failure to its status code and `{Error, Details}` body.
pub fn error_response(context: &str, err: NavError) -> ErrorResponse {
    let (status, message) = match &err {
        NavError::UnknownCompany(_) | NavError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
        NavError::ArtifactNotFound(_) => (StatusCode::NOT_FOUND, "PDF not found"),
        NavError::ArtifactLocked(_) => (StatusCode::SERVICE_UNAVAILABLE, "PDF is still being generated"),
        NavError::RemoteInvocation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to call NAV service"),
        NavError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read PDF"),
        NavError::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "NAV proxy is misconfigured"),
    };
    if status.is_server_error() {
        error!("{}: {}", context, &err);
    } else {
        warn!("{}: {}", context, &err);
    }
    (
        status,
        Json(ErrorDto {
            error: message.to_string(),
            details: err.to_string(),
        }),
    )
}

/// Unreadable bodies and wrong content types get the same error shape as everything else.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ErrorResponse> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => Err(error_response("Rejected request body", NavError::InvalidInput(rejection.body_text()))),
    }
}

/// Error handler for the timeout layer in front of the routes.
pub async fn handle_timeout(err: BoxError) -> ErrorResponse {
    let (status, message) = if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Unhandled internal error")
    };
    error!("{}: {}", message, &err);
    (
        status,
        Json(ErrorDto {
            error: message.to_string(),
            details: err.to_string(),
        }),
    )
}

#[tracing::instrument(skip(services, payload))]
pub async fn hello_world(State(services): State<Services>, payload: Result<Json<HelloWorldRequestDto>, JsonRejection>) -> Result<Json<ResultDto>, ErrorResponse> {
    let request = body(payload)?;
    info!("Received HelloWorld request with input: {}", &request.input_text);
    match services.nav_service.hello_world(&request.input_text).await {
        Ok(result) => Ok(Json(ResultDto { result })),
        Err(err) => Err(error_response("Error calling NAV HelloWorld", err)),
    }
}

#[tracing::instrument(skip(services, payload))]
pub async fn start_job(State(services): State<Services>, payload: Result<Json<StartJobRequestDto>, JsonRejection>) -> Result<Json<ResultDto>, ErrorResponse> {
    let request = body(payload)?;
    info!("Received StartJob request with jobId: {} for {}", &request.job_id, &request.company_name);
    match services.nav_service.start_job(&request.job_id, &request.company_name, &request.input_json).await {
        Ok(result) => Ok(Json(ResultDto { result })),
        Err(err) => Err(error_response("Error calling NAV StartJob", err)),
    }
}

#[tracing::instrument(skip(services, payload))]
pub async fn check_job(State(services): State<Services>, payload: Result<Json<JobRequestDto>, JsonRejection>) -> Result<Json<ResultDto>, ErrorResponse> {
    let request = body(payload)?;
    info!("Received CheckJob request with jobId: {} for {}", &request.job_id, &request.company_name);
    match services.nav_service.check_job(&request.job_id, &request.company_name).await {
        Ok(result) => Ok(Json(ResultDto { result })),
        Err(err) => Err(error_response("Error calling NAV CheckJob", err)),
    }
}

#[tracing::instrument(skip(services, payload))]
pub async fn job_pdf(State(services): State<Services>, payload: Result<Json<JobRequestDto>, JsonRejection>) -> Result<Json<PdfDto>, ErrorResponse> {
    let request = body(payload)?;
    info!("Received PDF request with jobId: {} for {}", &request.job_id, &request.company_name);
    match services.pdf_service.get_pdf(&request.job_id, &request.company_name).await {
        Ok(artifact) => Ok(Json(PdfDto::from(artifact))),
        Err(err) => Err(error_response("Error reading job PDF", err)),
    }
}
