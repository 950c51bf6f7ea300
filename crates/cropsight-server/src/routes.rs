//! warp routes over the change-report pipeline
//!
//! Error mapping: an unknown farmer is a success-shaped outcome (empty JSON
//! report, or 404 for the raw snapshot); any fatal pipeline failure becomes
//! a 502 with a small JSON error body naming the failed stage.

use cropsight_core::{ChangePipeline, PipelineError};
use serde::Deserialize;
use std::convert::Infallible;
use warp::http::header::CONTENT_TYPE;
use warp::http::{HeaderValue, StatusCode};
use warp::hyper::Body;
use warp::{Filter, Rejection, Reply};

/// Query parameters shared by both report endpoints
#[derive(Debug, Deserialize)]
struct FarmerQuery {
    #[serde(rename = "farmerId")]
    farmer_id: String,
}

/// Build the full route tree over one pipeline
pub fn routes(
    pipeline: ChangePipeline,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let process_image = warp::path("process-image")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<FarmerQuery>())
        .and(with_pipeline(pipeline.clone()))
        .and_then(process_image);

    let snapshot = warp::path("snapshot")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<FarmerQuery>())
        .and(with_pipeline(pipeline))
        .and_then(snapshot);

    let healthz = warp::path("healthz")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| "ok");

    process_image.or(snapshot).or(healthz)
}

fn with_pipeline(
    pipeline: ChangePipeline,
) -> impl Filter<Extract = (ChangePipeline,), Error = Infallible> + Clone {
    warp::any().map(move || pipeline.clone())
}

async fn process_image(
    query: FarmerQuery,
    pipeline: ChangePipeline,
) -> Result<warp::reply::Response, Infallible> {
    match pipeline.run(&query.farmer_id).await {
        Ok(report) => Ok(warp::reply::json(&report).into_response()),
        Err(error) => Ok(error_response(&error)),
    }
}

async fn snapshot(
    query: FarmerQuery,
    pipeline: ChangePipeline,
) -> Result<warp::reply::Response, Infallible> {
    match pipeline.snapshot(&query.farmer_id).await {
        Ok(Some(image)) => Ok(png_response(image.bytes)),
        Ok(None) => Ok(warp::reply::with_status(
            "no boundary found for the given farmerId",
            StatusCode::NOT_FOUND,
        )
        .into_response()),
        Err(error) => Ok(error_response(&error)),
    }
}

fn png_response(bytes: Vec<u8>) -> warp::reply::Response {
    let mut response = warp::reply::Response::new(Body::from(bytes));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
    response
}

fn error_response(error: &PipelineError) -> warp::reply::Response {
    tracing::error!(stage = error.stage(), %error, "pipeline run failed");
    let body = serde_json::json!({
        "error": error.to_string(),
        "stage": error.stage(),
    });
    warp::reply::with_status(warp::reply::json(&body), StatusCode::BAD_GATEWAY).into_response()
}
