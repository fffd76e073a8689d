use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use bar_optimizer::{CutError, CuttingPlan, DemandLine, OptimizeParams, Solver};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct OptimizeRequest {
    demand: Vec<DemandLine>,
    #[serde(default)]
    params: OptimizeParams,
}

fn error_status(err: &CutError) -> StatusCode {
    match err {
        CutError::Validation(_) | CutError::NoCandidate => StatusCode::BAD_REQUEST,
        CutError::InfeasibleItem { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

async fn optimize(
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<CuttingPlan>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /optimize"
    );

    let solver = Solver::new(req.params, req.demand);
    let plan = solver
        .solve()
        .map_err(|e| (error_status(&e), e.to_string()))?;

    Ok(Json(plan))
}

#[tokio::main]
async fn main() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/optimize", post(optimize))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
