// Presentation layer - HTTP shell adapter around the advice pipeline
pub mod app_state;
pub mod handlers;
pub mod navigation;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    ask_question, faucet_analysis, farmer_advice, health_check, navigate, residential_advice,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/faucets/analysis", get(faucet_analysis))
        .route("/faucets/questions", post(ask_question))
        .route("/advice/residential", post(residential_advice))
        .route("/advice/farmer", post(farmer_advice))
        .route("/navigation", post(navigate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
