// HTTP request handlers
use crate::domain::advice::{AdviceResponse, FaucetReport};
use crate::domain::error::AdviceError;
use crate::domain::profile::{FarmerProfile, ResidentialProfile};
use crate::infrastructure::http_response::ApiError;
use crate::presentation::app_state::AppState;
use crate::presentation::navigation::{Flow, NavAction, Page};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    pub answer: AdviceResponse,
}

#[derive(Serialize)]
pub struct AdviceBody {
    pub advice: AdviceResponse,
}

#[derive(Deserialize)]
pub struct NavigationRequest {
    #[serde(default)]
    pub page: Page,
    pub action: NavAction,
}

#[derive(Serialize)]
pub struct NavigationResponse {
    pub page: Page,
    pub title: &'static str,
    pub flow: Option<Flow>,
}

/// Body decoding failures go through `ApiError` like every other failure.
fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError(AdviceError::InvalidRequest(rejection.body_text())))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Aggregates, insights and advice for the configured usage file
pub async fn faucet_analysis(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FaucetReport>, ApiError> {
    let report = state.analytics_service.analyze().await?;
    Ok(Json(report))
}

pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let request = decode(payload)?;
    let answer = state.analytics_service.ask(&request.question).await?;
    Ok(Json(AnswerResponse { answer }))
}

pub async fn residential_advice(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ResidentialProfile>, JsonRejection>,
) -> Result<Json<AdviceBody>, ApiError> {
    let profile = decode(payload)?;
    let advice = state.profile_service.residential_advice(profile).await?;
    Ok(Json(AdviceBody { advice }))
}

pub async fn farmer_advice(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FarmerProfile>, JsonRejection>,
) -> Result<Json<AdviceBody>, ApiError> {
    let profile = decode(payload)?;
    let advice = state.profile_service.farmer_advice(profile).await?;
    Ok(Json(AdviceBody { advice }))
}

/// Next page for a navigation action. Stateless: the caller holds the current page.
pub async fn navigate(
    payload: Result<Json<NavigationRequest>, JsonRejection>,
) -> Result<Json<NavigationResponse>, ApiError> {
    let request = decode(payload)?;
    let page = request.page.apply(request.action);
    Ok(Json(NavigationResponse {
        page,
        title: page.title(),
        flow: page.flow(),
    }))
}
