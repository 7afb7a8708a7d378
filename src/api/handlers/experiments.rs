use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::helpers::{ApiError, ApiResult};
use crate::api::types::CreateExperimentRequest;
use crate::api::ServerState;
use crate::dispatch::DispatchRequest;
use crate::registry::ProviderBinding;
use crate::store::Experiment;

pub async fn create_experiment(
    State(state): State<ServerState>,
    payload: Result<Json<CreateExperimentRequest>, JsonRejection>,
) -> ApiResult<Json<Experiment>> {
    let Json(req) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    log::info!(
        "Processing experiment for {} model(s): {:?}",
        req.models.len(),
        req.models
    );

    let request = DispatchRequest::new(req.prompt, req.models)
        .system_prompt(req.system_prompt.unwrap_or_default());
    let experiment = state.service.run(request).await?;
    Ok(Json(experiment))
}

pub async fn list_experiments(State(state): State<ServerState>) -> ApiResult<Json<Vec<Experiment>>> {
    Ok(Json(state.service.experiments().await?))
}

pub async fn list_models(State(state): State<ServerState>) -> Json<Vec<ProviderBinding>> {
    Json(state.service.models().into_iter().cloned().collect())
}
