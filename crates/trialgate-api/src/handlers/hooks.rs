//! Hook endpoints called by the hosting platform.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::debug;
use validator::Validate;

use crate::dto::request::{AdminHeadOutputRequest, ValidateCheckoutRequest};
use crate::dto::response::{HeadOutputResponse, ValidateCheckoutResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/hooks/shopping-cart-validate-checkout
pub async fn validate_checkout(
    State(state): State<AppState>,
    body: Result<Json<ValidateCheckoutRequest>, JsonRejection>,
) -> Result<Json<ValidateCheckoutResponse>, ApiError> {
    let Json(request) = body?;
    let payload = request.into_payload();

    let result = state.plugin_manager.dispatcher().dispatch(&payload).await;
    debug!(
        invocation_id = %payload.invocation_id,
        halted = result.halted,
        "Checkout validation dispatched"
    );

    Ok(Json(result.into()))
}

/// POST /api/hooks/admin-area-head-output
pub async fn admin_head_output(
    State(state): State<AppState>,
    body: Result<Json<AdminHeadOutputRequest>, JsonRejection>,
) -> Result<Json<HeadOutputResponse>, ApiError> {
    let Json(request) = body?;
    request.validate()?;

    let result = state
        .plugin_manager
        .dispatcher()
        .dispatch(&request.into_payload())
        .await;

    Ok(Json(HeadOutputResponse {
        output: result.rendered_output(),
    }))
}
