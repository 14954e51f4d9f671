//! Application builder: wires router, middleware and state into an Axum app.

use std::future::Future;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use trialgate_core::error::{AppError, ErrorKind};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn serve(
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), AppError> {
    let addr = state.config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Io, format!("Failed to bind {addr}"), e))?;

    info!(address = %addr, "TrialGate server listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use plugin_trial_promo::TrialPromoPlugin;
    use trialgate_core::config::AppConfig;
    use trialgate_core::types::id::{ClientId, ProductId};
    use trialgate_core::types::status::HostingStatus;
    use trialgate_database::MemoryHostingHistory;
    use trialgate_entity::hosting::HostingRecord;
    use trialgate_plugin::manager::PluginManager;

    use super::*;

    fn record(userid: i64, status: HostingStatus) -> HostingRecord {
        HostingRecord {
            id: userid,
            userid: ClientId::new(userid),
            packageid: ProductId::new(7),
            domainstatus: status,
            email: None,
        }
    }

    async fn app(history: MemoryHostingHistory) -> Router {
        let config: AppConfig = serde_json::from_value(json!({
            "database": { "url": "mysql://localhost/whmcs" },
            "trial_promo": { "product_id": 7 }
        }))
        .unwrap();

        let mut plugin = TrialPromoPlugin::new();
        plugin
            .initialize(config.trial_promo.clone(), Arc::new(history))
            .unwrap();

        let manager = Arc::new(PluginManager::new());
        manager.load_plugin(plugin.export().unwrap()).await.unwrap();

        build_app(AppState::new(Arc::new(config), manager, None))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_checkout_rejected_for_repeat_trial() {
        let app = app(MemoryHostingHistory::new(vec![record(1, HostingStatus::Terminated)])).await;

        let (status, body) = post_json(
            app,
            "/api/hooks/shopping-cart-validate-checkout",
            json!({"clientId": 1, "promocode": "AGAIN", "cart": [{"pid": 7}]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"errors": ["You cannot use a promo code for this trial product again."]})
        );
    }

    #[tokio::test]
    async fn test_checkout_accepted_with_promo() {
        let app = app(MemoryHostingHistory::default()).await;

        let (status, body) = post_json(
            app,
            "/api/hooks/shopping-cart-validate-checkout",
            json!({"clientId": "2", "promocode": "ABC", "cart": [{"pid": "7"}]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"errors": []}));
    }

    #[tokio::test]
    async fn test_checkout_null_cart_proceeds() {
        let app = app(MemoryHostingHistory::new(vec![record(1, HostingStatus::Active)])).await;

        let (status, body) = post_json(
            app,
            "/api/hooks/shopping-cart-validate-checkout",
            json!({"clientId": 1, "promocode": "", "cart": null}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"errors": []}));
    }

    #[tokio::test]
    async fn test_checkout_non_array_cart_blocked_by_closed_policy() {
        let app = app(MemoryHostingHistory::default()).await;

        let (status, body) = post_json(
            app,
            "/api/hooks/shopping-cart-validate-checkout",
            json!({"clientId": 1, "promocode": "ABC", "cart": "7"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"errors": ["We could not verify trial eligibility right now. Please try again later."]})
        );
    }

    #[tokio::test]
    async fn test_checkout_scalar_line_is_not_a_product() {
        let app = app(MemoryHostingHistory::new(vec![record(1, HostingStatus::Active)])).await;

        let (status, body) = post_json(
            app,
            "/api/hooks/shopping-cart-validate-checkout",
            json!({"clientId": 1, "promocode": "", "cart": [50, {"pid": 7}]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"errors": ["You cannot use a promo code for this trial product again."]})
        );
    }

    #[tokio::test]
    async fn test_head_output() {
        let app = app(MemoryHostingHistory::default()).await;

        let (status, body) = post_json(
            app.clone(),
            "/api/hooks/admin-area-head-output",
            json!({"filename": "configproducts"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["output"].as_str().unwrap().contains("[7]"));

        let (_, body) = post_json(
            app,
            "/api/hooks/admin-area-head-output",
            json!({"filename": "clientsservices"}),
        )
        .await;
        assert_eq!(body, json!({"output": null}));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app(MemoryHostingHistory::default()).await;

        let (status, body) = post_json(
            app,
            "/api/hooks/admin-area-head-output",
            json!({"filename": ""}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_health_without_database() {
        let app = app(MemoryHostingHistory::default()).await;

        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "not_configured");
        assert_eq!(body["plugins"], 1);
    }
}
