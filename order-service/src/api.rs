use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use shared::*;
use std::sync::Arc;

use crate::service::OrderService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OrderService>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub product_id: String,
    pub quantity: i32,
    pub customer_id: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize)]
pub struct OrderTotalResponse {
    pub order_id: String,
    pub total: BigDecimal,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: OrderError) -> ApiError {
    let status = match &err {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        OrderError::InvalidOrder(_) => StatusCode::BAD_REQUEST,
        OrderError::InsufficientStock { .. } => StatusCode::CONFLICT,
        OrderError::Repository(e) => {
            tracing::error!("Storage failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse { error: err.to_string() }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/cancel", post(cancel_order))
        .route("/orders/:id/total", get(order_total))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state
        .service
        .create_order_with_items(
            &request.product_id,
            request.quantity,
            &request.customer_id,
            request.items,
        )
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = state.service.get_order(&order_id).await.map_err(error_response)?;
    Ok(Json(order))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = state.service.cancel_order(&order_id).await.map_err(error_response)?;
    Ok(Json(order))
}

pub async fn order_total(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderTotalResponse>, ApiError> {
    let total = state
        .service
        .calculate_order_total(&order_id)
        .await
        .map_err(error_response)?;

    Ok(Json(OrderTotalResponse { order_id, total }))
}

pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryOrderRepository;
    use axum::body::Body;
    use axum::http::Request;
    use inventory_service::InMemoryInventory;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(inventory: Arc<InMemoryInventory>) -> Router {
        let service = OrderService::new(inventory, Arc::new(InMemoryOrderRepository::new()));
        create_router(AppState {
            service: Arc::new(service),
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn given_stock_when_post_order_should_return_created_order() {
        let inventory = Arc::new(InMemoryInventory::with_stock([("PROD-A", 10)]));
        let app = app(inventory.clone());

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(json!({"product_id": "PROD-A", "quantity": 4, "customer_id": "CUST-001"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "ORD-001");
        assert_eq!(body["status"], "CREATED");
        assert_eq!(inventory.get_stock("PROD-A").await.unwrap(), 6);
    }

    #[tokio::test]
    async fn given_zero_quantity_when_post_order_should_return_bad_request() {
        let app = app(Arc::new(InMemoryInventory::with_stock([("PROD-A", 10)])));

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(json!({"product_id": "PROD-A", "quantity": 0, "customer_id": "CUST-001"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Quantity must be positive"));
    }

    #[tokio::test]
    async fn given_short_stock_when_post_order_should_return_conflict() {
        let app = app(Arc::new(InMemoryInventory::with_stock([("PROD-A", 3)])));

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(json!({"product_id": "PROD-A", "quantity": 10, "customer_id": "CUST-001"})),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("PROD-A"));
    }

    #[tokio::test]
    async fn given_created_order_when_cancel_twice_should_release_once_then_refuse() {
        let inventory = Arc::new(InMemoryInventory::with_stock([("PROD-A", 10)]));
        let app = app(inventory.clone());
        send(
            &app,
            "POST",
            "/orders",
            Some(json!({"product_id": "PROD-A", "quantity": 4, "customer_id": "CUST-001"})),
        )
        .await;

        let (status, body) = send(&app, "POST", "/orders/ORD-001/cancel", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "CANCELLED");
        assert_eq!(inventory.get_stock("PROD-A").await.unwrap(), 10);

        let (status, _) = send(&app, "POST", "/orders/ORD-001/cancel", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(inventory.get_stock("PROD-A").await.unwrap(), 10);
    }

    #[tokio::test]
    async fn given_unknown_order_when_requested_should_return_not_found() {
        let app = app(Arc::new(InMemoryInventory::new()));

        let (status, _) = send(&app, "GET", "/orders/ORD-999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "POST", "/orders/ORD-999/cancel", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Order not found"));

        let (status, _) = send(&app, "GET", "/orders/ORD-999/total", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn given_order_with_items_when_get_total_should_return_discounted_amount() {
        let app = app(Arc::new(InMemoryInventory::with_stock([("PROD-A", 10)])));
        send(
            &app,
            "POST",
            "/orders",
            Some(json!({
                "product_id": "PROD-A",
                "quantity": 1,
                "customer_id": "CUST-001",
                "items": [{"product_id": "A", "quantity": 10, "unit_price": "150.00"}]
            })),
        )
        .await;

        let (status, body) = send(&app, "GET", "/orders/ORD-001/total", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["order_id"], "ORD-001");
        assert_eq!(body["total"], "1350.00");
    }

    #[tokio::test]
    async fn given_running_service_when_health_checked_should_answer_ok() {
        let app = app(Arc::new(InMemoryInventory::new()));

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
