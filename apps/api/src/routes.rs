//! # HTTP Routes
//!
//! ```text
//! POST   /expenses              add an expense
//! GET    /expenses              list expenses (oldest first, with splits)
//! GET    /expenses/people       list people (by name)
//! GET    /expenses/balances     net balance per person
//! GET    /expenses/settlements  settle-up plan
//! PUT    /expenses/{id}         replace an expense
//! DELETE /expenses/{id}         delete an expense
//! GET    /health                liveness + migration status
//! ```
//!
//! Every success is wrapped as `{ "success": true, "data": ..., "message": ... }`.
//! Failures use the [`ApiError`] envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::service::ExpenseService;
use divvy_core::{Balance, Expense, ExpenseRequest, Person, Settlement};

// =============================================================================
// Envelope
// =============================================================================

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// A success with no payload.
    pub fn message_only(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub migrations_total: usize,
    pub migrations_applied: usize,
}

type JsonResult<T> = ApiResult<Json<ApiResponse<T>>>;

// =============================================================================
// Router
// =============================================================================

/// Builds the application router.
pub fn router(service: ExpenseService) -> Router {
    Router::new()
        .route("/expenses", get(list_expenses).post(add_expense))
        .route("/expenses/people", get(list_people))
        .route("/expenses/balances", get(get_balances))
        .route("/expenses/settlements", get(get_settlements))
        .route("/expenses/{id}", put(update_expense).delete(delete_expense))
        .route("/health", get(health))
        .with_state(service)
}

// =============================================================================
// Handlers
// =============================================================================

/// Unwraps a JSON body, turning malformed input into a validation error.
fn body(payload: Result<Json<ExpenseRequest>, JsonRejection>) -> ApiResult<ExpenseRequest> {
    payload.map(|Json(request)| request).map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected request body");
        ApiError::validation(rejection.body_text())
    })
}

async fn add_expense(
    State(service): State<ExpenseService>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> JsonResult<Expense> {
    let request = body(payload)?;
    let expense = service.add_expense(&request).await?;
    Ok(Json(ApiResponse::ok(expense).with_message("Expense added successfully")))
}

async fn update_expense(
    State(service): State<ExpenseService>,
    Path(id): Path<String>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> JsonResult<Expense> {
    let request = body(payload)?;
    let expense = service.update_expense(&id, &request).await?;
    Ok(Json(ApiResponse::ok(expense).with_message("Expense updated successfully")))
}

async fn delete_expense(State(service): State<ExpenseService>, Path(id): Path<String>) -> JsonResult<()> {
    service.delete_expense(&id).await?;
    Ok(Json(ApiResponse::message_only("Expense deleted successfully")))
}

async fn list_expenses(State(service): State<ExpenseService>) -> JsonResult<Vec<Expense>> {
    Ok(Json(ApiResponse::ok(service.list_expenses().await?)))
}

async fn list_people(State(service): State<ExpenseService>) -> JsonResult<Vec<Person>> {
    Ok(Json(ApiResponse::ok(service.list_people().await?)))
}

async fn get_balances(State(service): State<ExpenseService>) -> JsonResult<Vec<Balance>> {
    Ok(Json(ApiResponse::ok(service.get_balances().await?)))
}

async fn get_settlements(State(service): State<ExpenseService>) -> JsonResult<Vec<Settlement>> {
    Ok(Json(ApiResponse::ok(service.get_settlements().await?)))
}

async fn health(State(service): State<ExpenseService>) -> JsonResult<HealthStatus> {
    let db = service.database();
    if !db.health_check().await {
        return Err(ApiError::internal("Database unavailable"));
    }

    let (total, applied) = db.migration_status().await?;
    Ok(Json(ApiResponse::ok(HealthStatus {
        status: "ok",
        migrations_total: total,
        migrations_applied: applied,
    })))
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use divvy_db::{Database, DbConfig};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        router(ExpenseService::new(db))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn dinner() -> Value {
        json!({
            "description": "Dinner",
            "amount": 90.00,
            "paidBy": "Alice",
            "participants": ["Alice", "Bob", "Carol"],
            "splitType": "EQUAL"
        })
    }

    #[tokio::test]
    async fn test_add_then_balances_and_settlements() {
        let app = app().await;

        let (status, body) = send(&app, "POST", "/expenses", Some(dinner())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Expense added successfully");
        let amount: Decimal = body["data"]["amount"].as_str().unwrap().parse().unwrap();
        assert_eq!(amount, dec!(90));
        assert_eq!(body["data"]["splitPolicy"], "EQUAL");
        assert_eq!(body["data"]["splits"][1]["amountOwed"], "30.00");

        let (status, body) = send(&app, "GET", "/expenses/balances", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!([
                { "name": "Alice", "netBalance": "60.00" },
                { "name": "Bob", "netBalance": "-30.00" },
                { "name": "Carol", "netBalance": "-30.00" }
            ])
        );

        let (_, body) = send(&app, "GET", "/expenses/settlements", None).await;
        assert_eq!(
            body["data"],
            json!([
                { "from": "Bob", "to": "Alice", "amount": "30.00" },
                { "from": "Carol", "to": "Alice", "amount": "30.00" }
            ])
        );
    }

    #[tokio::test]
    async fn test_validation_error_envelope() {
        let app = app().await;
        let request = json!({
            "description": "Hotel",
            "amount": 100,
            "paidBy": "Alice",
            "participants": ["Alice", "Bob"],
            "splitType": "EXACT",
            "shareValues": [100]
        });

        let (status, body) = send(&app, "POST", "/expenses", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_oversized_amount_is_rejected_and_reads_still_work() {
        let app = app().await;
        let mut request = dinner();
        request["amount"] = json!(Decimal::MAX.to_string());

        let (status, body) = send(&app, "POST", "/expenses", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, body) = send(&app, "GET", "/expenses/balances", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));

        let (status, _) = send(&app, "GET", "/expenses/settlements", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let app = app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/expenses")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = app().await;
        let (_, created) = send(&app, "POST", "/expenses", Some(dinner())).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let mut changed = dinner();
        changed["amount"] = json!(60);
        changed["participants"] = json!(["Alice", "Bob"]);
        let (status, body) = send(&app, "PUT", &format!("/expenses/{id}"), Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Expense updated successfully");
        assert_eq!(body["data"]["splits"].as_array().unwrap().len(), 2);

        let (status, body) = send(&app, "DELETE", &format!("/expenses/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "message": "Expense deleted successfully" }));

        let (_, body) = send(&app, "GET", "/expenses", None).await;
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_id_is_404() {
        let app = app().await;

        let (status, body) = send(&app, "PUT", "/expenses/missing", Some(dinner())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");

        let (status, _) = send(&app, "DELETE", "/expenses/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_people_listing() {
        let app = app().await;
        send(&app, "POST", "/expenses", Some(dinner())).await;

        let (status, body) = send(&app, "GET", "/expenses/people", None).await;
        assert_eq!(status, StatusCode::OK);

        let names: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["migrationsTotal"], body["data"]["migrationsApplied"]);
    }
}
