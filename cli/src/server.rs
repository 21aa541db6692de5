use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use mealplan_core::error::MealPlanError;
use mealplan_core::models::{AddMealOutcome, Ingredient, MealDetail, MealInput, MealSummary};
use mealplan_core::service::MealPlanner;
use mealplan_core::shopping::{self, ShoppingItem};
use mealplan_core::vocab::{CategoryInfo, UnitInfo};

const BODY_LIMIT: usize = 1024 * 1024; // 1 MB

#[derive(Clone)]
struct AppState {
    planner: Arc<Mutex<MealPlanner>>,
    api_key: Option<String>,
}

impl AppState {
    fn planner(&self) -> MutexGuard<'_, MealPlanner> {
        self.planner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// --- Request / Response types ---

#[derive(Deserialize)]
struct ShoppingListRequest {
    meal_ids: Vec<i64>,
}

#[derive(Deserialize)]
struct ShoppingListQuery {
    format: Option<String>,
}

#[derive(Serialize)]
struct CleanupResponse {
    removed: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// --- Error handling ---

enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Internal(err) => {
                error!("Internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(domain) = err.downcast_ref::<MealPlanError>() {
            let message = domain.to_string();
            return match domain {
                MealPlanError::EmptyMealName | MealPlanError::InvalidIngredient(_) => {
                    Self::BadRequest(message)
                }
                MealPlanError::MealNotFound(_) => Self::NotFound(message),
                MealPlanError::DuplicateMealName(_) => Self::Conflict(message),
            };
        }
        Self::Internal(err)
    }
}

/// Decode a meal body by hand so malformed ingredient entries are a 400, not
/// axum's 422.
fn parse_meal_input(body: serde_json::Value) -> Result<MealInput, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::BadRequest(format!("Invalid meal: {e}")))
}

// --- Middleware ---

async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(ref expected_key) = state.api_key {
        let authorized = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == expected_key);

        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid or missing API key".to_string(),
                }),
            )
                .into_response();
        }
    }
    next.run(request).await
}

async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static("default-src 'none'"),
    );
    response
}

// --- Meals ---

async fn list_meals(State(state): State<AppState>) -> Result<Json<Vec<MealSummary>>, ApiError> {
    let meals = state.planner().list_meals().context("database error")?;
    Ok(Json(meals))
}

async fn create_meal(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<AddMealOutcome>), ApiError> {
    let meal = parse_meal_input(body)?;
    let outcome = state.planner().add_meal(&meal)?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome)))
}

async fn get_meal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MealDetail>, ApiError> {
    state
        .planner()
        .get_meal_detail(id)
        .context("database error")?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Meal {id} not found")))
}

async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<MealDetail>, ApiError> {
    let meal = parse_meal_input(body)?;
    let planner = state.planner();
    planner.update_meal(id, &meal)?;
    planner
        .get_meal_detail(id)
        .context("database error")?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Meal {id} not found")))
}

async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.planner().delete_meal(id).context("database error")? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Meal {id} not found")))
    }
}

// --- Ingredients ---

async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let ingredients = state
        .planner()
        .list_ingredients()
        .context("database error")?;
    Ok(Json(ingredients))
}

async fn cleanup_ingredients(
    State(state): State<AppState>,
) -> Result<Json<CleanupResponse>, ApiError> {
    let removed = state
        .planner()
        .cleanup_unused_ingredients()
        .context("database error")?;
    Ok(Json(CleanupResponse { removed }))
}

// --- Shopping list ---

async fn shopping_list(
    State(state): State<AppState>,
    Query(query): Query<ShoppingListQuery>,
    Json(req): Json<ShoppingListRequest>,
) -> Result<Response, ApiError> {
    let items: Vec<ShoppingItem> = state
        .planner()
        .generate_shopping_list(&req.meal_ids)
        .context("database error")?;

    match query.format.as_deref().unwrap_or("json") {
        "json" => Ok(Json(items).into_response()),
        "text" => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            shopping::render_text(&items),
        )
            .into_response()),
        "csv" => {
            let mut out = Vec::new();
            shopping::write_csv(&items, &mut out).context("failed to write CSV")?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"shopping_list.csv\"",
                    ),
                ],
                out,
            )
                .into_response())
        }
        other => Err(ApiError::BadRequest(format!(
            "Unknown format '{other}'. Use json, text, or csv"
        ))),
    }
}

// --- Vocabularies ---

async fn list_units(State(state): State<AppState>) -> Json<Vec<UnitInfo>> {
    Json(state.planner().units())
}

async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryInfo>> {
    Json(state.planner().categories())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/meals", get(list_meals).post(create_meal))
        .route(
            "/api/meals/{id}",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
        .route("/api/ingredients", get(list_ingredients))
        .route("/api/ingredients/cleanup", post(cleanup_ingredients))
        .route("/api/shopping-list", post(shopping_list))
        .route("/api/units", get(list_units))
        .route("/api/categories", get(list_categories))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(middleware::from_fn(security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// --- Server startup ---

pub async fn start_server(
    planner: MealPlanner,
    port: u16,
    bind: &str,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    let state = AppState {
        planner: Arc::new(Mutex::new(planner)),
        api_key: api_key.clone(),
    };

    let app = build_router(state);

    if let Some(ref key) = api_key {
        eprintln!(
            "API key: {} (see api_key file in data directory)",
            mask_key(key)
        );
    } else {
        eprintln!("Warning: Authentication disabled (--no-auth). API is open to anyone.");
    }

    if bind != "127.0.0.1" && bind != "localhost" && api_key.is_none() {
        warn!(bind, "listening on a non-local address with no authentication");
    }

    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}"))
        .await
        .with_context(|| format!("Failed to bind {bind}:{port}"))?;
    info!("Listening on http://{bind}:{port}");
    eprintln!("Listening on http://{bind}:{port}");
    axum::serve(listener, app).await?;

    Ok(())
}

/// First and last four characters of the key, e.g. `ab12...ef90`.
fn mask_key(key: &str) -> String {
    let head: String = key.chars().take(4).collect();
    let skip = key.chars().count().saturating_sub(4);
    let tail: String = key.chars().skip(skip).collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use mealplan_core::models::IngredientEntry;
    use tower::ServiceExt;

    fn test_state(api_key: Option<String>) -> AppState {
        AppState {
            planner: Arc::new(Mutex::new(MealPlanner::new_in_memory().unwrap())),
            api_key,
        }
    }

    fn test_app(api_key: Option<String>) -> Router {
        build_router(test_state(api_key))
    }

    fn seed_meal(state: &AppState, name: &str, entries: &[&str]) -> i64 {
        let ingredients = entries
            .iter()
            .map(|e| IngredientEntry::parse(e).unwrap())
            .collect();
        state
            .planner()
            .add_meal(&MealInput::named(name).with_ingredients(ingredients))
            .unwrap()
            .id
    }

    fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn auth_missing_key_returns_401() {
        let app = test_app(Some("test-key-abc123".to_string()));

        let response = app
            .oneshot(
                axum::http::Request::get("/api/meals")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid or missing API key");
    }

    #[tokio::test]
    async fn auth_wrong_key_returns_401() {
        let app = test_app(Some("test-key-abc123".to_string()));

        let response = app
            .oneshot(
                axum::http::Request::get("/api/meals")
                    .header("Authorization", "Bearer wrong-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn auth_correct_key_succeeds() {
        let app = test_app(Some("test-key-abc123".to_string()));

        let response = app
            .oneshot(
                axum::http::Request::get("/api/meals")
                    .header("Authorization", "Bearer test-key-abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn security_headers_present() {
        let app = test_app(None);

        let response = app
            .oneshot(
                axum::http::Request::get("/api/units")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
        assert_eq!(
            response.headers().get("content-security-policy").unwrap(),
            "default-src 'none'"
        );
    }

    #[tokio::test]
    async fn security_headers_on_auth_failure() {
        let app = test_app(Some("secret".to_string()));

        let response = app
            .oneshot(
                axum::http::Request::get("/api/meals")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn body_size_limit_rejects_oversized() {
        let app = test_app(None);

        let big_body = vec![0u8; BODY_LIMIT + 1];
        let response = app
            .oneshot(
                axum::http::Request::post("/api/meals")
                    .header("content-type", "application/json")
                    .body(Body::from(big_body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn internal_error_does_not_leak_details() {
        let error = ApiError::from(anyhow::anyhow!("secret database path /home/user/mealplan.db"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal server error");
        assert!(!json["error"].as_str().unwrap().contains("secret"));
    }

    #[tokio::test]
    async fn create_meal_returns_201_then_200() {
        let state = test_state(None);
        let body = serde_json::json!({
            "name": "Shakshuka",
            "description": "Eggs in tomato sauce",
            "ingredients": [
                ["eggs", 4, "piece", "fridge"],
                {"name": "chopped tomatoes", "quantity": 1, "unit": "can", "category": "cans"},
            ],
        });

        let first = build_router(state.clone())
            .oneshot(json_request("POST", "/api/meals", &body))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let first = body_json(first).await;
        assert_eq!(first["created"], true);

        let again = build_router(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/meals",
                &serde_json::json!({"name": "SHAKSHUKA"}),
            ))
            .await
            .unwrap();
        assert_eq!(again.status(), StatusCode::OK);
        let again = body_json(again).await;
        assert_eq!(again["created"], false);
        assert_eq!(again["id"], first["id"]);

        let id = first["id"].as_i64().unwrap();
        assert_eq!(state.planner().get_meal_ingredients(id).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_meal_invalid_entry_returns_400() {
        let state = test_state(None);
        let response = build_router(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/meals",
                &serde_json::json!({"name": "Toast", "ingredients": [["bread", 2]]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.planner().list_meals().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_meal_empty_name_returns_400() {
        let response = test_app(None)
            .oneshot(json_request(
                "POST",
                "/api/meals",
                &serde_json::json!({"name": "  "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "meal name must not be empty");
    }

    #[tokio::test]
    async fn get_meal_returns_detail() {
        let state = test_state(None);
        let id = seed_meal(&state, "Porridge", &["oats,80,g,dry food", "milk,250,ml,fridge"]);

        let response = build_router(state)
            .oneshot(
                axum::http::Request::get(format!("/api/meals/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["name"], "Porridge");
        assert_eq!(json["ingredients"].as_array().unwrap().len(), 2);
        assert_eq!(json["ingredients"][0]["ingredient_name"], "milk");
        assert_eq!(json["ingredients"][0]["category"], "FRIDGE");
    }

    #[tokio::test]
    async fn get_meal_missing_returns_404() {
        let response = test_app(None)
            .oneshot(
                axum::http::Request::get("/api/meals/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_meal_replaces_ingredients() {
        let state = test_state(None);
        let id = seed_meal(&state, "Soup", &["leek,2,piece", "potato,3,piece"]);

        let response = build_router(state.clone())
            .oneshot(json_request(
                "PUT",
                &format!("/api/meals/{id}"),
                &serde_json::json!({
                    "name": "Leek Soup",
                    "ingredients": [["leek", 3, "piece", "vegetables"]],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["name"], "Leek Soup");
        let lines = json["ingredients"].as_array().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["quantity"], 3.0);
    }

    #[tokio::test]
    async fn update_meal_missing_returns_404() {
        let response = test_app(None)
            .oneshot(json_request(
                "PUT",
                "/api/meals/42",
                &serde_json::json!({"name": "Ghost"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_meal_name_collision_returns_409() {
        let state = test_state(None);
        seed_meal(&state, "Tacos", &[]);
        let id = seed_meal(&state, "Nachos", &[]);

        let response = build_router(state)
            .oneshot(json_request(
                "PUT",
                &format!("/api/meals/{id}"),
                &serde_json::json!({"name": "tacos"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn delete_meal_then_404() {
        let state = test_state(None);
        let id = seed_meal(&state, "Salad", &["lettuce,1,head"]);

        let response = build_router(state.clone())
            .oneshot(
                axum::http::Request::delete(format!("/api/meals/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = build_router(state)
            .oneshot(
                axum::http::Request::delete(format!("/api/meals/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cleanup_reports_removed_count() {
        let state = test_state(None);
        let id = seed_meal(&state, "Tabbouleh", &["parsley,1,bunch", "bulgur,100,g"]);
        seed_meal(&state, "Pilaf", &["bulgur,200,g"]);
        state.planner().delete_meal(id).unwrap();

        let response = build_router(state.clone())
            .oneshot(
                axum::http::Request::post("/api/ingredients/cleanup")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["removed"], 1);

        let response = build_router(state)
            .oneshot(
                axum::http::Request::get("/api/ingredients")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["name"], "bulgur");
    }

    #[tokio::test]
    async fn shopping_list_aggregates() {
        let state = test_state(None);
        let a = seed_meal(&state, "A", &["eggs,4,piece,fridge", "onion,1,piece,vegetables"]);
        let b = seed_meal(&state, "B", &["eggs,2,piece"]);

        let response = build_router(state)
            .oneshot(json_request(
                "POST",
                "/api/shopping-list",
                &serde_json::json!({"meal_ids": [b, a]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "onion");
        assert_eq!(items[1]["name"], "eggs");
        assert_eq!(items[1]["quantity"], 6.0);
        assert_eq!(items[1]["category"], "FRIDGE");
    }

    #[tokio::test]
    async fn shopping_list_text_and_csv_formats() {
        let state = test_state(None);
        let id = seed_meal(&state, "Toast", &["bread,2,piece,bakery"]);
        let body = serde_json::json!({"meal_ids": [id]});

        let response = build_router(state.clone())
            .oneshot(json_request("POST", "/api/shopping-list?format=text", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let text = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&text[..], b"bread - 2 piece (Bakery)");

        let response = build_router(state.clone())
            .oneshot(json_request("POST", "/api/shopping-list?format=csv", &body))
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        let csv = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(
            &csv[..],
            b"Ingredient,Quantity,Unit,Category\nbread,2,piece,Bakery\n"
        );

        let response = build_router(state)
            .oneshot(json_request("POST", "/api/shopping-list?format=pdf", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn shopping_list_empty_ids() {
        let response = test_app(None)
            .oneshot(json_request(
                "POST",
                "/api/shopping-list",
                &serde_json::json!({"meal_ids": []}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn vocabulary_endpoints() {
        let app = test_app(None);
        let response = app
            .clone()
            .oneshot(
                axum::http::Request::get("/api/units")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let units = body_json(response).await;
        assert_eq!(units.as_array().unwrap().len(), 24);
        assert_eq!(units[0]["value"], "g");

        let response = app
            .oneshot(
                axum::http::Request::get("/api/categories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let categories = body_json(response).await;
        assert_eq!(categories.as_array().unwrap().len(), 15);
        assert_eq!(categories[0]["key"], "VEGETABLES");
        assert_eq!(categories[0]["rank"], 1);
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("0123456789abcdef"), "0123...cdef");
        assert_eq!(mask_key("abc"), "abc...abc");
        // Hand-edited key files may hold multi-byte characters.
        assert_eq!(mask_key("clé-secrète-ü"), "clé-...te-ü");
    }
}
