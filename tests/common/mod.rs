//! In-process mock of the HBnB backend.
//!
//! Every request is recorded with its method, path and Authorization header
//! so tests can assert on exactly what the client sent.

#![allow(dead_code)]

use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hbnb::session::SessionStore;
use hbnb::ui::RecordingUi;
use hbnb::{ApiClient, ClientState};

pub const ADMIN_EMAIL: &str = "admin@hbnb.com";
pub const ADMIN_PASSWORD: &str = "secret123";
pub const GUEST_EMAIL: &str = "guest@hbnb.com";
pub const GUEST_PASSWORD: &str = "guestpass";
/// Account whose login returns a token that is not a JWT
pub const LEGACY_EMAIL: &str = "legacy@hbnb.com";

pub const ADMIN_ID: &str = "0b9e4c1a-7f21-4b8e-9a55-000000000001";
pub const GUEST_ID: &str = "5d1f7c2e-3c44-4d1a-8b77-000000000002";
pub const LOFT_ID: &str = "place-0001-loft";
pub const VILLA_ID: &str = "place-0002-villa";

const API_PREFIX: &str = "/api/v1";

pub fn mint_token(sub: &str, is_admin: bool) -> String {
    let claims = json!({
        "sub": sub,
        "is_admin": is_admin,
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"mock-backend-secret"),
    )
    .unwrap()
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

pub struct MockState {
    pub admin_token: String,
    pub guest_token: String,
    requests: Mutex<Vec<Recorded>>,
    pub users: Mutex<Vec<Value>>,
    pub places: Mutex<Vec<Value>>,
    pub reviews: Mutex<Vec<Value>>,
    pub amenities: Mutex<Vec<Value>>,
    next_id: AtomicUsize,
}

impl MockState {
    fn seeded() -> Self {
        Self {
            admin_token: mint_token(ADMIN_ID, true),
            guest_token: mint_token(GUEST_ID, false),
            requests: Mutex::new(Vec::new()),
            users: Mutex::new(vec![
                json!({
                    "id": ADMIN_ID, "first_name": "Admin", "last_name": "User",
                    "email": ADMIN_EMAIL, "is_admin": true,
                    "created_at": "2025-01-01T09:00:00"
                }),
                json!({
                    "id": GUEST_ID, "first_name": "Grace", "last_name": "Guest",
                    "email": GUEST_EMAIL, "is_admin": false,
                    "created_at": "2025-01-02T09:00:00"
                }),
            ]),
            places: Mutex::new(vec![
                json!({
                    "id": LOFT_ID, "title": "Sunny Loft", "price": 80.0,
                    "description": "Top floor, lots of light", "owner_id": ADMIN_ID,
                    "latitude": 48.8566, "longitude": 2.3522,
                    "amenities": [{"id": "a-wifi", "name": "WiFi"}],
                    "created_at": "2025-02-01T10:00:00"
                }),
                json!({
                    "id": VILLA_ID, "name": "Sea Villa", "price_per_night": 150,
                    "description": "Ocean view", "owner_id": ADMIN_ID,
                    "city": "Nice", "country": "France",
                    "created_at": "2025-02-02T10:00:00"
                }),
            ]),
            reviews: Mutex::new(vec![json!({
                "id": "review-0001", "text": "Great light, great host", "rating": 5,
                "user_id": GUEST_ID, "place_id": LOFT_ID,
                "created_at": "2025-03-01T12:00:00"
            })]),
            amenities: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    fn new_id(&self, kind: &str) -> String {
        format!("{}-{:04}", kind, self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// `Some(is_admin)` for a known bearer token
    fn caller(&self, headers: &HeaderMap) -> Option<bool> {
        let token = headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        if token == self.admin_token {
            Some(true)
        } else if token == self.guest_token {
            Some(false)
        } else {
            None
        }
    }
}

type Shared = Arc<MockState>;

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn unauthorized() -> Response {
    // flask-jwt-extended reports missing/invalid tokens under "msg"
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "msg": "Missing Authorization Header" })),
    )
        .into_response()
}

fn require_admin(state: &MockState, headers: &HeaderMap) -> Option<Response> {
    match state.caller(headers) {
        Some(true) => None,
        Some(false) => Some(error(StatusCode::FORBIDDEN, "Admin privileges required")),
        None => Some(unauthorized()),
    }
}

fn remove_by_id(list: &Mutex<Vec<Value>>, id: &str) -> bool {
    let mut list = list.lock();
    let before = list.len();
    list.retain(|item| item["id"] != id);
    list.len() != before
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    state.requests.lock().push(Recorded {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        authorization: request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    next.run(request).await
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let token = match (email, password) {
        (ADMIN_EMAIL, ADMIN_PASSWORD) => state.admin_token.clone(),
        (GUEST_EMAIL, GUEST_PASSWORD) => state.guest_token.clone(),
        (LEGACY_EMAIL, _) => "legacy-opaque-token".to_string(),
        _ => return error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    };
    Json(json!({ "access_token": token, "user_id": "ignored" })).into_response()
}

async fn stats(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Some(rejection) = require_admin(&state, &headers) {
        return rejection;
    }
    Json(json!({
        "total_users": state.users.lock().len(),
        "total_places": state.places.lock().len(),
        "total_reviews": state.reviews.lock().len(),
        "total_amenities": state.amenities.lock().len(),
        "admin_users": 1
    }))
    .into_response()
}

async fn list_users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if state.caller(&headers).is_none() {
        return unauthorized();
    }
    Json(Value::Array(state.users.lock().clone())).into_response()
}

async fn create_user(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if state.users.lock().iter().any(|u| u["email"] == email.as_str()) {
        return error(StatusCode::BAD_REQUEST, "Email already registered");
    }
    let user = json!({
        "id": state.new_id("user"),
        "first_name": body["first_name"],
        "last_name": body["last_name"],
        "email": email,
        "is_admin": body["is_admin"].as_bool().unwrap_or(false),
        "created_at": "2025-04-01T08:00:00"
    });
    state.users.lock().push(user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn delete_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Some(rejection) = require_admin(&state, &headers) {
        return rejection;
    }
    if remove_by_id(&state.users, &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error(StatusCode::NOT_FOUND, "User not found")
    }
}

async fn list_places(State(state): State<Shared>) -> Response {
    Json(Value::Array(state.places.lock().clone())).into_response()
}

async fn get_place(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match state.places.lock().iter().find(|p| p["id"] == id.as_str()) {
        Some(place) => Json(place.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Place not found"),
    }
}

async fn place_reviews(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    if !state.places.lock().iter().any(|p| p["id"] == id.as_str()) {
        return error(StatusCode::NOT_FOUND, "Place not found");
    }
    let reviews: Vec<Value> = state
        .reviews
        .lock()
        .iter()
        .filter(|r| r["place_id"] == id.as_str())
        .cloned()
        .collect();
    Json(Value::Array(reviews)).into_response()
}

async fn list_reviews(State(state): State<Shared>) -> Response {
    Json(Value::Array(state.reviews.lock().clone())).into_response()
}

async fn create_review(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let is_admin = match state.caller(&headers) {
        Some(is_admin) => is_admin,
        None => return unauthorized(),
    };
    let rating = body["rating"].as_i64().unwrap_or(0);
    if !(1..=5).contains(&rating) {
        return error(StatusCode::BAD_REQUEST, "Rating must be between 1 and 5");
    }
    let place_id = body["place_id"].as_str().unwrap_or_default().to_string();
    if !state.places.lock().iter().any(|p| p["id"] == place_id.as_str()) {
        return error(StatusCode::NOT_FOUND, "Place not found");
    }
    let author = if is_admin { ADMIN_ID } else { GUEST_ID };
    let review = json!({
        "id": state.new_id("review"),
        "text": body["text"],
        "rating": rating,
        "user_id": author,
        "place_id": place_id,
        "created_at": "2025-04-02T08:00:00"
    });
    state.reviews.lock().push(review.clone());
    (StatusCode::CREATED, Json(review)).into_response()
}

async fn delete_review(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if state.caller(&headers).is_none() {
        return unauthorized();
    }
    if remove_by_id(&state.reviews, &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Review not found")
    }
}

async fn list_amenities(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if state.caller(&headers).is_none() {
        return unauthorized();
    }
    Json(Value::Array(state.amenities.lock().clone())).into_response()
}

async fn create_amenity(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(rejection) = require_admin(&state, &headers) {
        return rejection;
    }
    let amenity = json!({
        "id": state.new_id("amenity"),
        "name": body["name"],
        "created_at": "2025-04-03T08:00:00"
    });
    state.amenities.lock().push(amenity.clone());
    (StatusCode::CREATED, Json(amenity)).into_response()
}

async fn delete_amenity(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Some(rejection) = require_admin(&state, &headers) {
        return rejection;
    }
    if remove_by_id(&state.amenities, &id) {
        Json(json!({ "message": "Amenity deleted" })).into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Amenity not found")
    }
}

pub struct MockBackend {
    pub state: Shared,
    pub base_url: String,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::seeded());

        let app = Router::new()
            .route("/api/v1/auth/login", post(login))
            .route("/api/v1/admin/stats", get(stats))
            .route("/api/v1/users/", get(list_users).post(create_user))
            .route("/api/v1/users/:id", delete(delete_user))
            .route("/api/v1/places/", get(list_places))
            .route("/api/v1/places/:id", get(get_place))
            .route("/api/v1/places/:id/reviews", get(place_reviews))
            .route("/api/v1/reviews/", get(list_reviews).post(create_review))
            .route("/api/v1/reviews/:id", delete(delete_review))
            .route("/api/v1/amenities/", get(list_amenities).post(create_amenity))
            .route("/api/v1/amenities/:id", delete(delete_amenity))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{}{}", addr, API_PREFIX),
        }
    }

    pub fn client_state(&self, session: Arc<dyn SessionStore>, ui: Arc<RecordingUi>) -> ClientState {
        let api = ApiClient::new(&self.base_url, Duration::from_secs(5)).unwrap();
        ClientState::new(api, session, ui, Duration::from_secs(3600))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().clone()
    }

    /// Number of requests for `method` on `path` (relative to the API prefix)
    pub fn hits(&self, method: &str, path: &str) -> usize {
        let full = format!("{}{}", API_PREFIX, path);
        self.state
            .requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == full)
            .count()
    }

    pub fn authorization_of_last(&self, method: &str, path: &str) -> Option<String> {
        let full = format!("{}{}", API_PREFIX, path);
        self.state
            .requests
            .lock()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == full)
            .and_then(|r| r.authorization.clone())
    }

    pub fn reset_requests(&self) {
        self.state.requests.lock().clear();
    }
}
