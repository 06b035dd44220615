//! A local stand-in for the catalog REST service.
//!
//! Login sets an auth cookie; every other route except logout answers 401
//! unless the cookie comes back. Query strings and request bodies are
//! recorded for assertions.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;

const AUTH_COOKIE: &str = "fetch-access-token=secret";

/// Canned behavior of the fake service
#[derive(Clone)]
pub struct FakeServiceConfig {
    pub breeds: Vec<String>,
    pub search_body: Value,
    pub records_body: Value,
    pub reject_login: bool,
    /// Delay before answering a search
    pub search_delay: Option<Duration>,
}

impl Default for FakeServiceConfig {
    fn default() -> Self {
        Self {
            breeds: vec!["Beagle".to_string(), "Labrador".to_string()],
            search_body: json!({ "resultIds": ["a1", "b2"], "total": 2 }),
            records_body: json!([
                {
                    "id": "a1",
                    "img": "https://img.test/a1.jpg",
                    "name": "Buddy",
                    "age": 3,
                    "zip_code": "10001",
                    "breed": "Beagle"
                },
                {
                    "id": "b2",
                    "img": "https://img.test/b2.jpg",
                    "name": "Max",
                    "age": 5,
                    "zip_code": "10002",
                    "breed": "Labrador"
                }
            ]),
            reject_login: false,
            search_delay: None,
        }
    }
}

/// What the service saw
#[derive(Debug, Default, Clone)]
pub struct Recorded {
    pub logins: Vec<Value>,
    pub logouts: usize,
    pub search_queries: Vec<Vec<(String, String)>>,
    pub fetch_bodies: Vec<Vec<String>>,
    pub match_bodies: Vec<Vec<String>>,
    pub unauthorized: usize,
}

#[derive(Clone)]
struct AppState {
    config: Arc<FakeServiceConfig>,
    recorded: Arc<Mutex<Recorded>>,
}

pub struct FakeService {
    pub base_url: String,
    recorded: Arc<Mutex<Recorded>>,
}

impl FakeService {
    pub async fn start() -> Self {
        Self::start_with(FakeServiceConfig::default()).await
    }

    pub async fn start_with(config: FakeServiceConfig) -> Self {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let state = AppState {
            config: Arc::new(config),
            recorded: Arc::clone(&recorded),
        };

        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/logout", post(logout))
            .route("/dogs/breeds", get(breeds))
            .route("/dogs/search", get(search))
            .route("/dogs", post(fetch_records))
            .route("/dogs/match", post(request_match))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{address}"),
            recorded,
        }
    }

    pub fn recorded(&self) -> Recorded {
        self.recorded.lock().clone()
    }
}

fn authorized(state: &AppState, headers: &HeaderMap) -> bool {
    let ok = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|c| c.trim() == AUTH_COOKIE));
    if !ok {
        state.recorded.lock().unauthorized += 1;
    }
    ok
}

async fn login(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    state.recorded.lock().logins.push(body);
    if state.config.reject_login {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    (
        [(header::SET_COOKIE, format!("{AUTH_COOKIE}; Path=/; HttpOnly"))],
        "OK",
    )
        .into_response()
}

async fn logout(State(state): State<AppState>) -> Response {
    state.recorded.lock().logouts += 1;
    "OK".into_response()
}

async fn breeds(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(state.config.breeds.clone()).into_response()
}

async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(
        query.unwrap_or_default().as_bytes(),
    )
    .into_owned()
    .collect();
    state.recorded.lock().search_queries.push(pairs);

    if let Some(delay) = state.config.search_delay {
        tokio::time::sleep(delay).await;
    }
    Json(state.config.search_body.clone()).into_response()
}

async fn fetch_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(ids): Json<Vec<String>>,
) -> Response {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.recorded.lock().fetch_bodies.push(ids);
    Json(state.config.records_body.clone()).into_response()
}

async fn request_match(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(ids): Json<Vec<String>>,
) -> Response {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let matched = ids.first().cloned().unwrap_or_default();
    state.recorded.lock().match_bodies.push(ids);
    Json(json!({ "match": matched })).into_response()
}
