#![allow(dead_code)]

//! In-process fakes of the hosted services, served by axum on 127.0.0.1:0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use mealplanner::config::StoreConfig;
use mealplanner::{Meal, NewMeal};

pub const ANON_KEY: &str = "anon-key";
pub const USER_TOKEN: &str = "user-token";
pub const USER_ID: &str = "user-1";
pub const USER_EMAIL: &str = "alice@example.com";

/// A request as seen by the fake
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: &'static str,
    pub path: &'static str,
    pub query: HashMap<String, String>,
    pub apikey: Option<String>,
    pub authorization: Option<String>,
    pub prefer: Option<String>,
}

#[derive(Default)]
pub struct FakeState {
    pub meals: Mutex<Vec<Meal>>,
    pub next_id: Mutex<i64>,
    pub seen: Mutex<Vec<Seen>>,
    pub completions: Mutex<Vec<Value>>,
}

impl FakeState {
    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: &'static str,
        path: &'static str,
        query: &HashMap<String, String>,
        headers: &HeaderMap,
    ) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(Seen {
            method,
            path,
            query: query.clone(),
            apikey: header("apikey"),
            authorization: header("authorization"),
            prefer: header("prefer"),
        });
    }
}

/// Running fake services
pub struct FakeServices {
    pub base_url: String,
    pub state: Arc<FakeState>,
}

impl FakeServices {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.base_url.clone(),
            anon_key: ANON_KEY.to_string(),
            table: "meals".to_string(),
        }
    }

    pub fn generator_url(&self) -> String {
        format!("{}/v1", self.base_url)
    }
}

/// Start the fakes with the given seed rows
pub async fn start_fakes(seed: Vec<Meal>) -> FakeServices {
    let state = Arc::new(FakeState::default());
    *state.next_id.lock().unwrap() = seed.iter().map(|m| m.id).max().unwrap_or(0);
    *state.meals.lock().unwrap() = seed;

    let router = Router::new()
        .route(
            "/rest/v1/meals",
            get(list_meals).post(insert_meals).delete(delete_meals),
        )
        .route("/auth/v1/user", get(get_user))
        .route("/auth/v1/logout", post(logout))
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(Arc::clone(&state));

    let base_url = spawn_router(router).await;
    FakeServices { base_url, state }
}

/// Serve a router on an ephemeral port and return its base URL
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn list_meals(
    State(state): State<Arc<FakeState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Vec<Meal>> {
    state.record("GET", "/rest/v1/meals", &query, &headers);
    Json(state.meals.lock().unwrap().clone())
}

async fn insert_meals(
    State(state): State<Arc<FakeState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(rows): Json<Vec<NewMeal>>,
) -> (StatusCode, Json<Vec<Meal>>) {
    state.record("POST", "/rest/v1/meals", &query, &headers);

    let mut next_id = state.next_id.lock().unwrap();
    let inserted: Vec<Meal> = rows
        .into_iter()
        .map(|row| {
            *next_id += 1;
            row.with_id(*next_id)
        })
        .collect();

    state.meals.lock().unwrap().extend(inserted.iter().cloned());
    (StatusCode::CREATED, Json(inserted))
}

async fn delete_meals(
    State(state): State<Arc<FakeState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> StatusCode {
    state.record("DELETE", "/rest/v1/meals", &query, &headers);

    let id = query
        .get("id")
        .and_then(|f| f.strip_prefix("eq."))
        .and_then(|id| id.parse::<i64>().ok());

    match id {
        Some(id) => {
            state.meals.lock().unwrap().retain(|m| m.id != id);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::BAD_REQUEST,
    }
}

async fn get_user(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state.record("GET", "/auth/v1/user", &HashMap::new(), &headers);

    let expected = format!("Bearer {}", USER_TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(auth) if auth == expected => Ok(Json(json!({
            "id": USER_ID,
            "email": USER_EMAIL,
            "aud": "authenticated",
        }))),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "invalid JWT" })),
        )),
    }
}

async fn logout(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> StatusCode {
    state.record("POST", "/auth/v1/logout", &HashMap::new(), &headers);
    StatusCode::NO_CONTENT
}

async fn chat_completions(
    State(state): State<Arc<FakeState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let prompt = body["messages"][1]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    state.completions.lock().unwrap().push(body);

    Json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": format!("Answer to: {}", prompt) },
            "finish_reason": "stop"
        }]
    }))
}
