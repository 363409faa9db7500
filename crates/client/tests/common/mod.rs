use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use voyage_client::{ApiClient, ScopedSession, SessionStore};

/// What the fake backend observed.
#[derive(Clone, Default)]
pub struct Seen {
    /// `(path, Authorization header)` per request, in arrival order.
    pub auth: Arc<Mutex<Vec<(String, Option<String>)>>>,
    /// Multipart field names per upload request.
    pub fields: Arc<Mutex<Vec<Vec<String>>>>,
    /// Query keys received by the search endpoint.
    pub query_keys: Arc<Mutex<Vec<String>>>,
}

impl Seen {
    fn record(&self, path: &str, headers: &HeaderMap) {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.auth.lock().unwrap().push((path.to_string(), auth));
    }

    /// Authorization header sent with the first request to `path`.
    pub fn auth_for(&self, path: &str) -> Option<Option<String>> {
        self.auth
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, a)| a.clone())
    }
}

/// Bind the fake backend on an ephemeral port and return the base URL
/// the client should use.
pub async fn spawn_backend(seen: Seen) -> String {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/admin/profile", get(profile))
        .route("/hotels", get(hotels))
        .route("/hotels/{id}", get(hotel))
        .route("/hotels/{id}/images", post(upload_images))
        .route("/hotels/{id}/rooms/{room_id}/image", post(upload_room_image))
        .route("/destinations/search", get(search))
        .with_state(seen);
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub fn client(base_url: &str, session: Arc<ScopedSession>) -> ApiClient {
    let session: Arc<dyn SessionStore> = session;
    ApiClient::with_client(reqwest::Client::new(), base_url, session)
}

async fn login(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    seen.record("/auth/login", &headers);
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let role = if email.starts_with("admin") {
        "ROLE_ADMIN"
    } else {
        "ROLE_CLIENT"
    };
    Json(json!({ "token": "tok-new", "name": "Sam", "email": email, "role": role }))
}

async fn profile(State(seen): State<Seen>, headers: HeaderMap) -> Json<Value> {
    seen.record("/admin/profile", &headers);
    Json(json!({
        "id": 1,
        "name": "Sam Admin",
        "email": "admin@voyage.test",
        "role": "ROLE_ADMIN",
        "imageUrl": "/uploads/admin.png"
    }))
}

async fn hotels(State(seen): State<Seen>, headers: HeaderMap) -> Json<Value> {
    seen.record("/hotels", &headers);
    Json(json!({ "ok": true, "data": null }))
}

async fn hotel(State(seen): State<Seen>, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    seen.record(&format!("/hotels/{id}"), &headers);
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Hotel not found" })),
        )
            .into_response();
    }
    Json(json!({ "data": { "id": id, "name": "Dar Said", "rooms": null } })).into_response()
}

async fn drain(mut multipart: Multipart) -> (Vec<String>, Vec<String>) {
    let mut fields = Vec::new();
    let mut file_names = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        fields.push(field.name().unwrap_or_default().to_string());
        file_names.push(field.file_name().unwrap_or_default().to_string());
        field.bytes().await.unwrap();
    }
    (fields, file_names)
}

async fn upload_images(
    State(seen): State<Seen>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Json<Value> {
    let (fields, file_names) = drain(multipart).await;
    seen.fields.lock().unwrap().push(fields);
    Json(json!({ "data": { "id": id, "name": "Dar Said", "images": file_names } }))
}

async fn upload_room_image(
    State(seen): State<Seen>,
    Path((id, room_id)): Path<(i64, i64)>,
    multipart: Multipart,
) -> Json<Value> {
    let (fields, file_names) = drain(multipart).await;
    seen.fields.lock().unwrap().push(fields);
    let image = file_names.first().cloned().unwrap_or_default();
    Json(json!({
        "data": {
            "id": id,
            "name": "Dar Said",
            "rooms": [{ "id": room_id, "name": "Suite", "image": image, "capacity": 2, "price": 90.0 }]
        }
    }))
}

async fn search(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut keys: Vec<String> = params.into_keys().collect();
    keys.sort();
    *seen.query_keys.lock().unwrap() = keys;
    Json(json!({ "data": [{ "id": 3, "name": "Djerba", "country": "Tunisia" }] }))
}
