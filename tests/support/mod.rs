use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

// Password <base64("hunter2")>
pub const VALID_AUTHORIZATION: &str = "Password aHVudGVyMg==";
pub const ACCOUNT_PASSWORD: &str = "hunter2";
pub const SESSION_COOKIE: &str = "session=fake-session";

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub cookie: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
struct Backend {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Backend {
    fn record(&self, method: &Method, uri: &Uri, headers: &HeaderMap, body: &str) {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().expect("requests lock").push(RecordedRequest {
            method: method.clone(),
            uri: uri.to_string(),
            accept: header(ACCEPT),
            content_type: header(CONTENT_TYPE),
            authorization: header(AUTHORIZATION),
            cookie: header(COOKIE),
            body: body.to_string(),
        });
    }
}

pub struct TestServer {
    handle: JoinHandle<()>,
    base_url: String,
    backend: Backend,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let backend = Backend::default();
        let app = Router::new()
            .route("/user", put(put_user))
            .route("/store/:id", put(put_store).delete(delete_store))
            .route("/store/:id/payments", get(get_payments))
            .with_state(backend.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fake backend");
        });

        Self {
            handle,
            base_url: format!("http://{}", addr),
            backend,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.backend.requests.lock().expect("requests lock").clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("at least one request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "code": status.as_u16(), "message": message } })),
    )
        .into_response()
}

fn with_session(headers: &HeaderMap, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    if headers.get(COOKIE).is_none() {
        if let Ok(value) = SESSION_COOKIE.parse() {
            response.headers_mut().insert(SET_COOKIE, value);
        }
    }
    response
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == VALID_AUTHORIZATION)
        .unwrap_or(false)
}

async fn put_user(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    backend.record(&method, &uri, &headers, &body);
    let payload: Value = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body"),
    };

    let response = if payload.get("newEmail").is_some() {
        if payload["password"] == ACCOUNT_PASSWORD {
            StatusCode::NO_CONTENT.into_response()
        } else {
            error_response(StatusCode::UNAUTHORIZED, "Invalid password")
        }
    } else if payload["newPassword"] != payload["confirmNewPassword"] {
        error_response(StatusCode::UNPROCESSABLE_ENTITY, "Passwords do not match")
    } else {
        StatusCode::NO_CONTENT.into_response()
    };
    with_session(&headers, response)
}

async fn get_payments(
    State(backend): State<Backend>,
    Path(store_id): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    backend.record(&method, &uri, &headers, "");
    match store_id.as_str() {
        "missing" => return error_response(StatusCode::NOT_FOUND, "Store not found"),
        "gateway" => return (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response(),
        _ => {}
    }

    let page = query
        .as_deref()
        .unwrap_or_default()
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(1);
    let body = json!({
        "limit": 10,
        "page": page,
        "totalPayments": 21,
        "totalPages": 3,
        "payments": [{
            "creationTime": "2026-10-14T10:00:00Z",
            "status": "paid",
            "deroAmount": "1.50000",
            "paymentID": "9f1c",
            "integratedAddress": "dERiAddress",
            "atomicDeroAmount": 1_500_000_000_000u64,
            "currency": "USD",
            "currencyAmount": 30.0,
            "exchangeRate": 20.0,
            "ttl": 60
        }]
    });
    with_session(&headers, Json(body))
}

async fn put_store(
    State(backend): State<Backend>,
    Path(_store_id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    backend.record(&method, &uri, &headers, &body);
    if !authorized(&headers) {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid password");
    }
    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

    let response = if let Some(view_key) = payload.get("viewKey") {
        if view_key.as_str().map(str::is_empty).unwrap_or(true) {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, "Invalid view key")
        } else {
            Json(json!({ "viewKey": view_key })).into_response()
        }
    } else if payload.get("newStoreKeys").is_some() {
        Json(json!({ "apiKey": "api-2", "secretKey": "secret-2" })).into_response()
    } else if let Some(webhook) = payload.get("webhook") {
        Json(json!({ "webhook": webhook })).into_response()
    } else if payload.get("newWebhookSecretKey").is_some() {
        Json(json!({ "webhookSecretKey": "whsec-2" })).into_response()
    } else {
        error_response(StatusCode::BAD_REQUEST, "Nothing to update")
    };
    with_session(&headers, response)
}

async fn delete_store(
    State(backend): State<Backend>,
    Path(_store_id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    backend.record(&method, &uri, &headers, "");
    if !authorized(&headers) {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid password");
    }
    with_session(&headers, StatusCode::NO_CONTENT)
}
