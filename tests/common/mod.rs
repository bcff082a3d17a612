//! In-process fake authentication service
//!
//! Speaks the same six endpoints as the real service, keeps everything in
//! memory and can be told to misbehave in one specific way per instance.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

/// A single way the service deviates from the expected contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fault {
    #[default]
    None,
    /// Registration answers 200 instead of 201
    RegisterReturnsOk,
    /// Login accepts any password
    AcceptsAnyPassword,
    /// Profile answers 200 without credentials
    ProfileIgnoresAuth,
    /// Login succeeds but omits `session_id`
    NoSessionId,
    /// Profile answers 401 even for a live session
    ProfileRejectsBearer,
    /// Logout answers 500
    LogoutFails,
    /// Reset answers with an empty `reset_token`
    EmptyResetToken,
    /// Logout answers 200 but keeps the session alive
    LogoutKeepsSession,
    /// Password update answers 403 for a valid token
    UpdatePasswordForbidden,
    /// Password update answers 200 but the new password never works
    RejectsNewPassword,
    /// Password update leaves the old password working too
    KeepsOldPassword,
    /// Re-registering an existing email answers 201 again
    DuplicateRegisterAccepted,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, Vec<String>>,
    sessions: HashMap<String, String>,
    reset_tokens: HashMap<String, String>,
    next_id: u64,
    requests: Vec<String>,
}

#[derive(Clone)]
struct Shared {
    fault: Fault,
    inner: Arc<Mutex<Inner>>,
}

impl Shared {
    fn lock(&self, request: &str) -> std::sync::MutexGuard<'_, Inner> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request.to_string());
        inner
    }
}

/// Running fake service
pub struct MockService {
    pub base_url: String,
    shared: Shared,
}

impl MockService {
    /// Requests received so far, as `METHOD /path`
    pub fn requests(&self) -> Vec<String> {
        self.shared.inner.lock().unwrap().requests.clone()
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.shared.inner.lock().unwrap().sessions.len()
    }
}

/// Start a compliant service
pub async fn spawn() -> MockService {
    spawn_with(Fault::None).await
}

/// Start a service with one fault injected
pub async fn spawn_with(fault: Fault) -> MockService {
    let shared = Shared {
        fault,
        inner: Arc::new(Mutex::new(Inner::default())),
    };

    let app = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
        .route("/logout", get(logout))
        .route("/reset_password", post(reset_password))
        .route("/update_password", put(update_password))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake service");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake service crashed");
    });

    MockService {
        base_url: format!("http://{}", addr),
        shared,
    }
}

#[derive(Deserialize)]
struct CredentialsBody {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct ResetBody {
    email: String,
}

#[derive(Deserialize)]
struct UpdateBody {
    email: String,
    reset_token: String,
    new_password: String,
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

async fn register(State(s): State<Shared>, Json(body): Json<CredentialsBody>) -> Response {
    let mut inner = s.lock("POST /register");

    if inner.users.contains_key(&body.email) && s.fault != Fault::DuplicateRegisterAccepted {
        return message(StatusCode::BAD_REQUEST, "email already registered");
    }
    inner.users.insert(body.email.clone(), vec![body.password]);

    let status = if s.fault == Fault::RegisterReturnsOk {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    (status, Json(json!({ "email": body.email, "message": "user created" }))).into_response()
}

async fn login(State(s): State<Shared>, Json(body): Json<CredentialsBody>) -> Response {
    let mut inner = s.lock("POST /login");

    let valid = match inner.users.get(&body.email) {
        Some(passwords) => s.fault == Fault::AcceptsAnyPassword || passwords.contains(&body.password),
        None => false,
    };
    if !valid {
        return message(StatusCode::UNAUTHORIZED, "invalid credentials");
    }

    inner.next_id += 1;
    let session_id = format!("session-{}", inner.next_id);
    inner.sessions.insert(session_id.clone(), body.email.clone());

    if s.fault == Fault::NoSessionId {
        return (StatusCode::OK, Json(json!({ "email": body.email }))).into_response();
    }
    (
        StatusCode::OK,
        Json(json!({ "email": body.email, "message": "logged in", "session_id": session_id })),
    )
        .into_response()
}

async fn profile(State(s): State<Shared>, headers: HeaderMap) -> Response {
    let inner = s.lock("GET /profile");

    if s.fault == Fault::ProfileIgnoresAuth {
        return (StatusCode::OK, Json(json!({ "email": "anonymous" }))).into_response();
    }

    if s.fault == Fault::ProfileRejectsBearer {
        return message(StatusCode::UNAUTHORIZED, "unauthorized");
    }

    match bearer(&headers).and_then(|sid| inner.sessions.get(&sid).cloned()) {
        Some(email) => (StatusCode::OK, Json(json!({ "email": email }))).into_response(),
        None => message(StatusCode::UNAUTHORIZED, "unauthorized"),
    }
}

async fn logout(State(s): State<Shared>, headers: HeaderMap) -> Response {
    let mut inner = s.lock("GET /logout");

    let Some(sid) = bearer(&headers) else {
        return message(StatusCode::UNAUTHORIZED, "unauthorized");
    };
    if !inner.sessions.contains_key(&sid) {
        return message(StatusCode::UNAUTHORIZED, "unauthorized");
    }
    if s.fault == Fault::LogoutFails {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "session store unavailable");
    }
    if s.fault != Fault::LogoutKeepsSession {
        inner.sessions.remove(&sid);
    }
    message(StatusCode::OK, "logged out")
}

async fn reset_password(State(s): State<Shared>, Json(body): Json<ResetBody>) -> Response {
    let mut inner = s.lock("POST /reset_password");

    if !inner.users.contains_key(&body.email) {
        return message(StatusCode::FORBIDDEN, "unknown email");
    }

    inner.next_id += 1;
    let token = if s.fault == Fault::EmptyResetToken {
        String::new()
    } else {
        format!("reset-{}", inner.next_id)
    };
    inner.reset_tokens.insert(body.email.clone(), token.clone());

    (
        StatusCode::OK,
        Json(json!({ "email": body.email, "reset_token": token })),
    )
        .into_response()
}

async fn update_password(State(s): State<Shared>, Json(body): Json<UpdateBody>) -> Response {
    let mut inner = s.lock("PUT /update_password");

    let token_matches = inner
        .reset_tokens
        .get(&body.email)
        .is_some_and(|t| *t == body.reset_token);
    if !token_matches || s.fault == Fault::UpdatePasswordForbidden {
        return message(StatusCode::FORBIDDEN, "invalid reset token");
    }
    inner.reset_tokens.remove(&body.email);

    if s.fault == Fault::RejectsNewPassword {
        return message(StatusCode::OK, "password updated");
    }

    if let Some(passwords) = inner.users.get_mut(&body.email) {
        if s.fault != Fault::KeepsOldPassword {
            passwords.clear();
        }
        passwords.push(body.new_password);
    }

    message(StatusCode::OK, "password updated")
}
