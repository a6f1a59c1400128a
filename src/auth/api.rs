//! Authentication API endpoints.
//!
//! `POST /signup` and `POST /signin` handlers for the MRV dashboard, plus
//! the store-health endpoint. Responses are session-less: sign-in returns
//! a sanitized account view and the browser keeps it client-side.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};

use crate::auth::chain::{Served, StoreChain, StoreHealth};
use crate::auth::models::{
    AccountResponse, MessageResponse, SigninRequest, SigninResponse, SignupRequest,
};
use crate::auth::password::PasswordHasher;
use crate::auth::store::{NewAccount, StoreError};

/// Shared auth state, injected into the handlers.
#[derive(Clone)]
pub struct AuthState {
    pub store: Arc<StoreChain>,
    pub hasher: PasswordHasher,
}

impl AuthState {
    pub fn new(store: Arc<StoreChain>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }
}

/// Routes served by this module.
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/health", get(health))
        .with_state(state)
}

/// Sign-up endpoint - POST /signup
pub async fn signup(
    State(state): State<AuthState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthApiError> {
    let fullname = required(&payload.fullname)?;
    let email = required(&payload.email)?;
    let password = required(&payload.password)?;
    let role = required(&payload.role)?;

    info!("🔐 Sign-up attempt: {}", email);

    let password_hash = state.hasher.hash(password).map_err(|e| {
        warn!("Password hashing failed: {}", e);
        AuthApiError::Internal
    })?;

    let account = NewAccount {
        fullname: fullname.to_string(),
        email: email.to_string(),
        password_hash,
        role: role.to_string(),
    };

    let (created, served) = state.store.register(account).map_err(|e| match e {
        StoreError::DuplicateEmail => AuthApiError::EmailTaken,
        StoreError::Unavailable(reason) => {
            warn!("Sign-up failed, no store available: {}", reason);
            AuthApiError::Internal
        }
    })?;

    info!("✅ Account created: {} ({})", created.email, created.role);

    let message = match served {
        Served::Persistent => "User created successfully! (DB)",
        Served::Fallback => "User created successfully! (Mock Mode)",
    };

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    ))
}

/// Sign-in endpoint - POST /signin
pub async fn signin(
    State(state): State<AuthState>,
    Json(payload): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, AuthApiError> {
    let email = required(&payload.email)?;
    let password = required(&payload.password)?;
    let role = required(&payload.role)?;

    info!("🔐 Sign-in attempt: {}", email);

    let account = state
        .store
        .lookup(email)
        .map_err(|e| {
            warn!("Sign-in lookup failed: {}", e);
            AuthApiError::Internal
        })?
        .ok_or(AuthApiError::UnknownEmail)?;

    if !state.hasher.verify(password, &account.password_hash) {
        warn!("❌ Failed sign-in attempt: {}", email);
        return Err(AuthApiError::InvalidCredentials);
    }

    // Roles are free-form client-chosen text; the check is exact equality.
    if account.role != role {
        warn!("❌ Role mismatch for {}", email);
        return Err(AuthApiError::RoleMismatch);
    }

    info!("✅ Sign-in successful: {} ({})", account.email, account.role);

    Ok(Json(SigninResponse {
        message: "Sign-in successful!".to_string(),
        user: AccountResponse::from_account(&account),
    }))
}

/// Store health - GET /health
///
/// Surfaces whether the persistent store is reachable and how often the
/// in-memory fallback has served requests since startup.
pub async fn health(State(state): State<AuthState>) -> Json<StoreHealth> {
    Json(state.store.health())
}

/// Presence + non-empty check. The dashboard forms submit empty strings
/// for untouched fields, so both cases are the same validation failure.
fn required(field: &Option<String>) -> Result<&str, AuthApiError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AuthApiError::MissingFields),
    }
}

/// Auth API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthApiError {
    MissingFields,
    EmailTaken,
    UnknownEmail,
    InvalidCredentials,
    RoleMismatch,
    Internal,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                "Please provide all required fields.",
            ),
            AuthApiError::EmailTaken => (
                StatusCode::CONFLICT,
                "User with this email already exists.",
            ),
            AuthApiError::UnknownEmail => (
                StatusCode::NOT_FOUND,
                "User not found. (If using Mock Mode, did you Sign Up first?)",
            ),
            AuthApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials."),
            AuthApiError::RoleMismatch => (StatusCode::UNAUTHORIZED, "Role mismatch."),
            AuthApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error."),
        };

        (
            status,
            Json(MessageResponse {
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_api_error_responses() {
        let missing = AuthApiError::MissingFields.into_response();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let taken = AuthApiError::EmailTaken.into_response();
        assert_eq!(taken.status(), StatusCode::CONFLICT);

        let unknown = AuthApiError::UnknownEmail.into_response();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        let invalid = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);

        let mismatch = AuthApiError::RoleMismatch.into_response();
        assert_eq!(mismatch.status(), StatusCode::UNAUTHORIZED);

        let internal = AuthApiError::Internal.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_required_rejects_missing_and_empty() {
        assert_eq!(required(&Some("industry".to_string())).unwrap(), "industry");
        assert!(matches!(required(&None), Err(AuthApiError::MissingFields)));
        assert!(matches!(
            required(&Some(String::new())),
            Err(AuthApiError::MissingFields)
        ));
    }
}
