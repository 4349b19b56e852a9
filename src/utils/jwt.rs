// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, services::sessions::SessionHandle, state::AppState};

/// JWT Claims structure.
///
/// There is no `exp`: a token stays valid for as long as the session it names
/// is kept by the session store.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - the session id.
    pub sub: String,
    /// Issued at, as Unix timestamp.
    pub iat: usize,
}

/// The session a request operates on. Injected by [`session_middleware`].
#[derive(Clone)]
pub struct ActiveSession {
    pub id: Uuid,
    pub handle: SessionHandle,
}

/// Signs a token that refers to session `id`.
pub fn sign_session_token(id: Uuid, secret: &str) -> Result<String, AppError> {
    let issued_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize;

    let claims = Claims {
        sub: id.to_string(),
        iat: issued_at,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Verifies and decodes a JWT string.
///
/// Returns the `Claims` if valid, otherwise returns an `AppError`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::AuthError("Invalid session token".to_string()))?;

    Ok(token_data.claims)
}

/// Axum Middleware: Session lookup.
///
/// Validates the 'Authorization: Bearer <token>' header and resolves the session it names.
/// Injects `ActiveSession` into the request extensions for handlers to use.
/// Returns 401 for a missing or invalid token, 404 when the session is gone.
/// Each resolved request counts as activity for idle pruning.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return Err(AppError::AuthError("Missing session token".to_string())),
    };

    let claims = verify_jwt(token, &state.config.jwt_secret)?;
    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthError("Invalid session token".to_string()))?;

    let handle = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound("Session not found, start a new one".to_string()))?;

    req.extensions_mut().insert(ActiveSession { id, handle });
    Ok(next.run(req).await)
}
