// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, exam, identity, session},
    state::AppState,
    utils::jwt::session_middleware,
};

/// Assembles the main application router.
///
/// * One sub-router per screen (login, identity check, exam/result).
/// * Everything except session creation requires a session token.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let require_session = middleware::from_fn_with_state(state.clone(), session_middleware);

    let session_routes = Router::new().route(
        "/",
        post(session::create_session).merge(
            get(session::get_session)
                .delete(session::exit_system)
                .route_layer(require_session.clone()),
        ),
    );

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route_layer(require_session.clone());

    let identity_routes = Router::new()
        .route("/check", post(identity::check_presence))
        .route("/confirm", post(identity::confirm))
        .layer(DefaultBodyLimit::max(state.config.max_frame_bytes))
        .route_layer(require_session.clone());

    let exam_routes = Router::new()
        .route("/", get(exam::get_paper))
        .route(
            "/answers/{index}",
            put(exam::record_answer).delete(exam::clear_answer),
        )
        .route("/submit", post(exam::submit))
        .route("/retake", post(exam::retake))
        .route_layer(require_session);

    Router::new()
        .nest("/api/session", session_routes)
        .nest("/api/auth", auth_routes)
        .nest("/api/identity", identity_routes)
        .nest("/api/exam", exam_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
