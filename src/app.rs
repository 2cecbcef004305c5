use crate::handlers;
use crate::pages;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api_router())
        .route("/", get(pages::index))
        .route("/entries", post(pages::add_entry))
        .route(
            "/entries/{id}/delete",
            get(pages::confirm_delete).post(pages::delete_entry),
        )
        .route("/rate", post(pages::save_rate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The `/api/hours` resource. Preflight requests are answered by the CORS
/// layer before they reach a handler; every other response gets the same
/// allowed methods and headers.
fn api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/hours",
            get(handlers::list_entries)
                .post(handlers::create_entry)
                .delete(handlers::delete_entry)
                .fallback(handlers::method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        ))
        .layer(cors())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}
