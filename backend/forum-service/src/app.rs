/// HTTP application wiring shared by the binary and the integration tests
use crate::config::CorsConfig;
use crate::error::AppError;
use crate::handlers::{self, HealthState};
use crate::middleware::RateLimitMiddleware;
use crate::store::ForumStore;
use actix_cors::Cors;
use actix_web::{middleware::DefaultHeaders, web, Resource, ResponseError, Scope};
use std::sync::Arc;

/// Everything a worker needs to serve the API
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ForumStore>,
    pub environment: String,
    pub limiter: RateLimitMiddleware,
    pub max_body_bytes: usize,
    /// Return raw framework error messages (development only)
    pub expose_error_details: bool,
}

/// Register shared data, body limits and every route under `/api`
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let AppState {
            store,
            environment,
            limiter,
            max_body_bytes,
            expose_error_details,
        } = state;

        cfg.app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(HealthState::new(store, environment)))
            .app_data(json_config(max_body_bytes, expose_error_details))
            .service(
                web::scope("/api")
                    .wrap(limiter)
                    .service(resource("/health").route(web::get().to(handlers::health_check)))
                    .service(forum_scope()),
            );
    }
}

/// Routes under `/api/forum`
pub fn forum_scope() -> Scope {
    web::scope("/forum")
        .service(
            resource("/posts")
                .route(web::get().to(handlers::list_posts))
                .route(web::post().to(handlers::create_post)),
        )
        .service(resource("/posts/{post_id}").route(web::delete().to(handlers::delete_post)))
        .service(
            resource("/posts/{post_id}/like")
                .route(web::post().to(handlers::like_post))
                .route(web::delete().to(handlers::unlike_post)),
        )
        .service(
            resource("/posts/{post_id}/comments")
                .route(web::get().to(handlers::list_post_comments)),
        )
        .service(resource("/comments").route(web::post().to(handlers::create_comment)))
        .service(
            resource("/comments/{comment_id}/like")
                .route(web::post().to(handlers::like_comment))
                .route(web::delete().to(handlers::unlike_comment)),
        )
        .service(resource("/categories").route(web::get().to(handlers::list_categories)))
}

/// A resource whose unmatched methods answer like an unknown route
/// instead of an empty 405
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(handlers::route_not_found))
}

/// JSON extractor limits; malformed or oversized bodies go through the
/// top-level error format
pub fn json_config(limit: usize, expose_details: bool) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(move |err, _req| {
            let status = err.status_code();
            tracing::debug!(error = %err, status = status.as_u16(), "Rejected request body");
            AppError::fallback(status, err.to_string(), expose_details).into()
        })
}

/// CORS policy: exact origins plus suffix patterns, credentials allowed
pub fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        let origins = config.allowed_origins.clone();
        let suffixes = config.allowed_origin_suffixes.clone();
        cors = cors.allowed_origin_fn(move |origin, _req| {
            origin
                .to_str()
                .map(|origin| origin_allowed(origin, &origins, &suffixes))
                .unwrap_or(false)
        });
    }

    cors.allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

fn origin_allowed(origin: &str, origins: &[String], suffixes: &[String]) -> bool {
    origins.iter().any(|allowed| allowed == origin)
        || suffixes.iter().any(|suffix| origin.ends_with(suffix.as_str()))
}

/// Hardening headers added to every response
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("X-DNS-Prefetch-Control", "off"))
        .add(("Cross-Origin-Resource-Policy", "same-origin"))
}
