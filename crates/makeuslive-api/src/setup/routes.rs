//! Route configuration and setup

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use makeuslive_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::constants::API_PREFIX;
use crate::handlers;
use crate::middleware::{rate_limit_middleware, HttpRateLimiter};
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        jwt_secret: config.jwt_secret.clone(),
    });
    let submission_limiter = Arc::new(HttpRateLimiter::new(
        config.submission_rate_limit_per_minute,
    ));

    // Periodic cleanup so expired per-IP buckets do not accumulate
    let limiter_for_cleanup = submission_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            limiter_for_cleanup.cleanup_expired_buckets().await;
        }
    });

    // Public submission endpoints sit behind the per-IP rate limiter.
    let submission_routes = Router::new()
        .route(
            &format!("{}/contact", API_PREFIX),
            post(handlers::contact::submit_contact),
        )
        .route(
            &format!("{}/jobs/{{slug}}/applications", API_PREFIX),
            post(handlers::applications::submit_application),
        )
        .route(
            &format!("{}/forms/{{slug}}/submissions", API_PREFIX),
            post(handlers::forms::submit_form),
        )
        .route(
            &format!("{}/consent", API_PREFIX),
            post(handlers::consent::record_consent),
        )
        .layer(axum::middleware::from_fn_with_state(
            submission_limiter,
            rate_limit_middleware,
        ));

    // Public reads (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            &format!("{}/posts", API_PREFIX),
            get(handlers::posts::list_published_posts),
        )
        .route(
            &format!("{}/posts/{{slug}}", API_PREFIX),
            get(handlers::posts::get_published_post),
        )
        .route(
            &format!("{}/works", API_PREFIX),
            get(handlers::works::list_published_works),
        )
        .route(
            &format!("{}/works/{{slug}}", API_PREFIX),
            get(handlers::works::get_published_work),
        )
        .route(
            &format!("{}/services", API_PREFIX),
            get(handlers::service_offerings::list_published_services),
        )
        .route(
            &format!("{}/services/{{slug}}", API_PREFIX),
            get(handlers::service_offerings::get_published_service),
        )
        .route(
            &format!("{}/jobs", API_PREFIX),
            get(handlers::jobs::list_open_jobs),
        )
        .route(
            &format!("{}/jobs/{{slug}}", API_PREFIX),
            get(handlers::jobs::get_open_job),
        )
        .route(
            &format!("{}/testimonials", API_PREFIX),
            get(handlers::testimonials::list_published_testimonials),
        )
        .route(
            &format!("{}/faqs", API_PREFIX),
            get(handlers::faqs::list_published_faqs),
        )
        .route(
            &format!("{}/forms/{{slug}}", API_PREFIX),
            get(handlers::forms::get_published_form),
        )
        .route(
            &format!("{}/admin/login", API_PREFIX),
            post(handlers::auth::login),
        )
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(submission_routes);

    // Protected routes (require a valid admin bearer token)
    let protected_routes = admin_routes().layer(axum::middleware::from_fn_with_state(
        auth_state,
        auth_middleware,
    ));

    let app_state_routes = public_routes.merge(protected_routes);

    // Server-level concurrency limit against resource exhaustion under load
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    let app = app_state_routes
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.request_body_limit_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Admin CRUD surface. `/admin/login` is deliberately not here.
fn admin_routes() -> Router<Arc<AppState>> {
    use crate::handlers::*;

    let r = |path: &str| format!("{}/admin{}", API_PREFIX, path);

    Router::new()
        .route(&r("/me"), get(auth::me))
        // Content catalog
        .route(&r("/posts"), post(posts::create_post).get(posts::list_posts))
        .route(
            &r("/posts/{id}"),
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(&r("/works"), post(works::create_work).get(works::list_works))
        .route(
            &r("/works/{id}"),
            get(works::get_work)
                .put(works::update_work)
                .delete(works::delete_work),
        )
        .route(
            &r("/services"),
            post(service_offerings::create_service).get(service_offerings::list_services),
        )
        .route(
            &r("/services/{id}"),
            get(service_offerings::get_service)
                .put(service_offerings::update_service)
                .delete(service_offerings::delete_service),
        )
        .route(&r("/jobs"), post(jobs::create_job).get(jobs::list_jobs))
        .route(
            &r("/jobs/{id}"),
            get(jobs::get_job).put(jobs::update_job).delete(jobs::delete_job),
        )
        .route(
            &r("/testimonials"),
            post(testimonials::create_testimonial).get(testimonials::list_testimonials),
        )
        .route(
            &r("/testimonials/{id}"),
            get(testimonials::get_testimonial)
                .put(testimonials::update_testimonial)
                .delete(testimonials::delete_testimonial),
        )
        .route(&r("/faqs"), post(faqs::create_faq).get(faqs::list_faqs))
        .route(
            &r("/faqs/{id}"),
            get(faqs::get_faq).put(faqs::update_faq).delete(faqs::delete_faq),
        )
        // Form definitions
        .route(&r("/forms"), post(forms::create_form).get(forms::list_forms))
        .route(
            &r("/forms/{id}"),
            get(forms::get_form).put(forms::update_form).delete(forms::delete_form),
        )
        // Intake reads
        .route(
            &r("/contact-submissions"),
            get(contact::list_contact_submissions),
        )
        .route(
            &r("/contact-submissions/{id}"),
            get(contact::get_contact_submission).delete(contact::delete_contact_submission),
        )
        .route(
            &r("/form-submissions"),
            get(forms::list_form_submissions),
        )
        .route(
            &r("/form-submissions/{id}"),
            get(forms::get_form_submission).delete(forms::delete_form_submission),
        )
        .route(
            &r("/applications"),
            get(applications::list_applications),
        )
        .route(
            &r("/applications/{id}"),
            get(applications::get_application).delete(applications::delete_application),
        )
        .route(&r("/consent-events"), get(consent::list_consent_events))
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    };
    Ok(cors)
}
