//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI annotations,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use std::path::Path;

use axum::{
    extract::{MatchedPath, Request},
    Router,
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Registers the `bearer_auth` scheme referenced by protected routes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Each endpoint is annotated with OpenAPI metadata via utoipa, which are collected into
/// a unified OpenAPI document served at `/api/docs/openapi.json`, with Swagger UI at
/// `/api/docs`.
///
/// # Arguments
/// - `image_dir` - Directory holding uploaded planet images
/// - `image_base_url` - URL prefix of stored images; served from `image_dir` when it is a
///   local path such as `/images`
///
/// # Registered Endpoints
/// - `/api/planet` - Catalog listing, lookup, management, image upload and draft addition
/// - `/api/planet-system` - Draft summary, listing, lookup, star edits, formation, moderation
///   and draft deletion
/// - `/api/temperature-req` - Member distance edits and removal
/// - `/api/user` - Registration, login, logout and profiles
///
/// # Returns
/// An Axum `Router<AppState>` with request tracing, ready to be given its state.
pub fn routes(image_dir: &Path, image_base_url: &str) -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Orrery", description = "Planet system submission and moderation API"),
        modifiers(&SecurityAddon),
        tags(
            (name = controller::planet::PLANET_TAG, description = "Planet catalog API routes"),
            (name = controller::planet_system::PLANET_SYSTEM_TAG, description = "Planet system lifecycle API routes"),
            (name = controller::temperature_request::TEMPERATURE_REQUEST_TAG, description = "Draft membership API routes"),
            (name = controller::user::USER_TAG, description = "User account API routes"),
        )
    )]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            controller::planet::list_planets,
            controller::planet::create_planet
        ))
        .routes(routes!(
            controller::planet::get_planet,
            controller::planet::update_planet,
            controller::planet::delete_planet
        ))
        .routes(routes!(controller::planet::upload_planet_image))
        .routes(routes!(controller::planet::add_planet_to_draft))
        .routes(routes!(controller::planet_system::get_draft_summary))
        .routes(routes!(controller::planet_system::list_planet_systems))
        .routes(routes!(
            controller::planet_system::get_planet_system,
            controller::planet_system::update_planet_system
        ))
        .routes(routes!(controller::planet_system::form_planet_system))
        .routes(routes!(controller::planet_system::moderate_planet_system))
        .routes(routes!(controller::planet_system::delete_draft))
        .routes(routes!(
            controller::temperature_request::set_member_distance,
            controller::temperature_request::remove_member
        ))
        .routes(routes!(controller::user::register))
        .routes(routes!(controller::user::login))
        .routes(routes!(controller::user::logout))
        .routes(routes!(controller::user::get_user))
        .routes(routes!(controller::user::update_me))
        .split_for_parts();

    let mut routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    let image_base_url = image_base_url.trim_end_matches('/');
    if image_base_url.starts_with('/') && !image_base_url.is_empty() {
        routes = routes.nest_service(image_base_url, ServeDir::new(image_dir));
    }

    routes.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request| {
                let method = req.method();
                let uri = req.uri();

                let matched_path = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|matched_path| matched_path.as_str());

                tracing::info_span!("request", %method, %uri, matched_path)
            })
            .on_request(DefaultOnRequest::new().level(tracing::Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
    )
}
