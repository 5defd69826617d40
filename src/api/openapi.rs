//! OpenAPI documentation configuration.
//!
//! Documents the script-facing endpoints (follow button, follow status)
//! plus the error page and health check. Served through Swagger UI.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{error_handler, follow_handler};
use crate::api::routes;
use crate::api::views::ErrorView;
use crate::config::SESSION_COOKIE_NAME;

/// OpenAPI documentation for social-board
#[derive(OpenApi)]
#[openapi(
    info(
        title = "social-board",
        version = "0.1.0",
        description = "Short-post timeline with follows, profiles and user search",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Follow endpoints
        follow_handler::follow,
        follow_handler::unfollow,
        follow_handler::status,
        // Pages
        error_handler::error_page,
        // Operations
        routes::health,
    ),
    components(
        schemas(
            ErrorView,
            routes::HealthResponse,
            routes::ServiceStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Follow", description = "Follow and unfollow users"),
        (name = "Pages", description = "Page models"),
        (name = "Operations", description = "Health checks")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the session cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    SESSION_COOKIE_NAME,
                    "Session token set by /user/login",
                ))),
            );
        }
    }
}
