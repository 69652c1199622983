//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:3000/docs`
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{LoginRequest, RegisterRequest, UpdatePasswordRequest};
use crate::user_auth::handlers::{LoginResponse, UserView};

/// JWT bearer security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/login, sent as `Bearer <token>`"))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Authentication API",
        version = "1.0.0",
        description = "A simple RESTful API for user authentication using JWT",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::user_auth::handlers::list_users,
        crate::user_auth::handlers::get_user,
        crate::user_auth::handlers::update_user,
        crate::user_auth::handlers::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            UpdatePasswordRequest,
            LoginResponse,
            UserView,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "The user management API"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
