//! OpenAPI document for the student records API.
//!
//! Served by Swagger UI in debug builds. Request and response types carry
//! their own `ToSchema` derives; this module only gathers them.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::validation::ErrorNotification;
use crate::domain::{Address, ErrorEnvelope, Student};
use crate::inbound::http::addresses::{CreateAddressRequest, UpdateAddressRequest};
use crate::inbound::http::login::{LoginRequest, LoginResponse};
use crate::inbound::http::students::{CreateStudentRequest, UpdateStudentRequest};

/// Adds the session cookie security scheme.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "Student records API",
        description = "Student and address records with session-scoped address management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::addresses::create_address,
        crate::inbound::http::addresses::get_address,
        crate::inbound::http::addresses::update_address,
        crate::inbound::http::addresses::delete_address,
        crate::inbound::http::login::login,
        crate::inbound::http::login::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Student,
        Address,
        ErrorEnvelope,
        ErrorNotification,
        CreateStudentRequest,
        UpdateStudentRequest,
        CreateAddressRequest,
        UpdateAddressRequest,
        LoginRequest,
        LoginResponse,
    )),
    tags(
        (name = "students", description = "Student registration and lookup"),
        (name = "addresses", description = "Address of the logged-in student"),
        (name = "session", description = "Login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
