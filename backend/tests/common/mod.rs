//! Application assembly shared by the HTTP integration suites.
//!
//! Mirrors the production wiring with in-memory repositories so the suites
//! need no database.

use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;
use serde_json::{Value, json};
use student_records::Trace;
use student_records::domain::{AddressService, Deadline, StudentLoginService, StudentService};
use student_records::inbound::http::configure;
use student_records::inbound::http::session_config::SessionSettings;
use student_records::inbound::http::state::HttpState;
use student_records::outbound::memory::{InMemoryAddressRepository, InMemoryStudentRepository};

/// Handler state over fresh in-memory repositories.
pub fn memory_state() -> web::Data<HttpState> {
    let students = Arc::new(InMemoryStudentRepository::new());
    let addresses = Arc::new(InMemoryAddressRepository::new());
    let clock = Arc::new(DefaultClock);
    let deadline = Deadline::default();
    web::Data::new(HttpState::new(
        Arc::new(StudentService::new(students.clone(), clock.clone(), deadline)),
        Arc::new(AddressService::new(
            addresses,
            students.clone(),
            clock,
            deadline,
        )),
        Arc::new(StudentLoginService::new(students, deadline)),
    ))
}

/// The routed application with session and trace middleware.
pub fn app(
    state: web::Data<HttpState>,
    key: Key,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(
            SessionSettings {
                key,
                cookie_secure: false,
                same_site: SameSite::Lax,
            }
            .middleware(),
        )
        .wrap(Trace)
        .configure(configure)
}

/// A valid `POST /students` body with the given document and e-mail.
pub fn student_body(document: &str, email: &str) -> Value {
    json!({
        "name": "Ana Souza",
        "age": 21,
        "document": document,
        "email": email,
        "password": "segredo",
    })
}

/// A valid `POST /addresses` body.
pub fn address_body() -> Value {
    json!({
        "street": "Rua das Flores",
        "addressNumber": "42",
        "zipCode": "99884433",
        "neighborhood": "Centro",
        "city": "Porto Alegre",
        "uf": "RS",
    })
}
