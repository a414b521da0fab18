//! HTTP inbound adapter exposing the student records REST endpoints.

pub mod addresses;
pub mod envelope;
pub mod error;
pub mod health;
pub mod login;
pub mod session;
pub mod session_config;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod validated;

use actix_web::web;

pub use crate::domain::ApiResult;

/// Register every business route on `cfg`.
///
/// Address routes enforce the session through their
/// [`session::AuthenticatedStudent`] extractor; the other routes are open.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(students::create_student)
        .service(students::list_students)
        .service(students::get_student)
        .service(students::update_student)
        .service(students::delete_student)
        .service(addresses::create_address)
        .service(addresses::get_address)
        .service(addresses::update_address)
        .service(addresses::delete_address)
        .service(login::login)
        .service(login::logout);
}
