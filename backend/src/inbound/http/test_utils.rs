//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::ports::{MockAddressBook, MockLoginService, MockStudentDirectory};
use crate::domain::{Address, AddressId, NewAddress, NewStudent, Student, StudentId};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;

/// Cookie session over a fresh key, without the `Secure` flag so plain HTTP
/// test requests carry it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
    .middleware()
}

/// Mock ports wired into an [`HttpState`]; unset mocks reject any call.
#[derive(Default)]
pub struct MockPorts {
    pub students: MockStudentDirectory,
    pub addresses: MockAddressBook,
    pub login: MockLoginService,
}

impl MockPorts {
    /// Move the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.students),
            Arc::new(self.addresses),
            Arc::new(self.login),
        )
    }
}

/// Timestamp shared by fixture records.
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 8, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Active student with fixed field values.
pub fn fixture_student(id: StudentId) -> Student {
    NewStudent {
        name: "Ana Souza".into(),
        age: 21,
        document_identification: "12345678900".into(),
        email_address: "ana@example.com".into(),
        password: "segredo".into(),
    }
    .into_student(id, fixture_time())
}

/// Active address owned by `owner`.
pub fn fixture_address(owner: StudentId) -> Address {
    NewAddress {
        street: "Rua das Flores".into(),
        address_number: "42".into(),
        zip_code: "99884433".into(),
        complement: Some("Apto 3".into()),
        neighborhood: "Centro".into(),
        city: "Porto Alegre".into(),
        uf: "RS".into(),
    }
    .into_address(AddressId::random(), owner, fixture_time())
}
