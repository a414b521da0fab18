//! Wiring of repositories into the domain services behind [`HttpState`].

use std::sync::Arc;

use mockable::DefaultClock;
use student_records::domain::ports::{AddressRepository, StudentRepository};
use student_records::domain::{AddressService, Deadline, StudentLoginService, StudentService};
use student_records::inbound::http::state::HttpState;
use student_records::outbound::memory::{InMemoryAddressRepository, InMemoryStudentRepository};
use student_records::outbound::persistence::{DieselAddressRepository, DieselStudentRepository};
use tracing::info;

use super::ServerConfig;

/// Build the handler state, backed by PostgreSQL when a pool is configured
/// and by in-memory repositories otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!("persisting students in PostgreSQL");
            services_over(
                Arc::new(DieselStudentRepository::new(pool.clone())),
                Arc::new(DieselAddressRepository::new(pool.clone())),
                config.deadline,
            )
        }
        None => {
            info!("no database configured; keeping students in memory");
            services_over(
                Arc::new(InMemoryStudentRepository::new()),
                Arc::new(InMemoryAddressRepository::new()),
                config.deadline,
            )
        }
    }
}

/// Construct the three driving services over one pair of repositories.
fn services_over<S, A>(students: Arc<S>, addresses: Arc<A>, deadline: Deadline) -> HttpState
where
    S: StudentRepository + 'static,
    A: AddressRepository + 'static,
{
    let clock = Arc::new(DefaultClock);
    HttpState::new(
        Arc::new(StudentService::new(students.clone(), clock.clone(), deadline)),
        Arc::new(AddressService::new(
            addresses,
            students.clone(),
            clock,
            deadline,
        )),
        Arc::new(StudentLoginService::new(students, deadline)),
    )
}
