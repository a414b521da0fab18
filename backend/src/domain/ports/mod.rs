//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`StudentDirectory`, `AddressBook`, `LoginService`) are implemented
//! by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod address_book;
mod address_repository;
mod login_service;
mod student_directory;
mod student_repository;

#[cfg(test)]
pub use address_book::MockAddressBook;
pub use address_book::AddressBook;
#[cfg(test)]
pub use address_repository::MockAddressRepository;
pub use address_repository::{AddressPersistenceError, AddressRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use student_directory::MockStudentDirectory;
pub use student_directory::StudentDirectory;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentPersistenceError, StudentRepository};
