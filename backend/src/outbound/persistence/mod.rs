//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and domain types and hold no
//! business rules. Connections come from a `bb8` pool over `diesel-async`;
//! the schema is created by the embedded migrations in [`run_migrations`].
//!
//! ```ignore
//! use student_records::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/students")).await?;
//! let students = DieselStudentRepository::new(pool);
//! ```

mod diesel_address_repository;
mod diesel_error_mapping;
mod diesel_student_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_address_repository::DieselAddressRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
