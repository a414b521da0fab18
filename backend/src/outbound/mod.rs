//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: mutex-guarded repositories for database-less runs and tests

pub mod memory;
pub mod persistence;
