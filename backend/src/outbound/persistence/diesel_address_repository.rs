//! PostgreSQL-backed `AddressRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AddressPersistenceError, AddressRepository};
use crate::domain::{Address, AddressChanges, StudentId};

use super::diesel_error_mapping::{
    ADDRESS_OWNER_INDEX, map_basic_diesel_error, pool_error_message, violated_unique_index,
};
use super::models::{AddressDeletion, AddressRow, AddressUpdate, NewAddressRow};
use super::pool::{DbPool, PoolError};
use super::schema::addresses;

/// Diesel-backed implementation of the `AddressRepository` port.
///
/// Rows are addressed by owner; the `addresses_student_id_active_key` index
/// keeps a single active row per student.
#[derive(Clone)]
pub struct DieselAddressRepository {
    pool: DbPool,
}

impl DieselAddressRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AddressPersistenceError {
    AddressPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> AddressPersistenceError {
    if violated_unique_index(&error) == Some(ADDRESS_OWNER_INDEX) {
        return AddressPersistenceError::duplicate();
    }
    map_basic_diesel_error(
        error,
        |message| AddressPersistenceError::query(message),
        |message| AddressPersistenceError::connection(message),
    )
}

#[async_trait]
impl AddressRepository for DieselAddressRepository {
    async fn find_active_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<Address>, AddressPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = addresses::table
            .filter(addresses::student_id.eq(student_id.as_uuid()))
            .filter(addresses::deleted.eq(false))
            .select(AddressRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Address::from))
    }

    async fn insert(&self, address: &Address) -> Result<(), AddressPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(addresses::table)
            .values(NewAddressRow::from(address))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        student_id: &StudentId,
        changes: &AddressChanges,
    ) -> Result<Option<Address>, AddressPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            addresses::table
                .filter(addresses::student_id.eq(student_id.as_uuid()))
                .filter(addresses::deleted.eq(false)),
        )
        .set(AddressUpdate::from(changes))
        .returning(AddressRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        Ok(row.map(Address::from))
    }

    async fn soft_delete(
        &self,
        student_id: &StudentId,
        deleted_at: DateTime<Utc>,
    ) -> Result<Option<Address>, AddressPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            addresses::table
                .filter(addresses::student_id.eq(student_id.as_uuid()))
                .filter(addresses::deleted.eq(false)),
        )
        .set(AddressDeletion {
            deleted: true,
            deleted_at: Some(deleted_at),
        })
        .returning(AddressRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        Ok(row.map(Address::from))
    }
}
