//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.
//!
//! Every query filters on `deleted = false`. Inserts rely on the partial
//! unique indexes so concurrent registrations of the same document or e-mail
//! cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StudentPersistenceError, StudentRepository};
use crate::domain::{Student, StudentChanges, StudentId};

use super::diesel_error_mapping::{
    STUDENT_DOCUMENT_INDEX, STUDENT_EMAIL_INDEX, map_basic_diesel_error, pool_error_message,
    violated_unique_index,
};
use super::models::{NewStudentRow, StudentDeletion, StudentRow, StudentUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel-backed implementation of the `StudentRepository` port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_active(
        &self,
        query: students::BoxedQuery<'_, Pg>,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = query
            .filter(students::deleted.eq(false))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Student::from))
    }
}

fn map_pool_error(error: PoolError) -> StudentPersistenceError {
    StudentPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> StudentPersistenceError {
    match violated_unique_index(&error) {
        Some(STUDENT_DOCUMENT_INDEX) => StudentPersistenceError::duplicate_document(),
        Some(STUDENT_EMAIL_INDEX) => StudentPersistenceError::duplicate_email(),
        _ => map_basic_diesel_error(
            error,
            |message| StudentPersistenceError::query(message),
            |message| StudentPersistenceError::connection(message),
        ),
    }
}

fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

fn offset_to_i64(offset: u64) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn find_active_by_id(
        &self,
        id: &StudentId,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        let query = students::table.filter(students::id.eq(*id.as_uuid()));
        self.find_active(query.into_boxed()).await
    }

    async fn find_active_by_document(
        &self,
        document: &str,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        let query = students::table.filter(students::document_identification.eq(document));
        self.find_active(query.into_boxed()).await
    }

    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        let query = students::table.filter(students::email_address.eq(email));
        self.find_active(query.into_boxed()).await
    }

    async fn insert(&self, student: &Student) -> Result<(), StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(students::table)
            .values(NewStudentRow::from(student))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: &StudentId,
        changes: &StudentChanges,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            students::table
                .filter(students::id.eq(id.as_uuid()))
                .filter(students::deleted.eq(false)),
        )
        .set(StudentUpdate::from(changes))
        .returning(StudentRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        Ok(row.map(Student::from))
    }

    async fn soft_delete(
        &self,
        id: &StudentId,
        deleted_at: DateTime<Utc>,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            students::table
                .filter(students::id.eq(id.as_uuid()))
                .filter(students::deleted.eq(false)),
        )
        .set(StudentDeletion {
            deleted: true,
            deleted_at: Some(deleted_at),
        })
        .returning(StudentRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        Ok(row.map(Student::from))
    }

    async fn count_active(&self) -> Result<u64, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = students::table
            .filter(students::deleted.eq(false))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count_to_u64(count))
    }

    async fn list_active(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = students::table
            .filter(students::deleted.eq(false))
            .order((students::created_at.desc(), students::id.desc()))
            .offset(offset_to_i64(offset))
            .limit(i64::from(limit))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Student::from).collect())
    }
}
