//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Address, AddressChanges, AddressId, Student, StudentChanges, StudentId};

use super::schema::{addresses, students};

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub document_identification: String,
    pub email_address: String,
    pub password: String,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: StudentId::from_uuid(row.id),
            name: row.name,
            age: row.age,
            document_identification: row.document_identification,
            email_address: row.email_address,
            password: row.password,
            deleted: row.deleted,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating student records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub age: i32,
    pub document_identification: &'a str,
    pub email_address: &'a str,
    pub password: &'a str,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Student> for NewStudentRow<'a> {
    fn from(student: &'a Student) -> Self {
        Self {
            id: *student.id.as_uuid(),
            name: &student.name,
            age: student.age,
            document_identification: &student.document_identification,
            email_address: &student.email_address,
            password: &student.password,
            deleted: student.deleted,
            created_at: student.created_at,
        }
    }
}

/// Changeset for partial student updates; `None` columns are left alone.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentUpdate<'a> {
    pub name: Option<&'a str>,
    pub age: Option<i32>,
}

impl<'a> From<&'a StudentChanges> for StudentUpdate<'a> {
    fn from(changes: &'a StudentChanges) -> Self {
        Self {
            name: changes.name.as_deref(),
            age: changes.age,
        }
    }
}

/// Row struct for reading from the addresses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AddressRow {
    pub id: Uuid,
    pub street: String,
    pub address_number: String,
    pub zip_code: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub uf: String,
    pub student_id: Uuid,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::from_uuid(row.id),
            street: row.street,
            address_number: row.address_number,
            zip_code: row.zip_code,
            complement: row.complement,
            neighborhood: row.neighborhood,
            city: row.city,
            uf: row.uf,
            student_id: StudentId::from_uuid(row.student_id),
            deleted: row.deleted,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating address records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = addresses)]
pub(crate) struct NewAddressRow<'a> {
    pub id: Uuid,
    pub street: &'a str,
    pub address_number: &'a str,
    pub zip_code: &'a str,
    pub complement: Option<&'a str>,
    pub neighborhood: &'a str,
    pub city: &'a str,
    pub uf: &'a str,
    pub student_id: Uuid,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Address> for NewAddressRow<'a> {
    fn from(address: &'a Address) -> Self {
        Self {
            id: *address.id.as_uuid(),
            street: &address.street,
            address_number: &address.address_number,
            zip_code: &address.zip_code,
            complement: address.complement.as_deref(),
            neighborhood: &address.neighborhood,
            city: &address.city,
            uf: &address.uf,
            student_id: *address.student_id.as_uuid(),
            deleted: address.deleted,
            created_at: address.created_at,
        }
    }
}

/// Changeset for partial address updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = addresses)]
pub(crate) struct AddressUpdate<'a> {
    pub street: Option<&'a str>,
    pub address_number: Option<&'a str>,
    pub zip_code: Option<&'a str>,
    pub complement: Option<&'a str>,
    pub neighborhood: Option<&'a str>,
    pub city: Option<&'a str>,
    pub uf: Option<&'a str>,
}

impl<'a> From<&'a AddressChanges> for AddressUpdate<'a> {
    fn from(changes: &'a AddressChanges) -> Self {
        Self {
            street: changes.street.as_deref(),
            address_number: changes.address_number.as_deref(),
            zip_code: changes.zip_code.as_deref(),
            complement: changes.complement.as_deref(),
            neighborhood: changes.neighborhood.as_deref(),
            city: changes.city.as_deref(),
            uf: changes.uf.as_deref(),
        }
    }
}

/// Changeset flagging a row as soft-deleted.
#[derive(Debug, Clone, Copy, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentDeletion {
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Changeset flagging an address as soft-deleted.
#[derive(Debug, Clone, Copy, AsChangeset)]
#[diesel(table_name = addresses)]
pub(crate) struct AddressDeletion {
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}
