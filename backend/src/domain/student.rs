//! Student records.
//!
//! Students are soft-deleted: the row keeps its data, `deleted` flips to
//! `true` and `deleted_at` records when. Every lookup exposed by the ports
//! only ever sees active (non-deleted) students.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message returned when a student lookup misses.
pub const STUDENT_NOT_FOUND_MESSAGE: &str = "O aluno não encontrado na base de dados";
/// Message returned when a document is already taken.
pub const DUPLICATE_DOCUMENT_MESSAGE: &str = "Documento CPF já registrado por outro aluno";
/// Message returned when an e-mail address is already taken.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Endereço de e-mail já registrado por outro aluno";

/// Stable student identifier.
///
/// # Examples
/// ```
/// use student_records::domain::StudentId;
///
/// let id: StudentId = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().expect("uuid");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!("not-a-uuid".parse::<StudentId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for StudentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Persisted student.
///
/// The password is stored as given and never serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: StudentId,
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[schema(example = 21)]
    pub age: i32,
    #[schema(example = "12345678900")]
    pub document_identification: String,
    #[schema(example = "ana@example.com")]
    pub email_address: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Draft for a student that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: i32,
    pub document_identification: String,
    pub email_address: String,
    pub password: String,
}

impl NewStudent {
    /// Materialise the draft into an active student.
    pub fn into_student(self, id: StudentId, created_at: DateTime<Utc>) -> Student {
        Student {
            id,
            name: self.name,
            age: self.age,
            document_identification: self.document_identification,
            email_address: self.email_address,
            password: self.password,
            deleted: false,
            deleted_at: None,
            created_at,
        }
    }
}

/// Partial update of a student. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl StudentChanges {
    /// Whether applying the changes would leave the record untouched.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }

    /// Apply the changes to an in-memory copy of a student.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name.clone_from(name);
        }
        if let Some(age) = self.age {
            student.age = age;
        }
    }
}
