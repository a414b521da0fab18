//! Student addresses.
//!
//! Each student owns at most one active address. Addresses are only ever
//! reached through the authenticated student, never by their own id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::StudentId;

pub const DUPLICATE_ADDRESS_MESSAGE: &str = "Já existe um endereço cadastrado para o aluno.";
pub const ADDRESS_NOT_FOUND_MESSAGE: &str = "Nenhum endereço encontrado para o aluno.";

/// Address identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(Uuid);

impl AddressId {
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

/// Persisted address.
///
/// ## Invariants
/// - `zip_code` holds exactly 8 characters.
/// - `uf` holds exactly 2 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[schema(value_type = String, example = "9b2d0c57-4f0e-4f4e-9bd6-0b7f1f5f7a10")]
    pub id: AddressId,
    #[schema(example = "Rua das Flores")]
    pub street: String,
    #[schema(example = "42")]
    pub address_number: String,
    #[schema(example = "99884433")]
    pub zip_code: String,
    pub complement: Option<String>,
    #[schema(example = "Centro")]
    pub neighborhood: String,
    #[schema(example = "Porto Alegre")]
    pub city: String,
    #[schema(example = "RS")]
    pub uf: String,
    #[schema(value_type = String)]
    pub student_id: StudentId,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Draft for an address that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub street: String,
    pub address_number: String,
    pub zip_code: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub uf: String,
}

impl NewAddress {
    /// Materialise the draft into an active address owned by `student_id`.
    pub fn into_address(
        self,
        id: AddressId,
        student_id: StudentId,
        created_at: DateTime<Utc>,
    ) -> Address {
        Address {
            id,
            street: self.street,
            address_number: self.address_number,
            zip_code: self.zip_code,
            complement: self.complement,
            neighborhood: self.neighborhood,
            city: self.city,
            uf: self.uf,
            student_id,
            deleted: false,
            deleted_at: None,
            created_at,
        }
    }
}

/// Partial update of an address. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressChanges {
    pub street: Option<String>,
    pub address_number: Option<String>,
    pub zip_code: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub uf: Option<String>,
}

impl AddressChanges {
    /// Whether applying the changes would leave the record untouched.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the changes to an in-memory copy of an address.
    pub fn apply_to(&self, address: &mut Address) {
        fn set(target: &mut String, value: Option<&String>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
        set(&mut address.street, self.street.as_ref());
        set(&mut address.address_number, self.address_number.as_ref());
        set(&mut address.zip_code, self.zip_code.as_ref());
        set(&mut address.neighborhood, self.neighborhood.as_ref());
        set(&mut address.city, self.city.as_ref());
        set(&mut address.uf, self.uf.as_ref());
        if self.complement.is_some() {
            address.complement.clone_from(&self.complement);
        }
    }
}
