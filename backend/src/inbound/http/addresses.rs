//! Address HTTP handlers for the authenticated student.
//!
//! ```text
//! POST   /addresses {"street":"Rua A","addressNumber":"10","zipCode":"99884433","neighborhood":"Centro","city":"Porto Alegre","uf":"RS"}
//! GET    /addresses
//! PUT    /addresses {"city":"Canoas"}
//! DELETE /addresses
//! ```
//!
//! Every route sits behind the session gate; the owner is always the student
//! in the session, never a value from the request.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::validation::{ADDRESS_RULES, RuleSet, ValidationMode};
use crate::domain::{Address, AddressChanges, ApiResult, ErrorEnvelope, NewAddress};
use crate::inbound::http::envelope::ApiEnvelope;
use crate::inbound::http::session::AuthenticatedStudent;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validated::{ValidatedJson, ValidatedPayload};

/// Message returned by `POST /addresses`.
pub const ADDRESS_CREATED_MESSAGE: &str = "Endereço cadastrado";
pub const ADDRESS_FOUND_MESSAGE: &str = "Endereço encontrado com sucesso";
pub const ADDRESS_UPDATED_MESSAGE: &str = "Endereço atualizado com sucesso";
pub const ADDRESS_DELETED_MESSAGE: &str = "Endereço deletado com sucesso";

/// Request body for `POST /addresses`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    #[schema(example = "Rua das Flores")]
    pub street: String,
    #[schema(example = "42")]
    pub address_number: String,
    /// Eight-character postal code.
    #[schema(example = "99884433")]
    pub zip_code: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter federative unit.
    #[schema(example = "RS")]
    pub uf: String,
}

impl ValidatedPayload for CreateAddressRequest {
    const RULES: RuleSet = ADDRESS_RULES;
    const MODE: ValidationMode = ValidationMode::Create;
}

impl From<CreateAddressRequest> for NewAddress {
    fn from(value: CreateAddressRequest) -> Self {
        Self {
            street: value.street,
            address_number: value.address_number,
            zip_code: value.zip_code,
            complement: value.complement,
            neighborhood: value.neighborhood,
            city: value.city,
            uf: value.uf,
        }
    }
}

/// Request body for `PUT /addresses`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAddressRequest {
    pub street: Option<String>,
    pub address_number: Option<String>,
    pub zip_code: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub uf: Option<String>,
}

impl ValidatedPayload for UpdateAddressRequest {
    const RULES: RuleSet = ADDRESS_RULES;
    const MODE: ValidationMode = ValidationMode::Update;
}

impl From<UpdateAddressRequest> for AddressChanges {
    fn from(value: UpdateAddressRequest) -> Self {
        Self {
            street: value.street,
            address_number: value.address_number,
            zip_code: value.zip_code,
            complement: value.complement,
            neighborhood: value.neighborhood,
            city: value.city,
            uf: value.uf,
        }
    }
}

/// Register the authenticated student's address.
#[utoipa::path(
    post,
    path = "/addresses",
    request_body = CreateAddressRequest,
    responses(
        (status = 200, description = "Address created", body = ApiEnvelope<Address>),
        (status = 400, description = "Invalid payload or address already registered", body = ErrorEnvelope),
        (status = 401, description = "No authenticated student", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["addresses"],
    operation_id = "createAddress"
)]
#[post("/addresses")]
pub async fn create_address(
    state: web::Data<HttpState>,
    student: AuthenticatedStudent,
    payload: ValidatedJson<CreateAddressRequest>,
) -> ApiResult<HttpResponse> {
    let address = state
        .addresses
        .create(student.id(), NewAddress::from(payload.into_inner()))
        .await?;
    Ok(ApiEnvelope::with_data(ADDRESS_CREATED_MESSAGE, address).respond(StatusCode::OK))
}

/// Fetch the authenticated student's address.
#[utoipa::path(
    get,
    path = "/addresses",
    responses(
        (status = 200, description = "Address", body = ApiEnvelope<Address>),
        (status = 401, description = "No authenticated student", body = ErrorEnvelope),
        (status = 404, description = "No active address", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["addresses"],
    operation_id = "getAddress"
)]
#[get("/addresses")]
pub async fn get_address(
    state: web::Data<HttpState>,
    student: AuthenticatedStudent,
) -> ApiResult<HttpResponse> {
    let address = state.addresses.get(student.id()).await?;
    Ok(ApiEnvelope::with_data(ADDRESS_FOUND_MESSAGE, address).respond(StatusCode::OK))
}

/// Partially update the authenticated student's address.
#[utoipa::path(
    put,
    path = "/addresses",
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Updated address", body = ApiEnvelope<Address>),
        (status = 400, description = "Invalid payload", body = ErrorEnvelope),
        (status = 401, description = "No authenticated student", body = ErrorEnvelope),
        (status = 404, description = "No active address", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["addresses"],
    operation_id = "updateAddress"
)]
#[put("/addresses")]
pub async fn update_address(
    state: web::Data<HttpState>,
    student: AuthenticatedStudent,
    payload: ValidatedJson<UpdateAddressRequest>,
) -> ApiResult<HttpResponse> {
    let address = state
        .addresses
        .update(student.id(), AddressChanges::from(payload.into_inner()))
        .await?;
    Ok(ApiEnvelope::with_data(ADDRESS_UPDATED_MESSAGE, address).respond(StatusCode::OK))
}

/// Soft-delete the authenticated student's address.
#[utoipa::path(
    delete,
    path = "/addresses",
    responses(
        (status = 200, description = "Deleted address", body = ApiEnvelope<Address>),
        (status = 401, description = "No authenticated student", body = ErrorEnvelope),
        (status = 404, description = "No active address", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["addresses"],
    operation_id = "deleteAddress"
)]
#[delete("/addresses")]
pub async fn delete_address(
    state: web::Data<HttpState>,
    student: AuthenticatedStudent,
) -> ApiResult<HttpResponse> {
    let address = state.addresses.delete(student.id()).await?;
    Ok(ApiEnvelope::with_data(ADDRESS_DELETED_MESSAGE, address).respond(StatusCode::OK))
}

#[cfg(test)]
#[path = "addresses_tests.rs"]
mod tests;
