//! Student HTTP handlers.
//!
//! ```text
//! POST   /students {"name":"Ana","age":21,"document":"12345678900","email":"ana@example.com","password":"segredo"}
//! GET    /students?limit=10&page=1
//! GET    /students/{id}
//! PUT    /students/{id} {"name":"Ana Maria"}
//! DELETE /students/{id}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{PageParams, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::validation::{
    ErrorNotification, INVALID_DATA_MESSAGE, RuleSet, STUDENT_CREATE_RULES,
    STUDENT_UPDATE_RULES, ValidationMode,
};
use crate::domain::{
    ApiResult, Error, ErrorEnvelope, NewStudent, STUDENT_NOT_FOUND_MESSAGE, Student,
    StudentChanges, StudentId,
};
use crate::inbound::http::envelope::ApiEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validated::{ValidatedJson, ValidatedPayload};

/// Message returned by `POST /students`.
pub const STUDENT_CREATED_MESSAGE: &str = "Aluno cadastrado com sucesso!";
/// Message returned by `GET /students`.
pub const STUDENTS_LISTED_MESSAGE: &str = "Alunos listados com sucesso";
pub const STUDENT_FOUND_MESSAGE: &str = "Aluno encontrado";
pub const STUDENT_UPDATED_MESSAGE: &str = "Aluno atualizado";
pub const STUDENT_DELETED_MESSAGE: &str = "Aluno deletado com sucesso";

/// Request body for `POST /students`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateStudentRequest {
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[schema(example = 21, minimum = 0)]
    pub age: i32,
    /// National identity document (CPF).
    #[schema(example = "12345678900")]
    pub document: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub password: String,
}

impl ValidatedPayload for CreateStudentRequest {
    const RULES: RuleSet = STUDENT_CREATE_RULES;
    const MODE: ValidationMode = ValidationMode::Create;
}

impl From<CreateStudentRequest> for NewStudent {
    fn from(value: CreateStudentRequest) -> Self {
        Self {
            name: value.name,
            age: value.age,
            document_identification: value.document,
            email_address: value.email,
            password: value.password,
        }
    }
}

/// Request body for `PUT /students/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl ValidatedPayload for UpdateStudentRequest {
    const RULES: RuleSet = STUDENT_UPDATE_RULES;
    const MODE: ValidationMode = ValidationMode::Update;
}

impl From<UpdateStudentRequest> for StudentChanges {
    fn from(value: UpdateStudentRequest) -> Self {
        Self {
            name: value.name,
            age: value.age,
        }
    }
}

/// Query parameters accepted by `GET /students`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListStudentsQuery {
    /// Page size, `1..=100`; defaults to 10.
    pub limit: Option<String>,
    /// One-based page number; defaults to 1.
    pub page: Option<String>,
}

fn page_request(query: ListStudentsQuery) -> Result<PageRequest, Error> {
    PageRequest::try_from(PageParams {
        limit: query.limit,
        page: query.page,
    })
    .map_err(|err: PageRequestError| {
        Error::validation(vec![ErrorNotification::new(
            err.field(),
            INVALID_DATA_MESSAGE,
        )])
    })
}

/// Unparsable identifiers cannot name a stored student.
fn parse_student_id(raw: &str) -> Result<StudentId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(STUDENT_NOT_FOUND_MESSAGE))
}

/// Register a student.
#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = ApiEnvelope<Student>),
        (status = 400, description = "Invalid payload or duplicate document/e-mail", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: ValidatedJson<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let student = state
        .students
        .create(NewStudent::from(payload.into_inner()))
        .await?;
    Ok(ApiEnvelope::with_data(STUDENT_CREATED_MESSAGE, student).respond(StatusCode::CREATED))
}

/// List active students, newest first.
#[utoipa::path(
    get,
    path = "/students",
    params(ListStudentsQuery),
    responses(
        (status = 200, description = "One page of students", body = ApiEnvelope<Vec<Student>>),
        (status = 400, description = "Invalid page parameters", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    query: web::Query<ListStudentsQuery>,
) -> ApiResult<HttpResponse> {
    let request = page_request(query.into_inner())?;
    let page = state.students.list(request).await?;
    Ok(ApiEnvelope::with_page(STUDENTS_LISTED_MESSAGE, page).respond(StatusCode::OK))
}

/// Fetch one active student.
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student", body = ApiEnvelope<Student>),
        (status = 404, description = "Unknown or deleted student", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_student_id(&path)?;
    let student = state.students.get(&id).await?;
    Ok(ApiEnvelope::with_data(STUDENT_FOUND_MESSAGE, student).respond(StatusCode::OK))
}

/// Change a student's name and/or age.
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Updated student", body = ApiEnvelope<Student>),
        (status = 400, description = "Invalid payload", body = ErrorEnvelope),
        (status = 404, description = "Unknown or deleted student", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: ValidatedJson<UpdateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_student_id(&path)?;
    let student = state
        .students
        .update(&id, StudentChanges::from(payload.into_inner()))
        .await?;
    Ok(ApiEnvelope::with_data(STUDENT_UPDATED_MESSAGE, student).respond(StatusCode::OK))
}

/// Soft-delete a student.
#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Deleted student", body = ApiEnvelope<Student>),
        (status = 404, description = "Unknown or already deleted student", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_student_id(&path)?;
    let student = state.students.delete(&id).await?;
    Ok(ApiEnvelope::with_data(STUDENT_DELETED_MESSAGE, student).respond(StatusCode::OK))
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
