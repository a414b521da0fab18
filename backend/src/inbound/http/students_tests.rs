//! Handler tests for the student endpoints.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use pagination::Page;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{DUPLICATE_DOCUMENT_MESSAGE, ErrorExposure, UnexpectedFailure};
use crate::inbound::http::test_utils::{MockPorts, fixture_student};

fn app(
    ports: MockPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .service(create_student)
        .service(list_students)
        .service(get_student)
        .service(update_student)
        .service(delete_student)
}

fn valid_create_body() -> Value {
    json!({
        "name": "Ana Souza",
        "age": 21,
        "document": "12345678900",
        "email": "ana@example.com",
        "password": "segredo",
    })
}

async fn send(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let service = actix_test::init_service(app(ports)).await;
    let res = actix_test::call_service(&service, request.to_request()).await;
    let status = res.status();
    let body: Value = actix_test::read_body_json(res).await;
    (status, body)
}

#[actix_web::test]
async fn create_returns_201_with_envelope() {
    let id = StudentId::random();
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_create()
        .withf(|draft| draft.document_identification == "12345678900")
        .times(1)
        .return_once(move |_| Ok(fixture_student(id)));

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post()
            .uri("/students")
            .set_json(valid_create_body()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["message"], json!(STUDENT_CREATED_MESSAGE));
    assert_eq!(body["data"]["id"], json!(id.to_string()));
    assert_eq!(body["data"]["documentIdentification"], json!("12345678900"));
    assert!(body["data"].get("password").is_none());
}

#[actix_web::test]
async fn create_reports_every_missing_field_without_calling_port() {
    let mut ports = MockPorts::default();
    ports.students.expect_create().times(0);

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post()
            .uri("/students")
            .set_json(json!({ "name": "Ana" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|n| n["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["age", "document", "email", "password"]);
}

#[actix_web::test]
async fn create_duplicate_document_is_400_without_errors() {
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_create()
        .return_once(|_| Err(Error::conflict(DUPLICATE_DOCUMENT_MESSAGE)));

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post()
            .uri("/students")
            .set_json(valid_create_body()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "ok": false, "message": DUPLICATE_DOCUMENT_MESSAGE })
    );
}

#[actix_web::test]
async fn list_passes_parsed_page_and_returns_pagination() {
    let id = StudentId::random();
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_list()
        .withf(|request| request.limit() == 1 && request.page() == 2)
        .return_once(move |request| Ok(Page::new(vec![fixture_student(id)], request, 3)));

    let (status, body) = send(
        ports,
        actix_test::TestRequest::get().uri("/students?limit=1&page=2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!(STUDENTS_LISTED_MESSAGE));
    assert_eq!(
        body["pagination"],
        json!({ "limit": 1, "page": 2, "count": 3, "totalPages": 3 })
    );
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn list_defaults_to_first_page_of_ten() {
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_list()
        .withf(|request| request.limit() == 10 && request.page() == 1)
        .return_once(|request| Ok(Page::empty(request)));

    let (status, body) = send(ports, actix_test::TestRequest::get().uri("/students")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["totalPages"], json!(1));
}

#[rstest]
#[case("/students?limit=abc", "limit")]
#[case("/students?limit=0", "limit")]
#[case("/students?limit=101", "limit")]
#[case("/students?page=0", "page")]
#[case("/students?page=-2", "page")]
#[actix_web::test]
async fn list_rejects_bad_page_parameters(#[case] uri: &str, #[case] field: &str) {
    let mut ports = MockPorts::default();
    ports.students.expect_list().times(0);

    let (status, body) = send(ports, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], json!(field));
}

#[actix_web::test]
async fn get_with_unparsable_id_is_404() {
    let mut ports = MockPorts::default();
    ports.students.expect_get().times(0);

    let (status, body) = send(
        ports,
        actix_test::TestRequest::get().uri("/students/not-a-uuid"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!(STUDENT_NOT_FOUND_MESSAGE));
}

#[actix_web::test]
async fn update_forwards_only_present_fields() {
    let id = StudentId::random();
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_update()
        .withf(move |target, changes| {
            *target == id && changes.name.is_none() && changes.age == Some(30)
        })
        .return_once(move |_, _| {
            let mut student = fixture_student(id);
            student.age = 30;
            Ok(student)
        });

    let (status, body) = send(
        ports,
        actix_test::TestRequest::put()
            .uri(&format!("/students/{id}"))
            .set_json(json!({ "age": 30 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!(STUDENT_UPDATED_MESSAGE));
    assert_eq!(body["data"]["age"], json!(30));
}

#[actix_web::test]
async fn update_rejects_negative_age() {
    let mut ports = MockPorts::default();
    ports.students.expect_update().times(0);

    let (status, body) = send(
        ports,
        actix_test::TestRequest::put()
            .uri(&format!("/students/{}", StudentId::random()))
            .set_json(json!({ "age": -1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!([{ "field": "age", "message": "Idade deve ser um número inteiro positivo" }])
    );
}

#[actix_web::test]
async fn delete_returns_flagged_record() {
    let id = StudentId::random();
    let mut ports = MockPorts::default();
    ports.students.expect_delete().return_once(move |_| {
        let mut student = fixture_student(id);
        student.deleted = true;
        student.deleted_at = Some(student.created_at);
        Ok(student)
    });

    let (status, body) = send(
        ports,
        actix_test::TestRequest::delete().uri(&format!("/students/{id}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!(STUDENT_DELETED_MESSAGE));
    assert_eq!(body["data"]["deleted"], json!(true));
}

#[actix_web::test]
async fn unexpected_failure_is_500_envelope() {
    let id = StudentId::random();
    let mut ports = MockPorts::default();
    ports.students.expect_get().return_once(|_| {
        Err(Error::unexpected(
            ErrorExposure::Redacted,
            &UnexpectedFailure::new("Connection", "refused"),
        ))
    });

    let (status, body) = send(
        ports,
        actix_test::TestRequest::get().uri(&format!("/students/{id}")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "ok": false, "message": "Ocorreu um erro inesperado." })
    );
}
