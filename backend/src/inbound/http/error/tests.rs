//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::validation::ErrorNotification;
use crate::domain::{
    DUPLICATE_EMAIL_MESSAGE, Error, ErrorExposure, STUDENT_NOT_FOUND_MESSAGE,
    UNAUTHORIZED_MESSAGE, UnexpectedFailure,
};

async fn body_of(error: &Error) -> (StatusCode, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let value = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, value)
}

#[rstest]
#[case(Error::validation(vec![ErrorNotification::new("uf", "Campo obrigatório")]), StatusCode::BAD_REQUEST)]
#[case(Error::conflict(DUPLICATE_EMAIL_MESSAGE), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized(UNAUTHORIZED_MESSAGE), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found(STUDENT_NOT_FOUND_MESSAGE), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn validation_failure_lists_notifications() {
    let error = Error::validation(vec![
        ErrorNotification::new("street", "Campo obrigatório"),
        ErrorNotification::new("uf", "Campo obrigatório"),
    ]);
    let (status, body) = body_of(&error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "ok": false,
            "message": "Requisição inválida",
            "errors": [
                { "field": "street", "message": "Campo obrigatório" },
                { "field": "uf", "message": "Campo obrigatório" },
            ],
        })
    );
}

#[rstest]
#[actix_web::test]
async fn conflict_has_no_errors_array() {
    let (_, body) = body_of(&Error::conflict(DUPLICATE_EMAIL_MESSAGE)).await;
    assert_eq!(
        body,
        json!({ "ok": false, "message": DUPLICATE_EMAIL_MESSAGE })
    );
}

#[rstest]
#[case(ErrorExposure::Redacted, "Ocorreu um erro inesperado.")]
#[case(
    ErrorExposure::Verbose,
    "Ocorreu um erro inesperado. Erro: Query - relation \"students\" does not exist"
)]
#[actix_web::test]
async fn unexpected_failures_follow_exposure(
    #[case] exposure: ErrorExposure,
    #[case] expected: &str,
) {
    let failure = UnexpectedFailure::new("Query", "relation \"students\" does not exist");
    let (status, body) = body_of(&Error::unexpected(exposure, &failure)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "ok": false, "message": expected }));
}
