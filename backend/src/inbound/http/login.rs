//! Login and logout handlers.
//!
//! ```text
//! POST /login {"email":"ana@example.com","password":"segredo"}
//! POST /logout
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::validation::{
    ErrorNotification, LOGIN_RULES, RuleSet, ValidationMode,
};
use crate::domain::{ApiResult, Error, ErrorEnvelope, LoginCredentials, LoginValidationError};
use crate::inbound::http::envelope::ApiEnvelope;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validated::{ValidatedJson, ValidatedPayload};

/// Message returned after a successful login.
pub const LOGIN_MESSAGE: &str = "Login realizado com sucesso";
/// Message returned after logout.
pub const LOGOUT_MESSAGE: &str = "Sessão encerrada";

/// Login request body.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub password: String,
}

impl ValidatedPayload for LoginRequest {
    const RULES: RuleSet = LOGIN_RULES;
    const MODE: ValidationMode = ValidationMode::Create;
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Identity returned by a successful login.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub student_id: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let notification = match err {
        LoginValidationError::EmptyEmail => {
            ErrorNotification::new("email", "E-mail não pode ser vazio")
        }
        LoginValidationError::EmptyPassword => {
            ErrorNotification::new("password", "Senha não pode ser vazia")
        }
    };
    Error::validation(vec![notification])
}

/// Authenticate a student and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = ApiEnvelope<LoginResponse>,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid payload", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: ValidatedJson<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let student_id = state.login.authenticate(&credentials).await?;
    session.persist_student(&student_id)?;
    let body = LoginResponse {
        student_id: student_id.to_string(),
    };
    Ok(ApiEnvelope::with_data(LOGIN_MESSAGE, body).respond(StatusCode::OK))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    ApiEnvelope::<()>::message_only(LOGOUT_MESSAGE).respond(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{INVALID_CREDENTIALS_MESSAGE, StudentId};
    use crate::inbound::http::session::AuthenticatedStudent;
    use crate::inbound::http::test_utils::{MockPorts, test_session_middleware};
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn test_app(
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
            .wrap(test_session_middleware())
            .app_data(web::Data::new(ports.into_state()))
            .service(login)
            .service(logout)
            .route(
                "/whoami",
                web::get().to(|student: AuthenticatedStudent| async move {
                    HttpResponse::Ok().body(student.id().to_string())
                }),
            )
    }

    #[actix_web::test]
    async fn login_sets_session_for_authenticated_student() {
        let id = StudentId::random();
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_authenticate()
            .withf(|creds| creds.email() == "ana@example.com" && creds.password() == "segredo")
            .return_once(move |_| Ok(id));
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "email": "ana@example.com", "password": "segredo" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie set");
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], json!(LOGIN_MESSAGE));
        assert_eq!(body["data"]["studentId"], json!(id.to_string()));

        let whoami = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(whoami.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(whoami).await, id.to_string());
    }

    #[actix_web::test]
    async fn wrong_credentials_are_unauthorised() {
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_authenticate()
            .return_once(|_| Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)));
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "email": "ana@example.com", "password": "errada" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({ "ok": false, "message": INVALID_CREDENTIALS_MESSAGE })
        );
    }

    #[rstest]
    #[case(json!({ "email": "", "password": "segredo" }), "email", "E-mail não pode ser vazio")]
    #[case(json!({ "email": "ana@example.com", "password": "" }), "password", "Senha não pode ser vazia")]
    #[case(json!({ "password": "segredo" }), "email", "Campo obrigatório")]
    #[actix_web::test]
    async fn invalid_payload_never_authenticates(
        #[case] payload: Value,
        #[case] field: &str,
        #[case] message: &str,
    ) {
        let mut ports = MockPorts::default();
        ports.login.expect_authenticate().times(0);
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["errors"], json!([{ "field": field, "message": message }]));
    }

    #[actix_web::test]
    async fn logout_reports_closed_session() {
        let app = actix_test::init_service(test_app(MockPorts::default())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/logout").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({ "ok": true, "message": LOGOUT_MESSAGE }));
    }
}
