//! Registration, login and account handlers.
//!
//! ```text
//! POST /register {"login":"alice","password":"s3cret"}
//! POST /login    {"login":"alice","password":"s3cret"}
//! GET  /api/account/me  (Authorization: Bearer <token>)
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError, TokenClaims};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Body returned by a successful registration.
pub const REGISTERED_MESSAGE: &str = "User registered successfully";

/// Request body for `POST /register` and `POST /login`.
#[derive(Deserialize, ToSchema)]
pub struct AccountRequest {
    #[schema(example = "alice")]
    pub login: String,
    #[schema(example = "s3cret", format = Password)]
    pub password: String,
}

/// Response body for `GET /api/account/me`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WhoAmIResponse {
    #[schema(example = "alice")]
    pub username: String,
}

impl TryFrom<&AccountRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &AccountRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.login, &value.password)
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = AccountRequest,
    responses(
        (status = 201, description = "User registered", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request format, blank login or login taken", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["account"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<AccountRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(&*payload)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    state.accounts.register(&credentials).await?;
    Ok(HttpResponse::Created()
        .content_type(ContentType::plaintext())
        .body(REGISTERED_MESSAGE))
}

/// Exchange credentials for a bearer token.
///
/// The body is the ready-to-use header value, `Bearer <token>`.
#[utoipa::path(
    post,
    path = "/login",
    request_body = AccountRequest,
    responses(
        (status = 200, description = "Bearer token", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request format", body = String, content_type = "text/plain"),
        (status = 401, description = "Invalid credentials", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["account"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<AccountRequest>,
) -> ApiResult<HttpResponse> {
    // A blank login can never match a stored user.
    let credentials = LoginCredentials::try_from(&*payload)
        .map_err(|_| Error::unauthorized("Invalid credentials"))?;
    let token = state.accounts.login(&credentials).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(token.to_bearer_string()))
}

/// Report the authenticated username.
#[utoipa::path(
    get,
    path = "/api/account/me",
    responses(
        (status = 200, description = "Authenticated user", body = WhoAmIResponse),
        (status = 403, description = "Missing or invalid token", body = String, content_type = "text/plain")
    ),
    tags = ["account"],
    operation_id = "whoami",
    security(("BearerToken" = []))
)]
#[get("/me")]
pub async fn whoami(claims: web::ReqData<TokenClaims>) -> web::Json<WhoAmIResponse> {
    web::Json(WhoAmIResponse {
        username: claims.into_inner().username.into(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockAccountService, MockAddressProvider};
    use crate::domain::{BearerToken, Login};
    use crate::inbound::http::json::json_config;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpMessage, test};
    use rstest::rstest;

    async fn post(accounts: MockAccountService, uri: &str, body: &str) -> (StatusCode, String) {
        let state = HttpState::new(Arc::new(MockAddressProvider::new()), Arc::new(accounts));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .service(register)
                .service(login),
        )
        .await;
        let req = test::TestRequest::post()
            .uri(uri)
            .set_payload(body.to_owned())
            .to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        let body = test::read_body(res).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn register_returns_201_with_confirmation() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_register()
            .withf(|credentials| {
                credentials.login().as_ref() == "alice" && credentials.password() == "pw"
            })
            .times(1)
            .returning(|_| Ok(()));

        let (status, body) =
            post(accounts, "/register", r#"{"login":"alice","password":"pw"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, REGISTERED_MESSAGE);
    }

    #[actix_web::test]
    async fn register_surfaces_duplicate_as_400() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_register()
            .returning(|_| Err(Error::invalid_request("User already exists")));

        let (status, body) =
            post(accounts, "/register", r#"{"login":"alice","password":"pw"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "User already exists");
    }

    #[rstest]
    #[case::blank_login("/register", r#"{"login":"  ","password":"pw"}"#, StatusCode::BAD_REQUEST)]
    #[case::register_garbage("/register", "{", StatusCode::BAD_REQUEST)]
    #[case::login_missing_password("/login", r#"{"login":"alice"}"#, StatusCode::BAD_REQUEST)]
    #[case::login_blank("/login", r#"{"login":"","password":"pw"}"#, StatusCode::UNAUTHORIZED)]
    #[actix_web::test]
    async fn rejected_bodies_never_reach_the_service(
        #[case] uri: &str,
        #[case] body: &str,
        #[case] expected: StatusCode,
    ) {
        let mut accounts = MockAccountService::new();
        accounts.expect_register().never();
        accounts.expect_login().never();

        let (status, _) = post(accounts, uri, body).await;
        assert_eq!(status, expected);
    }

    #[actix_web::test]
    async fn login_returns_bearer_string() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_login()
            .times(1)
            .returning(|_| Ok(BearerToken::new("abc.def.ghi")));

        let (status, body) = post(accounts, "/login", r#"{"login":"alice","password":"pw"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Bearer abc.def.ghi");
    }

    #[actix_web::test]
    async fn login_surfaces_bad_credentials_as_401() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_login()
            .returning(|_| Err(Error::unauthorized("Invalid credentials")));

        let (status, body) = post(accounts, "/login", r#"{"login":"alice","password":"no"}"#).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Invalid credentials");
    }

    #[actix_web::test]
    async fn whoami_echoes_claims_from_extensions() {
        let app = test::init_service(App::new().service(web::scope("/api/account").service(whoami))).await;
        let req = test::TestRequest::get().uri("/api/account/me").to_request();
        req.extensions_mut().insert(TokenClaims {
            username: Login::new("alice").expect("valid login"),
        });

        let res: WhoAmIResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(res.username, "alice");
    }
}
