use connectverse::access_granter::AccessGranterError;
use connectverse::user_db::ConflictKind;
use connectverse::MIN_PASSWORD_LEN;
use log::error;
use rocket::serde::json::Json;
use rocket::Responder;
use crate::routes::api::model::ErrorResponse;

#[derive(Debug, Responder)]
pub enum ApiError {
    #[response(status = 400)]
    BadRequest(Json<ErrorResponse>),

    #[response(status = 401)]
    Unauthorized(()),

    #[response(status = 403)]
    Forbidden(()),

    #[response(status = 500)]
    Internal(()),
}

impl ApiError {
    pub(super) fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(
            Json(
                ErrorResponse {
                    error: message.into(),
                }
            )
        )
    }
}

impl From<AccessGranterError> for ApiError {
    fn from(value: AccessGranterError) -> Self {
        match value {
            AccessGranterError::InvalidCredentials => {
                ApiError::bad_request("Invalid credentials")
            },
            AccessGranterError::Duplicate(ConflictKind::Username) => {
                ApiError::bad_request(
                    "Username already exists. Please use another username.",
                )
            },
            AccessGranterError::Duplicate(ConflictKind::Email) => {
                ApiError::bad_request(
                    "Email already exists. Please use another email.",
                )
            },
            AccessGranterError::PasswordTooShort => {
                ApiError::bad_request(
                    format!(
                        "Password must be at least {MIN_PASSWORD_LEN} \
                         characters long.",
                    ),
                )
            },
            AccessGranterError::MissingToken => ApiError::Unauthorized(()),
            AccessGranterError::HeaderFormat
            | AccessGranterError::TokenInvalid
            | AccessGranterError::TokenExpired
            | AccessGranterError::RevokedToken => ApiError::Forbidden(()),
            e => {
                error!("internal error while processing a request: {e}");
                ApiError::Internal(())
            },
        }
    }
}
