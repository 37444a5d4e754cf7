use async_trait::async_trait;
use connectverse::access_granter::{AccessGranter, AccessGranterError};
use rocket::http::hyper::header;
use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use uuid::Uuid;

/// Request guard for the routes that need a valid access token. A
/// missing header is distinct from a bad one on the wire: the former
/// is a 401, the latter a 403.
#[derive(Debug)]
pub struct Authenticated(pub Uuid);

#[async_trait]
impl<'r> FromRequest<'r> for Authenticated {
    type Error = ();

    async fn from_request(
        request: &'r Request<'_>,
    ) -> Outcome<Self, Self::Error> {
        let auth_header = match request.headers()
            .get_one(header::AUTHORIZATION.as_str())
        {
            Some(header) => header,
            None => return Outcome::Error((Status::Unauthorized, ())),
        };
        let granter
            = try_outcome!(request.guard::<&State<AccessGranter>>().await);
        match granter.check_user_access(auth_header) {
            Ok(user_id) => Outcome::Success(Authenticated(user_id)),
            Err(
                AccessGranterError::HeaderFormat
                | AccessGranterError::TokenInvalid
                | AccessGranterError::TokenExpired
            ) => Outcome::Error((Status::Forbidden, ())),
            Err(_) => Outcome::Error((Status::InternalServerError, ())),
        }
    }
}
