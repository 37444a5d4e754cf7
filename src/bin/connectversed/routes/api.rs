mod authentication_guard;
mod errors;
mod model;

use std::str::FromStr;
use connectverse::access_granter::AccessGranter;
use connectverse::email_string::EmailString;
use connectverse::username_string::UsernameString;
use rocket::response::status::NoContent;
use rocket::serde::json::Json;
use rocket::{get, post, routes, Route, State};
use authentication_guard::Authenticated;
use errors::ApiError;
use model::{
    LoginRequest, LogoutRequest, RenewRequest, RenewResponse, SignupRequest,
    TokenPairResponse, UserResponse,
};

#[post("/signup", data = "<request>")]
async fn signup(
    granter: &State<AccessGranter>,
    request: Json<SignupRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let username = UsernameString::from_str(&request.username)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let email = EmailString::from_str(&request.email)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let granted = granter
        .signup_user(&username, &email, &request.password)
        .await?;
    Ok(Json(granted.into()))
}

#[post("/login", data = "<request>")]
async fn login(
    granter: &State<AccessGranter>,
    request: Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let email = EmailString::from_str(&request.email)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let granted = granter
        .login_user(&email, &request.password)
        .await?;
    Ok(Json(granted.into()))
}

#[post("/renew_access_token", data = "<request>")]
async fn renew_access_token(
    granter: &State<AccessGranter>,
    request: Json<RenewRequest>,
) -> Result<Json<RenewResponse>, ApiError> {
    let renewed = granter
        .renew_access_token(request.refresh_token.as_deref())
        .await?;
    Ok(Json(renewed.into()))
}

#[post("/logout", data = "<request>")]
async fn logout(
    granter: &State<AccessGranter>,
    request: Json<LogoutRequest>,
) -> Result<NoContent, ApiError> {
    granter.logout_user(request.refresh_token.as_deref()).await?;
    Ok(NoContent)
}

#[get("/users")]
async fn users(
    granter: &State<AccessGranter>,
    _user: Authenticated,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = granter.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub fn api_routes() -> Vec<Route> {
    routes![
        signup,
        login,
        renew_access_token,
        logout,
        users,
    ]
}
