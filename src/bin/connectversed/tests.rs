use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use connectverse::config::figment::FigmentExt;
use connectverse::hmac_key_generator::make_hmac_key;
use rocket::figment::Figment;
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::{Client, LocalResponse};
use serde_json::{json, Value};
use crate::app_setup::AppSetupFairing;

// keeps the TempDir alive for as long as the client runs
async fn make_client() -> (TempDir, Client) {
    let dir = TempDir::new().unwrap();
    let access_key = dir.child("access_token.jwk");
    let refresh_key = dir.child("refresh_token.jwk");
    let mut rng = rand::thread_rng();
    make_hmac_key(access_key.path(), &mut rng).unwrap();
    make_hmac_key(refresh_key.path(), &mut rng).unwrap();

    let config_file = dir.child("config.toml");
    config_file
        .write_str(
            &format!(
                concat!(
                    "user_db = \"{}\"\n",
                    "data_directory = \"{}\"\n",
                    "access_token_key = \"{}\"\n",
                    "refresh_token_key = \"{}\"\n",
                    "\n",
                    "# hashing strength is not under test\n",
                    "[hasher_config]\n",
                    "argon2_m_cost = 32\n",
                    "argon2_t_cost = 1\n",
                    "argon2_p_cost = 1\n",
                ),
                dir.child("users.toml").path().display(),
                dir.path().display(),
                access_key.path().display(),
                refresh_key.path().display(),
            )
        )
        .unwrap();

    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(config_file.path());
    let client = Client::tracked(
        rocket::custom(figment).attach(AppSetupFairing),
    ).await.unwrap();
    (dir, client)
}

async fn post_json<'c>(
    client: &'c Client,
    uri: &'static str,
    body: Value,
) -> LocalResponse<'c> {
    client.post(uri)
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await
}

async fn signup_alice(client: &Client) -> Value {
    let response = post_json(
        client,
        "/signup",
        json!({
            "username": "alice",
            "email": "a@x.com",
            "password": "secret1",
        }),
    ).await;
    assert_eq!(response.status(), Status::Ok);
    response.into_json().await.unwrap()
}

fn bearer(tokens: &Value) -> Header<'static> {
    Header::new(
        "Authorization",
        format!("Bearer {}", tokens["accessToken"].as_str().unwrap()),
    )
}

#[rocket::async_test]
async fn signup_grants_working_tokens() {
    let (_dir, client) = make_client().await;
    let tokens = signup_alice(&client).await;
    assert_eq!(tokens["accessTokenExpiryIn"], 3600);
    assert!(tokens["refreshToken"].as_str().is_some());

    let response = client.get("/users")
        .header(bearer(&tokens))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let users: Value = response.into_json().await.unwrap();
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["username"], "alice");
    assert_eq!(users[0]["email"], "a@x.com");
    assert!(users[0].get("hash").is_none());
}

#[rocket::async_test]
async fn user_listing_requires_a_valid_token() {
    let (_dir, client) = make_client().await;
    signup_alice(&client).await;

    let response = client.get("/users").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);

    let response = client.get("/users")
        .header(Header::new("Authorization", "Bearer garbage"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);
}

#[rocket::async_test]
async fn duplicate_signups_are_rejected() {
    let (_dir, client) = make_client().await;
    signup_alice(&client).await;

    let response = post_json(
        &client,
        "/signup",
        json!({
            "username": "bob",
            "email": "a@x.com",
            "password": "secret2",
        }),
    ).await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(
        body["error"],
        "Email already exists. Please use another email.",
    );

    let response = post_json(
        &client,
        "/signup",
        json!({
            "username": "alice",
            "email": "b@x.com",
            "password": "secret2",
        }),
    ).await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(
        body["error"],
        "Username already exists. Please use another username.",
    );
}

#[rocket::async_test]
async fn malformed_fields_are_a_400_with_a_message() {
    let (_dir, client) = make_client().await;

    let response = post_json(
        &client,
        "/signup",
        json!({
            "username": "alice",
            "email": "not-an-email",
            "password": "secret1",
        }),
    ).await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error"], "invalid email format");

    let response = post_json(
        &client,
        "/signup",
        json!({
            "username": "al",
            "email": "a@x.com",
            "password": "secret1",
        }),
    ).await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(
        body["error"],
        "username must be at least 3 characters long",
    );

    let response = post_json(
        &client,
        "/login",
        json!({"email": "not-an-email", "password": "secret1"}),
    ).await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error"], "invalid email format");
}

#[rocket::async_test]
async fn bad_logins_are_rejected_alike() {
    let (_dir, client) = make_client().await;
    signup_alice(&client).await;

    for (email, password) in [("a@x.com", "not-it"), ("b@x.com", "secret1")] {
        let response = post_json(
            &client,
            "/login",
            json!({"email": email, "password": password}),
        ).await;
        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[rocket::async_test]
async fn renewal_rotates_and_logout_revokes() {
    let (_dir, client) = make_client().await;
    let tokens = signup_alice(&client).await;
    let refresh_token = tokens["refreshToken"].as_str().unwrap().to_string();

    let response = post_json(
        &client,
        "/renew_access_token",
        json!({"refreshToken": refresh_token}),
    ).await;
    assert_eq!(response.status(), Status::Ok);
    let renewed: Value = response.into_json().await.unwrap();
    let rotated = renewed["refreshToken"].as_str().unwrap().to_string();
    assert_ne!(rotated, refresh_token);

    // the replaced token is dead
    let response = post_json(
        &client,
        "/renew_access_token",
        json!({"refreshToken": refresh_token}),
    ).await;
    assert_eq!(response.status(), Status::Forbidden);

    let response = post_json(
        &client,
        "/logout",
        json!({"refreshToken": rotated}),
    ).await;
    assert_eq!(response.status(), Status::NoContent);
    let response = post_json(
        &client,
        "/logout",
        json!({"refreshToken": rotated}),
    ).await;
    assert_eq!(response.status(), Status::NoContent);

    let response = post_json(
        &client,
        "/renew_access_token",
        json!({"refreshToken": rotated}),
    ).await;
    assert_eq!(response.status(), Status::Forbidden);
}

#[rocket::async_test]
async fn renewal_accepts_the_snake_case_field_name() {
    let (_dir, client) = make_client().await;
    let tokens = signup_alice(&client).await;

    let response = post_json(
        &client,
        "/renew_access_token",
        json!({"refresh_token": tokens["refreshToken"]}),
    ).await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn renewal_without_a_token_is_unauthorized() {
    let (_dir, client) = make_client().await;
    let response = post_json(&client, "/renew_access_token", json!({})).await;
    assert_eq!(response.status(), Status::Unauthorized);
}
