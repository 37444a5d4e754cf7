use std::fs;
use std::path::Path;
use std::time::SystemTime;
use josekit::jwk::Jwk;
use josekit::jws::alg::hmac::{HmacJwsAlgorithm, HmacJwsSigner};
use josekit::jws::JwsHeader;
use josekit::jwt;
use josekit::jwt::JwtPayload;
use uuid::Uuid;
use errors::RefreshTokenGeneratorError;

pub mod errors;

pub struct RefreshTokenGenerator {
    signer: HmacJwsSigner,
}

impl RefreshTokenGenerator {
    pub fn from_jwk(key: &Jwk) -> Result<Self, RefreshTokenGeneratorError> {
        Ok(
            RefreshTokenGenerator {
                signer: HmacJwsAlgorithm::Hs512.signer_from_jwk(key)?,
            }
        )
    }

    pub fn from_file(
        path: impl AsRef<Path>,
    ) -> Result<Self, RefreshTokenGeneratorError> {
        Self::from_jwk(&Jwk::from_bytes(fs::read(path)?)?)
    }

    /// Issue a refresh token. The expiry claim bounds the token's
    /// lifetime even if the session store entry outlives it.
    pub fn generate_token(
        &self,
        user_id: Uuid,
        now: &SystemTime,
        expires_at: &SystemTime,
    ) -> Result<String, RefreshTokenGeneratorError> {
        let mut payload = JwtPayload::new();
        payload.set_subject(user_id.to_string());
        payload.set_issued_at(now);
        payload.set_expires_at(expires_at);

        Ok(
            jwt::encode_with_signer(
                &payload,
                &JwsHeader::new(),
                &self.signer,
            )?
        )
    }
}
