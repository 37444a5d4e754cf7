use std::fs;
use std::path::Path;
use std::time::SystemTime;
use josekit::jwk::Jwk;
use josekit::jws::alg::hmac::{HmacJwsAlgorithm, HmacJwsSigner};
use josekit::jws::JwsHeader;
use josekit::jwt;
use josekit::jwt::JwtPayload;
use uuid::Uuid;
use errors::AccessTokenGeneratorError;

pub mod errors;

pub struct AccessTokenGenerator {
    signer: HmacJwsSigner,
}

impl AccessTokenGenerator {
    pub fn from_jwk(key: &Jwk) -> Result<Self, AccessTokenGeneratorError> {
        Ok(
            AccessTokenGenerator {
                signer: HmacJwsAlgorithm::Hs512.signer_from_jwk(key)?,
            }
        )
    }

    pub fn from_file(
        path: impl AsRef<Path>,
    ) -> Result<Self, AccessTokenGeneratorError> {
        Self::from_jwk(&Jwk::from_bytes(fs::read(path)?)?)
    }

    pub fn generate_token(
        &self,
        user_id: Uuid,
        now: &SystemTime,
        expires_at: &SystemTime,
    ) -> Result<String, AccessTokenGeneratorError> {
        let mut payload = JwtPayload::new();
        payload.set_subject(user_id.to_string());
        payload.set_issued_at(now);
        payload.set_not_before(now);
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
