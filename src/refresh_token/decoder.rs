use std::fs;
use std::path::Path;
use josekit::jwk::Jwk;
use josekit::jws::alg::hmac::{HmacJwsAlgorithm, HmacJwsVerifier};
use josekit::jwt;
use log::info;
use time::OffsetDateTime;
use uuid::Uuid;
use errors::RefreshTokenDecoderError;
use crate::refresh_token::data::RefreshTokenData;

pub mod errors;

pub struct RefreshTokenDecoder {
    verifier: HmacJwsVerifier,
}

impl RefreshTokenDecoder {
    pub fn from_jwk(jwk: &Jwk) -> Result<Self, RefreshTokenDecoderError> {
        Ok(
            RefreshTokenDecoder {
                verifier: HmacJwsAlgorithm::Hs512.verifier_from_jwk(jwk)?,
            }
        )
    }

    pub fn from_file(
        path: impl AsRef<Path>,
    ) -> Result<Self, RefreshTokenDecoderError> {
        Self::from_jwk(&Jwk::from_bytes(fs::read(path)?)?)
    }

    pub fn decode_token(
        &self,
        token: impl AsRef<[u8]>,
    ) -> Result<RefreshTokenData, RefreshTokenDecoderError> {
        let token = token.as_ref();
        let (payload, _) = jwt::decode_with_verifier(
            token,
            &self.verifier,
        )?;
        let user_id = payload.subject()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| {
                info!(
                    "invalid subject in refresh token {}: {e}",
                    String::from_utf8_lossy(token),
                );
                RefreshTokenDecoderError::PayloadSubject(e)
            })?
            .ok_or_else(|| missing_field(token, "subject"))?;
        let issued_at = payload.issued_at()
            .map(OffsetDateTime::from)
            .ok_or_else(|| missing_field(token, "issued_at"))?;
        let expires_at = payload.expires_at()
            .map(OffsetDateTime::from)
            .ok_or_else(|| missing_field(token, "expires_at"))?;
        Ok(
            RefreshTokenData {
                user_id,
                issued_at,
                expires_at,
            }
        )
    }
}

fn missing_field(token: &[u8], part: &'static str) -> RefreshTokenDecoderError {
    info!(
        "missing field {part} in refresh token {}",
        String::from_utf8_lossy(token),
    );
    RefreshTokenDecoderError::PayloadMissing { part }
}
