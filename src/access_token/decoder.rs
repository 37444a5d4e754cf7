use std::fs;
use std::path::Path;
use josekit::jwk::Jwk;
use josekit::jws::alg::hmac::{HmacJwsAlgorithm, HmacJwsVerifier};
use josekit::jwt;
use log::info;
use time::OffsetDateTime;
use uuid::Uuid;
use errors::AccessTokenDecoderError;
use crate::access_token::data::AccessTokenData;

pub mod errors;

pub struct AccessTokenDecoder {
    verifier: HmacJwsVerifier,
}

impl AccessTokenDecoder {
    pub fn from_jwk(jwk: &Jwk) -> Result<Self, AccessTokenDecoderError> {
        Ok(
            AccessTokenDecoder {
                verifier: HmacJwsAlgorithm::Hs512.verifier_from_jwk(jwk)?,
            }
        )
    }

    pub fn from_file(
        path: impl AsRef<Path>,
    ) -> Result<Self, AccessTokenDecoderError> {
        Self::from_jwk(&Jwk::from_bytes(fs::read(path)?)?)
    }

    /// Decode an access token, verifying its signature.
    ///
    /// # Errors
    /// All possible error values signify incorrect token data.
    pub fn decode_token(
        &self,
        token: impl AsRef<[u8]>,
    ) -> Result<AccessTokenData, AccessTokenDecoderError> {
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
                    "invalid subject in access token {}: {e}",
                    String::from_utf8_lossy(token),
                );
                AccessTokenDecoderError::PayloadSubject(e)
            })?
            .ok_or_else(|| missing_field(token, "subject"))?;
        let not_before = payload.not_before()
            .map(OffsetDateTime::from)
            .ok_or_else(|| missing_field(token, "not_before"))?;
        let expires_at = payload.expires_at()
            .map(OffsetDateTime::from)
            .ok_or_else(|| missing_field(token, "expires_at"))?;
        Ok(
            AccessTokenData {
                user_id,
                not_before,
                expires_at,
            }
        )
    }
}

fn missing_field(token: &[u8], part: &'static str) -> AccessTokenDecoderError {
    info!(
        "missing field {part} in access token {}",
        String::from_utf8_lossy(token),
    );
    AccessTokenDecoderError::PayloadMissing { part }
}

#[cfg(test)]
mod tests {
    use std::ops::Add;
    use std::time::{Duration, SystemTime};
    use josekit::jws::alg::hmac::HmacJwsAlgorithm;
    use crate::access_token::AccessTokenGenerator;
    use crate::rng::make_uuid;
    use super::*;

    fn make_jwk(filler: u8) -> Jwk {
        HmacJwsAlgorithm::Hs512.to_jwk(&[filler; 64])
    }

    #[test]
    fn decodes_own_tokens() {
        let jwk = make_jwk(1);
        let generator = AccessTokenGenerator::from_jwk(&jwk).unwrap();
        let decoder = AccessTokenDecoder::from_jwk(&jwk).unwrap();
        let user_id = make_uuid(&mut rand::thread_rng());
        let now = SystemTime::now();
        let token = generator
            .generate_token(user_id, &now, &now.add(Duration::from_secs(60)))
            .unwrap();

        let data = decoder.decode_token(&token).unwrap();
        assert_eq!(data.user_id, user_id);
        assert!(data.expires_at > data.not_before);
    }

    #[test]
    fn rejects_foreign_signature() {
        let generator = AccessTokenGenerator::from_jwk(&make_jwk(1)).unwrap();
        let decoder = AccessTokenDecoder::from_jwk(&make_jwk(2)).unwrap();
        let now = SystemTime::now();
        let token = generator
            .generate_token(
                make_uuid(&mut rand::thread_rng()),
                &now,
                &now.add(Duration::from_secs(60)),
            )
            .unwrap();

        let err = decoder.decode_token(&token).expect_err("should fail");
        assert!(
            matches!(err, AccessTokenDecoderError::Crypto(_)),
            "wrong error type: {err:#?}",
        );
    }

    #[test]
    fn rejects_garbage() {
        let decoder = AccessTokenDecoder::from_jwk(&make_jwk(1)).unwrap();
        assert!(decoder.decode_token("not.a.token").is_err());
    }
}
