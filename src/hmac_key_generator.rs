use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use josekit::jws::alg::hmac::HmacJwsAlgorithm;
use rand::RngCore;
use thiserror::Error;
use crate::lib_constants::HMAC_KEY_SIZE;

#[derive(Debug, Error)]
pub enum MakeHmacKeyError {
    #[error("hmac key serialization failed")]
    Serialization(#[from] serde_json::Error),

    #[error("failed writing generated hmac key")]
    Io(#[from] io::Error),
}

/// Generate an HS512 signing key and write it as a JWK file readable
/// only by the owner. The access and refresh keys are produced by two
/// separate calls so they never share secret material.
pub fn make_hmac_key(
    path: &Path,
    rng: &mut impl RngCore,
) -> Result<(), MakeHmacKeyError> {
    let mut secret = [0u8; HMAC_KEY_SIZE];
    rng.fill_bytes(&mut secret);
    write_secret_file(
        path,
        serde_json::to_string_pretty(
            &HmacJwsAlgorithm::Hs512.to_jwk(&secret)
        )? + "\n",
    )?;
    Ok(())
}

fn write_secret_file(
    path: &Path,
    contents: impl AsRef<str>,
) -> Result<(), io::Error> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents.as_ref().as_bytes())?;
    Ok(())
}
