//! Refresh tokens are signed with a key independent from the access
//! token key, so leaking one signing secret does not forge the other
//! kind. Unlike access tokens they are also tracked server side; a
//! verified signature alone does not make one valid.

mod data;
mod decoder;
mod generator;

pub use data::RefreshTokenData;
pub use decoder::RefreshTokenDecoder;
pub use decoder::errors::RefreshTokenDecoderError;
pub use generator::RefreshTokenGenerator;
pub use generator::errors::RefreshTokenGeneratorError;
