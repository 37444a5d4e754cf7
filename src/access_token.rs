mod data;
mod decoder;
mod generator;

pub use data::AccessTokenData;
pub use decoder::AccessTokenDecoder;
pub use decoder::errors::AccessTokenDecoderError;
pub use generator::AccessTokenGenerator;
pub use generator::errors::AccessTokenGeneratorError;
