pub mod password;

pub use password::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Malformed credential hash")]
    MalformedHash,

    #[error("Unsupported hash scheme: {0}")]
    UnsupportedScheme(String),
}
