use thiserror::Error;

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Random source failure: {0}")]
    RandomSource(String),

    #[error("Plaintext of {len} bytes exceeds the {max}-byte limit for this key")]
    SizeExceeded { len: usize, max: usize },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Padding check failed: wrong key or corrupted ciphertext")]
    PaddingOrAuth,

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("SPKI error: {0}")]
    Spki(String),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The failure category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RandomSource(_) => ErrorKind::RandomSourceFailure,
            Error::SizeExceeded { .. } => ErrorKind::SizeExceeded,
            Error::MalformedInput(_) | Error::Spki(_) | Error::Base64(_) => {
                ErrorKind::MalformedInput
            }
            Error::PaddingOrAuth => ErrorKind::PaddingOrAuthFailure,
            Error::Engine(_) => ErrorKind::EngineFailure,
            Error::Json(_) | Error::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<rsa::pkcs8::spki::Error> for Error {
    fn from(err: rsa::pkcs8::spki::Error) -> Self {
        Error::Spki(err.to_string())
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::RandomSource(err.to_string())
    }
}

/// Error categories, stable across versions and safe to hand to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    RandomSourceFailure,
    SizeExceeded,
    MalformedInput,
    PaddingOrAuthFailure,
    EngineFailure,
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::RandomSourceFailure => "RANDOM_SOURCE_FAILURE",
            ErrorKind::SizeExceeded => "SIZE_EXCEEDED",
            ErrorKind::MalformedInput => "MALFORMED_INPUT",
            ErrorKind::PaddingOrAuthFailure => "PADDING_OR_AUTH_FAILURE",
            ErrorKind::EngineFailure => "ENGINE_FAILURE",
            ErrorKind::Config => "CONFIG",
        };
        write!(f, "{}", s)
    }
}
