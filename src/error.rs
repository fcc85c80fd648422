#[derive(thiserror::Error)]
pub enum Error {
    // dependency errors
    #[error("hex decoding: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("r2: {0}")]
    R2(String),

    // std errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("utf8 conversion: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    // brain errors
    #[error("thought needs {expected} bytes, got {found}")]
    ThoughtSize { expected: usize, found: usize },

    #[error("input is {found} bytes but {expected} were expected")]
    Length { expected: usize, found: usize },

    #[error("no solution found for chunk {chunk}")]
    Unsat { chunk: usize },

    #[error("verification failed for chunk {chunk}")]
    ThoughtMismatch { chunk: usize },

    #[error("brainstem is {found} instead of {expected}")]
    Fingerprint { expected: String, found: String },

    // mask chain errors
    #[error("mask chain is empty")]
    EmptyChain,

    #[error("mask {index} duplicates an earlier mask")]
    DuplicateMask { index: usize },

    #[error("mask {index} length mismatch: expected {expected}, got {found}")]
    MaskLength {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("no keys could be extracted")]
    NoKeys,

    #[error("{0}")]
    Usage(String),

    #[error("unknown challenge \"{0}\"")]
    UnknownChallenge(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::R2(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
