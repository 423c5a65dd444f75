use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    #[error("Language model error: {0}")]
    LanguageModel(String),

    #[error("Index not built: create the vector store before querying")]
    IndexNotBuilt,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Payload-free discriminant of [`Error`], for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Schema,
    EmbeddingService,
    LanguageModel,
    IndexNotBuilt,
    InvalidConfig,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Schema(_) => ErrorKind::Schema,
            Error::EmbeddingService(_) => ErrorKind::EmbeddingService,
            Error::LanguageModel(_) => ErrorKind::LanguageModel,
            Error::IndexNotBuilt => ErrorKind::IndexNotBuilt,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Error::Io(io),
            other => Error::Schema(format!("{other:?}")),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
