use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Http(reqwest::Error),
    /// Upstream answered with a non-success status.
    Fetch {
        status: u16,
        body: String,
    },
    Decode(String),
    Database(sea_orm::DbErr),
    PasswordHash(bcrypt::BcryptError),
    Config(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Fetch { status, body } => write!(f, "HTTP {status}: {body}"),
            Self::Decode(msg) => write!(f, "Invalid JSON response: {msg}"),
            Self::Database(e) => write!(f, "Database error: {e}"),
            Self::PasswordHash(e) => write!(f, "Password hashing error: {e}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Database(e) => Some(e),
            Self::PasswordHash(e) => Some(e),
            _ => None,
        }
    }
}

impl AppError {
    /// Status code of a failed upstream call, if this error came from one.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Database(e)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        Self::PasswordHash(e)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
