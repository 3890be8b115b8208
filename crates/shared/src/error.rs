#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("authentication required")]
    AuthenticationRequired,

    #[error("{0}")]
    Gateway(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway(message.into())
    }

    /// True when the UI should prompt sign-in instead of a retry message.
    pub fn requires_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationRequired)
    }
}
