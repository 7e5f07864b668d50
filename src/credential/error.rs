// ABOUTME: Errors from bearer token acquisition.
// ABOUTME: Never carries the token or the client secret in its message.

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("token endpoint returned HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Azure CLI failed: {0}")]
    Cli(String),

    #[error("invalid token response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
