use thiserror::Error;

#[derive(Error, Debug)]
pub enum NexusError {
    #[error("transport error: {0}")] Transport(String),
    #[error("endpoint returned {status}: {body}")] Status { status: u16, body: String },
    #[error("endpoint returned no content")] EmptyBody,
    #[error("malformed response: {0}")] Malformed(String),
    #[error("request timed out: {0}")] Timeout(String),
}

impl From<reqwest::Error> for NexusError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NexusError::Timeout(e.to_string())
        } else {
            NexusError::Transport(e.to_string())
        }
    }
}

pub type NexusResult<T> = Result<T, NexusError>;
