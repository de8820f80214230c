use thiserror::Error;

/// Everything that can go wrong talking to the clinic backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The backend answered with a non-success status. `message` is the
    /// `error` field of its JSON body, when there was one.
    #[error("{}", rejection_text(.status, .message))]
    Rejected { status: u16, message: Option<String> },

    /// The request never completed (connect, TLS, timeout, reset).
    #[error("{0}")]
    Transport(String),

    /// A success status whose body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    /// True when no usable application response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

fn rejection_text(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(m) => m.clone(),
        None => format!("Request failed (HTTP {})", status),
    }
}
