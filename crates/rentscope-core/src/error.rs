use rentscope_client::ClientError;
use rentscope_types::UnknownSelection;

/// Everything that can end a request lifecycle short of success
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// A required field was empty; nothing was sent
    #[error("required field is empty: {field}")]
    Validation { field: &'static str },

    /// A radio group had no resolvable selection; nothing was sent
    #[error("{0}")]
    Selection(#[from] UnknownSelection),

    /// HTTP 400
    #[error("request rejected (HTTP {status})")]
    ClientRejected { status: u16 },

    /// HTTP 500
    #[error("server failure (HTTP {status})")]
    ServerFailure { status: u16 },

    /// Any other non-2xx
    #[error("unexpected HTTP status {status}")]
    UnknownHttp { status: u16 },

    #[error("{0}")]
    Network(#[source] ClientError),

    #[error("{0}")]
    Decode(#[source] ClientError),

    /// The output port could not draw the result
    #[error("{0}")]
    Render(#[from] RenderError),
}

impl RequestError {
    /// Short tag for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::Validation { .. } => "validation",
            RequestError::Selection(_) => "selection",
            RequestError::ClientRejected { .. } => "client_rejected",
            RequestError::ServerFailure { .. } => "server_failure",
            RequestError::UnknownHttp { .. } => "unknown_http",
            RequestError::Network(_) => "network",
            RequestError::Decode(_) => "decode",
            RequestError::Render(_) => "render",
        }
    }
}

/// Failure reported by an output port while drawing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);
