#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Transport-level failure reported by a non-reqwest transport
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result of a single POST round trip.
///
/// Non-2xx statuses are not errors at this layer; the caller decides what
/// each status means. Network and decode failures stay distinct so they can
/// be told apart in logs even where the user sees one message.
#[derive(Debug)]
pub enum RemoteOutcome<T> {
    /// 2xx with a body that decoded as `T`
    Ok(T),
    /// Any non-2xx status; the body is not read
    Status(u16),
    /// The request never produced a response
    NetworkFailure(ClientError),
    /// 2xx whose body was not the expected JSON, or a request body that
    /// could not be encoded in the first place
    DecodeFailure(ClientError),
}

impl<T> RemoteOutcome<T> {
    pub fn label(&self) -> &'static str {
        match self {
            RemoteOutcome::Ok(_) => "ok",
            RemoteOutcome::Status(_) => "status",
            RemoteOutcome::NetworkFailure(_) => "network_failure",
            RemoteOutcome::DecodeFailure(_) => "decode_failure",
        }
    }
}
