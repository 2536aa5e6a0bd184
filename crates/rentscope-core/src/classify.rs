use rentscope_config::ServerErrorPolicy;

use crate::error::RequestError;

/// Coarse meaning of a crawler HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ClientRejected,
    ServerFailure,
    Unknown,
}

/// Precedence: 2xx, then 400, then 500, then everything else
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        400 => StatusClass::ClientRejected,
        500 => StatusClass::ServerFailure,
        _ => StatusClass::Unknown,
    }
}

/// Map a non-2xx status into the request error taxonomy
pub fn status_error(status: u16) -> RequestError {
    match classify_status(status) {
        StatusClass::ClientRejected => RequestError::ClientRejected { status },
        StatusClass::ServerFailure => RequestError::ServerFailure { status },
        StatusClass::Success | StatusClass::Unknown => RequestError::UnknownHttp { status },
    }
}

/// Whether `error` is shown to the user as an empty search.
///
/// HTTP 400 always is. HTTP 500 is too under
/// [`ServerErrorPolicy::ReportAsNoResults`], which hides real server
/// failures behind the "no results" message.
pub fn reads_as_no_results(error: &RequestError, policy: ServerErrorPolicy) -> bool {
    match error {
        RequestError::ClientRejected { .. } => true,
        RequestError::ServerFailure { .. } => policy == ServerErrorPolicy::ReportAsNoResults,
        _ => false,
    }
}
