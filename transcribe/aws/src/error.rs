use golem_transcribe::error::{from_status, normalize_error_type, ErrorBody};
use golem_transcribe::TranscribeError;

pub fn from_reqwest_error(context: &str, err: reqwest::Error) -> TranscribeError {
    if err.is_timeout() {
        TranscribeError::Network(format!("{context}: request timed out: {err}"))
    } else if err.is_decode() {
        TranscribeError::Serialization(format!("{context}: {err}"))
    } else {
        TranscribeError::Network(format!("{context}: {err}"))
    }
}

/// Error for a failed response that carried no AWS error type. The kind
/// follows [`from_status`], only the message is specific to this client.
pub fn map_http_status(status: u16) -> TranscribeError {
    let reason = match status {
        400 => "bad request",
        401 | 403 => "access denied",
        404 => "not found",
        409 => "conflict",
        429 => "rate exceeded",
        500 => "internal failure",
        502..=504 => "service unavailable",
        _ => "unexpected response",
    };
    from_status(status, format!("{reason} (http {status})"))
}

/// Maps a failed exchange, preferring the AWS error type when one was sent.
pub fn map_error_response(status: u16, error_type: Option<&str>, body: &str) -> TranscribeError {
    let typed = error_type.is_some_and(|t| !normalize_error_type(t).is_empty())
        || ErrorBody::parse(body).is_some_and(|b| !b.error_type.is_empty());
    if typed {
        TranscribeError::from_wire(status, error_type, body)
    } else {
        map_http_status(status)
    }
}
