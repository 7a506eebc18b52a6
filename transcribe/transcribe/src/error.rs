use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the transcription API.
///
/// The first five variants are the service's declared exceptions; the rest
/// cover the contract boundary itself (stubbed operations, undecodable
/// payloads, local validation) and the transport a client talks over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscribeError {
    #[error("BadRequestException: {0}")]
    BadRequest(String),

    #[error("ConflictException: {0}")]
    Conflict(String),

    #[error("InternalFailureException: {0}")]
    InternalFailure(String),

    #[error("LimitExceededException: {0}")]
    LimitExceeded(String),

    #[error("NotFoundException: {0}")]
    NotFound(String),

    #[error("operation '{operation}' is not implemented")]
    NotImplemented { operation: String },

    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("throttled: {0}")]
    Throttled(String),

    #[error("unexpected {code} (HTTP {status}): {message}")]
    Unexpected {
        status: u16,
        code: String,
        message: String,
    },
}

impl TranscribeError {
    pub fn not_implemented(operation: impl Into<String>) -> Self {
        TranscribeError::NotImplemented {
            operation: operation.into(),
        }
    }

    pub fn validation(details: impl AsRef<str>) -> Self {
        TranscribeError::Validation(details.as_ref().to_string())
    }

    pub fn serialization(details: impl AsRef<str>, err: serde_json::Error) -> Self {
        TranscribeError::Serialization(format!("{}: {err}", details.as_ref()))
    }

    /// Error type as written to `__type` and `X-Amzn-ErrorType`.
    pub fn code(&self) -> &str {
        match self {
            TranscribeError::BadRequest(_) | TranscribeError::Validation(_) => {
                "BadRequestException"
            }
            TranscribeError::Conflict(_) => "ConflictException",
            TranscribeError::InternalFailure(_) => "InternalFailureException",
            TranscribeError::LimitExceeded(_) => "LimitExceededException",
            TranscribeError::NotFound(_) => "NotFoundException",
            TranscribeError::NotImplemented { .. } => "NotImplemented",
            TranscribeError::UnknownOperation(_) => "UnknownOperationException",
            TranscribeError::Serialization(_) => "SerializationException",
            TranscribeError::Network(_) => "NetworkError",
            TranscribeError::Unauthorized(_) => "UnrecognizedClientException",
            TranscribeError::Throttled(_) => "ThrottlingException",
            TranscribeError::Unexpected { code, .. } => code.as_str(),
        }
    }

    /// HTTP status the error travels with.
    ///
    /// Internal failures use 500 even though the generated model this
    /// contract descends from declares 400 for all five exceptions.
    pub fn status_code(&self) -> u16 {
        match self {
            TranscribeError::BadRequest(_)
            | TranscribeError::Conflict(_)
            | TranscribeError::LimitExceeded(_)
            | TranscribeError::NotFound(_)
            | TranscribeError::Validation(_)
            | TranscribeError::UnknownOperation(_)
            | TranscribeError::Serialization(_) => 400,
            TranscribeError::Unauthorized(_) => 403,
            TranscribeError::Throttled(_) => 429,
            TranscribeError::InternalFailure(_) => 500,
            TranscribeError::NotImplemented { .. } => 501,
            TranscribeError::Network(_) => 503,
            TranscribeError::Unexpected { status, .. } => *status,
        }
    }

    /// The service declares every exception with a `false` sender-fault flag.
    pub fn sender_fault(&self) -> bool {
        false
    }

    pub fn message(&self) -> String {
        match self {
            TranscribeError::BadRequest(message)
            | TranscribeError::Conflict(message)
            | TranscribeError::InternalFailure(message)
            | TranscribeError::LimitExceeded(message)
            | TranscribeError::NotFound(message)
            | TranscribeError::Validation(message)
            | TranscribeError::Serialization(message)
            | TranscribeError::Network(message)
            | TranscribeError::Unauthorized(message)
            | TranscribeError::Throttled(message) => message.clone(),
            TranscribeError::UnknownOperation(target) => {
                format!("Unknown operation {target}")
            }
            TranscribeError::NotImplemented { operation } => format!(
                "API action '{operation}' for service '{}' not yet implemented",
                crate::operation::SERVICE_NAME
            ),
            TranscribeError::Unexpected { message, .. } => message.clone(),
        }
    }

    /// Whether repeating the identical request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TranscribeError::InternalFailure(_)
                | TranscribeError::Network(_)
                | TranscribeError::Throttled(_)
        ) || matches!(self, TranscribeError::Unexpected { status, .. } if *status >= 500)
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error_type: self.code().to_string(),
            message: Some(self.message()),
        }
    }

    /// Rebuilds an error from a failed HTTP exchange.
    ///
    /// The error type comes from the `X-Amzn-ErrorType` header when present and
    /// from the body's `__type` otherwise.
    pub fn from_wire(status: u16, header_type: Option<&str>, body: &str) -> Self {
        let parsed = ErrorBody::parse(body);
        let message = parsed
            .as_ref()
            .and_then(|b| b.message.clone())
            .unwrap_or_else(|| body.to_string());
        let code = header_type
            .map(normalize_error_type)
            .filter(|t| !t.is_empty())
            .or_else(|| parsed.map(|b| b.error_type).filter(|t| !t.is_empty()));

        match code.as_deref() {
            Some("BadRequestException") => TranscribeError::BadRequest(message),
            Some("ConflictException") => TranscribeError::Conflict(message),
            Some("InternalFailureException") => TranscribeError::InternalFailure(message),
            Some("LimitExceededException") => TranscribeError::LimitExceeded(message),
            Some("NotFoundException") => TranscribeError::NotFound(message),
            Some("UnknownOperationException") => TranscribeError::UnknownOperation(message),
            Some("SerializationException") => TranscribeError::Serialization(message),
            Some("ThrottlingException") | Some("TooManyRequestsException") => {
                TranscribeError::Throttled(message)
            }
            Some("UnrecognizedClientException")
            | Some("InvalidSignatureException")
            | Some("AccessDeniedException")
            | Some("ExpiredTokenException") => TranscribeError::Unauthorized(message),
            Some("NotImplemented") => TranscribeError::NotImplemented {
                operation: message.split('\'').nth(1).unwrap_or(&message).to_string(),
            },
            Some(other) => TranscribeError::Unexpected {
                status,
                code: other.to_string(),
                message,
            },
            None => from_status(status, message),
        }
    }
}

/// Maps a bare HTTP status to an error when no error type was sent.
pub fn from_status(status: u16, message: impl Into<String>) -> TranscribeError {
    let message = message.into();
    match status {
        400 => TranscribeError::BadRequest(message),
        401 | 403 => TranscribeError::Unauthorized(message),
        404 => TranscribeError::NotFound(message),
        409 => TranscribeError::Conflict(message),
        429 => TranscribeError::Throttled(message),
        500 => TranscribeError::InternalFailure(message),
        502..=504 => TranscribeError::Network(message),
        status => TranscribeError::Unexpected {
            status,
            code: "UnknownError".to_string(),
            message,
        },
    }
}

/// JSON error document of the `awsJson1_1` protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "__type", default)]
    pub error_type: String,
    #[serde(default, alias = "Message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parses an error document, normalising the error type.
    pub fn parse(body: &str) -> Option<ErrorBody> {
        let mut parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed.error_type = normalize_error_type(&parsed.error_type);
        Some(parsed)
    }
}

/// Strips the namespace (`aws.transcribe#`) and any `:`-separated suffix from
/// an error type.
pub fn normalize_error_type(raw: &str) -> String {
    let without_suffix = raw.split(':').next().unwrap_or(raw);
    let name = without_suffix
        .rsplit('#')
        .next()
        .unwrap_or(without_suffix);
    name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_namespaced_error_types() {
        assert_eq!(
            normalize_error_type("com.amazonaws.transcribe#NotFoundException"),
            "NotFoundException"
        );
        assert_eq!(
            normalize_error_type("ConflictException:http://internal.amazon.com/"),
            "ConflictException"
        );
        assert_eq!(normalize_error_type("BadRequestException"), "BadRequestException");
    }

    #[test]
    fn header_type_wins_over_body() {
        let err = TranscribeError::from_wire(
            400,
            Some("LimitExceededException"),
            r#"{"__type":"BadRequestException","message":"too many"}"#,
        );
        assert_eq!(err, TranscribeError::LimitExceeded("too many".to_string()));
    }

    #[test]
    fn capitalised_message_key_is_accepted() {
        let err = TranscribeError::from_wire(
            400,
            None,
            r#"{"__type":"aws.transcribe#NotFoundException","Message":"no such job"}"#,
        );
        assert_eq!(err, TranscribeError::NotFound("no such job".to_string()));
    }

    #[test]
    fn header_type_with_bare_message_body() {
        let err = TranscribeError::from_wire(
            400,
            Some("NotFoundException:http://internal.amazon.com/"),
            r#"{"Message":"no such job"}"#,
        );
        assert_eq!(err, TranscribeError::NotFound("no such job".to_string()));
    }

    #[test]
    fn untyped_body_falls_back_to_status() {
        let err = TranscribeError::from_wire(503, None, "Service Unavailable");
        assert_eq!(err, TranscribeError::Network("Service Unavailable".to_string()));
        assert!(err.is_retryable());

        let err = TranscribeError::from_wire(418, None, "teapot");
        assert!(matches!(err, TranscribeError::Unexpected { status: 418, .. }));
        assert_eq!(err.code(), "UnknownError");
    }

    #[test]
    fn blank_header_type_defers_to_body_then_status() {
        let err = TranscribeError::from_wire(
            400,
            Some(""),
            r#"{"__type":"ConflictException","message":"name in use"}"#,
        );
        assert_eq!(err, TranscribeError::Conflict("name in use".to_string()));

        let err = TranscribeError::from_wire(404, Some(" "), "");
        assert!(matches!(err, TranscribeError::NotFound(_)));
        assert_ne!(err.code(), "");
    }

    #[test]
    fn error_body_round_trips_through_the_wire() {
        let original = TranscribeError::Conflict("job name in use".to_string());
        let body = serde_json::to_string(&original.to_body()).unwrap();
        assert_eq!(
            TranscribeError::from_wire(original.status_code(), None, &body),
            original
        );
    }

    #[test]
    fn validation_is_reported_as_bad_request() {
        let err = TranscribeError::validation("MaxResults must be between 1 and 100");
        assert_eq!(err.code(), "BadRequestException");
        assert_eq!(err.status_code(), 400);
        assert!(!err.is_retryable());
    }
}
