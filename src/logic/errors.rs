use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401/403
    NotFound,     // HTTP 404
    BadRequest,   // HTTP 400
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Other,
}

/// Classify an API error by status code, falling back to the message text
pub fn classify_error(error: &ApiError) -> ErrorType {
    if let Some(status) = error.status {
        return match status {
            400 => ErrorType::BadRequest,
            401 | 403 => ErrorType::Unauthorized,
            404 => ErrorType::NotFound,
            500..=599 => ErrorType::ServerError,
            _ => ErrorType::Other,
        };
    }

    let error_msg = error.message.to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    if error_msg.contains("dns") || error_msg.contains("network") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

/// Detail text shown under an alert: the server trace if there is one,
/// otherwise a short line saying what kind of failure it was
pub fn format_error_details(error: &ApiError) -> String {
    if let Some(trace) = error.trace.as_deref().filter(|t| !t.trim().is_empty()) {
        return trace.to_string();
    }

    let msg = &error.message;
    let status = error.status.unwrap_or_default();
    match classify_error(error) {
        ErrorType::ConnectionRefused => "Server is not reachable (connection refused)".to_string(),
        ErrorType::Timeout => "Request timed out".to_string(),
        ErrorType::Unauthorized => format!("Not authorized (HTTP {}): check credentials", status),
        ErrorType::NotFound => format!("Not found (HTTP 404): {}", msg),
        ErrorType::BadRequest => format!("Request rejected (HTTP 400): {}", msg),
        ErrorType::ServerError => format!("Server error (HTTP {}): {}", status, msg),
        ErrorType::NetworkError => format!("Network error: {}", msg),
        ErrorType::Other => match error.status {
            Some(status) => format!("HTTP {}: {}", status, msg),
            None => msg.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, message: &str) -> ApiError {
        ApiError {
            status: Some(status),
            message: message.to_string(),
            trace: None,
        }
    }

    #[test]
    fn test_classify_by_status() {
        assert_eq!(classify_error(&http(400, "bad")), ErrorType::BadRequest);
        assert_eq!(classify_error(&http(401, "no")), ErrorType::Unauthorized);
        assert_eq!(classify_error(&http(403, "no")), ErrorType::Unauthorized);
        assert_eq!(classify_error(&http(404, "gone")), ErrorType::NotFound);
        assert_eq!(classify_error(&http(503, "down")), ErrorType::ServerError);
        assert_eq!(classify_error(&http(409, "conflict")), ErrorType::Other);
    }

    #[test]
    fn test_classify_connection_refused() {
        let err = ApiError::transport("error sending request: Connection Refused (os error 111)");
        assert_eq!(classify_error(&err), ErrorType::ConnectionRefused);
    }

    #[test]
    fn test_classify_timeout() {
        let err = ApiError::transport("operation timed out");
        assert_eq!(classify_error(&err), ErrorType::Timeout);
    }

    #[test]
    fn test_classify_dns_error() {
        let err = ApiError::transport("dns lookup failed");
        assert_eq!(classify_error(&err), ErrorType::NetworkError);
    }

    #[test]
    fn test_classify_other_transport_error() {
        let err = ApiError::transport("some random error");
        assert_eq!(classify_error(&err), ErrorType::Other);
    }

    #[test]
    fn test_details_prefer_trace() {
        let mut err = http(500, "NullPointerException");
        err.trace = Some("at org.geoserver.Foo".to_string());
        assert_eq!(format_error_details(&err), "at org.geoserver.Foo");
    }

    #[test]
    fn test_details_without_trace() {
        assert_eq!(
            format_error_details(&http(404, "No such map")),
            "Not found (HTTP 404): No such map"
        );
        let refused = ApiError::transport("connection refused");
        assert_eq!(
            format_error_details(&refused),
            "Server is not reachable (connection refused)"
        );
    }

    #[test]
    fn test_details_differ_by_error_type() {
        assert_eq!(
            format_error_details(&http(403, "Forbidden")),
            "Not authorized (HTTP 403): check credentials"
        );
        assert_eq!(
            format_error_details(&http(400, "bad layer")),
            "Request rejected (HTTP 400): bad layer"
        );
        assert_eq!(
            format_error_details(&http(502, "Bad Gateway")),
            "Server error (HTTP 502): Bad Gateway"
        );
        assert_eq!(
            format_error_details(&ApiError::transport("dns lookup failed")),
            "Network error: dns lookup failed"
        );
        assert_eq!(format_error_details(&http(409, "conflict")), "HTTP 409: conflict");
        assert_eq!(
            format_error_details(&ApiError::transport("some random error")),
            "some random error"
        );
    }
}
