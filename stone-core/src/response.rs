//! # Response Decoding
//!
//! The last step of a call, once the transport has received an HTTP response for a route:
//! classify the status and feed the body to the route's result or error converter.
//!
//! Nothing here performs I/O. The point of doing it in one place is that a body the route's
//! converters cannot make sense of surfaces as [`ResponseError::Deserialization`], which is
//! never confused with the transport-level failures, so callers can tell "the server violated
//! the expected contract" apart from "the request did not succeed".
use crate::{
    error::SerializationError,
    route::RouteDescriptor,
    serializable::{ConverterRef, DynValue},
    wire::WireValue,
};

/// Status of a route-specific error, whose body is decoded by the route's error converter.
pub const ROUTE_ERROR_STATUS: u16 = 409;

/// What a successfully decoded response carried.
#[derive(Debug)]
pub enum RouteOutcome {
    /// 2xx. `None` when the route has no result converter.
    Success(Option<DynValue>),
    /// 409. `None` when the route has no error converter.
    RouteError(Option<DynValue>),
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Bad input: '{0}'")]
    BadInput(String),

    #[error("Rate limited by the server: '{0}'")]
    RateLimited(String),

    #[error("Internal server error (status {status}): '{body}'")]
    InternalServer { status: u16, body: String },

    #[error("Unexpected HTTP status {status}: '{body}'")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Response body of route '{route}' is not valid JSON: '{source}'")]
    InvalidJson {
        route: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to deserialize the response of route '{route}': '{source}'")]
    Deserialization {
        route: String,
        #[source]
        source: SerializationError,
    },
}

impl ResponseError {
    /// `true` when the server answered but the body did not match the route's contract.
    pub fn is_deserialization(&self) -> bool {
        matches!(
            self,
            ResponseError::InvalidJson { .. } | ResponseError::Deserialization { .. }
        )
    }
}

/// Decodes the response `body` received with `status` for a call to `route`.
///
/// # Returns
///
/// * `Ok(RouteOutcome::Success(_))` - 2xx, decoded with the result converter.
/// * `Ok(RouteOutcome::RouteError(_))` - 409, decoded with the error converter. The error
///   payload is read from the body's `"error"` member when there is one, otherwise the whole
///   body is the payload.
/// * `Err(ResponseError)` - Any other status, or a body that could not be decoded.
pub fn decode_response(
    route: &RouteDescriptor,
    status: u16,
    body: &str,
) -> Result<RouteOutcome, ResponseError> {
    tracing::debug!(route = %route.full_name(), status, "decoding route response");

    match status {
        200..=299 => decode_payload(route, route.result_converter(), body, false)
            .map(RouteOutcome::Success),
        ROUTE_ERROR_STATUS => decode_payload(route, route.error_converter(), body, true)
            .map(RouteOutcome::RouteError),
        400 => Err(ResponseError::BadInput(body.to_string())),
        429 => Err(ResponseError::RateLimited(body.to_string())),
        500..=u16::MAX => Err(ResponseError::InternalServer {
            status,
            body: body.to_string(),
        }),
        _ => Err(ResponseError::UnexpectedStatus {
            status,
            body: body.to_string(),
        }),
    }
}

fn decode_payload(
    route: &RouteDescriptor,
    converter: Option<ConverterRef>,
    body: &str,
    unwrap_error: bool,
) -> Result<Option<DynValue>, ResponseError> {
    let Some(converter) = converter else {
        tracing::trace!(route = %route.full_name(), "route has no converter for this payload");
        return Ok(None);
    };

    let wire: WireValue =
        serde_json::from_str(body).map_err(|source| ResponseError::InvalidJson {
            route: route.full_name(),
            source,
        })?;

    let payload = match &wire {
        WireValue::Object(object) if unwrap_error => object.get("error").unwrap_or(&wire),
        _ => &wire,
    };

    converter
        .deserialize(payload)
        .map(Some)
        .map_err(|source| ResponseError::Deserialization {
            route: route.full_name(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> RouteDescriptor {
        RouteDescriptor::new(
            "list_names",
            "test",
            false,
            Some(ConverterRef::of::<Vec<String>>()),
            Some(ConverterRef::of::<String>()),
            [("style", "rpc")],
        )
    }

    #[test]
    fn test_success_is_decoded_with_the_result_converter() {
        let outcome = decode_response(&route(), 200, r#"["a", "b"]"#).unwrap();

        match outcome {
            RouteOutcome::Success(Some(value)) => {
                assert_eq!(value.downcast::<Vec<String>>().unwrap(), vec!["a", "b"])
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_route_error_is_decoded_with_the_error_converter() {
        let body = r#"{"error_summary": "not_found/..", "error": "not_found"}"#;

        match decode_response(&route(), 409, body).unwrap() {
            RouteOutcome::RouteError(Some(value)) => {
                assert_eq!(value.downcast_ref::<String>().unwrap(), "not_found")
            }
            other => panic!("unexpected outcome {other:?}"),
        }

        match decode_response(&route(), 409, r#""not_found""#).unwrap() {
            RouteOutcome::RouteError(Some(value)) => assert_eq!(value.describe(), "\"not_found\""),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_routes_without_converters_ignore_the_body() {
        let route = RouteDescriptor::new("revoke", "auth", false, None, None, [("style", "rpc")]);

        assert!(matches!(
            decode_response(&route, 200, "null").unwrap(),
            RouteOutcome::Success(None)
        ));
        assert!(matches!(
            decode_response(&route, 409, "not even json").unwrap(),
            RouteOutcome::RouteError(None)
        ));
    }

    #[test]
    fn test_contract_violations_are_deserialization_errors() {
        let err = decode_response(&route(), 200, r#"["a", 3]"#).unwrap_err();
        assert!(err.is_deserialization());
        match err {
            ResponseError::Deserialization { route, source } => {
                assert_eq!(route, "test/list_names");
                assert_eq!(source.path().to_string(), "$[1]");
            }
            other => panic!("unexpected error {other:?}"),
        }

        let err = decode_response(&route(), 200, "[\"a\"").unwrap_err();
        assert!(matches!(err, ResponseError::InvalidJson { .. }));
        assert!(err.is_deserialization());
    }

    #[test]
    fn test_transport_failures_are_not_deserialization_errors() {
        let cases = [
            (400, "Error in call: missing path"),
            (429, ""),
            (500, "oops"),
            (503, "unavailable"),
            (302, "moved"),
        ];

        for (status, body) in cases {
            let err = decode_response(&route(), status, body).unwrap_err();
            assert!(!err.is_deserialization(), "status {status}");
        }

        assert!(matches!(
            decode_response(&route(), 400, "bad").unwrap_err(),
            ResponseError::BadInput(body) if body == "bad"
        ));
        assert!(matches!(
            decode_response(&route(), 503, "").unwrap_err(),
            ResponseError::InternalServer { status: 503, .. }
        ));
        assert!(matches!(
            decode_response(&route(), 429, "").unwrap_err(),
            ResponseError::RateLimited(_)
        ));
    }
}
