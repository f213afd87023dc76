//! Error types for canvas lookup, payload decoding and chart drawing.

use std::fmt;

use serde::Serialize;

/// Which of the two payloads a decoding failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Data,
    Options,
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Data => f.write_str("data"),
            Payload::Options => f.write_str("options"),
        }
    }
}

/// Failure to resolve an element id to a 2D drawing context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no document is available")]
    NoDocument,
    #[error("no element with id `{id}`")]
    ElementNotFound { id: String },
    #[error("element `{id}` is not a canvas")]
    NotACanvas { id: String },
    #[error("canvas `{id}` has no 2d context")]
    ContextUnavailable { id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The payload is not valid JSON text.
    #[error("invalid {payload} payload: {source}")]
    Decode {
        payload: Payload,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON whose structure does not match the chart schema.
    #[error("malformed {payload} payload: {source}")]
    Schema {
        payload: Payload,
        #[source]
        source: serde_json::Error,
    },

    /// A decoded payload breaks a shape rule.
    #[error("{payload} payload field `{field}`: {message}")]
    Shape {
        payload: Payload,
        field: String,
        message: String,
    },

    /// Raised by the charting library itself.
    #[error("chart library error: {0}")]
    Library(String),
}

impl BridgeError {
    /// Split a serde_json error into a decode (syntax) or schema (data) failure.
    pub(crate) fn from_json(payload: Payload, source: serde_json::Error) -> Self {
        if source.is_data() {
            BridgeError::Schema { payload, source }
        } else {
            BridgeError::Decode { payload, source }
        }
    }

    /// Stable error kind reported across the JS boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeError::Lookup(_) => "lookup_error",
            BridgeError::Decode { .. } => "decode_error",
            BridgeError::Schema { .. } => "schema_error",
            BridgeError::Shape { .. } => "shape_error",
            BridgeError::Library(_) => "library_error",
        }
    }

    /// The payload at fault, if the error came from decoding.
    pub fn payload(&self) -> Option<Payload> {
        match self {
            BridgeError::Decode { payload, .. }
            | BridgeError::Schema { payload, .. }
            | BridgeError::Shape { payload, .. } => Some(*payload),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Serializable error report, handed to JS as a plain object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl ErrorReport {
    /// Report for a bridge config that could not be parsed.
    pub fn config(source: &serde_json::Error) -> Self {
        Self {
            kind: "config_error".to_string(),
            message: format!("invalid config: {source}"),
            payload: None,
        }
    }
}

impl From<&BridgeError> for ErrorReport {
    fn from(e: &BridgeError) -> Self {
        Self {
            kind: e.kind().to_string(),
            message: e.to_string(),
            payload: e.payload(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_is_decode() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = BridgeError::from_json(Payload::Data, err);
        assert_eq!(err.kind(), "decode_error");
        assert!(err.to_string().starts_with("invalid data payload"));
    }

    #[test]
    fn test_data_error_is_schema() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            datasets: Vec<u8>,
        }
        let err = serde_json::from_str::<Needs>("{}").unwrap_err();
        let err = BridgeError::from_json(Payload::Options, err);
        assert_eq!(err.kind(), "schema_error");
        assert_eq!(err.payload(), Some(Payload::Options));
        assert!(err.to_string().contains("datasets"));
    }

    #[test]
    fn test_lookup_error_report() {
        let err = BridgeError::from(LookupError::ElementNotFound {
            id: "missing".to_string(),
        });
        let report = ErrorReport::from(&err);
        assert_eq!(report.kind, "lookup_error");
        assert_eq!(report.message, "no element with id `missing`");
        assert!(report.payload.is_none());
    }

    #[test]
    fn test_config_error_report() {
        let err = serde_json::from_str::<crate::BridgeConfig>(r#"{"strict":"no"}"#).unwrap_err();
        let report = ErrorReport::config(&err);
        assert_eq!(report.kind, "config_error");
        assert!(report.message.starts_with("invalid config: "));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "config_error");
        assert!(json.get("payload").is_none());
    }
}
