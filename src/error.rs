use std::fmt;

/// Codec error
///
/// Returned by decoding and encoding operations when a URL does not match
/// the record's schema or a record cannot be rendered back into URL parts.
///
/// Every error is terminal for the call that raised it: a single failing
/// field aborts the whole record, there is no partial result. Decode errors
/// describe malformed input; `NoValue` on encode and `InvalidState` anywhere
/// indicate misuse of the schema machinery rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Internal contract violation
    ///
    /// A field was accessed outside the expected phase, or an engine
    /// operation was invoked against a definition of a different kind.
    /// This is a programming error, not a recoverable condition.
    InvalidState(String),
    /// Path exhausted before an expected literal segment was found
    MissingStaticPath {
        /// The first expected segment that had no component left to match
        expected: String,
    },
    /// A literal path segment was present but had the wrong value
    StaticPathMismatch {
        /// The segment the schema expected at this position
        expected: String,
        /// The segment actually found in the path
        actual: String,
    },
    /// Path exhausted where a typed segment was required
    MissingDynamicPath {
        /// Type the segment would have been converted into
        value_type: &'static str,
        /// Name of the field that required the segment
        field: String,
    },
    /// A path segment was present but failed conversion
    InvalidDynamicPathValue {
        /// The raw segment as it appeared in the path
        raw: String,
        /// Type the segment failed to convert into
        value_type: &'static str,
        /// Name of the field being decoded
        field: String,
    },
    /// A query value was present but failed conversion
    InvalidQueryValue {
        /// The raw query value as it appeared in the URL
        raw: String,
        /// The query key the value was read from
        key: String,
    },
    /// A required value is absent and no default or optional fallback applies
    ///
    /// Raised by decode for a missing non-optional, non-defaulted query
    /// parameter, and by encode when a dynamic path or query field is still
    /// unbound.
    NoValue {
        /// Query key or field name the value was missing for
        key: String,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidState(description) => {
                write!(f, "invalid state: {}", description)
            }
            CodecError::MissingStaticPath { expected } => {
                write!(
                    f,
                    "path exhausted before expected static segment '{}'",
                    expected
                )
            }
            CodecError::StaticPathMismatch { expected, actual } => {
                write!(
                    f,
                    "static path mismatch: expected segment '{}', found '{}'",
                    expected, actual
                )
            }
            CodecError::MissingDynamicPath { value_type, field } => {
                write!(
                    f,
                    "path exhausted where a '{}' segment was required for field '{}'",
                    value_type, field
                )
            }
            CodecError::InvalidDynamicPathValue {
                raw,
                value_type,
                field,
            } => {
                write!(
                    f,
                    "cannot convert path segment '{}' into '{}' for field '{}'",
                    raw, value_type, field
                )
            }
            CodecError::InvalidQueryValue { raw, key } => {
                write!(
                    f,
                    "cannot convert query value '{}' for key '{}'",
                    raw, key
                )
            }
            CodecError::NoValue { key } => {
                write!(f, "no value for '{}'", key)
            }
        }
    }
}

impl std::error::Error for CodecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_name_the_offending_input() {
        let err = CodecError::StaticPathMismatch {
            expected: "bar".to_string(),
            actual: "x".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("'bar'"));
        assert!(rendered.contains("'x'"));

        let err = CodecError::InvalidDynamicPathValue {
            raw: "abc".to_string(),
            value_type: "i64",
            field: "n".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("'abc'"));
        assert!(rendered.contains("'i64'"));
        assert!(rendered.contains("'n'"));
    }

    #[test]
    fn test_errors_compare_by_payload() {
        assert_eq!(
            CodecError::NoValue {
                key: "limit".to_string()
            },
            CodecError::NoValue {
                key: "limit".to_string()
            }
        );
        assert_ne!(
            CodecError::NoValue {
                key: "limit".to_string()
            },
            CodecError::NoValue {
                key: "offset".to_string()
            }
        );
    }
}
