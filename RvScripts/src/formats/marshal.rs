//! Ruby Marshal loading
//!
//! Decoding is done by `marshal-rs`, which turns a Marshal 4.8 stream into a
//! `serde_json::Value` tree. Strings that carry an encoding come back as JSON
//! strings; strings without one (script bodies) come back as
//! `{"__type": "bytes", "data": [..]}` objects.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::{Error, Result};

/// Marshal major version byte
pub const MARSHAL_MAJOR: u8 = 4;

/// Marshal minor version byte
pub const MARSHAL_MINOR: u8 = 8;

/// `__type` tag of a binary string object
const BYTES_TYPE: &str = "bytes";

/// Check the two version bytes at the start of a Marshal stream.
///
/// # Errors
///
/// Returns [`Error::UnexpectedEof`] if the header is incomplete and
/// [`Error::UnsupportedMarshalVersion`] for anything other than 4.8.
pub fn check_version(data: &[u8]) -> Result<()> {
    match data {
        [MARSHAL_MAJOR, MARSHAL_MINOR, ..] => Ok(()),
        [major, minor, ..] => Err(Error::UnsupportedMarshalVersion {
            major: *major,
            minor: *minor,
        }),
        _ => Err(Error::UnexpectedEof),
    }
}

/// Parse Marshal data from bytes
///
/// # Errors
///
/// Returns a version error for a foreign header, or
/// [`Error::MarshalDecodeFailed`] if the stream does not decode.
pub fn parse_marshal_bytes(data: &[u8]) -> Result<Value> {
    check_version(data)?;
    let value: Value = marshal_rs::load(data, None, None).map_err(|e| Error::MarshalDecodeFailed {
        message: e.to_string(),
    })?;
    tracing::debug!("Read Marshal root {} ({} bytes)", kind(&value), data.len());
    Ok(value)
}

/// Raw bytes of a decoded Ruby string, in either of its two shapes.
pub fn string_bytes(value: &Value) -> Option<Cow<'_, [u8]>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_bytes())),
        Value::Object(map) if map.get("__type").and_then(Value::as_str) == Some(BYTES_TYPE) => {
            map.get("data")?
                .as_array()?
                .iter()
                .map(|b| b.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect::<Option<Vec<u8>>>()
                .map(Cow::Owned)
        }
        _ => None,
    }
}

/// Name of a decoded value's kind, for error messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nil",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) if string_bytes(value).is_some() => "string",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_check() {
        assert!(check_version(&[4, 8, b'0']).is_ok());
        assert!(matches!(
            check_version(&[4, 9, b'0']),
            Err(Error::UnsupportedMarshalVersion { major: 4, minor: 9 })
        ));
        assert!(matches!(check_version(&[4]), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_rejects_foreign_stream_before_decoding() {
        let err = parse_marshal_bytes(b"PK\x03\x04").unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_parses_scalars() {
        assert_eq!(parse_marshal_bytes(&[4, 8, b'0']).unwrap(), Value::Null);
        assert_eq!(parse_marshal_bytes(&[4, 8, b'i', 0x06]).unwrap(), json!(1));
    }

    #[test]
    fn test_string_bytes_shapes() {
        assert_eq!(string_bytes(&json!("Main")).as_deref(), Some(&b"Main"[..]));
        let binary = json!({"__type": "bytes", "data": [120, 156, 255]});
        assert_eq!(string_bytes(&binary).as_deref(), Some(&[120u8, 156, 255][..]));
        assert_eq!(string_bytes(&json!({"__type": "bytes", "data": [256]})), None);
        assert_eq!(string_bytes(&json!({"__class": "__symbol__Table"})), None);
        assert_eq!(string_bytes(&json!(3)), None);
    }

    #[test]
    fn test_kind() {
        assert_eq!(kind(&json!(null)), "nil");
        assert_eq!(kind(&json!([1])), "array");
        assert_eq!(kind(&json!({"__type": "bytes", "data": []})), "string");
        assert_eq!(kind(&json!({"a": 1})), "object");
    }
}
