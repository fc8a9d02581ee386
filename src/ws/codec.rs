//! Envelope encoding and frame decoding.
//!
//! Outgoing payloads are wrapped into an envelope carrying the sender's
//! [`ClientId`] and an RFC 3339 timestamp. Incoming text frames are parsed
//! and classified into [`ServerMessage`] variants; frames that cannot be
//! decoded are reported as errors for the caller to log and drop — decoding
//! never tears down the connection.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::messages::{LegacyMessage, ServerMessage};
use crate::domain::ClientId;

/// Errors produced while building an outgoing envelope.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The payload failed to serialize.
    #[error("failed to serialize payload: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The payload serialized to something other than a JSON object, so the
    /// identity fields cannot be merged in.
    #[error("envelope payload must serialize to a JSON object")]
    NotAnObject,
}

/// Errors produced while decoding an incoming text frame.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame is not valid JSON.
    #[error("malformed JSON frame: {0}")]
    Json(#[source] serde_json::Error),

    /// The frame is valid JSON but not an object.
    #[error("frame is not a JSON object")]
    NotAnObject,

    /// The frame carries a known `type` but its payload does not match the
    /// variant's schema.
    #[error("invalid `{msg_type}` payload: {source}")]
    Payload {
        /// Discriminant of the frame that failed to decode.
        msg_type: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

/// Builds one outgoing text frame: the payload's fields plus `clientId` and
/// `timestamp`.
///
/// The envelope is constructed fresh per send and never reused. The
/// timestamp is taken as an argument so envelopes are deterministic under
/// test.
///
/// # Errors
///
/// Returns [`EncodeError`] if the payload fails to serialize or does not
/// serialize to a JSON object.
pub fn encode_envelope<T: Serialize>(
    payload: &T,
    client_id: &ClientId,
    timestamp: DateTime<Utc>,
) -> Result<String, EncodeError> {
    let mut value = serde_json::to_value(payload).map_err(EncodeError::Serialize)?;
    let Value::Object(map) = &mut value else {
        return Err(EncodeError::NotAnObject);
    };
    map.insert(
        "clientId".to_string(),
        Value::String(client_id.as_str().to_string()),
    );
    map.insert("timestamp".to_string(), Value::String(timestamp.to_rfc3339()));
    serde_json::to_string(&value).map_err(EncodeError::Serialize)
}

/// Decodes one incoming text frame into a [`ServerMessage`].
///
/// Classification rules:
/// - a known `type` decodes into its typed variant (a schema mismatch is a
///   [`DecodeError::Payload`]);
/// - an unrecognized `type` becomes [`ServerMessage::Unknown`] — not an
///   error;
/// - a frame without a string `type` is read through the older untyped
///   shape and becomes [`ServerMessage::Legacy`].
///
/// # Errors
///
/// Returns [`DecodeError`] for frames that are not JSON objects or carry an
/// invalid payload for a known discriminant.
pub fn decode(text: &str) -> Result<ServerMessage, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(DecodeError::Json)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }

    let tag = value.get("type").and_then(Value::as_str).map(str::to_owned);
    match tag {
        Some(msg_type) if ServerMessage::is_known_type(&msg_type) => {
            serde_json::from_value(value).map_err(|source| DecodeError::Payload { msg_type, source })
        }
        Some(msg_type) => Ok(ServerMessage::Unknown { msg_type }),
        None => serde_json::from_value::<LegacyMessage>(value)
            .map(ServerMessage::Legacy)
            .map_err(|source| DecodeError::Payload {
                msg_type: "legacy".to_string(),
                source,
            }),
    }
}
