use serde_json::Value;
use share_list_models::RecommendationList;
use tracing::{debug, error};

use crate::compress::{compress, decompress};
use crate::error::DecodeError;
use crate::wire::{CompactList, LegacyList, WireShape};

/// Turn a list into a URL-safe token, reporting a serialization failure.
///
/// Only the title, kind and items travel; the list's id and creation time do not.
/// Optional fields that are zero or empty are dropped, so "set to 0" and
/// "never set" come back the same.
pub fn try_encode(list: &RecommendationList) -> Result<String, serde_json::Error> {
    let compact = CompactList::from_list(list);
    let json = serde_json::to_string(&compact)?;
    let token = compress(&json);

    debug!(
        list_id = %list.id,
        items = list.items.len(),
        json_bytes = json.len(),
        token_chars = token.len(),
        "Encoded share list"
    );

    Ok(token)
}

/// Turn a list into a URL-safe token.
///
/// Serializing the wire structs does not fail in practice, since every map is
/// keyed by strings. Should it ever, the failure is logged at error level and the
/// empty token is rejected by `decode`. Use `try_encode` to handle it instead.
pub fn encode(list: &RecommendationList) -> String {
    match try_encode(list) {
        Ok(token) => token,
        Err(e) => {
            error!(list_id = %list.id, error = %e, "Failed to serialize share list");
            String::new()
        }
    }
}

/// Decode a token, reporting why it failed.
///
/// The returned list always has a freshly generated id and the current time as
/// its creation time, so it can be stored next to existing lists without clashing.
pub fn try_decode(token: &str) -> Result<RecommendationList, DecodeError> {
    let json = decompress(token)?;
    let payload: Value = serde_json::from_str(&json).map_err(DecodeError::Json)?;

    match WireShape::detect(&payload) {
        WireShape::Legacy => {
            let legacy: LegacyList =
                serde_json::from_value(payload).map_err(DecodeError::Schema)?;
            debug!(items = legacy.games.len(), "Decoded legacy share list");
            Ok(legacy.into_list())
        }
        WireShape::Compact => {
            let compact: CompactList =
                serde_json::from_value(payload).map_err(DecodeError::Schema)?;
            debug!(items = compact.g.len(), "Decoded share list");
            Ok(compact.into_list())
        }
        WireShape::Unrecognized => Err(DecodeError::UnrecognizedShape),
    }
}

/// Decode a token from an untrusted source.
///
/// Any failure yields `None`; callers show "invalid or expired link" and render nothing.
/// An empty list is a successful decode, not a failure.
pub fn decode(token: &str) -> Option<RecommendationList> {
    match try_decode(token) {
        Ok(list) => Some(list),
        Err(e) => {
            debug!(error = %e, token_chars = token.len(), "Rejected share token");
            None
        }
    }
}
