//! Opaque cursor tokens.
//!
//! A token is the URL-safe, unpadded base64 encoding of a one byte tag followed
//! by a bincode body holding the identifier and timestamp of the row a page
//! ended on. The tag records which walk minted the token:
//!
//! | tag    | meaning                                   |
//! |--------|-------------------------------------------|
//! | `0x01` | keyset walk                               |
//! | `0x02` | snapshot walk                             |
//! | `{`    | earlier JSON revision, read as keyset     |
//!
//! Bare identifiers (`42`, or a UUID in any textual form) from older clients
//! are still accepted; they carry no timestamp.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use bincode::Options;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::common::error::Error;
use crate::database::EntityId;

const KEYSET_TAG: u8 = 0x01;
const SNAPSHOT_TAG: u8 = 0x02;
const JSON_TAG: u8 = b'{';

/// The walk a cursor belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CursorScope {
    /// Identifier ordered walk.
    Keyset,
    /// Walk over a frozen view, newest first.
    Snapshot,
}

impl CursorScope {
    fn tag(&self) -> u8 {
        match self {
            CursorScope::Keyset => KEYSET_TAG,
            CursorScope::Snapshot => SNAPSHOT_TAG,
        }
    }
}

/// Position of the last row a page returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CursorPayload {
    /// Identifier of the row.
    pub id: EntityId,
    /// Creation time of the row, absent for bare legacy cursors.
    pub timestamp: Option<OffsetDateTime>,
}

/// A decoded client cursor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cursor {
    /// Walk that minted the cursor.
    pub scope: CursorScope,
    /// Decoded position.
    pub payload: CursorPayload,
}

#[derive(Serialize, Deserialize)]
struct CursorBody {
    id: EntityId,
    seconds: i64,
    nanos: u32,
}

#[derive(Deserialize)]
struct JsonCursor {
    id: JsonId,
    #[serde(default, with = "time::serde::rfc3339::option")]
    ts: Option<OffsetDateTime>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonId {
    Serial(i64),
    Uuid(Uuid),
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new().reject_trailing_bytes()
}

/// Encodes a keyset scoped cursor.
pub fn encode_cursor(id: &EntityId, timestamp: OffsetDateTime) -> Result<String, Error> {
    encode_scoped(CursorScope::Keyset, id, timestamp)
}

/// Encodes a cursor for the given walk.
pub fn encode_scoped(
    scope: CursorScope,
    id: &EntityId,
    timestamp: OffsetDateTime,
) -> Result<String, Error> {
    let body = CursorBody {
        id: *id,
        seconds: timestamp.unix_timestamp(),
        nanos: timestamp.nanosecond(),
    };
    let mut bytes = vec![scope.tag()];
    codec()
        .serialize_into(&mut bytes, &body)
        .map_err(|error| {
            tracing::error!(%error, "failed to serialize cursor");
            Error::InternalServer
        })?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decodes a client supplied cursor, bare legacy identifiers first.
pub fn decode_cursor(raw: &str) -> Result<Cursor, Error> {
    if let Some(id) = parse_bare_id(raw) {
        return Ok(Cursor {
            scope: CursorScope::Keyset,
            payload: CursorPayload { id, timestamp: None },
        });
    }
    decode_token(raw).ok_or_else(|| Error::InvalidCursor(raw.to_string()))
}

/// Reads a legacy bare identifier: a decimal integer, or a UUID in any of
/// its simple, hyphenated, braced or URN forms.
pub fn parse_bare_id(raw: &str) -> Option<EntityId> {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(id) = raw.parse::<i64>() {
            return Some(EntityId::Serial(id));
        }
    }
    Uuid::try_parse(raw).ok().map(EntityId::Uuid)
}

fn decode_token(raw: &str) -> Option<Cursor> {
    let bytes = URL_SAFE_NO_PAD
        .decode(raw)
        .map_err(|error| debug!(%error, "cursor is not base64"))
        .ok()?;
    let (tag, body) = bytes.split_first()?;

    let scope = match *tag {
        KEYSET_TAG => CursorScope::Keyset,
        SNAPSHOT_TAG => CursorScope::Snapshot,
        JSON_TAG => return decode_json(&bytes),
        other => {
            debug!(tag = other, "unknown cursor tag");
            return None;
        }
    };

    let body: CursorBody = codec()
        .deserialize(body)
        .map_err(|error| debug!(%error, "corrupt cursor body"))
        .ok()?;
    let timestamp = OffsetDateTime::from_unix_timestamp(body.seconds)
        .and_then(|ts| ts.replace_nanosecond(body.nanos))
        .map_err(|error| debug!(%error, "cursor timestamp out of range"))
        .ok()?;

    Some(Cursor {
        scope,
        payload: CursorPayload {
            id: body.id,
            timestamp: Some(timestamp),
        },
    })
}

fn decode_json(bytes: &[u8]) -> Option<Cursor> {
    let cursor: JsonCursor = serde_json::from_slice(bytes)
        .map_err(|error| debug!(%error, "corrupt json cursor"))
        .ok()?;
    let id = match cursor.id {
        JsonId::Serial(id) => EntityId::Serial(id),
        JsonId::Uuid(id) => EntityId::Uuid(id),
    };
    Some(Cursor {
        scope: CursorScope::Keyset,
        payload: CursorPayload {
            id,
            timestamp: cursor.ts.map(|ts| ts.to_offset(time::UtcOffset::UTC)),
        },
    })
}
