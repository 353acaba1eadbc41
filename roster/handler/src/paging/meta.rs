//! Page metadata returned next to every listing.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};
use utoipa::ToSchema;

use super::cursor::{encode_scoped, CursorPayload, CursorScope};
use super::params::PagingRequest;
use super::{Mode, NextMarker, PageResult};
use crate::common::error::Error;

/// Describes a returned page and how to request the next one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct PageMeta {
    /// Page size the request was served with.
    pub limit: u32,
    /// Paging mode the request resolved to.
    pub mode: Mode,
    /// Number of returned entries.
    pub count: u64,
    /// Whether the page was full, meaning more entries may follow.
    pub has_more: bool,
    /// Rows skipped. Offset mode only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub offset: Option<u64>,
    /// Offset of the next page. Offset mode only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_offset: Option<u64>,
    /// Number of entries matching the filters, when requested.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total: Option<u64>,
    /// Identifier the page started after.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cursor: Option<String>,
    /// Identifier of the last returned entry.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_cursor: Option<String>,
    /// Encoded cursor the page started after.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cursor_enc: Option<String>,
    /// Encoded cursor to pass as `cursor` for the next page.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_cursor_enc: Option<String>,
    /// Instant the listing is frozen at. Snapshot mode only.
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub snapshot: Option<OffsetDateTime>,
    /// Creation time of the entry the page started after. Snapshot mode only.
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub cursor_ts: Option<OffsetDateTime>,
    /// Creation time of the last returned entry. Snapshot mode only.
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub next_cursor_ts: Option<OffsetDateTime>,
}

/// Describes `page`. Formatting only; nothing is queried.
pub fn build_meta<E>(page: &PageResult<E>, mode: Mode, request: &PagingRequest) -> Result<PageMeta, Error> {
    let mut meta = PageMeta {
        limit: request.limit,
        mode,
        count: page.items.len() as u64,
        has_more: page.has_more,
        offset: None,
        next_offset: None,
        total: None,
        cursor: None,
        next_cursor: None,
        cursor_enc: None,
        next_cursor_enc: None,
        snapshot: None,
        cursor_ts: None,
        next_cursor_ts: None,
    };

    let scope = match mode {
        Mode::Offset => {
            meta.offset = Some(request.offset);
            meta.total = page.total;
            if let Some(NextMarker::Offset(next)) = page.next_marker {
                meta.next_offset = Some(next);
            }
            return Ok(meta);
        }
        Mode::Keyset => CursorScope::Keyset,
        Mode::Snapshot => CursorScope::Snapshot,
    };

    let current = request.cursor.as_ref().map(|cursor| &cursor.payload);
    let next = match &page.next_marker {
        Some(NextMarker::Cursor(payload)) => Some(payload),
        _ => None,
    };

    if let Some(current) = current {
        meta.cursor = Some(current.id.to_string());
        meta.cursor_enc = encode(scope, current)?;
    }
    if let Some(next) = next {
        meta.next_cursor = Some(next.id.to_string());
        meta.next_cursor_enc = encode(scope, next)?;
    }

    if mode == Mode::Snapshot {
        meta.snapshot = request.snapshot.map(utc);
        meta.cursor_ts = current.and_then(|payload| payload.timestamp).map(utc);
        meta.next_cursor_ts = next.and_then(|payload| payload.timestamp).map(utc);
    }

    Ok(meta)
}

fn encode(scope: CursorScope, payload: &CursorPayload) -> Result<Option<String>, Error> {
    payload
        .timestamp
        .map(|ts| encode_scoped(scope, &payload.id, ts))
        .transpose()
}

fn utc(ts: OffsetDateTime) -> OffsetDateTime {
    ts.to_offset(UtcOffset::UTC)
}
