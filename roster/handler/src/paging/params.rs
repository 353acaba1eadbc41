//! Turns raw query string parameters into a validated [`PagingRequest`].

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use utoipa::IntoParams;

use super::cursor::{decode_cursor, Cursor, CursorScope};
use super::sort::{SortDirection, SortSpec};
use super::Mode;
use crate::common::error::Error;
use crate::config::PagingConfig;

/// Paging parameters exactly as the client sent them.
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "snake_case")]
#[into_params(parameter_in = Query)]
pub struct PagingQuery {
    /// Page size, clamped into `[1, max_limit]`.
    pub limit: Option<String>,
    /// Rows to skip. Offset paging only.
    pub offset: Option<String>,
    /// Sort spec, `field[:asc|desc]`.
    pub sort: Option<String>,
    /// Opaque cursor from a previous page.
    pub cursor: Option<String>,
    /// Timestamp accompanying a bare identifier cursor.
    pub cursor_ts: Option<String>,
    /// RFC 3339 instant to freeze the listing at.
    pub snapshot: Option<String>,
    /// `true` freezes the listing at the time of the request.
    pub fixed: Option<String>,
    /// `true` adds the total number of matching rows. Offset paging only.
    pub with_total: Option<String>,
}

/// A validated paging request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagingRequest {
    /// Page size.
    pub limit: u32,
    /// Rows to skip in offset mode.
    pub offset: u64,
    /// Requested ordering, if any.
    pub sort: Option<SortSpec>,
    /// Decoded client cursor.
    pub cursor: Option<Cursor>,
    /// Instant the listing is frozen at.
    pub snapshot: Option<OffsetDateTime>,
    /// Whether a total count was requested.
    pub with_total: bool,
}

/// Parses `raw` against `config`, resolving `fixed` to the current instant.
pub fn parse_paging(raw: &PagingQuery, config: &PagingConfig) -> Result<(PagingRequest, Mode), Error> {
    parse_at(raw, config, OffsetDateTime::now_utc())
}

/// Same as [`parse_paging`] with an explicit notion of "now".
pub fn parse_at(
    raw: &PagingQuery,
    config: &PagingConfig,
    now: OffsetDateTime,
) -> Result<(PagingRequest, Mode), Error> {
    let limit = parse_limit(non_empty(&raw.limit), config)?;

    let offset = match non_empty(&raw.offset) {
        Some(value) => value
            .parse::<u64>()
            .map_err(|_| Error::InvalidOffset(value.to_string()))?,
        None => 0,
    };

    let snapshot = match non_empty(&raw.snapshot) {
        Some(value) => {
            let snapshot = parse_timestamp(value)
                .ok_or_else(|| Error::InvalidSnapshot(value.to_string()))?;
            Some(snapshot)
        }
        None if is_true(&raw.fixed) => Some(now.to_offset(UtcOffset::UTC)),
        None => None,
    };

    let cursor = match non_empty(&raw.cursor) {
        Some(value) => {
            let mut cursor = decode_cursor(value)?;
            if cursor.payload.timestamp.is_none() {
                cursor.payload.timestamp = non_empty(&raw.cursor_ts).and_then(parse_timestamp);
            }
            Some(cursor)
        }
        None => None,
    };

    let mode = match (&cursor, snapshot) {
        (Some(cursor), Some(_)) if cursor.scope == CursorScope::Snapshot => Mode::Snapshot,
        (Some(cursor), None) if cursor.scope == CursorScope::Snapshot => {
            return Err(Error::InvalidCursor(raw.cursor.clone().unwrap_or_default()));
        }
        (Some(_), _) => Mode::Keyset,
        (None, Some(_)) => Mode::Snapshot,
        (None, None) => Mode::Offset,
    };

    let sort = SortSpec::parse(raw.sort.as_deref().unwrap_or_default())?;
    check_sort(mode, sort.as_ref(), raw.sort.as_deref().unwrap_or_default())?;

    let request = PagingRequest {
        limit,
        offset,
        sort,
        cursor,
        snapshot,
        with_total: is_true(&raw.with_total),
    };
    Ok((request, mode))
}

fn parse_limit(raw: Option<&str>, config: &PagingConfig) -> Result<u32, Error> {
    let Some(value) = raw else {
        return Ok(config.default_limit);
    };
    let max = config.max_limit.max(1);
    let requested = match value.parse::<i64>() {
        Ok(requested) => requested,
        Err(error) => match error.kind() {
            IntErrorKind::PosOverflow => return Ok(max),
            IntErrorKind::NegOverflow => return Ok(1),
            _ => return Err(Error::InvalidLimit(value.to_string())),
        },
    };
    Ok(requested.clamp(1, i64::from(max)) as u32)
}

/// Keyset walks are always identifier ascending and snapshot walks always
/// newest first. Anything else is refused rather than silently replaced.
fn check_sort(mode: Mode, sort: Option<&SortSpec>, raw: &str) -> Result<(), Error> {
    let allowed = match (mode, sort) {
        (_, None) | (Mode::Offset, _) => true,
        (Mode::Keyset, Some(spec)) => spec.is("id", SortDirection::Asc),
        (Mode::Snapshot, Some(spec)) => spec.is("created_at", SortDirection::Desc),
    };
    if allowed {
        Ok(())
    } else {
        Err(Error::IncompatibleSort {
            mode: mode.as_str(),
            sort: raw.to_string(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn is_true(value: &Option<String>) -> bool {
    non_empty(value).is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339)
        .ok()
        .map(|ts| ts.to_offset(UtcOffset::UTC))
}
