//! Sort specs and the per-collection sort whitelist.

use std::fmt;

use crate::common::error::Error;
use crate::database::{Field, Listable, Ordering, Query};

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Wire name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A client supplied `field[:asc|desc]` sort spec.
///
/// The field name is kept as given; it is only checked against a collection's
/// whitelist in [`apply_sort`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortSpec {
    /// Requested field name.
    pub field: String,
    /// Requested direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parses a raw spec. Returns `Ok(None)` for a blank spec.
    pub fn parse(raw: &str) -> Result<Option<Self>, Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let (field, direction) = match raw.split_once(':') {
            Some((field, direction)) => (field.trim(), Some(direction.trim())),
            None => (raw, None),
        };

        let direction = match direction.map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(_) => return Err(Error::InvalidSortDirection(raw.to_string())),
        };

        Ok(Some(SortSpec { field: field.to_string(), direction }))
    }

    /// Whether this spec orders by exactly `field` in `direction`.
    pub fn is(&self, field: &str, direction: SortDirection) -> bool {
        self.field == field && self.direction == direction
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}

/// Looks `field` up in the whitelist of `E`.
pub fn sortable_field<E: Listable>(field: &str) -> Result<Field, Error> {
    E::SORTABLE
        .iter()
        .copied()
        .find(|sortable| sortable.as_str() == field)
        .ok_or_else(|| Error::InvalidSortField {
            collection: E::COLLECTION,
            field: field.to_string(),
        })
}

/// Adds the ordering for `sort` to `query`, or the collection default when no
/// sort is given. An `id` ascending tie-break follows any ordering that does
/// not already involve the identifier.
pub fn apply_sort<E: Listable>(mut query: Query, sort: Option<&SortSpec>) -> Result<Query, Error> {
    match sort {
        Some(spec) => {
            let field = sortable_field::<E>(&spec.field)?;
            query = query.order_by(Ordering { field, direction: spec.direction });
        }
        None => {
            for ordering in E::DEFAULT_ORDERING {
                query = query.order_by(*ordering);
            }
        }
    }

    if !query.orders_by(Field::Id) {
        query = query.order_by(Ordering::asc(Field::Id));
    }
    Ok(query)
}
