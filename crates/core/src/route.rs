//! Edit-screen entry: numeric id path segments.

use crate::error::CoreError;
use crate::types::DbId;

/// Parse an id path segment for an edit screen.
///
/// Only strictly positive integers are accepted. Anything else
/// short-circuits to [`CoreError::InvalidId`] so no request is issued.
pub fn parse_route_id(entity: &'static str, segment: Option<&str>) -> Result<DbId, CoreError> {
    segment
        .map(str::trim)
        .and_then(|s| s.parse::<DbId>().ok())
        .filter(|id| *id > 0)
        .ok_or(CoreError::InvalidId { entity })
}
