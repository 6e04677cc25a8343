//! List endpoint helpers: pagination bounds, ordering allow-lists and
//! free-text search patterns.
//!
//! This module lives in `core` (zero internal deps) so the repository layer
//! can build SQL from user input without the API layer re-validating it.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows per page.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum number of rows per page.
pub const MAX_LIMIT: i64 = 200;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Per-resource ordering rules for the `?ordering=` query parameter.
///
/// The parameter is a comma-separated list of field names, each optionally
/// prefixed with `-` for descending order. Only names present in `allowed`
/// are honoured; anything else is ignored. If no requested field survives,
/// `default` (written in the same syntax) is used. `tiebreak` is always
/// appended so that pagination is stable.
#[derive(Debug, Clone, Copy)]
pub struct OrderingSpec {
    /// `(parameter name, SQL column)` pairs.
    pub allowed: &'static [(&'static str, &'static str)],
    pub default: &'static str,
    pub tiebreak: &'static str,
}

impl OrderingSpec {
    /// Build the body of an `ORDER BY` clause from a raw `ordering` parameter.
    ///
    /// The output only ever contains columns from the allow-list, so it is
    /// safe to interpolate into SQL.
    pub fn order_by(&self, raw: Option<&str>) -> String {
        let mut terms = raw.map(|r| self.parse(r)).unwrap_or_default();
        if terms.is_empty() {
            terms = self.parse(self.default);
        }
        terms.push(format!("{} ASC", self.tiebreak));
        terms.join(", ")
    }

    fn parse(&self, raw: &str) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::new();
        let mut terms = Vec::new();
        for field in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            let (name, direction) = match field.strip_prefix('-') {
                Some(name) => (name, "DESC"),
                None => (field, "ASC"),
            };
            let Some(column) = self.column_for(name) else {
                continue;
            };
            if seen.contains(&column) {
                continue;
            }
            seen.push(column);
            terms.push(format!("{column} {direction}"));
        }
        terms
    }

    fn column_for(&self, name: &str) -> Option<&'static str> {
        self.allowed
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, column)| *column)
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Turn a `?search=` value into an `ILIKE` substring pattern.
///
/// `\`, `%` and `_` are escaped so they match literally. Blank input yields
/// `None` (no search filter).
pub fn search_pattern(query: Option<&str>) -> Option<String> {
    let query = query?.trim();
    if query.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(query.len() + 2);
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Some(format!("%{escaped}%"))
}

/// Parse a comma-separated list of integers (`?status=1,2`).
///
/// Returns `None` for a missing or blank parameter and an error message
/// naming the offending item otherwise.
pub fn parse_id_list<T: std::str::FromStr>(raw: Option<&str>) -> Result<Option<Vec<T>>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let items: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return Ok(None);
    }
    items
        .into_iter()
        .map(|s| s.parse::<T>().map_err(|_| format!("'{s}' is not a valid number")))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const GOALS: OrderingSpec = OrderingSpec {
        allowed: &[
            ("due_date", "g.due_date"),
            ("priority", "g.priority"),
            ("title", "g.title"),
        ],
        default: "-priority,due_date",
        tiebreak: "g.id",
    };

    // -- clamp_limit / clamp_offset -----------------------------------------

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, DEFAULT_LIMIT, MAX_LIMIT), 50);
    }

    #[test]
    fn clamp_limit_respects_bounds() {
        assert_eq!(clamp_limit(Some(1000), DEFAULT_LIMIT, MAX_LIMIT), 200);
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIMIT, MAX_LIMIT), 1);
        assert_eq!(clamp_limit(Some(25), DEFAULT_LIMIT, MAX_LIMIT), 25);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(30)), 30);
    }

    // -- OrderingSpec --------------------------------------------------------

    #[test]
    fn default_ordering_when_param_missing() {
        assert_eq!(
            GOALS.order_by(None),
            "g.priority DESC, g.due_date ASC, g.id ASC"
        );
    }

    #[test]
    fn requested_ordering_replaces_default() {
        assert_eq!(GOALS.order_by(Some("-due_date")), "g.due_date DESC, g.id ASC");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        assert_eq!(
            GOALS.order_by(Some("password_hash,title")),
            "g.title ASC, g.id ASC"
        );
    }

    #[test]
    fn all_unknown_falls_back_to_default() {
        assert_eq!(
            GOALS.order_by(Some("id; DROP TABLE goals")),
            GOALS.order_by(None)
        );
    }

    #[test]
    fn duplicate_fields_keep_first_direction() {
        assert_eq!(
            GOALS.order_by(Some("title,-title")),
            "g.title ASC, g.id ASC"
        );
    }

    // -- search_pattern ------------------------------------------------------

    #[test]
    fn search_pattern_wraps_in_wildcards() {
        assert_eq!(search_pattern(Some("dish")), Some("%dish%".to_string()));
    }

    #[test]
    fn search_pattern_escapes_like_metacharacters() {
        assert_eq!(
            search_pattern(Some("100%_a\\b")),
            Some("%100\\%\\_a\\\\b%".to_string())
        );
    }

    #[test]
    fn blank_search_is_no_filter() {
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some("   ")), None);
    }

    // -- parse_id_list -------------------------------------------------------

    #[test]
    fn parse_id_list_accepts_comma_separated_values() {
        assert_eq!(parse_id_list::<i16>(Some("1, 2,3")), Ok(Some(vec![1, 2, 3])));
    }

    #[test]
    fn parse_id_list_treats_blank_as_absent() {
        assert_eq!(parse_id_list::<i64>(None), Ok(None));
        assert_eq!(parse_id_list::<i64>(Some(" , ")), Ok(None));
    }

    #[test]
    fn parse_id_list_rejects_garbage() {
        let err = parse_id_list::<i64>(Some("1,abc")).unwrap_err();
        assert!(err.contains("'abc'"));
    }
}
