//! Release-year normalization for OMDb `Year` values.

/// Separator OMDb uses for year ranges, e.g. `1999–2004`.
pub const RANGE_SEPARATOR: char = '–';

/// Normalize a raw OMDb year.
///
/// An open range such as `"1999–"` collapses to `"1999"`, a closed range keeps
/// both ends, anything else is returned as is.
#[must_use]
pub fn normalize_year(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return String::new();
    };

    match raw.split_once(RANGE_SEPARATOR) {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            if end.is_empty() {
                start.to_string()
            } else {
                format!("{start}{RANGE_SEPARATOR}{end}")
            }
        }
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_range_keeps_start() {
        assert_eq!(normalize_year(Some("1999–")), "1999");
    }

    #[test]
    fn closed_range_is_kept() {
        assert_eq!(normalize_year(Some("1999–2004")), "1999–2004");
    }

    #[test]
    fn range_parts_are_trimmed() {
        assert_eq!(normalize_year(Some(" 1999 – 2004 ")), "1999–2004");
        assert_eq!(normalize_year(Some("2010 – ")), "2010");
    }

    #[test]
    fn single_year_passes_through() {
        assert_eq!(normalize_year(Some("1999")), "1999");
    }

    #[test]
    fn empty_or_absent_is_empty() {
        assert_eq!(normalize_year(Some("")), "");
        assert_eq!(normalize_year(None), "");
    }

    #[test]
    fn hyphen_is_not_a_range_separator() {
        assert_eq!(normalize_year(Some("1999-2004")), "1999-2004");
    }
}
