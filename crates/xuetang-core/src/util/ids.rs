//! Identifier utilities.
//!
//! Course identifiers are kebab-case and double as file stems under the
//! courses directory. The schema validators and the repository share these
//! rules when mapping an id to a file.

/// Normalize an identifier to lowercase kebab-case.
///
/// Performs the following transformations:
/// 1. Trims leading/trailing whitespace
/// 2. Converts to lowercase
/// 3. Replaces underscores with hyphens
/// 4. Collapses multiple whitespace into single hyphens
///
/// # Examples
///
/// ```
/// use xuetang_core::util::ids::normalize_id;
///
/// assert_eq!(normalize_id("Urban Computing"), "urban-computing");
/// assert_eq!(normalize_id("spatial_stats"), "spatial-stats");
/// assert_eq!(normalize_id("  Mixed   Case  "), "mixed-case");
/// ```
pub fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Check that an identifier is lowercase kebab-case.
///
/// Accepts ASCII lowercase letters and digits in segments separated by single
/// hyphens. Such an id is always safe to use as a file stem.
///
/// # Examples
///
/// ```
/// use xuetang_core::util::ids::is_kebab_case;
///
/// assert!(is_kebab_case("python-for-urban-data-2024"));
/// assert!(!is_kebab_case("Python"));
/// assert!(!is_kebab_case("../secrets"));
/// ```
pub fn is_kebab_case(id: &str) -> bool {
    !id.is_empty()
        && id
            .split('-')
            .all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // normalize_id tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_normalize_id_with_underscores() {
        assert_eq!(normalize_id("reading_group"), "reading-group");
    }

    #[test]
    fn test_normalize_id_already_normalized() {
        assert_eq!(normalize_id("gis-basics"), "gis-basics");
    }

    #[test]
    fn test_normalize_id_empty() {
        assert_eq!(normalize_id(""), "");
        assert_eq!(normalize_id("   "), "");
    }

    #[test]
    fn test_normalize_id_mixed_separators() {
        assert_eq!(normalize_id("foo_bar baz"), "foo-bar-baz");
    }

    // -------------------------------------------------------------------------
    // is_kebab_case tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_kebab_case_accepts_digits() {
        assert!(is_kebab_case("gis101"));
        assert!(is_kebab_case("2024-spring-seminar"));
    }

    #[test]
    fn test_kebab_case_rejects_bad_hyphens() {
        assert!(!is_kebab_case("-leading"));
        assert!(!is_kebab_case("trailing-"));
        assert!(!is_kebab_case("double--hyphen"));
        assert!(!is_kebab_case(""));
    }

    #[test]
    fn test_kebab_case_rejects_other_characters() {
        assert!(!is_kebab_case("snake_case"));
        assert!(!is_kebab_case("with space"));
        assert!(!is_kebab_case("城市"));
        assert!(!is_kebab_case("a/b"));
    }
}
