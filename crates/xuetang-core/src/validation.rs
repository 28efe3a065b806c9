//! Field-level validation reports.
//!
//! Schema validators never stop at the first problem: they walk the whole
//! record and collect one [`Violation`] per broken constraint. The report is
//! rendered as `path: message` entries joined by `; `.

use std::fmt;

use serde::Serialize;

/// A single broken constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted field path, with `[n]` for sequence indices (e.g.
    /// `sessions[0].materials.slides`). Empty for the record root.
    pub path: String,
    /// What the constraint requires.
    pub message: String,
}

impl Violation {
    /// Create a violation for the given field path.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every violation found while validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns `true` if no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Iterate over the violations in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// The violations as a slice.
    pub fn as_slice(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns `true` if any violation concerns `path` or one of its children.
    ///
    /// ```
    /// use xuetang_core::{ValidationErrors, Violation};
    ///
    /// let mut errors = ValidationErrors::new();
    /// errors.push(Violation::new("sessions[1].title", "is required"));
    /// assert!(errors.touches("sessions[1]"));
    /// assert!(errors.touches("sessions[1].title"));
    /// assert!(!errors.touches("sessions[0]"));
    /// ```
    pub fn touches(&self, path: &str) -> bool {
        self.violations.iter().any(|v| {
            v.path == path
                || v
                    .path
                    .strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl FromIterator<Violation> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let v = Violation::new("links.course_page", "must be an absolute URL");
        assert_eq!(v.to_string(), "links.course_page: must be an absolute URL");
    }

    #[test]
    fn test_root_violation_display() {
        let v = Violation::new("", "must be a mapping");
        assert_eq!(v.to_string(), "(root): must be a mapping");
    }

    #[test]
    fn test_report_joins_entries() {
        let errors: ValidationErrors = vec![
            Violation::new("id", "is required"),
            Violation::new("year", "must be between 2000 and 2031"),
        ]
        .into_iter()
        .collect();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "id: is required; year: must be between 2000 and 2031"
        );
    }

    #[test]
    fn test_touches_does_not_match_sibling_prefix() {
        let mut errors = ValidationErrors::new();
        errors.push(Violation::new("tags_extra", "is required"));
        assert!(!errors.touches("tags"));
    }

    #[test]
    fn test_serializes_as_list() {
        let mut errors = ValidationErrors::new();
        errors.push(Violation::new("id", "is required"));
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"[{"path":"id","message":"is required"}]"#);
    }
}
