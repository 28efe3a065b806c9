//! Closed vocabularies used by the content records.

use std::fmt;

/// A closed set of string values.
pub trait SchemaEnum: Sized + Copy + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// The serialized form.
    fn as_str(&self) -> &'static str;

    /// Parse the serialized form.
    fn parse(text: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == text)
    }

    /// Comma-separated list of accepted values.
    fn expected() -> String {
        Self::VARIANTS
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Error returned when a string is not one of an enumeration's values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// The rejected text.
    pub value: String,
    /// Accepted values.
    pub expected: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}', expected one of: {}", self.value, self.expected)
    }
}

impl std::error::Error for UnknownVariant {}

macro_rules! schema_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl SchemaEnum for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as SchemaEnum>::parse(s).ok_or_else(|| UnknownVariant {
                    value: s.to_string(),
                    expected: <Self as SchemaEnum>::expected(),
                })
            }
        }
    };
}

schema_enum! {
    /// Format of a course offering.
    CourseKind {
        Course => "course",
        Workshop => "workshop",
        ReadingGroup => "reading_group",
    }
}

schema_enum! {
    /// Expected prior knowledge.
    Difficulty {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

schema_enum! {
    /// Teaching language.
    Language {
        /// Chinese.
        Zh => "zh",
        /// English.
        En => "en",
    }
}

schema_enum! {
    /// Kind of a session reading.
    ReferenceKind {
        Paper => "paper",
        Book => "book",
        Tutorial => "tutorial",
        Docs => "docs",
    }
}

schema_enum! {
    /// What a learning-path step points at.
    StepKind {
        Course => "course",
        Resource => "resource",
        Practice => "practice",
    }
}

schema_enum! {
    /// Kind of an external resource.
    ResourceKind {
        Docs => "docs",
        Tutorial => "tutorial",
        Paper => "paper",
        Book => "book",
        Dataset => "dataset",
        Tool => "tool",
    }
}

schema_enum! {
    /// Kind of a site announcement.
    AnnouncementKind {
        Info => "info",
        Event => "event",
        Update => "update",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!(CourseKind::parse("reading_group"), Some(CourseKind::ReadingGroup));
        assert_eq!(CourseKind::ReadingGroup.to_string(), "reading_group");
        assert_eq!(Difficulty::parse("Beginner"), None);
    }

    #[test]
    fn test_from_str_error_lists_values() {
        let err = "zh-cn".parse::<Language>().unwrap_err();
        assert_eq!(err.to_string(), "unknown value 'zh-cn', expected one of: zh, en");
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let yaml = serde_yaml::to_string(&ResourceKind::Dataset).unwrap();
        assert_eq!(yaml.trim(), "dataset");
        let back: ResourceKind = serde_yaml::from_str("tool").unwrap();
        assert_eq!(back, ResourceKind::Tool);
    }

    #[test]
    fn test_variants_are_complete() {
        assert_eq!(ResourceKind::VARIANTS.len(), 6);
        assert_eq!(StepKind::expected(), "course, resource, practice");
    }
}
