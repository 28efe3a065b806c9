//! Learning paths: ordered sequences of courses, resources, and practice.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::{Checker, FieldPath, Schema, StepKind};

/// A curated sequence of steps for an audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    pub id: String,
    pub title: String,
    /// At least ten characters.
    pub description: String,
    pub audience: String,
    /// Free-form duration label, e.g. "6 weeks".
    pub duration: String,
    pub steps: Vec<LearningStep>,
}

/// One step of a learning path.
///
/// `course_id` is set exactly when `kind` is [`StepKind::Course`], and
/// `resource_id` exactly when it is [`StepKind::Resource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningStep {
    pub order: u32,
    #[serde(rename = "type")]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(default)]
    pub optional: bool,
}

/// The learning-paths file: a top-level `paths` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPathCatalog {
    pub paths: Vec<LearningPath>,
}

impl Schema for LearningPathCatalog {
    const KIND: &'static str = "learning paths";

    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self> {
        let obj = ck.object(value, path)?;
        let paths = ck.list(&obj, "paths", 0).map(|items| {
            items
                .into_iter()
                .map(|(p, v)| LearningPath::check(v, &p, ck))
                .collect::<Vec<_>>()
        })?;

        let mut seen = HashSet::new();
        for (i, lp) in paths.iter().enumerate() {
            if let Some(lp) = lp
                && !seen.insert(lp.id.as_str())
            {
                ck.fail(
                    &path.key("paths").index(i).key("id"),
                    format!("duplicate learning path id '{}'", lp.id),
                );
            }
        }

        Some(LearningPathCatalog {
            paths: paths.into_iter().collect::<Option<Vec<_>>>()?,
        })
    }
}

impl Schema for LearningPath {
    const KIND: &'static str = "learning path";

    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self> {
        let obj = ck.object(value, path)?;
        let id = ck.string(&obj, "id", 1);
        let title = ck.string(&obj, "title", 1);
        let description = ck.string(&obj, "description", 10);
        let audience = ck.string(&obj, "audience", 1);
        let duration = ck.string(&obj, "duration", 1);
        let steps = ck.list(&obj, "steps", 1).map(|items| {
            items
                .into_iter()
                .map(|(p, v)| LearningStep::check(v, &p, ck))
                .collect::<Vec<_>>()
        });

        Some(LearningPath {
            id: id?,
            title: title?,
            description: description?,
            audience: audience?,
            duration: duration?,
            steps: steps?.into_iter().collect::<Option<Vec<_>>>()?,
        })
    }
}

impl LearningStep {
    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self> {
        let obj = ck.object(value, path)?;
        let order = ck.integer(&obj, "order", 1..=i64::from(u32::MAX));
        let kind: Option<StepKind> = ck.choice(&obj, "type");
        let course_id = ck.optional_string(&obj, "course_id");
        let resource_id = ck.optional_string(&obj, "resource_id");
        let note = ck.optional_string(&obj, "note");
        let optional = ck.flag(&obj, "optional");

        if let Some(kind) = kind {
            for (key, owner) in [("course_id", StepKind::Course), ("resource_id", StepKind::Resource)] {
                let present = obj.has(key);
                if kind == owner && !present {
                    ck.fail(&path.key(key), format!("is required when type is {kind}"));
                } else if kind != owner && present {
                    ck.fail(&path.key(key), format!("must not be set when type is {kind}"));
                }
            }
        }

        Some(LearningStep {
            order: u32::try_from(order?).ok()?,
            kind: kind?,
            course_id: course_id?,
            resource_id: resource_id?,
            note: note?.unwrap_or_default(),
            optional: optional?,
        })
    }
}

impl LearningPath {
    /// Steps sorted by their `order` field.
    pub fn ordered_steps(&self) -> Vec<&LearningStep> {
        let mut steps: Vec<&LearningStep> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.order);
        steps
    }
}
