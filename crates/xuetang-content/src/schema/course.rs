//! Course records.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use url::Url;

use super::{Checker, CourseKind, Difficulty, FieldPath, Language, ReferenceKind, Schema};

/// Earliest accepted course year.
pub const MIN_COURSE_YEAR: i64 = 2000;

/// How many years past the current one a course may be scheduled.
pub const MAX_YEARS_AHEAD: i64 = 5;

/// A teaching offering: a course, workshop, or reading group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Lowercase kebab-case identifier; the canonical file stem.
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: CourseKind,
    pub year: i32,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub instructors: Vec<String>,
    pub language: Language,
    /// At least ten characters.
    pub summary: String,
    pub sessions: Vec<Session>,
    #[serde(default, skip_serializing_if = "CourseLinks::is_empty")]
    pub links: CourseLinks,
    pub last_updated: NaiveDate,
}

/// One meeting of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique within the course only.
    pub id: String,
    pub title: String,
    pub objectives: Vec<String>,
    #[serde(default, skip_serializing_if = "Materials::is_empty")]
    pub materials: Materials,
}

/// Teaching materials attached to a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Materials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording: Option<Url>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
}

impl Materials {
    /// Returns `true` when no material is attached.
    pub fn is_empty(&self) -> bool {
        self.slides.is_none()
            && self.code.is_none()
            && self.recording.is_none()
            && self.references.is_empty()
    }
}

/// A reading attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: Url,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ReferenceKind>,
}

/// Optional course-level links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_page: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials_repo: Option<Url>,
}

impl CourseLinks {
    /// Returns `true` when neither link is set.
    pub fn is_empty(&self) -> bool {
        self.course_page.is_none() && self.materials_repo.is_none()
    }
}

impl Schema for Course {
    const KIND: &'static str = "course";

    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self> {
        let obj = ck.object(value, path)?;
        let max_year = i64::from(ck.context().current_year) + MAX_YEARS_AHEAD;

        let id = ck.kebab_id(&obj, "id");
        let title = ck.string(&obj, "title", 1);
        let kind = ck.choice(&obj, "type");
        let year = ck.integer(&obj, "year", MIN_COURSE_YEAR..=max_year);
        let difficulty = ck.choice(&obj, "difficulty");
        let tags = ck.string_list(&obj, "tags", 1);
        let instructors = ck.string_list(&obj, "instructors", 1);
        let language = ck.choice(&obj, "language");
        let summary = ck.string(&obj, "summary", 10);
        let sessions = ck.list(&obj, "sessions", 1).map(|items| {
            items
                .into_iter()
                .map(|(p, v)| Session::check(v, &p, ck))
                .collect::<Vec<_>>()
        });
        let links = ck
            .optional_object(&obj, "links")
            .and_then(|links| match links {
                None => Some(CourseLinks::default()),
                Some(links) => {
                    let course_page = ck.optional_url(&links, "course_page");
                    let materials_repo = ck.optional_url(&links, "materials_repo");
                    Some(CourseLinks {
                        course_page: course_page?,
                        materials_repo: materials_repo?,
                    })
                }
            });
        let last_updated = ck.date(&obj, "last_updated");

        if let Some(sessions) = &sessions {
            let mut seen = HashSet::new();
            for (i, session) in sessions.iter().enumerate() {
                if let Some(session) = session
                    && !seen.insert(session.id.as_str())
                {
                    ck.fail(
                        &path.key("sessions").index(i).key("id"),
                        format!("duplicate session id '{}'", session.id),
                    );
                }
            }
        }

        Some(Course {
            id: id?,
            title: title?,
            kind: kind?,
            year: i32::try_from(year?).ok()?,
            difficulty: difficulty?,
            tags: tags?,
            instructors: instructors?,
            language: language?,
            summary: summary?,
            sessions: sessions?.into_iter().collect::<Option<Vec<_>>>()?,
            links: links?,
            last_updated: last_updated?,
        })
    }
}

impl Session {
    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self> {
        let obj = ck.object(value, path)?;
        let id = ck.string(&obj, "id", 1);
        let title = ck.string(&obj, "title", 1);
        let objectives = ck.string_list(&obj, "objectives", 1);
        let materials = ck
            .optional_object(&obj, "materials")
            .and_then(|materials| match materials {
                None => Some(Materials::default()),
                Some(materials) => Materials::check(&materials, ck),
            });

        Some(Session {
            id: id?,
            title: title?,
            objectives: objectives?,
            materials: materials?,
        })
    }
}

impl Materials {
    fn check(obj: &super::Obj<'_>, ck: &mut Checker) -> Option<Self> {
        let slides = ck.optional_url(obj, "slides");
        let code = ck.optional_url(obj, "code");
        let recording = ck.optional_url(obj, "recording");
        let references = ck.list(obj, "references", 0).map(|items| {
            items
                .into_iter()
                .map(|(p, v)| Reference::check(v, &p, ck))
                .collect::<Vec<_>>()
        });

        Some(Materials {
            slides: slides?,
            code: code?,
            recording: recording?,
            references: references?.into_iter().collect::<Option<Vec<_>>>()?,
        })
    }
}

impl Reference {
    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self> {
        let obj = ck.object(value, path)?;
        let title = ck.string(&obj, "title", 1);
        let url = ck.url(&obj, "url");
        let kind = ck.optional_choice(&obj, "type");

        Some(Reference {
            title: title?,
            url: url?,
            kind: kind?,
        })
    }
}
