//! Content-tree fixtures for the integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use xuetang::PortalConfig;
use xuetang::content::{ContentConfig, ContentRepository, SchemaContext};

/// Year the fixtures are validated against.
pub const CURRENT_YEAR: i32 = 2026;

/// A content tree in a temporary directory.
pub struct TestSite {
    pub dir: TempDir,
}

impl TestSite {
    /// An empty tree with a site config and both collection directories.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::create_dir_all(dir.path().join("courses")).unwrap();
        fs::create_dir_all(dir.path().join("resources")).unwrap();
        let site = Self { dir };
        site.write("site.yaml", &site_yaml(&[]));
        site
    }

    /// The three-course catalog used across the suite.
    pub fn sample() -> Self {
        let site = Self::new();
        site.course(
            "mesa-abm",
            &course_yaml(
                "mesa-abm",
                "Agent-Based Modeling with Mesa",
                2025,
                "intermediate",
                &["mesa", "python", "simulation"],
                "Build agent-based simulation models of cities in Python.",
            ),
        );
        site.course(
            "intro-gis",
            &course_yaml(
                "intro-gis",
                "Introduction to GIS",
                2024,
                "beginner",
                &["gis", "mapping"],
                "Spatial data, projections, and city maps for newcomers.",
            ),
        );
        site.course(
            "traffic-flow",
            &course_yaml(
                "traffic-flow",
                "Traffic Flow Analysis",
                2023,
                "advanced",
                &["traffic", "交通"],
                "Modeling congestion on road networks.",
            ),
        );
        site.resource(
            "mesa-docs",
            r#"id: mesa-docs
title: Mesa Documentation
type: docs
url: https://mesa.readthedocs.io/
tags: [mesa, python]
description: Official reference for the Mesa framework.
language: en
"#,
        );
        site.resource(
            "osm-data",
            r#"id: osm-data
title: OpenStreetMap Extracts
type: dataset
url: https://download.geofabrik.de/
tags: [gis, data]
description: Regional street network extracts for urban analysis.
language: en
difficulty: beginner
"#,
        );
        site.write(
            "learning-paths.yaml",
            r#"paths:
  - id: abm-track
    title: Agent-Based Modeling Track
    description: From GIS basics to Mesa simulation models.
    audience: Graduate students
    duration: 8 weeks
    steps:
      - order: 2
        type: course
        course_id: mesa-abm
      - order: 1
        type: course
        course_id: intro-gis
      - order: 3
        type: resource
        resource_id: mesa-docs
        optional: true
      - order: 4
        type: practice
        note: Model a neighborhood.
"#,
        );
        site.write("site.yaml", &site_yaml(&["mesa-abm", "intro-gis"]));
        site
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, body: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::write(&path, body).unwrap();
        path
    }

    pub fn course(&self, stem: &str, body: &str) -> PathBuf {
        self.write(&format!("courses/{stem}.yaml"), body)
    }

    pub fn resource(&self, stem: &str, body: &str) -> PathBuf {
        self.write(&format!("resources/{stem}.yaml"), body)
    }

    pub fn repository(&self) -> ContentRepository {
        ContentRepository::new(ContentConfig::with_root(self.root()))
            .with_schema_context(SchemaContext::with_current_year(CURRENT_YEAR))
    }

    pub fn config(&self) -> PortalConfig {
        let mut config = PortalConfig::default();
        config.content = ContentConfig::with_root(self.root());
        config
    }
}

pub fn course_yaml(
    id: &str,
    title: &str,
    year: i32,
    difficulty: &str,
    tags: &[&str],
    summary: &str,
) -> String {
    format!(
        r#"id: {id}
title: {title}
type: course
year: {year}
difficulty: {difficulty}
tags: [{tags}]
instructors: [Zhang Wei]
language: en
summary: {summary}
sessions:
  - id: s1
    title: Getting started
    objectives: [Set up the environment]
    materials:
      slides: https://example.org/{id}/slides.pdf
last_updated: {year}-03-01
"#,
        tags = tags.join(", ")
    )
}

pub fn site_yaml(featured: &[&str]) -> String {
    format!(
        r#"site:
  title: Xuetang
  description: Courses in urban computing.
  url: https://xuetang.example.org
navigation:
  - label: Courses
    href: /courses
featured_courses: [{}]
announcements:
  - title: Spring term
    content: Registration is open.
    date: 2026-02-01
    type: info
"#,
        featured.join(", ")
    )
}
