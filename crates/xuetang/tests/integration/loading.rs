//! Loading a content tree from disk.

use xuetang::Error;
use xuetang::content::{CacheMode, ContentCache, LoadPolicy};

use crate::common::{TestSite, course_yaml};

#[test]
fn test_courses_load_newest_first() {
    let site = TestSite::sample();
    let courses = site.repository().load_courses().unwrap();
    let years: Vec<i32> = courses.iter().map(|c| c.year).collect();
    assert_eq!(years, vec![2025, 2024, 2023]);
}

#[test]
fn test_slash_date_fails_on_last_updated() {
    let site = TestSite::new();
    let body = course_yaml("bad-date", "Bad Date", 2024, "beginner", &["gis"], "Dates with slashes.")
        .replace("last_updated: 2024-03-01", "last_updated: 2024/01/01");
    site.course("bad-date", &body);

    let err = site.repository().load_courses().unwrap_err();
    assert!(err.is_validation());
    let violations = err.violations().unwrap();
    assert!(violations.touches("last_updated"));
    assert!(err.to_string().contains("bad-date.yaml"));
}

#[test]
fn test_yaml_syntax_error_is_distinct_from_validation() {
    let site = TestSite::new();
    site.course("broken", "id: broken\ntitle: [unclosed\n");

    let err = site.repository().load_courses().unwrap_err();
    assert!(err.is_yaml());
    assert!(!err.is_validation());
}

#[test]
fn test_skip_invalid_keeps_valid_files() {
    let site = TestSite::sample();
    site.course("zz-broken", "id: zz-broken\ntitle: Missing everything\n");

    assert!(site.repository().load_courses().is_err());

    let courses = site
        .repository()
        .with_policy(LoadPolicy::SkipInvalid)
        .load_courses()
        .unwrap();
    assert_eq!(courses.len(), 3);
}

#[test]
fn test_duplicate_course_ids() {
    let site = TestSite::sample();
    site.course(
        "zz-copy",
        &course_yaml("intro-gis", "Copy", 2022, "beginner", &["gis"], "A second copy of a course."),
    );

    let err = site.repository().load_courses().unwrap_err();
    assert!(matches!(err, Error::DuplicateId { .. }));

    let courses = site
        .repository()
        .with_policy(LoadPolicy::SkipInvalid)
        .load_courses()
        .unwrap();
    assert_eq!(courses.len(), 3);
    assert!(courses.iter().all(|c| c.title != "Copy"));
}

#[test]
fn test_repeated_loads_hit_the_cache() {
    let site = TestSite::sample();
    let repo = site.repository();

    repo.load_courses().unwrap();
    let misses = repo.cache().misses();
    repo.load_courses().unwrap();

    assert_eq!(repo.cache().misses(), misses);
    assert!(repo.cache().hits() >= 3);
}

#[test]
fn test_permanent_cache_shared_between_repositories() {
    let site = TestSite::sample();
    let cache = ContentCache::shared(CacheMode::Permanent);

    let first = site.repository().with_cache(cache.clone());
    first.load_resources().unwrap();
    let second = site.repository().with_cache(cache.clone());
    second.load_resources().unwrap();

    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.hits(), 2);
}

#[test]
fn test_load_course_by_id() {
    let site = TestSite::sample();
    let repo = site.repository();

    let course = repo.load_course("traffic-flow").unwrap().unwrap();
    assert_eq!(course.title, "Traffic Flow Analysis");
    assert!(repo.load_course("no-such-course").unwrap().is_none());
    assert!(repo.load_course("../site").unwrap().is_none());
}

#[test]
fn test_learning_paths_and_site_config() {
    let site = TestSite::sample();
    let repo = site.repository();

    let paths = repo.load_learning_paths().unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].steps.len(), 4);

    let config = repo.load_site_config().unwrap();
    assert_eq!(config.site.title, "Xuetang");
    assert_eq!(config.featured_courses, vec!["mesa-abm", "intro-gis"]);
}

#[test]
fn test_missing_site_config_is_an_error() {
    let site = TestSite::new();
    std::fs::remove_file(site.root().join("site.yaml")).unwrap();

    let err = site.repository().load_site_config().unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
