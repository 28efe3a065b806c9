//! The portal facade end to end.

use xuetang::content::{Course, ResourceKind};
use xuetang::{CONTENT_DIR_ENV, Portal, PortalConfig, SearchConfig, StepTarget};

use crate::common::{TestSite, course_yaml, site_yaml};

#[test]
fn test_open_from_config_file() {
    let site = TestSite::sample();
    let path = site.write("xuetang.toml", "[content]\nroot = \".\"\n\n[search]\nthreshold = 0.3\n");

    let config = PortalConfig::load(&path).unwrap();
    if std::env::var(CONTENT_DIR_ENV).is_ok() {
        return;
    }
    let portal = Portal::open(&config).unwrap();
    assert_eq!(portal.courses().len(), 3);
    assert_eq!(portal.search_config().threshold, 0.3);
}

#[test]
fn test_lookup_by_id() {
    let site = TestSite::sample();
    let portal = Portal::load(site.repository(), SearchConfig::default()).unwrap();

    assert_eq!(portal.course("intro-gis").unwrap().year, 2024);
    assert_eq!(portal.course("Intro GIS").unwrap().id, "intro-gis");
    assert!(portal.course("missing").is_none());
    assert_eq!(portal.resource("mesa-docs").unwrap().title, "Mesa Documentation");
    assert!(portal.learning_path("abm-track").is_some());
}

#[test]
fn test_lookups_share_id_matching() {
    let site = TestSite::sample();
    site.resource(
        "geopandas-guide",
        r#"id: GeoPandas_Guide
title: GeoPandas User Guide
type: tutorial
url: https://geopandas.org/en/stable/docs/user_guide.html
tags: [python, gis]
description: Working with spatial dataframes step by step.
language: en
"#,
    );
    let portal = Portal::load(site.repository(), SearchConfig::default()).unwrap();

    assert_eq!(portal.resource("Mesa Docs").unwrap().id, "mesa-docs");
    assert_eq!(portal.learning_path("ABM_Track").unwrap().id, "abm-track");
    assert_eq!(portal.resource("GeoPandas_Guide").unwrap().kind, ResourceKind::Tutorial);
    assert_eq!(portal.resource("geopandas guide").unwrap().id, "GeoPandas_Guide");
    assert!(portal.learning_path("abm").is_none());
}

#[test]
fn test_featured_courses_in_configured_order() {
    let site = TestSite::sample();
    site.write("site.yaml", &site_yaml(&["intro-gis", "retired-course", "mesa-abm"]));
    let portal = Portal::load(site.repository(), SearchConfig::default()).unwrap();

    let featured: Vec<&str> = portal
        .featured_courses()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(featured, vec!["intro-gis", "mesa-abm"]);

    let dangling = portal.check_references();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].id, "retired-course");
}

#[test]
fn test_resolve_learning_path() {
    let site = TestSite::sample();
    let portal = Portal::load(site.repository(), SearchConfig::default()).unwrap();

    let resolved = portal.resolve_learning_path("abm-track").unwrap();
    let orders: Vec<u32> = resolved.steps.iter().map(|s| s.step.order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4]);

    assert!(matches!(resolved.steps[0].target, StepTarget::Course(c) if c.id == "intro-gis"));
    assert!(matches!(resolved.steps[2].target, StepTarget::Resource(r) if r.id == "mesa-docs"));
    assert_eq!(resolved.steps[3].target, StepTarget::Practice);
    assert_eq!(resolved.missing(), 0);
    assert!(portal.resolve_learning_path("nope").is_none());
}

#[test]
fn test_dangling_step_is_missing() {
    let site = TestSite::sample();
    std::fs::remove_file(site.root().join("resources/mesa-docs.yaml")).unwrap();
    let portal = Portal::load(site.repository(), SearchConfig::default()).unwrap();

    let resolved = portal.resolve_learning_path("abm-track").unwrap();
    assert_eq!(resolved.steps[2].target, StepTarget::Missing);
    assert_eq!(resolved.missing(), 1);

    let dangling = portal.check_references();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].kind, "resource");
    assert_eq!(
        dangling[0].to_string(),
        "learning path 'abm-track' step 3 references unknown resource 'mesa-docs'"
    );
}

#[test]
fn test_reload_picks_up_changes() {
    let site = TestSite::sample();
    let mut portal = Portal::load(site.repository(), SearchConfig::default()).unwrap();
    assert_eq!(portal.courses().len(), 3);

    site.course(
        "urban-sensing",
        &course_yaml(
            "urban-sensing",
            "Urban Sensing",
            2026,
            "intermediate",
            &["sensors"],
            "Collecting street-level data with low-cost sensors.",
        ),
    );
    portal.reload().unwrap();

    let newest: &Course = &portal.courses()[0];
    assert_eq!(newest.id, "urban-sensing");
    assert_eq!(portal.courses().len(), 4);
}

#[test]
fn test_failed_reload_keeps_previous_state() {
    let site = TestSite::sample();
    let mut portal = Portal::load(site.repository(), SearchConfig::default()).unwrap();

    site.course("zz-broken", "id: zz-broken\n");
    assert!(portal.reload().is_err());
    assert_eq!(portal.courses().len(), 3);
}

#[test]
fn test_invalid_search_config_rejected() {
    let site = TestSite::sample();
    let config = SearchConfig {
        threshold: -1.0,
        ..SearchConfig::default()
    };
    assert!(Portal::load(site.repository(), config).is_err());
}
