//! Facet filtering and domain detection over loaded content.

use xuetang::content::{Difficulty, Language};
use xuetang::search::{Domain, detect_text};
use xuetang::{FacetSelection, Portal, SearchConfig};

use crate::common::TestSite;

fn portal(site: &TestSite) -> Portal {
    Portal::load(site.repository(), SearchConfig::default()).unwrap()
}

fn ids<T: AsRef<str>>(items: impl IntoIterator<Item = T>) -> Vec<String> {
    items.into_iter().map(|s| s.as_ref().to_string()).collect()
}

#[test]
fn test_beginner_filter_selects_one_of_three() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let out = portal.filter_courses(&FacetSelection::new().difficulty(Difficulty::Beginner));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "intro-gis");
}

#[test]
fn test_empty_selection_returns_everything_in_order() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let out = portal.filter_courses(&FacetSelection::new());
    assert_eq!(
        ids(out.iter().map(|c| &c.id)),
        ids(portal.courses().iter().map(|c| &c.id))
    );
}

#[test]
fn test_categories_combine() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let facets = FacetSelection::new()
        .difficulty(Difficulty::Beginner)
        .difficulty(Difficulty::Advanced)
        .year(2023);
    let out = portal.filter_courses(&facets);
    assert_eq!(ids(out.iter().map(|c| &c.id)), vec!["traffic-flow"]);
}

#[test]
fn test_domain_facet() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let out = portal.filter_courses(&FacetSelection::new().domain(Domain::Transportation));
    assert_eq!(ids(out.iter().map(|c| &c.id)), vec!["traffic-flow"]);

    let out = portal.filter_courses(&FacetSelection::new().domain(Domain::Computational));
    assert_eq!(ids(out.iter().map(|c| &c.id)), vec!["mesa-abm"]);
}

#[test]
fn test_resource_filters() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let out = portal.filter_resources(&FacetSelection::new().kind("dataset"));
    assert_eq!(ids(out.iter().map(|r| &r.id)), vec!["osm-data"]);

    // Resources without a difficulty never pass a difficulty facet.
    let out = portal.filter_resources(&FacetSelection::new().difficulty(Difficulty::Beginner));
    assert_eq!(ids(out.iter().map(|r| &r.id)), vec!["osm-data"]);

    // Resources have no year.
    assert!(portal.filter_resources(&FacetSelection::new().year(2024)).is_empty());
}

#[test]
fn test_available_filters() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let courses = portal.available_course_filters();
    assert_eq!(courses.years, vec!["2025", "2024", "2023"]);
    assert_eq!(courses.languages, vec![Language::En]);
    assert!(courses.tags.contains(&"交通".to_string()));
    assert!(courses.domains.contains(&Domain::Urban));

    let resources = portal.available_resource_filters();
    assert!(resources.years.is_empty());
    assert_eq!(resources.kinds, vec!["dataset", "docs"]);
}

#[test]
fn test_domain_keywords() {
    assert!(detect_text("City planning").contains(&Domain::Urban));
    assert!(detect_text("交通").contains(&Domain::Transportation));
    assert!(detect_text("1234 !!").is_empty());
}

#[test]
fn test_domains_of_course() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let course = portal.course("traffic-flow").unwrap();
    let domains = portal.domains_of(course);
    assert!(domains.contains(&Domain::Transportation));
}
