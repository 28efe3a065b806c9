//! Fuzzy search over a loaded portal.

use xuetang::content::Course;
use xuetang::search::highlight;
use xuetang::{Portal, SearchConfig};

use crate::common::TestSite;

fn portal(site: &TestSite) -> Portal {
    Portal::load(site.repository(), SearchConfig::default()).unwrap()
}

#[test]
fn test_mesa_query_hits_every_collection() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let results = portal.search("Mesa");
    assert!(results.total_count >= 1);
    assert_eq!(results.courses[0].item.id, "mesa-abm");
    assert_eq!(results.resources[0].item.id, "mesa-docs");
    assert_eq!(results.learning_paths[0].item.id, "abm-track");
    assert_eq!(
        results.total_count,
        results.courses.len() + results.resources.len() + results.learning_paths.len()
    );
}

#[test]
fn test_blank_query_returns_nothing() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let results = portal.search("   ");
    assert_eq!(results.total_count, 0);
    assert!(results.is_empty());
}

#[test]
fn test_typo_tolerance() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let results = portal.search("trafic");
    let ids: Vec<&str> = results.courses.iter().map(|h| h.item.id.as_str()).collect();
    assert!(ids.contains(&"traffic-flow"));
}

#[test]
fn test_scores_are_ascending() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let results = portal.search("python");
    let scores: Vec<f64> = results.courses.iter().map(|h| h.score).collect();
    assert!(scores.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_matches_drive_highlighting() {
    let site = TestSite::sample();
    let portal = portal(&site);

    let results = portal.search("gis");
    let hit = results
        .courses
        .iter()
        .find(|h| h.item.id == "intro-gis")
        .unwrap();
    let title = hit.matches.iter().find(|m| m.key == "title").unwrap();

    let marked: Vec<&str> = highlight(&title.value, &title.ranges)
        .into_iter()
        .filter(|s| s.marked)
        .map(|s| s.text)
        .collect();
    assert_eq!(marked, vec!["GIS"]);
}

#[test]
fn test_limit_from_config() {
    let site = TestSite::sample();
    let mut config = site.config();
    config.search.limit = 1;
    let portal = Portal::open(&config).unwrap();

    let results = portal.search("modeling");
    assert_eq!(results.courses.len(), 1);

    let all: &[Course] = portal.courses();
    assert_eq!(all.len(), 3);
}
