//! Site-wide configuration: metadata, navigation, featured courses, and
//! announcements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use url::Url;

use super::{AnnouncementKind, Checker, FieldPath, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteMeta,
    #[serde(default)]
    pub navigation: Vec<NavItem>,
    /// Course ids shown on the home page, in display order.
    #[serde(default)]
    pub featured_courses: Vec<String>,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub url: Url,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: Url,
}

/// A navigation entry; may nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    /// Site-relative or absolute target.
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: AnnouncementKind,
}

impl Schema for SiteConfig {
    const KIND: &'static str = "site config";

    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self> {
        let obj = ck.object(value, path)?;
        let site = match ck.optional_object(&obj, "site") {
            Some(Some(site)) => SiteMeta::check(&site, ck),
            Some(None) => {
                ck.fail(&path.key("site"), "is required");
                None
            }
            None => None,
        };
        let navigation = ck.list(&obj, "navigation", 0).map(|items| {
            items
                .into_iter()
                .map(|(p, v)| NavItem::check(v, &p, ck))
                .collect::<Vec<_>>()
        });
        let featured_courses = ck.string_list(&obj, "featured_courses", 0);
        let announcements = ck.list(&obj, "announcements", 0).map(|items| {
            items
                .into_iter()
                .map(|(p, v)| Announcement::check(v, &p, ck))
                .collect::<Vec<_>>()
        });

        Some(SiteConfig {
            site: site?,
            navigation: navigation?.into_iter().collect::<Option<Vec<_>>>()?,
            featured_courses: featured_courses?,
            announcements: announcements?.into_iter().collect::<Option<Vec<_>>>()?,
        })
    }
}

impl SiteMeta {
    fn check(obj: &super::Obj<'_>, ck: &mut Checker) -> Option<Self> {
        let title = ck.string(obj, "title", 1);
        let description = ck.string(obj, "description", 1);
        let url = ck.url(obj, "url");
        let social = ck.list(obj, "social", 0).map(|items| {
            items
                .into_iter()
                .map(|(p, v)| {
                    let link = ck.object(v, &p)?;
                    let name = ck.string(&link, "name", 1);
                    let url = ck.url(&link, "url");
                    Some(SocialLink {
                        name: name?,
                        url: url?,
                    })
                })
                .collect::<Vec<_>>()
        });

        Some(SiteMeta {
            title: title?,
            description: description?,
            url: url?,
            social: social?.into_iter().collect::<Option<Vec<_>>>()?,
        })
    }
}

impl NavItem {
    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self> {
        let obj = ck.object(value, path)?;
        let label = ck.string(&obj, "label", 1);
        let href = ck.string(&obj, "href", 1);
        let children = ck.list(&obj, "children", 0).map(|items| {
            items
                .into_iter()
                .map(|(p, v)| NavItem::check(v, &p, ck))
                .collect::<Vec<_>>()
        });

        Some(NavItem {
            label: label?,
            href: href?,
            children: children?.into_iter().collect::<Option<Vec<_>>>()?,
        })
    }
}

impl Announcement {
    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self> {
        let obj = ck.object(value, path)?;
        let title = ck.string(&obj, "title", 1);
        let content = ck.string(&obj, "content", 1);
        let date = ck.date(&obj, "date");
        let kind = ck.choice(&obj, "type");

        Some(Announcement {
            title: title?,
            content: content?,
            date: date?,
            kind: kind?,
        })
    }
}
