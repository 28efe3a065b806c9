//! External learning resources.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use url::Url;

use super::{Checker, Difficulty, FieldPath, Language, ResourceKind, Schema};

/// A documentation site, tutorial, paper, book, dataset, or tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub url: Url,
    pub tags: Vec<String>,
    /// At least ten characters.
    pub description: String,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl Schema for Resource {
    const KIND: &'static str = "resource";

    fn check(value: &Value, path: &FieldPath, ck: &mut Checker) -> Option<Self> {
        let obj = ck.object(value, path)?;
        let id = ck.string(&obj, "id", 1);
        let title = ck.string(&obj, "title", 1);
        let kind = ck.choice(&obj, "type");
        let url = ck.url(&obj, "url");
        let tags = ck.string_list(&obj, "tags", 1);
        let description = ck.string(&obj, "description", 10);
        let language = ck.choice(&obj, "language");
        let difficulty = ck.optional_choice(&obj, "difficulty");

        Some(Resource {
            id: id?,
            title: title?,
            kind: kind?,
            url: url?,
            tags: tags?,
            description: description?,
            language: language?,
            difficulty: difficulty?,
        })
    }
}
