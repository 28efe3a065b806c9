//! Field walker used by the schema validators.
//!
//! A [`Checker`] walks an untyped YAML tree and records a [`Violation`] for
//! every constraint that fails. Each accessor returns `None` when the field is
//! invalid (after recording why), so a validator can evaluate all of its
//! fields first and only then combine the results with `?`.
//!
//! Optional accessors return `Option<Option<T>>`: `Some(None)` means the field
//! is absent (or `null`), `None` means it is present but invalid.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use url::Url;
use xuetang_core::{ValidationErrors, Violation, is_kebab_case};

use super::{SchemaContext, SchemaEnum};

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles"));

/// Dotted path of a field inside a record, e.g. `sessions[2].objectives[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    /// The record root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a mapping key below this one.
    pub fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }

    /// Path of a sequence element below this one.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A YAML mapping together with its location in the record.
#[derive(Debug, Clone)]
pub struct Obj<'v> {
    map: &'v Mapping,
    path: FieldPath,
}

impl<'v> Obj<'v> {
    /// Location of this mapping.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// A present, non-null value under `key`.
    fn get(&self, key: &str) -> Option<&'v Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// Returns `true` when `key` holds a non-null value.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Collects violations while a validator walks a record.
#[derive(Debug)]
pub struct Checker {
    context: SchemaContext,
    errors: ValidationErrors,
}

impl Checker {
    /// Create a checker for the given validation context.
    pub fn new(context: SchemaContext) -> Self {
        Self {
            context,
            errors: ValidationErrors::new(),
        }
    }

    /// The validation context (reference year).
    pub fn context(&self) -> &SchemaContext {
        &self.context
    }

    /// Record a violation.
    pub fn fail(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.errors.push(Violation::new(path.as_str(), message));
    }

    /// Turn the walk result into the validator outcome.
    ///
    /// Any recorded violation makes the whole record invalid, even if a value
    /// was produced.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            Some(_) => Err(self.errors),
            None => {
                let mut errors = self.errors;
                if errors.is_empty() {
                    errors.push(Violation::new("", "could not be validated"));
                }
                Err(errors)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------------

    /// Expect a mapping at `path`.
    pub fn object<'v>(&mut self, value: &'v Value, path: &FieldPath) -> Option<Obj<'v>> {
        match value.as_mapping() {
            Some(map) => Some(Obj {
                map,
                path: path.clone(),
            }),
            None => {
                self.fail(path, "must be a mapping");
                None
            }
        }
    }

    /// Expect an optional mapping under `key`.
    pub fn optional_object<'v>(&mut self, obj: &Obj<'v>, key: &str) -> Option<Option<Obj<'v>>> {
        match obj.get(key) {
            None => Some(None),
            Some(value) => self.object(value, &obj.path.key(key)).map(Some),
        }
    }

    /// Expect a list of at least `min_items` elements under `key`.
    ///
    /// With `min_items == 0` an absent key is an empty list. Elements are
    /// returned with their paths for the caller to validate.
    pub fn list<'v>(
        &mut self,
        obj: &Obj<'v>,
        key: &str,
        min_items: usize,
    ) -> Option<Vec<(FieldPath, &'v Value)>> {
        let path = obj.path.key(key);
        let Some(value) = obj.get(key) else {
            if min_items == 0 {
                return Some(Vec::new());
            }
            self.fail(&path, "is required");
            return None;
        };
        let Some(items) = value.as_sequence() else {
            self.fail(&path, "must be a list");
            return None;
        };
        if items.len() < min_items {
            self.fail(&path, format!("must contain at least {min_items} item(s)"));
            return None;
        }
        Some(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| (path.index(i), item))
                .collect(),
        )
    }

    // ------------------------------------------------------------------------
    // Scalars
    // ------------------------------------------------------------------------

    fn required<'v>(&mut self, obj: &Obj<'v>, key: &str) -> Option<&'v Value> {
        let value = obj.get(key);
        if value.is_none() {
            self.fail(&obj.path.key(key), "is required");
        }
        value
    }

    fn text_value(&mut self, value: &Value, path: &FieldPath, min_chars: usize) -> Option<String> {
        let Some(text) = value.as_str() else {
            self.fail(path, "must be a string");
            return None;
        };
        if text.chars().count() < min_chars {
            if min_chars == 1 {
                self.fail(path, "must not be empty");
            } else {
                self.fail(path, format!("must be at least {min_chars} characters"));
            }
            return None;
        }
        Some(text.to_string())
    }

    fn url_value(&mut self, value: &Value, path: &FieldPath) -> Option<Url> {
        let Some(text) = value.as_str() else {
            self.fail(path, "must be a string");
            return None;
        };
        match Url::parse(text) {
            Ok(url) => Some(url),
            Err(e) => {
                self.fail(path, format!("must be an absolute URL ({e})"));
                None
            }
        }
    }

    /// A string of at least `min_chars` characters.
    pub fn string(&mut self, obj: &Obj<'_>, key: &str, min_chars: usize) -> Option<String> {
        let value = self.required(obj, key)?;
        self.text_value(value, &obj.path.key(key), min_chars)
    }

    /// An optional string; absent means `None`.
    pub fn optional_string(&mut self, obj: &Obj<'_>, key: &str) -> Option<Option<String>> {
        match obj.get(key) {
            None => Some(None),
            Some(value) => self.text_value(value, &obj.path.key(key), 0).map(Some),
        }
    }

    /// A lowercase kebab-case identifier.
    pub fn kebab_id(&mut self, obj: &Obj<'_>, key: &str) -> Option<String> {
        let id = self.string(obj, key, 1)?;
        if !is_kebab_case(&id) {
            self.fail(&obj.path.key(key), "must be lowercase kebab-case");
            return None;
        }
        Some(id)
    }

    /// An integer within `range`.
    pub fn integer(&mut self, obj: &Obj<'_>, key: &str, range: RangeInclusive<i64>) -> Option<i64> {
        let value = self.required(obj, key)?;
        let path = obj.path.key(key);
        let Some(number) = value.as_i64() else {
            self.fail(&path, "must be an integer");
            return None;
        };
        if !range.contains(&number) {
            self.fail(
                &path,
                format!("must be between {} and {}", range.start(), range.end()),
            );
            return None;
        }
        Some(number)
    }

    /// A boolean flag; absent means `false`.
    pub fn flag(&mut self, obj: &Obj<'_>, key: &str) -> Option<bool> {
        match obj.get(key) {
            None => Some(false),
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                self.fail(&obj.path.key(key), "must be a boolean");
                None
            }
        }
    }

    /// One of the values of a closed enumeration.
    pub fn choice<E: SchemaEnum>(&mut self, obj: &Obj<'_>, key: &str) -> Option<E> {
        let value = self.required(obj, key)?;
        self.choice_value(value, &obj.path.key(key))
    }

    /// An optional closed-enumeration value.
    pub fn optional_choice<E: SchemaEnum>(&mut self, obj: &Obj<'_>, key: &str) -> Option<Option<E>> {
        match obj.get(key) {
            None => Some(None),
            Some(value) => self.choice_value(value, &obj.path.key(key)).map(Some),
        }
    }

    fn choice_value<E: SchemaEnum>(&mut self, value: &Value, path: &FieldPath) -> Option<E> {
        let parsed = value.as_str().and_then(E::parse);
        if parsed.is_none() {
            self.fail(path, format!("must be one of: {}", E::expected()));
        }
        parsed
    }

    /// An absolute URL.
    pub fn url(&mut self, obj: &Obj<'_>, key: &str) -> Option<Url> {
        let value = self.required(obj, key)?;
        self.url_value(value, &obj.path.key(key))
    }

    /// An optional absolute URL.
    pub fn optional_url(&mut self, obj: &Obj<'_>, key: &str) -> Option<Option<Url>> {
        match obj.get(key) {
            None => Some(None),
            Some(value) => self.url_value(value, &obj.path.key(key)).map(Some),
        }
    }

    /// A calendar date written strictly as `YYYY-MM-DD`.
    pub fn date(&mut self, obj: &Obj<'_>, key: &str) -> Option<NaiveDate> {
        let value = self.required(obj, key)?;
        let path = obj.path.key(key);
        let Some(text) = value.as_str().filter(|t| DATE_PATTERN.is_match(t)) else {
            self.fail(&path, "must be a date in YYYY-MM-DD format");
            return None;
        };
        match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.fail(&path, "is not a valid calendar date");
                None
            }
        }
    }

    /// A list of at least `min_items` non-empty strings.
    pub fn string_list(&mut self, obj: &Obj<'_>, key: &str, min_items: usize) -> Option<Vec<String>> {
        let items = self.list(obj, key, min_items)?;
        let checked: Vec<Option<String>> = items
            .into_iter()
            .map(|(path, value)| self.text_value(value, &path, 1))
            .collect();
        checked.into_iter().collect()
    }
}
