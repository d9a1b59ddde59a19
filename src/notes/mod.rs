//! Notes REST API
//!
//! Wire types for the notes service plus the client-side validation that
//! mirrors the server's schema, so obviously bad input never leaves the
//! process.

pub mod client;

use crate::error::{NotesError, NotesResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use client::NotesClient;

pub const TITLE_MAX_CHARS: usize = 120;
pub const CONTENT_MAX_CHARS: usize = 10_000;
pub const MAX_TAGS: usize = 10;
pub const TAG_MAX_CHARS: usize = 50;
pub const PER_PAGE_MAX: u32 = 100;
pub const DEFAULT_PER_PAGE: u32 = 10;

/// A stored note as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// The notes service emits naive UTC timestamps; accept those as well as RFC 3339.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Body of `POST /notes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub archived: bool,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: vec![],
            archived: false,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Trim fields and check the server's limits
    pub fn validated(self) -> NotesResult<Self> {
        Ok(Self {
            title: validate_text("title", &self.title, TITLE_MAX_CHARS)?,
            content: validate_text("content", &self.content, CONTENT_MAX_CHARS)?,
            tags: validate_tags(self.tags)?,
            archived: self.archived,
        })
    }
}

/// Body of `PUT /notes/{id}`; unset fields are left untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none() && self.archived.is_none()
    }

    pub fn validated(self) -> NotesResult<Self> {
        if self.is_empty() {
            return Err(NotesError::Validation("update has no fields set".to_string()));
        }
        Ok(Self {
            title: self
                .title
                .map(|t| validate_text("title", &t, TITLE_MAX_CHARS))
                .transpose()?,
            content: self
                .content
                .map(|c| validate_text("content", &c, CONTENT_MAX_CHARS))
                .transpose()?,
            tags: self.tags.map(validate_tags).transpose()?,
            archived: self.archived,
        })
    }
}

/// Query parameters for `GET /notes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNotesParams {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub archived: Option<bool>,
}

impl Default for ListNotesParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            search: None,
            archived: None,
        }
    }
}

impl ListNotesParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn validate(&self) -> NotesResult<()> {
        if self.page < 1 {
            return Err(NotesError::Validation("page must be at least 1".to_string()));
        }
        if self.per_page < 1 || self.per_page > PER_PAGE_MAX {
            return Err(NotesError::Validation(format!(
                "per_page must be between 1 and {}",
                PER_PAGE_MAX
            )));
        }
        Ok(())
    }

    /// Pairs for the query string; blank search is omitted
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(archived) = self.archived {
            pairs.push(("archived", archived.to_string()));
        }
        pairs
    }
}

/// Split a comma-separated tag string, dropping blanks
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_text(field: &str, value: &str, max: usize) -> NotesResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NotesError::Validation(format!("{} is required", field)));
    }
    let len = trimmed.chars().count();
    if len > max {
        return Err(NotesError::Validation(format!(
            "{} must be at most {} characters (got {})",
            field, max, len
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_tags(tags: Vec<String>) -> NotesResult<Vec<String>> {
    let tags: Vec<String> = tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if tags.len() > MAX_TAGS {
        return Err(NotesError::Validation(format!(
            "Maximum {} tags allowed",
            MAX_TAGS
        )));
    }
    if let Some(tag) = tags.iter().find(|t| t.chars().count() > TAG_MAX_CHARS) {
        return Err(NotesError::Validation(format!(
            "Tag length cannot exceed {} characters: {}",
            TAG_MAX_CHARS, tag
        )));
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("work, ideas ,, todo"), vec!["work", "ideas", "todo"]);
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_new_note_trims_and_validates() {
        let note = NewNote::new("  Groceries ", " milk ")
            .with_tags(vec![" home ".into(), "".into()])
            .validated()
            .unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk");
        assert_eq!(note.tags, vec!["home"]);
    }

    #[test]
    fn test_new_note_rejects_blank_and_long() {
        assert!(matches!(
            NewNote::new("   ", "body").validated(),
            Err(NotesError::Validation(_))
        ));
        assert!(NewNote::new("t".repeat(TITLE_MAX_CHARS), "body").validated().is_ok());
        assert!(NewNote::new("t".repeat(TITLE_MAX_CHARS + 1), "body")
            .validated()
            .is_err());
        assert!(NewNote::new("title", "c".repeat(CONTENT_MAX_CHARS + 1))
            .validated()
            .is_err());
    }

    #[test]
    fn test_tag_limits() {
        let eleven: Vec<String> = (0..11).map(|i| format!("tag{}", i)).collect();
        let err = NewNote::new("t", "c").with_tags(eleven).validated().unwrap_err();
        assert!(err.to_string().contains("Maximum 10 tags"));

        let long = vec!["x".repeat(TAG_MAX_CHARS + 1)];
        assert!(NewNote::new("t", "c").with_tags(long).validated().is_err());
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = NoteUpdate {
            title: Some(" Renamed ".into()),
            ..Default::default()
        }
        .validated()
        .unwrap();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Renamed"}));

        assert!(NoteUpdate::default().validated().is_err());
    }

    #[test]
    fn test_list_params() {
        let params = ListNotesParams::new().page(2).search("  ").archived(false);
        assert!(params.validate().is_ok());
        assert_eq!(
            params.query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("per_page", "10".to_string()),
                ("archived", "false".to_string()),
            ]
        );

        assert!(ListNotesParams::new().page(0).validate().is_err());
        assert!(ListNotesParams::new().per_page(101).validate().is_err());
    }

    #[test]
    fn test_note_deserializes_server_shape() {
        let note: Note = serde_json::from_str(
            r#"{"id": "6f1c", "title": "T", "content": "C", "tags": ["a"], "archived": false,
                "created_at": "2024-05-01T10:00:00Z", "updated_at": "2024-05-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(note.tags, vec!["a"]);
        assert!(note.updated_at > note.created_at);
    }

    #[test]
    fn test_naive_timestamps_read_as_utc() {
        let parsed = timestamp::parse("2024-05-01T10:00:00.123456").unwrap();
        assert_eq!(parsed, timestamp::parse("2024-05-01T10:00:00.123456Z").unwrap());
        assert!(timestamp::parse("yesterday").is_none());
    }
}
