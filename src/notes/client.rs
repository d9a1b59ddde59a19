//! Notes API client
//!
//! HTTP client for the notes CRUD endpoints under `{base}/notes`.

use super::{ListNotesParams, NewNote, Note, NoteUpdate};
use crate::config::ClientConfig;
use crate::error::{NotesError, NotesResult};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// `GET /notes` has been seen returning a bare array as well as
/// `{items: [...]}` and `{data: [...]}` envelopes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NoteList {
    Bare(Vec<Note>),
    Items { items: Vec<Note> },
    Data { data: Vec<Note> },
}

impl From<NoteList> for Vec<Note> {
    fn from(list: NoteList) -> Self {
        match list {
            NoteList::Bare(notes) => notes,
            NoteList::Items { items } => items,
            NoteList::Data { data } => data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

pub struct NotesClient {
    http: Client,
    base_url: Url,
}

impl NotesClient {
    pub fn new(config: &ClientConfig) -> NotesResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotesError::Network(format!("Failed to create HTTP client: {}", e)))?;

        // Trailing slash so that joining "notes" keeps any path prefix (/api/v1)
        let base_url = Url::parse(&format!("{}/", config.notes_url.trim_end_matches('/')))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> NotesResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "notes request");
        self.http
            .request(method, url)
            .header("Content-Type", "application/json")
    }

    /// `GET /notes` with paging, search and archive filter
    pub async fn list(&self, params: &ListNotesParams) -> NotesResult<Vec<Note>> {
        params.validate()?;
        let mut url = self.url("notes")?;
        url.query_pairs_mut().extend_pairs(params.query_pairs());

        let response = self.request(Method::GET, url).send().await?;
        let list: NoteList = decode(response).await?;
        Ok(list.into())
    }

    /// `GET /notes/{id}`
    pub async fn get(&self, id: &str) -> NotesResult<Note> {
        let url = self.note_url(id)?;
        let response = self.request(Method::GET, url).send().await?;
        decode(response).await
    }

    /// `POST /notes`
    pub async fn create(&self, note: NewNote) -> NotesResult<Note> {
        let note = note.validated()?;
        let url = self.url("notes")?;
        let response = self.request(Method::POST, url).json(&note).send().await?;
        let created: Note = decode(response).await?;
        tracing::info!(id = %created.id, "created note");
        Ok(created)
    }

    /// `PUT /notes/{id}`
    pub async fn update(&self, id: &str, update: NoteUpdate) -> NotesResult<Note> {
        let update = update.validated()?;
        let url = self.note_url(id)?;
        let response = self.request(Method::PUT, url).json(&update).send().await?;
        let updated: Note = decode(response).await?;
        tracing::info!(id = %updated.id, "updated note");
        Ok(updated)
    }

    /// `DELETE /notes/{id}`; 204 and JSON confirmations are both accepted
    pub async fn delete(&self, id: &str) -> NotesResult<()> {
        let url = self.note_url(id)?;
        let response = self.request(Method::DELETE, url).send().await?;
        check_status(response).await?;
        tracing::info!(id, "deleted note");
        Ok(())
    }

    fn note_url(&self, id: &str) -> NotesResult<Url> {
        let id = id.trim();
        if id.is_empty() {
            return Err(NotesError::Validation("note id is required".to_string()));
        }
        let mut url = self.url("notes")?;
        url.path_segments_mut()
            .map_err(|_| NotesError::Validation(format!("cannot-be-a-base URL: {}", self.base_url)))?
            .push(id);
        Ok(url)
    }
}

async fn check_status(response: Response) -> NotesResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(NotesError::Api {
        status: status.as_u16(),
        detail: error_detail(status, &body),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> NotesResult<T> {
    let response = check_status(response).await?;
    response.json().await.map_err(NotesError::from)
}

/// `body.detail` when the server sent one, otherwise a truncated raw body
fn error_detail(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Err(_) => body.chars().take(200).collect(),
    }
}
