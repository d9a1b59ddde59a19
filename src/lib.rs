//! notedex
//!
//! Client library for a notes REST API, plus a Pokémon lookup resolver
//! backed by PokéAPI.
//!
//! ## Modules
//!
//! - [`resolver`] - query → records, with strict fallback ordering
//! - [`lookup`] - `LookupService` trait and the PokéAPI client
//! - [`catalogue`] - static name table, type list and type colours
//! - [`search`] - mutually exclusive text/type state and suggestions
//! - [`resolution`] - view state machine with stale-result rejection
//! - [`notes`] - notes CRUD client and validation
//! - [`render`] - text formatting for records and notes

pub mod catalogue;
pub mod config;
pub mod error;
pub mod lookup;
pub mod notes;
pub mod render;
pub mod resolution;
pub mod resolver;
pub mod search;

pub use catalogue::Catalogue;
pub use config::ClientConfig;
pub use error::{LookupError, NotesError};
pub use lookup::{LookupService, PokeApiClient, Record};
pub use notes::{ListNotesParams, NewNote, Note, NoteUpdate, NotesClient};
pub use resolution::{Resolution, ResolutionTracker, Ticket};
pub use resolver::{Query, Resolved, Resolver, Strategy};
pub use search::SearchState;
