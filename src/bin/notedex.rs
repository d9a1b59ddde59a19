//! notedex command line interface
//!
//! Terminal front-end for the notes API and the Pokémon lookup.
//!
//! # Usage
//!
//! ```bash
//! # List the second page of notes matching "rust"
//! notedex notes list --page 2 --search rust
//!
//! # Create a note with tags
//! notedex notes create --title "Groceries" --content "milk, eggs" --tags "home, weekly"
//!
//! # Resolve Pokémon by text, by type, or at random
//! notedex pokemon --text pika
//! notedex pokemon --type fire
//! notedex pokemon
//!
//! # Suggestions as you type
//! notedex suggest char
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use notedex::catalogue::{Catalogue, POKEMON_TYPES};
use notedex::notes::{parse_tags, ListNotesParams, NewNote, Note, NoteUpdate, NotesClient};
use notedex::render;
use notedex::resolution::{Resolution, ResolutionTracker};
use notedex::{ClientConfig, PokeApiClient, Record, Resolver, SearchState};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "notedex")]
#[command(version)]
#[command(about = "Notes client with a PokéAPI lookup tab")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage notes through the notes API
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },

    /// Resolve Pokémon by free text or by type (random sample when neither is given)
    Pokemon(PokemonArgs),

    /// Show name suggestions for partial input
    Suggest {
        text: String,
    },

    /// List the type filters
    Types,
}

#[derive(Subcommand)]
enum NotesCommand {
    /// List notes
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        per_page: u32,

        /// Search in title and content
        #[arg(long)]
        search: Option<String>,

        /// Filter by archive status
        #[arg(long)]
        archived: Option<bool>,
    },

    /// Show one note
    Get { id: String },

    /// Create a note
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// Update fields of a note
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        /// Comma-separated tags (replaces existing tags)
        #[arg(long)]
        tags: Option<String>,

        #[arg(long)]
        archived: Option<bool>,
    },

    /// Delete a note
    Delete { id: String },
}

#[derive(Args)]
struct PokemonArgs {
    /// Free-text name or id
    #[arg(long, conflicts_with = "category")]
    text: Option<String>,

    /// Type filter, e.g. fire
    #[arg(long = "type", value_name = "TYPE")]
    category: Option<String>,
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    let result = match cli.command {
        Commands::Notes { command } => cmd_notes(&config, command, cli.format).await,
        Commands::Pokemon(args) => cmd_pokemon(&config, args, cli.format).await,
        Commands::Suggest { text } => cmd_suggest(&text, cli.format),
        Commands::Types => cmd_types(cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{} {:#}", "error:".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// NOTES
// =============================================================================

async fn cmd_notes(config: &ClientConfig, command: NotesCommand, format: OutputFormat) -> Result<()> {
    let client = NotesClient::new(config).context("Failed to create notes client")?;

    match command {
        NotesCommand::List {
            page,
            per_page,
            search,
            archived,
        } => {
            let mut params = ListNotesParams::new().page(page).per_page(per_page);
            if let Some(search) = search {
                params = params.search(search);
            }
            if let Some(archived) = archived {
                params = params.archived(archived);
            }
            let notes = client.list(&params).await.context("Failed to load notes")?;
            print_notes(&notes, format)
        }
        NotesCommand::Get { id } => {
            let note = client.get(&id).await.context("Failed to load note")?;
            print_notes(std::slice::from_ref(&note), format)
        }
        NotesCommand::Create {
            title,
            content,
            tags,
        } => {
            let note = NewNote::new(title, content)
                .with_tags(tags.as_deref().map(parse_tags).unwrap_or_default());
            let created = client.create(note).await.context("Failed to create note")?;
            print_notes(std::slice::from_ref(&created), format)
        }
        NotesCommand::Update {
            id,
            title,
            content,
            tags,
            archived,
        } => {
            let update = NoteUpdate {
                title,
                content,
                tags: tags.as_deref().map(parse_tags),
                archived,
            };
            let updated = client
                .update(&id, update)
                .await
                .context("Failed to update note")?;
            print_notes(std::slice::from_ref(&updated), format)
        }
        NotesCommand::Delete { id } => {
            client.delete(&id).await.context("Failed to delete note")?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "deleted": id }))
                }
                OutputFormat::Pretty => println!("{} {}", "Deleted".green().bold(), id),
            }
            Ok(())
        }
    }
}

fn print_notes(notes: &[Note], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(notes)?),
        OutputFormat::Pretty => {
            if notes.is_empty() {
                println!("{}", "No notes found.".dimmed());
            }
            for note in notes {
                println!("{}\n", render::note_card(note));
            }
        }
    }
    Ok(())
}

// =============================================================================
// POKÉMON
// =============================================================================

async fn cmd_pokemon(config: &ClientConfig, args: PokemonArgs, format: OutputFormat) -> Result<()> {
    let catalogue = Arc::new(Catalogue::builtin());
    let lookup = Arc::new(PokeApiClient::new(config)?);
    let resolver = Resolver::new(lookup, Arc::clone(&catalogue));

    let mut search = SearchState::new(catalogue);
    if let Some(category) = &args.category {
        search.select_category(category);
    } else if let Some(text) = &args.text {
        search.set_text(text.as_str());
    }

    let mut tracker = ResolutionTracker::new();
    let ticket = tracker.begin(search.query());
    let outcome = resolver.resolve(ticket.query()).await;
    tracker.complete(&ticket, outcome);

    match tracker.state() {
        Resolution::Success(records) => print_records(&search, records, format),
        Resolution::Failed { reason, .. } => {
            anyhow::bail!("Failed to load Pokémon data ({}). Please try again.", reason)
        }
        Resolution::Idle | Resolution::Loading { .. } => Ok(()),
    }
}

fn print_records(search: &SearchState, records: &[Record], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Pretty => {
            if records.is_empty() {
                println!("{}", "No Pokémon found.".dimmed());
                return Ok(());
            }
            println!("{}\n", search.headline(records.len()).bold());
            for record in records {
                let card = render::record_card(record);
                let mut lines = card.lines();
                if let Some(title) = lines.next() {
                    println!("{}", title.cyan().bold());
                }
                for line in lines {
                    println!("  {}", line);
                }
                println!();
            }
        }
    }
    Ok(())
}

fn cmd_suggest(text: &str, format: OutputFormat) -> Result<()> {
    let mut search = SearchState::default();
    search.set_text(text);
    let suggestions = search.suggestions();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(suggestions)?),
        OutputFormat::Pretty => {
            for name in suggestions {
                println!("{}", name);
            }
        }
    }
    Ok(())
}

fn cmd_types(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(POKEMON_TYPES)?),
        OutputFormat::Pretty => {
            for name in POKEMON_TYPES {
                println!(
                    "{:<10} {}",
                    name,
                    notedex::catalogue::type_color(name).dimmed()
                );
            }
        }
    }
    Ok(())
}
