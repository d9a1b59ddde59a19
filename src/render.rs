//! Plain-text rendering for records and notes
//!
//! Pure formatting; colour is applied by the binary.

use crate::catalogue::type_color;
use crate::lookup::Record;
use crate::notes::Note;

/// Zero-padded Pokédex number, e.g. `#025`
pub fn dex_number(id: u32) -> String {
    format!("#{:03}", id)
}

/// Trim a trailing `.0` so 0.3 m and 4 kg read naturally
fn format_measure(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

pub fn measurements(record: &Record) -> String {
    format!(
        "Height: {} m | Weight: {} kg",
        format_measure(record.height_m()),
        format_measure(record.weight_kg())
    )
}

/// Capitalise the first letter of each hyphen-separated part
pub fn display_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}

/// `(type, hex colour)` pairs for badge rendering
pub fn type_badges(record: &Record) -> Vec<(&str, &'static str)> {
    record
        .types
        .iter()
        .map(|t| (t.as_str(), type_color(t)))
        .collect()
}

/// Multi-line card for one record; only the first two abilities are shown
pub fn record_card(record: &Record) -> String {
    let abilities: Vec<String> = record
        .abilities
        .iter()
        .take(2)
        .map(|a| display_name(a))
        .collect();
    let types: Vec<String> = record.types.iter().map(|t| display_name(t)).collect();

    let mut lines = vec![
        format!("{} {}", dex_number(record.id), display_name(&record.name)),
        measurements(record),
        format!("Types: {}", types.join(", ")),
        format!("Abilities: {}", abilities.join(", ")),
    ];
    if let Some(sprite) = &record.sprite_url {
        lines.push(format!("Sprite: {}", sprite));
    }
    lines.join("\n")
}

/// Summary block for one note
pub fn note_card(note: &Note) -> String {
    let mut lines = vec![
        format!("{}{}", note.title, if note.archived { " [archived]" } else { "" }),
        format!("id: {}", note.id),
    ];
    if !note.tags.is_empty() {
        lines.push(format!("tags: {}", note.tags.join(", ")));
    }
    lines.push(format!(
        "updated: {}",
        note.updated_at.format("%Y-%m-%d %H:%M")
    ));
    lines.push(String::new());
    lines.push(note.content.clone());
    lines.join("\n")
}
