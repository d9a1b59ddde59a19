//! Static Pokémon catalogue
//!
//! The fixed name table the resolver matches text queries against, the type
//! list offered as category filters, and the colour used to badge each type.

/// 148 first-generation names in the order the suggestion list presents
/// them; raichu, dratini and dragonair are not in the table
pub const POPULAR_POKEMON: &[&str] = &[
    "pikachu", "charizard", "blastoise", "venusaur", "alakazam", "gengar",
    "dragonite", "mewtwo", "mew", "gyarados", "lapras", "eevee", "vaporeon",
    "jolteon", "flareon", "snorlax", "articuno", "zapdos", "moltres",
    "squirtle", "wartortle", "charmander", "charmeleon", "bulbasaur", "ivysaur",
    "caterpie", "metapod", "butterfree", "weedle", "kakuna", "beedrill",
    "pidgey", "pidgeotto", "pidgeot", "rattata", "raticate", "spearow",
    "fearow", "ekans", "arbok", "sandshrew", "sandslash", "nidoran-f",
    "nidorina", "nidoqueen", "nidoran-m", "nidorino", "nidoking", "clefairy",
    "clefable", "vulpix", "ninetales", "jigglypuff", "wigglytuff", "zubat",
    "golbat", "oddish", "gloom", "vileplume", "paras", "parasect", "venonat",
    "venomoth", "diglett", "dugtrio", "meowth", "persian", "psyduck", "golduck",
    "mankey", "primeape", "growlithe", "arcanine", "poliwag", "poliwhirl",
    "poliwrath", "abra", "kadabra", "machop", "machoke", "machamp",
    "bellsprout", "weepinbell", "victreebel", "tentacool", "tentacruel",
    "geodude", "graveler", "golem", "ponyta", "rapidash", "slowpoke",
    "slowbro", "magnemite", "magneton", "farfetchd", "doduo", "dodrio",
    "seel", "dewgong", "grimer", "muk", "shellder", "cloyster", "gastly",
    "haunter", "onix", "drowzee", "hypno", "krabby", "kingler", "voltorb",
    "electrode", "exeggcute", "exeggutor", "cubone", "marowak", "hitmonlee",
    "hitmonchan", "lickitung", "koffing", "weezing", "rhyhorn", "rhydon",
    "chansey", "tangela", "kangaskhan", "horsea", "seadra", "goldeen",
    "seaking", "staryu", "starmie", "mr-mime", "scyther", "jynx",
    "electabuzz", "magmar", "pinsir", "tauros", "magikarp", "ditto",
    "porygon", "omanyte", "omastar", "kabuto", "kabutops", "aerodactyl",
];

/// Type filters, in display order
pub const POKEMON_TYPES: &[&str] = &[
    "normal", "fire", "water", "electric", "grass", "ice",
    "fighting", "poison", "ground", "flying", "psychic", "bug",
    "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

const TYPE_COLORS: &[(&str, &str)] = &[
    ("normal", "#A8A878"),
    ("fire", "#F08030"),
    ("water", "#6890F0"),
    ("electric", "#F8D030"),
    ("grass", "#78C850"),
    ("ice", "#98D8D8"),
    ("fighting", "#C03028"),
    ("poison", "#A040A0"),
    ("ground", "#E0C068"),
    ("flying", "#A890F0"),
    ("psychic", "#F85888"),
    ("bug", "#A8B820"),
    ("rock", "#B8A038"),
    ("ghost", "#705898"),
    ("dragon", "#7038F8"),
    ("dark", "#705848"),
    ("steel", "#B8B8D0"),
    ("fairy", "#EE99AC"),
];

const DEFAULT_TYPE_COLOR: &str = "#68A090";

/// Hex colour for a type badge, falling back to a neutral teal
pub fn type_color(type_name: &str) -> &'static str {
    let lowered = type_name.to_lowercase();
    TYPE_COLORS
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_TYPE_COLOR)
}

/// Immutable name table injected into the resolver
///
/// Names are stored lower-cased; lookups against it are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    names: Vec<String>,
}

impl Catalogue {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// The built-in 148-name table
    pub fn builtin() -> Self {
        Self::new(POPULAR_POKEMON.iter().copied())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries containing `needle`, or whose 3-char prefix `needle` contains.
    ///
    /// `needle` must already be trimmed and lower-cased.
    pub fn loose_matches(&self, needle: &str, limit: usize) -> Vec<&str> {
        self.names
            .iter()
            .filter(|name| {
                let prefix: String = name.chars().take(3).collect();
                name.contains(needle) || needle.contains(prefix.as_str())
            })
            .take(limit)
            .map(String::as_str)
            .collect()
    }

    /// Case-insensitive substring filter used for suggestions
    pub fn containing(&self, text: &str, limit: usize) -> Vec<&str> {
        let needle = text.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.contains(needle.as_str()))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue() {
        let catalogue = Catalogue::builtin();
        assert_eq!(catalogue.len(), POPULAR_POKEMON.len());
        assert_eq!(catalogue.names()[0], "pikachu");
        assert_eq!(POKEMON_TYPES.len(), 18);
    }

    #[test]
    fn test_builtin_table_gaps() {
        let catalogue = Catalogue::builtin();
        assert_eq!(catalogue.len(), 148);
        for absent in ["raichu", "dratini", "dragonair"] {
            assert!(!catalogue.names().iter().any(|n| n == absent), "{}", absent);
        }
        // Reached only through the "dra" and "rat" prefixes
        assert_eq!(
            catalogue.loose_matches("dratini", 12),
            vec!["dragonite", "rattata", "raticate"]
        );
    }

    #[test]
    fn test_new_normalizes_names() {
        let catalogue = Catalogue::new(["  Pikachu ", "", "MEW"]);
        assert_eq!(catalogue.names(), &["pikachu".to_string(), "mew".to_string()]);
    }

    #[test]
    fn test_loose_matches_substring_and_prefix() {
        let catalogue = Catalogue::builtin();
        assert_eq!(catalogue.loose_matches("pika", 12), vec!["pikachu"]);

        // "charizardx" contains the prefix "cha" of every cha* entry
        let matches = catalogue.loose_matches("charizardx", 12);
        assert!(matches.contains(&"charizard"));
        assert!(matches.contains(&"charmander"));
        assert!(matches.contains(&"chansey"));
    }

    #[test]
    fn test_loose_matches_respects_limit() {
        let catalogue = Catalogue::builtin();
        // Every entry contains the empty string
        assert_eq!(catalogue.loose_matches("", 12).len(), 12);
        assert!(catalogue.loose_matches("zzzznotreal", 12).is_empty());
    }

    #[test]
    fn test_containing_is_case_insensitive() {
        let catalogue = Catalogue::builtin();
        assert_eq!(catalogue.containing("CHAR", 8), vec!["charizard", "charmander", "charmeleon"]);
    }

    #[test]
    fn test_type_color() {
        assert_eq!(type_color("fire"), "#F08030");
        assert_eq!(type_color("Water"), "#6890F0");
        assert_eq!(type_color("shadow"), DEFAULT_TYPE_COLOR);
    }
}
