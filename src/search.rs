//! Search box and type filter state
//!
//! Text and type selection are mutually exclusive: typing clears the type,
//! picking a type clears the text. The suggestion list is recomputed on
//! every keystroke from the catalogue alone.

use crate::catalogue::Catalogue;
use crate::resolver::{suggest, Query};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SearchState {
    catalogue: Arc<Catalogue>,
    text: String,
    category: Option<String>,
    suggestions: Vec<String>,
    show_suggestions: bool,
}

impl SearchState {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            text: String::new(),
            category: None,
            suggestions: vec![],
            show_suggestions: false,
        }
    }

    /// Raw text as typed
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Suggestions to render, empty while hidden
    pub fn suggestions(&self) -> &[String] {
        if self.show_suggestions {
            &self.suggestions
        } else {
            &[]
        }
    }

    /// Keystroke in the search box
    pub fn set_text(&mut self, raw: impl Into<String>) {
        self.text = raw.into();
        self.category = None;
        self.suggestions = suggest(&self.catalogue, &self.text);
        self.show_suggestions = !self.text.trim().is_empty();
    }

    /// Click on a type filter; clicking the active type clears it
    pub fn select_category(&mut self, category: &str) {
        let category = category.trim().to_lowercase();
        self.category = if category.is_empty() || self.category.as_deref() == Some(category.as_str()) {
            None
        } else {
            Some(category)
        };
        self.text.clear();
        self.suggestions.clear();
        self.show_suggestions = false;
    }

    pub fn clear_category(&mut self) {
        self.select_category("");
    }

    /// Pick an entry from the suggestion list
    pub fn select_suggestion(&mut self, name: &str) {
        self.text = name.to_string();
        self.category = None;
        self.suggestions.clear();
        self.show_suggestions = false;
    }

    /// Focus returns to the box: reshow suggestions for non-blank text
    pub fn focus(&mut self) {
        if !self.text.trim().is_empty() {
            self.suggestions = suggest(&self.catalogue, &self.text);
            self.show_suggestions = true;
        }
    }

    pub fn blur(&mut self) {
        self.show_suggestions = false;
    }

    /// The query the resolver should run for the current state
    pub fn query(&self) -> Query {
        match &self.category {
            Some(category) => Query::category(category),
            None => Query::text(&self.text),
        }
    }

    /// Caption shown above a result list of `count` records
    pub fn headline(&self, count: usize) -> String {
        match self.query() {
            Query::Category(category) => format!(
                "Showing {} type Pokémon - {} found",
                category.to_uppercase(),
                count
            ),
            Query::Text(text) => format!(
                "Showing results for \"{}\" - {} Pokémon found",
                text, count
            ),
            Query::Empty => "Random Pokémon from the first generation".to_string(),
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(Arc::new(Catalogue::builtin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::SUGGESTION_LIMIT;
    use proptest::prelude::*;

    #[test]
    fn test_typing_clears_category() {
        let mut state = SearchState::default();
        state.select_category("fire");
        assert_eq!(state.query(), Query::Category("fire".to_string()));

        state.set_text("pika");
        assert_eq!(state.category(), None);
        assert_eq!(state.query(), Query::Text("pika".to_string()));
        assert_eq!(state.suggestions(), &["pikachu".to_string()]);
    }

    #[test]
    fn test_category_clears_text_and_suggestions() {
        let mut state = SearchState::default();
        state.set_text("char");
        assert!(!state.suggestions().is_empty());

        state.select_category("Water");
        assert_eq!(state.text(), "");
        assert!(state.suggestions().is_empty());
        assert_eq!(state.query(), Query::Category("water".to_string()));
    }

    #[test]
    fn test_selecting_active_category_toggles_off() {
        let mut state = SearchState::default();
        state.select_category("fire");
        state.select_category("fire");
        assert_eq!(state.query(), Query::Empty);

        state.select_category("grass");
        state.clear_category();
        assert_eq!(state.category(), None);
    }

    #[test]
    fn test_blank_text_hides_suggestions() {
        let mut state = SearchState::default();
        state.set_text("   ");
        assert!(state.suggestions().is_empty());
        assert_eq!(state.query(), Query::Empty);
    }

    #[test]
    fn test_select_suggestion_and_focus() {
        let mut state = SearchState::default();
        state.set_text("ch");
        state.select_suggestion("charizard");
        assert_eq!(state.text(), "charizard");
        assert!(state.suggestions().is_empty());

        state.focus();
        assert_eq!(state.suggestions(), &["charizard".to_string()]);
        state.blur();
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn test_headline() {
        let mut state = SearchState::default();
        assert_eq!(state.headline(12), "Random Pokémon from the first generation");

        state.set_text("pika");
        assert_eq!(state.headline(1), "Showing results for \"pika\" - 1 Pokémon found");

        state.select_category("fire");
        assert_eq!(state.headline(20), "Showing FIRE type Pokémon - 20 found");
    }

    proptest! {
        #[test]
        fn prop_text_and_category_never_both_set(
            steps in proptest::collection::vec((any::<bool>(), "[a-z]{0,6}"), 0..20)
        ) {
            let mut state = SearchState::default();
            for (is_category, value) in steps {
                if is_category {
                    state.select_category(&value);
                } else {
                    state.set_text(value);
                }
                prop_assert!(state.category().is_none() || state.text().is_empty());
            }
        }

        #[test]
        fn prop_suggestions_capped_and_containing(text in "[a-zA-Z]{1,4}") {
            let mut state = SearchState::default();
            state.set_text(text.clone());
            let suggestions = state.suggestions();
            prop_assert!(suggestions.len() <= SUGGESTION_LIMIT);
            let needle = text.to_lowercase();
            for s in suggestions {
                prop_assert!(s.contains(needle.as_str()));
            }
        }
    }
}
